//! Erros do motor de mascaramento.
//!
//! Nenhuma mensagem carrega texto do usuário: apenas tipos de entidade,
//! nomes de padrões e diagnósticos do compilador de regex.

/// Erros de configuração, detectados na construção do registro (startup).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Regex inválida no padrão '{pattern}' de {entity_type}: {source}")]
    InvalidPattern {
        entity_type: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Tipo de entidade registrado duas vezes: {entity_type}")]
    DuplicateEntityType { entity_type: String },

    #[error("Reconhecedor {entity_type} não tem padrões")]
    NoPatterns { entity_type: String },

    #[error("Score {score} fora de [0, 1] em {context}")]
    ScoreOutOfRange { context: String, score: f64 },

    #[error("Placeholder de {entity_type} casa com o padrão failsafe {failsafe}")]
    PlaceholderCollision { entity_type: String, failsafe: String },

    #[error("Filtro de entidades inválido: {0}")]
    Analyze(#[from] AnalyzeError),

    #[error("Falha ao ler configuração: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Erros por chamada do analisador.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalyzeError {
    #[error("Tipo de entidade desconhecido no filtro: {0}")]
    UnknownEntityType(String),

    #[error("Scorer '{scorer}' indisponível")]
    ScorerUnavailable { scorer: String },
}

/// Erros de um scorer externo (modelo estatístico, serviço remoto).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScorerError {
    #[error("Scorer indisponível: {0}")]
    Unavailable(String),
}
