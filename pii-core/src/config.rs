//! # Configuração do Mascaramento
//!
//! Tudo que é "botão" do motor fica aqui: limiar global, janela de contexto,
//! filtro de tipos e reconhecedores extras. A configuração é lida de JSON
//! (serde) e todos os campos têm padrão, então `{}` é uma configuração
//! válida.
//!
//! ```json
//! {
//!   "score_threshold": 0.45,
//!   "context": { "words_before": 5, "words_after": 1, "boost": 0.35 },
//!   "entities": null,
//!   "custom_recognizers": []
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::analyzer::DEFAULT_SCORE_THRESHOLD;
use crate::error::ConfigError;
use crate::recognizer::RecognizerSpec;
use crate::tokenizer::ContextConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskingConfig {
    /// Scores abaixo deste valor são descartados na etapa 1.
    pub score_threshold: f64,
    pub context: ContextConfig,
    /// Restringe a etapa 1 a estes tipos (`None` = todos). A etapa 2 roda sempre.
    pub entities: Option<Vec<String>>,
    /// Reconhecedores acrescentados depois dos embutidos.
    pub custom_recognizers: Vec<RecognizerSpec>,
}

impl Default for MaskingConfig {
    fn default() -> Self {
        Self {
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            context: ContextConfig::default(),
            entities: None,
            custom_recognizers: vec![],
        }
    }
}

impl MaskingConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.score_threshold = threshold;
        self
    }

    /// Checagens que não dependem do registro (este valida o resto).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.score_threshold) {
            return Err(ConfigError::ScoreOutOfRange {
                context: "score_threshold".to_string(),
                score: self.score_threshold,
            });
        }
        Ok(())
    }
}
