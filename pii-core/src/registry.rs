//! # Registro de Reconhecedores
//!
//! Coleção ordenada e imutável de [`Recognizer`]s, construída uma vez no
//! startup e compartilhada por referência (ou `Arc`) entre chamadas
//! concorrentes. Não existe registro global: quem precisa recebe a instância.
//!
//! Toda validação acontece em [`RegistryBuilder::build`]. Um processo nunca
//! serve requisições com um registro montado pela metade.

use std::collections::HashSet;

use tracing::debug;

use crate::anonymizer::Anonymizer;
use crate::builtin::default_recognizers;
use crate::error::{ConfigError, ScorerError};
use crate::failsafe::FailsafeSweep;
use crate::recognizer::{Recognizer, RecognizerSpec};
use crate::scorer::EntityScorer;
use crate::span::Match;
use crate::tokenizer::{ContextConfig, WordIndex};

/// Registro imutável. A posição de cada reconhecedor é a sua prioridade.
#[derive(Debug)]
pub struct RecognizerRegistry {
    recognizers: Vec<Recognizer>,
    context: ContextConfig,
}

impl RecognizerRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registro com os reconhecedores embutidos e janela padrão.
    pub fn with_defaults() -> Result<Self, ConfigError> {
        RegistryBuilder::new().with_defaults().build()
    }

    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }

    pub fn entity_types(&self) -> impl Iterator<Item = &str> {
        self.recognizers.iter().map(|r| r.entity_type())
    }

    /// Anonimizador com os placeholders customizados deste registro.
    pub fn anonymizer(&self) -> Anonymizer {
        self.recognizers
            .iter()
            .filter_map(|r| r.placeholder().map(|p| (r.entity_type(), p)))
            .fold(Anonymizer::new(), |a, (t, p)| a.with_placeholder(t, p))
    }

    /// Executa todos os reconhecedores e devolve os candidatos brutos
    /// (sobrepostos, sem limiar).
    pub fn analyze(&self, text: &str) -> Vec<Match> {
        if text.is_empty() {
            return vec![];
        }
        let index = WordIndex::new(text);
        self.recognizers
            .iter()
            .enumerate()
            .flat_map(|(priority, r)| r.scan(&index, text, &self.context, priority))
            .collect()
    }
}

impl EntityScorer for RecognizerRegistry {
    fn name(&self) -> &str {
        "recognizer_registry"
    }

    fn supported_entities(&self) -> Vec<String> {
        self.entity_types().map(str::to_string).collect()
    }

    fn score(&self, text: &str) -> Result<Vec<Match>, ScorerError> {
        Ok(self.analyze(text))
    }
}

/// Construtor do registro: acumula specs e valida tudo em `build`.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    specs: Vec<RecognizerSpec>,
    context: ContextConfig,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(mut self, context: ContextConfig) -> Self {
        self.context = context;
        self
    }

    /// Acrescenta os reconhecedores embutidos do domínio bancário turco.
    pub fn with_defaults(mut self) -> Self {
        self.specs.extend(default_recognizers());
        self
    }

    pub fn recognizer(mut self, spec: RecognizerSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn recognizers(mut self, specs: impl IntoIterator<Item = RecognizerSpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    /// Compila e valida. Falha em tipo duplicado, regex inválida, score fora
    /// de faixa ou placeholder customizado que o failsafe mascararia.
    pub fn build(self) -> Result<RecognizerRegistry, ConfigError> {
        if !(0.0..=1.0).contains(&self.context.boost) {
            return Err(ConfigError::ScoreOutOfRange {
                context: "context.boost".to_string(),
                score: self.context.boost,
            });
        }

        let failsafe = FailsafeSweep::new()?;
        let mut seen = HashSet::new();
        let mut recognizers = Vec::with_capacity(self.specs.len());

        for spec in &self.specs {
            if !seen.insert(spec.entity_type.as_str()) {
                return Err(ConfigError::DuplicateEntityType {
                    entity_type: spec.entity_type.clone(),
                });
            }
            if let Some(failsafe_type) = spec.placeholder.as_deref().and_then(|p| failsafe.first_match(p)) {
                return Err(ConfigError::PlaceholderCollision {
                    entity_type: spec.entity_type.clone(),
                    failsafe: failsafe_type.to_string(),
                });
            }
            recognizers.push(Recognizer::compile(spec)?);
        }

        debug!(recognizers = recognizers.len(), "registro de reconhecedores construído");
        Ok(RecognizerRegistry {
            recognizers,
            context: self.context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_build() {
        let registry = RecognizerRegistry::with_defaults().unwrap();
        assert_eq!(registry.len(), 11);
        assert_eq!(registry.entity_types().next(), Some("TR_IBAN"));
    }

    #[test]
    fn test_duplicate_entity_type_rejected() {
        let result = RecognizerRegistry::builder()
            .with_defaults()
            .recognizer(RecognizerSpec::new("TCKN").pattern("again", r"\d{11}", 0.5))
            .build();
        assert!(matches!(result, Err(ConfigError::DuplicateEntityType { entity_type }) if entity_type == "TCKN"));
    }

    #[test]
    fn test_invalid_regex_fails_at_build() {
        let result = RecognizerRegistry::builder()
            .recognizer(RecognizerSpec::new("BROKEN").pattern("bad", r"[unclosed", 0.5))
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));
    }

    #[test]
    fn test_placeholder_collision_rejected() {
        let result = RecognizerRegistry::builder()
            .recognizer(
                RecognizerSpec::new("WEIRD")
                    .pattern("w", r"\bW\d\b", 0.5)
                    .placeholder("<kvkk@ornek.com>"),
            )
            .build();
        assert!(matches!(result, Err(ConfigError::PlaceholderCollision { .. })));
    }

    #[test]
    fn test_bad_boost_rejected() {
        let result = RecognizerRegistry::builder()
            .context(ContextConfig { boost: 2.0, ..ContextConfig::default() })
            .build();
        assert!(matches!(result, Err(ConfigError::ScoreOutOfRange { .. })));
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        let registry = RecognizerRegistry::with_defaults().unwrap();
        assert!(registry.analyze("").is_empty());
    }

    #[test]
    fn test_priority_is_registration_order() {
        let registry = RecognizerRegistry::with_defaults().unwrap();
        let candidates = registry.analyze("CVV kodunuz 123");
        let ccv = candidates.iter().find(|m| m.entity_type == "CCV").unwrap();
        let expected = registry.entity_types().position(|t| t == "CCV").unwrap();
        assert_eq!(ccv.priority, expected);
    }

    #[test]
    fn test_custom_placeholder_reaches_anonymizer() {
        let registry = RecognizerRegistry::builder()
            .recognizer(
                RecognizerSpec::new("POLICY")
                    .pattern("policy", r"\bPL\d{8}\b", 0.6)
                    .placeholder("[MASKED_POLICY]"),
            )
            .build()
            .unwrap();
        assert_eq!(registry.anonymizer().placeholder_for("POLICY"), "[MASKED_POLICY]");
    }

    #[test]
    fn test_registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RecognizerRegistry>();
    }
}
