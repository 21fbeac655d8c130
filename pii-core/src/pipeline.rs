//! # Pipeline de Mascaramento: Passo Duplo
//!
//! Orquestra as duas etapas sobre um texto de reclamação:
//!
//! ```text
//!  texto ──► Etapa 1: Analyzer (contexto + limiar) ──► Anonymizer ──►
//!            Etapa 2: FailsafeSweep (regex fixas) ──► MaskedResult
//! ```
//!
//! A etapa 1 decide o que é PII olhando o contexto; a etapa 2 não decide
//! nada, só garante que nenhum formato conhecido sobreviva. Se o scorer da
//! etapa 1 estiver indisponível, a chamada degrada para cobertura só de
//! failsafe em vez de falhar: o chamador nunca recebe texto mascarado pela
//! metade.
//!
//! Os formatos do failsafe encontrados no texto original entram na etapa 1
//! como spans protegidos. Um candidato de contexto que pegue só parte de um
//! deles é descartado, e a etapa 2 mascara o formato inteiro.
//!
//! O [`Masker`] é imutável depois de construído e pode ser compartilhado
//! entre threads; [`Masker::mask_batch`] usa `rayon` para isso.

use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analyzer::Analyzer;
use crate::anonymizer::{Anonymizer, MaskedEntity};
use crate::audit::{summarize, AuditSummary};
use crate::config::MaskingConfig;
use crate::error::ConfigError;
use crate::failsafe::FailsafeSweep;
use crate::registry::RecognizerRegistry;
use crate::scorer::EntityScorer;

/// Saída de uma chamada. É a única estrutura que cruza a fronteira de
/// confiança: texto mascarado mais tipo/origem de cada substituição.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedResult {
    pub masked_text: String,
    pub entities: Vec<MaskedEntity>,
}

/// Motor de mascaramento de passo duplo.
#[derive(Debug, Clone)]
pub struct Masker {
    analyzer: Analyzer,
    anonymizer: Anonymizer,
    failsafe: Arc<FailsafeSweep>,
    config: MaskingConfig,
}

impl Masker {
    /// Registro padrão + reconhecedores customizados da configuração.
    pub fn new(config: MaskingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = RecognizerRegistry::builder()
            .context(config.context)
            .with_defaults()
            .recognizers(config.custom_recognizers.iter().cloned())
            .build()?;
        let anonymizer = registry.anonymizer();
        Self::assemble(Arc::new(registry), anonymizer, config)
    }

    /// Usa um scorer externo na etapa 1 (ex: modelo estatístico). Os
    /// placeholders seguem a tabela canônica.
    pub fn with_scorer(scorer: Arc<dyn EntityScorer>, config: MaskingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::assemble(scorer, Anonymizer::new(), config)
    }

    fn assemble(
        scorer: Arc<dyn EntityScorer>,
        anonymizer: Anonymizer,
        config: MaskingConfig,
    ) -> Result<Self, ConfigError> {
        let analyzer = Analyzer::new(scorer);
        if let Some(types) = &config.entities {
            analyzer.check_entity_types(types)?;
        }
        let failsafe = Arc::new(FailsafeSweep::new()?);
        debug!(
            scorer = analyzer.scorer_name(),
            threshold = config.score_threshold,
            "masker pronto"
        );
        Ok(Self {
            analyzer,
            anonymizer,
            failsafe,
            config,
        })
    }

    pub fn config(&self) -> &MaskingConfig {
        &self.config
    }

    /// Mascara um texto.
    pub fn mask(&self, text: &str) -> MaskedResult {
        self.mask_with_audit(text).0
    }

    /// Mascara um texto e devolve também o resumo de auditoria.
    pub fn mask_with_audit(&self, text: &str) -> (MaskedResult, AuditSummary) {
        let (stage1_text, stage1, degraded) = self.context_stage(text);
        let (masked_text, stage2) = self.failsafe.sweep(&stage1_text);

        let mut summary = summarize(&stage1, &stage2);
        summary.degraded = degraded;

        let mut entities = stage1;
        entities.extend(stage2);
        (MaskedResult { masked_text, entities }, summary)
    }

    /// Mascara vários textos em paralelo. A ordem da saída é a da entrada.
    pub fn mask_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<MaskedResult> {
        texts.par_iter().map(|t| self.mask(t.as_ref())).collect()
    }

    /// Versão de [`Self::mask_batch`] com auditoria por texto.
    pub fn mask_batch_with_audit<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<(MaskedResult, AuditSummary)> {
        texts.par_iter().map(|t| self.mask_with_audit(t.as_ref())).collect()
    }

    /// Etapa 1 + anonimização. O terceiro valor indica degradação.
    fn context_stage(&self, text: &str) -> (String, Vec<MaskedEntity>, bool) {
        let filter = self.config.entities.as_deref();
        let guarded = self.failsafe.spans(text);
        match self
            .analyzer
            .analyze_guarded(text, filter, self.config.score_threshold, &guarded)
        {
            Ok(matches) => {
                let (masked, entities) = self.anonymizer.apply(text, &matches);
                (masked, entities, false)
            }
            Err(err) => {
                warn!(error = %err, "etapa 1 indisponível, aplicando apenas o failsafe");
                (text.to_string(), vec![], true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymizer::{known_placeholders, EntitySource};
    use crate::corpus::demo_texts;
    use crate::error::{AnalyzeError, ScorerError};
    use crate::recognizer::RecognizerSpec;
    use crate::span::Match;

    fn masker() -> Masker {
        Masker::new(MaskingConfig::default()).unwrap()
    }

    struct OfflineModel;

    impl EntityScorer for OfflineModel {
        fn name(&self) -> &str {
            "offline_model"
        }

        fn supported_entities(&self) -> Vec<String> {
            vec!["PERSON".to_string()]
        }

        fn score(&self, _text: &str) -> Result<Vec<Match>, ScorerError> {
            Err(ScorerError::Unavailable("connection refused".to_string()))
        }
    }

    #[test]
    fn test_iban_never_leaks() {
        let result = masker().mask("IBAN: TR33 0006 1005 1978 6457 8413 26");
        assert!(result.masked_text.contains("[MASKED_IBAN]"));
        assert!(!result.masked_text.contains("0006"));
    }

    #[test]
    fn test_ccv_context_sensitivity() {
        let m = masker();
        let with_context = m.mask("CVV kodunuz 123");
        assert_eq!(with_context.masked_text, "CVV kodunuz [MASKED_CCV]");
        assert_eq!(
            with_context.entities,
            vec![MaskedEntity::new("CCV", EntitySource::ContextModel)]
        );

        let without = m.mask("123 adet sipariş verdim");
        assert_eq!(without.masked_text, "123 adet sipariş verdim");
        assert!(without.entities.is_empty());
    }

    #[test]
    fn test_deny_list_keeps_text() {
        let result = masker().mask("Bu bir test metnidir");
        assert_eq!(result.masked_text, "Bu bir test metnidir");
        assert!(result.entities.is_empty());
    }

    #[test]
    fn test_honorific_survives_name_masked() {
        let result = masker().mask("Sayın Ahmet Yılmaz");
        assert_eq!(result.masked_text, "Sayın [MASKED_NAME]");
    }

    #[test]
    fn test_suffix_glued_numbers_masked() {
        let m = masker();
        assert_eq!(m.mask("beni 05321234567den arayın").masked_text, "beni [MASKED_PHONE]den arayın");
        assert_eq!(m.mask("Tel05321234567 numaramdır").masked_text, "Tel[MASKED_PHONE] numaramdır");
        assert_eq!(m.mask("numara: 5321234567ye").masked_text, "numara: [MASKED_PHONE]ye");
        let iban = m.mask("IBAN TR330006100519786457841326ya gönderin").masked_text;
        assert!(iban.contains("[MASKED_IBAN]ya"), "{iban}");
        assert!(!iban.contains("0006"), "{iban}");
    }

    #[test]
    fn test_password_keyword_does_not_split_phone() {
        let m = masker();
        let result = m.mask("Şifremi 0532 123 45 67'ye gönderin");
        assert_eq!(result.masked_text, "Şifremi [MASKED_PHONE]'ye gönderin");

        let result = m.mask("PIN 0532 123 45 67 gönderdim");
        assert!(result.masked_text.starts_with("PIN [MASKED_PHONE]"), "{}", result.masked_text);
        for digits in ["123", "45", "67"] {
            assert!(!result.masked_text.contains(digits), "{}", result.masked_text);
        }
    }

    #[test]
    fn test_failsafe_catches_what_stage_one_filtered_out() {
        let config = MaskingConfig {
            entities: Some(vec!["PERSON".to_string()]),
            ..MaskingConfig::default()
        };
        let result = Masker::new(config).unwrap().mask("TC kimlik 12345678901");
        assert_eq!(result.masked_text, "TC kimlik [MASKED_TCKN]");
        assert_eq!(
            result.entities,
            vec![MaskedEntity::new("TCKN", EntitySource::RegexFailsafe)]
        );
    }

    #[test]
    fn test_unavailable_scorer_degrades_to_failsafe() {
        let m = Masker::with_scorer(Arc::new(OfflineModel), MaskingConfig::default()).unwrap();
        let (result, summary) = m.mask_with_audit("Sayın Ahmet, tel 0532 123 45 67");
        assert_eq!(result.masked_text, "Sayın Ahmet, tel [MASKED_PHONE]");
        assert!(summary.degraded);
        assert_eq!(summary.context_model_count, 0);
        assert_eq!(summary.regex_failsafe_count, 1);
    }

    #[test]
    fn test_unknown_entity_filter_fails_at_startup() {
        let config = MaskingConfig {
            entities: Some(vec!["SHOE_SIZE".to_string()]),
            ..MaskingConfig::default()
        };
        assert!(matches!(
            Masker::new(config),
            Err(ConfigError::Analyze(AnalyzeError::UnknownEntityType(t))) if t == "SHOE_SIZE"
        ));
    }

    #[test]
    fn test_custom_recognizer_with_placeholder() {
        let config = MaskingConfig {
            custom_recognizers: vec![RecognizerSpec::new("POLICY_NUMBER")
                .pattern("policy", r"\bPL\d{8}\b", 0.6)
                .placeholder("[MASKED_POLICY]")],
            ..MaskingConfig::default()
        };
        let result = Masker::new(config).unwrap().mask("Poliçe PL12345678 iptal edildi");
        assert_eq!(result.masked_text, "Poliçe [MASKED_POLICY] iptal edildi");
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        let m = masker();
        for text in ["", "   ", "\n\t"] {
            let result = m.mask(text);
            assert_eq!(result.masked_text, text);
            assert!(result.entities.is_empty());
        }
    }

    #[test]
    fn test_demo_texts_leave_no_failsafe_format() {
        let m = masker();
        let failsafe = FailsafeSweep::new().unwrap();
        for (_, text) in demo_texts() {
            let result = m.mask(text);
            assert_eq!(failsafe.first_match(&result.masked_text), None, "{}", result.masked_text);
        }
    }

    #[test]
    fn test_output_is_stable_under_second_sweep() {
        let m = masker();
        let failsafe = FailsafeSweep::new().unwrap();
        for (_, text) in demo_texts() {
            let masked = m.mask(text).masked_text;
            assert_eq!(failsafe.sweep(&masked).0, masked);
        }
    }

    #[test]
    fn test_batch_preserves_order() {
        let m = masker();
        let texts = vec!["CVV kodunuz 123", "Toplam 500 TL ödeme yaptım", "mail ali@ornek.com"];
        let batch = m.mask_batch(&texts);
        let sequential: Vec<_> = texts.iter().map(|t| m.mask(t)).collect();
        assert_eq!(batch, sequential);
    }

    #[test]
    fn test_result_json_shape() {
        let result = masker().mask("CVV kodunuz 123");
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"masked_text":"CVV kodunuz [MASKED_CCV]","entities":[{"type":"CCV","source":"context_model"}]}"#
        );
    }

    #[test]
    fn test_placeholders_survive_remasking() {
        let m = masker();
        for placeholder in known_placeholders() {
            assert_eq!(m.mask(placeholder).masked_text, placeholder);
        }
    }

    #[test]
    fn test_masker_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Masker>();
    }
}
