//! # Analisador: Etapa 1 (sensível a contexto)
//!
//! Coleta os candidatos do scorer, aplica o filtro de tipos, resolve
//! sobreposições e corta pelo limiar global. O limiar é o único botão que
//! troca falsos positivos por vazamento: um score **igual** ao limiar é
//! mantido, abaixo dele é descartado.
//!
//! A função é pura e total sobre qualquer texto (inclusive vazio). Os únicos
//! erros são do chamador (tipo desconhecido no filtro) ou de um scorer
//! externo indisponível.
//!
//! Com [`Analyzer::analyze_guarded`] o chamador passa spans protegidos
//! (formatos que o failsafe vai mascarar inteiros). Um candidato que corta
//! um span protegido sem cobri-lo é descartado antes da resolução de
//! sobreposições: um `PASSWORD` em `"0532"` nunca pode vencer o telefone
//! `"0532 123 45 67"` e deixar o resto do número no texto.

use std::sync::Arc;

use tracing::debug;

use crate::error::AnalyzeError;
use crate::scorer::EntityScorer;
use crate::span::{resolve_overlaps, Match};

/// Limiar padrão de score.
pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.45;

/// Analisador sobre um scorer compartilhado.
#[derive(Clone)]
pub struct Analyzer {
    scorer: Arc<dyn EntityScorer>,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer").field("scorer", &self.scorer.name()).finish()
    }
}

impl Analyzer {
    pub fn new(scorer: Arc<dyn EntityScorer>) -> Self {
        Self { scorer }
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    /// Rejeita filtros que citam tipos que o scorer não produz.
    pub fn check_entity_types(&self, entity_types: &[String]) -> Result<(), AnalyzeError> {
        let supported = self.scorer.supported_entities();
        match entity_types.iter().find(|t| !supported.contains(t)) {
            Some(unknown) => Err(AnalyzeError::UnknownEntityType(unknown.clone())),
            None => Ok(()),
        }
    }

    /// Spans aceitos, ordenados por início.
    ///
    /// `entity_types = None` aceita todos os tipos do scorer.
    pub fn analyze(
        &self,
        text: &str,
        entity_types: Option<&[String]>,
        threshold: f64,
    ) -> Result<Vec<Match>, AnalyzeError> {
        self.analyze_guarded(text, entity_types, threshold, &[])
    }

    /// Como [`Self::analyze`], descartando candidatos que sobrepõem um span
    /// de `guarded` sem contê-lo.
    pub fn analyze_guarded(
        &self,
        text: &str,
        entity_types: Option<&[String]>,
        threshold: f64,
        guarded: &[Match],
    ) -> Result<Vec<Match>, AnalyzeError> {
        if let Some(types) = entity_types {
            self.check_entity_types(types)?;
        }
        if text.is_empty() {
            return Ok(vec![]);
        }

        let mut candidates = self.scorer.score(text).map_err(|_| AnalyzeError::ScorerUnavailable {
            scorer: self.scorer.name().to_string(),
        })?;
        let raw = candidates.len();

        candidates.retain(|m| {
            m.start < m.end
                && m.end <= text.len()
                && entity_types.map_or(true, |types| types.iter().any(|t| *t == m.entity_type))
        });
        candidates.retain(|m| !guarded.iter().any(|g| m.overlaps(g) && !m.contains(g)));

        let mut accepted = resolve_overlaps(candidates);
        accepted.retain(|m| m.score >= threshold);

        debug!(
            scorer = self.scorer.name(),
            candidates = raw,
            accepted = accepted.len(),
            "etapa 1 concluída"
        );
        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScorerError;
    use crate::recognizer::RecognizerSpec;
    use crate::registry::RecognizerRegistry;

    fn analyzer() -> Analyzer {
        Analyzer::new(Arc::new(RecognizerRegistry::with_defaults().unwrap()))
    }

    fn types(text: &str) -> Vec<String> {
        analyzer()
            .analyze(text, None, DEFAULT_SCORE_THRESHOLD)
            .unwrap()
            .into_iter()
            .map(|m| m.entity_type)
            .collect()
    }

    #[derive(Debug)]
    struct OfflineModel;

    impl EntityScorer for OfflineModel {
        fn name(&self) -> &str {
            "offline_model"
        }

        fn supported_entities(&self) -> Vec<String> {
            vec!["PERSON".to_string()]
        }

        fn score(&self, _text: &str) -> Result<Vec<Match>, ScorerError> {
            Err(ScorerError::Unavailable("timeout".to_string()))
        }
    }

    #[test]
    fn test_empty_text() {
        assert!(analyzer().analyze("", None, DEFAULT_SCORE_THRESHOLD).unwrap().is_empty());
    }

    #[test]
    fn test_ccv_needs_context() {
        assert!(types("CVV kodunuz 123").contains(&"CCV".to_string()));
        assert!(!types("123 adet sipariş verdim").contains(&"CCV".to_string()));
    }

    #[test]
    fn test_person_after_honorific() {
        for text in ["Sayın Ahmet Yılmaz", "Müşteri Fatma Öztürk ile görüşüldü", "Bay Mehmet bey aradı"] {
            assert!(types(text).contains(&"PERSON".to_string()), "{text}");
        }
        assert!(!types("Bu bir test metnidir").contains(&"PERSON".to_string()));
    }

    #[test]
    fn test_maiden_name_wins_tie_with_person() {
        let text = "Annenin kızlık soyadı: Yıldırım";
        let matches = analyzer().analyze(text, None, DEFAULT_SCORE_THRESHOLD).unwrap();
        let maiden = matches.iter().find(|m| m.entity_type == "MAIDEN_NAME").unwrap();
        assert_eq!(&text[maiden.start..maiden.end], "Yıldırım");
        assert!(!matches.iter().any(|m| m.entity_type == "PERSON"));
    }

    #[test]
    fn test_dob_vs_transaction_date() {
        assert!(types("Doğum tarihi: 15/03/1990").contains(&"DATE_OF_BIRTH".to_string()));
        assert!(!types("İşlem tarihi: 15/03/2024").contains(&"DATE_OF_BIRTH".to_string()));
    }

    #[test]
    fn test_password_with_context() {
        for text in ["Şifrem: abc123xyz", "PIN kodunu unuttum: 1234", "Internet şifresi: MyP@ss2024!"] {
            assert!(types(text).contains(&"PASSWORD".to_string()), "{text}");
        }
        assert!(!types("Bu normal bir metindir").contains(&"PASSWORD".to_string()));
    }

    #[test]
    fn test_account_number_with_context() {
        assert_eq!(types("Hesap no: 1234567890123456"), vec!["ACCOUNT_NUMBER".to_string()]);
    }

    #[test]
    fn test_luhn_valid_card_detected_without_context() {
        assert_eq!(types("4111 1111 1111 1111"), vec!["CREDIT_CARD".to_string()]);
    }

    #[test]
    fn test_common_text_not_masked() {
        for text in ["Toplam 500 TL ödeme yaptım", "2024 yılında başvurdum", "3 gün içinde çözüldü"] {
            assert!(types(text).is_empty(), "{text}: {:?}", types(text));
        }
    }

    #[test]
    fn test_threshold_boundary() {
        let registry = RecognizerRegistry::builder()
            .recognizer(RecognizerSpec::new("CODE").pattern("code", r"\bK\d{3}\b", DEFAULT_SCORE_THRESHOLD))
            .build()
            .unwrap();
        let analyzer = Analyzer::new(Arc::new(registry));

        let at = analyzer.analyze("kod K123", None, DEFAULT_SCORE_THRESHOLD).unwrap();
        assert_eq!(at.len(), 1);

        let above = analyzer.analyze("kod K123", None, DEFAULT_SCORE_THRESHOLD + 1e-9).unwrap();
        assert!(above.is_empty());
    }

    #[test]
    fn test_entity_filter() {
        let a = analyzer();
        let only_tckn = vec!["TCKN".to_string()];
        let matches = a.analyze("TC 12345678901, CVV 123", Some(&only_tckn), DEFAULT_SCORE_THRESHOLD).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].entity_type, "TCKN");

        let unknown = vec!["SHOE_SIZE".to_string()];
        assert_eq!(
            a.analyze("x", Some(&unknown), DEFAULT_SCORE_THRESHOLD),
            Err(AnalyzeError::UnknownEntityType("SHOE_SIZE".to_string()))
        );
    }

    #[test]
    fn test_overlap_resolution_is_reproducible() {
        let a = analyzer();
        let text = "Adım Ahmet, TC: 12345678901, IBAN: TR330006100519786457841326, CVV 123";
        let first = a.analyze(text, None, DEFAULT_SCORE_THRESHOLD).unwrap();
        for _ in 0..5 {
            assert_eq!(a.analyze(text, None, DEFAULT_SCORE_THRESHOLD).unwrap(), first);
        }
        for pair in first.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_guarded_span_not_cut_by_shorter_candidate() {
        let text = "Şifremi 0532 123 45 67'ye gönderin";
        let start = text.find("0532").unwrap();
        let phone = Match::new("PHONE", start, start + "0532 123 45 67".len(), 1.0, 0);

        let unguarded = analyzer().analyze(text, None, DEFAULT_SCORE_THRESHOLD).unwrap();
        assert!(unguarded.iter().any(|m| m.entity_type == "PASSWORD" && m.start == start));

        let guarded = analyzer()
            .analyze_guarded(text, None, DEFAULT_SCORE_THRESHOLD, &[phone.clone()])
            .unwrap();
        assert_eq!(guarded.len(), 1);
        assert_eq!(guarded[0].entity_type, "PHONE_NUMBER");
        assert_eq!((guarded[0].start, guarded[0].end), (phone.start, phone.end));
    }

    #[test]
    fn test_unavailable_scorer_is_reported() {
        let a = Analyzer::new(Arc::new(OfflineModel));
        assert_eq!(
            a.analyze("Sayın Ahmet", None, DEFAULT_SCORE_THRESHOLD),
            Err(AnalyzeError::ScorerUnavailable { scorer: "offline_model".to_string() })
        );
    }
}
