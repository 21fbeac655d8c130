//! # Trilha de Auditoria
//!
//! O único artefato que pode chegar a um log de processo. Contém apenas nomes
//! de tipos e contagens por etapa: nenhum trecho casado, nenhum offset,
//! nenhuma codificação reversível do texto original.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::anonymizer::{EntitySource, MaskedEntity};

/// Contagens de um tipo, por etapa.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCounts {
    pub context_model: usize,
    pub regex_failsafe: usize,
}

impl StageCounts {
    pub fn total(&self) -> usize {
        self.context_model + self.regex_failsafe
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub context_model_count: usize,
    pub regex_failsafe_count: usize,
    /// Tipo → contagens (ordenado, para logs estáveis).
    pub by_type: BTreeMap<String, StageCounts>,
    /// `true` quando a etapa 1 foi pulada (scorer indisponível).
    pub degraded: bool,
}

/// Resume as entidades das duas etapas.
pub fn summarize(stage1: &[MaskedEntity], stage2: &[MaskedEntity]) -> AuditSummary {
    let mut summary = AuditSummary::default();
    for entity in stage1.iter().chain(stage2) {
        let counts = summary.by_type.entry(entity.entity_type.clone()).or_default();
        match entity.source {
            EntitySource::ContextModel => {
                counts.context_model += 1;
                summary.context_model_count += 1;
            }
            EntitySource::RegexFailsafe => {
                counts.regex_failsafe += 1;
                summary.regex_failsafe_count += 1;
            }
        }
    }
    summary
}

impl AuditSummary {
    pub fn total(&self) -> usize {
        self.context_model_count + self.regex_failsafe_count
    }

    /// Tipos encontrados, separados por vírgula (ex: "CCV,TCKN").
    pub fn entity_types(&self) -> String {
        self.by_type.keys().cloned().collect::<Vec<_>>().join(",")
    }

    /// Emite o evento estruturado de auditoria. Só o tamanho do texto
    /// mascarado é registrado, nunca o conteúdo.
    pub fn log(&self, request_id: &str, masked_text_length: usize) {
        info!(
            request_id,
            context_model_count = self.context_model_count,
            regex_failsafe_count = self.regex_failsafe_count,
            entity_types = %self.entity_types(),
            masked_text_length,
            degraded = self.degraded,
            "pii_masking_complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_counts_per_stage() {
        let stage1 = vec![
            MaskedEntity::new("TCKN", EntitySource::ContextModel),
            MaskedEntity::new("CCV", EntitySource::ContextModel),
        ];
        let stage2 = vec![MaskedEntity::new("TCKN", EntitySource::RegexFailsafe)];
        let summary = summarize(&stage1, &stage2);

        assert_eq!(summary.context_model_count, 2);
        assert_eq!(summary.regex_failsafe_count, 1);
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.by_type["TCKN"], StageCounts { context_model: 1, regex_failsafe: 1 });
        assert_eq!(summary.by_type["TCKN"].total(), 2);
        assert_eq!(summary.entity_types(), "CCV,TCKN");
    }

    #[test]
    fn test_summary_json_holds_no_text() {
        let stage1 = vec![MaskedEntity::new("PERSON", EntitySource::ContextModel)];
        let json = serde_json::to_string(&summarize(&stage1, &[])).unwrap();
        assert_eq!(
            json,
            r#"{"context_model_count":1,"regex_failsafe_count":0,"by_type":{"PERSON":{"context_model":1,"regex_failsafe":0}},"degraded":false}"#
        );
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[], &[]);
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.entity_types(), "");
    }
}
