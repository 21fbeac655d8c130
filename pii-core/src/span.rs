//! # Spans Candidatos e Resolução de Sobreposição
//!
//! Cada reconhecedor propõe spans (intervalos de bytes) com um score. Vários
//! reconhecedores podem disputar o mesmo trecho: "1234567890123456" é ao
//! mesmo tempo um número de conta, um possível cartão e uma sequência de
//! dígitos qualquer. A resolução funciona como um NMS (Non-Maximum
//! Suppression) determinístico:
//!
//! 1. Ordena por score (desc), tamanho (desc), prioridade de registro (asc)
//!    e início (asc).
//! 2. Aceita gulosamente cada candidato que não sobrepõe um já aceito.
//! 3. Devolve os aceitos em ordem de início.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Um span candidato. Nunca guarda o texto casado, apenas offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Tipo da entidade (ex: "TCKN", "PERSON").
    pub entity_type: String,
    /// Offset de byte inicial (inclusive).
    pub start: usize,
    /// Offset de byte final (exclusivo).
    pub end: usize,
    /// Confiança final em [0, 1].
    pub score: f64,
    /// Ordem de registro do reconhecedor que produziu o span (desempate).
    pub priority: usize,
}

impl Match {
    pub fn new(entity_type: impl Into<String>, start: usize, end: usize, score: f64, priority: usize) -> Self {
        Self {
            entity_type: entity_type.into(),
            start,
            end,
            score,
            priority,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dois spans sobrepõem se compartilham ao menos um byte.
    pub fn overlaps(&self, other: &Match) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// `other` inteiro cabe dentro deste span.
    pub fn contains(&self, other: &Match) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Ordem de preferência entre candidatos concorrentes.
fn preference(a: &Match, b: &Match) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.len().cmp(&a.len()))
        .then_with(|| a.priority.cmp(&b.priority))
        .then_with(|| a.start.cmp(&b.start))
}

/// Mantém, para cada região sobreposta, apenas o melhor candidato.
pub fn resolve_overlaps(mut candidates: Vec<Match>) -> Vec<Match> {
    candidates.retain(|m| !m.is_empty());
    candidates.sort_by(preference);

    let mut kept: Vec<Match> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !kept.iter().any(|k| k.overlaps(&candidate)) {
            kept.push(candidate);
        }
    }

    kept.sort_by_key(|m| m.start);
    kept
}
