//! # Anonimizador: Substituição por Placeholders
//!
//! Recebe o texto original e os spans aceitos e troca cada span pelo token
//! canônico do seu tipo. A substituição corre da direita para a esquerda:
//! trocar um span nunca invalida os offsets dos spans anteriores.
//!
//! Os tokens são contrato externo: consumidores casam `[MASKED_TCKN]`,
//! `[MASKED_IBAN]` etc., então renomear um token é uma quebra de
//! compatibilidade.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::span::Match;

/// Token para tipos sem placeholder mapeado.
pub const GENERIC_PLACEHOLDER: &str = "[MASKED]";

/// Tabela canônica tipo → placeholder (ambas as etapas usam a mesma).
const PLACEHOLDERS: &[(&str, &str)] = &[
    ("TCKN", "[MASKED_TCKN]"),
    ("TR_IBAN", "[MASKED_IBAN]"),
    ("IBAN", "[MASKED_IBAN]"),
    ("PHONE_NUMBER", "[MASKED_PHONE]"),
    ("PHONE", "[MASKED_PHONE]"),
    ("EMAIL_ADDRESS", "[MASKED_EMAIL]"),
    ("EMAIL", "[MASKED_EMAIL]"),
    ("CREDIT_CARD", "[MASKED_CC]"),
    ("ACCOUNT_NUMBER", "[MASKED_ACCOUNT]"),
    ("ACCOUNT", "[MASKED_ACCOUNT]"),
    ("PERSON", "[MASKED_NAME]"),
    ("CCV", "[MASKED_CCV]"),
    ("PASSWORD", "[MASKED_PASSWORD]"),
    ("DATE_OF_BIRTH", "[MASKED_DOB]"),
    ("MAIDEN_NAME", "[MASKED_MAIDEN_NAME]"),
];

/// Todos os placeholders conhecidos (inclui o genérico).
pub fn known_placeholders() -> impl Iterator<Item = &'static str> {
    PLACEHOLDERS
        .iter()
        .map(|(_, p)| *p)
        .chain(std::iter::once(GENERIC_PLACEHOLDER))
}

/// Origem de uma entidade mascarada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitySource {
    /// Etapa 1: reconhecedores com contexto (ou scorer externo).
    ContextModel,
    /// Etapa 2: varredura determinística.
    RegexFailsafe,
}

impl EntitySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntitySource::ContextModel => "context_model",
            EntitySource::RegexFailsafe => "regex_failsafe",
        }
    }
}

/// Metadado de auditoria de uma entidade mascarada: só tipo e origem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedEntity {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub source: EntitySource,
}

impl MaskedEntity {
    pub fn new(entity_type: impl Into<String>, source: EntitySource) -> Self {
        Self {
            entity_type: entity_type.into(),
            source,
        }
    }
}

/// Mapeamento tipo → placeholder, com sobrescritas de reconhecedores custom.
#[derive(Debug, Clone, Default)]
pub struct Anonymizer {
    overrides: HashMap<String, String>,
}

impl Anonymizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra um placeholder para um tipo (reconhecedores customizados).
    pub fn with_placeholder(mut self, entity_type: impl Into<String>, placeholder: impl Into<String>) -> Self {
        self.overrides.insert(entity_type.into(), placeholder.into());
        self
    }

    /// Placeholder de um tipo; tipos desconhecidos caem em [`GENERIC_PLACEHOLDER`].
    pub fn placeholder_for(&self, entity_type: &str) -> &str {
        match self.overrides.get(entity_type) {
            Some(custom) => custom,
            None => canonical_placeholder(entity_type),
        }
    }

    /// Substitui os spans pelo placeholder do tipo, da direita para a esquerda.
    ///
    /// Spans que sobrepõem um já substituído ou que não caem em fronteira de
    /// caractere são ignorados. Devolve o texto mascarado e as entidades na
    /// ordem em que aparecem no texto.
    pub fn apply(&self, text: &str, matches: &[Match]) -> (String, Vec<MaskedEntity>) {
        let mut ordered: Vec<&Match> = matches.iter().collect();
        ordered.sort_by(|a, b| b.start.cmp(&a.start).then_with(|| b.end.cmp(&a.end)));

        let mut masked = text.to_string();
        let mut entities = Vec::with_capacity(ordered.len());
        let mut boundary = text.len();

        for m in ordered {
            let valid = m.start < m.end
                && m.end <= boundary
                && text.is_char_boundary(m.start)
                && text.is_char_boundary(m.end);
            if !valid {
                continue;
            }
            masked.replace_range(m.start..m.end, self.placeholder_for(&m.entity_type));
            entities.push(MaskedEntity::new(m.entity_type.as_str(), EntitySource::ContextModel));
            boundary = m.start;
        }

        entities.reverse();
        (masked, entities)
    }
}

/// Placeholder canônico sem sobrescritas.
pub fn canonical_placeholder(entity_type: &str) -> &'static str {
    PLACEHOLDERS
        .iter()
        .find(|(t, _)| *t == entity_type)
        .map(|(_, p)| *p)
        .unwrap_or(GENERIC_PLACEHOLDER)
}
