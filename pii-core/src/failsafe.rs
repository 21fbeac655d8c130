//! # Failsafe Determinístico (Etapa 2)
//!
//! Uma segunda varredura, sem contexto e sem limiar, sobre o texto já
//! anonimizado. A etapa 1 é probabilística e pode deixar passar um formato
//! conhecido; esta tabela fixa é a garantia estrutural contra vazamento:
//! depois dela nenhum dos formatos abaixo sobrevive no texto.
//!
//! | Ordem | Tipo          | Formato                                          |
//! |-------|---------------|--------------------------------------------------|
//! | 1     | `IBAN`        | `TR` + 24 dígitos, espaços opcionais             |
//! | 2     | `ACCOUNT`     | "hesap no" / "account number" + 10–16 dígitos    |
//! | 3     | `CREDIT_CARD` | 16 dígitos em blocos de 4                        |
//! | 4     | `TCKN`        | 11 dígitos, primeiro diferente de zero           |
//! | 5     | `PHONE`       | celular turco `(+90|0)? 5xx xxx xx xx`           |
//! | 6     | `EMAIL`       | `local@dominio.tld`                              |
//!
//! Os formatos mais longos rodam primeiro, para que um formato curto nunca
//! "morda" parte de um longo deixando dígitos para trás. `ACCOUNT` vem antes
//! de `CREDIT_CARD` porque a palavra-chave é mais informativa que o formato.
//!
//! Os formatos numéricos são delimitados por dígitos, não por fronteira de
//! palavra: `05321234567den` é um telefone com sufixo, mas
//! `12345678901234567` não contém um cartão. Os placeholders não contêm
//! dígitos nem `@`, então a varredura é idempotente.

use regex::Regex;

use crate::anonymizer::{canonical_placeholder, EntitySource, MaskedEntity};
use crate::error::ConfigError;
use crate::normalize::splits_digit_run;
use crate::span::Match;

/// (tipo, regex, grupo de captura a substituir; 0 = match inteiro)
const FAILSAFE_TABLE: &[(&str, &str, usize)] = &[
    ("IBAN", r"(?i)TR\s?\d{2}(?:\s?\d{4}){5}\s?\d{2}", 0),
    (
        "ACCOUNT",
        r"(?i)\b(?:hesap|account)\s*(?:numarası|numarasi|number|no)?\s*[:.]?\s*(\d{10,16})",
        1,
    ),
    ("CREDIT_CARD", r"\d{4}[\s-]?\d{4}[\s-]?\d{4}[\s-]?\d{4}", 0),
    ("TCKN", r"[1-9]\d{10}", 0),
    ("PHONE", r"(?:\+?90\s?|0\s?)?5\d{2}\s?\d{3}\s?\d{2}\s?\d{2}", 0),
    ("EMAIL", r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b", 0),
];

#[derive(Debug)]
struct FailsafeRule {
    entity_type: &'static str,
    regex: Regex,
    group: usize,
}

impl FailsafeRule {
    /// Intervalos a substituir, sem cortar sequências de dígitos.
    ///
    /// Um candidato rejeitado pode esconder outro que começa logo depois,
    /// então a busca recomeça no caractere seguinte ao início rejeitado.
    fn find(&self, text: &str) -> Vec<(usize, usize)> {
        let mut found = Vec::new();
        let mut pos = 0;
        while pos < text.len() {
            let Some(caps) = self.regex.captures_at(text, pos) else { break };
            let Some(whole) = caps.get(0) else { break };
            let target = caps.get(self.group).unwrap_or(whole);
            if splits_digit_run(text, target.start(), target.end()) {
                pos = whole.start() + text[whole.start()..].chars().next().map_or(1, char::len_utf8);
            } else {
                found.push((target.start(), target.end()));
                pos = whole.end().max(whole.start() + 1);
            }
        }
        found
    }
}

/// Tabela compilada do failsafe. Construída uma vez, somente leitura.
#[derive(Debug)]
pub struct FailsafeSweep {
    rules: Vec<FailsafeRule>,
}

impl FailsafeSweep {
    pub fn new() -> Result<Self, ConfigError> {
        let rules = FAILSAFE_TABLE
            .iter()
            .map(|&(entity_type, pattern, group)| {
                Regex::new(pattern)
                    .map(|regex| FailsafeRule { entity_type, regex, group })
                    .map_err(|source| ConfigError::InvalidPattern {
                        entity_type: entity_type.to_string(),
                        pattern: format!("failsafe_{}", entity_type.to_lowercase()),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Primeiro tipo do failsafe cujo padrão casa em `text`, se houver.
    pub fn first_match(&self, text: &str) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|r| !r.find(text).is_empty())
            .map(|r| r.entity_type)
    }

    /// Onde cada formato aparece no texto original, na ordem da tabela
    /// (um formato não ocupa região já tomada por outro anterior).
    pub fn spans(&self, text: &str) -> Vec<Match> {
        let mut taken: Vec<Match> = Vec::new();
        for (priority, rule) in self.rules.iter().enumerate() {
            for (start, end) in rule.find(text) {
                let span = Match::new(rule.entity_type, start, end, 1.0, priority);
                if !taken.iter().any(|t| t.overlaps(&span)) {
                    taken.push(span);
                }
            }
        }
        taken.sort_by_key(|m| m.start);
        taken
    }

    /// Substitui todo formato residual pelo placeholder do tipo.
    ///
    /// Devolve o texto final e uma entidade `regex_failsafe` por substituição.
    pub fn sweep(&self, masked_text: &str) -> (String, Vec<MaskedEntity>) {
        let mut current = masked_text.to_string();
        let mut entities = Vec::new();

        for rule in &self.rules {
            let found = rule.find(&current);
            if found.is_empty() {
                continue;
            }
            let placeholder = canonical_placeholder(rule.entity_type);
            let mut out = String::with_capacity(current.len());
            let mut last = 0;
            for (start, end) in found {
                out.push_str(&current[last..start]);
                out.push_str(placeholder);
                last = end;
                entities.push(MaskedEntity::new(rule.entity_type, EntitySource::RegexFailsafe));
            }
            out.push_str(&current[last..]);
            current = out;
        }

        (current, entities)
    }
}
