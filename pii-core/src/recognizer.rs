//! # Reconhecedores: Padrões, Contexto e Deny-list
//!
//! Um reconhecedor é uma regra para um único tipo de entidade:
//!
//! - **Padrões**: regexes, cada uma com um score base;
//! - **Palavras de contexto**: quando aparecem perto do candidato, somam um
//!   reforço fixo ao score;
//! - **Deny-list**: literais que nunca podem virar entidade;
//! - **Validador** (opcional, por padrão): checksum que eleva o score a 1.0.
//!
//! ## Por que scores baixos + contexto?
//!
//! Padrões pouco específicos (3 dígitos para CVV, palavras capitalizadas para
//! nomes) ficariam barulhentos sozinhos. Com score base abaixo do limiar, eles
//! só disparam quando o vocabulário do domínio está por perto ("cvv",
//! "şifre", "doğum tarihi", "kızlık soyadı").
//!
//! ## Deny-list em spans com várias palavras
//!
//! Um literal da deny-list pode ter várias palavras (`"Ahmet Yılmaz"`) ou
//! pontuação (`"A.Ş."`); a comparação ignora caixa, diacríticos, espaços
//! repetidos e pontuação nas pontas, dos dois lados. Primeiro o trecho
//! casado inteiro é comparado. Depois, palavras negadas funcionam como
//! separadores: `"Sayın Ahmet Yılmaz"` com `Sayın` na deny-list vira o
//! candidato `"Ahmet Yılmaz"`, que também é comparado com a lista.
//!
//! Um match que corta uma sequência de dígitos ao meio (um "telefone" dentro
//! de um número de 16 dígitos) nunca vira candidato.

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::normalize::{fold, splits_digit_run};
use crate::span::Match;
use crate::tokenizer::{ContextConfig, WordIndex};
use crate::validation::Validator;

/// Descrição serializável de um padrão (superfície de configuração).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSpec {
    pub name: String,
    pub regex: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<Validator>,
}

/// Descrição serializável de um reconhecedor.
///
/// Adicionar uma nova categoria de PII significa adicionar um `RecognizerSpec`,
/// não mudar o motor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizerSpec {
    pub entity_type: String,
    pub patterns: Vec<PatternSpec>,
    #[serde(default)]
    pub context: Vec<String>,
    #[serde(default)]
    pub deny_list: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl RecognizerSpec {
    pub fn new(entity_type: &str) -> Self {
        Self {
            entity_type: entity_type.to_string(),
            patterns: vec![],
            context: vec![],
            deny_list: vec![],
            placeholder: None,
        }
    }

    pub fn pattern(mut self, name: &str, regex: &str, score: f64) -> Self {
        self.patterns.push(PatternSpec {
            name: name.to_string(),
            regex: regex.to_string(),
            score,
            validator: None,
        });
        self
    }

    pub fn validated_pattern(mut self, name: &str, regex: &str, score: f64, validator: Validator) -> Self {
        self.patterns.push(PatternSpec {
            name: name.to_string(),
            regex: regex.to_string(),
            score,
            validator: Some(validator),
        });
        self
    }

    pub fn context(mut self, words: &[&str]) -> Self {
        self.context.extend(words.iter().map(|w| w.to_string()));
        self
    }

    pub fn deny(mut self, words: &[&str]) -> Self {
        self.deny_list.extend(words.iter().map(|w| w.to_string()));
        self
    }

    pub fn placeholder(mut self, token: &str) -> Self {
        self.placeholder = Some(token.to_string());
        self
    }
}

/// Padrão compilado.
#[derive(Debug)]
struct Pattern {
    regex: Regex,
    score: f64,
    validator: Option<Validator>,
}

/// Reconhecedor compilado, imutável depois da construção.
#[derive(Debug)]
pub struct Recognizer {
    entity_type: String,
    patterns: Vec<Pattern>,
    /// Palavras de contexto já normalizadas com [`fold`].
    context: Vec<String>,
    /// Deny-list já normalizada com [`deny_key`].
    deny_list: HashSet<String>,
    placeholder: Option<String>,
}

/// Forma de comparação da deny-list: espaços colapsados, pontuação das
/// pontas removida, caixa e diacríticos dobrados.
fn deny_key(s: &str) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    fold(collapsed.trim_matches(|c: char| !c.is_alphanumeric()))
}

fn check_score(score: f64, context: impl FnOnce() -> String) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&score) {
        Ok(())
    } else {
        Err(ConfigError::ScoreOutOfRange { context: context(), score })
    }
}

impl Recognizer {
    /// Compila um `RecognizerSpec`. Falha em regex inválida, lista de padrões
    /// vazia ou score fora de [0, 1].
    pub fn compile(spec: &RecognizerSpec) -> Result<Self, ConfigError> {
        if spec.patterns.is_empty() {
            return Err(ConfigError::NoPatterns {
                entity_type: spec.entity_type.clone(),
            });
        }

        let mut patterns = Vec::with_capacity(spec.patterns.len());
        for p in &spec.patterns {
            check_score(p.score, || format!("{}/{}", spec.entity_type, p.name))?;
            let regex = Regex::new(&p.regex).map_err(|source| ConfigError::InvalidPattern {
                entity_type: spec.entity_type.clone(),
                pattern: p.name.clone(),
                source,
            })?;
            patterns.push(Pattern {
                regex,
                score: p.score,
                validator: p.validator,
            });
        }

        Ok(Self {
            entity_type: spec.entity_type.clone(),
            patterns,
            context: spec.context.iter().map(|w| fold(w)).filter(|w| !w.is_empty()).collect(),
            deny_list: spec
                .deny_list
                .iter()
                .map(|w| deny_key(w))
                .filter(|w| !w.is_empty())
                .collect(),
            placeholder: spec.placeholder.clone(),
        })
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    fn is_denied(&self, literal: &str) -> bool {
        !self.deny_list.is_empty() && self.deny_list.contains(&deny_key(literal))
    }

    /// Divide `start..end` em sequências máximas de palavras não negadas.
    fn split_denied(&self, text: &str, start: usize, end: usize) -> Vec<(usize, usize)> {
        if self.deny_list.is_empty() {
            return vec![(start, end)];
        }

        let mut runs = Vec::new();
        let mut current: Option<(usize, usize)> = None;
        let slice = &text[start..end];
        let mut offset = 0;
        for word in slice.split_whitespace() {
            // split_whitespace não devolve offsets: localiza a palavra a partir do cursor
            let Some(pos) = slice[offset..].find(word) else { break };
            let word_start = start + offset + pos;
            let word_end = word_start + word.len();
            offset += pos + word.len();

            if self.is_denied(word) {
                if let Some(run) = current.take() {
                    runs.push(run);
                }
            } else {
                current = Some(match current {
                    Some((s, _)) => (s, word_end),
                    None => (word_start, word_end),
                });
            }
        }
        if let Some(run) = current {
            runs.push(run);
        }
        runs
    }

    /// Executa todos os padrões sobre o texto e devolve os candidatos já
    /// pontuados (sem limiar: o analisador decide).
    pub fn scan(&self, index: &WordIndex<'_>, text: &str, config: &ContextConfig, priority: usize) -> Vec<Match> {
        let mut matches = Vec::new();
        for pattern in &self.patterns {
            for m in pattern.regex.find_iter(text) {
                if splits_digit_run(text, m.start(), m.end()) || self.is_denied(m.as_str()) {
                    continue;
                }
                for (start, end) in self.split_denied(text, m.start(), m.end()) {
                    if self.is_denied(&text[start..end]) {
                        continue;
                    }
                    let mut score = pattern.score;
                    if index.has_context(start, end, config, &self.context) {
                        score = (score + config.boost).min(1.0);
                    }
                    if pattern.validator.is_some_and(|v| v.check(&text[start..end])) {
                        score = 1.0;
                    }
                    matches.push(Match::new(self.entity_type.as_str(), start, end, score, priority));
                }
            }
        }
        matches
    }
}
