//! # Tokenizador de Palavras e Janela de Contexto
//!
//! O reforço por contexto olha as palavras em volta de cada candidato.
//! O texto é segmentado uma única vez por chamada (UAX #29, via
//! `unicode-segmentation`) e cada token guarda seus offsets de byte no texto
//! original, de modo que a janela de um candidato é encontrada com busca
//! binária.
//!
//! ## Janela
//!
//! ```text
//!   Annenin kızlık soyadı:  Yıldırım   ve ...
//!   └──── words_before ───┘ └match┘  └after┘
//! ```
//!
//! O trecho casado nunca faz parte da própria janela: uma palavra-chave dentro
//! do candidato (ex: "Şifrem" casado pelo padrão de senha) não o reforça.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::normalize::{contains_word_prefix, fold};

/// Um token (palavra) do texto original.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    /// O texto do token (emprestado do texto original).
    pub text: &'a str,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Índice sequencial do token na lista.
    pub index: usize,
}

/// Tamanho da janela de contexto e magnitude do reforço.
///
/// Valores padrão calibrados para o domínio bancário turco; são
/// configuração, não constantes do algoritmo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Quantas palavras antes do candidato entram na janela.
    pub words_before: usize,
    /// Quantas palavras depois do candidato entram na janela.
    pub words_after: usize,
    /// Valor somado ao score base quando uma palavra-chave aparece (teto 1.0).
    pub boost: f64,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            words_before: 5,
            words_after: 1,
            boost: 0.35,
        }
    }
}

/// Segmenta o texto em palavras (pontuação e espaços são descartados).
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    text.unicode_word_indices()
        .enumerate()
        .map(|(index, (start, word))| Token {
            text: word,
            start,
            end: start + word.len(),
            index,
        })
        .collect()
}

/// Índice de palavras de um texto, construído uma vez por chamada.
#[derive(Debug)]
pub struct WordIndex<'a> {
    text: &'a str,
    tokens: Vec<Token<'a>>,
}

impl<'a> WordIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            tokens: tokenize(text),
        }
    }

    /// Trecho (bruto) das `n` palavras que terminam antes de `start`.
    fn before(&self, start: usize, n: usize) -> Option<&'a str> {
        let idx = self.tokens.partition_point(|t| t.end <= start);
        if n == 0 || idx == 0 {
            return None;
        }
        let first = &self.tokens[idx.saturating_sub(n)];
        let last = &self.tokens[idx - 1];
        Some(&self.text[first.start..last.end])
    }

    /// Trecho (bruto) das `n` palavras que começam depois de `end`.
    fn after(&self, end: usize, n: usize) -> Option<&'a str> {
        let idx = self.tokens.partition_point(|t| t.start < end);
        if n == 0 || idx >= self.tokens.len() {
            return None;
        }
        let first = &self.tokens[idx];
        let last = &self.tokens[(idx + n).min(self.tokens.len()) - 1];
        Some(&self.text[first.start..last.end])
    }

    /// Verifica se alguma palavra-chave (já normalizada) aparece na janela
    /// de contexto do intervalo `start..end`.
    pub fn has_context(&self, start: usize, end: usize, config: &ContextConfig, keywords: &[String]) -> bool {
        if keywords.is_empty() {
            return false;
        }
        [self.before(start, config.words_before), self.after(end, config.words_after)]
            .into_iter()
            .flatten()
            .map(fold)
            .any(|window| keywords.iter().any(|k| contains_word_prefix(&window, k)))
    }
}
