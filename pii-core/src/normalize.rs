//! # Normalização de Texto para Turco
//!
//! Comparações de deny-list e de palavras de contexto precisam ignorar caixa
//! e diacríticos. O `to_lowercase` padrão não basta para o turco:
//! `"İ".to_lowercase()` produz `"i̇"` (com ponto combinante) e `"I"` deveria
//! virar `"ı"`. Aqui todas as variantes de i colapsam em `i` e os diacríticos
//! turcos são removidos.
//!
//! | Entrada            | Saída |
//! |--------------------|-------|
//! | `İ`, `I`, `ı`, `i` | `i`   |
//! | `Ç`, `ç`           | `c`   |
//! | `Ğ`, `ğ`           | `g`   |
//! | `Ö`, `ö`           | `o`   |
//! | `Ş`, `ş`           | `s`   |
//! | `Ü`, `ü`           | `u`   |
//! | `Â`, `â`, `Î`, `î`, `Û`, `û` | `a`, `i`, `u` |

/// Ponto combinante (U+0307) que sobra de alguns lowercases de `İ`.
const COMBINING_DOT_ABOVE: char = '\u{0307}';

/// Dobra um único caractere em `out` (pode não escrever nada).
fn fold_char(c: char, out: &mut String) {
    match c {
        'İ' | 'I' | 'ı' | 'i' | 'Î' | 'î' => out.push('i'),
        'Ç' | 'ç' => out.push('c'),
        'Ğ' | 'ğ' => out.push('g'),
        'Ö' | 'ö' => out.push('o'),
        'Ş' | 'ş' => out.push('s'),
        'Ü' | 'ü' | 'Û' | 'û' => out.push('u'),
        'Â' | 'â' => out.push('a'),
        COMBINING_DOT_ABOVE => {}
        other => out.extend(other.to_lowercase()),
    }
}

/// Normaliza caixa e diacríticos turcos (ex: "Şifrem" → "sifrem").
pub fn fold(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        fold_char(c, &mut out);
    }
    out
}

/// Verifica se `needle` (já normalizado) aparece em `haystack` (já normalizado)
/// começando numa fronteira de palavra.
///
/// Sufixos são permitidos: `"sifre"` casa com `"sifrem"` e `"sifresi"`,
/// o que importa numa língua aglutinante como o turco.
pub fn contains_word_prefix(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(idx, _)| {
        haystack[..idx]
            .chars()
            .next_back()
            .map_or(true, |prev| !prev.is_alphanumeric())
    })
}

/// `true` quando `start..end` corta uma sequência de dígitos ao meio: o
/// trecho começa com dígito colado a outro dígito, ou termina assim.
///
/// Letras coladas não contam. Em turco o sufixo de caso costuma vir grudado
/// no número (`05321234567den`, `TR33...26ya`), e isso ainda é um número
/// completo.
pub fn splits_digit_run(text: &str, start: usize, end: usize) -> bool {
    let is_digit = |c: Option<char>| c.is_some_and(|c| c.is_ascii_digit());
    let cut_before = is_digit(text[..start].chars().next_back()) && is_digit(text[start..].chars().next());
    let cut_after = is_digit(text[end..].chars().next()) && is_digit(text[..end].chars().next_back());
    cut_before || cut_after
}
