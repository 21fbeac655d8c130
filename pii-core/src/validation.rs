//! # Validadores de Checksum
//!
//! Alguns formatos carregam um dígito verificador. Quando o trecho casado
//! passa no checksum, a confiança do reconhecedor sobe para 1.0; quando
//! falha, o score base é mantido (o contexto ainda pode salvá-lo).
//!
//! - **Luhn**: cartões de crédito (16 dígitos).
//! - **TCKN**: número de identidade turco (11 dígitos, 10º e 11º verificadores).
//! - **IBAN**: ISO 13616, resto 1 na divisão por 97.

use serde::{Deserialize, Serialize};

/// Validador opcional associado a um padrão.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    Luhn,
    Tckn,
    Iban,
}

impl Validator {
    /// Aplica o checksum ao trecho casado, ignorando espaços e hífens.
    pub fn check(&self, matched: &str) -> bool {
        match self {
            Validator::Luhn => luhn_valid(&digits_only(matched)),
            Validator::Tckn => tckn_valid(&digits_only(matched)),
            Validator::Iban => iban_valid(matched),
        }
    }
}

fn digits_only(s: &str) -> Vec<u32> {
    s.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// Algoritmo de Luhn sobre uma sequência de dígitos.
pub fn luhn_valid(digits: &[u32]) -> bool {
    if digits.len() < 12 {
        return false;
    }
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

/// Checksum oficial da T.C. Kimlik No.
///
/// - 11 dígitos, o primeiro diferente de zero;
/// - d10 = ((d1 + d3 + d5 + d7 + d9) * 7 - (d2 + d4 + d6 + d8)) mod 10;
/// - d11 = (d1 + ... + d10) mod 10.
pub fn tckn_valid(digits: &[u32]) -> bool {
    if digits.len() != 11 || digits[0] == 0 {
        return false;
    }
    let odd: i64 = [0, 2, 4, 6, 8].iter().map(|&i| digits[i] as i64).sum();
    let even: i64 = [1, 3, 5, 7].iter().map(|&i| digits[i] as i64).sum();
    let d10 = (odd * 7 - even).rem_euclid(10);
    let d11 = digits[..10].iter().map(|&d| d as i64).sum::<i64>() % 10;
    d10 == digits[9] as i64 && d11 == digits[10] as i64
}

/// Validação ISO 13616 (mod 97) de um IBAN, com ou sem espaços.
pub fn iban_valid(s: &str) -> bool {
    let compact: Vec<char> = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if compact.len() < 15 || compact.len() > 34 || !compact.iter().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }

    // Move os 4 primeiros caracteres para o fim e converte letras em 10..35
    let rearranged = compact[4..].iter().chain(compact[..4].iter());
    let mut remainder: u64 = 0;
    for c in rearranged {
        let value = match c.to_digit(36) {
            Some(v) => v as u64,
            None => return false,
        };
        remainder = if value >= 10 {
            (remainder * 100 + value) % 97
        } else {
            (remainder * 10 + value) % 97
        };
    }
    remainder == 1
}
