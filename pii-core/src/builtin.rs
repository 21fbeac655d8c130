//! # Reconhecedores Embutidos: Domínio Bancário Turco
//!
//! A ordem importa: ela define a prioridade de desempate na resolução de
//! sobreposições. Os formatos mais específicos vêm primeiro, e `MAIDEN_NAME`
//! precede `PERSON` para que "kızlık soyadı: Yıldırım" seja classificado
//! como nome de solteira e não como pessoa.
//!
//! Os padrões numéricos não exigem fronteira de palavra: o sufixo de caso
//! turco costuma vir colado (`05321234567den`). Quem impede que um padrão
//! pegue um pedaço de um número maior é o reconhecedor, que descarta
//! matches que cortam uma sequência de dígitos.
//!
//! | # | Tipo             | Score base | Validador |
//! |---|------------------|------------|-----------|
//! | 0 | `TR_IBAN`        | 0.8        | IBAN      |
//! | 1 | `CREDIT_CARD`    | 0.3        | Luhn      |
//! | 2 | `TCKN`           | 0.5        | TCKN      |
//! | 3 | `EMAIL_ADDRESS`  | 0.7        | –         |
//! | 4 | `PHONE_NUMBER`   | 0.5        | –         |
//! | 5 | `ACCOUNT_NUMBER` | 0.4        | –         |
//! | 6 | `DATE_OF_BIRTH`  | 0.4        | –         |
//! | 7 | `CCV`            | 0.3        | –         |
//! | 8 | `PASSWORD`       | 0.2        | –         |
//! | 9 | `MAIDEN_NAME`    | 0.2        | –         |
//! |10 | `PERSON`         | 0.2        | –         |

use crate::recognizer::RecognizerSpec;
use crate::validation::Validator;

/// Palavras capitalizadas comuns que não são nomes próprios.
const NON_NAMES: &[&str] = &[
    "Bu", "Şu", "O", "Ben", "Sen", "Biz", "Siz", "Onlar", "Evet", "Hayır", "Yok", "Var",
    "Merhabalar", "Merhaba", "Selam",
];

/// Tratamentos e rótulos que precedem nomes ("Sayın Ahmet Yılmaz").
const HONORIFICS: &[&str] = &["Sayın", "Bay", "Bayan", "Müşteri", "Adım", "Hanım", "Bey"];

const UPPER: &str = "A-ZÇĞİÖŞÜ";
const LOWER: &str = "a-zçğıöşü";

fn capitalized_word() -> String {
    format!("[{UPPER}][{LOWER}]+")
}

fn name_deny_list() -> Vec<&'static str> {
    NON_NAMES.iter().chain(HONORIFICS).copied().collect()
}

/// Conjunto padrão de reconhecedores, em ordem de registro.
pub fn default_recognizers() -> Vec<RecognizerSpec> {
    let word = capitalized_word();

    vec![
        RecognizerSpec::new("TR_IBAN")
            .validated_pattern("tr_iban", r"TR\d{2}(?:\s?\d{4}){5}\s?\d{2}", 0.8, Validator::Iban)
            .context(&["iban", "hesap"]),
        RecognizerSpec::new("CREDIT_CARD")
            .validated_pattern(
                "card_16",
                r"\d{4}[\s-]?\d{4}[\s-]?\d{4}[\s-]?\d{4}",
                0.3,
                Validator::Luhn,
            )
            .context(&["kart", "kredi kartı", "kart numarası", "card"]),
        RecognizerSpec::new("TCKN")
            .validated_pattern("tckn", r"[1-9]\d{10}", 0.5, Validator::Tckn)
            .context(&["tc", "tckn", "kimlik", "no", "numarası"]),
        RecognizerSpec::new("EMAIL_ADDRESS")
            .pattern("email", r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b", 0.7)
            .context(&["e-posta", "eposta", "mail", "email"]),
        RecognizerSpec::new("PHONE_NUMBER")
            .pattern("tr_mobile", r"(?:\+?90\s?|0\s?)?5\d{2}\s?\d{3}\s?\d{2}\s?\d{2}", 0.5)
            .context(&["tel", "telefon", "cep", "gsm", "numara", "arayın", "ulaşın"]),
        RecognizerSpec::new("ACCOUNT_NUMBER")
            .pattern("account_digits", r"\b\d{10,16}\b", 0.4)
            .context(&[
                "hesap no",
                "hesap numarası",
                "hesabım",
                "hesap",
                "müşteri no",
                "müşteri numarası",
            ]),
        RecognizerSpec::new("DATE_OF_BIRTH")
            .pattern("dob_slash", r"\b\d{2}/\d{2}/\d{4}\b", 0.4)
            .pattern("dob_dot", r"\b\d{2}\.\d{2}\.\d{4}\b", 0.4)
            .pattern("dob_dash", r"\b\d{4}-\d{2}-\d{2}\b", 0.4)
            .context(&["doğum", "doğum tarihi", "d.tarihi", "yaş", "doğumlu"]),
        RecognizerSpec::new("CCV")
            .pattern("ccv", r"\b\d{3,4}\b", 0.3)
            .context(&[
                "cvv",
                "ccv",
                "cvc",
                "güvenlik kodu",
                "güvenlik numarası",
                "arkasındaki",
                "kartın arkası",
                "3 haneli",
                "4 haneli",
            ]),
        RecognizerSpec::new("PASSWORD")
            .pattern("password", r"\b[\w@#$%^&*]{4,20}\b", 0.2)
            .context(&[
                "şifre",
                "parola",
                "pin",
                "gizli kod",
                "internet şifresi",
                "mobil şifre",
                "şifrem",
                "parolam",
                "password",
                "pin kodu",
            ]),
        RecognizerSpec::new("MAIDEN_NAME")
            .pattern("maiden_name_word", &format!(r"\b{word}\b"), 0.2)
            .context(&[
                "kızlık soyadı",
                "anne kızlık",
                "annenin kızlık",
                "kızlık soyadınız",
                "güvenlik sorusu",
            ])
            .deny(&name_deny_list()),
        RecognizerSpec::new("PERSON")
            .pattern("person_caps", &format!(r"\b{word}(?:\s+{word})*\b"), 0.2)
            .context(&["sayın", "bay", "bayan", "adı", "adım", "soyadı", "müşteri", "kişi", "hanım"])
            .deny(&name_deny_list()),
    ]
}
