//! # Reclamações de Exemplo
//!
//! Textos sintéticos de clientes de banco turco, usados pelo modo `--demo`
//! da CLI e pelos testes. Nenhum dado é real: os números de cartão, IBAN e
//! TCKN são valores de teste que passam (ou propositalmente não passam) nos
//! checksums.
//!
//! Cada texto imita um perfil de cliente diferente (irritado, jovem, idoso,
//! ansioso), porque o vocabulário de contexto muda bastante entre eles.

/// Pares (categoria, texto) para demonstração.
pub fn demo_texts() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "Kart / Müşteri Kızgın",
            "KARTIM BLOKE OLDU!!! Sayın yetkili, ben Ahmet Yılmaz, kredi kartım 4111 1111 1111 1111 \
             hiçbir sebep yokken kapatıldı. CVV kodunu bile sordunuz, kartın arkasındaki 123 numarayı \
             verdim ama hala sorun çözülmedi. Bankayı değiştireceğim!",
        ),
        (
            "Transfer / Genç",
            "mrb havale yaptım ama gitmedi. IBAN: TR33 0006 1005 1978 6457 8413 26 \
             hesap no: 1234567890123456 tşk bi bakın acil. mail: deniz.kaya@ornek.com.tr",
        ),
        (
            "Erişim / Yaşlı",
            "Merhaba, internet şubesine giremiyorum. Şifrem: Ankara1955 olarak kayıtlı idi. \
             Doğum tarihi: 12/04/1955. Annemin kızlık soyadı: Demir. Lütfen beni arayın, \
             telefonum 0532 123 45 67.",
        ),
        (
            "Dolandırıcılık / Endişeli",
            "Acil! Dolandırıldım mı? TC kimlik numaram 10000000146, biri benim adıma \
             işlem yapmış. İşlem tarihi: 15/03/2024. Müşteri Fatma Öztürk olarak \
             +90 555 987 65 43 numarasından bana ulaşın lütfen, korkuyorum.",
        ),
        (
            "Genel / Pozitif Kontrol",
            "Toplam 500 TL ödeme yaptım, 2024 yılında başvurdum ve 3 gün içinde çözüldü. \
             Bu bir test metnidir, teşekkürler.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_texts_not_empty() {
        let texts = demo_texts();
        assert!(!texts.is_empty());
        for (category, text) in &texts {
            assert!(!category.is_empty());
            assert!(!text.trim().is_empty());
        }
    }

    #[test]
    fn test_categories_are_unique() {
        let texts = demo_texts();
        let mut categories: Vec<_> = texts.iter().map(|(c, _)| *c).collect();
        categories.sort_unstable();
        categories.dedup();
        assert_eq!(categories.len(), texts.len());
    }
}
