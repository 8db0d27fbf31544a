// src/services/security.rs

use std::sync::OnceLock;

use rand::Rng;
use regex::Regex;

pub const ORDER_ID_PREFIX: &str = "MAT-";
const ORDER_ID_RANDOM_LEN: usize = 6;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn script_scheme() -> &'static Regex {
    static SCRIPT_SCHEME: OnceLock<Regex> = OnceLock::new();
    SCRIPT_SCHEME.get_or_init(|| Regex::new(r"(?i)javascript:").unwrap())
}

fn event_handler() -> &'static Regex {
    static EVENT_HANDLER: OnceLock<Regex> = OnceLock::new();
    EVENT_HANDLER.get_or_init(|| Regex::new(r"(?i)on\w+=").unwrap())
}

/// Limpa texto livre vindo do formulário antes de validar, guardar ou
/// montar a mensagem.
///
/// Remove `<` e `>`, o esquema `javascript:` e atributos `on<evento>=`,
/// e apara os espaços das pontas. Repete a remoção até não sobrar nada para
/// remover, porque tirar um trecho pode juntar outro (`java<script:`).
pub fn sanitize_input(input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let cleaned = current.replace(['<', '>'], "");
        let cleaned = script_scheme().replace_all(&cleaned, "");
        let cleaned = event_handler().replace_all(&cleaned, "").into_owned();
        if cleaned == current {
            break;
        }
        current = cleaned;
    }
    current.trim().to_string()
}

pub fn only_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn is_valid_phone(phone: &str) -> bool {
    matches!(only_digits(phone).len(), 10 | 11)
}

/// `(81) 99999-9999` para celular, `(81) 3333-4444` para fixo.
/// Qualquer outro tamanho volta como veio.
pub fn format_phone(phone: &str) -> String {
    let digits = only_digits(phone);
    match digits.len() {
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => phone.to_string(),
    }
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Número do pedido a partir de um instante e de uma fonte aleatória.
pub fn generate_order_id_with<R: Rng>(millis: u64, rng: &mut R) -> String {
    let suffix: String = (0..ORDER_ID_RANDOM_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}{}{}", ORDER_ID_PREFIX, to_base36(millis), suffix).to_uppercase()
}

/// Gera um número novo a cada tentativa de envio. Não é único globalmente,
/// só o bastante para o cliente e a loja se referirem ao mesmo pedido.
pub fn generate_order_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
    generate_order_id_with(millis, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_sanitize_removes_markup() {
        assert_eq!(sanitize_input("<b>Maria</b>"), "bMaria/b");
        assert_eq!(sanitize_input("  João  "), "João");
        assert_eq!(sanitize_input("JavaScript:alert(1)"), "alert(1)");
        assert_eq!(sanitize_input("x onClick=steal()"), "x steal()");
    }

    #[test]
    fn test_sanitize_handles_reassembled_patterns() {
        let out = sanitize_input("java<script:alert(1)");
        assert!(!out.to_lowercase().contains("javascript:"));

        let out = sanitize_input("oonclick=nload=x");
        assert!(!event_handler().is_match(&out));
    }

    #[test]
    fn test_sanitize_properties() {
        let samples = [
            "",
            "   ",
            "<script>alert('x')</script>",
            " javascript:JAVASCRIPT:void(0) ",
            "<img src=x onerror=alert(1)>",
            "ONLOAD=1 onmouseover=2",
            "jav<ascript:x",
            "sem cebola, ponto da carne",
            "\t<\n>\t",
        ];

        for s in samples {
            let out = sanitize_input(s);
            assert!(!out.contains('<') && !out.contains('>'), "{:?}", out);
            assert!(!out.to_lowercase().contains("javascript:"), "{:?}", out);
            assert!(!event_handler().is_match(&out), "{:?}", out);
            assert_eq!(out, out.trim());
            assert_eq!(sanitize_input(&out), out, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_phone_rules() {
        assert!(is_valid_phone("(81) 99999-9999"));
        assert!(is_valid_phone("8133334444"));
        assert!(!is_valid_phone("123"));
        assert!(!is_valid_phone("+55 81 99999-9999"));
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("81999999999"), "(81) 99999-9999");
        assert_eq!(format_phone("81 3333 4444"), "(81) 3333-4444");
        assert_eq!(format_phone("12345"), "12345");
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn test_order_id_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = generate_order_id_with(1_700_000_000_000, &mut rng);

        assert!(id.starts_with(ORDER_ID_PREFIX));
        let body = &id[ORDER_ID_PREFIX.len()..];
        assert_eq!(body.len(), to_base36(1_700_000_000_000).len() + ORDER_ID_RANDOM_LEN);
        assert!(body.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_order_ids_differ_within_same_millisecond() {
        let millis = 1_700_000_000_000;
        let a = generate_order_id_with(millis, &mut StdRng::seed_from_u64(1));
        let b = generate_order_id_with(millis, &mut StdRng::seed_from_u64(2));
        assert_ne!(a, b);
        assert!(a.starts_with(ORDER_ID_PREFIX) && b.starts_with(ORDER_ID_PREFIX));
    }

    #[test]
    fn test_generate_order_id_uses_clock() {
        let id = generate_order_id();
        assert!(id.starts_with(ORDER_ID_PREFIX));
        assert!(id.len() > ORDER_ID_PREFIX.len() + ORDER_ID_RANDOM_LEN);
    }
}
