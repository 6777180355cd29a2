// ============================================================================
// PAGES - Inicializadores incluidos en el shell
// ============================================================================
// Se registran en la tabla antes de montar el router. Los módulos JS de otras
// páginas se registran después a través del bridge.
// ============================================================================

#[cfg(target_arch = "wasm32")]
mod sliders;

#[cfg(target_arch = "wasm32")]
use crate::routing::PageInitializers;

pub const CARGO_WEIGHT: &str = "cargo-weight";
pub const CARGO_VALUE: &str = "cargo-val";

/// Atributo que marca una página cuyos listeners ya están puestos
pub const BOUND_MARKER: &str = "data-bound";

/// Entero al inicio del texto, como `parseInt(text, 10)`: espacios iniciales,
/// signo opcional, dígitos. Lo que sigue se ignora.
pub fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let value: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(target_arch = "wasm32")]
pub fn register_builtin(initializers: &PageInitializers) {
    initializers.register(CARGO_WEIGHT, sliders::init_weight_slider);
    initializers.register(CARGO_VALUE, sliders::init_value_slider);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_leading_integer_like_parse_int() {
        assert_eq!(leading_integer("100"), Some(100));
        assert_eq!(leading_integer("  250 $"), Some(250));
        assert_eq!(leading_integer("1,000"), Some(1));
        assert_eq!(leading_integer("-5kg"), Some(-5));
        assert_eq!(leading_integer("+7"), Some(7));
    }

    #[test]
    fn rejects_text_without_leading_digits() {
        assert_eq!(leading_integer(""), None);
        assert_eq!(leading_integer("Otro"), None);
        assert_eq!(leading_integer("$100"), None);
        assert_eq!(leading_integer("-"), None);
        assert_eq!(leading_integer("99999999999999999999999"), None);
    }
}
