// ============================================================================
// HASH CODEC - `#/<ruta-codificada>[?query]` <-> Route
// ============================================================================

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::dom::PageElement;
use crate::routing::registry::PageRegistry;
use crate::routing::route::Route;

/// Mismo conjunto que `encodeURIComponent`: todo menos `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode(route: &Route) -> String {
    format!("#/{}", encode_component(route.as_str()))
}

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Equivalente a `decodeURIComponent`: `None` si hay un `%` sin dos dígitos
/// hex detrás o si los bytes resultantes no son UTF-8 válido.
pub fn decode_component(value: &str) -> Option<String> {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_decode_str(value)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// Segmento de ruta (aún codificado) de un hash: sin `#`, sin un `/` inicial
/// y cortado antes del primer `?` o `&`. `None` si no hay nada tras el `#`.
pub fn route_segment(hash: &str) -> Option<&str> {
    let without_hash = hash.strip_prefix('#').unwrap_or(hash);
    let without_hash = without_hash.strip_prefix('/').unwrap_or(without_hash);
    if without_hash.is_empty() {
        return None;
    }
    let end = without_hash.find(&['?', '&'][..]).unwrap_or(without_hash.len());
    Some(&without_hash[..end])
}

/// Ruta canónica a partir de `location.hash`. Nunca falla: un hash vacío,
/// desconocido o mal codificado termina en la ruta por defecto.
pub fn decode<E: PageElement>(hash: &str, registry: &PageRegistry<E>) -> Route {
    let Some(segment) = route_segment(hash) else {
        return registry.default_route();
    };
    match decode_component(segment) {
        Some(decoded) => registry.normalize(Some(&decoded)),
        None => {
            log::debug!("🔗 [HASH] Fragmento mal codificado '{}', usando ruta por defecto", segment);
            registry.default_route()
        }
    }
}
