use std::fmt;

/// Nombre canónico de una pantalla de la app.
///
/// Solo se construye desde `PageRegistry::normalize`, así que siempre es una
/// clave registrada o la ruta por defecto: nunca vacía, sin `#` ni query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route(String);

impl Route {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Route {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Route {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Route {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Modo de escritura del hash al navegar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    /// `location.hash = ...` (nueva entrada de historial)
    #[default]
    Push,
    /// `location.replace(...)`
    Replace,
}

impl HistoryMode {
    pub fn from_replace(replace: bool) -> Self {
        if replace {
            HistoryMode::Replace
        } else {
            HistoryMode::Push
        }
    }
}

/// Quitar espacios y cualquier cantidad de `/` iniciales. `None` si no queda nada.
pub fn clean_route(raw: &str) -> Option<&str> {
    let cleaned = raw.trim().trim_start_matches('/');
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
