// ============================================================================
// ERRORES DEL SHELL
// ============================================================================
// Ningún error aquí es fatal: el router los registra y sigue adelante.
// ============================================================================

use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShellError {
    /// No hay `window`/`document` (p.ej. worker o entorno sin DOM)
    #[error("DOM no disponible: {0}")]
    Unavailable(&'static str),

    /// Una llamada al DOM lanzó una excepción
    #[error("operación DOM fallida: {0}")]
    Dom(String),

    /// El inicializador de una página falló
    #[error("error inicializando la página '{route}': {message}")]
    Initializer { route: String, message: String },

    #[error("configuración inválida: {0}")]
    Config(String),

    /// Se pidió navegar antes de montar el shell
    #[error("el shell aún no está montado")]
    NotMounted,
}

impl ShellError {
    pub fn initializer(route: impl Into<String>, message: impl Into<String>) -> Self {
        ShellError::Initializer {
            route: route.into(),
            message: message.into(),
        }
    }

    /// Convertir una excepción JS en error DOM
    pub fn from_js(value: &JsValue) -> Self {
        ShellError::Dom(describe_js(value))
    }
}

impl From<ShellError> for JsValue {
    fn from(err: ShellError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Texto legible de una excepción JS (mensaje si es string, Debug si no)
pub fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
