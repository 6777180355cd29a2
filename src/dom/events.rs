// ============================================================================
// EVENT HANDLING - Listeners sobre window/document/elementos
// ============================================================================
// GESTIÓN DE MEMORY LEAKS:
// - closure.forget() mantiene vivo el closure en Rust WASM.
// - Listeners globales (window/document) se registran UNA VEZ al arrancar el
//   shell y viven lo mismo que el documento.
// - Listeners de elementos de página: el inicializador marca la página para
//   no volver a registrarlos en cada activación.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

use crate::error::ShellError;

/// Listener genérico que vive hasta que se descarga la página
pub fn on_event<F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), ShellError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
        .map_err(|e| ShellError::from_js(&e))?;
    closure.forget();
    Ok(())
}

pub fn on_input<F>(target: &EventTarget, handler: F) -> Result<(), ShellError>
where
    F: FnMut(Event) + 'static,
{
    on_event(target, "input", handler)
}

pub fn on_click<F>(target: &EventTarget, handler: F) -> Result<(), ShellError>
where
    F: FnMut(Event) + 'static,
{
    on_event(target, "click", handler)
}
