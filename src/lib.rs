// ============================================================================
// CARGOLINE SHELL - ROUTER POR HASH + NAVEGACIÓN (RUST PURO + WASM)
// ============================================================================
// Las páginas ya están en el HTML; el shell solo decide cuál se ve:
// - routing: normalizar rutas, codificar el hash, activar páginas
// - dom: acceso al documento detrás del trait `Host` (web o en memoria)
// - pages: inicializadores incluidos (sliders de carga)
// - loader: quitar la pantalla de carga al terminar el arranque
// - shell: arranque en dos fases (registrar páginas, luego montar)
// - bridge: handle para los módulos JS (solo wasm32)
// ============================================================================

pub mod config;
pub mod dom;
pub mod error;
pub mod loader;
pub mod pages;
pub mod routing;
pub mod shell;

#[cfg(target_arch = "wasm32")]
mod bridge;

pub use config::ShellConfig;
pub use error::ShellError;
pub use routing::{HistoryMode, NavigationDispatcher, PageInitializers, Route, Router};
pub use shell::Shell;

#[cfg(target_arch = "wasm32")]
pub use bridge::ShellHandle;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
static LOGGER: std::sync::Once = std::sync::Once::new();

/// Crear el shell sin montarlo: registrar páginas con `registerPage` y
/// luego llamar a `mount()`
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = createShell)]
pub fn create_shell() -> Result<ShellHandle, JsValue> {
    create(&config::CONFIG)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = createShellWithConfig)]
pub fn create_shell_with_config(json: &str) -> Result<ShellHandle, JsValue> {
    let config = ShellConfig::from_json(json)?;
    create(&config)
}

/// Crear y montar en un paso, con la configuración de compilación (`.env`)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = startShell)]
pub fn start_shell() -> Result<ShellHandle, JsValue> {
    let handle = create_shell()?;
    handle.mount();
    Ok(handle)
}

/// Crear y montar con una configuración JSON de la página (campos ausentes = defaults)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = startShellWithConfig)]
pub fn start_shell_with_config(json: &str) -> Result<ShellHandle, JsValue> {
    let handle = create_shell_with_config(json)?;
    handle.mount();
    Ok(handle)
}

#[cfg(target_arch = "wasm32")]
fn create(config: &ShellConfig) -> Result<ShellHandle, JsValue> {
    // Panic hook para mejor debugging
    console_error_panic_hook::set_once();

    if config.enable_logging {
        let level = config.log_level();
        LOGGER.call_once(|| wasm_logger::init(wasm_logger::Config::new(level)));
    }
    log::info!("🚀 Cargoline shell - Rust puro + WASM");

    Ok(ShellHandle::create(config)?)
}
