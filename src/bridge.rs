// ============================================================================
// JS BRIDGE - Handle expuesto a los módulos JS de la página
// ============================================================================
// Reemplaza al `window.router` global: quien arranca el shell recibe el
// handle y se lo pasa a los módulos que lo necesiten. Con `createShell` los
// módulos registran sus páginas antes de `mount()`.
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::config::ShellConfig;
use crate::dom::web::WebHost;
use crate::error::{describe_js, ShellError};
use crate::pages;
use crate::routing::{HistoryMode, Route};
use crate::shell::Shell;

#[wasm_bindgen]
pub struct ShellHandle {
    shell: Shell<WebHost>,
}

impl ShellHandle {
    /// Host web + inicializadores incluidos, sin montar todavía
    pub(crate) fn create(config: &ShellConfig) -> Result<ShellHandle, ShellError> {
        let host = Rc::new(WebHost::new()?);
        let shell = Shell::new(host, config.clone());
        pages::register_builtin(shell.initializers());
        Ok(ShellHandle { shell })
    }
}

#[wasm_bindgen]
impl ShellHandle {
    /// Montar router, navegación declarativa y loader. Devuelve si hay
    /// router. Solo la primera llamada tiene efecto.
    pub fn mount(&self) -> bool {
        self.shell.mount()
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.shell.is_mounted()
    }

    /// Navegar a `route`. Devuelve la ruta activa al terminar (la de la
    /// redirección si el inicializador redirigió), o `undefined` si no hay
    /// router y se hizo navegación completa.
    pub fn navigate(&self, route: &str, replace: Option<bool>) -> Result<Option<String>, JsValue> {
        let mode = HistoryMode::from_replace(replace.unwrap_or(false));
        let settled = self.shell.navigate(route, mode)?;
        Ok(settled.map(Route::into_string))
    }

    #[wasm_bindgen(js_name = routeFromHash)]
    pub fn route_from_hash(&self) -> String {
        self.shell.route_from_hash().into_string()
    }

    /// Cualquier valor que no sea string normaliza a la ruta por defecto
    #[wasm_bindgen(js_name = normalizeRoute)]
    pub fn normalize_route(&self, value: JsValue) -> String {
        self.shell.normalize(value.as_string().as_deref()).into_string()
    }

    #[wasm_bindgen(js_name = currentRoute)]
    pub fn current_route(&self) -> Option<String> {
        self.shell.current_route().map(Route::into_string)
    }

    /// Registrar el setup de una página. Una excepción del callback se
    /// registra como fallo del inicializador; la activación sigue.
    #[wasm_bindgen(js_name = registerPage)]
    pub fn register_page(&self, route: String, callback: js_sys::Function) {
        let name = route.clone();
        self.shell.register_page(route, move || {
            callback
                .call0(&JsValue::NULL)
                .map(|_| ())
                .map_err(|e| ShellError::initializer(name.as_str(), describe_js(&e)))
        });
    }

    #[wasm_bindgen(js_name = hasRouter)]
    pub fn has_router(&self) -> bool {
        self.shell.has_router()
    }
}
