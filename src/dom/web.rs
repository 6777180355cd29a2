// ============================================================================
// WEB HOST - Implementación de `Host` sobre web_sys (solo wasm32)
// ============================================================================

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, Window};

use crate::dom::events::on_event;
use crate::dom::host::{Activation, ActivationHandler, Host, PageElement, TimerHandle};
use crate::error::ShellError;

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Option<Document> {
    window()?.document()
}

#[derive(Debug, Clone, PartialEq)]
pub struct WebElement(Element);

impl PageElement for WebElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.0.has_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), ShellError> {
        self.0.set_attribute(name, value).map_err(|e| ShellError::from_js(&e))
    }

    fn remove_attribute(&self, name: &str) -> Result<(), ShellError> {
        self.0.remove_attribute(name).map_err(|e| ShellError::from_js(&e))
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) -> Result<(), ShellError> {
        self.0.class_list().add_1(class).map_err(|e| ShellError::from_js(&e))
    }

    fn remove_class(&self, class: &str) -> Result<(), ShellError> {
        self.0.class_list().remove_1(class).map_err(|e| ShellError::from_js(&e))
    }

    fn set_display(&self, value: &str) -> Result<(), ShellError> {
        let html = self
            .0
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| ShellError::Dom("Element is not an HtmlElement".to_string()))?;
        let style = html.style();
        if value.is_empty() {
            style.remove_property("display").map(|_| ())
        } else {
            style.set_property("display", value)
        }
        .map_err(|e| ShellError::from_js(&e))
    }

    fn detach(&self) {
        self.0.remove();
    }

    fn is_attached(&self) -> bool {
        self.0.is_connected()
    }
}

impl TimerHandle for Timeout {
    fn persist(self) {
        let _ = Timeout::forget(self);
    }
}

pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    pub fn new() -> Result<Self, ShellError> {
        let window = window().ok_or(ShellError::Unavailable("window"))?;
        let document = window.document().ok_or(ShellError::Unavailable("document"))?;
        Ok(Self { window, document })
    }
}

impl Host for WebHost {
    type Element = WebElement;
    type Timer = Timeout;

    fn location_hash(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }

    fn push_hash(&self, hash: &str) -> Result<(), ShellError> {
        self.window.location().set_hash(hash).map_err(|e| ShellError::from_js(&e))
    }

    fn replace_hash(&self, hash: &str) -> Result<(), ShellError> {
        self.window.location().replace(hash).map_err(|e| ShellError::from_js(&e))
    }

    fn assign_location(&self, url: &str) -> Result<(), ShellError> {
        self.window.location().assign(url).map_err(|e| ShellError::from_js(&e))
    }

    fn scroll_to_origin(&self) {
        self.window.scroll_to_with_x_and_y(0.0, 0.0);
    }

    fn query_selector(&self, selector: &str) -> Option<WebElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .map(WebElement)
    }

    fn query_selector_all(&self, selector: &str) -> Vec<WebElement> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            log::warn!("⚠️ [DOM] Selector inválido: {}", selector);
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(WebElement)
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<WebElement> {
        self.document.get_element_by_id(id).map(WebElement)
    }

    fn force_reflow(&self, element: &WebElement) {
        if let Some(html) = element.0.dyn_ref::<HtmlElement>() {
            let _ = html.offset_width();
        }
    }

    fn request_animation_frame(&self, task: Box<dyn FnOnce()>) {
        let callback = Closure::once_into_js(move || task());
        if self
            .window
            .request_animation_frame(callback.unchecked_ref())
            .is_err()
        {
            log::warn!("⚠️ [DOM] requestAnimationFrame no disponible");
        }
    }

    fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, move || task())
    }

    fn on_hash_change(&self, handler: Box<dyn Fn()>) {
        if let Err(e) = on_event(&self.window, "hashchange", move |_event: Event| handler()) {
            log::error!("❌ [DOM] No se pudo escuchar hashchange: {}", e);
        }
    }

    fn on_activation(&self, selector: &str, handler: ActivationHandler<WebElement>) {
        let handler: Rc<dyn Fn(Activation<'_, WebElement>) -> bool> = Rc::from(handler);

        // Click: subir hasta el ancestro marcado más cercano
        let click_handler = handler.clone();
        let click_selector = selector.to_string();
        let click = on_event(&self.document, "click", move |event: Event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Ok(Some(marked)) = target.closest(&click_selector) else {
                return;
            };
            if click_handler(Activation::Click(&WebElement(marked))) {
                event.prevent_default();
            }
        });

        // Teclado: el elemento con foco, y solo si es un HTMLElement
        let key = on_event(&self.document, "keydown", move |event: Event| {
            let Some(keyboard) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let Some(target) = event.target().and_then(|t| t.dyn_into::<HtmlElement>().ok()) else {
                return;
            };
            let key = keyboard.key();
            let target = WebElement(target.unchecked_into::<Element>());
            if handler(Activation::Key { key: &key, target: &target }) {
                event.prevent_default();
            }
        });

        if let Err(e) = click.and(key) {
            log::error!("❌ [DOM] No se pudo registrar la navegación declarativa: {}", e);
        }
    }
}
