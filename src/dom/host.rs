// ============================================================================
// HOST - Trait común entre el navegador real y el documento en memoria
// ============================================================================
// El router nunca toca web_sys directamente: todo pasa por `Host`.
// ============================================================================

use crate::error::ShellError;

/// Elemento del documento que el shell puede manipular
pub trait PageElement: Clone + 'static {
    fn attribute(&self, name: &str) -> Option<String>;

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), ShellError>;

    fn remove_attribute(&self, name: &str) -> Result<(), ShellError>;

    fn has_class(&self, class: &str) -> bool;

    fn add_class(&self, class: &str) -> Result<(), ShellError>;

    fn remove_class(&self, class: &str) -> Result<(), ShellError>;

    /// `style.display` inline ("" limpia el valor)
    fn set_display(&self, value: &str) -> Result<(), ShellError>;

    /// Quitar el elemento del documento
    fn detach(&self);

    fn is_attached(&self) -> bool;
}

/// Handle de un timeout programado. Hacer drop cancela el timeout.
pub trait TimerHandle {
    /// Dejar que el timeout corra aunque se suelte el handle
    fn persist(self);
}

/// Interacción del usuario sobre un elemento marcado como navegable
#[derive(Debug)]
pub enum Activation<'a, E> {
    /// Click; el elemento ya es el ancestro más cercano que coincide con el selector
    Click(&'a E),
    /// Tecla pulsada con el foco en `target`
    Key { key: &'a str, target: &'a E },
}

pub type ActivationHandler<E> = Box<dyn Fn(Activation<'_, E>) -> bool>;

/// Operaciones de window/document que necesita el shell
pub trait Host: 'static {
    type Element: PageElement;
    type Timer: TimerHandle;

    /// `location.hash` tal cual ("" si no hay fragmento)
    fn location_hash(&self) -> String;

    /// `location.hash = hash` (nueva entrada de historial)
    fn push_hash(&self, hash: &str) -> Result<(), ShellError>;

    /// `location.replace(hash)` (sin entrada nueva)
    fn replace_hash(&self, hash: &str) -> Result<(), ShellError>;

    /// Navegación completa del navegador
    fn assign_location(&self, url: &str) -> Result<(), ShellError>;

    fn scroll_to_origin(&self);

    fn query_selector(&self, selector: &str) -> Option<Self::Element>;

    fn query_selector_all(&self, selector: &str) -> Vec<Self::Element>;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Forzar layout para que una animación CSS pueda reiniciarse
    fn force_reflow(&self, element: &Self::Element);

    fn request_animation_frame(&self, task: Box<dyn FnOnce()>);

    fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Timer;

    fn on_hash_change(&self, handler: Box<dyn Fn()>);

    /// Registrar click/teclado delegados para los elementos que coinciden con `selector`.
    /// Si el handler devuelve true se cancela la acción por defecto.
    fn on_activation(&self, selector: &str, handler: ActivationHandler<Self::Element>);
}
