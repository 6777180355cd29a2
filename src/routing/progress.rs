// ============================================================================
// ROUTE PROGRESS - Pulso visual (barra superior) en cada cambio de ruta
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ProgressConfig;
use crate::dom::{Host, PageElement};

pub struct RouteProgress<H: Host> {
    host: Rc<H>,
    element: Option<H::Element>,
    active_class: String,
    duration_ms: u32,
    // Soltar el timer anterior lo cancela (debounce)
    pending: RefCell<Option<H::Timer>>,
}

impl<H: Host> RouteProgress<H> {
    pub fn new(host: Rc<H>, config: &ProgressConfig) -> Self {
        let element = host.element_by_id(&config.element_id);
        if element.is_none() {
            log::debug!("📏 [PROGRESS] Sin #{} en el documento, pulso desactivado", config.element_id);
        }
        Self {
            host,
            element,
            active_class: config.active_class.clone(),
            duration_ms: config.duration_ms,
            pending: RefCell::new(None),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.element.is_some()
    }

    /// Reinicia la animación aunque ya estuviera activa
    pub fn pulse(&self) {
        let Some(element) = &self.element else {
            return;
        };

        self.pending.borrow_mut().take();

        let _ = element.remove_class(&self.active_class);
        self.host.force_reflow(element);
        if let Err(e) = element.add_class(&self.active_class) {
            log::warn!("⚠️ [PROGRESS] No se pudo activar el pulso: {}", e);
            return;
        }

        let element = element.clone();
        let class = self.active_class.clone();
        let timer = self.host.set_timeout(
            self.duration_ms,
            Box::new(move || {
                let _ = element.remove_class(&class);
            }),
        );
        *self.pending.borrow_mut() = Some(timer);
    }
}
