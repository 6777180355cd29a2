// ============================================================================
// MEMORY HOST - Documento en memoria para tests nativos (sin navegador)
// ============================================================================
// Timers y animation frames se encolan y solo corren cuando el test los drena
// (`advance_time`, `run_animation_frames`). Igual que en el navegador, escribir
// el mismo hash no genera `hashchange`.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::dom::host::{Activation, ActivationHandler, Host, PageElement, TimerHandle};
use crate::error::ShellError;
use crate::routing::HistoryMode;

#[derive(Debug, Default)]
struct ElementData {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    display: String,
    attached: bool,
    reflows: usize,
    rejected_classes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct MemoryElement(Rc<RefCell<ElementData>>);

impl MemoryElement {
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(ElementData {
            tag: tag.to_string(),
            ..ElementData::default()
        })))
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.0.borrow_mut().attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        let _ = self.add_class(class);
        self
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    pub fn display(&self) -> String {
        self.0.borrow().display.clone()
    }

    pub fn reflows(&self) -> usize {
        self.0.borrow().reflows
    }

    /// `add_class(class)` fallará, como un token inválido en `classList`
    pub fn reject_class(&self, class: &str) {
        self.0.borrow_mut().rejected_classes.push(class.to_string());
    }

    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Soporta `tag`, `#id`, `[attr]`, `[attr='v']` y combinaciones, separadas por comas
    pub fn matches(&self, selector: &str) -> bool {
        selector
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .any(|part| self.matches_compound(part))
    }

    fn matches_compound(&self, selector: &str) -> bool {
        let data = self.0.borrow();
        let tag_end = selector.find(&['[', '#'][..]).unwrap_or(selector.len());
        let tag = &selector[..tag_end];
        if !tag.is_empty() && !tag.eq_ignore_ascii_case(&data.tag) {
            return false;
        }

        let mut rest = &selector[tag_end..];
        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('#') {
                let end = after.find('[').unwrap_or(after.len());
                if data.attributes.get("id").map(String::as_str) != Some(&after[..end]) {
                    return false;
                }
                rest = &after[end..];
            } else if let Some(after) = rest.strip_prefix('[') {
                let Some(close) = after.find(']') else {
                    return false;
                };
                let condition = &after[..close];
                let matched = match condition.split_once('=') {
                    Some((name, value)) => {
                        let value = value.trim_matches(|c| c == '\'' || c == '"');
                        data.attributes.get(name.trim()).map(String::as_str) == Some(value)
                    }
                    None => data.attributes.contains_key(condition.trim()),
                };
                if !matched {
                    return false;
                }
                rest = &after[close + 1..];
            } else {
                return false;
            }
        }
        true
    }
}

impl PageElement for MemoryElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), ShellError> {
        self.0.borrow_mut().attributes.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_attribute(&self, name: &str) -> Result<(), ShellError> {
        self.0.borrow_mut().attributes.remove(name);
        Ok(())
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn add_class(&self, class: &str) -> Result<(), ShellError> {
        if self.0.borrow().rejected_classes.iter().any(|c| c == class) {
            return Err(ShellError::Dom(format!("clase rechazada: {}", class)));
        }
        if !self.has_class(class) {
            self.0.borrow_mut().classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&self, class: &str) -> Result<(), ShellError> {
        self.0.borrow_mut().classes.retain(|c| c != class);
        Ok(())
    }

    fn set_display(&self, value: &str) -> Result<(), ShellError> {
        self.0.borrow_mut().display = value.to_string();
        Ok(())
    }

    fn detach(&self) {
        self.0.borrow_mut().attached = false;
    }

    fn is_attached(&self) -> bool {
        self.0.borrow().attached
    }
}

pub struct MemoryTimer {
    cancelled: Option<Rc<Cell<bool>>>,
}

impl TimerHandle for MemoryTimer {
    fn persist(mut self) {
        self.cancelled = None;
    }
}

impl Drop for MemoryTimer {
    fn drop(&mut self) {
        if let Some(cancelled) = &self.cancelled {
            cancelled.set(true);
        }
    }
}

struct ScheduledTask {
    due_ms: u64,
    seq: u64,
    cancelled: Rc<Cell<bool>>,
    task: Box<dyn FnOnce()>,
}

/// Escritura de hash registrada por el host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashWrite {
    pub mode: HistoryMode,
    pub hash: String,
}

type SharedActivationHandler = Rc<dyn Fn(Activation<'_, MemoryElement>) -> bool>;

#[derive(Default)]
pub struct MemoryHost {
    elements: RefCell<Vec<MemoryElement>>,
    hash: RefCell<String>,
    hash_writes: RefCell<Vec<HashWrite>>,
    assigned: RefCell<Vec<String>>,
    scroll_resets: Cell<usize>,
    frames: RefCell<Vec<Box<dyn FnOnce()>>>,
    timers: RefCell<Vec<ScheduledTask>>,
    timer_seq: Cell<u64>,
    now_ms: Cell<u64>,
    pending_hash_events: Cell<usize>,
    hash_handlers: RefCell<Vec<Rc<dyn Fn()>>>,
    activation: RefCell<Option<(String, SharedActivationHandler)>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Documento con un contenedor `data-page` por ruta, en ese orden
    pub fn with_pages(routes: &[&str]) -> Self {
        let host = Self::new();
        for route in routes {
            host.append(MemoryElement::new("section").with_attr("data-page", route));
        }
        host
    }

    /// Insertar elemento al final del documento
    pub fn append(&self, element: MemoryElement) -> MemoryElement {
        element.0.borrow_mut().attached = true;
        self.elements.borrow_mut().push(element.clone());
        element
    }

    /// Contenedor de página de `route` (si existe)
    pub fn page(&self, route: &str) -> Option<MemoryElement> {
        self.query_selector(&format!("[data-page='{}']", route))
    }

    /// Simula que el usuario edita la URL (o pulsa atrás/adelante)
    pub fn set_hash(&self, hash: &str) {
        self.write_hash(hash);
    }

    /// Entregar los `hashchange` pendientes (el navegador los despacha async)
    pub fn dispatch_hash_changes(&self) -> usize {
        let pending = self.pending_hash_events.replace(0);
        for _ in 0..pending {
            let handlers: Vec<Rc<dyn Fn()>> = self.hash_handlers.borrow().clone();
            for handler in handlers {
                handler();
            }
        }
        pending
    }

    pub fn hash_writes(&self) -> Vec<HashWrite> {
        self.hash_writes.borrow().clone()
    }

    pub fn assigned_locations(&self) -> Vec<String> {
        self.assigned.borrow().clone()
    }

    pub fn scroll_resets(&self) -> usize {
        self.scroll_resets.get()
    }

    pub fn pending_animation_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn run_animation_frames(&self) {
        let frames: Vec<Box<dyn FnOnce()>> = self.frames.borrow_mut().drain(..).collect();
        for frame in frames {
            frame();
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    /// Avanzar el reloj virtual corriendo los timeouts vencidos en orden
    pub fn advance_time(&self, ms: u64) {
        let target = self.now_ms.get() + ms;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                timers.retain(|t| !t.cancelled.get());
                let index = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due_ms <= target)
                    .min_by_key(|(_, t)| (t.due_ms, t.seq))
                    .map(|(i, _)| i);
                index.map(|i| timers.remove(i))
            };
            let Some(scheduled) = next else { break };
            self.now_ms.set(scheduled.due_ms);
            (scheduled.task)();
        }
        self.now_ms.set(target);
    }

    /// Click sobre `element` (se asume que ya es el ancestro marcado)
    pub fn click(&self, element: &MemoryElement) -> bool {
        let Some((selector, handler)) = self.activation.borrow().clone() else {
            return false;
        };
        if !element.matches(&selector) {
            return false;
        }
        handler(Activation::Click(element))
    }

    pub fn press_key(&self, key: &str, element: &MemoryElement) -> bool {
        let Some((_, handler)) = self.activation.borrow().clone() else {
            return false;
        };
        handler(Activation::Key {
            key,
            target: element,
        })
    }

    fn write_hash(&self, hash: &str) -> bool {
        let next = if hash.is_empty() || hash.starts_with('#') {
            hash.to_string()
        } else {
            format!("#{}", hash)
        };
        let changed = *self.hash.borrow() != next;
        if changed {
            *self.hash.borrow_mut() = next;
            self.pending_hash_events.set(self.pending_hash_events.get() + 1);
        }
        changed
    }

    fn attached(&self) -> Vec<MemoryElement> {
        self.elements
            .borrow()
            .iter()
            .filter(|e| e.is_attached())
            .cloned()
            .collect()
    }
}

impl Host for MemoryHost {
    type Element = MemoryElement;
    type Timer = MemoryTimer;

    fn location_hash(&self) -> String {
        self.hash.borrow().clone()
    }

    fn push_hash(&self, hash: &str) -> Result<(), ShellError> {
        self.hash_writes.borrow_mut().push(HashWrite {
            mode: HistoryMode::Push,
            hash: hash.to_string(),
        });
        self.write_hash(hash);
        Ok(())
    }

    fn replace_hash(&self, hash: &str) -> Result<(), ShellError> {
        self.hash_writes.borrow_mut().push(HashWrite {
            mode: HistoryMode::Replace,
            hash: hash.to_string(),
        });
        self.write_hash(hash);
        Ok(())
    }

    fn assign_location(&self, url: &str) -> Result<(), ShellError> {
        self.assigned.borrow_mut().push(url.to_string());
        Ok(())
    }

    fn scroll_to_origin(&self) {
        self.scroll_resets.set(self.scroll_resets.get() + 1);
    }

    fn query_selector(&self, selector: &str) -> Option<MemoryElement> {
        self.attached().into_iter().find(|e| e.matches(selector))
    }

    fn query_selector_all(&self, selector: &str) -> Vec<MemoryElement> {
        self.attached().into_iter().filter(|e| e.matches(selector)).collect()
    }

    fn element_by_id(&self, id: &str) -> Option<MemoryElement> {
        self.query_selector(&format!("#{}", id))
    }

    fn force_reflow(&self, element: &MemoryElement) {
        element.0.borrow_mut().reflows += 1;
    }

    fn request_animation_frame(&self, task: Box<dyn FnOnce()>) {
        self.frames.borrow_mut().push(task);
    }

    fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> MemoryTimer {
        let cancelled = Rc::new(Cell::new(false));
        let seq = self.timer_seq.get();
        self.timer_seq.set(seq + 1);
        self.timers.borrow_mut().push(ScheduledTask {
            due_ms: self.now_ms.get() + u64::from(delay_ms),
            seq,
            cancelled: cancelled.clone(),
            task,
        });
        MemoryTimer {
            cancelled: Some(cancelled),
        }
    }

    fn on_hash_change(&self, handler: Box<dyn Fn()>) {
        self.hash_handlers.borrow_mut().push(Rc::from(handler));
    }

    fn on_activation(&self, selector: &str, handler: ActivationHandler<MemoryElement>) {
        *self.activation.borrow_mut() = Some((selector.to_string(), Rc::from(handler)));
    }
}
