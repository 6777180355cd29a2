// ============================================================================
// PAGE INITIALIZERS - Tabla ruta -> callback de setup de la página
// ============================================================================
// La llenan los módulos de cada página cuando terminan de cargar, antes o
// después de montar el router. Si una ruta se activa antes de que su
// inicializador esté registrado, la página queda sin comportamiento hasta la
// próxima activación: carrera aceptada, no se serializa.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::ShellError;

pub type PageInitializer = Rc<dyn Fn() -> Result<(), ShellError>>;

/// Handle compartido: clonarlo comparte la misma tabla
#[derive(Clone, Default)]
pub struct PageInitializers {
    table: Rc<RefCell<HashMap<String, PageInitializer>>>,
}

impl PageInitializers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrar (o reemplazar) el inicializador de una ruta
    pub fn register<F>(&self, route: impl Into<String>, init: F)
    where
        F: Fn() -> Result<(), ShellError> + 'static,
    {
        let route = route.into();
        log::debug!("🧩 [PAGES] Inicializador registrado para '{}'", route);
        self.table.borrow_mut().insert(route, Rc::new(init));
    }

    pub fn get(&self, route: &str) -> Option<PageInitializer> {
        self.table.borrow().get(route).cloned()
    }

    pub fn contains(&self, route: &str) -> bool {
        self.table.borrow().contains_key(route)
    }

    pub fn len(&self) -> usize {
        self.table.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.borrow().is_empty()
    }

    /// Ejecutar el inicializador de `route`. `None` si no hay ninguno.
    /// La tabla no queda prestada durante la llamada: el callback puede
    /// registrar otras páginas o navegar.
    pub fn run(&self, route: &str) -> Option<Result<(), ShellError>> {
        let init = self.get(route)?;
        Some(init())
    }
}

impl std::fmt::Debug for PageInitializers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let table = self.table.borrow();
        let mut routes: Vec<&String> = table.keys().collect();
        routes.sort();
        f.debug_struct("PageInitializers")
            .field("routes", &routes)
            .finish()
    }
}
