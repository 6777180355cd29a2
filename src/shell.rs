// ============================================================================
// SHELL - Arranque en dos fases: crear, registrar páginas, montar
// ============================================================================
// Entre `Shell::new` y `mount` los módulos pueden registrar inicializadores:
// así la ruta del primer render (deep link) también se inicializa. Lo que se
// registre después de montar corre en la próxima activación de esa ruta.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::ShellConfig;
use crate::dom::Host;
use crate::error::ShellError;
use crate::loader;
use crate::routing::{HistoryMode, NavigationDispatcher, PageInitializers, Route, Router};

pub struct Shell<H: Host> {
    host: Rc<H>,
    config: ShellConfig,
    initializers: PageInitializers,
    router: RefCell<Option<Rc<Router<H>>>>,
    mounted: Cell<bool>,
}

impl<H: Host> Shell<H> {
    pub fn new(host: Rc<H>, config: ShellConfig) -> Self {
        Self {
            host,
            config,
            initializers: PageInitializers::new(),
            router: RefCell::new(None),
            mounted: Cell::new(false),
        }
    }

    pub fn initializers(&self) -> &PageInitializers {
        &self.initializers
    }

    pub fn register_page<F>(&self, route: impl Into<String>, init: F)
    where
        F: Fn() -> Result<(), ShellError> + 'static,
    {
        self.initializers.register(route, init);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    /// Montar router, navegación declarativa y loader. Una sola vez: las
    /// llamadas siguientes no hacen nada. Devuelve si hay router.
    pub fn mount(&self) -> bool {
        if self.mounted.replace(true) {
            log::warn!("⚠️ [SHELL] El shell ya estaba montado");
            return self.has_router();
        }

        let router = Router::mount(self.host.clone(), self.initializers.clone(), &self.config);
        NavigationDispatcher::new(self.host.clone(), router.clone(), &self.config).install();
        loader::schedule_hide(&self.host, &self.config.loader);

        match &router {
            Some(router) => log::info!(
                "✅ [SHELL] Listo en '{}'",
                router.current_route().map(Route::into_string).unwrap_or_default()
            ),
            None => log::info!("✅ [SHELL] Listo sin router"),
        }

        let has_router = router.is_some();
        *self.router.borrow_mut() = router;
        has_router
    }

    pub fn router(&self) -> Option<Rc<Router<H>>> {
        self.router.borrow().clone()
    }

    pub fn has_router(&self) -> bool {
        self.router.borrow().is_some()
    }

    /// Ruta activa al terminar la navegación. `None` si no hay router y se
    /// hizo navegación completa.
    pub fn navigate(&self, route: &str, mode: HistoryMode) -> Result<Option<Route>, ShellError> {
        if !self.is_mounted() {
            return Err(ShellError::NotMounted);
        }
        match self.router() {
            Some(router) => Ok(Some(router.navigate(route, mode))),
            None => {
                self.host.assign_location(route)?;
                Ok(None)
            }
        }
    }

    pub fn route_from_hash(&self) -> Route {
        match self.router() {
            Some(router) => router.route_from_hash(),
            None => Route::new(self.config.default_route.clone()),
        }
    }

    pub fn normalize(&self, raw: Option<&str>) -> Route {
        match self.router() {
            Some(router) => router.normalize(raw),
            None => Route::new(self.config.default_route.clone()),
        }
    }

    pub fn current_route(&self) -> Option<Route> {
        self.router().and_then(|router| router.current_route())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::{MemoryElement, MemoryHost};
    use crate::dom::PageElement;

    fn host_at(hash: &str) -> Rc<MemoryHost> {
        let host = Rc::new(MemoryHost::with_pages(&["home", "cargo-cat", "my-trips"]));
        host.set_hash(hash);
        host.dispatch_hash_changes();
        host
    }

    fn counter(shell: &Shell<MemoryHost>, route: &str) -> Rc<Cell<usize>> {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        shell.register_page(route, move || {
            counter.set(counter.get() + 1);
            Ok(())
        });
        calls
    }

    #[test]
    fn page_registered_before_mount_runs_on_deep_link() {
        let shell = Shell::new(host_at("#/my-trips"), ShellConfig::default());
        let calls = counter(&shell, "my-trips");
        assert_eq!(calls.get(), 0);

        assert!(shell.mount());

        assert_eq!(calls.get(), 1);
        assert_eq!(shell.current_route().unwrap(), "my-trips");
    }

    #[test]
    fn mount_runs_once() {
        let shell = Shell::new(host_at("#/cargo-cat"), ShellConfig::default());
        let calls = counter(&shell, "cargo-cat");

        assert!(shell.mount());
        assert!(shell.mount());

        assert_eq!(calls.get(), 1);
        assert!(shell.is_mounted());
    }

    #[test]
    fn navigate_before_mount_is_rejected() {
        let host = host_at("");
        let shell = Shell::new(host.clone(), ShellConfig::default());

        assert_eq!(
            shell.navigate("cargo-cat", HistoryMode::Push),
            Err(ShellError::NotMounted)
        );
        assert!(host.hash_writes().is_empty());
        assert!(host.assigned_locations().is_empty());
        assert_eq!(shell.current_route(), None);
    }

    #[test]
    fn navigate_reports_route_after_redirect() {
        let shell = Rc::new(Shell::new(host_at(""), ShellConfig::default()));
        let weak = Rc::downgrade(&shell);
        shell.register_page("cargo-cat", move || {
            if let Some(shell) = weak.upgrade() {
                shell.navigate("my-trips", HistoryMode::Replace)?;
            }
            Ok(())
        });
        shell.mount();

        let settled = shell.navigate("cargo-cat", HistoryMode::Push).unwrap();

        assert_eq!(settled.unwrap(), "my-trips");
        assert_eq!(shell.current_route().unwrap(), "my-trips");
    }

    #[test]
    fn without_pages_navigation_is_full_page() {
        let host = Rc::new(MemoryHost::new());
        let loader = host.append(MemoryElement::new("div").with_attr("id", "app-loader"));
        let shell = Shell::new(host.clone(), ShellConfig::default());

        assert!(!shell.mount());
        assert_eq!(shell.navigate("cargo-cat", HistoryMode::Push), Ok(None));
        assert_eq!(host.assigned_locations(), vec!["cargo-cat".to_string()]);
        assert_eq!(shell.route_from_hash(), "home");
        assert_eq!(shell.normalize(Some("cargo-cat")), "home");

        host.advance_time(500);
        assert!(!loader.is_attached());
    }
}
