// ============================================================================
// ROUTER - Navegación por hash entre páginas ya renderizadas
// ============================================================================
// Una sola instancia por documento (`Router::mount`), compartida con `Rc`.
// Todo corre síncrono dentro del handler que lo dispara (hashchange, click,
// tecla o `navigate` directo).
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ShellConfig;
use crate::dom::{Host, PageElement};
use crate::error::ShellError;
use crate::routing::hash;
use crate::routing::initializers::PageInitializers;
use crate::routing::nav_bar::sync_nav_bar;
use crate::routing::progress::RouteProgress;
use crate::routing::registry::PageRegistry;
use crate::routing::route::{HistoryMode, Route};

#[derive(Debug)]
struct RouterState {
    current: Option<Route>,
    first_render: bool,
}

pub struct Router<H: Host> {
    host: Rc<H>,
    config: ShellConfig,
    registry: PageRegistry<H::Element>,
    initializers: PageInitializers,
    progress: RouteProgress<H>,
    state: RefCell<RouterState>,
}

impl<H: Host> Router<H> {
    /// Descubrir las páginas, escuchar `hashchange` y renderizar la ruta
    /// inicial. `None` si el documento no tiene páginas: el resto de la app
    /// cae a navegación completa.
    pub fn mount(
        host: Rc<H>,
        initializers: PageInitializers,
        config: &ShellConfig,
    ) -> Option<Rc<Self>> {
        let registry = PageRegistry::discover(host.as_ref(), config);
        if registry.is_empty() {
            log::warn!("⚠️ [ROUTER] No hay páginas [{}], sin router", config.pages.page_attribute);
            return None;
        }
        log::info!("🧭 [ROUTER] {} páginas registradas", registry.len());

        let router = Rc::new(Self {
            progress: RouteProgress::new(host.clone(), &config.progress),
            host: host.clone(),
            config: config.clone(),
            registry,
            initializers,
            state: RefCell::new(RouterState {
                current: None,
                first_render: true,
            }),
        });

        let weak = Rc::downgrade(&router);
        host.on_hash_change(Box::new(move || {
            if let Some(router) = weak.upgrade() {
                let route = router.route_from_hash();
                router.activate(route.as_str());
            }
        }));

        let initial = router.route_from_hash();
        router.activate(initial.as_str());
        Some(router)
    }

    pub fn normalize(&self, raw: Option<&str>) -> Route {
        self.registry.normalize(raw)
    }

    /// Ruta canónica según el `location.hash` actual
    pub fn route_from_hash(&self) -> Route {
        hash::decode(&self.host.location_hash(), &self.registry)
    }

    pub fn current_route(&self) -> Option<Route> {
        self.state.borrow().current.clone()
    }

    pub fn registry(&self) -> &PageRegistry<H::Element> {
        &self.registry
    }

    pub fn initializers(&self) -> &PageInitializers {
        &self.initializers
    }

    /// Escribir el hash y activar la ruta en el acto. No se espera al
    /// `hashchange`: escribir el mismo hash no dispara ningún evento.
    ///
    /// Devuelve la ruta activa al terminar, que difiere de la pedida si el
    /// inicializador de la página redirigió.
    pub fn navigate(&self, route: &str, mode: HistoryMode) -> Route {
        let target = self.registry.normalize(Some(route));
        let next_hash = hash::encode(&target);

        let written = match mode {
            HistoryMode::Push => self.host.push_hash(&next_hash),
            HistoryMode::Replace => self.host.replace_hash(&next_hash),
        };
        if let Err(e) = written {
            log::warn!("⚠️ [ROUTER] No se pudo escribir {}: {}", next_hash, e);
        }

        let activated = self.activate(target.as_str());
        self.current_route().unwrap_or(activated)
    }

    /// Hacer visible la ruta pedida y ocultar todas las demás.
    ///
    /// Con la misma ruta activa solo se re-aplica visibilidad/ARIA. Con un
    /// cambio de ruta además: pulso de progreso (salvo el primer render),
    /// transición de entrada, scroll arriba e inicializador de la página.
    /// El inicializador corre al final, con el DOM ya consistente y sin
    /// ningún préstamo del estado: puede volver a navegar.
    pub fn activate(&self, route: &str) -> Route {
        let target = self.registry.normalize(Some(route));

        let (changed, first_render) = {
            let mut state = self.state.borrow_mut();
            let changed = state.current.as_ref() != Some(&target);
            state.current = Some(target.clone());
            (changed, state.first_render)
        };

        if changed && !first_render {
            self.progress.pulse();
        }

        for (page_route, page) in self.registry.iter() {
            let result = if *page_route == target {
                self.reveal(page, changed && !first_render)
            } else {
                self.conceal(page)
            };
            if let Err(e) = result {
                log::warn!("⚠️ [ROUTER] Página '{}': {}", page_route, e);
            }
        }

        if let Err(e) = sync_nav_bar(
            self.host.as_ref(),
            &self.config.nav_bar,
            &self.config.pages,
            &target,
        ) {
            log::warn!("⚠️ [ROUTER] Barra de navegación: {}", e);
        }

        if changed {
            self.host.scroll_to_origin();
        }

        self.state.borrow_mut().first_render = false;

        if changed {
            log::debug!("🧭 [ROUTER] Ruta activa: {}", target);
            self.run_initializer(&target);
        }

        target
    }

    fn conceal(&self, page: &H::Element) -> Result<(), ShellError> {
        page.add_class(&self.config.pages.hidden_class)?;
        page.set_attribute("aria-hidden", "true")?;
        page.remove_class(&self.config.pages.enter_class)
    }

    fn reveal(&self, page: &H::Element, animate: bool) -> Result<(), ShellError> {
        let was_hidden = page.has_class(&self.config.pages.hidden_class);
        page.remove_class(&self.config.pages.hidden_class)?;
        page.remove_attribute("aria-hidden")?;

        if animate && was_hidden {
            // Cosmético: si falla, la página ya es visible igual
            if let Err(e) = page.add_class(&self.config.pages.enter_class) {
                log::debug!("🧭 [ROUTER] Sin transición de entrada: {}", e);
                return Ok(());
            }
            let page = page.clone();
            let enter_class = self.config.pages.enter_class.clone();
            self.host.request_animation_frame(Box::new(move || {
                let _ = page.remove_class(&enter_class);
            }));
        }
        Ok(())
    }

    fn run_initializer(&self, route: &Route) {
        match self.initializers.run(route.as_str()) {
            None => {}
            Some(Ok(())) => log::debug!("✅ [ROUTER] Página '{}' inicializada", route),
            Some(Err(e)) => log::error!("❌ [ROUTER] Error inicializando la página {}: {}", route, e),
        }
    }
}

impl<H: Host> std::fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("pages", &self.registry.len())
            .field("state", &self.state.borrow())
            .field("initializers", &self.initializers)
            .finish()
    }
}
