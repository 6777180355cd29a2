// ============================================================================
// NAVIGATION DISPATCHER - Clicks/teclas sobre [data-route] / [data-href]
// ============================================================================
// Cualquier markup puede entrar a la navegación SPA con atributos, sin que
// cada página registre sus propios listeners.
// ============================================================================

use std::rc::Rc;

use crate::config::{MarkerConfig, ShellConfig};
use crate::dom::{Activation, Host, PageElement};
use crate::routing::hash::decode_component;
use crate::routing::route::HistoryMode;
use crate::routing::router::Router;

/// Destino resuelto a partir de los atributos de un elemento
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    /// Ruta SPA (se normaliza al navegar)
    Route(String),
    /// URL literal: navegación completa del navegador
    Location(String),
}

/// Ruta de un `data-href` tipo fragmento (`#/ruta`, `#ruta`, `#`).
/// Rutas normales (`/about`, `https://...`) no son fragmento: `None`.
pub fn route_from_href(href: &str, default_route: &str) -> Option<String> {
    let fragment = href.strip_prefix('#')?;
    let fragment = fragment.strip_prefix('/').unwrap_or(fragment);
    if fragment.is_empty() {
        return Some(default_route.to_string());
    }
    Some(decode_component(fragment).unwrap_or_else(|| default_route.to_string()))
}

/// `data-route` explícito (no vacío) gana; si no, el `data-href` tipo
/// fragmento; si no, el `data-href` literal como URL.
pub fn resolve_target(
    explicit_route: Option<&str>,
    href: Option<&str>,
    default_route: &str,
) -> Option<NavTarget> {
    if let Some(route) = explicit_route.filter(|r| !r.is_empty()) {
        return Some(NavTarget::Route(route.to_string()));
    }
    let href = href.filter(|h| !h.is_empty())?;
    match route_from_href(href, default_route) {
        Some(route) => Some(NavTarget::Route(route)),
        None => Some(NavTarget::Location(href.to_string())),
    }
}

pub fn is_activation_key(key: &str) -> bool {
    key == "Enter" || key == " "
}

pub struct NavigationDispatcher<H: Host> {
    host: Rc<H>,
    router: Option<Rc<Router<H>>>,
    markers: MarkerConfig,
    default_route: String,
}

impl<H: Host> NavigationDispatcher<H> {
    pub fn new(host: Rc<H>, router: Option<Rc<Router<H>>>, config: &ShellConfig) -> Self {
        Self {
            host,
            router,
            markers: config.markers.clone(),
            default_route: config.default_route.clone(),
        }
    }

    /// Registrar los listeners delegados en el documento (una sola vez)
    pub fn install(self) -> Rc<Self> {
        let dispatcher = Rc::new(self);
        let handler = dispatcher.clone();
        dispatcher.host.on_activation(
            &dispatcher.markers.selector(),
            Box::new(move |activation: Activation<'_, H::Element>| handler.handle(activation)),
        );
        if dispatcher.router.is_none() {
            log::info!("🔗 [NAV] Sin router: los enlaces usarán navegación completa");
        }
        dispatcher
    }

    pub fn has_router(&self) -> bool {
        self.router.is_some()
    }

    /// Devuelve true si hubo navegación (el caller cancela la acción por defecto)
    pub fn handle(&self, activation: Activation<'_, H::Element>) -> bool {
        let element = match activation {
            Activation::Click(element) => element,
            Activation::Key { key, target } => {
                if !is_activation_key(key) || !self.is_keyboard_target(target) {
                    return false;
                }
                target
            }
        };

        match self.resolve(element) {
            Some(target) => {
                self.follow(target);
                true
            }
            None => false,
        }
    }

    pub fn resolve(&self, element: &H::Element) -> Option<NavTarget> {
        let explicit = element.attribute(&self.markers.route_attribute);
        let href = element.attribute(&self.markers.href_attribute);
        resolve_target(explicit.as_deref(), href.as_deref(), &self.default_route)
    }

    /// `role="button"` y al menos uno de los dos marcadores
    fn is_keyboard_target(&self, element: &H::Element) -> bool {
        element.attribute("role").as_deref() == Some(self.markers.interactive_role.as_str())
            && (element.has_attribute(&self.markers.route_attribute)
                || element.has_attribute(&self.markers.href_attribute))
    }

    fn follow(&self, target: NavTarget) {
        let url = match target {
            NavTarget::Route(route) => match &self.router {
                Some(router) => {
                    router.navigate(&route, HistoryMode::Push);
                    return;
                }
                None => route,
            },
            NavTarget::Location(url) => url,
        };

        log::debug!("🔗 [NAV] Navegación completa a {}", url);
        if let Err(e) = self.host.assign_location(&url) {
            log::warn!("⚠️ [NAV] No se pudo navegar a {}: {}", url, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::{MemoryElement, MemoryHost};
    use crate::routing::initializers::PageInitializers;

    fn link(attr: &str, value: &str) -> MemoryElement {
        MemoryElement::new("a").with_attr(attr, value)
    }

    fn with_router() -> (Rc<MemoryHost>, Rc<Router<MemoryHost>>) {
        let host = Rc::new(MemoryHost::with_pages(&["home", "cargo-cat", "my-trips"]));
        let config = ShellConfig::default();
        let router = Router::mount(host.clone(), PageInitializers::new(), &config).unwrap();
        NavigationDispatcher::new(host.clone(), Some(router.clone()), &config).install();
        (host, router)
    }

    fn without_router() -> Rc<MemoryHost> {
        let host = Rc::new(MemoryHost::new());
        NavigationDispatcher::new(host.clone(), None, &ShellConfig::default()).install();
        host
    }

    #[test]
    fn href_fragments_become_routes() {
        assert_eq!(route_from_href("#/cargo-cat", "home").as_deref(), Some("cargo-cat"));
        assert_eq!(route_from_href("#my-trips", "home").as_deref(), Some("my-trips"));
        assert_eq!(route_from_href("#/my%20trips", "home").as_deref(), Some("my trips"));
        assert_eq!(route_from_href("#", "home").as_deref(), Some("home"));
        assert_eq!(route_from_href("#/", "home").as_deref(), Some("home"));
        assert_eq!(route_from_href("#/%zz", "home").as_deref(), Some("home"));
        assert_eq!(route_from_href("/about.html", "home"), None);
        assert_eq!(route_from_href("https://t.me/bot", "home"), None);
    }

    #[test]
    fn explicit_route_wins_over_href() {
        assert_eq!(
            resolve_target(Some("my-trips"), Some("#/cargo-cat"), "home"),
            Some(NavTarget::Route("my-trips".into()))
        );
        assert_eq!(
            resolve_target(Some(""), Some("#/cargo-cat"), "home"),
            Some(NavTarget::Route("cargo-cat".into()))
        );
        assert_eq!(
            resolve_target(None, Some("/help.html"), "home"),
            Some(NavTarget::Location("/help.html".into()))
        );
        assert_eq!(resolve_target(Some(""), Some(""), "home"), None);
        assert_eq!(resolve_target(None, None, "home"), None);
    }

    #[test]
    fn click_on_route_marker_navigates() {
        let (host, router) = with_router();
        assert!(host.click(&link("data-route", "cargo-cat")));
        assert_eq!(router.current_route().unwrap(), "cargo-cat");
        assert_eq!(host.location_hash(), "#/cargo-cat");
        assert!(host.assigned_locations().is_empty());
    }

    #[test]
    fn click_on_fragment_href_navigates() {
        let (host, router) = with_router();
        assert!(host.click(&link("data-href", "#/my-trips")));
        assert_eq!(router.current_route().unwrap(), "my-trips");
    }

    #[test]
    fn click_on_plain_href_assigns_location() {
        let (host, router) = with_router();
        assert!(host.click(&link("data-href", "/terms.html")));
        assert_eq!(host.assigned_locations(), vec!["/terms.html".to_string()]);
        assert_eq!(router.current_route().unwrap(), "home");
    }

    #[test]
    fn click_on_unmarked_element_is_ignored() {
        let (host, _router) = with_router();
        assert!(!host.click(&MemoryElement::new("button")));
        assert!(!host.click(&link("data-route", "")));
    }

    #[test]
    fn without_router_routes_become_full_navigation() {
        let host = without_router();
        assert!(host.click(&link("data-route", "cargo-cat")));
        assert!(host.click(&link("data-href", "#/my-trips")));
        assert_eq!(
            host.assigned_locations(),
            vec!["cargo-cat".to_string(), "my-trips".to_string()]
        );
    }

    #[test]
    fn keyboard_needs_button_role_and_activation_key() {
        let (host, router) = with_router();
        let card = MemoryElement::new("div")
            .with_attr("role", "button")
            .with_attr("data-route", "my-trips");

        assert!(!host.press_key("Tab", &card));
        assert!(!host.press_key("Escape", &card));
        assert_eq!(router.current_route().unwrap(), "home");

        assert!(host.press_key("Enter", &card));
        assert_eq!(router.current_route().unwrap(), "my-trips");

        let cargo = MemoryElement::new("div")
            .with_attr("role", "button")
            .with_attr("data-href", "#/cargo-cat");
        assert!(host.press_key(" ", &cargo));
        assert_eq!(router.current_route().unwrap(), "cargo-cat");
    }

    #[test]
    fn keyboard_ignores_elements_without_button_role() {
        let (host, router) = with_router();
        let plain = link("data-route", "my-trips");
        assert!(!host.press_key("Enter", &plain));

        let no_marker = MemoryElement::new("div").with_attr("role", "button");
        assert!(!host.press_key("Enter", &no_marker));
        assert_eq!(router.current_route().unwrap(), "home");
    }
}
