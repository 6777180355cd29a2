// ============================================================================
// PAGE REGISTRY - Ruta -> contenedor de página ya presente en el documento
// ============================================================================
// Se construye una sola vez al arrancar y no cambia después.
// ============================================================================

use crate::config::ShellConfig;
use crate::dom::{Host, PageElement};
use crate::routing::route::{clean_route, Route};

#[derive(Debug, Clone)]
pub struct PageRegistry<E> {
    default_route: Route,
    // Orden del documento
    entries: Vec<(Route, E)>,
}

impl<E: PageElement> PageRegistry<E> {
    /// Escanear el documento buscando elementos con el atributo de página
    pub fn discover<H>(host: &H, config: &ShellConfig) -> Self
    where
        H: Host<Element = E>,
    {
        let attribute = &config.pages.page_attribute;
        let pages = host.query_selector_all(&format!("[{}]", attribute));
        Self::from_pages(
            pages
                .into_iter()
                .filter_map(|page| page.attribute(attribute).map(|route| (route, page))),
            &config.default_route,
        )
    }

    /// Contenedores sin nombre de ruta se descartan; un nombre repetido
    /// conserva su posición y se queda con el último contenedor visto.
    pub fn from_pages<I>(pages: I, default_route: &str) -> Self
    where
        I: IntoIterator<Item = (String, E)>,
    {
        let mut entries: Vec<(Route, E)> = Vec::new();
        for (name, page) in pages {
            if name.is_empty() {
                continue;
            }
            match entries.iter_mut().find(|(route, _)| route.as_str() == name) {
                Some(entry) => entry.1 = page,
                None => entries.push((Route::new(name), page)),
            }
        }

        Self {
            default_route: Route::new(default_route),
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(route, _)| route.as_str() == name)
    }

    pub fn get(&self, name: &str) -> Option<&E> {
        self.entries
            .iter()
            .find(|(route, _)| route.as_str() == name)
            .map(|(_, page)| page)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Route, &E)> {
        self.entries.iter().map(|(route, page)| (route, page))
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.entries.iter().map(|(route, _)| route)
    }

    pub fn default_route(&self) -> Route {
        self.default_route.clone()
    }

    /// Ruta canónica para cualquier entrada. Total: lo desconocido, vacío o
    /// ausente (valor JS que no es string) termina en la ruta por defecto.
    pub fn normalize(&self, raw: Option<&str>) -> Route {
        raw.and_then(clean_route)
            .and_then(|cleaned| self.routes().find(|route| route.as_str() == cleaned))
            .cloned()
            .unwrap_or_else(|| self.default_route())
    }
}
