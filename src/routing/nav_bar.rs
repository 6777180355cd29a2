// ============================================================================
// NAV BAR - Visibilidad de la barra de navegación según la ruta activa
// ============================================================================

use crate::config::{NavBarConfig, PageConfig};
use crate::dom::{Host, PageElement};
use crate::error::ShellError;
use crate::routing::route::Route;

/// Lista separada por comas; entradas vacías se ignoran
pub fn visible_pages(attribute: &str) -> Vec<&str> {
    attribute
        .split(',')
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .collect()
}

/// Mostrar/ocultar la barra. Sin barra o sin lista configurada no hace nada.
/// Devuelve la visibilidad aplicada.
pub fn sync_nav_bar<H: Host>(
    host: &H,
    nav_config: &NavBarConfig,
    page_config: &PageConfig,
    route: &Route,
) -> Result<Option<bool>, ShellError> {
    let Some(nav) = host.query_selector(&nav_config.selector) else {
        return Ok(None);
    };
    let Some(attribute) = nav.attribute(&nav_config.visible_pages_attribute) else {
        return Ok(None);
    };
    if attribute.is_empty() {
        return Ok(None);
    }

    let visible = visible_pages(&attribute).contains(&route.as_str());
    if visible {
        nav.remove_class(&page_config.hidden_class)?;
        nav.set_display("")?;
    } else {
        nav.add_class(&page_config.hidden_class)?;
        nav.set_display("none")?;
    }
    Ok(Some(visible))
}
