// ============================================================================
// APP LOADER - Ocultar la pantalla de carga al terminar el arranque
// ============================================================================

use std::rc::Rc;

use crate::config::LoaderConfig;
use crate::dom::{Host, PageElement, TimerHandle};

/// Fade out + quitar del DOM. Sin loader (o ya quitado) no hace nada.
pub fn hide_app_loader<H: Host>(host: &Rc<H>, config: &LoaderConfig) {
    let Some(loader) = host.element_by_id(&config.element_id) else {
        return;
    };
    if let Err(e) = loader.add_class(&config.hidden_class) {
        log::warn!("⚠️ [LOADER] No se pudo ocultar el loader: {}", e);
    }

    host.set_timeout(
        config.fade_ms,
        Box::new(move || {
            if loader.is_attached() {
                loader.detach();
            }
        }),
    )
    .persist();
}

/// Ocultar poco después del arranque y de nuevo como red de seguridad
pub fn schedule_hide<H: Host>(host: &Rc<H>, config: &LoaderConfig) {
    for delay in [config.initial_delay_ms, config.safety_timeout_ms] {
        let task_host = host.clone();
        let task_config = config.clone();
        host.set_timeout(
            delay,
            Box::new(move || hide_app_loader(&task_host, &task_config)),
        )
        .persist();
    }
}
