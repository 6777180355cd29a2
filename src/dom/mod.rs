// ============================================================================
// DOM MODULE - Acceso al documento detrás del trait `Host`
// ============================================================================

pub mod host;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;

#[cfg(target_arch = "wasm32")]
pub mod events;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use host::*;
