// ============================================================================
// ROUTING MODULE - Router por hash + navegación declarativa
// ============================================================================

pub mod route;
pub mod registry;
pub mod hash;
pub mod progress;
pub mod nav_bar;
pub mod initializers;
pub mod router;
pub mod dispatcher;

pub use route::*;
pub use registry::PageRegistry;
pub use progress::RouteProgress;
pub use initializers::{PageInitializer, PageInitializers};
pub use router::Router;
pub use dispatcher::{NavTarget, NavigationDispatcher};
