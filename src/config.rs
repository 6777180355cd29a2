use serde::{Deserialize, Serialize};

use crate::error::ShellError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub default_route: String,
    pub enable_logging: bool,
    pub log_level: String,
    pub pages: PageConfig,
    pub progress: ProgressConfig,
    pub nav_bar: NavBarConfig,
    pub markers: MarkerConfig,
    pub loader: LoaderConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            default_route: "home".to_string(),
            enable_logging: true,
            log_level: "info".to_string(),
            pages: PageConfig::default(),
            progress: ProgressConfig::default(),
            nav_bar: NavBarConfig::default(),
            markers: MarkerConfig::default(),
            loader: LoaderConfig::default(),
        }
    }
}

/// Contenedores de página (`<section data-page="...">`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub page_attribute: String,
    pub hidden_class: String,
    pub enter_class: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            page_attribute: "data-page".to_string(),
            hidden_class: "hidden".to_string(),
            enter_class: "page-enter".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    pub element_id: String,
    pub active_class: String,
    pub duration_ms: u32,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            element_id: "route-progress".to_string(),
            active_class: "is-active".to_string(),
            duration_ms: 280,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavBarConfig {
    pub selector: String,
    pub visible_pages_attribute: String,
}

impl Default for NavBarConfig {
    fn default() -> Self {
        Self {
            selector: "nav[data-visible-pages]".to_string(),
            visible_pages_attribute: "data-visible-pages".to_string(),
        }
    }
}

/// Atributos declarativos que convierten cualquier elemento en enlace SPA
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub route_attribute: String,
    pub href_attribute: String,
    pub interactive_role: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            route_attribute: "data-route".to_string(),
            href_attribute: "data-href".to_string(),
            interactive_role: "button".to_string(),
        }
    }
}

impl MarkerConfig {
    /// Selector CSS de cualquier elemento navegable
    pub fn selector(&self) -> String {
        format!("[{}], [{}]", self.route_attribute, self.href_attribute)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub element_id: String,
    pub hidden_class: String,
    pub fade_ms: u32,
    pub initial_delay_ms: u32,
    pub safety_timeout_ms: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            element_id: "app-loader".to_string(),
            hidden_class: "app-loader--hidden".to_string(),
            fade_ms: 260,
            initial_delay_ms: 100,
            safety_timeout_ms: 2500,
        }
    }
}

impl ShellConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_route: option_env!("SHELL_DEFAULT_ROUTE")
                .map(|s| s.to_string())
                .unwrap_or(defaults.default_route),
            enable_logging: option_env!("SHELL_ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            log_level: option_env!("SHELL_LOG_LEVEL")
                .map(|s| s.to_string())
                .unwrap_or(defaults.log_level),
            progress: ProgressConfig {
                duration_ms: option_env!("SHELL_PROGRESS_MS")
                    .unwrap_or("280").parse().unwrap_or(280),
                ..defaults.progress
            },
            loader: LoaderConfig {
                fade_ms: option_env!("SHELL_LOADER_FADE_MS")
                    .unwrap_or("260").parse().unwrap_or(260),
                safety_timeout_ms: option_env!("SHELL_LOADER_SAFETY_MS")
                    .unwrap_or("2500").parse().unwrap_or(2500),
                ..defaults.loader
            },
            ..defaults
        }
    }

    /// Config enviada por la página host al arrancar (campos ausentes = defaults)
    pub fn from_json(json: &str) -> Result<Self, ShellError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ShellError::Config(e.to_string()))?;

        if config.default_route.trim().is_empty() {
            return Err(ShellError::Config("default_route vacío".to_string()));
        }
        Ok(config)
    }

    /// Nivel de log para wasm_logger (info si el valor no es válido)
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

// Configuración global estática (solo la usa el punto de entrada WASM)
lazy_static::lazy_static! {
    pub static ref CONFIG: ShellConfig = ShellConfig::from_env();
}
