use contracts::shared::navigation::PersonaContext;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogSection,
    pub rotation: RotationConfig,
    #[serde(default)]
    pub personas: Vec<PersonaContext>,
    #[serde(default)]
    pub script: ScriptConfig,
    #[serde(default)]
    pub views: ViewsConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogSection {
    /// Путь к альтернативному catalog.toml; пусто = встроенный каталог
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RotationConfig {
    pub period_secs: i64,
    /// RFC 3339, начало отсчёта для ротации персон
    pub started_at: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScriptConfig {
    #[serde(default)]
    pub locations: Vec<String>,
    /// Шаг ручных часов между строками сценария
    #[serde(default = "default_step_ms")]
    pub step_ms: i64,
}

fn default_step_ms() -> i64 {
    1000
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ViewsConfig {
    /// Views treated as unbound, to exercise MISSING_VIEW_BINDING
    #[serde(default)]
    pub unbound: Vec<String>,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[rotation]
period_secs = 30
started_at = "2024-03-15T09:00:00Z"

[[personas]]
user_id = "ana"
role = "compras"
tenant = "acme"

[[personas]]
user_id = "luis"
role = "finanzas"
tenant = "beta-acme"

[[personas]]
user_id = "eva"
role = "admin"
tenant = "acme"

[script]
step_ms = 1000
locations = [
    "/",
    "/compras?tab=pendientes",
    "/compras?tab=action-center&preset=pending_approval",
    "/compras?tab=analitica",
    "/compras?tab=Bad!",
    "/finanzas/cobros",
    "/dashboard",
    "/nope",
]

[views]
unbound = []
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Resolves the catalog override path relative to the executable directory
pub fn get_catalog_path(config: &Config) -> Option<PathBuf> {
    let raw = config.catalog.path.as_deref().filter(|p| !p.is_empty())?;
    let path = Path::new(raw);

    if path.is_absolute() {
        return Some(path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Some(exe_dir.join(path));
        }
    }

    Some(PathBuf::from(raw))
}
