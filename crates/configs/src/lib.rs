use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// JSON dataset to seed the catalog from; takes precedence over `demo_seed`.
    #[serde(default)]
    pub seed_path: Option<String>,
    #[serde(default = "default_demo_seed")]
    pub demo_seed: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { seed_path: None, demo_seed: default_demo_seed() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    /// `EnvFilter` directives; `RUST_LOG` still takes precedence.
    #[serde(default)]
    pub filter: Option<String>,
}

fn default_demo_seed() -> bool { true }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Like [`AppConfig::load_and_validate`], but a missing file yields the defaults.
    pub fn load_or_default() -> Result<Self> {
        let path = config_path();
        let mut cfg = if std::path::Path::new(&path).exists() { load_from_file(&path)? } else { Self::default() };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.catalog.normalize_from_env();
        self.catalog.validate()?;
        self.logging.normalize();
        Ok(())
    }
}

impl CatalogConfig {
    pub fn normalize_from_env(&mut self) {
        // CATALOG_SEED_PATH fills in a seed file when the TOML has none
        if self.seed_path.is_none() {
            if let Ok(path) = std::env::var("CATALOG_SEED_PATH") {
                self.seed_path = Some(path);
            }
        }
        if self.seed_path.as_deref().is_some_and(|p| p.trim().is_empty()) {
            self.seed_path = None;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.seed_path {
            if !path.to_lowercase().ends_with(".json") {
                return Err(anyhow!("catalog.seed_path must point to a .json dataset"));
            }
        }
        Ok(())
    }
}

impl LoggingConfig {
    pub fn normalize(&mut self) {
        if self.filter.as_deref().is_some_and(|f| f.trim().is_empty()) {
            self.filter = None;
        }
    }
}
