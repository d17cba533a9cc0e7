use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::time::Duration;

static CONFIG: OnceCell<Config> = OnceCell::new();

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
const DEFAULT_CACHE_TTL_SECS: u64 = 30;

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// Published CSV URL, or a local file path
    pub url: String,
    pub fetch_timeout_secs: u64,
    pub cache_ttl_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: "data/vehicles.csv".to_string(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl SourceConfig {
    pub fn is_remote(&self) -> bool {
        let url = self.url.trim();
        url.starts_with("http://") || url.starts_with("https://")
    }

    /// Upstream fetch timeout; a zero value would disable it, so it falls back to the default
    pub fn fetch_timeout(&self) -> Duration {
        match self.fetch_timeout_secs {
            0 => Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[source]
url = "data/vehicles.csv"
fetch_timeout_secs = 15
cache_ttl_secs = 30
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

/// Install the process-wide configuration. Only the first call has an effect.
pub fn init(config: Config) {
    if CONFIG.set(config).is_err() {
        tracing::warn!("Configuration already initialized, ignoring");
    }
}

/// Process-wide configuration, built-in defaults when `init` was never called
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}
