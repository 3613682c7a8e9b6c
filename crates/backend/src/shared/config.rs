use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub risk_fund: RiskFundConfig,
    #[serde(default)]
    pub returns: ReturnsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Параметры фонда рисков
#[derive(Debug, Deserialize, Clone)]
pub struct RiskFundConfig {
    /// Целевой размер фонда
    #[serde(default = "default_fund_target")]
    pub target: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for RiskFundConfig {
    fn default() -> Self {
        Self {
            target: default_fund_target(),
            currency: default_currency(),
        }
    }
}

/// Параметры приёма обращений
#[derive(Debug, Deserialize, Clone)]
pub struct ReturnsConfig {
    #[serde(default = "default_min_description_length")]
    pub min_description_length: usize,
    #[serde(default = "default_code_prefix")]
    pub code_prefix: String,
}

impl Default for ReturnsConfig {
    fn default() -> Self {
        Self {
            min_description_length: default_min_description_length(),
            code_prefix: default_code_prefix(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    3000
}

fn default_fund_target() -> i64 {
    50_000_000
}

fn default_currency() -> String {
    "MNT".into()
}

fn default_min_description_length() -> usize {
    10
}

fn default_code_prefix() -> String {
    "RET".into()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/freight.db"

[server]
host = "0.0.0.0"
port = 3000

[risk_fund]
target = 50000000
currency = "MNT"

[returns]
min_description_length = 10
code_prefix = "RET"
"#;

/// Env variable with an explicit path to config.toml
pub const CONFIG_ENV: &str = "FREIGHT_CONFIG";

impl Config {
    /// Embedded defaults, also used by tests
    pub fn embedded() -> anyhow::Result<Self> {
        Ok(toml::from_str(DEFAULT_CONFIG)?)
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Path from `FREIGHT_CONFIG`
/// 2. Next to the executable (for production)
/// 3. Current working directory
/// 4. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    for path in candidate_paths() {
        if path.exists() {
            tracing::info!("Loading config from: {}", path.display());
            let contents = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
            return Ok(config);
        }
    }

    tracing::info!("Using default embedded configuration");
    Config::embedded()
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(explicit) = std::env::var(CONFIG_ENV) {
        paths.push(PathBuf::from(explicit));
    }
    if let Some(exe_dir) = exe_dir() {
        paths.push(exe_dir.join("config.toml"));
    }
    paths.push(PathBuf::from("config.toml"));
    paths
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> PathBuf {
    let db_path = Path::new(&config.database.path);

    if db_path.is_absolute() {
        return db_path.to_path_buf();
    }

    match exe_dir() {
        Some(dir) => dir.join(db_path),
        None => db_path.to_path_buf(),
    }
}
