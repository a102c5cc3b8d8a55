use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::core::LocationMatchMode;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub appwrite: AppwriteSettings,
    pub collection: CollectionSettings,
    pub database: DatabaseSettings,
    pub cache: CacheSettings,
    #[serde(default)]
    pub explore: ExploreSettings,
    #[serde(default)]
    pub slug: SlugSettings,
    #[serde(default)]
    pub geo: GeoSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub user_profiles: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub redis_url: String,
    pub l1_cache_size: Option<u64>,
    /// Per-user featured feed
    #[serde(default = "default_featured_ttl_secs")]
    pub featured_ttl_secs: u64,
    #[serde(default = "default_popular_ttl_secs")]
    pub popular_ttl_secs: u64,
    #[serde(default = "default_categories_ttl_secs")]
    pub categories_ttl_secs: u64,
}

fn default_featured_ttl_secs() -> u64 { 30 }
fn default_popular_ttl_secs() -> u64 { 120 }
fn default_categories_ttl_secs() -> u64 { 300 }

/// Feed sizes for the explore pages
#[derive(Debug, Clone, Deserialize)]
pub struct ExploreSettings {
    #[serde(default)]
    pub location_match: LocationMatchMode,
    #[serde(default = "default_candidate_pool")]
    pub candidate_pool: usize,
    #[serde(default = "default_featured_min_pool")]
    pub featured_min_pool: usize,
    #[serde(default = "default_featured_limit")]
    pub featured_limit: usize,
    #[serde(default = "default_local_limit")]
    pub local_limit: usize,
    #[serde(default = "default_popular_limit")]
    pub popular_limit: usize,
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for ExploreSettings {
    fn default() -> Self {
        Self {
            location_match: LocationMatchMode::default(),
            candidate_pool: default_candidate_pool(),
            featured_min_pool: default_featured_min_pool(),
            featured_limit: default_featured_limit(),
            local_limit: default_local_limit(),
            popular_limit: default_popular_limit(),
            search_limit: default_search_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_candidate_pool() -> usize { 100 }
fn default_featured_min_pool() -> usize { 10 }
fn default_featured_limit() -> usize { 3 }
fn default_local_limit() -> usize { 4 }
fn default_popular_limit() -> usize { 6 }
fn default_search_limit() -> usize { 5 }
fn default_max_limit() -> usize { 50 }

#[derive(Debug, Clone, Deserialize)]
pub struct SlugSettings {
    /// Country every city-state slug belongs to
    #[serde(default = "default_slug_country")]
    pub country: String,
}

impl Default for SlugSettings {
    fn default() -> Self {
        Self { country: default_slug_country() }
    }
}

fn default_slug_country() -> String { "United States".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct GeoSettings {
    #[serde(default = "default_geo_dataset_path")]
    pub dataset_path: String,
}

impl Default for GeoSettings {
    fn default() -> Self {
        Self { dataset_path: default_geo_dataset_path() }
    }
}

fn default_geo_dataset_path() -> String { "data/geo.json".to_string() }

/// tracing-subscriber formatter to install
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Pretty,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// EnvFilter directive, e.g. `info` or `eventhub_algo=debug,actix_web=info`
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with EVENTHUB_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local overrides for development
            .add_source(File::with_name("config/local").required(false))
            // e.g., EVENTHUB__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("EVENTHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("EVENTHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the conventional unprefixed variables on top of the layered config
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Ok(redis_url) = env::var("REDIS_URL") {
        builder = builder.set_override("cache.redis_url", redis_url)?;
    }
    if let Ok(api_key) = env::var("APPWRITE_API_KEY") {
        builder = builder.set_override("appwrite.api_key", api_key)?;
    }
    if let Ok(project_id) = env::var("APPWRITE_PROJECT_ID") {
        builder = builder.set_override("appwrite.project_id", project_id)?;
    }
    if let Ok(level) = env::var("LOG_LEVEL") {
        builder = builder.set_override("logging.level", level)?;
    }
    if let Ok(format) = env::var("LOG_FORMAT") {
        builder = builder.set_override("logging.format", format)?;
    }

    builder.build()
}
