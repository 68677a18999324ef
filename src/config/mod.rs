use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub oracle: OracleConfig,
    pub cache: CacheConfig,
}

impl ApiConfig {
    pub fn load() -> Result<Self> {
        let configured_path =
            std::env::var("PROFILE_API_CONFIG").unwrap_or_else(|_| "config/api.toml".to_string());
        assert!(
            !configured_path.is_empty(),
            "Configuration path must be non-empty"
        );
        assert!(
            configured_path.len() < 4096,
            "Configuration path length exceeds hard limit"
        );

        let mut builder = Config::builder()
            .add_source(File::new(&configured_path, FileFormat::Toml).required(true));

        if let Ok(env_override) = std::env::var("PROFILE_API_ENV") {
            if !env_override.is_empty() {
                let env_file = format!("config/api.{}.toml", env_override);
                if Path::new(&env_file).exists() {
                    builder = builder.add_source(File::new(&env_file, FileFormat::Toml));
                }
            }
        }

        let settings = builder
            .build()
            .map_err(|err| map_config_error(err, &configured_path))?;
        Self::from_settings(settings)
    }

    fn from_settings(settings: Config) -> Result<Self> {
        let config: Self = settings
            .try_deserialize()
            .context("Failed to deserialize API configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        assert!(
            !self.database.url.is_empty(),
            "Database URL must be specified"
        );
        assert!(
            self.server.port > 0,
            "Server port must be greater than zero"
        );
        assert!(
            !self.oracle.rpc_url.is_empty(),
            "Credential oracle URL must be specified"
        );
        self.cache.ensure_bounds()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: Option<IpAddr>,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> SocketAddr {
        let host = self.host.unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert!(self.port != 0, "HTTP port cannot be zero");
        assert!(self.port < 65535, "HTTP port must be below 65535");
        SocketAddr::new(host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    pub rpc_url: String,
    pub request_timeout_ms: Option<u64>,
}

impl OracleConfig {
    pub fn request_timeout(&self) -> Duration {
        let millis = self.request_timeout_ms.unwrap_or(3_000);
        assert!(millis >= 100, "Oracle timeout must be at least 100ms");
        assert!(millis <= 60_000, "Oracle timeout cannot exceed 60 seconds");
        Duration::from_millis(millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub profiles_max_capacity: u64,
    pub profiles_ttl_seconds: u64,
    #[serde(default = "CacheConfig::default_badge_refresh_seconds")]
    pub badge_catalog_refresh_seconds: u64,
}

impl CacheConfig {
    pub fn badge_catalog_refresh(&self) -> Duration {
        Duration::from_secs(self.badge_catalog_refresh_seconds)
    }

    fn ensure_bounds(&self) -> Result<()> {
        assert!(
            self.profiles_max_capacity >= 100,
            "Profile cache capacity must be at least 100"
        );
        assert!(
            self.profiles_ttl_seconds <= 86_400,
            "Profile cache TTL cannot exceed one day"
        );
        assert!(
            self.badge_catalog_refresh_seconds >= 1,
            "Badge catalog refresh must be at least one second"
        );
        assert!(
            self.badge_catalog_refresh_seconds <= 3_600,
            "Badge catalog refresh cannot exceed one hour"
        );
        Ok(())
    }

    const fn default_badge_refresh_seconds() -> u64 {
        10
    }
}

fn map_config_error(err: ConfigError, path: &str) -> ConfigError {
    match err {
        ConfigError::NotFound(_) => ConfigError::NotFound(path.to_string()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [server]
        port = 8080

        [database]
        url = "postgres://localhost/profiles"
        max_connections = 16

        [oracle]
        rpc_url = "http://127.0.0.1:9944"

        [cache]
        profiles_max_capacity = 10000
        profiles_ttl_seconds = 600
    "#;

    fn parse(source: &str) -> Result<ApiConfig> {
        let settings = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?;
        ApiConfig::from_settings(settings)
    }

    #[test]
    fn sample_config_loads_with_defaults() {
        let config = parse(SAMPLE).expect("valid config");
        assert_eq!(config.server.address().port(), 8080);
        assert_eq!(config.oracle.request_timeout(), Duration::from_millis(3_000));
        assert_eq!(config.cache.badge_catalog_refresh(), Duration::from_secs(10));
    }

    #[test]
    fn missing_section_is_an_error() {
        let without_oracle = SAMPLE.replace("[oracle]", "[unused]");
        assert!(parse(&without_oracle).is_err());
    }
}
