use std::env;
use std::fmt;

use auth::SecretError;
use auth::SigningSecret;
use chrono::Duration;
use chrono::Utc;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for chirpy.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub platform: Platform,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

/// Deployment flavour. Destructive admin endpoints only run on `Dev`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Dev,
    #[default]
    Prod,
}

/// PostgreSQL database configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    #[serde(default = "default_filepath_root")]
    pub filepath_root: String,
}

/// Access token configuration.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_ttl_seconds")]
    pub access_token_ttl_seconds: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .finish()
    }
}

impl JwtConfig {
    /// Signing secret for access tokens.
    ///
    /// # Errors
    /// * `Empty` - `jwt.secret` is blank
    pub fn signing_secret(&self) -> Result<SigningSecret, SecretError> {
        SigningSecret::new(self.secret.trim().as_bytes())
    }

    /// Lifetime of issued access tokens.
    ///
    /// # Errors
    /// * `Message` - `jwt.access_token_ttl_seconds` is not positive, or too large
    ///   to add to the current time
    pub fn access_token_ttl(&self) -> Result<Duration, ConfigError> {
        Duration::try_seconds(self.access_token_ttl_seconds)
            .filter(|ttl| *ttl > Duration::zero())
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or_else(|| {
                ConfigError::Message(format!(
                    "jwt.access_token_ttl_seconds must be positive and in range, got {}",
                    self.access_token_ttl_seconds
                ))
            })
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_filepath_root() -> String {
    ".".to_string()
}

fn default_access_token_ttl_seconds() -> i64 {
    auth::authenticator::DEFAULT_ACCESS_TOKEN_TTL_SECONDS
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, PLATFORM, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// `jwt.secret` has no default; a missing secret fails the load. The platform
    /// is `prod` unless `PLATFORM=dev` is set explicitly.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        // Example: JWT__SECRET=... overrides jwt.secret
        Self::from_sources(&run_mode, Environment::default().separator("__"))
    }

    fn from_sources(run_mode: &str, environment: Environment) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment)
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.jwt.access_token_ttl()?;

        Ok(config)
    }
}
