use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use oauth2::url::Url;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub frontend: FrontendConfig,
    pub jwt: JwtConfig,
    pub google: GoogleConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    /// Base URL the provider redirects back to
    pub public_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FrontendConfig {
    /// Base URL of the browser client receiving the login result
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
}

fn default_max_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, GOOGLE__CLIENT_ID, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// Secrets and URLs are checked here so a misconfigured process never
    /// starts serving.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject blank secrets and unparsable URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("jwt.secret", &self.jwt.secret),
            ("google.client_id", &self.google.client_id),
            ("google.client_secret", &self.google.client_secret),
            ("database.url", &self.database.url),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Message(format!("{key} must be set")));
            }
        }

        for (key, value) in [
            ("server.public_url", &self.server.public_url),
            ("frontend.url", &self.frontend.url),
        ] {
            Url::parse(value)
                .map_err(|e| ConfigError::Message(format!("{key} is not a valid URL: {e}")))?;
        }

        Ok(())
    }

    /// Frontend base URL, already validated by [`validate`](Self::validate).
    pub fn frontend_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.frontend.url)
            .map_err(|e| ConfigError::Message(format!("frontend.url is not a valid URL: {e}")))
    }
}
