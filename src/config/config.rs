use ::config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use once_cell::sync::Lazy;
use serde::Deserialize;

pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    AppConfig::load().unwrap_or_else(|e| panic!("Failed to load configuration: {}", e))
});

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub play: PlayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub page_size: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub issuer: String,
    pub jwks_url: String,
    pub audience: Option<String>,
    pub admin_email: String,
    /// Backend API of the identity provider, used to show quiz owners to the admin.
    pub directory_url: Option<String>,
    pub directory_secret: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlayConfig {
    pub session_ttl_minutes: i64,
    pub cleanup_interval_secs: u64,
}

impl AppConfig {
    /// Layers `config/default.toml` (optional) under `QUIZ__*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::with_prefix("QUIZ").separator("__"));

        Self::from_builder(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder
            .set_default("server.address", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.page_size", 20)?
            .set_default("server.log_level", "info")?
            .set_default("play.session_ttl_minutes", 30)?
            .set_default("play.cleanup_interval_secs", 60)?
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.play.cleanup_interval_secs == 0 {
            return Err(ConfigError::Message(
                "play.cleanup_interval_secs must be greater than zero".into(),
            ));
        }

        if self.play.session_ttl_minutes <= 0 {
            return Err(ConfigError::Message(
                "play.session_ttl_minutes must be greater than zero".into(),
            ));
        }

        if self.server.page_size == 0 {
            return Err(ConfigError::Message(
                "server.page_size must be greater than zero".into(),
            ));
        }

        Ok(self)
    }
}
