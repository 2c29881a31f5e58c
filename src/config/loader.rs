use crate::config::source::{BittrexConfig, SourceConfig};
use crate::config::{ApiConfig, BotConfig, LoggingConfig};
use crate::error::{Error, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
}

fn default_sources() -> Vec<SourceConfig> {
    vec![SourceConfig::Bittrex(BittrexConfig::default())]
}

impl AppConfig {
    pub fn load(env: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("ARBITRAGE").separator("__"))
            .build()
            .map_err(|e| Error::ConfigError(e.to_string()))?;

        let app: AppConfig = config.try_deserialize()
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        app.validate()?;
        Ok(app)
    }

    pub fn from_toml(toml: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .map_err(|e| Error::ConfigError(e.to_string()))?;

        let app: AppConfig = config.try_deserialize()
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        app.validate()?;
        Ok(app)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bot.channel_capacity == 0 {
            return Err(Error::ConfigError("bot.channel_capacity must be at least 1".to_string()));
        }
        if self.sources.is_empty() {
            return Err(Error::ConfigError("at least one quote source is required".to_string()));
        }
        for source in &self.sources {
            source.validate()
                .map_err(|e| Error::ConfigError(format!("source {}: {}", source.name(), e)))?;
        }
        Ok(())
    }
}
