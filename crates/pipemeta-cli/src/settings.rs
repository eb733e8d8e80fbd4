use config::{Config, ConfigError, Environment, File};
use pipemeta_store::{config::DEFAULT_STORE, StoreConfig};
use serde::Deserialize;
use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};

/// Effective settings: defaults, then `pipemeta.toml`, then `PIPEMETA_*`
/// environment variables, then command-line flags.
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub store: PathBuf,
    pub format: OutputFormat,
}

impl Settings {
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("store", DEFAULT_STORE)?
            .set_default("format", "text")?
            .add_source(File::with_name("pipemeta").required(false))
            .add_source(Environment::with_prefix("PIPEMETA"));

        if let Some(store) = &cli.store {
            builder = builder.set_override("store", store.to_string_lossy().to_string())?;
        }
        if let Some(format) = cli.format {
            let format = match format {
                OutputFormat::Text => "text",
                OutputFormat::Json => "json",
            };
            builder = builder.set_override("format", format)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.store.clone())
    }
}
