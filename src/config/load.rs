use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::schema::Settings;

const ENV_PREFIX: &str = "ALLEGRO";
const CONFIG_PATH_VAR: &str = "ALLEGRO_CONFIG_PATH";

impl Settings {
    /// Defaults, overlaid by the config file (if present), overlaid by
    /// `ALLEGRO__<SECTION>__<KEY>` variables, e.g. `ALLEGRO__ENGINE__SPEED_MS=500`.
    pub fn load() -> Result<Self> {
        Self::load_from(resolve_config_path().as_deref())
    }

    pub(crate) fn load_from(file: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(::config::File::from(path).required(false));
        }
        let cfg = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(cfg.try_deserialize::<Self>()?)
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        let engine = &self.engine;
        if engine.tick_interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "engine.tick_interval_ms must be >= 1".to_string(),
            ));
        }
        if engine.min_speed_ms == 0 {
            return Err(Error::InvalidConfig(
                "engine.min_speed_ms must be >= 1".to_string(),
            ));
        }
        if engine.speed_ms < engine.min_speed_ms {
            return Err(Error::InvalidConfig(format!(
                "engine.speed_ms ({}) must be >= engine.min_speed_ms ({})",
                engine.speed_ms, engine.min_speed_ms
            )));
        }
        Ok(())
    }
}

/// `ALLEGRO_CONFIG_PATH` wins; otherwise the per-user location.
pub fn resolve_config_path() -> Option<PathBuf> {
    env::var_os(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// `$XDG_CONFIG_HOME/allegro/config.toml`, or `~/.config/allegro/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map(|dir| dir.join("allegro").join("config.toml"))
}
