use tracing::warn;

use crate::config;
use crate::error::Result;

/// Load and validate settings without falling back yet, so logging can be
/// configured from them before any warning is emitted.
pub fn load_settings() -> Result<config::Settings> {
    let settings = config::Settings::load()?;
    settings.validate()?;
    Ok(settings)
}

/// Config is optional; failures should not prevent the engine from starting.
pub fn or_defaults(loaded: Result<config::Settings>) -> config::Settings {
    match loaded {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "using default settings");
            config::Settings::default()
        }
    }
}
