//! Configuration loading, merging and validation
//!
//! The on-disk document is parsed into a loose tree, merged over the built-in
//! defaults, then validated into an immutable [`Config`]. Any failure is fatal
//! for the service.

pub mod defaults;
pub mod error;
pub mod loader;
pub mod merge;
pub mod validation;

pub use defaults::DEFAULT_DOCUMENT;
pub use error::ConfigError;
pub use loader::{read_document, DEFAULT_CONFIG_PATH};
pub use merge::merge;
pub use validation::validate;

use crate::domain::Config;
use crate::render::print_summary;
use serde_yaml::Value;
use std::path::Path;

/// Load the service configuration from [`DEFAULT_CONFIG_PATH`].
///
/// Collaborators must not start unless this returns `Ok`. The startup
/// summary is written to stderr once on success.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new(DEFAULT_CONFIG_PATH))
}

/// Same pipeline as [`load_config`] against an explicit file.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    tracing::debug!("Loading config from {}", path.display());
    let raw = read_document(path)?;
    let config = build_config(&raw)?;

    tracing::info!(
        http = config.uses_http_output(),
        post = config.uses_post_output(),
        mqtt = config.uses_mqtt(),
        "Configuration ready"
    );
    print_summary(&config);
    Ok(config)
}

/// Merge `raw` over the defaults and validate the result.
pub fn build_config(raw: &Value) -> Result<Config, ConfigError> {
    let merged = merge(&DEFAULT_DOCUMENT, raw);
    validate(&merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(tmp: &TempDir, content: &str) -> std::path::PathBuf {
        let path = tmp.path().join("config.yml");
        fs::write(&path, content).expect("write");
        path
    }

    #[test]
    fn defaults_survive_loading() {
        let snapshot = DEFAULT_DOCUMENT.clone();
        let tmp = TempDir::new().expect("tmp");
        let path = write_config(&tmp, "collector:\n  user: u\n  password: p\n  intervalMinutes: 5\nhttpOutput:\n");

        let config = load_config_from(&path).expect("config");
        assert_eq!(config.collector().interval_minutes, 5);
        assert_eq!(*DEFAULT_DOCUMENT, snapshot);
    }

    #[test]
    fn legacy_document_loads() {
        let tmp = TempDir::new().expect("tmp");
        let path = write_config(
            &tmp,
            "xfinity:\n  user: u\n  password: p\n  interval: 30\npost:\n  url: http://x\nmqtt:\n  host: h\n  homeassistant:\n",
        );

        let config = load_config_from(&path).expect("config");
        assert_eq!(config.collector().interval_minutes, 30);
        assert_eq!(config.post_url(), Some("http://x"));
        assert!(!config.uses_http_output());
        assert!(config.uses_mqtt_home_assistant());
    }

    #[test]
    fn build_config_applies_default_interval() {
        let raw: Value =
            serde_yaml::from_str("collector:\n  user: u\n  password: p\nhttpOutput: {}\n").expect("yaml");
        let config = build_config(&raw).expect("config");
        assert_eq!(config.collector().interval().as_secs(), 3600);
    }
}
