//! Error types for configuration loading.
//!
//! Every variant is fatal: the service must not start on any of them.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building the startup configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read or is not a usable document.
    #[error("Config file not found or unreadable at {}: {reason}", path.display())]
    ConfigNotFound { path: PathBuf, reason: String },

    #[error("{field} needs to be defined in the config.")]
    MissingCredential { field: &'static str },

    #[error("MQTT needs host defined in the config. (mqttOutput.host)")]
    MissingMqttHost,

    #[error("MQTT topic or homeAssistant need to be defined in the config. (mqttOutput.topic, mqttOutput.homeAssistant)")]
    MissingMqttDestination,

    #[error("No output sink configured. Define httpOutput or postOutput.url in the config.")]
    MissingOutputSink,

    #[error("collector.intervalMinutes must be a positive number of minutes, got {0}")]
    InvalidInterval(i64),

    /// The merged document has a field of the wrong type.
    #[error("Invalid config document: {0}")]
    InvalidDocument(String),
}

impl ConfigError {
    pub(crate) fn not_found(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ConfigError::ConfigNotFound { path: path.into(), reason: reason.to_string() }
    }
}
