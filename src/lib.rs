//! usage-collector-config: startup configuration for the usage collector
//!
//! Reads the collector's YAML document, merges it over built-in defaults,
//! validates the output and credential rules, and hands the rest of the
//! service an immutable [`Config`] to query.

pub mod config;
pub mod domain;
pub mod render;

pub use config::{load_config, load_config_from, ConfigError, DEFAULT_CONFIG_PATH};
pub use domain::{Collector, Config, ConfigDocument, HomeAssistant, MqttOutput, PostOutput};
