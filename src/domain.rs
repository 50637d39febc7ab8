//! Core domain types: the validated configuration document and its accessors.

use std::fmt;
use std::time::Duration;

/// Collection interval used when the document does not set one.
pub const DEFAULT_INTERVAL_MINUTES: u64 = 60;

/// Broker port used when `mqttOutput.port` is not set.
pub const DEFAULT_MQTT_PORT: u16 = 1883;

/// Home Assistant's own default discovery prefix.
pub const DEFAULT_DISCOVERY_PREFIX: &str = "homeassistant";

/// Credentials and schedule for the upstream data source.
#[derive(Clone, PartialEq, Eq)]
pub struct Collector {
    pub user: String,
    pub password: String,
    pub interval_minutes: u64,
}

impl Collector {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes.saturating_mul(60))
    }
}

impl fmt::Debug for Collector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collector")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("interval_minutes", &self.interval_minutes)
            .finish()
    }
}

/// Presence marker for the pull-style HTTP endpoint. It has no settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HttpOutput;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostOutput {
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HomeAssistant {
    pub prefix: Option<String>,
}

/// Broker connection and routing for MQTT publishing.
#[derive(Clone, PartialEq, Eq)]
pub struct MqttOutput {
    pub host: String,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub topic: Option<String>,
    pub home_assistant: Option<HomeAssistant>,
}

impl MqttOutput {
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_MQTT_PORT)
    }

    /// Discovery prefix for Home Assistant mode, `None` when the mode is off.
    pub fn discovery_prefix(&self) -> Option<&str> {
        self.home_assistant
            .as_ref()
            .map(|ha| ha.prefix.as_deref().unwrap_or(DEFAULT_DISCOVERY_PREFIX))
    }

    /// Username/password pair, only when a username is configured.
    pub fn credentials(&self) -> Option<(&str, Option<&str>)> {
        self.username.as_deref().map(|user| (user, self.password.as_deref()))
    }
}

impl fmt::Debug for MqttOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MqttOutput")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("topic", &self.topic)
            .field("home_assistant", &self.home_assistant)
            .finish()
    }
}

/// The merged, validated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    pub collector: Collector,
    pub http_output: Option<HttpOutput>,
    pub post_output: Option<PostOutput>,
    pub mqtt_output: Option<MqttOutput>,
}

/// Ready-to-query startup configuration.
///
/// Only obtainable through validation, so every value upholds the document
/// invariants: collector credentials are non-empty, an output sink exists, and
/// an MQTT section always has a host and somewhere to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    document: ConfigDocument,
}

impl Config {
    pub(crate) fn new(document: ConfigDocument) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn collector(&self) -> &Collector {
        &self.document.collector
    }

    pub fn mqtt(&self) -> Option<&MqttOutput> {
        self.document.mqtt_output.as_ref()
    }

    pub fn uses_http_output(&self) -> bool {
        self.document.http_output.is_some()
    }

    pub fn uses_post_output(&self) -> bool {
        self.post_url().is_some()
    }

    pub fn uses_mqtt(&self) -> bool {
        self.document.mqtt_output.is_some()
    }

    pub fn uses_mqtt_home_assistant(&self) -> bool {
        self.mqtt().is_some_and(|mqtt| mqtt.home_assistant.is_some())
    }

    /// Configured POST target; empty URLs are treated as unset.
    pub fn post_url(&self) -> Option<&str> {
        self.document
            .post_output
            .as_ref()
            .and_then(|post| post.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}
