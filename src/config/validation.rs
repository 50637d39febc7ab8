//! Validation of the merged document into a typed [`Config`].
//!
//! Rules run in a fixed order and the first violation is returned:
//!
//! 1. `collector.user` present and non-empty
//! 2. `collector.password` present and non-empty
//! 3. `mqttOutput.host` present when `mqttOutput` is
//! 4. `mqttOutput.topic` or `mqttOutput.homeAssistant` present when `mqttOutput` is
//! 5. `httpOutput` or a non-empty `postOutput.url` present
//! 6. `collector.intervalMinutes` at least one minute
//!
//! Each group is converted only when its first rule runs, so a type error in
//! a later group never hides an earlier rule.

use super::error::ConfigError;
use crate::domain::{
    Collector, Config, ConfigDocument, HomeAssistant, HttpOutput, MqttOutput, PostOutput,
    DEFAULT_INTERVAL_MINUTES,
};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCollector {
    #[serde(default, deserialize_with = "scalar_string")]
    user: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    password: Option<String>,
    #[serde(default)]
    interval_minutes: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPost {
    #[serde(default, deserialize_with = "scalar_string")]
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMqtt {
    #[serde(default, deserialize_with = "scalar_string")]
    host: Option<String>,
    #[serde(default)]
    port: Option<u16>,
    #[serde(default, deserialize_with = "scalar_string")]
    username: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    password: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    topic: Option<String>,
    #[serde(default, deserialize_with = "present_or_default")]
    home_assistant: Option<RawHomeAssistant>,
}

#[derive(Debug, Default, Deserialize)]
struct RawHomeAssistant {
    #[serde(default, deserialize_with = "scalar_string")]
    prefix: Option<String>,
}

/// A present key with a null value (`homeAssistant:`) still counts as present.
fn present_or_default<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Some(Option::<T>::deserialize(deserializer)?.unwrap_or_default()))
}

/// Accept unquoted numbers and booleans where a string is expected.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        _ => Err(de::Error::custom("expected a string")),
    }
}

/// Convert the group under `key`. A null group is present with default fields.
fn group<T>(root: &Mapping, key: &str) -> Result<Option<T>, ConfigError>
where
    T: DeserializeOwned + Default,
{
    match root.get(key) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(T::default())),
        Some(value) => serde_yaml::from_value(value.clone())
            .map(Some)
            .map_err(|e| ConfigError::InvalidDocument(format!("{key}: {e}"))),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn require_credential(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
    non_empty(value).ok_or(ConfigError::MissingCredential { field })
}

fn validate_mqtt(raw: RawMqtt) -> Result<MqttOutput, ConfigError> {
    let host = non_empty(raw.host).ok_or(ConfigError::MissingMqttHost)?;

    if raw.topic.as_deref() == Some("") {
        tracing::warn!("Ignoring empty mqttOutput.topic");
    }
    let topic = non_empty(raw.topic);
    let home_assistant = raw.home_assistant.map(|ha| HomeAssistant { prefix: ha.prefix });
    if topic.is_none() && home_assistant.is_none() {
        return Err(ConfigError::MissingMqttDestination);
    }

    Ok(MqttOutput {
        host,
        port: raw.port,
        username: raw.username,
        password: raw.password,
        topic,
        home_assistant,
    })
}

/// A `postOutput` that is not a group carries no URL.
fn post_output(root: &Mapping) -> Result<Option<PostOutput>, ConfigError> {
    match root.get("postOutput") {
        Some(value) if !value.is_mapping() && !value.is_null() => {
            tracing::warn!("Ignoring postOutput because it is not a group with a url");
            Ok(Some(PostOutput::default()))
        }
        _ => Ok(group::<RawPost>(root, "postOutput")?.map(|post| PostOutput { url: post.url })),
    }
}

fn validate_interval(minutes: Option<Value>) -> Result<u64, ConfigError> {
    let number = match minutes {
        None | Some(Value::Null) => return Ok(DEFAULT_INTERVAL_MINUTES),
        Some(Value::Number(n)) => n,
        Some(_) => {
            return Err(ConfigError::InvalidDocument(
                "collector.intervalMinutes: expected a whole number of minutes".to_string(),
            ))
        }
    };
    match (number.as_u64(), number.as_i64()) {
        (Some(m), _) if m >= 1 => Ok(m),
        (_, Some(m)) => Err(ConfigError::InvalidInterval(m)),
        _ => Err(ConfigError::InvalidDocument(format!(
            "collector.intervalMinutes: expected a whole number of minutes, got {number}"
        ))),
    }
}

/// Check the merged document and convert it into a [`Config`].
pub fn validate(merged: &Value) -> Result<Config, ConfigError> {
    let root = merged.as_mapping().ok_or_else(|| {
        ConfigError::InvalidDocument("expected a mapping at the top level".to_string())
    })?;

    let collector = group::<RawCollector>(root, "collector")?.unwrap_or_default();
    let user = require_credential(collector.user, "collector.user")?;
    let password = require_credential(collector.password, "collector.password")?;

    let mqtt_output = group::<RawMqtt>(root, "mqttOutput")?.map(validate_mqtt).transpose()?;

    let http_output = root.contains_key("httpOutput").then_some(HttpOutput);
    let post_output = post_output(root)?;
    let has_post_url =
        post_output.as_ref().and_then(|p| p.url.as_deref()).is_some_and(|u| !u.is_empty());
    if http_output.is_none() && !has_post_url {
        return Err(ConfigError::MissingOutputSink);
    }

    let interval_minutes = validate_interval(collector.interval_minutes)?;

    Ok(Config::new(ConfigDocument {
        collector: Collector { user, password, interval_minutes },
        http_output,
        post_output,
        mqtt_output,
    }))
}
