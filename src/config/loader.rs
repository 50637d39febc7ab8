//! Config file loading

use super::error::ConfigError;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Where the service expects its configuration.
pub const DEFAULT_CONFIG_PATH: &str = "/config/config.yml";

/// Read `path` and parse it into a loosely typed document tree.
///
/// An empty file is an empty mapping. Any read or parse failure, or a root
/// that is not a mapping, is reported as [`ConfigError::ConfigNotFound`].
pub fn read_document(path: &Path) -> Result<Value, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::not_found(path, e))?;
    tracing::debug!("Read {} bytes from {}", content.len(), path.display());
    if content.trim().is_empty() {
        return Ok(Value::Mapping(Mapping::new()));
    }

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    let parsed = match ext.as_str() {
        "toml" => parse_toml_document(&content),
        _ => parse_yaml_document(&content),
    }
    .map_err(|reason| ConfigError::not_found(path, reason))?;

    match parsed {
        Value::Null => Ok(Value::Mapping(Mapping::new())),
        Value::Mapping(map) => Ok(normalize_legacy_keys(map)),
        other => Err(ConfigError::not_found(
            path,
            format!("expected a mapping at the top level, found {}", kind(&other)),
        )),
    }
}

fn parse_yaml_document(content: &str) -> Result<Value, String> {
    serde_yaml::from_str(content).map_err(|e| format!("Invalid YAML syntax: {e}"))
}

/// TOML documents are converted into the same tree the YAML path produces.
fn parse_toml_document(content: &str) -> Result<Value, String> {
    let raw: toml::Value = toml::from_str(content).map_err(|e| format!("Invalid TOML syntax: {e}"))?;
    serde_yaml::to_value(raw).map_err(|e| format!("Unsupported TOML value: {e}"))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Rewrite the key names used by earlier releases of the service.
///
/// Canonical keys win when a document carries both spellings.
pub fn normalize_legacy_keys(mut root: Mapping) -> Value {
    rename_key(&mut root, "xfinity", "collector");
    rename_key(&mut root, "http", "httpOutput");
    rename_key(&mut root, "post", "postOutput");
    rename_key(&mut root, "mqtt", "mqttOutput");

    if let Some(Value::Mapping(collector)) = root.get_mut("collector") {
        rename_key(collector, "interval", "intervalMinutes");
    }
    if let Some(Value::Mapping(mqtt)) = root.get_mut("mqttOutput") {
        rename_key(mqtt, "homeassistant", "homeAssistant");
    }

    Value::Mapping(root)
}

fn rename_key(map: &mut Mapping, legacy: &str, canonical: &str) {
    let Some(value) = map.remove(legacy) else {
        return;
    };
    if map.contains_key(canonical) {
        tracing::warn!("Ignoring legacy config key '{}' because '{}' is also set", legacy, canonical);
        return;
    }
    tracing::debug!("Renaming legacy config key '{}' to '{}'", legacy, canonical);
    map.insert(Value::from(canonical), value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn yaml(src: &str) -> Value {
        serde_yaml::from_str(src).expect("yaml")
    }

    #[test]
    fn missing_file_is_config_not_found() {
        let tmp = TempDir::new().expect("tmp");
        let err = read_document(&tmp.path().join("config.yml")).expect_err("missing file");
        assert!(matches!(err, ConfigError::ConfigNotFound { .. }), "{err:?}");
    }

    #[test]
    fn broken_yaml_is_config_not_found() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("config.yml");
        fs::write(&path, "collector:\n  user: [unterminated\n").expect("write");

        let err = read_document(&path).expect_err("parse failure");
        assert!(matches!(err, ConfigError::ConfigNotFound { .. }), "{err:?}");
    }

    #[test]
    fn scalar_root_is_config_not_found() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("config.yml");
        fs::write(&path, "just a string\n").expect("write");

        let err = read_document(&path).expect_err("scalar root");
        assert!(err.to_string().contains("a string"), "{err}");
    }

    #[test]
    fn empty_file_is_an_empty_mapping() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("config.yml");
        fs::write(&path, "").expect("write");

        let doc = read_document(&path).expect("empty doc");
        assert_eq!(doc, Value::Mapping(Mapping::new()));
    }

    #[test]
    fn toml_documents_use_the_same_tree() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[collector]\nuser = \"u\"\nintervalMinutes = 5\n\n[httpOutput]\n")
            .expect("write");

        let doc = read_document(&path).expect("toml doc");
        assert_eq!(doc["collector"]["user"], Value::from("u"));
        assert_eq!(doc["collector"]["intervalMinutes"], Value::from(5));
        assert!(doc.as_mapping().expect("mapping").contains_key("httpOutput"));
    }

    #[test]
    fn legacy_keys_are_renamed() {
        let Value::Mapping(raw) = yaml(
            "xfinity:\n  user: u\n  interval: 10\nhttp:\nmqtt:\n  host: h\n  homeassistant:\n",
        ) else {
            panic!("mapping");
        };

        let doc = normalize_legacy_keys(raw);
        assert_eq!(
            doc,
            yaml("collector:\n  user: u\n  intervalMinutes: 10\nhttpOutput:\nmqttOutput:\n  host: h\n  homeAssistant:\n")
        );
    }

    #[test]
    fn canonical_key_wins_over_legacy() {
        let Value::Mapping(raw) = yaml("post:\n  url: http://old\npostOutput:\n  url: http://new\n")
        else {
            panic!("mapping");
        };

        let doc = normalize_legacy_keys(raw);
        assert_eq!(doc["postOutput"]["url"], Value::from("http://new"));
        assert!(!doc.as_mapping().expect("mapping").contains_key("post"));
    }
}
