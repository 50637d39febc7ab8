//! Built-in default document

use crate::domain::DEFAULT_INTERVAL_MINUTES;
use once_cell::sync::Lazy;
use serde_yaml::{Mapping, Value};

/// Values every on-disk document is merged over.
pub static DEFAULT_DOCUMENT: Lazy<Value> = Lazy::new(|| {
    let mut collector = Mapping::new();
    collector.insert(Value::from("intervalMinutes"), Value::from(DEFAULT_INTERVAL_MINUTES));

    let mut root = Mapping::new();
    root.insert(Value::from("collector"), Value::Mapping(collector));
    Value::Mapping(root)
});
