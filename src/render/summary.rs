//! Startup summary of the active configuration.

use crate::domain::Config;
use std::io::{self, Write};

const HEADER: &str = "-- Config --";
const FOOTER: &str = "--------";

/// Render the summary lines in a fixed order. Inactive outputs are omitted.
pub fn render_summary(config: &Config) -> String {
    let mut lines = vec![
        HEADER.to_string(),
        format!("Collector update every {} mins", config.collector().interval_minutes),
    ];

    if config.uses_http_output() {
        lines.push("Http server will be started".to_string());
    }
    if let Some(url) = config.post_url() {
        lines.push(format!("Will post to {} on new data", url));
    }
    if config.uses_mqtt() {
        if config.uses_mqtt_home_assistant() {
            lines.push("Will publish to MQTT (Home Assistant) on new data".to_string());
        } else {
            lines.push("Will publish to MQTT on new data".to_string());
        }
    }

    lines.push(FOOTER.to_string());
    lines.join("\n")
}

pub fn write_summary<W: Write>(out: &mut W, config: &Config) -> io::Result<()> {
    writeln!(out, "{}", render_summary(config))
}

pub fn print_summary(config: &Config) {
    if let Err(e) = write_summary(&mut io::stderr().lock(), config) {
        tracing::warn!("Failed to write config summary: {}", e);
    }
}
