//! Sink-routing configuration and its canonical persisted form.
//!
//! [`TargetsConfig`] is owned by each multiplexer instance — there is no
//! process-wide configuration. It serializes to a flat key/value JSON
//! blob (every value a string) that the [`ConfigStore`] collaborator
//! persists opaquely, and it is rebuilt from the store at setup with the
//! power-on defaults for absent keys.

use serde::{Deserialize, Serialize};

use crate::sinks::ConfigStore;
use crate::types::Severity;

/// Default port for the HTTP log collector.
pub const DEFAULT_HTTP_PORT: u16 = 5076;

/// Publish-channel (MQTT-style) sink settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishConfig {
    pub enabled: bool,
    pub topic: String,
}

/// HTTP POST sink settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub enabled: bool,
    pub addr: String,
    pub port: u16,
    /// URL fragment; the request path is `/<url>/<system name>/`.
    pub url: String,
}

/// Device serial bridge settings.
///
/// The primary output itself is unconditional; these fields select the
/// serial channel the host bridge attaches to and are persisted for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    pub enabled: bool,
    pub port: u32,
}

/// Command-channel sink settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandConfig {
    pub enabled: bool,
}

/// The full routing configuration owned by a multiplexer instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetsConfig {
    /// Lines with severity above this value are not collected.
    pub threshold: Severity,
    pub publish: PublishConfig,
    pub http: HttpConfig,
    pub serial: SerialConfig,
    pub command: CommandConfig,
}

impl Default for TargetsConfig {
    /// Power-on defaults: serial bridge on, everything else off, SILENT
    /// threshold (no structured dispatch).
    fn default() -> Self {
        Self {
            threshold: Severity::Silent,
            publish: PublishConfig {
                enabled: false,
                topic: String::new(),
            },
            http: HttpConfig {
                enabled: false,
                addr: String::new(),
                port: DEFAULT_HTTP_PORT,
                url: String::new(),
            },
            serial: SerialConfig {
                enabled: true,
                port: 0,
            },
            command: CommandConfig { enabled: false },
        }
    }
}

/// Canonical persisted form. Key order is the field order below; every
/// value is serialized as a string so stores can treat the blob as
/// opaque text.
#[derive(Debug, Serialize, Deserialize)]
struct CanonicalForm {
    #[serde(rename = "LogLevel")]
    log_level: String,
    #[serde(rename = "MQTTFlag")]
    mqtt_flag: String,
    #[serde(rename = "MQTTTopic")]
    mqtt_topic: String,
    #[serde(rename = "HTTPFlag")]
    http_flag: String,
    #[serde(rename = "HTTPAddr")]
    http_addr: String,
    #[serde(rename = "HTTPPort")]
    http_port: String,
    #[serde(rename = "HTTPUrl")]
    http_url: String,
    #[serde(rename = "SerialFlag")]
    serial_flag: String,
    #[serde(rename = "SerialPort")]
    serial_port: String,
    #[serde(rename = "CmdSerial")]
    cmd_serial: String,
}

fn flag(on: bool) -> String {
    if on { "1" } else { "0" }.to_string()
}

impl TargetsConfig {
    /// Serialize to the canonical blob handed to the [`ConfigStore`].
    pub fn canonical(&self) -> String {
        let form = CanonicalForm {
            log_level: self.threshold.code().to_string(),
            mqtt_flag: flag(self.publish.enabled),
            mqtt_topic: self.publish.topic.clone(),
            http_flag: flag(self.http.enabled),
            http_addr: self.http.addr.clone(),
            http_port: self.http.port.to_string(),
            http_url: self.http.url.clone(),
            serial_flag: flag(self.serial.enabled),
            serial_port: self.serial.port.to_string(),
            cmd_serial: flag(self.command.enabled),
        };
        serde_json::to_string(&form).expect("canonical form is plain strings")
    }

    /// Populate from the store, defaulting absent fields.
    pub fn from_store(store: &dyn ConfigStore) -> Self {
        Self {
            threshold: Severity::from_code(store.get_long("LogLevel", 0)),
            publish: PublishConfig {
                enabled: store.get_long("MQTTFlag", 0) != 0,
                topic: store.get_string("MQTTTopic", ""),
            },
            http: HttpConfig {
                enabled: store.get_long("HTTPFlag", 0) != 0,
                addr: store.get_string("HTTPAddr", ""),
                port: store.get_long("HTTPPort", DEFAULT_HTTP_PORT as i64) as u16,
                url: store.get_string("HTTPUrl", ""),
            },
            serial: SerialConfig {
                enabled: store.get_long("SerialFlag", 1) != 0,
                port: store.get_long("SerialPort", 0) as u32,
            },
            command: CommandConfig {
                enabled: store.get_long("CmdSerial", 0) != 0,
            },
        }
    }
}
