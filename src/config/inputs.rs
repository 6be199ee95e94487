use crate::config::duration;
use std::collections::BTreeMap;
use std::time::Duration;

/// Placeholder shown instead of the API key in logs and dumps.
static REDACTED: &str = "<redacted>";

/// Top-level keys understood in configuration documents.
pub(crate) static CONFIG_KEYS: &[&str] = &[
    "apibase", "Apibase", "APIBase", "apikey", "Apikey", "APIKey", "root", "Root", "pidfile",
    "Pidfile", "PIDFile", "roles", "Roles", "verbose", "Verbose", "connection", "Connection",
    "plugin", "Plugin", "sensu", "Sensu",
];

/// Keys understood in the `[connection]` table.
pub(crate) static CONNECTION_KEYS: &[&str] = &[
    "metrics_dequeue_delay",
    "Metrics_Dequeue_Delay",
    "metrics_retry_delay",
    "Metrics_Retry_Delay",
    "metrics_retry_max",
    "Metrics_Retry_Max",
    "metrics_buffer_size",
    "Metrics_Buffer_Size",
];

/// Plugin commands within a single namespace, keyed by plugin name.
pub(crate) type PluginConfigs = BTreeMap<String, PluginConfig>;

/// Agent configuration, as decoded from the configuration document.
///
/// Fields missing from the document are left at their zero value;
/// filling them is the job of the defaults overlay.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub(crate) struct Config {
    /// Base URL of the remote API.
    #[serde(alias = "Apibase", alias = "APIBase")]
    pub(crate) apibase: String,
    /// Credential for the remote API (no default).
    #[serde(alias = "Apikey", alias = "APIKey")]
    pub(crate) apikey: String,
    /// Agent state directory.
    #[serde(alias = "Root")]
    pub(crate) root: String,
    #[serde(alias = "Pidfile", alias = "PIDFile")]
    pub(crate) pidfile: String,
    /// Path the configuration was loaded from, filled by the caller.
    #[serde(skip_deserializing)]
    pub(crate) conffile: String,
    #[serde(alias = "Roles")]
    pub(crate) roles: Vec<String>,
    #[serde(alias = "Verbose")]
    pub(crate) verbose: bool,
    #[serde(alias = "Connection")]
    pub(crate) connection: ConnectionConfig,
    /// Plugin commands, keyed by namespace (e.g. `metrics`).
    #[serde(alias = "Plugin")]
    pub(crate) plugin: Option<BTreeMap<String, PluginConfigs>>,
    /// Obsolete `[sensu.*]` section, superseded by `[plugin.*]`.
    #[serde(
        rename = "sensu",
        alias = "Sensu",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) deprecated_sensu: Option<BTreeMap<String, PluginConfigs>>,
}

impl Config {
    /// Return a copy suitable for logging, with the API key masked.
    pub(crate) fn redacted(&self) -> Self {
        let mut cfg = self.clone();
        if !cfg.apikey.is_empty() {
            cfg.apikey = String::from(REDACTED);
        }
        cfg
    }
}

/// A single plugin entry.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub(crate) struct PluginConfig {
    /// Shell command executed to collect a metric or run a check.
    #[serde(alias = "Command")]
    pub(crate) command: String,
}

/// Tuning for outbound metrics delivery.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub(crate) struct ConnectionConfig {
    /// Delay between buffer dequeues.
    #[serde(alias = "Metrics_Dequeue_Delay", with = "duration")]
    pub(crate) metrics_dequeue_delay: Duration,
    /// Delay before retrying a failed delivery.
    #[serde(alias = "Metrics_Retry_Delay", with = "duration")]
    pub(crate) metrics_retry_delay: Duration,
    /// Maximum number of retries for a failed delivery.
    #[serde(alias = "Metrics_Retry_Max")]
    pub(crate) metrics_retry_max: i64,
    /// Maximum number of queued, undelivered requests.
    #[serde(alias = "Metrics_Buffer_Size")]
    pub(crate) metrics_buffer_size: i64,
}
