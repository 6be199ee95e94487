//! Default configuration values.

use crate::config::inputs::{Config, ConnectionConfig};
use std::time::Duration;

/// Default remote API endpoint.
static DEFAULT_APIBASE: &str = "http://localhost:7070";

/// Default agent state directory.
static DEFAULT_ROOT: &str = "/var/lib/hostagent";

/// Default PID file location.
static DEFAULT_PIDFILE: &str = "/var/run/hostagent.pid";

/// Default delay between buffer dequeues, in seconds.
const DEFAULT_DEQUEUE_DELAY_SECS: u64 = 30;

/// Default delay before retrying a failed delivery, in seconds.
const DEFAULT_RETRY_DELAY_SECS: u64 = 30;

/// Default maximum number of retries for a failed delivery.
const DEFAULT_RETRY_MAX: i64 = 60;

/// Default size of the delivery buffer (six hours at one post per minute).
const DEFAULT_BUFFER_SIZE: i64 = 6 * 60;

/// Built-in defaults for the agent.
pub(crate) fn builtin() -> Config {
    Config {
        apibase: String::from(DEFAULT_APIBASE),
        root: String::from(DEFAULT_ROOT),
        pidfile: String::from(DEFAULT_PIDFILE),
        verbose: false,
        connection: ConnectionConfig {
            metrics_dequeue_delay: Duration::from_secs(DEFAULT_DEQUEUE_DELAY_SECS),
            metrics_retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
            metrics_retry_max: DEFAULT_RETRY_MAX,
            metrics_buffer_size: DEFAULT_BUFFER_SIZE,
        },
        ..Config::default()
    }
}

/// Fill zero-valued fields of `cfg` from `defaults`.
///
/// Only `apibase`, `root`, `pidfile`, `verbose` and the `connection`
/// settings are defaulted. A `false` verbose flag cannot be told apart
/// from a missing one, so it is always replaced by the default.
pub(crate) fn apply_defaults(mut cfg: Config, defaults: &Config) -> Config {
    if cfg.apibase.is_empty() {
        cfg.apibase = defaults.apibase.clone();
    }
    if cfg.root.is_empty() {
        cfg.root = defaults.root.clone();
    }
    if cfg.pidfile.is_empty() {
        cfg.pidfile = defaults.pidfile.clone();
    }
    if !cfg.verbose {
        cfg.verbose = defaults.verbose;
    }

    let conn = &mut cfg.connection;
    let fallback = &defaults.connection;
    if conn.metrics_dequeue_delay == Duration::from_secs(0) {
        conn.metrics_dequeue_delay = fallback.metrics_dequeue_delay;
    }
    if conn.metrics_retry_delay == Duration::from_secs(0) {
        conn.metrics_retry_delay = fallback.metrics_retry_delay;
    }
    if conn.metrics_retry_max == 0 {
        conn.metrics_retry_max = fallback.metrics_retry_max;
    }
    if conn.metrics_buffer_size == 0 {
        conn.metrics_buffer_size = fallback.metrics_buffer_size;
    }

    cfg
}
