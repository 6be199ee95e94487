//! Rewriting of obsolete configuration sections.

use crate::config::inputs::{Config, PluginConfigs};
use crate::config::loader::Reporter;

/// Deprecated section holding check commands (`[sensu.checks.*]`).
static SENSU_CHECKS: &str = "checks";

/// Plugin namespace receiving migrated checks (`[plugin.metrics.*]`).
static METRICS_NAMESPACE: &str = "metrics";

/// Name prefix marking migrated entries, so they cannot collide
/// with plugins defined in the current format.
static SENSU_PREFIX: &str = "DEPRECATED-sensu-";

/// Move `sensu.checks.*` entries into `plugin.metrics.*`.
///
/// Each check `<name>` becomes the metrics plugin `DEPRECATED-sensu-<name>`,
/// and a single deprecation warning is reported. The migrated section is
/// removed, so a second pass over the same config is a no-op.
pub(crate) fn migrate_sensu_checks(mut cfg: Config, reporter: &dyn Reporter) -> Config {
    let checks = match cfg
        .deprecated_sensu
        .as_mut()
        .and_then(|sensu| sensu.remove(SENSU_CHECKS))
    {
        Some(checks) => checks,
        None => return cfg,
    };
    if cfg.deprecated_sensu.as_ref().map_or(false, |s| s.is_empty()) {
        cfg.deprecated_sensu = None;
    }

    reporter.warn(
        "'sensu.checks.*' config format is DEPRECATED. Please use 'plugin.metrics.*' format.",
    );

    let metrics = cfg
        .plugin
        .get_or_insert_with(Default::default)
        .entry(METRICS_NAMESPACE.to_string())
        .or_insert_with(PluginConfigs::new);
    for (name, plugin) in checks {
        metrics.insert(format!("{}{}", SENSU_PREFIX, name), plugin);
    }

    cfg
}
