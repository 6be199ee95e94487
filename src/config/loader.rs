use crate::config::decode::{self, DecodeError};
use crate::config::defaults;
use crate::config::inputs::Config;
use crate::config::migrate;
use std::path::Path;

/// Sink for operator-facing warnings raised while loading.
pub(crate) trait Reporter {
    fn warn(&self, msg: &str);
}

impl<'a, T: Reporter + ?Sized> Reporter for &'a T {
    fn warn(&self, msg: &str) {
        (**self).warn(msg)
    }
}

/// Reporter forwarding warnings to the process logger.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LogReporter;

impl Reporter for LogReporter {
    fn warn(&self, msg: &str) {
        warn!(target: "config", "{}", msg);
    }
}

/// Configuration loader.
///
/// Loading decodes the document, migrates obsolete sections and then
/// fills unset fields from the supplied defaults.
#[derive(Debug)]
pub(crate) struct Loader<R = LogReporter> {
    reporter: R,
}

impl Loader<LogReporter> {
    pub(crate) fn new() -> Self {
        Self::with_reporter(LogReporter)
    }
}

impl<R: Reporter> Loader<R> {
    pub(crate) fn with_reporter(reporter: R) -> Self {
        Self { reporter }
    }

    /// Load configuration from `path`, using `defaults` for unset fields.
    ///
    /// A document which cannot be read or decoded is an error, and no
    /// migration or defaulting is attempted on it.
    pub(crate) fn load(&self, path: &Path, defaults: &Config) -> Result<Config, DecodeError> {
        let doc = decode::decode_file(path)?;
        for key in &doc.unknown_keys {
            self.reporter.warn(&format!("ignoring unknown config key '{}'", key));
        }
        let cfg = self.migrate(doc.config);
        Ok(defaults::apply_defaults(cfg, defaults))
    }

    /// Rewrite obsolete sections into their current format.
    pub(crate) fn migrate(&self, cfg: Config) -> Config {
        migrate::migrate_sensu_checks(cfg, &self.reporter)
    }
}
