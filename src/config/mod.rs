//! Agent configuration.
//!
//! This module contains logic and data structures to read the agent
//! configuration document into a single configuration structure.
//! No semantic validation is done here, only config sourcing.
//!
//! Loading happens in three steps:
//!  * Decoding: the TOML document is decoded, unset fields stay zero-valued.
//!  * Migration: obsolete sections are rewritten into the current format.
//!  * Defaulting: zero-valued fields are filled from caller-supplied defaults.

mod decode;
mod defaults;
mod duration;
mod inputs;
mod loader;
mod migrate;

pub(crate) use crate::config::decode::DecodeError;
pub(crate) use crate::config::defaults::builtin as builtin_defaults;
pub(crate) use crate::config::inputs::Config;
pub(crate) use crate::config::loader::Loader;

use std::path::Path;

/// Load configuration from `path`, reporting warnings to the process logger.
pub(crate) fn load(path: &Path, defaults: &Config) -> Result<Config, DecodeError> {
    Loader::new().load(path, defaults)
}
