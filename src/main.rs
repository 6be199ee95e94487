//! hostagent: on-host metrics and check agent.
//!
//! This binary is the startup path of the agent: it loads the agent
//! configuration from a TOML document, migrating obsolete sections and
//! filling unset options from built-in defaults, and applies
//! command-line overrides on top of it.
//!
//! The resulting configuration is a read-only snapshot handed to the
//! metrics, plugin and transport subsystems.

extern crate env_logger;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;
extern crate structopt;
extern crate toml;

mod cli;
mod config;

use crate::cli::CliOptions;
use failure::{Fallible, ResultExt};
use structopt::StructOpt;

fn main() -> Fallible<()> {
    env_logger::Builder::from_default_env().try_init()?;
    let opts = CliOptions::from_args();
    info!("starting hostagent");

    let defaults = config::builtin_defaults();
    trace!("reading configuration from {:?}", opts.conf);
    let cfg = config::load(&opts.conf, &defaults).context(format!(
        "failed to load configuration from '{}'",
        opts.conf.display()
    ))?;
    let cfg = opts.apply_overrides(cfg);

    let dump = serde_json::to_string_pretty(&cfg.redacted())?;
    debug!("Runtime configuration:\n{}", dump);
    if opts.print_config {
        println!("{}", dump);
    }

    info!(
        "configuration loaded from '{}' ({} plugin namespaces)",
        cfg.conffile,
        cfg.plugin.as_ref().map_or(0, |p| p.len())
    );
    Ok(())
}
