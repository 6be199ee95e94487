//! Command-line options.

use crate::config::Config;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "hostagent", about = "On-host metrics and check agent.")]
pub(crate) struct CliOptions {
    /// Configuration file path.
    #[structopt(
        long = "conf",
        default_value = "/etc/hostagent/hostagent.conf",
        parse(from_os_str)
    )]
    pub(crate) conf: PathBuf,
    /// Remote API base URL.
    #[structopt(long = "apibase")]
    pub(crate) apibase: Option<String>,
    /// Remote API key.
    #[structopt(long = "apikey")]
    pub(crate) apikey: Option<String>,
    /// PID file path.
    #[structopt(long = "pidfile")]
    pub(crate) pidfile: Option<String>,
    /// Agent state directory.
    #[structopt(long = "root")]
    pub(crate) root: Option<String>,
    /// Role for this host, may be repeated.
    #[structopt(long = "role")]
    pub(crate) roles: Vec<String>,
    /// Enable verbose mode.
    #[structopt(short = "v", long = "verbose")]
    pub(crate) verbose: bool,
    /// Print the effective configuration as JSON.
    #[structopt(long = "print-config")]
    pub(crate) print_config: bool,
}

impl CliOptions {
    /// Apply command-line overrides on top of a loaded configuration.
    ///
    /// Empty flag values are ignored. `conffile` is always set to the
    /// path the configuration was loaded from.
    pub(crate) fn apply_overrides(&self, mut cfg: Config) -> Config {
        let overrides = vec![
            (&self.apibase, &mut cfg.apibase),
            (&self.apikey, &mut cfg.apikey),
            (&self.pidfile, &mut cfg.pidfile),
            (&self.root, &mut cfg.root),
        ];
        for (flag, field) in overrides {
            if let Some(value) = flag.as_ref().filter(|v| !v.is_empty()) {
                *field = value.clone();
            }
        }

        if !self.roles.is_empty() {
            cfg.roles = self.roles.clone();
        }
        if self.verbose {
            cfg.verbose = true;
        }
        cfg.conffile = self.conf.display().to_string();

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static DEFAULT_CONFFILE: &str = "/etc/hostagent/hostagent.conf";

    fn parse(args: &[&str]) -> CliOptions {
        let mut argv = vec!["hostagent"];
        argv.extend_from_slice(args);
        CliOptions::from_iter(argv)
    }

    #[test]
    fn defaults_without_flags() {
        let opts = parse(&[]);
        assert_eq!(opts.conf, PathBuf::from(DEFAULT_CONFFILE));
        assert_eq!(opts.apibase, None);
        assert!(opts.roles.is_empty());
        assert!(!opts.verbose);
        assert!(!opts.print_config);
    }

    #[test]
    fn flags_override_document() {
        let opts = parse(&[
            "--conf",
            "/tmp/agent.conf",
            "--apibase",
            "https://flag.example.com",
            "--apikey",
            "flagkey",
            "--role",
            "web",
            "--role",
            "db",
            "-v",
        ]);
        let cfg = Config {
            apibase: "https://doc.example.com".to_string(),
            apikey: "dockey".to_string(),
            root: "/srv/agent".to_string(),
            roles: vec!["batch".to_string()],
            ..Config::default()
        };

        let cfg = opts.apply_overrides(cfg);
        assert_eq!(cfg.apibase, "https://flag.example.com");
        assert_eq!(cfg.apikey, "flagkey");
        assert_eq!(cfg.root, "/srv/agent");
        assert_eq!(cfg.roles, vec!["web", "db"]);
        assert!(cfg.verbose);
        assert_eq!(cfg.conffile, "/tmp/agent.conf");
    }

    #[test]
    fn empty_flags_are_ignored() {
        let opts = parse(&["--pidfile", "", "--root", ""]);
        let cfg = Config {
            pidfile: "/run/agent.pid".to_string(),
            root: "/srv/agent".to_string(),
            verbose: true,
            ..Config::default()
        };

        let cfg = opts.apply_overrides(cfg);
        assert_eq!(cfg.pidfile, "/run/agent.pid");
        assert_eq!(cfg.root, "/srv/agent");
        assert!(cfg.verbose);
        assert_eq!(cfg.conffile, DEFAULT_CONFFILE);
    }
}
