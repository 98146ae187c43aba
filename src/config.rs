//! Run configuration and host paths.
//!
//! Both values are derived once at startup and passed explicitly into every
//! component that needs them; nothing here is mutated after creation.

use std::path::PathBuf;

use crate::cli::Cli;

/// Immutable per-run configuration derived from the CLI.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Whether severity color markers are enabled.
    pub color_enabled: bool,
    /// Bypass automated probing for remediation decisions; every candidate
    /// gets an explicit confirmation prompt instead.
    pub ignore_checks: bool,
    /// Skip the Remediate stage's sub-steps entirely.
    pub skip_prerequisites: bool,
}

impl RunConfig {
    /// Derive the configuration from parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            color_enabled: !cli.nocolor,
            ignore_checks: cli.ignorechecks,
            skip_prerequisites: cli.skipprereq,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            color_enabled: true,
            ignore_checks: false,
            skip_prerequisites: false,
        }
    }
}

/// Filesystem locations used as idempotency markers.
///
/// The prefix directory is the isolated runtime environment for the
/// Windows-targeted binary; the app directory inside it marks "already
/// installed". Both are read back on every run.
#[derive(Debug, Clone)]
pub struct HostPaths {
    /// Wine prefix directory.
    pub prefix_dir: PathBuf,
    /// Installed application files, inside the prefix's drive_c.
    pub app_dir: PathBuf,
    /// Source payload the application files are copied from.
    pub app_source: PathBuf,
}

impl HostPaths {
    /// Discover paths from the environment.
    ///
    /// `DRYDOCK_PREFIX` and `DRYDOCK_APP_SOURCE` override the defaults.
    pub fn discover() -> Self {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/"));

        let prefix_dir = std::env::var_os("DRYDOCK_PREFIX")
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".drydock/prefix"));

        let app_source = std::env::var_os("DRYDOCK_APP_SOURCE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/opt/drydock/app"));

        Self::rooted_at(prefix_dir, app_source)
    }

    /// Build paths from an explicit prefix root (used by tests).
    pub fn rooted_at(prefix_dir: PathBuf, app_source: PathBuf) -> Self {
        let app_dir = prefix_dir.join("drive_c/Program Files/Ledger");
        Self {
            prefix_dir,
            app_dir,
            app_source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn config_reflects_flags() {
        let cli = Cli::parse_from(["drydock", "--nocolor", "--ignorechecks"]);
        let config = RunConfig::from_cli(&cli);
        assert!(!config.color_enabled);
        assert!(config.ignore_checks);
        assert!(!config.skip_prerequisites);
    }

    #[test]
    fn config_defaults() {
        let cli = Cli::parse_from(["drydock"]);
        let config = RunConfig::from_cli(&cli);
        assert!(config.color_enabled);
        assert!(!config.ignore_checks);
        assert!(!config.skip_prerequisites);
    }

    #[test]
    fn app_dir_lives_inside_prefix() {
        let paths = HostPaths::rooted_at(PathBuf::from("/tmp/prefix"), PathBuf::from("/src"));
        assert!(paths.app_dir.starts_with(&paths.prefix_dir));
        assert!(paths.app_dir.ends_with("Program Files/Ledger"));
    }
}
