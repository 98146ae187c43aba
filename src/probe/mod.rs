//! Read-only capability detection.
//!
//! `CapabilityProbe` inspects the host and produces a fresh
//! [`StateReport`] snapshot: tool reachability, self-reported versions
//! checked against each capability's minimum, and live running state for
//! the process-like capabilities. Probing never mutates the host, so it is
//! safe to call at any point, any number of times.

use crate::capability::{
    CapabilityId, CapabilityState, StateReport, DB_CONTAINER_NAME, DSN_NAME,
};
use crate::config::HostPaths;
use crate::host::{extract_version, HostRunner};
use crate::version::at_least;

/// Version self-report command and extraction pattern for a tool.
struct ToolProbe {
    program: &'static str,
    args: &'static [&'static str],
    pattern: &'static str,
}

const BREW_PROBE: ToolProbe = ToolProbe {
    program: "brew",
    args: &["--version"],
    pattern: r"Homebrew ([\d.]+)",
};

const WINE_PROBE: ToolProbe = ToolProbe {
    program: "wine",
    args: &["--version"],
    pattern: r"wine-([\d.]+)",
};

const DOCKER_PROBE: ToolProbe = ToolProbe {
    program: "docker",
    args: &["--version"],
    pattern: r"Docker version ([\d.]+)",
};

/// Probes host state per capability.
pub struct CapabilityProbe<'a> {
    host: &'a dyn HostRunner,
    paths: &'a HostPaths,
}

impl<'a> CapabilityProbe<'a> {
    pub fn new(host: &'a dyn HostRunner, paths: &'a HostPaths) -> Self {
        Self { host, paths }
    }

    /// Probe every capability, yielding a fresh snapshot.
    pub fn probe_all(&self) -> StateReport {
        let mut report = StateReport::new();
        for def in crate::capability::CAPABILITIES {
            report.insert(def.id, self.probe_one(def.id));
        }
        report
    }

    /// Probe a single capability.
    pub fn probe_one(&self, id: CapabilityId) -> CapabilityState {
        let state = match id {
            CapabilityId::PackageManager => self.probe_tool(&BREW_PROBE, None),
            CapabilityId::CompatRuntime => {
                self.probe_tool(&WINE_PROBE, crate::capability::lookup(id).min_version)
            }
            CapabilityId::DbDriver => self.probe_db_driver(),
            CapabilityId::ContainerEngine => self.probe_container_engine(),
            CapabilityId::RuntimePrefix => self.probe_path(&self.paths.prefix_dir),
            CapabilityId::DbContainer => self.probe_db_container(),
            CapabilityId::DsnRegistration => self.probe_dsn(),
            CapabilityId::AppFiles => self.probe_path(&self.paths.app_dir),
        };
        tracing::debug!(capability = %id, ?state, "probed");
        state
    }

    /// Probe a versioned tool: reachability, then version against minimum.
    fn probe_tool(&self, probe: &ToolProbe, min_version: Option<&str>) -> CapabilityState {
        let output = match self.host.run_capture(probe.program, probe.args) {
            Ok(output) if output.success() => output,
            // Spawn failure or non-zero self-report both mean absent.
            _ => return CapabilityState::missing(),
        };

        let version = extract_version(&output.stdout, probe.pattern);
        match min_version {
            Some(min) => {
                // An unextractable version compares below any minimum.
                let detected = version.clone().unwrap_or_default();
                if at_least(&detected, min) {
                    CapabilityState::ok(version)
                } else {
                    CapabilityState::outdated(detected)
                }
            }
            None => CapabilityState::ok(version),
        }
    }

    fn probe_db_driver(&self) -> CapabilityState {
        match self.host.run_capture("odbcinst", &["-q", "-d"]) {
            Ok(output) if output.success() && output.stdout.contains("[FreeTDS]") => {
                CapabilityState::ok(None)
            }
            _ => CapabilityState::missing(),
        }
    }

    fn probe_container_engine(&self) -> CapabilityState {
        let state = self.probe_tool(
            &DOCKER_PROBE,
            crate::capability::lookup(CapabilityId::ContainerEngine).min_version,
        );
        if state.status == crate::capability::CapabilityStatus::Missing {
            return state;
        }

        // The daemon is a live query, independent of the binary's version.
        let running = self
            .host
            .run_capture("docker", &["info"])
            .map(|o| o.success())
            .unwrap_or(false);
        state.with_running(running)
    }

    fn probe_db_container(&self) -> CapabilityState {
        let inspect = self.host.run_capture(
            "docker",
            &[
                "inspect",
                "--format",
                "{{.State.Running}}",
                DB_CONTAINER_NAME,
            ],
        );
        match inspect {
            Ok(output) if output.success() => {
                let running = output.stdout.trim() == "true";
                CapabilityState::ok(None).with_running(running)
            }
            _ => CapabilityState::missing(),
        }
    }

    fn probe_dsn(&self) -> CapabilityState {
        match self.host.run_capture("odbcinst", &["-q", "-s"]) {
            Ok(output)
                if output.success() && output.stdout.contains(&format!("[{}]", DSN_NAME)) =>
            {
                CapabilityState::ok(None)
            }
            _ => CapabilityState::missing(),
        }
    }

    fn probe_path(&self, path: &std::path::Path) -> CapabilityState {
        if self.host.path_exists(path) {
            CapabilityState::ok(None)
        } else {
            CapabilityState::missing()
        }
    }

    /// Auxiliary check: whether the Homebrew cask tap is configured.
    ///
    /// Missing tap is only ever an Advisory problem.
    pub fn cask_tap_present(&self) -> bool {
        self.host
            .run_capture("brew", &["tap"])
            .map(|o| o.success() && o.stdout.contains("homebrew/cask-versions"))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::CapabilityStatus;
    use crate::host::FakeHost;
    use std::path::PathBuf;

    fn paths() -> HostPaths {
        HostPaths::rooted_at(
            PathBuf::from("/fake/prefix"),
            PathBuf::from("/fake/source"),
        )
    }

    fn healthy_host() -> FakeHost {
        let host = FakeHost::new();
        host.set_fixture("brew --version", "Homebrew 4.0.9", 0);
        host.set_fixture("wine --version", "wine-5.3", 0);
        host.set_fixture("docker --version", "Docker version 20.10.17, build 100c701", 0);
        host.set_fixture("docker info", "Server Version: 20.10.17", 0);
        host.set_fixture("odbcinst -q -d", "[FreeTDS]\nDescription=FreeTDS Driver", 0);
        host.set_fixture("odbcinst -q -s", "[drydock]\nDriver=FreeTDS", 0);
        host.set_fixture(
            "docker inspect --format {{.State.Running}} drydock-mssql",
            "true",
            0,
        );
        host
    }

    #[test]
    fn absent_tool_is_missing() {
        let host = FakeHost::new();
        let paths = paths();
        let probe = CapabilityProbe::new(&host, &paths);

        let state = probe.probe_one(CapabilityId::CompatRuntime);
        assert_eq!(state.status, CapabilityStatus::Missing);
        assert!(state.detected_version.is_none());
    }

    #[test]
    fn present_tool_below_minimum_is_outdated() {
        let host = FakeHost::new();
        host.set_fixture("wine --version", "wine-4.9", 0);
        let paths = paths();
        let probe = CapabilityProbe::new(&host, &paths);

        let state = probe.probe_one(CapabilityId::CompatRuntime);
        assert_eq!(state.status, CapabilityStatus::PresentOutdated);
        assert_eq!(state.detected_version.as_deref(), Some("4.9"));
    }

    #[test]
    fn present_tool_at_minimum_is_ok() {
        let host = FakeHost::new();
        host.set_fixture("wine --version", "wine-5.0", 0);
        let paths = paths();
        let probe = CapabilityProbe::new(&host, &paths);

        let state = probe.probe_one(CapabilityId::CompatRuntime);
        assert_eq!(state.status, CapabilityStatus::PresentOk);
    }

    #[test]
    fn unversioned_self_report_counts_as_outdated() {
        let host = FakeHost::new();
        host.set_fixture("wine --version", "mystery build", 0);
        let paths = paths();
        let probe = CapabilityProbe::new(&host, &paths);

        let state = probe.probe_one(CapabilityId::CompatRuntime);
        assert_eq!(state.status, CapabilityStatus::PresentOutdated);
    }

    #[test]
    fn engine_carries_running_state() {
        let host = healthy_host();
        host.set_fixture("docker info", "Cannot connect to the Docker daemon", 1);
        let paths = paths();
        let probe = CapabilityProbe::new(&host, &paths);

        let state = probe.probe_one(CapabilityId::ContainerEngine);
        assert_eq!(state.status, CapabilityStatus::PresentOk);
        assert_eq!(state.running, Some(false));
        assert!(!state.is_satisfied());
    }

    #[test]
    fn container_absent_when_inspect_fails() {
        let host = healthy_host();
        host.set_fixture(
            "docker inspect --format {{.State.Running}} drydock-mssql",
            "Error: No such object: drydock-mssql",
            1,
        );
        let paths = paths();
        let probe = CapabilityProbe::new(&host, &paths);

        let state = probe.probe_one(CapabilityId::DbContainer);
        assert_eq!(state.status, CapabilityStatus::Missing);
    }

    #[test]
    fn container_stopped_is_present_not_running() {
        let host = healthy_host();
        host.set_fixture(
            "docker inspect --format {{.State.Running}} drydock-mssql",
            "false",
            0,
        );
        let paths = paths();
        let probe = CapabilityProbe::new(&host, &paths);

        let state = probe.probe_one(CapabilityId::DbContainer);
        assert_eq!(state.status, CapabilityStatus::PresentOk);
        assert_eq!(state.running, Some(false));
    }

    #[test]
    fn driver_listing_without_freetds_is_missing() {
        let host = FakeHost::new();
        host.set_fixture("odbcinst -q -d", "[PostgreSQL]\n", 0);
        let paths = paths();
        let probe = CapabilityProbe::new(&host, &paths);

        let state = probe.probe_one(CapabilityId::DbDriver);
        assert_eq!(state.status, CapabilityStatus::Missing);
    }

    #[test]
    fn prefix_and_app_files_use_path_markers() {
        let host = FakeHost::new();
        let paths = paths();
        let probe = CapabilityProbe::new(&host, &paths);

        assert_eq!(
            probe.probe_one(CapabilityId::RuntimePrefix).status,
            CapabilityStatus::Missing
        );

        host.add_path(&paths.prefix_dir);
        host.add_path(&paths.app_dir);
        assert_eq!(
            probe.probe_one(CapabilityId::RuntimePrefix).status,
            CapabilityStatus::PresentOk
        );
        assert_eq!(
            probe.probe_one(CapabilityId::AppFiles).status,
            CapabilityStatus::PresentOk
        );
    }

    #[test]
    fn probe_is_idempotent() {
        let host = healthy_host();
        let paths = paths();
        let probe = CapabilityProbe::new(&host, &paths);

        let first = probe.probe_all();
        let second = probe.probe_all();
        assert_eq!(first, second);
    }

    #[test]
    fn probe_all_covers_every_capability() {
        let host = FakeHost::new();
        let paths = paths();
        let probe = CapabilityProbe::new(&host, &paths);

        let report = probe.probe_all();
        for def in crate::capability::CAPABILITIES {
            assert!(report.get(def.id).is_some(), "missing {}", def.id);
        }
    }

    #[test]
    fn cask_tap_detection() {
        let host = FakeHost::new();
        let paths = paths();
        let probe = CapabilityProbe::new(&host, &paths);
        assert!(!probe.cask_tap_present());

        host.set_fixture("brew tap", "homebrew/cask-versions\nhomebrew/core", 0);
        assert!(probe.cask_tap_present());
    }
}
