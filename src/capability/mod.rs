//! The capability registry and probe result types.
//!
//! A [`Capability`](CapabilityDef) is one external dependency the target
//! application needs before it can run: a tool on PATH, a filesystem
//! artefact, or a process-like resource (the container engine daemon, the
//! database container). Definitions are immutable and compiled in; every
//! other component looks capabilities up by [`CapabilityId`].
//!
//! Probe passes produce a fresh [`StateReport`] snapshot. Reports are never
//! mutated in place; refreshing a single entry yields a new report, which
//! keeps idempotency checkable by structural equality.

use std::collections::BTreeMap;
use std::fmt;

/// Name of the database container instance.
pub const DB_CONTAINER_NAME: &str = "drydock-mssql";

/// Container image hosting the application's database.
pub const DB_IMAGE: &str = "mcr.microsoft.com/mssql/server:2019-latest";

/// TCP port the database listens on.
pub const DB_PORT: u16 = 1433;

/// ODBC data source name registered for the application.
pub const DSN_NAME: &str = "drydock";

/// Identifies one environment dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CapabilityId {
    /// Homebrew, used to install everything else.
    PackageManager,
    /// Wine, the Windows-compatibility runtime.
    CompatRuntime,
    /// FreeTDS + unixODBC, the database connectivity driver.
    DbDriver,
    /// Docker, the container engine (process-like: has a daemon).
    ContainerEngine,
    /// The Wine prefix directory hosting the application.
    RuntimePrefix,
    /// The database container instance (process-like).
    DbContainer,
    /// The ODBC DSN registration for the application.
    DsnRegistration,
    /// The application's installed files inside the prefix.
    AppFiles,
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(lookup(*self).display_name)
    }
}

/// Immutable definition of one capability.
#[derive(Debug)]
pub struct CapabilityDef {
    pub id: CapabilityId,
    /// Operator-facing name.
    pub display_name: &'static str,
    /// Minimum acceptable version, if the capability is versioned.
    pub min_version: Option<&'static str>,
    /// Whether an unsatisfied state is a Blocking problem.
    pub critical: bool,
    /// Whether the capability carries a live running-state flag.
    pub process_like: bool,
    /// Whether a remediation action exists for it.
    pub remediable: bool,
}

/// All capabilities, in the order the pipeline considers them.
pub const CAPABILITIES: &[CapabilityDef] = &[
    CapabilityDef {
        id: CapabilityId::PackageManager,
        display_name: "Homebrew",
        min_version: None,
        critical: true,
        process_like: false,
        remediable: true,
    },
    CapabilityDef {
        id: CapabilityId::CompatRuntime,
        display_name: "Wine",
        min_version: Some("5.0"),
        critical: true,
        process_like: false,
        remediable: true,
    },
    CapabilityDef {
        id: CapabilityId::DbDriver,
        display_name: "FreeTDS ODBC driver",
        min_version: None,
        critical: true,
        process_like: false,
        remediable: true,
    },
    CapabilityDef {
        id: CapabilityId::ContainerEngine,
        display_name: "Docker",
        min_version: Some("20.10"),
        critical: true,
        process_like: true,
        remediable: true,
    },
    CapabilityDef {
        id: CapabilityId::RuntimePrefix,
        display_name: "Wine prefix",
        min_version: None,
        critical: false,
        process_like: false,
        remediable: true,
    },
    CapabilityDef {
        id: CapabilityId::DbContainer,
        display_name: "database container",
        min_version: None,
        critical: false,
        process_like: true,
        remediable: true,
    },
    CapabilityDef {
        id: CapabilityId::DsnRegistration,
        display_name: "ODBC data source",
        min_version: None,
        critical: false,
        process_like: false,
        remediable: true,
    },
    CapabilityDef {
        id: CapabilityId::AppFiles,
        display_name: "application files",
        min_version: None,
        critical: false,
        process_like: false,
        remediable: true,
    },
];

/// The prerequisite tools handled by the Check and Remediate stages.
pub const PREREQUISITES: &[CapabilityId] = &[
    CapabilityId::PackageManager,
    CapabilityId::CompatRuntime,
    CapabilityId::DbDriver,
    CapabilityId::ContainerEngine,
];

/// Look up a capability definition by id.
pub fn lookup(id: CapabilityId) -> &'static CapabilityDef {
    // The registry always contains every id variant.
    CAPABILITIES
        .iter()
        .find(|def| def.id == id)
        .unwrap_or(&CAPABILITIES[0])
}

/// Probed status of a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityStatus {
    /// Not probed yet.
    Unknown,
    /// Underlying tool or artefact is absent.
    Missing,
    /// Present but below the minimum version.
    PresentOutdated,
    /// Present and acceptable.
    PresentOk,
}

/// One entry of a [`StateReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityState {
    pub status: CapabilityStatus,
    pub detected_version: Option<String>,
    /// Live running state; `Some` only for process-like capabilities.
    pub running: Option<bool>,
}

impl CapabilityState {
    /// State for an absent capability.
    pub fn missing() -> Self {
        Self {
            status: CapabilityStatus::Missing,
            detected_version: None,
            running: None,
        }
    }

    /// State for a present, acceptable capability.
    pub fn ok(version: Option<String>) -> Self {
        Self {
            status: CapabilityStatus::PresentOk,
            detected_version: version,
            running: None,
        }
    }

    /// State for a present but outdated capability.
    pub fn outdated(version: String) -> Self {
        Self {
            status: CapabilityStatus::PresentOutdated,
            detected_version: Some(version),
            running: None,
        }
    }

    /// Attach a running-state flag (process-like capabilities only).
    pub fn with_running(mut self, running: bool) -> Self {
        self.running = Some(running);
        self
    }

    /// Whether this state needs no remediation.
    ///
    /// Process-like capabilities must additionally be running.
    pub fn is_satisfied(&self) -> bool {
        self.status == CapabilityStatus::PresentOk && self.running.unwrap_or(true)
    }
}

/// Immutable snapshot of all probed capability states.
///
/// Two consecutive probe passes with no intervening remediation compare
/// equal, which is how probe idempotency is asserted in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateReport {
    entries: BTreeMap<CapabilityId, CapabilityState>,
}

impl StateReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry while building a snapshot.
    pub fn insert(&mut self, id: CapabilityId, state: CapabilityState) {
        self.entries.insert(id, state);
    }

    pub fn get(&self, id: CapabilityId) -> Option<&CapabilityState> {
        self.entries.get(&id)
    }

    /// Produce a new snapshot with one entry replaced.
    pub fn refreshed(&self, id: CapabilityId, state: CapabilityState) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(id, state);
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CapabilityId, &CapabilityState)> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_every_id() {
        let ids = [
            CapabilityId::PackageManager,
            CapabilityId::CompatRuntime,
            CapabilityId::DbDriver,
            CapabilityId::ContainerEngine,
            CapabilityId::RuntimePrefix,
            CapabilityId::DbContainer,
            CapabilityId::DsnRegistration,
            CapabilityId::AppFiles,
        ];
        for id in ids {
            assert_eq!(lookup(id).id, id);
        }
        assert_eq!(CAPABILITIES.len(), ids.len());
    }

    #[test]
    fn prerequisites_are_all_critical() {
        for id in PREREQUISITES {
            assert!(lookup(*id).critical);
        }
    }

    #[test]
    fn process_like_capabilities() {
        assert!(lookup(CapabilityId::ContainerEngine).process_like);
        assert!(lookup(CapabilityId::DbContainer).process_like);
        assert!(!lookup(CapabilityId::CompatRuntime).process_like);
    }

    #[test]
    fn display_uses_display_name() {
        assert_eq!(CapabilityId::CompatRuntime.to_string(), "Wine");
    }

    #[test]
    fn satisfied_requires_present_ok() {
        assert!(CapabilityState::ok(Some("5.3".into())).is_satisfied());
        assert!(!CapabilityState::missing().is_satisfied());
        assert!(!CapabilityState::outdated("4.9".into()).is_satisfied());
    }

    #[test]
    fn satisfied_process_like_requires_running() {
        let stopped = CapabilityState::ok(None).with_running(false);
        let running = CapabilityState::ok(None).with_running(true);
        assert!(!stopped.is_satisfied());
        assert!(running.is_satisfied());
    }

    #[test]
    fn refreshed_leaves_original_untouched() {
        let mut report = StateReport::new();
        report.insert(CapabilityId::CompatRuntime, CapabilityState::missing());

        let updated = report.refreshed(
            CapabilityId::CompatRuntime,
            CapabilityState::ok(Some("5.3".into())),
        );

        assert_eq!(
            report.get(CapabilityId::CompatRuntime),
            Some(&CapabilityState::missing())
        );
        assert!(updated
            .get(CapabilityId::CompatRuntime)
            .is_some_and(CapabilityState::is_satisfied));
    }

    #[test]
    fn reports_compare_structurally() {
        let mut a = StateReport::new();
        let mut b = StateReport::new();
        a.insert(CapabilityId::PackageManager, CapabilityState::ok(None));
        b.insert(CapabilityId::PackageManager, CapabilityState::ok(None));
        assert_eq!(a, b);

        b.insert(CapabilityId::CompatRuntime, CapabilityState::missing());
        assert_ne!(a, b);
    }
}
