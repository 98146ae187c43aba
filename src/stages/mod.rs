//! The staged provisioning pipeline.
//!
//! `StageOrchestrator` drives four ordered stages over the capability
//! registry: Check probes the prerequisites and files problems, Remediate
//! installs what the gate decides is needed, Configure sets up the runtime
//! prefix, database container, and DSN, and Install copies the application
//! into the prefix. Only Check and Remediate consult the operator before
//! advancing; once Configure is entered the pipeline runs to completion
//! regardless of outstanding problems. That asymmetry is intentional and
//! kept as documented behavior.
//!
//! Each stage starts a fresh [`ProblemReport`]; reports are folded into the
//! operator-facing summary and never mutated after the stage concludes.

use crate::capability::{
    lookup, CapabilityDef, CapabilityId, CapabilityState, CapabilityStatus, StateReport,
    PREREQUISITES,
};
use crate::config::{HostPaths, RunConfig};
use crate::gate::{Decision, PromptGate};
use crate::host::HostRunner;
use crate::probe::CapabilityProbe;
use crate::remediation::RemediationRegistry;
use crate::ui::UserInterface;

/// Capabilities handled by the Configure stage, in order.
const CONFIGURE_STEPS: &[CapabilityId] = &[
    CapabilityId::RuntimePrefix,
    CapabilityId::DbContainer,
    CapabilityId::DsnRegistration,
];

/// Capabilities handled by the Install stage.
const INSTALL_STEPS: &[CapabilityId] = &[CapabilityId::AppFiles];

/// Pipeline states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Check,
    Remediate,
    Configure,
    Install,
    Done,
    /// Operator declined to continue past a Blocking problem. Reachable
    /// from Check or Remediate only.
    Aborted,
}

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Surfaced to the operator, never gates progression.
    Advisory,
    /// Gates progression during Check and Remediate via operator confirm.
    Blocking,
}

/// One diagnostic filed during a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub severity: Severity,
    pub capability: Option<CapabilityId>,
    pub message: String,
}

impl Problem {
    pub fn advisory(capability: Option<CapabilityId>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Advisory,
            capability,
            message: message.into(),
        }
    }

    pub fn blocking(capability: Option<CapabilityId>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Blocking,
            capability,
            message: message.into(),
        }
    }
}

/// Ordered sequence of problems filed during one stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemReport {
    problems: Vec<Problem>,
}

impl ProblemReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, problem: Problem) {
        self.problems.push(problem);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Problem> {
        self.problems.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn has_blocking(&self) -> bool {
        self.problems
            .iter()
            .any(|p| p.severity == Severity::Blocking)
    }
}

/// Outcome of one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageResult {
    /// Whether the stage finished with no Blocking problem outstanding.
    pub completed: bool,
    pub problems: ProblemReport,
}

impl StageResult {
    fn from_problems(problems: ProblemReport) -> Self {
        Self {
            completed: !problems.has_blocking(),
            problems,
        }
    }
}

/// Drives the staged pipeline over a host.
pub struct StageOrchestrator<'a> {
    host: &'a dyn HostRunner,
    paths: &'a HostPaths,
    config: &'a RunConfig,
}

impl<'a> StageOrchestrator<'a> {
    pub fn new(host: &'a dyn HostRunner, paths: &'a HostPaths, config: &'a RunConfig) -> Self {
        Self {
            host,
            paths,
            config,
        }
    }

    /// Run all stages, returning the terminal state.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Stage {
        let (report, result) = self.check_stage(ui);
        if !self.confirm_continue(&result, ui) {
            ui.error("Aborted. Resolve the problems above and run again.");
            return Stage::Aborted;
        }

        let (report, result) = self.remediate_stage(&report, ui);
        if !self.confirm_continue(&result, ui) {
            ui.error("Aborted. Resolve the problems above and run again.");
            return Stage::Aborted;
        }

        // No gate past this point: Configure and Install always run once
        // entered, even with Blocking problems outstanding.
        let (report, _) = self.configure_stage(&report, ui);
        let _ = self.install_stage(&report, ui);

        ui.success("Provisioning complete.");
        Stage::Done
    }

    /// Check: probe every prerequisite and file problems, mutating nothing.
    pub fn check_stage(&self, ui: &mut dyn UserInterface) -> (StateReport, StageResult) {
        tracing::debug!("entering Check");
        ui.show_header("Checking prerequisites");

        let mut problems = ProblemReport::new();
        if self.host.is_root() {
            ui.error("Running as root is discouraged");
            problems.push(Problem::blocking(
                None,
                "running as root is discouraged; re-run from a regular account",
            ));
        }

        let probe = CapabilityProbe::new(self.host, self.paths);
        let report = probe.probe_all();

        for id in PREREQUISITES {
            self.report_prerequisite(lookup(*id), report.get(*id), ui, &mut problems);
        }

        if !probe.cask_tap_present() {
            ui.warning("Homebrew cask-versions tap is not configured");
            problems.push(Problem::advisory(
                Some(CapabilityId::PackageManager),
                "the homebrew/cask-versions tap is not configured",
            ));
        }

        self.summarize(&problems, ui);
        (report, StageResult::from_problems(problems))
    }

    /// Remediate: install or start what the gate decides is needed, then
    /// re-probe each touched capability.
    pub fn remediate_stage(
        &self,
        report: &StateReport,
        ui: &mut dyn UserInterface,
    ) -> (StateReport, StageResult) {
        tracing::debug!("entering Remediate");
        ui.show_header("Installing prerequisites");

        let mut problems = ProblemReport::new();
        if self.config.skip_prerequisites {
            ui.message("Prerequisite installation skipped.");
            return (report.clone(), StageResult::from_problems(problems));
        }

        let mut current = report.clone();
        for id in PREREQUISITES {
            current = self.remediation_step(*id, current, ui, &mut problems);
        }

        self.summarize(&problems, ui);
        (current, StageResult::from_problems(problems))
    }

    /// Configure: runtime prefix, database container, DSN registration.
    pub fn configure_stage(
        &self,
        report: &StateReport,
        ui: &mut dyn UserInterface,
    ) -> (StateReport, StageResult) {
        tracing::debug!("entering Configure");
        ui.show_header("Configuring the environment");

        let mut problems = ProblemReport::new();
        let mut current = report.clone();
        for id in CONFIGURE_STEPS {
            current = self.remediation_step(*id, current, ui, &mut problems);
        }

        self.summarize(&problems, ui);
        (current, StageResult::from_problems(problems))
    }

    /// Install: copy the application into the prefix.
    pub fn install_stage(
        &self,
        report: &StateReport,
        ui: &mut dyn UserInterface,
    ) -> StageResult {
        tracing::debug!("entering Install");
        ui.show_header("Installing the application");

        let mut problems = ProblemReport::new();
        let mut current = report.clone();
        for id in INSTALL_STEPS {
            current = self.remediation_step(*id, current, ui, &mut problems);
        }

        self.summarize(&problems, ui);
        StageResult::from_problems(problems)
    }

    /// One gated remediation sub-step. Failure files a Problem and the
    /// stage moves on; it never raises.
    fn remediation_step(
        &self,
        id: CapabilityId,
        report: StateReport,
        ui: &mut dyn UserInterface,
        problems: &mut ProblemReport,
    ) -> StateReport {
        let def = lookup(id);
        let gate = PromptGate::new(self.config);
        let registry = RemediationRegistry::new(self.host, self.paths);
        let probe = CapabilityProbe::new(self.host, self.paths);

        let decision = gate.decide(def, report.get(id), ui);
        if !decision.should_remediate() {
            if matches!(decision, Decision::Automatic(false)) {
                ui.success(&format!("{} is ready", def.display_name));
            }
            return report;
        }

        ui.message(&format!("Setting up {}", def.display_name));
        let outcome = registry.remediate(id, ui);
        if !outcome.success {
            tracing::warn!(capability = %id, detail = %outcome.detail, "remediation failed");
            problems.push(Problem {
                severity: self.severity_for(def),
                capability: Some(id),
                message: format!("{} setup failed: {}", def.display_name, outcome.detail),
            });
        }

        let state = probe.probe_one(id);
        let report = report.refreshed(id, state.clone());
        if state.is_satisfied() {
            ui.success(&format!("{} is ready", def.display_name));
        } else if outcome.success {
            // The action reported success but the re-probe disagrees.
            problems.push(Problem {
                severity: self.severity_for(def),
                capability: Some(id),
                message: format!("{} is still not ready after setup", def.display_name),
            });
        }
        report
    }

    /// Report one prerequisite's probed state during Check.
    fn report_prerequisite(
        &self,
        def: &CapabilityDef,
        state: Option<&CapabilityState>,
        ui: &mut dyn UserInterface,
        problems: &mut ProblemReport,
    ) {
        let Some(state) = state else {
            ui.error(&format!("{} was not probed", def.display_name));
            problems.push(Problem {
                severity: self.severity_for(def),
                capability: Some(def.id),
                message: format!("{} state is unknown", def.display_name),
            });
            return;
        };

        match state.status {
            CapabilityStatus::PresentOk => {
                if state.running == Some(false) {
                    // Present but its daemon is down; remediation can start
                    // it, so this never blocks on its own.
                    ui.warning(&format!("{} is installed but not running", def.display_name));
                    problems.push(Problem::advisory(
                        Some(def.id),
                        format!("{} is not running", def.display_name),
                    ));
                } else {
                    match &state.detected_version {
                        Some(version) => {
                            ui.success(&format!("{} {}", def.display_name, version))
                        }
                        None => ui.success(&format!("{} is installed", def.display_name)),
                    }
                }
            }
            CapabilityStatus::PresentOutdated => {
                let detected = state.detected_version.as_deref().unwrap_or("unknown");
                let minimum = def.min_version.unwrap_or("unknown");
                let message = format!(
                    "{} is outdated ({} installed, {} required)",
                    def.display_name, detected, minimum
                );
                if def.critical {
                    ui.error(&message);
                    problems.push(Problem::blocking(Some(def.id), message));
                } else {
                    ui.warning(&message);
                    problems.push(Problem::advisory(Some(def.id), message));
                }
            }
            CapabilityStatus::Missing | CapabilityStatus::Unknown => {
                let message = format!("{} is not installed", def.display_name);
                if def.critical {
                    ui.error(&message);
                    problems.push(Problem::blocking(Some(def.id), message));
                } else {
                    ui.warning(&message);
                    problems.push(Problem::advisory(Some(def.id), message));
                }
            }
        }
    }

    fn severity_for(&self, def: &CapabilityDef) -> Severity {
        if def.critical {
            Severity::Blocking
        } else {
            Severity::Advisory
        }
    }

    fn summarize(&self, problems: &ProblemReport, ui: &mut dyn UserInterface) {
        if problems.is_empty() {
            ui.success("No problems found.");
            return;
        }

        let blocking = problems
            .iter()
            .filter(|p| p.severity == Severity::Blocking)
            .count();
        ui.message(&format!(
            "{} problem(s) found, {} blocking.",
            problems.len(),
            blocking
        ));
    }

    /// The abort gate. Only Check and Remediate call this.
    fn confirm_continue(&self, result: &StageResult, ui: &mut dyn UserInterface) -> bool {
        if result.completed {
            return true;
        }
        ui.confirm("Continue anyway?", false)
    }
}
