//! Remediation necessity decisions.
//!
//! `PromptGate` decides, per capability, whether a remediation runs. With
//! checks enabled the probe result alone decides. With `--ignorechecks` the
//! probe is not consulted at all: the operator confirms each candidate
//! explicitly, and that answer is a ForceOverride for the one step.

use crate::capability::{CapabilityDef, CapabilityState};
use crate::config::RunConfig;
use crate::ui::UserInterface;

/// How a remediation decision was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Derived from the probe result.
    Automatic(bool),
    /// Operator override under `--ignorechecks`.
    Forced(bool),
}

impl Decision {
    /// Whether the remediation should run.
    pub fn should_remediate(self) -> bool {
        match self {
            Decision::Automatic(needed) | Decision::Forced(needed) => needed,
        }
    }
}

/// Gate consulted before every remediation candidate.
#[derive(Debug, Clone, Copy)]
pub struct PromptGate {
    ignore_checks: bool,
}

impl PromptGate {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            ignore_checks: config.ignore_checks,
        }
    }

    /// Decide whether the capability's remediation should run.
    ///
    /// `state` is the capability's entry from the current snapshot; `None`
    /// is treated as unsatisfied.
    pub fn decide(
        &self,
        def: &CapabilityDef,
        state: Option<&CapabilityState>,
        ui: &mut dyn UserInterface,
    ) -> Decision {
        if self.ignore_checks {
            let answer = ui.confirm(
                &format!("Set up {} ({})?", def.display_name, def.id_slug()),
                false,
            );
            return Decision::Forced(answer);
        }

        Decision::Automatic(!state.is_some_and(CapabilityState::is_satisfied))
    }
}

impl CapabilityDef {
    /// Short lowercase identifier shown in forced-confirmation prompts.
    fn id_slug(&self) -> String {
        format!("{:?}", self.id).to_lowercase()
    }
}
