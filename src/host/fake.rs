//! Recorded-fixture host implementation for testing.
//!
//! `FakeHost` implements [`HostRunner`](super::HostRunner) over a table of
//! command fixtures. Commands not in the table fail to spawn, which is how
//! an absent tool is simulated. A fixture may carry effects that fire when
//! its command runs, so a test can model the world changing underneath a
//! remediation: an install making a version command answer, a container run
//! opening a port, wineboot creating a prefix directory.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::{DrydockError, Result};

use super::{CommandOutput, HostRunner};

/// A world change applied when a fixture command runs successfully.
#[derive(Debug, Clone)]
pub enum FakeEffect {
    /// Install a new fixture (or replace an existing one).
    SetFixture {
        command: String,
        output: CommandOutput,
    },
    /// Mark a path as existing.
    CreatePath(PathBuf),
    /// Mark a TCP endpoint as reachable.
    OpenPort(String, u16),
}

#[derive(Debug, Default)]
struct FakeState {
    fixtures: HashMap<String, CommandOutput>,
    effects: HashMap<String, Vec<FakeEffect>>,
    paths: HashSet<PathBuf>,
    ports: HashSet<(String, u16)>,
    calls: Vec<String>,
}

/// Deterministic [`HostRunner`](super::HostRunner) for tests.
#[derive(Debug, Default)]
pub struct FakeHost {
    state: RefCell<FakeState>,
    root: bool,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate running as root.
    pub fn as_root(mut self) -> Self {
        self.root = true;
        self
    }

    /// Record a fixture: the given command line answers with `stdout`/`exit`.
    pub fn set_fixture(&self, command: &str, stdout: &str, exit: i32) {
        self.state
            .borrow_mut()
            .fixtures
            .insert(command.to_string(), CommandOutput::new(stdout, exit));
    }

    /// Attach an effect that fires when `command` runs successfully.
    pub fn add_effect(&self, command: &str, effect: FakeEffect) {
        self.state
            .borrow_mut()
            .effects
            .entry(command.to_string())
            .or_default()
            .push(effect);
    }

    /// Mark a path as already existing.
    pub fn add_path(&self, path: &Path) {
        self.state.borrow_mut().paths.insert(path.to_path_buf());
    }

    /// Mark a TCP endpoint as already reachable.
    pub fn open_port(&self, host: &str, port: u16) {
        self.state.borrow_mut().ports.insert((host.to_string(), port));
    }

    /// Every command line that was run, in order.
    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    /// Whether any recorded call starts with the given prefix.
    pub fn ran(&self, prefix: &str) -> bool {
        self.state
            .borrow()
            .calls
            .iter()
            .any(|c| c.starts_with(prefix))
    }
}

impl HostRunner for FakeHost {
    fn run_capture(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let command = if args.is_empty() {
            program.to_string()
        } else {
            format!("{} {}", program, args.join(" "))
        };

        let mut state = self.state.borrow_mut();
        state.calls.push(command.clone());

        let Some(output) = state.fixtures.get(&command).cloned() else {
            return Err(DrydockError::CommandSpawn { command });
        };

        if output.success() {
            if let Some(effects) = state.effects.remove(&command) {
                for effect in effects {
                    match effect {
                        FakeEffect::SetFixture { command, output } => {
                            state.fixtures.insert(command, output);
                        }
                        FakeEffect::CreatePath(path) => {
                            state.paths.insert(path);
                        }
                        FakeEffect::OpenPort(host, port) => {
                            state.ports.insert((host, port));
                        }
                    }
                }
            }
        }

        Ok(output)
    }

    fn path_exists(&self, path: &Path) -> bool {
        self.state.borrow().paths.contains(path) || path.exists()
    }

    fn port_reachable(&self, host: &str, port: u16) -> bool {
        self.state
            .borrow()
            .ports
            .contains(&(host.to_string(), port))
    }

    fn is_root(&self) -> bool {
        self.root
    }
}
