//! Idempotent remediation actions.
//!
//! Each remediable capability maps to one corrective action invoking its
//! external provider. Every action is safe to re-run when the capability is
//! already satisfied: either a true no-op (guarded by the same idempotency
//! marker the probe reads) or a redundant-but-harmless reinstall. Action
//! failure is captured in a [`RemediationOutcome`] and never raised; the
//! calling stage files a Problem and keeps going.
//!
//! The [`HostRunner`] seam covers provider commands and existence checks
//! only. The DSN template and install-directory scaffolding are plain
//! local file writes with no provider behind them, so those go through
//! `std::fs` directly; tests run them against a tempdir.

use std::thread;
use std::time::Duration;

use crate::capability::{CapabilityId, DB_CONTAINER_NAME, DB_IMAGE, DB_PORT, DSN_NAME};
use crate::config::HostPaths;
use crate::host::HostRunner;
use crate::ui::UserInterface;

/// Interval between database readiness checks.
const READINESS_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Homebrew's official bootstrap invocation.
const BREW_BOOTSTRAP: &str =
    "$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)";

/// Result of one remediation action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemediationOutcome {
    pub success: bool,
    pub detail: String,
}

impl RemediationOutcome {
    fn ok(detail: impl Into<String>) -> Self {
        Self {
            success: true,
            detail: detail.into(),
        }
    }

    fn failed(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            detail: detail.into(),
        }
    }
}

/// Executes remediation actions against the host.
pub struct RemediationRegistry<'a> {
    host: &'a dyn HostRunner,
    paths: &'a HostPaths,
}

impl<'a> RemediationRegistry<'a> {
    pub fn new(host: &'a dyn HostRunner, paths: &'a HostPaths) -> Self {
        Self { host, paths }
    }

    /// Run the remediation action for a capability.
    pub fn remediate(&self, id: CapabilityId, ui: &mut dyn UserInterface) -> RemediationOutcome {
        tracing::debug!(capability = %id, "remediating");
        match id {
            CapabilityId::PackageManager => self.install_package_manager(),
            CapabilityId::CompatRuntime => self.run("brew", &["install", "--cask", "wine-stable"]),
            CapabilityId::DbDriver => self.run("brew", &["install", "freetds", "unixodbc"]),
            CapabilityId::ContainerEngine => self.install_container_engine(),
            CapabilityId::RuntimePrefix => self.initialize_prefix(),
            CapabilityId::DbContainer => self.provision_db_container(ui),
            CapabilityId::DsnRegistration => self.register_dsn(),
            CapabilityId::AppFiles => self.install_app_files(),
        }
    }

    /// Run one provider command, folding every failure mode into the outcome.
    fn run(&self, program: &str, args: &[&str]) -> RemediationOutcome {
        match self.host.run_capture(program, args) {
            Ok(output) if output.success() => RemediationOutcome::ok(""),
            Ok(output) => RemediationOutcome::failed(format!(
                "{} exited with code {}",
                program,
                output
                    .exit_code
                    .map_or_else(|| "none".to_string(), |c| c.to_string())
            )),
            Err(e) => RemediationOutcome::failed(e.to_string()),
        }
    }

    fn install_package_manager(&self) -> RemediationOutcome {
        self.run("/bin/bash", &["-c", BREW_BOOTSTRAP])
    }

    fn install_container_engine(&self) -> RemediationOutcome {
        let installed = self
            .host
            .run_capture("docker", &["--version"])
            .map(|o| o.success())
            .unwrap_or(false);

        if !installed {
            let outcome = self.run("brew", &["install", "--cask", "docker"]);
            if !outcome.success {
                return outcome;
            }
        }

        let running = self
            .host
            .run_capture("docker", &["info"])
            .map(|o| o.success())
            .unwrap_or(false);
        if running {
            return RemediationOutcome::ok("daemon already running");
        }

        self.run("open", &["-a", "Docker"])
    }

    fn initialize_prefix(&self) -> RemediationOutcome {
        if self.host.path_exists(&self.paths.prefix_dir) {
            return RemediationOutcome::ok("prefix already initialized");
        }

        let prefix = self.paths.prefix_dir.display().to_string();
        self.run(
            "env",
            &[&format!("WINEPREFIX={}", prefix), "wineboot", "--init"],
        )
    }

    fn provision_db_container(&self, ui: &mut dyn UserInterface) -> RemediationOutcome {
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
                // Container exists; start it if stopped.
                if output.stdout.trim() != "true" {
                    let outcome = self.run("docker", &["start", DB_CONTAINER_NAME]);
                    if !outcome.success {
                        return outcome;
                    }
                }
            }
            _ => {
                let outcome = self.run("docker", &["pull", DB_IMAGE]);
                if !outcome.success {
                    return outcome;
                }

                let port_mapping = format!("{}:{}", DB_PORT, DB_PORT);
                let outcome = self.run(
                    "docker",
                    &[
                        "run",
                        "-d",
                        "--name",
                        DB_CONTAINER_NAME,
                        "-e",
                        "ACCEPT_EULA=Y",
                        "-e",
                        "SA_PASSWORD=Drydock!Passw0rd",
                        "-p",
                        &port_mapping,
                        DB_IMAGE,
                    ],
                );
                if !outcome.success {
                    return outcome;
                }
            }
        }

        self.wait_for_database(ui);
        RemediationOutcome::ok("database accepting connections")
    }

    /// Poll until the database port accepts connections.
    ///
    /// Fixed interval, no attempt ceiling: the operator interrupts if the
    /// container never comes up, and a re-run resumes cleanly.
    fn wait_for_database(&self, ui: &mut dyn UserInterface) {
        let mut spinner = ui.start_spinner("Waiting for the database to accept connections");
        let mut attempts: u32 = 0;
        while !self.host.port_reachable("127.0.0.1", DB_PORT) {
            attempts += 1;
            spinner.set_message(&format!(
                "Waiting for the database to accept connections (attempt {})",
                attempts
            ));
            thread::sleep(READINESS_POLL_INTERVAL);
        }
        spinner.finish_success("Database is accepting connections");
    }

    fn register_dsn(&self) -> RemediationOutcome {
        let template = self.paths.prefix_dir.join(format!("{}.dsn", DSN_NAME));
        let contents = format!(
            "[{}]\nDriver = FreeTDS\nServer = 127.0.0.1\nPort = {}\nDatabase = master\n",
            DSN_NAME, DB_PORT
        );

        if let Err(e) = std::fs::create_dir_all(&self.paths.prefix_dir)
            .and_then(|()| std::fs::write(&template, contents))
        {
            return RemediationOutcome::failed(format!("could not write DSN template: {}", e));
        }

        let template_path = template.display().to_string();
        self.run("odbcinst", &["-i", "-s", "-l", "-f", &template_path])
    }

    fn install_app_files(&self) -> RemediationOutcome {
        if self.host.path_exists(&self.paths.app_dir) {
            return RemediationOutcome::ok("application already installed");
        }

        if let Some(parent) = self.paths.app_dir.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return RemediationOutcome::failed(format!(
                    "could not create install directory: {}",
                    e
                ));
            }
        }

        let source = self.paths.app_source.display().to_string();
        let dest = self.paths.app_dir.display().to_string();
        let outcome = self.run("cp", &["-R", &source, &dest]);
        if !outcome.success {
            return outcome;
        }

        self.run_post_install()
    }

    /// Apply the application's registry settings inside the prefix, if the
    /// payload ships them.
    fn run_post_install(&self) -> RemediationOutcome {
        let settings = self.paths.app_source.join("settings.reg");
        if !self.host.path_exists(&settings) {
            return RemediationOutcome::ok("no post-install settings shipped");
        }

        let prefix = self.paths.prefix_dir.display().to_string();
        let settings_path = settings.display().to_string();
        self.run(
            "env",
            &[
                &format!("WINEPREFIX={}", prefix),
                "wine",
                "regedit",
                &settings_path,
            ],
        )
    }
}
