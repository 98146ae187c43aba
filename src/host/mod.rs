//! The external-provider seam.
//!
//! Every shell-out to a provider (Homebrew, Wine, Docker, odbcinst) goes
//! through the [`HostRunner`] trait, along with the filesystem existence
//! checks and TCP reachability probe the pipeline uses as idempotency
//! markers. [`SystemHost`] is the production implementation; [`FakeHost`]
//! replays recorded fixtures so probe and remediation logic can be tested
//! deterministically without touching a real host.

pub mod fake;

pub use fake::{FakeEffect, FakeHost};

use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use crate::error::{DrydockError, Result};

/// Captured result of one external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Combined standard output.
    pub stdout: String,
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>, exit_code: i32) -> Self {
        Self {
            stdout: stdout.into(),
            exit_code: Some(exit_code),
        }
    }

    /// Whether the command exited zero.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Access to the host the pipeline is provisioning.
///
/// All methods are read-only except `run_capture`, whose side effects belong
/// to the invoked provider. Implementations must be callable repeatedly.
pub trait HostRunner {
    /// Run a command and capture its output and exit code.
    ///
    /// Returns `Err` only when the command cannot be spawned at all, which
    /// probes interpret as the underlying tool being absent.
    fn run_capture(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;

    /// Whether a filesystem path exists.
    fn path_exists(&self, path: &Path) -> bool;

    /// Whether a TCP endpoint accepts connections.
    fn port_reachable(&self, host: &str, port: u16) -> bool;

    /// Whether the process runs with root privileges.
    fn is_root(&self) -> bool;
}

/// Production [`HostRunner`] backed by the real system.
#[derive(Debug, Default)]
pub struct SystemHost;

impl SystemHost {
    pub fn new() -> Self {
        Self
    }
}

impl HostRunner for SystemHost {
    fn run_capture(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        tracing::debug!(program, ?args, "running command");
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|_| DrydockError::CommandSpawn {
                command: format!("{} {}", program, args.join(" ")),
            })?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            exit_code: output.status.code(),
        };
        tracing::debug!(program, exit_code = ?result.exit_code, "command finished");
        Ok(result)
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn port_reachable(&self, host: &str, port: u16) -> bool {
        let timeout = Duration::from_secs(2);
        let addrs: Vec<SocketAddr> = match (host, port).to_socket_addrs() {
            Ok(addrs) => addrs.collect(),
            Err(_) => return false,
        };
        addrs
            .iter()
            .any(|addr| TcpStream::connect_timeout(addr, timeout).is_ok())
    }

    #[cfg(unix)]
    fn is_root(&self) -> bool {
        // SAFETY: geteuid has no preconditions.
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(not(unix))]
    fn is_root(&self) -> bool {
        false
    }
}

/// Extract a version substring from tool output using a regex pattern.
///
/// The first capture group wins; patterns without groups match whole.
pub fn extract_version(output: &str, pattern: &str) -> Option<String> {
    let re = regex::Regex::new(pattern).ok()?;
    let caps = re.captures(output)?;
    caps.get(1)
        .or_else(|| caps.get(0))
        .map(|m| m.as_str().to_string())
}
