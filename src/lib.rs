//! Drydock - host provisioning for a Windows desktop application.
//!
//! Drydock detects, remediates, and re-verifies the chain of environment
//! dependencies the Ledger application needs (Homebrew, Wine, Docker, and
//! the FreeTDS ODBC driver), then performs idempotent setup of a Wine
//! prefix, an MSSQL database container, and an ODBC data source, and
//! finally installs the application's files into the prefix.
//!
//! # Modules
//!
//! - [`capability`] - The capability registry and probe result types
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Run configuration and host paths
//! - [`error`] - Error types and result aliases
//! - [`gate`] - Remediation necessity decisions
//! - [`host`] - Command execution and host inspection seam
//! - [`probe`] - Read-only capability detection
//! - [`remediation`] - Idempotent remediation actions
//! - [`stages`] - The staged provisioning pipeline
//! - [`ui`] - Terminal output, prompts, and spinners
//! - [`version`] - Dotted version string comparison
//!
//! # Example
//!
//! ```
//! use drydock::version::at_least;
//!
//! assert!(at_least("5.3", "5.0"));
//! assert!(!at_least("4.9", "5.0"));
//! ```

pub mod capability;
pub mod cli;
pub mod config;
pub mod error;
pub mod gate;
pub mod host;
pub mod probe;
pub mod remediation;
pub mod stages;
pub mod ui;
pub mod version;

pub use error::{DrydockError, Result};
