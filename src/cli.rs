//! CLI argument definitions.
//!
//! All arguments are defined with clap's derive macros. Unrecognized
//! trailing tokens are accepted and silently ignored, so stray words on
//! the command line never fail a run.

use clap::Parser;

/// Drydock - host provisioning for the Ledger desktop application.
#[derive(Debug, Parser)]
#[command(name = "drydock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Disable colored output
    #[arg(long)]
    pub nocolor: bool,

    /// Skip automated checks; confirm every setup step interactively
    #[arg(long)]
    pub ignorechecks: bool,

    /// Skip prerequisite installation entirely
    #[arg(long)]
    pub skipprereq: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Ignored. Hyphenated tokens are captured too, so an unknown flag
    /// never fails the run.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub ignored: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::parse_from([
            "drydock",
            "--nocolor",
            "--ignorechecks",
            "--skipprereq",
            "--debug",
        ]);
        assert!(cli.nocolor);
        assert!(cli.ignorechecks);
        assert!(cli.skipprereq);
        assert!(cli.debug);
        assert!(cli.ignored.is_empty());
    }

    #[test]
    fn defaults_are_off() {
        let cli = Cli::parse_from(["drydock"]);
        assert!(!cli.nocolor);
        assert!(!cli.ignorechecks);
        assert!(!cli.skipprereq);
        assert!(!cli.debug);
    }

    #[test]
    fn stray_tokens_are_swallowed() {
        let cli = Cli::parse_from(["drydock", "please", "provision"]);
        assert_eq!(cli.ignored, vec!["please", "provision"]);
        assert!(!cli.ignorechecks);
    }

    #[test]
    fn stray_tokens_mix_with_flags() {
        let cli = Cli::parse_from(["drydock", "--skipprereq", "extra"]);
        assert!(cli.skipprereq);
        assert_eq!(cli.ignored, vec!["extra"]);
    }

    #[test]
    fn unknown_hyphenated_token_is_silently_ignored() {
        let cli = Cli::try_parse_from(["drydock", "--bogus"]).unwrap();
        assert_eq!(cli.ignored, vec!["--bogus"]);
        assert!(!cli.ignorechecks);
    }

    #[test]
    fn flags_before_unknown_token_still_apply() {
        let cli = Cli::try_parse_from(["drydock", "--skipprereq", "--bogus"]).unwrap();
        assert!(cli.skipprereq);
        assert_eq!(cli.ignored, vec!["--bogus"]);
    }
}
