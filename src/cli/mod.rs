//! CLI module for mockforge
//!
//! A thin harness around [`crate::backend::MockGenerator`]: it reads an interface model encoded as JSON, applies the
//! command-line configuration, and prints or writes the generated mocks.
//!
//! ## Modules
//!
//! - `commands` - Command implementations and flag value parsing
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate gomock mocks from a Go interface model
#[derive(Parser, Debug)]
#[command(name = "mockforge")]
#[command(version = VERSION)]
#[command(about = "Generate gomock mocks from a Go interface model", long_about = None)]
pub struct Cli {
    /// Interface model as JSON (`-` reads stdin)
    #[arg(long, value_name = "FILE")]
    pub model: PathBuf,

    /// Output file; stdout when omitted
    #[arg(long, value_name = "FILE")]
    pub destination: Option<PathBuf>,

    /// Package name of the generated code (default: mock_<source package>)
    #[arg(long = "package", value_name = "NAME")]
    pub package_name: Option<String>,

    /// Full import path of the generated code's package
    #[arg(long, value_name = "IMPORT_PATH")]
    pub self_package: Option<String>,

    /// Mock type names, as `Interface=MockName` pairs separated by commas
    #[arg(long, value_name = "PAIRS")]
    pub mock_names: Option<String>,

    /// Interfaces to leave out, separated by commas
    #[arg(long, value_name = "NAMES")]
    pub exclude_interfaces: Option<String>,

    /// Preferred import aliases, as `alias=path` pairs separated by commas
    #[arg(long, value_name = "PAIRS")]
    pub imports: Option<String>,

    /// Source file named in the provenance comment (default: the package and its interfaces)
    #[arg(long, value_name = "FILE")]
    pub source: Option<String>,

    /// Generate typed Return/Do/DoAndReturn call wrappers
    #[arg(long)]
    pub typed: bool,

    /// Write the package documentation comment
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    pub write_package_comment: bool,

    /// Write the source provenance comment
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    pub write_source_comment: bool,

    /// Write the command that produced the file
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    pub write_command_comment: bool,

    /// Write a //go:generate directive repeating the command
    #[arg(long, value_name = "BOOL", default_value_t = false, action = ArgAction::Set)]
    pub write_generate_directive: bool,

    /// Build constraint for the generated file
    #[arg(long, value_name = "EXPR")]
    pub build_constraint: Option<String>,

    /// File whose contents become the copyright header
    #[arg(long, value_name = "FILE")]
    pub copyright_file: Option<PathBuf>,

    /// Do not ask `go list` for declared package names
    #[arg(long)]
    pub no_oracle: bool,

    /// Print the decoded model as JSON and exit (debug)
    #[arg(long)]
    pub debug_model: bool,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();
    let command_line: Vec<String> = env::args().collect();

    match commands::generate(&cli, &command_line) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
