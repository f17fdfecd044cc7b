//! Mock generation backend
//!
//! This module turns a [`mockforge_model::Package`] into the normalized Go source of its gomock mocks.
//!
//! The pipeline is:
//! 1. Collect the import paths the file needs and assign each a unique alias (`imports`, backed by `oracle`)
//! 2. Render every method signature against that alias table (`signature`)
//! 3. Emit header, imports and one mock per interface (`generator`, `mock`, `emitter`)
//! 4. Normalize the draft ([`crate::format`]) and optionally write it (`output`)
//!
//! ## Module Organization
//!
//! - `config.rs` - `GeneratorConfig` and source provenance
//! - `emitter.rs` - Low-level Go code string builder
//! - `errors.rs` - `GenerateError`
//! - `generator.rs` - Output assembly and entry point
//! - `idents.rs` - Fresh identifier allocation
//! - `imports.rs` - Import alias resolution
//! - `mock.rs` - Per-interface mock synthesis
//! - `oracle.rs` - Declared package name lookup (`go list`)
//! - `output.rs` - Idempotent file writing
//! - `signature.rs` - Parameter and type-parameter rendering

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod config;
pub mod emitter;
pub mod errors;
pub mod generator;
pub mod idents;
pub mod imports;
pub mod mock;
pub mod oracle;
pub mod output;
pub mod signature;

pub use config::{GeneratorConfig, SourceOrigin};
pub use errors::GenerateError;
pub use generator::MockGenerator;
pub use imports::{AliasTable, ImportResolver};
pub use oracle::{GoListOracle, NoOracle, OracleError, PackageNameOracle, StaticOracle};
pub use output::{WriteOutcome, write_if_changed};
