#![forbid(unsafe_code)]
//! mockforge: gomock mock synthesis
//!
//! Given a structural model of Go interfaces (see [`mockforge_model`]), this crate emits a complete, compilable Go
//! source file with a call-recording mock, an expectation recorder and, optionally, typed call wrappers for every
//! interface. Output is deterministic: the same model and configuration always produce the same bytes.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Generated code**: Go text is built with `format!`; nothing in it is evaluated by this crate.
//!
//! ## Example
//!
//! ```rust
//! use mockforge::{GeneratorConfig, MockGenerator, NoOracle};
//! use mockforge_model::{Interface, Method, Package, Type};
//!
//! let pkg = Package {
//!     name: "store".to_string(),
//!     path: "example.com/store".to_string(),
//!     interfaces: vec![Interface::new("Closer").with_method(
//!         Method::new("Close").with_output("", Type::predeclared("error")),
//!     )],
//!     dot_imports: vec![],
//! };
//! let config = GeneratorConfig::new();
//! let code = MockGenerator::new(&config, &NoOracle).generate(&pkg).unwrap();
//! assert!(code.contains("func (m *MockCloser) Close() error {"));
//! ```

pub mod backend;
pub mod cli;
pub mod format;

pub use backend::{GenerateError, GeneratorConfig, MockGenerator, NoOracle, SourceOrigin};
pub use format::{FormatError, check_normalized, normalize};
