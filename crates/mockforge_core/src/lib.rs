//! Provide the Go vocabulary and pure naming helpers shared by the mockforge model and generator.
//!
//! This crate is intentionally small and dependency-free. It contains deterministic helpers that both:
//! - the model can use to validate identifiers while rendering types, and
//! - the generator can use to derive and disambiguate import aliases.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, and no generator-specific types.
//!
//! ## Examples
//! ```rust
//! use mockforge_core::{lang::keywords, naming};
//!
//! assert!(keywords::is_keyword("func"));
//! assert_eq!(naming::sanitize("go-yaml"), "goyaml");
//! ```

pub mod lang;
pub mod naming;
