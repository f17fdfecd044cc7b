//! Go language vocabulary registries.
//!
//! This module is the “front door” for Go spellings the generator must respect: reserved keywords and the
//! predeclared identifiers of the universe scope.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no model types, no IO, no side effects.
//!
//! ## Examples
//! ```rust
//! use mockforge_core::lang::{keywords, universe};
//!
//! assert!(keywords::is_keyword("range"));
//! assert_eq!(universe::ANY, "any");
//! ```

pub mod keywords;
pub mod universe;
