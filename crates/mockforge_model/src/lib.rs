//! Structural model of a Go package's interfaces, as consumed by the mockforge generator.
//!
//! This crate is dependency-light and intended for reuse by anything that produces or inspects interface models:
//! the generator, the CLI harness, and external discovery tooling that serializes models to JSON.
//!
//! ## Notes
//! - The model is *trusted*: nothing here checks that named types actually exist.
//! - Type rendering is pure: a [`Type`] plus a [`RenderContext`] always yields the same text.
//!
//! ## Examples
//! ```rust
//! use std::collections::BTreeMap;
//! use mockforge_model::{RenderContext, Type};
//!
//! let aliases = BTreeMap::from([("context".to_string(), "context".to_string())]);
//! let ctx = RenderContext::new(&aliases, None);
//! let ty = Type::named("context", "Context");
//! assert_eq!(ty.render(&ctx).unwrap(), "context.Context");
//! ```

pub mod errors;
pub mod package;
pub mod types;

pub use errors::RenderError;
pub use package::{Interface, Method, Package, Parameter, TypeParam};
pub use types::{ChanDir, Field, FuncType, RenderContext, Type};
