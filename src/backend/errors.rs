//! Define error types for mock generation.
//!
//! Generation either produces a complete, normalized file or fails as a whole; there is no partial output.
//!
//! ## Notes
//!
//! - `Render` means the interface model contains a type that cannot describe itself.
//! - `Format` means the generator produced text the normalization pass rejects. That is always a generator bug, so
//!   the raw draft travels with the error for diagnosis.

use miette::Diagnostic;
use mockforge_model::RenderError;
use thiserror::Error;

use crate::format::FormatError;

/// Error during mock generation.
#[derive(Debug, Error, Diagnostic)]
pub enum GenerateError {
    #[error("failed rendering {site}: {source}")]
    #[diagnostic(
        code(mockforge::render),
        help("the interface model contains a type with an empty or invalid name")
    )]
    Render {
        /// `Interface.Method`, or `Interface type parameters`.
        site: String,
        #[source]
        source: RenderError,
    },

    #[error("failed to format generated source code: {source}")]
    #[diagnostic(
        code(mockforge::format),
        help("the generated draft is not valid Go; the unformatted text is attached to this error")
    )]
    Format {
        #[source]
        source: FormatError,
        raw: String,
    },
}

impl GenerateError {
    pub(crate) fn render(site: impl Into<String>, source: RenderError) -> Self {
        GenerateError::Render {
            site: site.into(),
            source,
        }
    }

    /// The unformatted draft, when normalization rejected it.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            GenerateError::Format { raw, .. } => Some(raw),
            GenerateError::Render { .. } => None,
        }
    }
}
