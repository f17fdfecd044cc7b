//! Go source normalization
//!
//! Every generated file passes through [`normalize`] before it is returned. The pass does the parts of
//! `goimports`/`gofmt` the generator relies on:
//! - delimiter-balance and literal checks (a failure means the generator emitted invalid Go)
//! - import tidying: unused aliases removed, sorted by path, standard library grouped first
//! - canonical layout: trailing whitespace, blank-line runs, final newline
//!
//! Alignment and spacing inside lines are the generator's responsibility; the emitter already writes them in
//! gofmt style.

mod imports;
mod layout;
mod scan;

pub use imports::tidy_imports;
pub use layout::canonical_layout;
pub use scan::{ScanResult, scan};

use thiserror::Error;

/// Error raised when source text cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("line {line}: unexpected `{found}`")]
    Unexpected { line: usize, found: char },
    #[error("line {line}: `{found}` does not close `{open}` from line {open_line}")]
    Mismatched {
        line: usize,
        found: char,
        open: char,
        open_line: usize,
    },
    #[error("line {line}: `{open}` is never closed")]
    Unclosed { line: usize, open: char },
    #[error("line {line}: unterminated {what}")]
    Unterminated { line: usize, what: &'static str },
    #[error("line {line}: malformed import spec {spec:?}")]
    MalformedImport { line: usize, spec: String },
    #[error("missing package clause")]
    MissingPackageClause,
}

/// Normalize Go source text.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn normalize(source: &str) -> Result<String, FormatError> {
    let scanned = scan(source)?;
    check_package_clause(source)?;
    let tidied = tidy_imports(source, &scanned.qualifiers)?;
    Ok(canonical_layout(&tidied))
}

/// Check if source text is already normalized
pub fn check_normalized(source: &str) -> Result<bool, FormatError> {
    Ok(normalize(source)? == source)
}

fn check_package_clause(source: &str) -> Result<(), FormatError> {
    let mut in_block_comment = false;
    for line in source.lines().map(str::trim) {
        if in_block_comment {
            in_block_comment = !line.contains("*/");
            continue;
        }
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        if line.starts_with("/*") {
            in_block_comment = !line.contains("*/");
            continue;
        }
        return match line.strip_prefix("package ") {
            Some(name) if !name.trim().is_empty() => Ok(()),
            _ => Err(FormatError::MissingPackageClause),
        };
    }
    Err(FormatError::MissingPackageClause)
}
