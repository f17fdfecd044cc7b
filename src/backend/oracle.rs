//! Package-name oracle: resolves the declared package name behind an import path.
//!
//! The alias resolver treats every oracle as best-effort. A failed or missing lookup is never an error for the
//! caller; it only means the resolver falls back to the sanitized last path segment.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::Deserialize;
use thiserror::Error;

/// Error returned by a single oracle lookup.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("no package name known for {0:?}")]
    Unknown(String),
    #[error("package name oracle is disabled")]
    Unavailable,
}

/// Capability: resolve the canonical package name for an import path.
pub trait PackageNameOracle {
    /// Look up one import path.
    fn package_name(&self, import_path: &str) -> Result<String, OracleError>;

    /// Look up a batch of import paths; paths without an answer are simply absent from the result.
    fn package_names(&self, import_paths: &[String]) -> BTreeMap<String, String> {
        let mut names = BTreeMap::new();
        for path in import_paths {
            match self.package_name(path) {
                Ok(name) => {
                    names.insert(path.clone(), name);
                }
                Err(err) => tracing::debug!(import_path = %path, error = %err, "package name lookup failed"),
            }
        }
        names
    }
}

/// Oracle that never answers; every alias falls back to the sanitized path segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOracle;

impl PackageNameOracle for NoOracle {
    fn package_name(&self, _import_path: &str) -> Result<String, OracleError> {
        Err(OracleError::Unavailable)
    }
}

/// Oracle backed by a fixed table.
#[derive(Debug, Clone, Default)]
pub struct StaticOracle {
    names: BTreeMap<String, String>,
}

impl StaticOracle {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            names: entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl PackageNameOracle for StaticOracle {
    fn package_name(&self, import_path: &str) -> Result<String, OracleError> {
        self.names
            .get(import_path)
            .cloned()
            .ok_or_else(|| OracleError::Unknown(import_path.to_string()))
    }
}

/// Oracle that asks the Go toolchain (`go list -json=ImportPath,Name`).
#[derive(Debug, Clone)]
pub struct GoListOracle {
    program: String,
    dir: Option<PathBuf>,
}

impl Default for GoListOracle {
    fn default() -> Self {
        Self {
            program: "go".to_string(),
            dir: None,
        }
    }
}

impl GoListOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `go list` from `dir` so module-relative paths resolve against the right `go.mod`.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    fn run(&self, import_paths: &[String]) -> Result<Vec<u8>, OracleError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("list")
            .arg("-json=ImportPath,Name")
            .args(import_paths)
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }
        // A non-zero exit still lists every path that did resolve.
        let output = cmd.output().map_err(|source| OracleError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        Ok(output.stdout)
    }
}

impl PackageNameOracle for GoListOracle {
    fn package_name(&self, import_path: &str) -> Result<String, OracleError> {
        let stdout = self.run(&[import_path.to_string()])?;
        parse_go_list(&stdout)
            .remove(import_path)
            .ok_or_else(|| OracleError::Unknown(import_path.to_string()))
    }

    #[tracing::instrument(skip_all, fields(path_count = import_paths.len()))]
    fn package_names(&self, import_paths: &[String]) -> BTreeMap<String, String> {
        if import_paths.is_empty() {
            return BTreeMap::new();
        }
        match self.run(import_paths) {
            Ok(stdout) => parse_go_list(&stdout),
            Err(err) => {
                tracing::warn!(error = %err, "falling back to import path base names");
                BTreeMap::new()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GoListEntry {
    import_path: String,
    #[serde(default)]
    name: String,
}

/// Decode the concatenated JSON objects printed by `go list -json`.
///
/// Objects of the wrong shape are skipped; a syntax error ends the stream.
pub fn parse_go_list(stdout: &[u8]) -> BTreeMap<String, String> {
    let mut names = BTreeMap::new();
    for value in serde_json::Deserializer::from_slice(stdout).into_iter::<serde_json::Value>() {
        let value = match value {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, "failed to decode 'go list' output");
                break;
            }
        };
        match serde_json::from_value::<GoListEntry>(value) {
            Ok(entry) if !entry.name.is_empty() => {
                names.insert(entry.import_path, entry.name);
            }
            Ok(entry) => tracing::debug!(import_path = %entry.import_path, "go list reported no package name"),
            Err(err) => tracing::warn!(error = %err, "skipping malformed 'go list' entry"),
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_oracle_never_answers() {
        assert!(matches!(NoOracle.package_name("context"), Err(OracleError::Unavailable)));
        assert!(NoOracle.package_names(&["context".to_string()]).is_empty());
    }

    #[test]
    fn test_static_oracle_batch_skips_unknown() {
        let oracle = StaticOracle::new([("gopkg.in/yaml.v3", "yaml")]);
        let names = oracle.package_names(&["gopkg.in/yaml.v3".to_string(), "example.com/missing".to_string()]);
        assert_eq!(names.len(), 1);
        assert_eq!(names["gopkg.in/yaml.v3"], "yaml");
    }

    #[test]
    fn test_parse_go_list_stream() {
        let stdout = br#"{
	"ImportPath": "context",
	"Name": "context"
}
{
	"ImportPath": "gopkg.in/yaml.v3",
	"Name": "yaml"
}
"#;
        let names = parse_go_list(stdout);
        assert_eq!(names["context"], "context");
        assert_eq!(names["gopkg.in/yaml.v3"], "yaml");
    }

    #[test]
    fn test_parse_go_list_skips_mistyped_entry() {
        let stdout = br#"{"ImportPath": "a/b", "Name": 5}
{"ImportPath": "fmt", "Name": "fmt"}"#;
        let names = parse_go_list(stdout);
        assert_eq!(names.get("a/b"), None);
        assert_eq!(names.get("fmt").map(String::as_str), Some("fmt"));
    }

    #[test]
    fn test_parse_go_list_skips_nameless_and_stops_on_syntax_error() {
        let stdout = br#"{"ImportPath": "broken/pkg"}
{"ImportPath": "fmt", "Name": "fmt"}
not json
{"ImportPath": "io", "Name": "io"}"#;
        let names = parse_go_list(stdout);
        assert_eq!(names.len(), 1);
        assert_eq!(names["fmt"], "fmt");
    }

    #[test]
    fn test_go_list_oracle_missing_program_is_spawn_error() {
        let oracle = GoListOracle {
            program: "definitely-not-a-go-toolchain".to_string(),
            dir: None,
        };
        assert!(matches!(oracle.package_name("context"), Err(OracleError::Spawn { .. })));
        assert!(oracle.package_names(&["context".to_string()]).is_empty());
    }
}
