//! Import alias resolution.
//!
//! Every import path the generated file needs gets one local alias. Resolution is deterministic: paths are visited
//! in lexicographic order and collisions are broken by numeric suffixes, so unchanged input always yields the same
//! table.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use mockforge_core::lang::{keywords, universe};
use mockforge_core::naming;
use mockforge_model::Package;

use super::oracle::PackageNameOracle;

/// Import path of the gomock runtime every mock depends on.
pub const GOMOCK_IMPORT_PATH: &str = "go.uber.org/mock/gomock";
/// Import path of the reflection package used by recorder methods.
pub const REFLECT_IMPORT_PATH: &str = "reflect";

/// Resolved import path → local alias mapping for one generated file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    aliases: BTreeMap<String, String>,
}

impl AliasTable {
    /// Alias assigned to `import_path`, if it is imported at all.
    pub fn get(&self, import_path: &str) -> Option<&str> {
        self.aliases.get(import_path).map(String::as_str)
    }

    /// `alias.` for an imported path, or the empty string when its symbols are unqualified.
    pub fn qualifier(&self, import_path: &str) -> String {
        self.get(import_path).map(|alias| format!("{alias}.")).unwrap_or_default()
    }

    /// Whether some import path was given `name` as its alias.
    pub fn contains_alias(&self, name: &str) -> bool {
        self.aliases.values().any(|alias| alias == name)
    }

    /// All assigned aliases.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases.values().map(String::as_str)
    }

    /// `(import path, alias)` pairs sorted by import path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(path, alias)| (path.as_str(), alias.as_str()))
    }

    /// The underlying map, as consumed by the type renderer.
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }
}

/// Import paths a generated file for `pkg` needs: everything the model references, the gomock runtime, and
/// `reflect` only when some interface has a method. Dot-imported packages are left out; their symbols stay
/// unqualified.
pub fn required_imports(pkg: &Package) -> BTreeSet<String> {
    let mut paths = pkg.imports();
    for dot in &pkg.dot_imports {
        paths.remove(dot);
    }
    paths.insert(GOMOCK_IMPORT_PATH.to_string());
    if pkg.has_methods() {
        paths.insert(REFLECT_IMPORT_PATH.to_string());
    }
    paths
}

/// Assigns unique local aliases to import paths.
pub struct ImportResolver<'a> {
    oracle: &'a dyn PackageNameOracle,
    overrides: &'a BTreeMap<String, String>,
}

impl<'a> ImportResolver<'a> {
    /// `overrides` maps import path → preferred alias and wins over the oracle's answer.
    pub fn new(oracle: &'a dyn PackageNameOracle, overrides: &'a BTreeMap<String, String>) -> Self {
        Self { oracle, overrides }
    }

    /// Resolve aliases for every import `pkg` needs.
    pub fn resolve(&self, pkg: &Package, output_package_path: Option<&str>) -> AliasTable {
        self.resolve_paths(&required_imports(pkg), &pkg.path, output_package_path)
    }

    /// Resolve aliases for `paths`. The source package's own path is left out when the output lives in that same
    /// package.
    #[tracing::instrument(skip_all, fields(path_count = paths.len()))]
    pub fn resolve_paths(
        &self,
        paths: &BTreeSet<String>,
        source_package_path: &str,
        output_package_path: Option<&str>,
    ) -> AliasTable {
        let sorted: Vec<String> = paths.iter().cloned().collect();
        let declared = self.oracle.package_names(&sorted);

        let mut table = AliasTable::default();
        let mut used: HashSet<String> = HashSet::new();
        for path in &sorted {
            let base = match declared.get(path) {
                Some(name) if naming::is_identifier(name) => name.clone(),
                Some(name) => {
                    tracing::debug!(import_path = %path, name = %name, "ignoring malformed package name");
                    naming::sanitize(naming::last_segment(path))
                }
                None => naming::sanitize(naming::last_segment(path)),
            };

            let mut alias = self.overrides.get(path).cloned().unwrap_or_else(|| base.clone());
            let mut suffix = 0usize;
            while used.contains(&alias) || keywords::is_keyword(&alias) || alias == universe::ANY {
                alias = format!("{base}{suffix}");
                suffix += 1;
            }

            if path == source_package_path && output_package_path == Some(source_package_path) {
                tracing::debug!(import_path = %path, "eliding self import");
                continue;
            }

            tracing::debug!(import_path = %path, alias = %alias, "assigned import alias");
            used.insert(alias.clone());
            table.aliases.insert(path.clone(), alias);
        }
        table
    }
}
