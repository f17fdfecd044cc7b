//! Generator configuration.
//!
//! Every behavioral switch of the generator lives here and is threaded explicitly into
//! [`crate::backend::MockGenerator`]; nothing is read from globals or the environment.

use std::collections::BTreeMap;

use mockforge_core::naming;

/// Where the mocked interfaces came from, for the `// Source:` provenance comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOrigin {
    /// A single file (source or archive).
    File(String),
    /// A package import path plus the requested interface names.
    Package { import_path: String, interfaces: Vec<String> },
}

impl SourceOrigin {
    /// Text after `// Source: `.
    pub fn describe(&self) -> String {
        match self {
            SourceOrigin::File(path) => path.clone(),
            SourceOrigin::Package {
                import_path,
                interfaces,
            } => format!("{} (interfaces: {})", import_path, interfaces.join(",")),
        }
    }
}

/// Generator configuration
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Package clause of the generated file; defaults to `mock_<source package>`
    pub package_name: Option<String>,
    /// Explicit import path of the generated file's package
    pub self_package: Option<String>,
    /// Import path inferred from the destination; only trusted when the output package is the source package
    pub destination_package_path: Option<String>,
    /// Interface name → mock type name; unlisted interfaces get `Mock<Name>`
    pub mock_names: BTreeMap<String, String>,
    /// Import path → preferred alias
    pub import_aliases: BTreeMap<String, String>,
    /// Generate typed `Return`/`Do`/`DoAndReturn` call wrappers
    pub typed: bool,
    /// Write `// Package x is a generated GoMock package.`
    pub write_package_comment: bool,
    /// Write the `// Source:` provenance comment
    pub write_source_comment: bool,
    /// Write the command that produced the file
    pub write_command_comment: bool,
    /// Write a `//go:generate` directive repeating the command
    pub write_generate_directive: bool,
    /// `//go:build` constraint
    pub build_constraint: Option<String>,
    /// Copyright text, one `// ` comment line per line
    pub copyright_header: Option<String>,
    /// Provenance of the model
    pub source: Option<SourceOrigin>,
    /// Full command line (program first) echoed into comments
    pub command_line: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package_name: None,
            self_package: None,
            destination_package_path: None,
            mock_names: BTreeMap::new(),
            import_aliases: BTreeMap::new(),
            typed: false,
            write_package_comment: true,
            write_source_comment: true,
            write_command_comment: true,
            write_generate_directive: false,
            build_constraint: None,
            copyright_header: None,
            source: None,
            command_line: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output package name
    pub fn with_package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = Some(name.into());
        self
    }

    /// Set the explicit self-package import path
    pub fn with_self_package(mut self, path: impl Into<String>) -> Self {
        self.self_package = Some(path.into());
        self
    }

    /// Set the import path inferred from the destination
    pub fn with_destination_package_path(mut self, path: impl Into<String>) -> Self {
        self.destination_package_path = Some(path.into());
        self
    }

    /// Name the mock of `interface` explicitly
    pub fn with_mock_name(mut self, interface: impl Into<String>, mock: impl Into<String>) -> Self {
        self.mock_names.insert(interface.into(), mock.into());
        self
    }

    /// Prefer `alias` for `import_path`
    pub fn with_import_alias(mut self, import_path: impl Into<String>, alias: impl Into<String>) -> Self {
        self.import_aliases.insert(import_path.into(), alias.into());
        self
    }

    /// Toggle typed call wrappers
    pub fn with_typed(mut self, typed: bool) -> Self {
        self.typed = typed;
        self
    }

    /// Toggle the package doc comment
    pub fn with_package_comment(mut self, enabled: bool) -> Self {
        self.write_package_comment = enabled;
        self
    }

    /// Toggle the provenance comment
    pub fn with_source_comment(mut self, enabled: bool) -> Self {
        self.write_source_comment = enabled;
        self
    }

    /// Toggle the invocation echo comment
    pub fn with_command_comment(mut self, enabled: bool) -> Self {
        self.write_command_comment = enabled;
        self
    }

    /// Toggle the `//go:generate` directive
    pub fn with_generate_directive(mut self, enabled: bool) -> Self {
        self.write_generate_directive = enabled;
        self
    }

    /// Set the build constraint
    pub fn with_build_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.build_constraint = Some(constraint.into());
        self
    }

    /// Set the copyright header text
    pub fn with_copyright_header(mut self, header: impl Into<String>) -> Self {
        self.copyright_header = Some(header.into());
        self
    }

    /// Set the provenance of the model
    pub fn with_source(mut self, source: SourceOrigin) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the command line echoed into comments
    pub fn with_command_line<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command_line = args.into_iter().map(Into::into).collect();
        self
    }

    /// The package clause to emit for a model whose package is `source_package_name`.
    pub fn output_package_name(&self, source_package_name: &str) -> String {
        match &self.package_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("mock_{}", naming::sanitize(source_package_name)),
        }
    }

    /// Import path of the generated file's own package, if known.
    ///
    /// An explicit self-package always wins. A destination-inferred path is only used when the mocks are written
    /// into the source package itself; otherwise it would wrongly unqualify that package's types.
    pub fn output_package_path(&self, source_package_name: &str) -> Option<&str> {
        if let Some(path) = self.self_package.as_deref().filter(|p| !p.is_empty()) {
            return Some(path);
        }
        if self.output_package_name(source_package_name) == source_package_name {
            return self.destination_package_path.as_deref().filter(|p| !p.is_empty());
        }
        None
    }

    /// Mock type name for `interface`.
    pub fn mock_name(&self, interface: &str) -> String {
        self.mock_names
            .get(interface)
            .cloned()
            .unwrap_or_else(|| format!("Mock{interface}"))
    }
}
