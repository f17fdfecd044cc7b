//! Output assembly.
//!
//! [`MockGenerator`] ties the pieces together: it resolves import aliases, writes the file header and import block,
//! asks the [`MockSynthesizer`] for each interface's mock, and runs the result through [`crate::format::normalize`].

use std::path::Path;

use mockforge_model::{Interface, Package};

use super::config::GeneratorConfig;
use super::emitter::GoEmitter;
use super::errors::GenerateError;
use super::imports::{AliasTable, ImportResolver};
use super::mock::MockSynthesizer;
use super::oracle::PackageNameOracle;
use crate::format;

/// First line of every generated file; tools recognize generated code by it.
pub const GENERATED_MARKER: &str = "// Code generated by MockGen. DO NOT EDIT.";

/// Generates one mock file per package model.
pub struct MockGenerator<'a> {
    config: &'a GeneratorConfig,
    oracle: &'a dyn PackageNameOracle,
}

impl<'a> MockGenerator<'a> {
    pub fn new(config: &'a GeneratorConfig, oracle: &'a dyn PackageNameOracle) -> Self {
        Self { config, oracle }
    }

    /// Generate the normalized Go source of mocks for every interface in `pkg`.
    #[tracing::instrument(skip_all, fields(package = %pkg.path, interfaces = pkg.interfaces.len()))]
    pub fn generate(&self, pkg: &Package) -> Result<String, GenerateError> {
        let output_name = self.config.output_package_name(&pkg.name);
        let output_path = self.config.output_package_path(&pkg.name);
        let aliases = ImportResolver::new(self.oracle, &self.config.import_aliases).resolve(pkg, output_path);

        let mut e = GoEmitter::new();
        self.emit_header(&mut e, &output_name);
        emit_imports(&mut e, &aliases, &pkg.dot_imports, output_path);
        self.emit_generate_directive(&mut e);

        let synth = MockSynthesizer::new(&aliases, output_path, self.config.typed);
        let mut interfaces: Vec<&Interface> = pkg.interfaces.iter().collect();
        interfaces.sort_by(|a, b| a.name.cmp(&b.name));
        for intf in interfaces {
            synth.interface(&mut e, intf, &self.config.mock_name(&intf.name))?;
        }

        let raw = e.finish();
        match format::normalize(&raw) {
            Ok(formatted) => Ok(formatted),
            Err(source) => {
                tracing::warn!(error = %source, "generated draft failed normalization");
                Err(GenerateError::Format { source, raw })
            }
        }
    }

    fn emit_header(&self, e: &mut GoEmitter, output_name: &str) {
        let config = self.config;

        if let Some(header) = config.copyright_header.as_deref().filter(|h| !h.is_empty()) {
            for line in header.trim_end_matches('\n').lines() {
                e.comment(line);
            }
            e.blank_line();
        }
        if let Some(constraint) = config.build_constraint.as_deref().filter(|c| !c.is_empty()) {
            e.line(&format!("//go:build {constraint}"));
            e.blank_line();
        }

        e.line(GENERATED_MARKER);
        if config.write_source_comment {
            if let Some(source) = &config.source {
                e.comment(&format!("Source: {}", source.describe()));
            }
        }
        if config.write_command_comment {
            if let Some(echo) = command_echo(&config.command_line) {
                e.comment("");
                e.comment("Generated by this command:");
                e.comment("");
                e.line(&format!("//\t{echo}"));
                e.comment("");
            }
        }
        e.blank_line();

        if config.write_package_comment {
            e.comment(&format!("Package {output_name} is a generated GoMock package."));
        }
        e.line(&format!("package {output_name}"));
        e.blank_line();
    }

    fn emit_generate_directive(&self, e: &mut GoEmitter) {
        if self.config.write_generate_directive && !self.config.command_line.is_empty() {
            e.blank_line();
            e.line(&format!("//go:generate {}", self.config.command_line.join(" ")));
        }
    }
}

fn emit_imports(e: &mut GoEmitter, aliases: &AliasTable, dot_imports: &[String], output_path: Option<&str>) {
    e.line("import (");
    e.indent();
    for (path, alias) in aliases.iter() {
        if Some(path) == output_path {
            continue;
        }
        e.line(&format!("{alias} \"{path}\""));
    }
    for path in dot_imports {
        e.line(&format!(". \"{path}\""));
    }
    e.dedent();
    e.line(")");
}

/// The invocation as echoed in the header: program base name followed by its arguments.
fn command_echo(command_line: &[String]) -> Option<String> {
    let (program, args) = command_line.split_first()?;
    let base = Path::new(program)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(program);
    let base = if cfg!(windows) {
        base.strip_suffix(".exe").unwrap_or(base)
    } else {
        base
    };
    Some(std::iter::once(base).chain(args.iter().map(String::as_str)).collect::<Vec<_>>().join(" "))
}
