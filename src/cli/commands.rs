//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use mockforge_model::Package;

use crate::backend::{
    GeneratorConfig, GoListOracle, MockGenerator, NoOracle, PackageNameOracle, SourceOrigin, WriteOutcome,
    write_if_changed,
};

use super::{Cli, CliError, CliResult, ExitCode};

// ============================================================================
// Generate
// ============================================================================

/// Generate mocks for the model named on the command line.
///
/// `command_line` is the full invocation (program first), echoed into the generated header.
pub fn generate(cli: &Cli, command_line: &[String]) -> CliResult<ExitCode> {
    let mut pkg = read_model(&cli.model)?;
    if let Some(names) = &cli.exclude_interfaces {
        let excluded = parse_exclude_interfaces(names);
        pkg.exclude_interfaces(excluded.iter().map(String::as_str));
    }

    if cli.debug_model {
        let json = serde_json::to_string_pretty(&pkg)
            .map_err(|e| CliError::failure(format!("Error encoding model: {}", e)))?;
        println!("{json}");
        return Ok(ExitCode::SUCCESS);
    }

    let config = build_config(cli, &pkg, command_line)?;
    let oracle: Box<dyn PackageNameOracle> = if cli.no_oracle {
        Box::new(NoOracle)
    } else {
        Box::new(oracle_for(cli.destination.as_deref()))
    };

    let code = MockGenerator::new(&config, oracle.as_ref())
        .generate(&pkg)
        .map_err(|e| CliError::failure(format!("{:?}", miette::Report::new(e))))?;

    match &cli.destination {
        Some(path) => match write_if_changed(path, code.as_bytes()) {
            Ok(WriteOutcome::Written) => tracing::info!(path = %path.display(), "wrote mocks"),
            Ok(WriteOutcome::Unchanged) => tracing::info!(path = %path.display(), "mocks up to date"),
            Err(e) => return Err(CliError::failure(format!("Error writing {}: {}", path.display(), e))),
        },
        None => print!("{code}"),
    }
    Ok(ExitCode::SUCCESS)
}

/// Decode the JSON model from `path`, or from stdin when `path` is `-`.
pub fn read_model(path: &Path) -> CliResult<Package> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::failure(format!("Error reading model from stdin: {}", e)))?;
        buf
    } else {
        fs::read_to_string(path).map_err(|e| CliError::failure(format!("Error reading {}: {}", path.display(), e)))?
    };
    serde_json::from_str(&text).map_err(|e| CliError::failure(format!("Error decoding model {}: {}", path.display(), e)))
}

fn build_config(cli: &Cli, pkg: &Package, command_line: &[String]) -> CliResult<GeneratorConfig> {
    let mut config = GeneratorConfig::new()
        .with_typed(cli.typed)
        .with_package_comment(cli.write_package_comment)
        .with_source_comment(cli.write_source_comment)
        .with_command_comment(cli.write_command_comment)
        .with_generate_directive(cli.write_generate_directive)
        .with_command_line(command_line.iter().cloned());

    config.source = Some(match &cli.source {
        Some(file) => SourceOrigin::File(file.clone()),
        None => SourceOrigin::Package {
            import_path: pkg.path.clone(),
            interfaces: pkg.interfaces.iter().map(|intf| intf.name.clone()).collect(),
        },
    });
    if let Some(name) = &cli.package_name {
        config = config.with_package_name(name);
    }
    if let Some(path) = &cli.self_package {
        config = config.with_self_package(path);
    }
    if let Some(pairs) = &cli.mock_names {
        config.mock_names = parse_mock_names(pairs)?;
    }
    if let Some(pairs) = &cli.imports {
        config.import_aliases = parse_imports(pairs)?;
    }
    if let Some(constraint) = &cli.build_constraint {
        config = config.with_build_constraint(constraint);
    }
    if let Some(path) = &cli.copyright_file {
        let header = fs::read_to_string(path)
            .map_err(|e| CliError::failure(format!("Error reading copyright file {}: {}", path.display(), e)))?;
        config = config.with_copyright_header(header);
    }
    if let Some(destination) = &cli.destination {
        match infer_package_path(destination) {
            Some(path) => config = config.with_destination_package_path(path),
            None => tracing::warn!(
                destination = %destination.display(),
                "unable to infer the destination's import path"
            ),
        }
    }
    Ok(config)
}

fn oracle_for(destination: Option<&Path>) -> GoListOracle {
    match destination.and_then(Path::parent).filter(|dir| dir.is_dir()) {
        Some(dir) => GoListOracle::new().in_dir(dir),
        None => GoListOracle::new(),
    }
}

// ============================================================================
// Flag values
// ============================================================================

/// Parse `A=MockA,B=MockB` into interface → mock name.
pub fn parse_mock_names(pairs: &str) -> CliResult<BTreeMap<String, String>> {
    let mut names = BTreeMap::new();
    for entry in pairs.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let Some((interface, mock)) = entry.split_once('=') else {
            return Err(CliError::failure(format!(
                "Error: invalid --mock-names entry {:?}, expected Interface=MockName",
                entry
            )));
        };
        names.insert(interface.trim().to_string(), mock.trim().to_string());
    }
    Ok(names)
}

/// Parse `A,B` into interface names.
pub fn parse_exclude_interfaces(names: &str) -> Vec<String> {
    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `alias=path,...` into import path → alias. `.` aliases are ignored.
pub fn parse_imports(pairs: &str) -> CliResult<BTreeMap<String, String>> {
    let mut aliases = BTreeMap::new();
    for entry in pairs.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let Some((alias, path)) = entry.split_once('=') else {
            return Err(CliError::failure(format!(
                "Error: invalid --imports entry {:?}, expected alias=path",
                entry
            )));
        };
        let (alias, path) = (alias.trim(), path.trim());
        if alias == "." {
            tracing::debug!(import_path = %path, "ignoring dot import alias");
            continue;
        }
        aliases.insert(path.to_string(), alias.to_string());
    }
    Ok(aliases)
}

// ============================================================================
// Destination package inference
// ============================================================================

/// Import path of the directory `destination` is written into.
///
/// The nearest enclosing `go.mod` decides; without one, a `$GOPATH/src` prefix is tried.
pub fn infer_package_path(destination: &Path) -> Option<String> {
    let dir = absolute_parent(destination)?;

    for ancestor in dir.ancestors() {
        let go_mod = ancestor.join("go.mod");
        if !go_mod.is_file() {
            continue;
        }
        let module = fs::read_to_string(&go_mod).ok().and_then(|text| module_path(&text))?;
        let rel = dir.strip_prefix(ancestor).ok()?;
        return Some(join_import_path(&module, rel));
    }

    let gopath = env::var_os("GOPATH")?;
    env::split_paths(&gopath).find_map(|root| {
        let rel = dir.strip_prefix(root.join("src")).ok()?;
        let path = join_import_path("", rel);
        (!path.is_empty()).then_some(path)
    })
}

fn absolute_parent(destination: &Path) -> Option<PathBuf> {
    let parent = destination.parent().unwrap_or(Path::new(""));
    if parent.is_absolute() {
        Some(parent.to_path_buf())
    } else {
        env::current_dir().ok().map(|cwd| cwd.join(parent))
    }
}

/// The `module` directive of a go.mod file.
fn module_path(go_mod: &str) -> Option<String> {
    go_mod.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or_default().trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let module = rest.trim().trim_matches('"');
        (!module.is_empty()).then(|| module.to_string())
    })
}

fn join_import_path(prefix: &str, rel: &Path) -> String {
    let mut segments: Vec<String> = Vec::new();
    if !prefix.is_empty() {
        segments.push(prefix.to_string());
    }
    segments.extend(
        rel.components()
            .filter_map(|c| c.as_os_str().to_str())
            .filter(|s| !s.is_empty() && *s != ".")
            .map(str::to_string),
    );
    segments.join("/")
}

// ============================================================================
// Tests
// ============================================================================
