//! Import tidying
//!
//! Rewrites the parenthesized import block: drops aliased imports whose alias is never used as a qualifier, removes
//! duplicates, sorts by path, and separates standard-library imports from the rest with one blank line.

use std::collections::HashSet;

use super::FormatError;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ImportSpec {
    name: Option<String>,
    path: String,
}

impl ImportSpec {
    fn parse(line: &str, line_no: usize) -> Result<Self, FormatError> {
        let malformed = || FormatError::MalformedImport {
            line: line_no,
            spec: line.to_string(),
        };
        let (name, quoted) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (Some(name.to_string()), rest.trim()),
            None => (None, line),
        };
        let path = quoted
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .filter(|path| !path.is_empty() && !path.contains('"'))
            .ok_or_else(malformed)?;
        Ok(Self {
            name,
            path: path.to_string(),
        })
    }

    fn is_standard_library(&self) -> bool {
        let first = self.path.split('/').next().unwrap_or(&self.path);
        !first.contains('.')
    }

    fn is_used(&self, qualifiers: &HashSet<String>) -> bool {
        match self.name.as_deref() {
            // Without an alias the package name is unknown here; keep it.
            None | Some(".") | Some("_") => true,
            Some(alias) => qualifiers.contains(alias),
        }
    }

    fn render(&self) -> String {
        match &self.name {
            Some(name) => format!("\t{} \"{}\"", name, self.path),
            None => format!("\t\"{}\"", self.path),
        }
    }
}

/// Tidy every `import ( ... )` block in `source`.
pub fn tidy_imports(source: &str, qualifiers: &HashSet<String>) -> Result<String, FormatError> {
    let mut out: Vec<String> = Vec::new();
    let mut lines = source.lines().enumerate();

    while let Some((idx, line)) = lines.next() {
        if line.trim() != "import (" {
            out.push(line.to_string());
            continue;
        }

        let mut specs: Vec<ImportSpec> = Vec::new();
        let mut closed = false;
        for (spec_idx, spec_line) in lines.by_ref() {
            let trimmed = spec_line.trim();
            if trimmed == ")" {
                closed = true;
                break;
            }
            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }
            let spec = ImportSpec::parse(trimmed, spec_idx + 1)?;
            if !specs.contains(&spec) {
                specs.push(spec);
            }
        }
        if !closed {
            return Err(FormatError::Unclosed { line: idx + 1, open: '(' });
        }

        specs.retain(|spec| {
            let used = spec.is_used(qualifiers);
            if !used {
                tracing::debug!(path = %spec.path, "dropping unused import");
            }
            used
        });
        if specs.is_empty() {
            continue;
        }
        specs.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.name.cmp(&b.name)));

        let (standard, third_party): (Vec<_>, Vec<_>) = specs.iter().partition(|spec| spec.is_standard_library());
        out.push("import (".to_string());
        out.extend(standard.iter().map(|spec| spec.render()));
        if !standard.is_empty() && !third_party.is_empty() {
            out.push(String::new());
        }
        out.extend(third_party.iter().map(|spec| spec.render()));
        out.push(")".to_string());
    }

    let mut text = out.join("\n");
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn used(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sorts_and_groups() {
        let src = "package p\n\nimport (\n\tgomock \"go.uber.org/mock/gomock\"\n\treflect \"reflect\"\n\tcontext \"context\"\n)\n";
        let got = tidy_imports(src, &used(&["gomock", "reflect", "context"])).unwrap();
        assert_eq!(
            got,
            "package p\n\nimport (\n\tcontext \"context\"\n\treflect \"reflect\"\n\n\tgomock \"go.uber.org/mock/gomock\"\n)\n"
        );
    }

    #[test]
    fn test_drops_unused_alias() {
        let src = "import (\n\tstore \"example.com/store\"\n\tgomock \"go.uber.org/mock/gomock\"\n)\n";
        let got = tidy_imports(src, &used(&["gomock"])).unwrap();
        assert_eq!(got, "import (\n\tgomock \"go.uber.org/mock/gomock\"\n)\n");
    }

    #[test]
    fn test_keeps_dot_blank_and_unaliased() {
        let src = "import (\n\t. \"example.com/dsl\"\n\t_ \"example.com/init\"\n\t\"example.com/plain\"\n)\n";
        let got = tidy_imports(src, &used(&[])).unwrap();
        assert_eq!(
            got,
            "import (\n\t. \"example.com/dsl\"\n\t_ \"example.com/init\"\n\t\"example.com/plain\"\n)\n"
        );
    }

    #[test]
    fn test_removes_empty_block_and_duplicates() {
        let src = "package p\nimport (\n\tx \"example.com/x\"\n)\n";
        assert_eq!(tidy_imports(src, &used(&[])).unwrap(), "package p\n");

        let dup = "import (\n\tx \"example.com/x\"\n\tx \"example.com/x\"\n)\n";
        assert_eq!(
            tidy_imports(dup, &used(&["x"])).unwrap(),
            "import (\n\tx \"example.com/x\"\n)\n"
        );
    }

    #[test]
    fn test_malformed_spec_is_error() {
        let src = "import (\n\tgomock go.uber.org/mock/gomock\n)\n";
        let err = tidy_imports(src, &used(&[])).unwrap_err();
        assert!(matches!(err, FormatError::MalformedImport { line: 2, .. }));
    }

    #[test]
    fn test_unclosed_block_is_error() {
        let err = tidy_imports("import (\n\t\"fmt\"\n", &used(&[])).unwrap_err();
        assert!(matches!(err, FormatError::Unclosed { line: 1, open: '(' }));
    }
}
