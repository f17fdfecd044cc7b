//! Canonical line layout
//!
//! Trailing whitespace is trimmed, runs of blank lines collapse to one, blank lines never directly follow an opening
//! `{`/`(` line or precede a closing `}`/`)` line, and the text ends with exactly one newline.

/// Apply the canonical line layout to `source`.
pub fn canonical_layout(source: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut pending_blank = false;

    for raw in source.lines() {
        let line = raw.trim_end();
        if line.is_empty() {
            pending_blank = !lines.is_empty();
            continue;
        }
        if pending_blank {
            let prev = lines.last().copied().unwrap_or_default();
            let opens = prev.ends_with('{') || prev.ends_with('(');
            let closes = line.starts_with('}') || line.starts_with(')');
            if !opens && !closes {
                lines.push("");
            }
            pending_blank = false;
        }
        lines.push(line);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_trailing_whitespace() {
        assert_eq!(canonical_layout("a  \n\tb\t\n"), "a\n\tb\n");
    }

    #[test]
    fn test_collapses_blank_runs() {
        assert_eq!(canonical_layout("a\n\n\n\nb\n"), "a\n\nb\n");
    }

    #[test]
    fn test_drops_leading_and_trailing_blank_lines() {
        assert_eq!(canonical_layout("\n\na\n\n\n"), "a\n");
    }

    #[test]
    fn test_no_blank_inside_delimiters() {
        let src = "func f() {\n\n\treturn\n\n}\nimport (\n\n\t\"fmt\"\n\n)\n";
        assert_eq!(canonical_layout(src), "func f() {\n\treturn\n}\nimport (\n\t\"fmt\"\n)\n");
    }

    #[test]
    fn test_keeps_single_blank_between_declarations() {
        let src = "}\n\n// Next\nfunc g() {\n}\n";
        assert_eq!(canonical_layout(src), src);
    }

    #[test]
    fn test_adds_missing_final_newline() {
        assert_eq!(canonical_layout("package p"), "package p\n");
    }
}
