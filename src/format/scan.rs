//! Lexical scan of Go source
//!
//! Not a parser: the scan only skips literals and comments, checks that `()[]{}` nest properly, and records which
//! identifiers are used as package qualifiers (`x.` not itself preceded by `.`).

use std::collections::HashSet;

use super::FormatError;

/// What the scan learned about a source file.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Identifiers that appear directly before a `.` in code.
    pub qualifiers: HashSet<String>,
}

/// Scan `source`, failing on unbalanced delimiters or unterminated literals and comments.
pub fn scan(source: &str) -> Result<ScanResult, FormatError> {
    let chars: Vec<char> = source.chars().collect();
    let mut result = ScanResult::default();
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut line = 1usize;
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\n' => {
                line += 1;
                i += 1;
            }
            '/' if chars.get(i + 1) == Some(&'/') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                let start = line;
                i += 2;
                loop {
                    match chars.get(i) {
                        None => return Err(FormatError::Unterminated { line: start, what: "comment" }),
                        Some('*') if chars.get(i + 1) == Some(&'/') => {
                            i += 2;
                            break;
                        }
                        Some('\n') => {
                            line += 1;
                            i += 1;
                        }
                        Some(_) => i += 1,
                    }
                }
            }
            '"' | '\'' => {
                let what = if c == '"' { "string literal" } else { "rune literal" };
                i += 1;
                loop {
                    match chars.get(i) {
                        None | Some('\n') => return Err(FormatError::Unterminated { line, what }),
                        Some('\\') => i += 2,
                        Some(&q) if q == c => {
                            i += 1;
                            break;
                        }
                        Some(_) => i += 1,
                    }
                }
            }
            '`' => {
                let start = line;
                i += 1;
                loop {
                    match chars.get(i) {
                        None => {
                            return Err(FormatError::Unterminated {
                                line: start,
                                what: "raw string literal",
                            });
                        }
                        Some('`') => {
                            i += 1;
                            break;
                        }
                        Some('\n') => {
                            line += 1;
                            i += 1;
                        }
                        Some(_) => i += 1,
                    }
                }
            }
            '(' | '[' | '{' => {
                stack.push((c, line));
                i += 1;
            }
            ')' | ']' | '}' => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                match stack.pop() {
                    Some((open, _)) if open == expected => {}
                    Some((open, open_line)) => {
                        return Err(FormatError::Mismatched {
                            line,
                            found: c,
                            open,
                            open_line,
                        });
                    }
                    None => return Err(FormatError::Unexpected { line, found: c }),
                }
                i += 1;
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let after_dot = start > 0 && chars[start - 1] == '.';
                if !after_dot && chars.get(i) == Some(&'.') {
                    result.qualifiers.insert(chars[start..i].iter().collect());
                }
            }
            c if c.is_ascii_digit() => {
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '.' || chars[i] == '_') {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }

    if let Some((open, open_line)) = stack.pop() {
        return Err(FormatError::Unclosed { line: open_line, open });
    }
    Ok(result)
}
