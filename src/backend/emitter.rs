//! Go code emitter - builds Go source text line by line
//!
//! The emitter only tracks indentation; layout normalization (blank lines, import grouping) happens later in
//! [`crate::format`].

/// A buffer for building Go source code with tab indentation
#[derive(Debug, Default)]
pub struct GoEmitter {
    buffer: String,
    indent_level: usize,
}

impl GoEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the generated code
    pub fn finish(self) -> String {
        self.buffer
    }

    /// Write a line with current indentation
    pub fn line(&mut self, s: &str) {
        if !s.is_empty() {
            for _ in 0..self.indent_level {
                self.buffer.push('\t');
            }
            self.buffer.push_str(s);
        }
        self.buffer.push('\n');
    }

    /// Write a blank line
    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }

    /// Increase indent level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indent level
    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write a block with braces
    pub fn block<F>(&mut self, header: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.line(&format!("{header} {{"));
        self.indent();
        f(self);
        self.dedent();
        self.line("}");
    }

    /// Write a struct type with gofmt-aligned field types
    pub fn struct_def(&mut self, header: &str, fields: &[(&str, String)]) {
        let width = fields.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);
        self.block(&format!("type {header} struct"), |e| {
            for (name, ty) in fields {
                if name.is_empty() {
                    e.line(ty);
                } else {
                    e.line(&format!("{name:<width$} {ty}"));
                }
            }
        });
    }

    /// Write a line comment
    pub fn comment(&mut self, text: &str) {
        if text.is_empty() {
            self.line("//");
        } else {
            self.line(&format!("// {text}"));
        }
    }
}
