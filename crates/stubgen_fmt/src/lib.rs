// stubgen_fmt - Formatter pass for rendered stub units
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Format error: {0}")]
    FormatError(String),
}

#[derive(Debug, Clone)]
pub struct FormatConfig {
    pub indent_size: usize,
    pub use_tabs: bool,
    /// Longest run of blank lines that survives formatting.
    pub max_blank_lines: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_size: 4,
            use_tabs: false,
            max_blank_lines: 1,
        }
    }
}

pub struct JavaFormatter {
    config: FormatConfig,
}

impl JavaFormatter {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    /// Normalise indentation and blank lines of a rendered unit. The pass is
    /// idempotent, so formatting an already-formatted unit is byte-stable.
    pub fn format_java_code(&self, source: &str) -> Result<String, FormatError> {
        let mut formatted_lines: Vec<String> = Vec::new();
        let mut indent_level: usize = 0;
        let mut in_block_comment = false;
        let mut blank_run = 0;

        for line in source.lines() {
            let trimmed = line.trim();

            if trimmed.is_empty() {
                blank_run += 1;
                if blank_run <= self.config.max_blank_lines {
                    formatted_lines.push(String::new());
                }
                continue;
            }
            blank_run = 0;

            if in_block_comment {
                // Continuation lines of a comment block keep the one-space
                // `*` gutter alignment instead of brace-based indentation.
                let aligned = if trimmed.starts_with('*') {
                    format!("{} {}", self.create_indent(indent_level), trimmed)
                } else {
                    format!("{}{}", self.create_indent(indent_level), trimmed)
                };
                formatted_lines.push(aligned);
                if block_comment_closes(trimmed) {
                    in_block_comment = false;
                }
                continue;
            }

            let (opens, closes, opens_comment) = scan_line(trimmed);

            // Closing braces at the start of the line dedent the line itself.
            let leading_closes = trimmed
                .chars()
                .take_while(|c| *c == '}')
                .count();
            let line_level = indent_level.saturating_sub(leading_closes);

            formatted_lines.push(format!("{}{}", self.create_indent(line_level), trimmed));

            indent_level = indent_level.saturating_sub(closes);
            indent_level += opens;
            if opens_comment {
                in_block_comment = true;
            }
        }

        let mut result = formatted_lines.join("\n");
        while result.ends_with('\n') {
            result.pop();
        }
        result.push('\n');
        Ok(result)
    }

    fn create_indent(&self, level: usize) -> String {
        if self.config.use_tabs {
            "\t".repeat(level)
        } else {
            " ".repeat(level * self.config.indent_size)
        }
    }
}

impl Default for JavaFormatter {
    fn default() -> Self {
        Self::new(FormatConfig::default())
    }
}

/// Count braces outside string/char literals and comments on one line, and
/// report whether the line opens a block comment that stays open.
fn scan_line(line: &str) -> (usize, usize, bool) {
    let mut opens = 0;
    let mut closes = 0;
    let mut in_string = false;
    let mut in_char = false;
    let mut escape_next = false;
    let mut chars = line.chars().peekable();
    let mut in_comment = false;

    while let Some(c) = chars.next() {
        if escape_next {
            escape_next = false;
            continue;
        }
        if in_comment {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                in_comment = false;
            }
            continue;
        }
        match c {
            '\\' if in_string || in_char => escape_next = true,
            '"' if !in_char => in_string = !in_string,
            '\'' if !in_string => in_char = !in_char,
            '/' if !in_string && !in_char => {
                match chars.peek() {
                    // The rest of the line is a line comment.
                    Some('/') => break,
                    Some('*') => {
                        chars.next();
                        in_comment = true;
                    }
                    _ => {}
                }
            }
            '{' if !in_string && !in_char => opens += 1,
            '}' if !in_string && !in_char => closes += 1,
            _ => {}
        }
    }

    (opens, closes, in_comment)
}

fn block_comment_closes(line: &str) -> bool {
    line.contains("*/")
}
