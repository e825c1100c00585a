// stubgen_api/docs - Javadoc blocks carried through stub generation verbatim
use crate::types::ApiLevel;
use serde::{Deserialize, Serialize};

/// A Javadoc block attached to a package, type or member.
///
/// `lines` hold the body exactly as written in the surface description,
/// without the `/** */` fences and without the leading ` * ` gutter. The
/// generator re-emits them verbatim; `api_since`/`deprecated_since` are
/// parsed out for tooling (checks, reports) and never re-synthesised into
/// text that was not already there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DocComment {
    pub lines: Vec<String>,
    pub api_since: Option<ApiLevel>,
    pub deprecated_since: Option<ApiLevel>,
}

impl DocComment {
    pub fn new(lines: Vec<String>) -> Self {
        let api_since = Self::scan_level_tag(&lines, "@apiSince");
        let deprecated_since = Self::scan_level_tag(&lines, "@deprecatedSince");
        Self {
            lines,
            api_since,
            deprecated_since,
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines().map(|line| line.to_string()).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }

    fn scan_level_tag(lines: &[String], tag: &str) -> Option<ApiLevel> {
        for line in lines {
            let trimmed = line.trim();
            if let Some(rest) = trimmed.strip_prefix(tag) {
                let value = rest.trim().split_whitespace().next()?;
                if let Ok(level) = value.parse::<u32>() {
                    return Some(ApiLevel(level));
                }
            }
        }
        None
    }
}
