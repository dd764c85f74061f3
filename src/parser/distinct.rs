use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;


static DISTINCT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^SELECT\s+DISTINCT\s*(?:\((.*?)\))?\s*(.*)$")
        .expect("DISTINCT pattern is a valid regex")
});

pub const ALL_COLUMNS: &str = "*";


/// Columns a DISTINCT post-filter deduplicates on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "columns", rename_all = "snake_case")]
pub enum DistinctColumns {
    All,
    /// Requested names, in requested order. Never empty.
    Named(Vec<String>),
}

impl DistinctColumns {
    fn from_list(list: &str) -> Self {
        if list.trim() == ALL_COLUMNS {
            return Self::All;
        }
        let names: Vec<String> = list.split(',').map(|c| c.trim().to_string()).collect();
        if names.iter().any(|c| c == ALL_COLUMNS) {
            Self::All
        } else {
            Self::Named(names)
        }
    }
}

impl fmt::Display for DistinctColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "{ALL_COLUMNS}"),
            Self::Named(names) => write!(f, "{}", names.join(", ")),
        }
    }
}


/// A `SELECT DISTINCT` statement rewritten into a plain `SELECT`,
/// plus the columns to deduplicate on once the engine has produced its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistinctSpec {
    pub statement: String,
    pub columns: DistinctColumns,
}

impl DistinctSpec {
    /// Rewrite a formatted statement for the engine.
    ///
    /// Returns `None` for anything that is not `SELECT DISTINCT ...`, and also when the
    /// prefix is there but the pattern does not match; the statement then runs verbatim.
    pub fn rewrite(statement: &str) -> Option<Self> {
        if !statement.to_lowercase().starts_with("select distinct") {
            return None;
        }

        let Some(captures) = DISTINCT_PATTERN.captures(statement) else {
            tracing::debug!("Malformed SELECT DISTINCT, executing verbatim: {statement}");
            return None;
        };

        let list = captures.get(1).map(|m| m.as_str());
        let rest = captures.get(2).map_or("", |m| m.as_str()).trim();

        let columns = match list {
            Some(list) => DistinctColumns::from_list(list),
            // Without a parenthesized list, DISTINCT covers every output column.
            None => DistinctColumns::All,
        };

        let statement = match list {
            Some(list) => format!("SELECT {} {}", list.trim(), rest),
            None => format!("SELECT {rest}"),
        };

        Some(DistinctSpec { statement: statement.trim().to_string(), columns })
    }
}
