mod distinct;
mod keywords;
mod statement;

pub use distinct::{DistinctColumns, DistinctSpec};
pub use statement::{
    drop_table_name,
    is_create_table,
    is_drop_table,
    is_modifying,
    is_select,
    is_show_tables,
};

use keywords::CLAUSE_KEYWORDS;
use sqlparser::dialect::GenericDialect;
use sqlparser::tokenizer::{Token, Tokenizer};


static DIALECT_GENERIC: GenericDialect = GenericDialect {};

pub const STATEMENT_DELIMITER: char = ';';


/// Split a script into trimmed, non-empty statements, in script order.
/// Splitting is purely textual: a `;` inside a string literal or comment
/// also ends a statement.
pub fn split_statements(script: &str) -> Vec<String> {
    script
        .trim()
        .split(STATEMENT_DELIMITER)
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize a single statement: whitespace and comment runs collapse to one space,
/// clause keywords are upper-cased, identifiers and literals are kept verbatim.
pub fn format_statement(statement: &str) -> String {
    let tokens = match Tokenizer::new(&DIALECT_GENERIC, statement)
        .with_unescape(false)
        .tokenize() {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::debug!("Tokenizing failed, collapsing whitespace only: {e}");
                return collapse_whitespace(statement);
            }
        };

    let mut formatted = String::with_capacity(statement.len());

    for token in tokens {
        match token {
            Token::Whitespace(_) => {
                if !formatted.is_empty() && !formatted.ends_with(' ') {
                    formatted.push(' ');
                }
            }
            Token::Word(word) if word.quote_style.is_none() => {
                let upper = word.value.to_uppercase();
                if CLAUSE_KEYWORDS.contains(upper.as_str()) {
                    formatted.push_str(&upper);
                } else {
                    formatted.push_str(&word.value);
                }
            }
            other => formatted.push_str(&other.to_string()),
        }
    }

    formatted.trim().to_string()
}

fn collapse_whitespace(statement: &str) -> String {
    statement.split_whitespace().collect::<Vec<_>>().join(" ")
}
