use phf::phf_set;

/// Clause keywords the formatter upper-cases.
/// Words likely to double as column names (KEY, VALUE, NAME, ...) are left out,
/// since distinct column lists are matched verbatim against result headers.
pub static CLAUSE_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "ADD", "ALL", "ALTER", "AND", "AS", "ASC", "BETWEEN", "BY", "CASE",
    "COLUMN", "CREATE", "CROSS", "DELETE", "DESC", "DESCRIBE", "DISTINCT",
    "DROP", "ELSE", "EXISTS", "FOREIGN", "FROM", "FULL", "GROUP", "HAVING",
    "IF", "IN", "INNER", "INSERT", "INTO", "IS", "JOIN", "LEFT", "LIKE",
    "LIMIT", "NOT", "NULL", "OFFSET", "ON", "OR", "ORDER", "OUTER",
    "PRIMARY", "REFERENCES", "RENAME", "RIGHT", "SELECT", "SET", "SHOW",
    "TABLE", "TABLES", "THEN", "TO", "TRUNCATE", "UNION", "UNIQUE",
    "UPDATE", "USING", "VALUES", "WHEN", "WHERE",
};
