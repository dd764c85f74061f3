const MODIFYING_PREFIXES: [&str; 5] = ["INSERT", "UPDATE", "DELETE", "CREATE", "DROP"];
const SHOW_TABLES: &str = "SHOW TABLES";


/// A statement is modifying if it writes data or schema and so dirties the document.
pub fn is_modifying(statement: &str) -> bool {
    let upper = statement.trim().to_uppercase();
    MODIFYING_PREFIXES.iter().any(|prefix| upper.starts_with(prefix))
}

pub fn is_select(statement: &str) -> bool {
    statement.to_lowercase().starts_with("select")
}

/// Exact match on the formatted text.
pub fn is_show_tables(statement: &str) -> bool {
    statement == SHOW_TABLES
}

pub fn is_create_table(statement: &str) -> bool {
    statement.to_uppercase().starts_with("CREATE TABLE")
}

pub fn is_drop_table(statement: &str) -> bool {
    statement.to_uppercase().starts_with("DROP TABLE")
}

/// Extract the table name from a DROP TABLE statement: "DROP TABLE `orders`" -> "orders".
/// Takes the third whitespace-separated token and strips quote characters;
/// yields an empty name when there are fewer than three tokens.
pub fn drop_table_name(statement: &str) -> String {
    match statement.split_whitespace().nth(2) {
        Some(name) => name.replace(['`', '\'', '"'], ""),
        None => String::new(),
    }
}
