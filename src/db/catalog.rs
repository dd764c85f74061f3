use crate::parser;


/// Lists user tables, one per row, under a single `table_name` column.
pub const SHOW_TABLES_QUERY: &str = "
    SELECT table_name
    FROM information_schema.tables
    WHERE table_schema NOT IN ('information_schema', 'pg_catalog')
    ORDER BY table_name
";


/// Map workbench shorthands the server does not understand onto catalog queries.
pub fn translate(statement: &str) -> &str {
    if parser::is_show_tables(statement) {
        SHOW_TABLES_QUERY
    } else {
        statement
    }
}
