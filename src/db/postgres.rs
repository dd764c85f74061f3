use crate::db::{catalog, EngineError, EngineErrorKind, SqlEngine};
use crate::parser;
use crate::result::{ERROR_SENTINEL, FIELD_DELIMITER, ResultTable};

use sqlx::postgres::PgRow;
use sqlx::{Column, Connection, Executor, PgConnection, Row, Statement};
use std::fs;
use std::path::Path;

const NULL_VALUE: &str = "NULL";


/// Runs every statement on one session, so `BEGIN`/`COMMIT`, `SET` and
/// temporary tables carry over from one statement to the next.
pub struct PostgresEngine {
    conn_str: String,
    conn: Option<PgConnection>,
}


impl PostgresEngine {
    pub fn new(conn_str: &str) -> Self {
        PostgresEngine { conn_str: conn_str.to_string(), conn: None }
    }

    async fn connection(&mut self) -> Result<&mut PgConnection, sqlx::Error> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => {
                tracing::debug!("Opening database session");
                PgConnection::connect(&self.conn_str).await?
            }
        };

        Ok(self.conn.insert(conn))
    }

    /// Verify the server is reachable.
    pub async fn ping(&mut self) -> Result<(), EngineError> {
        self.connection().await?.ping().await?;

        Ok(())
    }

    async fn query(&mut self, statement: &str) -> Result<ResultTable, sqlx::Error> {
        let sql = catalog::translate(statement);
        let conn = self.connection().await?;

        // The simple query protocol returns every value in text format,
        // so each one decodes as a string regardless of its column type.
        let rows: Vec<PgRow> = conn.fetch_all(sqlx::raw_sql(sql)).await?;

        let header: Vec<String> = match rows.first() {
            Some(row) => row.columns().iter().map(|c| c.name().to_string()).collect(),
            // An empty result still has a header, which only the prepared statement knows.
            None if parser::is_select(sql.trim_start()) => conn
                .prepare(sql)
                .await?
                .columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect(),
            None => vec![],
        };

        let rows = rows
            .iter()
            .map(|row| {
                (0..row.len())
                    .map(|i| {
                        row.try_get_unchecked::<Option<String>, _>(i)
                            .map(|value| value.unwrap_or_else(|| NULL_VALUE.to_string()))
                    })
                    .collect::<Result<Vec<String>, sqlx::Error>>()
                    .map(|fields| fields.join(FIELD_DELIMITER.to_string().as_str()))
            })
            .collect::<Result<Vec<String>, sqlx::Error>>()?;

        Ok(ResultTable::new(header, rows))
    }
}


#[async_trait::async_trait]
impl SqlEngine for PostgresEngine {
    async fn execute(&mut self, statement: &str, result_path: &Path) -> Result<(), EngineError> {
        let contents = match self.query(statement).await {
            Ok(table) => {
                tracing::debug!("Statement returned {} row(s)", table.row_count());
                table.to_contents()
            }
            Err(e) => {
                tracing::debug!("Statement failed: {e}");
                if matches!(e, sqlx::Error::Io(_)) {
                    // The session is gone; reconnect on the next statement.
                    self.conn = None;
                }
                format!("{ERROR_SENTINEL} {e}\n")
            }
        };

        fs::write(result_path, contents).map_err(|source| EngineError {
            kind: EngineErrorKind::ResultFile { source, path: result_path.to_path_buf() },
        })
    }
}
