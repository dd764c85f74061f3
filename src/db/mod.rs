mod catalog;
mod error;
mod postgres;

pub use catalog::SHOW_TABLES_QUERY;
pub use error::{EngineError, EngineErrorKind};
pub use postgres::PostgresEngine;

use crate::parser::DistinctColumns;
use crate::result::{self, ResultFileError, ResultTable};

use std::path::Path;


/// The SQL engine a batch dispatches to.
///
/// An engine reports statement failures through the result file (see
/// [`crate::result::ERROR_SENTINEL`]), not through its return value. `Err` is
/// reserved for failing to produce the result file at all.
#[async_trait::async_trait]
pub trait SqlEngine: Send {
    /// Execute one statement and overwrite `result_path` with its outcome.
    async fn execute(&mut self, statement: &str, result_path: &Path) -> Result<(), EngineError>;

    /// Apply a DISTINCT post-filter to `table`, the result just read back from
    /// `result_path`, and rewrite the file in place.
    fn filter_distinct(
        &mut self,
        table: &ResultTable,
        columns: &DistinctColumns,
        result_path: &Path,
    ) -> Result<ResultTable, ResultFileError> {
        result::apply_distinct(table, result_path, columns)
    }
}
