mod report;
mod task;
mod workbench;

pub use report::{select_focus, BatchReport};
pub use task::{BatchHandle, CancellationToken};
pub use workbench::{ConsoleMessage, Focus, MessageStyle, Workbench};

use crate::db::SqlEngine;
use crate::parser::{self, DistinctColumns, DistinctSpec};
use crate::result::ResultOutcome;

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::Instant;


pub const SUCCESS_MESSAGE: &str = "Query has been successfully executed!";
pub const EMPTY_CATALOG_MESSAGE: &str = "No tables found in the database.";


/// Accumulated state of one batch run.
struct BatchState {
    started: Instant,
    started_at: DateTime<Utc>,
    error: Option<String>,
    cancelled: bool,
    executed: Vec<String>,
    tabs_created: bool,
    modified: bool,
    /// Row count of the latest SHOW TABLES, if one ran.
    show_tables_rows: Option<usize>,
}

impl BatchState {
    fn new() -> Self {
        BatchState {
            started: Instant::now(),
            started_at: Utc::now(),
            error: None,
            cancelled: false,
            executed: vec![],
            tabs_created: false,
            modified: false,
            show_tables_rows: None,
        }
    }
}


/// Runs scripts statement by statement against an engine, stopping at the first error.
pub struct BatchExecutor<E, W> {
    engine: E,
    workbench: W,
    result_path: PathBuf,
}

impl<E: SqlEngine, W: Workbench> BatchExecutor<E, W> {
    pub fn new(engine: E, workbench: W, result_path: impl Into<PathBuf>) -> Self {
        BatchExecutor { engine, workbench, result_path: result_path.into() }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn workbench(&self) -> &W {
        &self.workbench
    }

    pub fn workbench_mut(&mut self) -> &mut W {
        &mut self.workbench
    }

    pub fn result_path(&self) -> &Path {
        &self.result_path
    }

    pub fn into_parts(self) -> (E, W) {
        (self.engine, self.workbench)
    }

    /// Run a whole script to completion or to its first error.
    pub async fn execute_queries(&mut self, script: &str, interactive: bool) -> BatchReport {
        self.execute_cancellable(script, interactive, &CancellationToken::new()).await
    }

    /// Like [`Self::execute_queries`], checking `cancel` before each statement is dispatched.
    pub async fn execute_cancellable(
        &mut self,
        script: &str,
        interactive: bool,
        cancel: &CancellationToken,
    ) -> BatchReport {
        let statements = parser::split_statements(script);
        tracing::info!("Executing batch of {} statement(s)...", statements.len());

        let mut state = BatchState::new();

        for raw in &statements {
            if cancel.is_cancelled() {
                state.cancelled = true;
                break;
            }

            let statement = parser::format_statement(raw);
            if statement.is_empty() {
                // Comment-only segment.
                continue;
            }

            if let Err(details) = self.execute_statement(statement, &mut state).await {
                tracing::error!("Statement failed: {details}");
                self.workbench.append_message(ConsoleMessage::error(format!("\nError: {details}")));
                state.error = Some(details);
                break;
            }
        }

        let elapsed = state.started.elapsed();
        let had_error = state.error.is_some();

        if state.cancelled {
            tracing::warn!("Batch cancelled after {} statement(s)", state.executed.len());
            self.workbench.append_message(ConsoleMessage::info(format!(
                "\nExecution cancelled after {} statement(s).",
                state.executed.len()
            )));
        } else if !had_error && interactive {
            self.workbench.append_message(ConsoleMessage::success(format!("\n{SUCCESS_MESSAGE}")));
            self.workbench.append_message(ConsoleMessage::plain(format!(
                "Execution time: {:.2} ms",
                elapsed.as_nanos() as f64 / 1_000_000.0
            )));
            if state.show_tables_rows == Some(0) {
                self.workbench.append_message(ConsoleMessage::error(format!("\n{EMPTY_CATALOG_MESSAGE}")));
            }
        }

        let focus = select_focus(had_error, state.tabs_created, &state.executed);
        if let Some(focus) = focus {
            self.workbench.focus(focus);
        }

        tracing::info!(
            "Batch finished: {} statement(s) executed in {:?}{}",
            state.executed.len(),
            elapsed,
            if had_error { " (with errors)" } else { "" }
        );

        BatchReport {
            started_at: state.started_at,
            elapsed,
            had_error,
            error: state.error,
            cancelled: state.cancelled,
            executed_statements: state.executed,
            tabs_created: state.tabs_created,
            modified: state.modified,
            focus,
        }
    }

    /// Dispatch one formatted statement and consume its result file.
    /// `Err` carries the details of an engine error and ends the batch.
    async fn execute_statement(&mut self, statement: String, state: &mut BatchState) -> Result<(), String> {
        let (statement, distinct): (String, Option<DistinctColumns>) = match DistinctSpec::rewrite(&statement) {
            Some(spec) => (spec.statement, Some(spec.columns)),
            None => (statement, None),
        };
        tracing::debug!("Executing: {statement}");

        if parser::is_modifying(&statement) {
            state.modified = true;
            if !self.workbench.has_unsaved_changes() {
                self.workbench.set_unsaved_changes(true);
            }
        }

        self.engine
            .execute(&statement, &self.result_path)
            .await
            .map_err(|e| e.to_string())?;

        let table = match ResultOutcome::read(&self.result_path).map_err(|e| e.to_string())? {
            ResultOutcome::Data(table) => table,
            ResultOutcome::EngineError(details) => return Err(details),
        };

        let is_select = parser::is_select(&statement);
        let table = match distinct {
            Some(columns) if is_select => {
                match self.engine.filter_distinct(&table, &columns, &self.result_path) {
                    Ok(filtered) => filtered,
                    Err(e) => {
                        tracing::warn!("Skipping DISTINCT post-filter: {e}");
                        table
                    }
                }
            }
            _ => table,
        };

        // A SHOW TABLES listing feeds the catalog; every other result is shown as a tab.
        if parser::is_show_tables(&statement) {
            state.show_tables_rows = Some(table.row_count());
            self.workbench.set_tables(table.first_column());
        } else {
            state.tabs_created |= self.workbench.load_table(&table);
        }

        if parser::is_drop_table(&statement) {
            self.workbench.remove_table(&parser::drop_table_name(&statement));
        } else if parser::is_create_table(&statement) {
            self.workbench.refresh_tables();
        }

        state.executed.push(statement);

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{EngineError, EngineErrorKind};
    use crate::result::{ResultFileError, ResultFileErrorKind, ResultTable, tests::scratch_path};

    use std::collections::HashMap;
    use std::fs;
    use std::io;

    enum Response {
        Contents(&'static str),
        NoFile,
        WriteFailure,
    }

    /// Answers statements from a table of canned result files.
    #[derive(Default)]
    struct ScriptedEngine {
        responses: HashMap<&'static str, Response>,
        dispatched: Vec<String>,
        cancel_after: Option<(&'static str, CancellationToken)>,
        read_only_results: bool,
    }

    impl ScriptedEngine {
        fn respond(mut self, statement: &'static str, response: Response) -> Self {
            self.responses.insert(statement, response);
            self
        }
    }

    #[async_trait::async_trait]
    impl SqlEngine for ScriptedEngine {
        async fn execute(&mut self, statement: &str, result_path: &Path) -> Result<(), EngineError> {
            self.dispatched.push(statement.to_string());
            if let Some((trigger, token)) = &self.cancel_after {
                if *trigger == statement {
                    token.cancel();
                }
            }

            match self.responses.get(statement) {
                Some(Response::Contents(contents)) => fs::write(result_path, contents).unwrap(),
                None => fs::write(result_path, "").unwrap(),
                Some(Response::NoFile) => {
                    let _ = fs::remove_file(result_path);
                }
                Some(Response::WriteFailure) => {
                    return Err(EngineError {
                        kind: EngineErrorKind::ResultFile {
                            source: io::Error::new(io::ErrorKind::Other, "read-only"),
                            path: result_path.to_path_buf(),
                        },
                    });
                }
            }
            Ok(())
        }

        fn filter_distinct(
            &mut self,
            table: &ResultTable,
            columns: &DistinctColumns,
            result_path: &Path,
        ) -> Result<ResultTable, ResultFileError> {
            if self.read_only_results {
                return Err(ResultFileError {
                    kind: ResultFileErrorKind::Write {
                        source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
                        path: result_path.to_path_buf(),
                    },
                });
            }
            crate::result::apply_distinct(table, result_path, columns)
        }
    }

    #[derive(Default)]
    struct RecordingWorkbench {
        messages: Vec<ConsoleMessage>,
        loaded: Vec<ResultTable>,
        tables: Option<Vec<String>>,
        removed: Vec<String>,
        refreshes: usize,
        unsaved: bool,
        unsaved_writes: usize,
        focus: Option<Focus>,
    }

    impl RecordingWorkbench {
        fn has_message(&self, needle: &str) -> bool {
            self.messages.iter().any(|m| m.text.contains(needle))
        }
    }

    impl Workbench for RecordingWorkbench {
        fn append_message(&mut self, message: ConsoleMessage) {
            self.messages.push(message);
        }

        fn load_table(&mut self, table: &ResultTable) -> bool {
            self.loaded.push(table.clone());
            table.has_columns()
        }

        fn set_tables(&mut self, tables: Vec<String>) {
            self.tables = Some(tables);
        }

        fn remove_table(&mut self, name: &str) {
            self.removed.push(name.to_string());
        }

        fn refresh_tables(&mut self) {
            self.refreshes += 1;
        }

        fn set_unsaved_changes(&mut self, unsaved: bool) {
            self.unsaved = unsaved;
            self.unsaved_writes += 1;
        }

        fn has_unsaved_changes(&self) -> bool {
            self.unsaved
        }

        fn focus(&mut self, focus: Focus) {
            self.focus = Some(focus);
        }
    }

    fn executor(engine: ScriptedEngine) -> BatchExecutor<ScriptedEngine, RecordingWorkbench> {
        BatchExecutor::new(engine, RecordingWorkbench::default(), scratch_path())
    }

    fn cleanup<E: SqlEngine, W: Workbench>(executor: &BatchExecutor<E, W>) {
        let _ = fs::remove_file(executor.result_path());
    }

    #[tokio::test]
    async fn executes_formatted_statements_in_order() {
        let mut executor = executor(ScriptedEngine::default());

        let report = executor
            .execute_queries("create table t (a int);\n insert into t values (1);; select a from t", true)
            .await;

        let expected = vec![
            "CREATE TABLE t (a int)",
            "INSERT INTO t VALUES (1)",
            "SELECT a FROM t",
        ];
        assert_eq!(executor.engine().dispatched, expected);
        assert_eq!(report.executed_statements, expected);
        assert!(report.is_success());
        assert!(executor.workbench().has_message(SUCCESS_MESSAGE));
        assert!(executor.workbench().has_message("Execution time:"));
        assert_eq!(executor.workbench().refreshes, 1);
        cleanup(&executor);
    }

    #[tokio::test]
    async fn stops_at_first_error() {
        let engine = ScriptedEngine::default()
            .respond("SELECT a FROM t", Response::Contents("a\n1\n"))
            .respond("SELECT b FROM missing", Response::Contents("ERROR: relation \"missing\" does not exist\n"));
        let mut executor = executor(engine);

        let report = executor
            .execute_queries("SELECT a FROM t; SELECT b FROM missing; DROP TABLE t", true)
            .await;

        assert_eq!(executor.engine().dispatched.len(), 2);
        assert!(report.had_error);
        assert_eq!(report.error.as_deref(), Some("relation \"missing\" does not exist"));
        assert_eq!(report.executed_count(), 1);
        // Tabs were created before the failure, but the console still wins.
        assert!(report.tabs_created);
        assert_eq!(report.focus, Some(Focus::Console));

        let workbench = executor.workbench();
        assert_eq!(workbench.focus, Some(Focus::Console));
        assert!(workbench.has_message("does not exist"));
        assert!(!workbench.has_message(SUCCESS_MESSAGE));
        assert!(workbench.removed.is_empty());
        cleanup(&executor);
    }

    #[tokio::test]
    async fn missing_result_file_and_engine_failure_are_errors() {
        let engine = ScriptedEngine::default()
            .respond("SELECT 1", Response::NoFile)
            .respond("SELECT 2", Response::WriteFailure);
        let mut executor = executor(engine);

        let first = executor.execute_queries("SELECT 1; SELECT 3", true).await;
        assert!(first.had_error);
        assert_eq!(executor.engine().dispatched, vec!["SELECT 1"]);

        let second = executor.execute_queries("SELECT 2; SELECT 3", true).await;
        assert!(second.had_error);
        assert!(second.error.unwrap().contains("Failed to write result file"));
        assert_eq!(executor.engine().dispatched, vec!["SELECT 1", "SELECT 2"]);
        cleanup(&executor);
    }

    #[tokio::test]
    async fn marks_unsaved_changes_once() {
        let mut executor = executor(ScriptedEngine::default());
        let report = executor.execute_queries("SELECT 1; SHOW TABLES", false).await;
        assert!(!report.modified);
        assert!(!executor.workbench().unsaved);
        assert_eq!(executor.workbench().unsaved_writes, 0);

        let report = executor
            .execute_queries("INSERT INTO t VALUES (1); UPDATE t SET a = 2; DELETE FROM t", false)
            .await;
        assert!(report.modified);
        assert!(executor.workbench().unsaved);
        assert_eq!(executor.workbench().unsaved_writes, 1);
        cleanup(&executor);
    }

    #[tokio::test]
    async fn rewrites_and_filters_distinct_selects() {
        let engine = ScriptedEngine::default()
            .respond("SELECT a, b FROM t", Response::Contents("a~b~c\n1~2~3\n1~2~9\n4~5~6\n"));
        let mut executor = executor(engine);

        let report = executor.execute_queries("select distinct (a, b) from t", true).await;

        assert_eq!(executor.engine().dispatched, vec!["SELECT a, b FROM t"]);
        assert_eq!(report.executed_statements, vec!["SELECT a, b FROM t"]);

        assert_eq!(executor.workbench().loaded[0].rows(), &["1~2~3", "4~5~6"]);
        assert_eq!(
            fs::read_to_string(executor.result_path()).unwrap(),
            "a~b~c\n1~2~3\n4~5~6\n"
        );
        assert_eq!(report.focus, Some(Focus::LastCreatedTab));
        cleanup(&executor);
    }

    #[tokio::test]
    async fn failed_distinct_rewrite_loads_unfiltered_rows() {
        let engine = ScriptedEngine {
            read_only_results: true,
            ..Default::default()
        }
        .respond("SELECT a, b FROM t", Response::Contents("a~b~c\n1~2~3\n1~2~9\n4~5~6\n"))
        .respond("SELECT 2", Response::Contents("n\n2\n"));
        let mut executor = executor(engine);

        let report = executor.execute_queries("select distinct (a, b) from t; select 2", true).await;

        assert!(report.is_success());
        assert_eq!(executor.engine().dispatched, vec!["SELECT a, b FROM t", "SELECT 2"]);
        assert_eq!(executor.workbench().loaded[0].rows(), &["1~2~3", "1~2~9", "4~5~6"]);
        assert!(executor.workbench().has_message(SUCCESS_MESSAGE));
        cleanup(&executor);
    }

    #[tokio::test]
    async fn only_show_tables_feeds_the_catalog() {
        let engine = ScriptedEngine::default()
            .respond("SHOW TABLES", Response::Contents("table_name\norders\nusers\n"))
            .respond("INSERT INTO orders VALUES (42) RETURNING id", Response::Contents("id\n42\n"))
            .respond("WITH x AS (SELECT 1 AS a) SELECT a FROM x", Response::Contents("a\n1\n"));
        let mut executor = executor(engine);

        let report = executor
            .execute_queries(
                "SHOW TABLES; INSERT INTO orders VALUES (42) RETURNING id; WITH x AS (SELECT 1 AS a) SELECT a FROM x",
                true,
            )
            .await;

        let workbench = executor.workbench();
        assert_eq!(workbench.tables, Some(vec!["orders".to_string(), "users".to_string()]));
        assert_eq!(workbench.loaded.len(), 2);
        assert!(report.tabs_created);
        assert_eq!(report.focus, Some(Focus::LastCreatedTab));
        cleanup(&executor);
    }

    #[tokio::test]
    async fn keeps_catalog_in_sync() {
        let mut executor = executor(ScriptedEngine::default());

        executor
            .execute_queries("DROP TABLE `orders`; CREATE TABLE t (a INT); DROP TABLE", false)
            .await;

        let workbench = executor.workbench();
        assert_eq!(workbench.removed, vec!["orders".to_string(), String::new()]);
        assert_eq!(workbench.refreshes, 1);
        cleanup(&executor);
    }

    #[tokio::test]
    async fn reports_empty_catalog_for_interactive_runs() {
        let engine = ScriptedEngine::default().respond("SHOW TABLES", Response::Contents("table_name\n"));
        let mut executor = executor(engine);

        let report = executor.execute_queries("show tables", true).await;
        assert!(executor.workbench().has_message(EMPTY_CATALOG_MESSAGE));
        assert_eq!(report.focus, Some(Focus::TablesTab));
        assert!(!report.tabs_created);

        let mut quiet = executor;
        quiet.workbench_mut().messages.clear();
        quiet.execute_queries("SHOW TABLES", false).await;
        assert!(quiet.workbench().messages.is_empty());
        cleanup(&quiet);
    }

    #[tokio::test]
    async fn populated_catalog_has_no_notice() {
        let engine = ScriptedEngine::default()
            .respond("SHOW TABLES", Response::Contents("table_name\norders\n"));
        let mut executor = executor(engine);

        executor.execute_queries("SHOW TABLES", true).await;
        assert!(executor.workbench().has_message(SUCCESS_MESSAGE));
        assert!(!executor.workbench().has_message(EMPTY_CATALOG_MESSAGE));
        cleanup(&executor);
    }

    #[tokio::test]
    async fn cancellation_is_checked_between_statements() {
        let token = CancellationToken::new();
        let engine = ScriptedEngine {
            cancel_after: Some(("SELECT 2", token.clone())),
            ..Default::default()
        };
        let mut executor = executor(engine);

        let report = executor
            .execute_cancellable("SELECT 1; SELECT 2; SELECT 3", true, &token)
            .await;

        // The statement in flight when cancellation arrived still completes.
        assert_eq!(executor.engine().dispatched, vec!["SELECT 1", "SELECT 2"]);
        assert_eq!(report.executed_count(), 2);
        assert!(report.cancelled);
        assert!(!report.is_success());
        assert!(executor.workbench().has_message("cancelled"));
        assert!(!executor.workbench().has_message(SUCCESS_MESSAGE));
        cleanup(&executor);
    }

    #[tokio::test]
    async fn spawned_batch_returns_its_executor() {
        let handle = executor(ScriptedEngine::default()).spawn("SELECT 1; SELECT 2".to_string(), true);
        let (executor, report) = handle.join().await.unwrap();

        assert_eq!(report.executed_count(), 2);
        assert_eq!(executor.engine().dispatched.len(), 2);
        cleanup(&executor);
    }

    #[tokio::test]
    async fn spawned_batch_cancelled_before_start_dispatches_nothing() {
        let handle = executor(ScriptedEngine::default()).spawn("SELECT 1; SELECT 2".to_string(), true);
        handle.cancel();
        let (executor, report) = handle.join().await.unwrap();

        assert!(report.cancelled);
        assert!(executor.engine().dispatched.is_empty());
        cleanup(&executor);
    }
}
