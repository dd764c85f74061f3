use crate::batch::{BatchExecutor, BatchReport, Workbench};
use crate::cli::error::{SqlbenchError, SqlbenchErrorKind};
use crate::db::{PostgresEngine, SqlEngine};

use std::fs;
use std::path::Path;


/// Ensures the database is reachable.
pub async fn peck(engine: &mut PostgresEngine) -> Result<(), SqlbenchError> {
    tracing::info!("Pecking database...");
    engine.ping().await?;
    tracing::info!("Pecking successful 🐦");

    Ok(())
}

pub fn read_script(path: &Path) -> Result<String, SqlbenchError> {
    tracing::debug!("Reading script from '{}'", path.display());

    fs::read_to_string(path).map_err(|source| SqlbenchError {
        kind: SqlbenchErrorKind::IoFileRead { source, path: path.to_path_buf() },
    })
}

/// Runs a script as a background batch. Ctrl-C cancels it before the next statement.
///
/// The executor is handed back alongside the report, so the caller keeps
/// ownership of the engine and workbench for the next submission.
pub async fn run<E, W>(
    executor: BatchExecutor<E, W>,
    script: String,
    interactive: bool,
) -> Result<(BatchExecutor<E, W>, BatchReport), SqlbenchError>
where
    E: SqlEngine + 'static,
    W: Workbench + 'static,
{
    let handle = executor.spawn(script, interactive);

    let token = handle.cancellation_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling after the current statement");
            token.cancel();
        }
    });

    let joined = handle.join().await;
    interrupt.abort();

    let (executor, report) = joined?;
    tracing::info!(
        "Executed {} statement(s) in {:.2} ms",
        report.executed_count(),
        report.elapsed_ms()
    );

    Ok((executor, report))
}
