use crate::batch::{BatchExecutor, BatchReport, Workbench};
use crate::db::SqlEngine;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::{JoinError, JoinHandle};


/// Cooperative stop request, checked between statements.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}


/// A batch running on the tokio runtime.
///
/// The executor moves into the task and only comes back through [`BatchHandle::join`],
/// so one executor never runs two batches at once.
pub struct BatchHandle<E, W> {
    cancel: CancellationToken,
    join: JoinHandle<(BatchExecutor<E, W>, BatchReport)>,
}

impl<E, W> BatchHandle<E, W>
where
    E: SqlEngine + 'static,
    W: Workbench + 'static,
{
    /// Ask the batch to stop before its next statement.
    /// A statement already handed to the engine still runs to completion.
    pub fn cancel(&self) {
        tracing::info!("Cancellation requested");
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    pub async fn join(self) -> Result<(BatchExecutor<E, W>, BatchReport), JoinError> {
        self.join.await
    }
}


impl<E, W> BatchExecutor<E, W>
where
    E: SqlEngine + 'static,
    W: Workbench + 'static,
{
    pub fn spawn(mut self, script: String, interactive: bool) -> BatchHandle<E, W> {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let join = tokio::spawn(async move {
            let report = self.execute_cancellable(&script, interactive, &token).await;
            (self, report)
        });

        BatchHandle { cancel, join }
    }
}
