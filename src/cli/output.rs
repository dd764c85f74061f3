// {
//   "command": "run",
//   "status": "error",
//   "data": {
//     "started_at": "2026-10-18T09:12:44.120Z",
//     "elapsed_ms": 12.7,
//     "had_error": true,
//     "error": "relation \"orders\" does not exist",
//     "executed_statements": ["CREATE TABLE t (a int)"],
//     ...
//   },
//   "error": {"type": "batch", "message": "Batch stopped on error: ..."}
// }
use crate::batch::BatchReport;
use crate::cli::error::{SqlbenchError, SqlbenchErrorKind};
use serde::Serialize;


#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "message", rename_all = "snake_case")]
pub enum SqlbenchErrorJson {
    Batch(String),
    Cancelled(String),
    Engine(String),
    IoFileRead(String),
    Join(String),
    SetGlobalDefault(String),
}

impl From<&SqlbenchError> for SqlbenchErrorJson {
    fn from(e: &SqlbenchError) -> Self {
        let message = e.kind.to_string();

        match &e.kind {
            SqlbenchErrorKind::Batch(_) => Self::Batch(message),
            SqlbenchErrorKind::Cancelled(_) => Self::Cancelled(message),
            SqlbenchErrorKind::Engine(_) => Self::Engine(message),
            SqlbenchErrorKind::IoFileRead { .. } => Self::IoFileRead(message),
            SqlbenchErrorKind::Join(_) => Self::Join(message),
            SqlbenchErrorKind::SetGlobalDefault(_) => Self::SetGlobalDefault(message),
        }
    }
}


#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlbenchStatus {
    Success,
    Error,
}

#[derive(Debug, Serialize)]
pub struct SqlbenchOutput<T: Serialize> {
    pub command: String,
    pub status: SqlbenchStatus,
    pub data: Option<T>,
    pub error: Option<SqlbenchErrorJson>,
}

impl SqlbenchOutput<serde_json::Value> {
    pub fn success(command: String, data: Option<serde_json::Value>) -> Self {
        SqlbenchOutput { command, status: SqlbenchStatus::Success, data, error: None }
    }

    pub fn failure(command: String, error: &SqlbenchError) -> Self {
        SqlbenchOutput {
            command,
            status: SqlbenchStatus::Error,
            data: None,
            error: Some(error.into()),
        }
    }

    /// A failed or cancelled batch is an error, but still carries its report.
    pub fn from_report(command: String, report: &BatchReport) -> Self {
        let data = serde_json::to_value(report).ok();

        let error = if let Some(details) = &report.error {
            Some(SqlbenchError { kind: SqlbenchErrorKind::Batch(details.clone()) })
        } else if report.cancelled {
            Some(SqlbenchError { kind: SqlbenchErrorKind::Cancelled(report.executed_count()) })
        } else {
            None
        };

        match error {
            Some(error) => SqlbenchOutput {
                command,
                status: SqlbenchStatus::Error,
                data,
                error: Some((&error).into()),
            },
            None => Self::success(command, data),
        }
    }
}
