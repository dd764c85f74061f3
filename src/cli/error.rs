use crate::db::EngineError;

use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use tokio::task::JoinError;
use tracing::subscriber::SetGlobalDefaultError;


#[derive(Debug)]
pub struct SqlbenchError {
    pub kind: SqlbenchErrorKind
}

impl fmt::Display for SqlbenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SqlbenchError: {}", self.kind)
    }
}

impl Error for SqlbenchError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.kind)
	}
}

#[derive(Debug)]
pub enum SqlbenchErrorKind {
    /// A statement failed; the batch stopped there.
    Batch(String),
    Cancelled(usize),
    Engine(EngineError),
    IoFileRead { source: std::io::Error, path: PathBuf },
    Join(JoinError),
    SetGlobalDefault(SetGlobalDefaultError),
}

impl fmt::Display for SqlbenchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Batch(details) => write!(f, "Batch stopped on error: {details}"),
            Self::Cancelled(executed) => write!(f, "Batch cancelled after {executed} statement(s)"),
            Self::Engine(error) => write!(f, "{}", error.kind),
            Self::IoFileRead { path, .. } => write!(f, "Failed to read script: '{path:?}'"),
            Self::Join(error) => write!(f, "Batch task failed: {error}"),
            Self::SetGlobalDefault(error) => write!(f, "Failed to set global default subscriber: {}", error),
        }
    }
}

impl Error for SqlbenchErrorKind {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::Engine(source) => Some(source),
			Self::IoFileRead { source, .. } => Some(source),
			Self::Join(source) => Some(source),
			Self::SetGlobalDefault(source) => Some(source),
			_ => None
		}
	}
}

impl From<EngineError> for SqlbenchError {
    fn from(error: EngineError) -> Self {
        SqlbenchError { kind: SqlbenchErrorKind::Engine(error) }
    }
}

impl From<JoinError> for SqlbenchError {
    fn from(error: JoinError) -> Self {
        SqlbenchError { kind: SqlbenchErrorKind::Join(error) }
    }
}

impl From<SetGlobalDefaultError> for SqlbenchError {
    fn from(error: SetGlobalDefaultError) -> Self {
        SqlbenchError { kind: SqlbenchErrorKind::SetGlobalDefault(error) }
    }
}
