use std::error::Error;
use std::fmt;
use std::path::PathBuf;


#[derive(Debug)]
#[non_exhaustive]
pub struct ResultFileError {
    pub kind: ResultFileErrorKind
}

impl fmt::Display for ResultFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResultFileError: {}", self.kind)
    }
}

impl Error for ResultFileError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		Some(&self.kind)
	}
}

#[derive(Debug)]
pub enum ResultFileErrorKind {
    Missing(PathBuf),
    Read { source: std::io::Error, path: PathBuf },
    Write { source: std::io::Error, path: PathBuf },
}

impl fmt::Display for ResultFileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(path) => write!(f, "No result file produced at '{path:?}'"),
            Self::Read { path, .. } => write!(f, "Failed to read result file: '{path:?}'"),
            Self::Write { path, .. } => write!(f, "Failed to write result file: '{path:?}'"),
        }
    }
}

impl Error for ResultFileErrorKind {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::Read { source, .. } => Some(source),
			Self::Write { source, .. } => Some(source),
			_ => None,
		}
	}
}
