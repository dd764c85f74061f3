mod distinct;
mod error;

pub use distinct::apply_distinct;
pub use error::{ResultFileError, ResultFileErrorKind};

use std::fs;
use std::io::ErrorKind;
use std::path::Path;


pub const FIELD_DELIMITER: char = '~';
/// Leading marker of a result file that reports a failed statement.
/// A table whose first header field starts with the marker is indistinguishable
/// from an error and reads as one.
pub const ERROR_SENTINEL: &str = "ERROR:";


/// What the engine left behind for one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultOutcome {
    Data(ResultTable),
    EngineError(String),
}

impl ResultOutcome {
    pub fn parse(contents: &str) -> Self {
        match contents.trim_start().strip_prefix(ERROR_SENTINEL) {
            Some(details) => Self::EngineError(details.trim().to_string()),
            None => Self::Data(ResultTable::from_contents(contents)),
        }
    }

    /// Read and classify the result file. A missing file means the engine produced nothing,
    /// which callers treat like an engine error.
    pub fn read(path: &Path) -> Result<Self, ResultFileError> {
        Ok(Self::parse(&read_contents(path)?))
    }
}


/// A flat `~`-delimited result: one header row, then data rows kept as raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    header: Vec<String>,
    rows: Vec<String>,
}

impl ResultTable {
    pub fn new(header: Vec<String>, rows: Vec<String>) -> Self {
        ResultTable { header, rows }
    }

    pub fn from_contents(contents: &str) -> Self {
        if contents.trim().is_empty() {
            return Self::default();
        }

        let mut lines = contents.lines();
        let header = lines
            .next()
            .map(|line| line.split(FIELD_DELIMITER).map(str::to_string).collect())
            .unwrap_or_default();
        let rows = lines.map(str::to_string).collect();

        ResultTable { header, rows }
    }

    pub fn from_file(path: &Path) -> Result<Self, ResultFileError> {
        Ok(Self::from_contents(&read_contents(path)?))
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// No header means the statement produced no table at all.
    pub fn has_columns(&self) -> bool {
        !self.header.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|column| column == name)
    }

    /// Values of the first column, one per data row.
    pub fn first_column(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|row| row.split(FIELD_DELIMITER).next())
            .map(str::to_string)
            .collect()
    }

    pub fn fields(row: &str) -> Vec<&str> {
        row.split(FIELD_DELIMITER).collect()
    }

    pub fn to_contents(&self) -> String {
        if !self.has_columns() {
            return String::new();
        }

        let mut contents = self.header.join(FIELD_DELIMITER.to_string().as_str());
        contents.push('\n');
        for row in &self.rows {
            contents.push_str(row);
            contents.push('\n');
        }
        contents
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ResultFileError> {
        fs::write(path, self.to_contents()).map_err(|source| ResultFileError {
            kind: ResultFileErrorKind::Write { source, path: path.to_path_buf() },
        })
    }
}


fn read_contents(path: &Path) -> Result<String, ResultFileError> {
    fs::read_to_string(path).map_err(|source| {
        let kind = if source.kind() == ErrorKind::NotFound {
            ResultFileErrorKind::Missing(path.to_path_buf())
        } else {
            ResultFileErrorKind::Read { source, path: path.to_path_buf() }
        };
        ResultFileError { kind }
    })
}
