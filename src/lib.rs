pub mod batch;
pub mod cli;
pub mod db;
pub mod parser;
pub mod result;

pub use batch::{BatchExecutor, BatchReport, Workbench};
pub use cli::error::SqlbenchError;
pub use cli::{commands, ux};
pub use result::{ResultOutcome, ResultTable};
