use crate::batch::Focus;
use crate::parser;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::time::Duration;


#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    pub had_error: bool,
    pub error: Option<String>,
    pub cancelled: bool,
    pub executed_statements: Vec<String>,
    pub tabs_created: bool,
    /// Whether a modifying statement was dispatched.
    pub modified: bool,
    pub focus: Option<Focus>,
}

impl BatchReport {
    pub fn executed_count(&self) -> usize {
        self.executed_statements.len()
    }

    pub fn is_success(&self) -> bool {
        !self.had_error && !self.cancelled
    }

    pub fn elapsed_ms(&self) -> f64 {
        millis(&self.elapsed)
    }
}

fn serialize_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(millis(elapsed))
}

fn millis(elapsed: &Duration) -> f64 {
    elapsed.as_nanos() as f64 / 1_000_000.0
}


/// First match wins: errors go to the console, then the newest result tab,
/// then the tables listing if SHOW TABLES ran.
pub fn select_focus(had_error: bool, tabs_created: bool, executed: &[String]) -> Option<Focus> {
    if had_error {
        Some(Focus::Console)
    } else if tabs_created {
        Some(Focus::LastCreatedTab)
    } else if executed.iter().any(|stmt| parser::is_show_tables(stmt)) {
        Some(Focus::TablesTab)
    } else {
        None
    }
}
