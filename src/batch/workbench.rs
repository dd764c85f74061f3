use crate::result::ResultTable;

use serde::Serialize;


/// UI surface that can receive focus once a batch is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    Console,
    LastCreatedTab,
    TablesTab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Plain,
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleMessage {
    pub text: String,
    pub style: MessageStyle,
}

impl ConsoleMessage {
    pub fn plain(text: impl Into<String>) -> Self {
        ConsoleMessage { text: text.into(), style: MessageStyle::Plain }
    }

    pub fn success(text: impl Into<String>) -> Self {
        ConsoleMessage { text: text.into(), style: MessageStyle::Success }
    }

    pub fn error(text: impl Into<String>) -> Self {
        ConsoleMessage { text: text.into(), style: MessageStyle::Error }
    }

    pub fn info(text: impl Into<String>) -> Self {
        ConsoleMessage { text: text.into(), style: MessageStyle::Info }
    }
}


/// Everything a batch touches outside the engine: console, result tabs,
/// catalog list, the document's unsaved-changes flag and focus.
pub trait Workbench: Send {
    fn append_message(&mut self, message: ConsoleMessage);

    /// Show a statement's result. Returns whether a new result tab was created.
    fn load_table(&mut self, table: &ResultTable) -> bool;

    /// Replace the catalog list with the names from a SHOW TABLES listing.
    fn set_tables(&mut self, tables: Vec<String>);

    fn remove_table(&mut self, name: &str);

    fn refresh_tables(&mut self);

    fn set_unsaved_changes(&mut self, unsaved: bool);

    fn has_unsaved_changes(&self) -> bool;

    fn focus(&mut self, focus: Focus);
}
