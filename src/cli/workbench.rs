use crate::batch::{ConsoleMessage, Focus, MessageStyle, Workbench};
use crate::cli::ux;
use crate::result::ResultTable;

use std::io::Write;

const ANSI_RESET: &str = "\x1b[0m";
const ANSI_BOLD_GREEN: &str = "\x1b[1;32m";
const ANSI_RED: &str = "\x1b[31m";
const ANSI_CYAN: &str = "\x1b[36m";


/// Workbench for a terminal: the console and result tabs are written to `out`,
/// the catalog list is kept in memory.
pub struct TerminalWorkbench {
    out: Box<dyn Write + Send>,
    color: bool,
    tabs: usize,
    tables: Vec<String>,
    catalog_stale: bool,
    unsaved: bool,
    focused: Option<Focus>,
}

impl TerminalWorkbench {
    pub fn new(out: Box<dyn Write + Send>, color: bool) -> Self {
        TerminalWorkbench {
            out,
            color,
            tabs: 0,
            tables: vec![],
            catalog_stale: false,
            unsaved: false,
            focused: None,
        }
    }

    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    pub fn tab_count(&self) -> usize {
        self.tabs
    }

    pub fn is_catalog_stale(&self) -> bool {
        self.catalog_stale
    }

    pub fn focused(&self) -> Option<Focus> {
        self.focused
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write to the console: {e}");
        }
    }
}

impl Workbench for TerminalWorkbench {
    fn append_message(&mut self, message: ConsoleMessage) {
        let color = match message.style {
            MessageStyle::Plain => None,
            MessageStyle::Success => Some(ANSI_BOLD_GREEN),
            MessageStyle::Error => Some(ANSI_RED),
            MessageStyle::Info => Some(ANSI_CYAN),
        };

        let line = match color {
            Some(code) if self.color => format!("{code}{}{ANSI_RESET}\n", message.text),
            _ => format!("{}\n", message.text),
        };
        self.write(&line);
    }

    fn load_table(&mut self, table: &ResultTable) -> bool {
        if !table.has_columns() {
            return false;
        }

        self.tabs += 1;
        let rendered = ux::render_table(table, self.tabs);
        self.write(&rendered);
        true
    }

    fn set_tables(&mut self, tables: Vec<String>) {
        tracing::debug!("Catalog now lists {} table(s)", tables.len());
        let listing = if tables.is_empty() {
            String::from("Tables: (none)\n")
        } else {
            format!("Tables: {}\n", tables.join(", "))
        };
        self.tables = tables;
        self.catalog_stale = false;
        self.write(&listing);
    }

    fn remove_table(&mut self, name: &str) {
        tracing::debug!("Removing '{name}' from the table list");
        self.tables.retain(|table| table != name);
    }

    fn refresh_tables(&mut self) {
        // The terminal has no live listing to re-query; the next SHOW TABLES repopulates it.
        tracing::debug!("Table list marked for refresh");
        self.catalog_stale = true;
    }

    fn set_unsaved_changes(&mut self, unsaved: bool) {
        self.unsaved = unsaved;
    }

    fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    fn focus(&mut self, focus: Focus) {
        tracing::debug!("Focusing {focus:?}");
        self.focused = Some(focus);
    }
}
