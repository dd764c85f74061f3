use crate::cli::error::SqlbenchError;
use crate::cli::output::{SqlbenchErrorJson, SqlbenchOutput, SqlbenchStatus};
use crate::result::ResultTable;

use std::fmt::Write;


pub fn setup_logging(verbose: u8, quiet: bool, json: bool) -> Result<(), SqlbenchError> {
    if json {
        // Mute all logging if JSON output is enabled
        tracing::subscriber::set_global_default(tracing::subscriber::NoSubscriber::default())?;
        return Ok(());
    }

    let level = if quiet {
        tracing::Level::ERROR
    } else { match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }};

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}


/// Lay a result table out as aligned text columns under a numbered caption.
pub fn render_table(table: &ResultTable, tab: usize) -> String {
    let header = table.header();
    let rows: Vec<Vec<&str>> = table.rows().iter().map(|row| ResultTable::fields(row)).collect();

    let mut widths: Vec<usize> = header.iter().map(|c| c.chars().count()).collect();
    for fields in &rows {
        for (i, field) in fields.iter().enumerate() {
            let width = field.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(width),
                None => widths.push(width),
            }
        }
    }

    let line = |fields: &[&str]| -> String {
        widths
            .iter()
            .enumerate()
            .map(|(i, w)| format!("{:<w$}", fields.get(i).copied().unwrap_or(""), w = *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut output = String::new();

    // writeln! appends to the String
    writeln!(&mut output, "--- Result {tab} ---").unwrap();
    let header: Vec<&str> = header.iter().map(String::as_str).collect();
    writeln!(&mut output, "{}", line(&header[..])).unwrap();
    writeln!(
        &mut output,
        "{}",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-")
    ).unwrap();
    for fields in &rows {
        writeln!(&mut output, "{}", line(&fields[..])).unwrap();
    }
    writeln!(&mut output, "({} row{})", rows.len(), if rows.len() == 1 { "" } else { "s" }).unwrap();

    output
}


/// Batch errors were already written to the console by the workbench;
/// anything else still needs reporting.
pub fn render_human_output(output: &SqlbenchOutput<serde_json::Value>) {
    match (&output.status, &output.error) {
        (SqlbenchStatus::Success, _) => tracing::debug!("Command '{}' succeeded", output.command),
        (SqlbenchStatus::Error, Some(SqlbenchErrorJson::Batch(_)))
        | (SqlbenchStatus::Error, Some(SqlbenchErrorJson::Cancelled(_))) => {
            tracing::debug!("Command '{}' did not complete", output.command)
        }
        (SqlbenchStatus::Error, Some(error)) => tracing::error!("{error:?}"),
        (SqlbenchStatus::Error, None) => tracing::error!("Command '{}' failed", output.command),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_aligned_columns() {
        let table = ResultTable::from_contents("id~name\n1~ada\n22~grace\n");
        let rendered = render_table(&table, 1);

        assert_eq!(
            rendered,
            "--- Result 1 ---\n\
             id | name\n\
             ---+------\n\
             1  | ada\n\
             22 | grace\n\
             (2 rows)\n"
        );
    }

    #[test]
    fn renders_header_only_tables() {
        let table = ResultTable::from_contents("table_name\n");
        let rendered = render_table(&table, 3);

        assert!(rendered.starts_with("--- Result 3 ---\ntable_name\n----------\n"));
        assert!(rendered.ends_with("(0 rows)\n"));
    }
}
