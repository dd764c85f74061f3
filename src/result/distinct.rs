use crate::parser::DistinctColumns;
use crate::result::{FIELD_DELIMITER, ResultFileError, ResultTable};

use std::collections::HashSet;
use std::path::Path;


impl ResultTable {
    /// Keep only the first row seen for each distinct key, in original order.
    ///
    /// The key is the whole row when every column is requested (explicitly, or by
    /// requesting as many columns as the header has); otherwise it is the requested
    /// columns' values, in requested order. Requested names missing from the header
    /// are skipped.
    pub fn distinct(&self, columns: &DistinctColumns) -> ResultTable {
        let requested: Option<Vec<usize>> = match columns {
            DistinctColumns::All => None,
            DistinctColumns::Named(names) if names.len() == self.header.len() => None,
            DistinctColumns::Named(names) => Some(
                names.iter().filter_map(|name| self.column_index(name)).collect()
            ),
        };

        let mut seen: HashSet<String> = HashSet::with_capacity(self.rows.len());
        let rows = self.rows
            .iter()
            .filter(|row| {
                let key = match &requested {
                    None => row.to_string(),
                    Some(indices) => {
                        let fields = ResultTable::fields(row);
                        indices
                            .iter()
                            .filter_map(|i| fields.get(*i).copied())
                            .collect::<Vec<_>>()
                            .join(FIELD_DELIMITER.to_string().as_str())
                    }
                };
                seen.insert(key)
            })
            .cloned()
            .collect();

        ResultTable { header: self.header.clone(), rows }
    }
}


/// Filter `table`, just read from `path`, and rewrite the file with the surviving rows.
/// Tables without data rows are returned as they are and the file is left untouched.
pub fn apply_distinct(
    table: &ResultTable,
    path: &Path,
    columns: &DistinctColumns,
) -> Result<ResultTable, ResultFileError> {
    if table.rows.is_empty() {
        return Ok(table.clone());
    }

    let filtered = table.distinct(columns);
    tracing::debug!(
        "DISTINCT ({columns}) kept {} of {} row(s)",
        filtered.row_count(),
        table.row_count()
    );
    filtered.write_to(path)?;

    Ok(filtered)
}
