use std::collections::HashMap;
use std::path::Path;

use crate::error::{ProgramError, Result};

/// One spreadsheet row addressed by column header.
///
/// Cells keep their raw text; quoted cells may span multiple lines, which is
/// how the export encodes author and organisation lists.
#[derive(Debug, Clone, Default)]
pub struct SheetRow {
    cells: HashMap<String, String>,
}

impl SheetRow {
    /// Builds a row from header/value pairs. Mainly useful in tests.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let cells = pairs
            .into_iter()
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        Self { cells }
    }

    /// Returns the cell under `column`, or the empty string when the column
    /// is absent. Lookup misses are not errors at this level.
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    /// Returns the cell under `column`, failing when the spreadsheet does
    /// not carry the column at all. An empty cell is still a valid cell.
    pub fn require(&self, column: &str) -> Result<&str> {
        self.cells
            .get(column)
            .map(String::as_str)
            .ok_or_else(|| ProgramError::MissingColumn(column.to_string()))
    }
}

/// Reads a comma-delimited export with a header row into a sequence of
/// [`SheetRow`]s.
pub fn read_rows(path: &Path) -> Result<Vec<SheetRow>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut cells = HashMap::with_capacity(headers.len());
        for (idx, header) in headers.iter().enumerate() {
            let value = record.get(idx).unwrap_or("").to_string();
            cells.insert(header.clone(), value);
        }
        rows.push(SheetRow { cells });
    }
    Ok(rows)
}
