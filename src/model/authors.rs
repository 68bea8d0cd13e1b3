use std::path::Path;

use indexmap::IndexMap;

use crate::error::Result;
use crate::io::{self, SheetRow};
use crate::text;

/// Flat author registry loaded from the optional authors spreadsheet.
///
/// Used to resolve affiliations when a session row leaves the inline
/// organisations cell empty. Lookups are exact full-name matches only.
#[derive(Debug, Default)]
pub struct AuthorsRegistry {
    records: IndexMap<String, SheetRow>,
}

impl AuthorsRegistry {
    pub fn load(path: &Path) -> Result<Self> {
        let rows = io::read_rows(path)?;
        let mut records = IndexMap::new();
        for row in rows {
            let name = row.get("name").trim().to_string();
            if name.is_empty() {
                continue;
            }
            // First occurrence wins on duplicate names.
            records.entry(name).or_insert(row);
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns a non-empty field of the named author's record.
    pub fn field(&self, name: &str, column: &str) -> Option<&str> {
        self.records
            .get(name)
            .map(|row| row.get(column))
            .filter(|value| !value.is_empty())
    }

    /// The author's affiliations, split from the semicolon-joined
    /// `organisation` column.
    pub fn organisations(&self, name: &str) -> Option<Vec<String>> {
        self.field(name, "organisation")
            .map(|value| text::split_list(value, ';'))
    }
}
