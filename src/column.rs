//! Column and multi-column files
//!
//! A column file holds one value per line. A multi-column file holds rows of
//! fields split on a single separator character:
//!
//! ```text
//! # host              | role
//! web1.example.org    | frontend
//! db1.example.org     | database   # primary
//! ```

use crate::error::ConfigResult;
use crate::line::{COMMENT, normalize};
use crate::reader::{ConfigReader, numbered_lines};
use smallvec::SmallVec;
use std::io::BufRead;
use tracing::debug;

/// One row of a multi-column file
///
/// Most rows hold a handful of fields, so up to four are stored inline.
pub type Row = SmallVec<[String; 4]>;

/// Reader for files with one value per line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Column;

impl Column {
    /// Creates a column reader
    pub fn new() -> Self {
        Self
    }
}

impl ConfigReader for Column {
    type Output = Vec<String>;

    fn name(&self) -> &'static str {
        "column"
    }

    fn from_reader<R: BufRead>(&self, reader: R) -> ConfigResult<Vec<String>> {
        let mut lines = Vec::new();
        for (_, line) in numbered_lines(reader) {
            let line = line?;
            let line = normalize(&line);
            if !line.is_empty() {
                lines.push(line.to_string());
            }
        }
        debug!(lines = lines.len(), "Parsed column file");
        Ok(lines)
    }
}

/// Reader for character-separated multi-column files
///
/// Fields are split on the separator without any quoting rules. Empty
/// fields are dropped, but a whitespace-only field is kept as `""` so the
/// remaining fields of a row keep their positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    separator: char,
}

impl Columns {
    /// Separator used when none is configured
    pub const DEFAULT_SEPARATOR: char = ',';

    /// Creates a reader splitting fields on `,`
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field separator
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Returns the field separator
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Splits one line into a row, or `None` if the row is dropped
    ///
    /// A row is dropped when its first field holds a comment or when every
    /// field is blank. A field cut short by a comment is dropped if nothing
    /// is left of it.
    fn row(&self, line: &str) -> Option<Row> {
        let line = line.trim_end_matches(['\n', '\r']);
        let mut fields = line.split(self.separator);
        let first = fields.next()?;
        if first.contains(COMMENT) {
            return None;
        }

        let row: Row = std::iter::once(first)
            .chain(fields)
            .filter_map(|field| match field.find(COMMENT) {
                Some(at) => Some(field[..at].trim()).filter(|kept| !kept.is_empty()),
                None => (!field.is_empty()).then(|| field.trim()),
            })
            .map(str::to_string)
            .collect();
        row.iter().any(|field| !field.is_empty()).then_some(row)
    }
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            separator: Self::DEFAULT_SEPARATOR,
        }
    }
}

impl ConfigReader for Columns {
    type Output = Vec<Row>;

    fn name(&self) -> &'static str {
        "columns"
    }

    fn from_reader<R: BufRead>(&self, reader: R) -> ConfigResult<Vec<Row>> {
        let mut rows = Vec::new();
        for (_, line) in numbered_lines(reader) {
            rows.extend(self.row(&line?));
        }
        debug!(rows = rows.len(), "Parsed multi-column file");
        Ok(rows)
    }
}
