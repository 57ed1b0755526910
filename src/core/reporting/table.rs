//! Tabular report output

use crate::core::batch::ParsedObject;
use crate::utils::error::{FetchError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Rows of values under a fixed, caller-ordered column list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl ReportTable {
    /// Empty table with the given columns
    pub fn new<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Project records onto `columns`: unknown fields are dropped, missing ones are null
    pub fn from_records<S: AsRef<str>>(records: &[ParsedObject], columns: &[S]) -> Self {
        let mut table = Self::new(columns);
        table.rows = records
            .iter()
            .map(|record| {
                table
                    .columns
                    .iter()
                    .map(|c| record.get(c).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        table
    }

    /// Append `other`'s rows after ours; both tables must share columns
    pub fn append(&mut self, other: ReportTable) -> Result<()> {
        if other.columns != self.columns {
            return Err(FetchError::config(format!(
                "cannot append table with columns {:?} to table with columns {:?}",
                other.columns, self.columns
            )));
        }
        self.rows.extend(other.rows);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let position = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[position]).collect())
    }

    /// Rows as field maps, in row order
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }
}
