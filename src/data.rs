// src/data.rs
//
// Light wrappers around canonical and view-layer table data.
//
// - RecordTable: read-only holder for one fetched batch of submissions,
//                flattened to columns. Only the normalizer builds one.
// - TableView: derived (view) data produced from RecordTable by applying
//              the date and category filters for display and export.

use chrono::NaiveDateTime;
use serde_json::Value;

/// Authoritative flattened table for one fetch.
/// Built once by normalization; filters never mutate it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordTable {
    /// Column names in first-appearance order across all records.
    pub columns: Vec<String>,
    /// One cell per column per record; absent fields hold `Value::Null`.
    pub rows: Vec<Vec<Value>>,
    /// Parsed submission time per row, None where missing or unparsable.
    pub timestamps: Vec<Option<NaiveDateTime>>,
}

impl RecordTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name, if present.
    pub fn column_ix(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// View over every row, in table order.
    pub fn view(&self) -> TableView<'_> {
        TableView {
            row_ix: (0..self.rows.len()).collect(),
            raw: self,
        }
    }
}

/// Zero-copy filtered view for display and export.
/// Holds the list of surviving row indexes into the table.
#[derive(Clone, Debug)]
pub struct TableView<'a> {
    /// Positions of kept rows in the raw table
    pub row_ix: Vec<usize>,
    /// Borrowed pointer to the canonical table
    raw: &'a RecordTable,
}

impl<'a> TableView<'a> {
    /// The table this view projects.
    pub fn table(&self) -> &'a RecordTable {
        self.raw
    }

    /// Number of rows in the projection.
    pub fn len(&self) -> usize {
        self.row_ix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_ix.is_empty()
    }

    /// Borrow a single row by projected index (no cloning).
    pub fn row(&self, i: usize) -> Option<&'a [Value]> {
        self.row_ix
            .get(i)
            .and_then(|&ix| self.raw.rows.get(ix).map(|r| r.as_slice()))
    }

    /// Narrow the view to rows whose raw index satisfies `keep`.
    pub fn retain(mut self, keep: impl Fn(usize) -> bool) -> Self {
        self.row_ix.retain(|&ix| keep(ix));
        self
    }

    /// Materialize owned rows (for export boundaries).
    pub fn to_owned_rows(&self) -> Vec<Vec<Value>> {
        self.row_ix.iter().map(|&ix| self.raw.rows[ix].clone()).collect()
    }
}
