// src/filter.rs
//
// The two filter stages, in the order the shell applies them:
//
//   1. date window on the submission-time column (inclusive both ends,
//      end of day meaning 23:59:59);
//   2. categorical filters over the configured fields, each matching on
//      the cell's display string.
//
// Both stages narrow a TableView; the table itself is never touched.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::core::json::display_string;
use crate::core::when::{day_end, day_start};
use crate::data::TableView;
use crate::params::{DEFAULT_END_YMD, DEFAULT_START_YMD, FILTER_FIELDS, SUBMISSION_TIME_FIELD};

/// Inclusive day range. `end`'s whole day counts; 00:00:00 of the day
/// after does not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for DateRange {
    fn default() -> Self {
        let (y, m, d) = DEFAULT_START_YMD;
        let start = NaiveDate::from_ymd_opt(y, m, d).expect("valid default start date");
        let (y, m, d) = DEFAULT_END_YMD;
        let end = NaiveDate::from_ymd_opt(y, m, d).expect("valid default end date");
        DateRange { start, end }
    }
}

/// Chosen values per filterable field. An absent or empty entry means
/// "no restriction" for that field.
#[derive(Clone, Debug, Default)]
pub struct Selections {
    chosen: HashMap<String, BTreeSet<String>>,
}

impl Selections {
    pub fn set(&mut self, field: &str, values: impl IntoIterator<Item = String>) {
        self.chosen.insert(field.to_string(), values.into_iter().collect());
    }

    pub fn clear(&mut self, field: &str) {
        self.chosen.remove(field);
    }

    pub fn clear_all(&mut self) {
        self.chosen.clear();
    }

    pub fn get(&self, field: &str) -> Option<&BTreeSet<String>> {
        self.chosen.get(field)
    }

    /// True when the field actually restricts rows.
    pub fn is_active(&self, field: &str) -> bool {
        self.chosen.get(field).is_some_and(|set| !set.is_empty())
    }
}

/// Keep rows whose submission time falls inside the range. Rows with no
/// parsed timestamp are dropped; a table without the timestamp column
/// passes through untouched.
pub fn filter_by_date<'a>(view: TableView<'a>, range: &DateRange) -> TableView<'a> {
    let table = view.table();
    if table.column_ix(SUBMISSION_TIME_FIELD).is_none() {
        return view;
    }
    let lo = day_start(range.start);
    let hi = day_end(range.end);
    view.retain(|ix| {
        table.timestamps[ix].is_some_and(|ts| ts >= lo && ts <= hi)
    })
}

/// Apply one field's selection. Skipped when the field is absent from
/// the table or nothing is chosen for it.
pub fn apply_filter<'a>(view: TableView<'a>, field: &str, selections: &Selections) -> TableView<'a> {
    let table = view.table();
    let Some(col) = table.column_ix(field) else {
        return view;
    };
    let Some(wanted) = selections.get(field) else {
        return view;
    };
    if wanted.is_empty() {
        return view;
    }
    view.retain(|ix| wanted.contains(&display_string(table.rows[ix].get(col))))
}

/// Apply every active categorical filter, in FILTER_FIELDS order.
pub fn apply_filters<'a>(view: TableView<'a>, selections: &Selections) -> TableView<'a> {
    let mut view = view;
    for ff in FILTER_FIELDS {
        view = apply_filter(view, ff.field, selections);
    }
    view
}

/// Distinct option strings for one field, drawn from the rows the view
/// still holds, sorted. Empty when the field is absent.
pub fn filter_options(view: &TableView<'_>, field: &str) -> Vec<String> {
    let table = view.table();
    let Some(col) = table.column_ix(field) else {
        return Vec::new();
    };
    let mut distinct = BTreeSet::new();
    for i in 0..view.len() {
        if let Some(row) = view.row(i) {
            distinct.insert(display_string(row.get(col)));
        }
    }
    distinct.into_iter().collect()
}
