// src/normalize.rs
//
// Turn the raw `results` array into a RecordTable. Two passes: first
// collect the full column set in first-appearance order, then lay every
// record out against it. Records that are not JSON objects contribute
// no columns and land as all-null rows.

use serde_json::Value;

use crate::core::json::flatten_into;
use crate::core::when::parse_timestamp;
use crate::data::RecordTable;
use crate::params::SUBMISSION_TIME_FIELD;

pub fn normalize_records(records: &[Value]) -> RecordTable {
    let mut columns: Vec<String> = Vec::new();

    // Pass 1: union of flattened keys, ordered by first appearance.
    for record in records {
        let Value::Object(map) = record else { continue };
        let mut pairs = Vec::new();
        flatten_into("", map, &mut pairs);
        for (key, _) in pairs {
            if !columns.contains(&key) {
                columns.push(key);
            }
        }
    }

    let ts_ix = columns.iter().position(|c| c == SUBMISSION_TIME_FIELD);

    // Pass 2: one row per record, nulls where a column is absent.
    let mut rows = Vec::with_capacity(records.len());
    let mut timestamps = Vec::with_capacity(records.len());
    for record in records {
        let mut row = vec![Value::Null; columns.len()];
        if let Value::Object(map) = record {
            let mut pairs = Vec::new();
            flatten_into("", map, &mut pairs);
            for (key, value) in pairs {
                if let Some(ix) = columns.iter().position(|c| *c == key) {
                    row[ix] = value;
                }
            }
        }
        let ts = ts_ix.and_then(|ix| match &row[ix] {
            Value::String(text) => parse_timestamp(text),
            _ => None,
        });
        rows.push(row);
        timestamps.push(ts);
    }

    RecordTable { columns, rows, timestamps }
}
