// tests/normalize.rs
//
// Raw `results` records in, flattened RecordTable out.

use kobo_dash::normalize::normalize_records;
use kobo_dash::params::SUBMISSION_TIME_FIELD;
use serde_json::{json, Value};

#[test]
fn columns_follow_first_appearance_across_records() {
    let records = vec![
        json!({"b": 1, "a": 2}),
        json!({"a": 3, "c": 4}),
    ];
    let table = normalize_records(&records);
    assert_eq!(table.columns, ["b", "a", "c"]);
    assert_eq!(table.rows[0], [json!(1), json!(2), Value::Null]);
    assert_eq!(table.rows[1], [Value::Null, json!(3), json!(4)]);
}

#[test]
fn nested_objects_flatten_to_dotted_columns() {
    let records = vec![json!({
        "meta": {"phone": {"model": "A52"}},
        "n": 7
    })];
    let table = normalize_records(&records);
    assert_eq!(table.columns, ["meta.phone.model", "n"]);
    assert_eq!(table.rows[0][0], json!("A52"));
}

#[test]
fn slashed_group_names_pass_through() {
    let records = vec![json!({"Identification/Province": "Sud-Kivu"})];
    let table = normalize_records(&records);
    assert_eq!(table.columns, ["Identification/Province"]);
}

#[test]
fn arrays_stay_whole() {
    let records = vec![json!({"attachments": [{"id": 1}, {"id": 2}]})];
    let table = normalize_records(&records);
    assert_eq!(table.columns, ["attachments"]);
    assert!(table.rows[0][0].is_array());
}

#[test]
fn non_object_records_become_all_null_rows() {
    let records = vec![json!({"a": 1}), json!(42), json!("stray")];
    let table = normalize_records(&records);
    assert_eq!(table.columns, ["a"]);
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.rows[1], [Value::Null]);
    assert_eq!(table.rows[2], [Value::Null]);
}

#[test]
fn submission_times_parse_where_possible() {
    let records = vec![
        json!({SUBMISSION_TIME_FIELD: "2024-03-05T10:15:00"}),
        json!({SUBMISSION_TIME_FIELD: "not a date"}),
        json!({"other": 1}),
    ];
    let table = normalize_records(&records);
    assert!(table.timestamps[0].is_some());
    assert!(table.timestamps[1].is_none());
    assert!(table.timestamps[2].is_none());
    // The raw cell text is untouched by parsing.
    assert_eq!(table.rows[0][0], json!("2024-03-05T10:15:00"));
}

#[test]
fn empty_input_yields_empty_table() {
    let table = normalize_records(&[]);
    assert!(table.is_empty());
    assert!(table.columns.is_empty());
    assert_eq!(table.len(), 0);
}
