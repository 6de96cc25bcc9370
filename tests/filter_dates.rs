// tests/filter_dates.rs
//
// Date-window semantics: inclusive on both ends, the end meaning
// 23:59:59 of that day, rows without a parsed timestamp dropped.

use chrono::NaiveDate;
use kobo_dash::filter::{filter_by_date, DateRange};
use kobo_dash::normalize::normalize_records;
use kobo_dash::params::SUBMISSION_TIME_FIELD;
use serde_json::json;

fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
    DateRange {
        start: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
        end: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
    }
}

fn table_with_times(times: &[&str]) -> kobo_dash::data::RecordTable {
    let records: Vec<_> = times
        .iter()
        .map(|t| json!({SUBMISSION_TIME_FIELD: t, "v": 1}))
        .collect();
    normalize_records(&records)
}

#[test]
fn bounds_are_inclusive_both_ends() {
    let table = table_with_times(&[
        "2024-03-01T00:00:00",
        "2024-03-10T23:59:59",
        "2024-02-29T23:59:59",
        "2024-03-11T00:00:00",
    ]);
    let view = filter_by_date(table.view(), &range((2024, 3, 1), (2024, 3, 10)));
    assert_eq!(view.row_ix, [0, 1]);
}

#[test]
fn end_of_day_stops_at_the_last_whole_second() {
    let table = table_with_times(&[
        "2024-03-10T23:59:59",
        "2024-03-10T23:59:59.400",
    ]);
    let view = filter_by_date(table.view(), &range((2024, 3, 1), (2024, 3, 10)));
    // 23:59:59.400 sits past the inclusive end instant.
    assert_eq!(view.row_ix, [0]);
}

#[test]
fn unparsable_and_missing_times_are_dropped() {
    let records = vec![
        json!({SUBMISSION_TIME_FIELD: "2024-03-05T08:00:00"}),
        json!({SUBMISSION_TIME_FIELD: "soon"}),
        json!({"v": 3}),
    ];
    let table = normalize_records(&records);
    let view = filter_by_date(table.view(), &range((2024, 1, 1), (2024, 12, 31)));
    assert_eq!(view.row_ix, [0]);
}

#[test]
fn table_without_the_time_column_passes_through() {
    let table = normalize_records(&[json!({"a": 1}), json!({"a": 2})]);
    let view = filter_by_date(table.view(), &range((2024, 1, 1), (2024, 1, 2)));
    assert_eq!(view.len(), 2);
}

#[test]
fn offset_timestamps_compare_as_utc() {
    // 01:30+02:00 on March 11 is 23:30 UTC on March 10, inside the range.
    let table = table_with_times(&["2024-03-11T01:30:00+02:00"]);
    let view = filter_by_date(table.view(), &range((2024, 3, 1), (2024, 3, 10)));
    assert_eq!(view.len(), 1);
}

#[test]
fn inverted_range_is_empty_not_an_error() {
    let table = table_with_times(&["2024-03-05T12:00:00"]);
    let view = filter_by_date(table.view(), &range((2024, 3, 10), (2024, 3, 1)));
    assert!(view.is_empty());
}

#[test]
fn default_range_covers_2024() {
    let range = DateRange::default();
    assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
}

#[test]
fn june_window_keeps_only_the_june_record() {
    let table = table_with_times(&[
        "2024-03-01T09:00:00",
        "2024-06-15T09:00:00",
        "2024-12-31T09:00:00",
    ]);
    let view = filter_by_date(table.view(), &range((2024, 6, 1), (2024, 6, 30)));
    assert_eq!(view.row_ix, [1]);
}

#[test]
fn single_day_range_works() {
    let table = table_with_times(&[
        "2024-03-05T00:00:00",
        "2024-03-05T23:59:59",
        "2024-03-06T00:00:00",
    ]);
    let view = filter_by_date(table.view(), &range((2024, 3, 5), (2024, 3, 5)));
    assert_eq!(view.row_ix, [0, 1]);
}
