// benches/filters.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use kobo_dash::filter::{self, DateRange, Selections};
use kobo_dash::normalize::normalize_records;
use kobo_dash::params::SUBMISSION_TIME_FIELD;
use kobo_dash::{data::RecordTable, export};
use serde_json::json;

const PROVINCES: [&str; 4] = ["Nord", "Sud", "Est", "Ouest"];
const COMMUNES: [&str; 6] = ["Beni", "Butembo", "Goma", "Uvira", "Bukavu", "Kindu"];

fn synthetic_table(rows: usize) -> RecordTable {
    let records: Vec<_> = (0..rows)
        .map(|i| {
            json!({
                SUBMISSION_TIME_FIELD: format!("2024-{:02}-{:02}T09:{:02}:00", 1 + i % 12, 1 + i % 28, i % 60),
                "Identification/Province": PROVINCES[i % PROVINCES.len()],
                "Identification/Commune": COMMUNES[i % COMMUNES.len()],
                "Nom": format!("agent-{}", i % 40),
                "commandes_credits": (i % 50) as u64
            })
        })
        .collect();
    normalize_records(&records)
}

fn bench_filters(c: &mut Criterion) {
    let table = synthetic_table(10_000);
    let range = DateRange::default();

    let mut sel = Selections::default();
    sel.set("Identification/Province", [String::from("Nord"), String::from("Sud")]);
    sel.set("Nom", (0..10).map(|i| format!("agent-{i}")));

    c.bench_function("date_filter_10k", |b| {
        b.iter(|| {
            let view = filter::filter_by_date(table.view(), black_box(&range));
            black_box(view.len())
        })
    });

    c.bench_function("category_chain_10k", |b| {
        b.iter(|| {
            let view = filter::apply_filters(table.view(), black_box(&sel));
            black_box(view.len())
        })
    });

    c.bench_function("options_one_field_10k", |b| {
        b.iter(|| {
            let options = filter::filter_options(&table.view(), black_box("Identification/Commune"));
            black_box(options.len())
        })
    });

    c.bench_function("xlsx_encode_10k", |b| {
        b.iter(|| {
            let bytes = export::encode(&table.view()).expect("encode");
            black_box(bytes.len())
        })
    });
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
