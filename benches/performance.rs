use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use cuentas::{LedgerStore, MonthKey, MovementKind, MovementRecord, SummaryService};
use cuentas_storage_json::JsonLedgerStorage;
use tempfile::tempdir;

fn build_sample_records(count: usize) -> Vec<MovementRecord> {
    let start_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|idx| {
            let date = start_date + Duration::days((idx % 365) as i64);
            let kind = if idx % 4 == 0 {
                MovementKind::Income
            } else {
                MovementKind::Expense
            };
            MovementRecord::new(date, kind, format!("entry {idx}"), 10.0 + (idx % 100) as f64)
        })
        .collect()
}

fn bench_monthly_summary(c: &mut Criterion) {
    let records = build_sample_records(black_box(10_000));
    let month = MonthKey::new(2024, 6);

    c.bench_function("monthly_summary_10k", |b| {
        b.iter(|| {
            let summary = SummaryService::summarize(&records, month);
            black_box(summary.totals);
        })
    });
}

fn bench_ledger_io(c: &mut Criterion) {
    let records = build_sample_records(black_box(10_000));

    c.bench_function("ledger_append_persist_10k", |b| {
        b.iter_batched(
            || {
                let dir = tempdir().expect("tempdir");
                let storage = JsonLedgerStorage::new(dir.path().to_path_buf()).expect("storage");
                let store = LedgerStore::load(Box::new(storage)).expect("load");
                (dir, store)
            },
            |(_dir, mut store)| {
                store.append(records.iter().cloned()).expect("append");
                black_box(store.len());
            },
            BatchSize::SmallInput,
        );
    });

    let dir = tempdir().expect("tempdir");
    let storage = JsonLedgerStorage::new(dir.path().to_path_buf()).expect("storage");
    LedgerStore::load(Box::new(storage))
        .expect("load")
        .append(records.iter().cloned())
        .expect("seed");

    c.bench_function("ledger_load_10k", |b| {
        b.iter(|| {
            let storage = JsonLedgerStorage::new(dir.path().to_path_buf()).expect("storage");
            let store = LedgerStore::load(Box::new(storage)).expect("load");
            black_box(store.len());
        })
    });
}

criterion_group!(benches, bench_monthly_summary, bench_ledger_io);
criterion_main!(benches);
