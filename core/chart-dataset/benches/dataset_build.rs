//! FILENAME: core/chart-dataset/benches/dataset_build.rs
//! PURPOSE: Measures dataset index build and per-cell lookup/formatting cost.

use chart_dataset::{ChartDataConfig, ChartDataSectionField, ChartDataSectionType, ChartDataset, ChartDatasetMeta};
use chart_format::{to_formatted_value, CellValue, FieldFormat, NumericFormat, UnitKey};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const ROWS: usize = 10_000;

fn sample_columns() -> Vec<Vec<CellValue>> {
    (0..ROWS)
        .map(|i| {
            vec![
                CellValue::from(format!("region-{}", i % 17)),
                CellValue::from(format!("product-{}", i % 113)),
                CellValue::from((i * 37 % 10_000) as f64),
                CellValue::from((i % 250) as f64),
            ]
        })
        .collect()
}

fn sample_metas() -> Vec<ChartDatasetMeta> {
    ["region", "product", "SUM(sales)", "AVG(discount)"]
        .iter()
        .map(|name| ChartDatasetMeta::new(name))
        .collect()
}

fn sample_sections() -> Vec<ChartDataConfig> {
    vec![
        ChartDataConfig::new(
            ChartDataSectionType::Group,
            vec![ChartDataSectionField::new("Region"), ChartDataSectionField::new("Product")],
        ),
        ChartDataConfig::new(
            ChartDataSectionType::Aggregate,
            vec![
                ChartDataSectionField::new("Sales").with_aggregate("SUM"),
                ChartDataSectionField::new("Discount").with_aggregate("AVG"),
            ],
        ),
    ]
}

fn bench_build(c: &mut Criterion) {
    let metas = sample_metas();
    let sections = sample_sections();

    c.bench_function("build_10k_rows", |b| {
        b.iter_batched(
            sample_columns,
            |columns| black_box(ChartDataset::build(columns, &metas, Some(&sections))),
            criterion::BatchSize::LargeInput,
        )
    });
}

fn bench_lookup_and_format(c: &mut Criterion) {
    let sections = sample_sections();
    let dataset = ChartDataset::build(sample_columns(), &sample_metas(), Some(&sections));
    let sales = ChartDataSectionField::new("sales").with_aggregate("sum");
    let format = FieldFormat::numeric(NumericFormat {
        decimal_places: Some(2),
        unit_key: UnitKey::Thousand,
        use_thousand_separator: true,
        prefix: None,
        suffix: None,
    });

    c.bench_function("format_column_10k", |b| {
        b.iter(|| {
            dataset
                .iter()
                .filter_map(|row| row.get_cell(&sales))
                .map(|cell| to_formatted_value(cell, Some(&format)))
                .count()
        })
    });
}

criterion_group!(benches, bench_build, bench_lookup_and_format);
criterion_main!(benches);
