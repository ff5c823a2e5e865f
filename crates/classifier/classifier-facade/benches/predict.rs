//! Serving hot path: one scaled row through each fitted family.

use classifier_facade::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn training_table() -> (Vec<[f64; 8]>, Vec<u8>) {
    let x: Vec<[f64; 8]> = (0..500)
        .map(|i| {
            let mut row = [0.0; 8];
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = ((i * (j + 3)) % 97) as f64 / 48.5 - 1.0;
            }
            row
        })
        .collect();
    let y = x.iter().map(|r| u8::from(r[0] + 0.5 * r[5] > 0.0)).collect();
    (x, y)
}

fn bench_predict(c: &mut Criterion) {
    let (x, y) = training_table();
    let row = x[17];

    for kind in ModelKind::ALL {
        let mut model = ModelConfig::default_for(kind).build().unwrap();
        model.fit(&x, &y).unwrap();
        c.bench_function(&format!("predict_row/{}", kind), |b| {
            b.iter(|| model.predict_row(black_box(&row)).unwrap())
        });
    }
}

criterion_group!(benches, bench_predict);
criterion_main!(benches);
