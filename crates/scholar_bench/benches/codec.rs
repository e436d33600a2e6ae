//! Record codec benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use scholar_bench::generate_students;
use scholar_codec::{decode_record, from_cbor, to_canonical_cbor, Value};
use scholar_core::{Record, Student};

/// Benchmark encoding a single student.
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let student = generate_students(1).remove(0);
    let size = student.encode().unwrap().len();
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_function("student", |b| {
        b.iter(|| {
            let bytes = black_box(&student).encode().unwrap();
            black_box(bytes);
        });
    });

    group.bench_function("student_values", |b| {
        let values = student.to_values();
        b.iter(|| {
            let map = Value::Map(
                Student::SCHEMA
                    .fields
                    .iter()
                    .zip(black_box(&values))
                    .map(|(f, v)| (Value::from(f.name), v.clone()))
                    .collect(),
            );
            black_box(to_canonical_cbor(&map).unwrap());
        });
    });

    group.finish();
}

/// Benchmark decoding a single student.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let bytes = generate_students(1).remove(0).encode().unwrap();
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("student", |b| {
        b.iter(|| {
            let student = Student::decode(black_box(&bytes)).unwrap();
            black_box(student);
        });
    });

    group.bench_function("student_layout_only", |b| {
        b.iter(|| {
            let values = decode_record(Student::SCHEMA.fields, black_box(&bytes)).unwrap();
            black_box(values);
        });
    });

    group.bench_function("generic_value", |b| {
        b.iter(|| {
            let value = from_cbor(black_box(&bytes));
            black_box(value).ok();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
