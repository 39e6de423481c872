// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for the tensor codec and kernels.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tensor_core::{decode, encode, matmul, ElementType, Shape, Tensor};

fn bench_codec(c: &mut Criterion) {
    let t = Tensor::vector((0..4096).map(f64::from).collect());
    let bytes = encode(&t);

    c.bench_function("encode_4096", |b| b.iter(|| encode(black_box(&t))));
    c.bench_function("decode_4096", |b| {
        b.iter(|| decode(black_box(&bytes), Shape::vector(4096), ElementType::Float64))
    });
}

fn bench_matmul(c: &mut Criterion) {
    let n = 64;
    let a = Tensor::matrix(n, n, (0..n * n).map(|i| i as f64).collect()).unwrap();
    let b = a.clone();

    c.bench_function("matmul_64x64", |bench| {
        bench.iter(|| matmul(black_box(&a), black_box(&b)))
    });
}

criterion_group!(benches, bench_codec, bench_matmul);
criterion_main!(benches);
