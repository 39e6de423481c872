// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for streaming folds.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reduction::{reduce, OperationKind};
use tensor_core::Tensor;

fn bench_vector_sum(c: &mut Criterion) {
    let inputs: Vec<Tensor> = (0..32)
        .map(|i| Tensor::vector(vec![i as f64; 1024]))
        .collect();

    c.bench_function("sum_32x1024", |b| {
        b.iter(|| reduce(OperationKind::Sum, black_box(inputs.clone())))
    });
}

fn bench_chain_product(c: &mut Criterion) {
    let n = 32;
    let inputs: Vec<Tensor> = (0..8)
        .map(|_| Tensor::matrix(n, n, vec![0.5; n * n]).unwrap())
        .collect();

    c.bench_function("chain_product_8x32x32", |b| {
        b.iter(|| reduce(OperationKind::MatrixChainProduct, black_box(inputs.clone())))
    });
}

criterion_group!(benches, bench_vector_sum, bench_chain_product);
criterion_main!(benches);
