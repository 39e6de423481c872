// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-core
//!
//! Rank-1 and rank-2 tensor types, the binary tensor wire codec, and the
//! arithmetic kernels used by the reduction engine.
//!
//! This crate provides:
//! - [`Tensor`]: a vector or matrix whose elements are held as `f64`.
//! - [`Shape`]: `Vector { length }` or `Matrix { rows, cols }`.
//! - [`ElementType`]: the wire element types (`Float64`, `Int32`).
//! - [`codec`]: `decode` / `encode` between tensors and flat byte buffers.
//! - Kernels: elementwise addition, dot product, matrix product, reversal.
//!
//! # Wire Layout
//! Payloads are contiguous fixed-width values in the platform's native byte
//! order, row-major for matrices. Outbound payloads are always `Float64`:
//! ```text
//! [[1, 2],      ──encode──►  | 1.0 | 2.0 | 3.0 | 4.0 |   (4 × 8 bytes)
//!  [3, 4]]
//! ```
//!
//! # Design Goals
//! - Malformed input is a value (`Err(TensorError)`), never a panic.
//! - Clean error types via `thiserror`.

pub mod codec;
mod dtype;
mod error;
mod ops;
mod shape;
mod tensor;

pub use codec::{decode, decode_strict, decode_tagged, encode, encoded_len};
pub use dtype::ElementType;
pub use error::TensorError;
pub use ops::{add, dot, matmul, reverse};
pub use shape::Shape;
pub use tensor::Tensor;
