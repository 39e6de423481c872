// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Elementwise addition.

use crate::{ElementType, Tensor, TensorError};

/// Computes `lhs + rhs` elementwise.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] unless both shapes are equal
/// (same length, or same rows and cols).
pub fn add(lhs: &Tensor, rhs: &Tensor) -> Result<Tensor, TensorError> {
    if lhs.shape() != rhs.shape() {
        return Err(TensorError::ShapeMismatch {
            op: "add",
            lhs: *lhs.shape(),
            rhs: *rhs.shape(),
        });
    }

    let sum = lhs
        .elements()
        .iter()
        .zip(rhs.elements())
        .map(|(a, b)| a + b)
        .collect();

    Tensor::new(ElementType::Float64, *lhs.shape(), sum)
}
