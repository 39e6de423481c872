// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Vector element-order reversal.

use crate::{ElementType, Tensor, TensorError};

/// Returns a new vector with the elements of `input` in reverse order.
///
/// # Errors
/// Returns [`TensorError::UnsupportedShape`] for matrices.
pub fn reverse(input: &Tensor) -> Result<Tensor, TensorError> {
    if !input.shape().is_vector() {
        return Err(TensorError::UnsupportedShape {
            op: "reverse",
            shape: *input.shape(),
        });
    }
    let flipped = input.elements().iter().rev().copied().collect();
    Tensor::new(ElementType::Float64, *input.shape(), flipped)
}
