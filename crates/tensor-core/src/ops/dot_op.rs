// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Vector dot product.

use crate::{Tensor, TensorError};

/// Computes `Σ lhs[i] * rhs[i]` for two vectors of equal length.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if either operand is a matrix or
/// the lengths differ.
pub fn dot(lhs: &Tensor, rhs: &Tensor) -> Result<f64, TensorError> {
    if !lhs.shape().is_vector() || lhs.shape() != rhs.shape() {
        return Err(TensorError::ShapeMismatch {
            op: "dot",
            lhs: *lhs.shape(),
            rhs: *rhs.shape(),
        });
    }

    Ok(lhs
        .elements()
        .iter()
        .zip(rhs.elements())
        .map(|(a, b)| a * b)
        .sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot() {
        let a = Tensor::vector(vec![1.0, 2.0, 3.0]);
        let b = Tensor::vector(vec![4.0, 5.0, 6.0]);
        assert_eq!(dot(&a, &b).unwrap(), 32.0);
    }

    #[test]
    fn test_dot_empty() {
        let e = Tensor::vector(vec![]);
        assert_eq!(dot(&e, &e).unwrap(), 0.0);
    }

    #[test]
    fn test_dot_length_mismatch() {
        let a = Tensor::vector(vec![1.0, 2.0]);
        let b = Tensor::vector(vec![1.0, 2.0, 3.0]);
        assert!(dot(&a, &b).is_err());
    }

    #[test]
    fn test_dot_rejects_matrix() {
        let m = Tensor::matrix(1, 2, vec![1.0, 2.0]).unwrap();
        assert!(dot(&m, &m).is_err());
    }
}
