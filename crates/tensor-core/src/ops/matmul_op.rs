// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Matrix multiplication operation.

use crate::{ElementType, Shape, Tensor, TensorError};

/// Performs matrix multiplication: `lhs @ rhs`.
///
/// Both inputs must be matrices with compatible inner dimensions:
/// `lhs` is `[M x K]`, `rhs` is `[K x N]`, and the result is `[M x N]`.
///
/// # Errors
/// Returns [`TensorError::ShapeMismatch`] if dimensions are incompatible.
pub fn matmul(lhs: &Tensor, rhs: &Tensor) -> Result<Tensor, TensorError> {
    if !lhs.shape().is_matmul_compatible(rhs.shape()) {
        return Err(TensorError::ShapeMismatch {
            op: "matmul",
            lhs: *lhs.shape(),
            rhs: *rhs.shape(),
        });
    }

    let (m, k) = lhs.shape().matrix_dims().unwrap_or_default();
    let (_, n) = rhs.shape().matrix_dims().unwrap_or_default();

    let shape = Shape::matrix(m, n);
    let len = shape
        .size_bytes(ElementType::Float64)
        .and(shape.element_count())
        .ok_or(TensorError::ShapeOverflow { shape })?;
    let mut c = Vec::new();
    c.try_reserve_exact(len)
        .map_err(|_| TensorError::ShapeOverflow { shape })?;
    c.resize(len, 0.0f64);
    matmul_f64_generic(lhs.elements(), rhs.elements(), &mut c, m, k, n);

    Tensor::new(ElementType::Float64, shape, c)
}

/// Generic (portable) f64 matrix multiplication.
///
/// Uses a simple ikj loop order for better cache locality on the `b` matrix.
fn matmul_f64_generic(a: &[f64], b: &[f64], c: &mut [f64], m: usize, k: usize, n: usize) {
    // ikj loop order: the inner loop is a saxpy on a row of C,
    // which is sequential in memory.
    for i in 0..m {
        for p in 0..k {
            let a_ip = a[i * k + p];
            let c_row = &mut c[i * n..(i + 1) * n];
            let b_row = &b[p * n..(p + 1) * n];
            for j in 0..n {
                c_row[j] += a_ip * b_row[j];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matmul_2x3_times_3x2() {
        // A = [[1, 2, 3], [4, 5, 6]]
        // B = [[7, 8], [9, 10], [11, 12]]
        // C = [[58, 64], [139, 154]]
        let a = Tensor::matrix(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let b = Tensor::matrix(3, 2, vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]).unwrap();

        let c = matmul(&a, &b).unwrap();

        assert_eq!(c.shape(), &Shape::matrix(2, 2));
        assert_eq!(c.elements(), &[58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_matmul_identity() {
        let eye = Tensor::matrix(2, 2, vec![1.0, 0.0, 0.0, 1.0]).unwrap();
        let a = Tensor::matrix(2, 2, vec![2.0, 3.0, 4.0, 5.0]).unwrap();

        let c = matmul(&eye, &a).unwrap();

        assert_eq!(c.elements(), &[2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_matmul_non_square() {
        let a = Tensor::matrix(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = Tensor::matrix(2, 3, vec![5.0, 4.0, 2.0, 0.0, 1.0, 1.0]).unwrap();
        let c = matmul(&a, &b).unwrap();
        assert_eq!(c.shape(), &Shape::matrix(2, 3));
        assert_eq!(c.elements(), &[5.0, 6.0, 4.0, 15.0, 16.0, 10.0]);
    }

    #[test]
    fn test_matmul_shape_mismatch() {
        let a = Tensor::matrix(2, 3, vec![0.0; 6]).unwrap();
        let b = Tensor::matrix(4, 2, vec![0.0; 8]).unwrap(); // 4 != 3
        assert!(matmul(&a, &b).is_err());
    }

    #[test]
    fn test_matmul_zero_inner_dim() {
        let a = Tensor::matrix(2, 0, vec![]).unwrap();
        let b = Tensor::matrix(0, 3, vec![]).unwrap();
        let c = matmul(&a, &b).unwrap();
        assert_eq!(c.shape(), &Shape::matrix(2, 3));
        assert!(c.elements().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_matmul_unaddressable_result() {
        // Both operands are empty, but the product would be [2^33 x 2^33].
        let a = Tensor::matrix(1 << 33, 0, vec![]).unwrap();
        let b = Tensor::matrix(0, 1 << 33, vec![]).unwrap();
        let err = matmul(&a, &b).unwrap_err();
        assert_eq!(
            err,
            TensorError::ShapeOverflow {
                shape: Shape::matrix(1 << 33, 1 << 33)
            }
        );
    }
}
