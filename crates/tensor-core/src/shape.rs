// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor shape descriptors.

use std::fmt;

/// Describes the dimensionality of a [`crate::Tensor`].
///
/// Only rank-1 (vector) and rank-2 (matrix) shapes exist. Matrices are laid
/// out row-major: the row index varies slowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// A rank-1 tensor of `length` elements.
    Vector { length: usize },
    /// A rank-2 tensor of `rows × cols` elements.
    Matrix { rows: usize, cols: usize },
}

impl Shape {
    /// Creates a 1-D shape.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::Shape;
    /// let s = Shape::vector(3);
    /// assert_eq!(s.rank(), 1);
    /// assert_eq!(s.element_count(), Some(3));
    /// ```
    pub fn vector(length: usize) -> Self {
        Shape::Vector { length }
    }

    /// Creates a 2-D shape (matrix).
    pub fn matrix(rows: usize, cols: usize) -> Self {
        Shape::Matrix { rows, cols }
    }

    /// Returns the number of dimensions (1 or 2).
    pub fn rank(&self) -> usize {
        match self {
            Shape::Vector { .. } => 1,
            Shape::Matrix { .. } => 2,
        }
    }

    /// Returns the total number of elements, `None` if `rows × cols`
    /// overflows `usize`.
    pub fn element_count(&self) -> Option<usize> {
        match *self {
            Shape::Vector { length } => Some(length),
            Shape::Matrix { rows, cols } => rows.checked_mul(cols),
        }
    }

    /// Returns `true` for vector shapes.
    pub fn is_vector(&self) -> bool {
        matches!(self, Shape::Vector { .. })
    }

    /// Returns `true` for matrix shapes.
    pub fn is_matrix(&self) -> bool {
        matches!(self, Shape::Matrix { .. })
    }

    /// Returns `(rows, cols)` for a matrix, `None` for a vector.
    pub fn matrix_dims(&self) -> Option<(usize, usize)> {
        match *self {
            Shape::Matrix { rows, cols } => Some((rows, cols)),
            Shape::Vector { .. } => None,
        }
    }

    /// Computes the payload size in bytes for a given [`crate::ElementType`].
    ///
    /// `None` if the size is not addressable.
    pub fn size_bytes(&self, element_type: crate::ElementType) -> Option<usize> {
        self.element_count()?
            .checked_mul(element_type.byte_width())
            .filter(|&bytes| bytes <= isize::MAX as usize)
    }

    /// Returns the empty shape of the same rank (`[0]` or `[0 x 0]`).
    pub fn empty_like(&self) -> Self {
        match self {
            Shape::Vector { .. } => Shape::vector(0),
            Shape::Matrix { .. } => Shape::matrix(0, 0),
        }
    }

    /// Returns `true` if the shapes are compatible for a matrix product:
    /// `self` is `[M x K]` and `other` is `[K x N]`.
    pub fn is_matmul_compatible(&self, other: &Shape) -> bool {
        match (self.matrix_dims(), other.matrix_dims()) {
            (Some((_, k_lhs)), Some((k_rhs, _))) => k_lhs == k_rhs,
            _ => false,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Vector { length } => write!(f, "[{length}]"),
            Shape::Matrix { rows, cols } => write!(f, "[{rows} x {cols}]"),
        }
    }
}
