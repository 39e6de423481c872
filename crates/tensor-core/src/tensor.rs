// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Core tensor type.

use crate::{ElementType, Shape, TensorError};

/// An owned rank-1 or rank-2 tensor.
///
/// `Tensor` is the data carrier between the codec and the reduction engine.
/// Elements are always held as `f64`; `element_type` records the wire type
/// the tensor was decoded from.
///
/// # Memory Layout
/// Elements are stored in row-major (C) order.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    element_type: ElementType,
    shape: Shape,
    elements: Vec<f64>,
}

impl Tensor {
    /// Creates a tensor from element values.
    ///
    /// Returns an error if `elements.len()` does not match the shape, or if
    /// the shape's element count overflows.
    pub fn new(
        element_type: ElementType,
        shape: Shape,
        elements: Vec<f64>,
    ) -> Result<Self, TensorError> {
        let expected = shape
            .element_count()
            .ok_or(TensorError::ShapeOverflow { shape })?;
        if elements.len() != expected {
            return Err(TensorError::ElementCountMismatch {
                shape,
                expected,
                actual: elements.len(),
            });
        }
        Ok(Self {
            element_type,
            shape,
            elements,
        })
    }

    /// Creates a `Float64` vector.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{Tensor, Shape};
    /// let t = Tensor::vector(vec![1.0, 2.0, 3.0]);
    /// assert_eq!(t.shape(), &Shape::vector(3));
    /// ```
    pub fn vector(elements: Vec<f64>) -> Self {
        Self {
            element_type: ElementType::Float64,
            shape: Shape::vector(elements.len()),
            elements,
        }
    }

    /// Creates a `Float64` matrix from row-major values.
    pub fn matrix(rows: usize, cols: usize, elements: Vec<f64>) -> Result<Self, TensorError> {
        Self::new(ElementType::Float64, Shape::matrix(rows, cols), elements)
    }

    /// Creates an empty `Float64` tensor of the given rank (`[0]` or `[0 x 0]`).
    pub fn empty_like(shape: &Shape) -> Self {
        Self {
            element_type: ElementType::Float64,
            shape: shape.empty_like(),
            elements: Vec::new(),
        }
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the wire element type this tensor was built from.
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Returns the element values in row-major order.
    pub fn elements(&self) -> &[f64] {
        &self.elements
    }

    /// Consumes the tensor and returns its element buffer.
    pub fn into_elements(self) -> Vec<f64> {
        self.elements
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the tensor has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the element at `(row, col)` of a matrix.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        let (rows, cols) = self.shape.matrix_dims()?;
        if row >= rows || col >= cols {
            return None;
        }
        self.elements.get(row * cols + col).copied()
    }

    /// Returns the matrix rows as slices; a vector yields a single row.
    pub fn rows(&self) -> Vec<&[f64]> {
        match self.shape {
            Shape::Vector { .. } => vec![&self.elements[..]],
            Shape::Matrix { cols: 0, rows } => vec![&[][..]; rows],
            Shape::Matrix { cols, .. } => self.elements.chunks(cols).collect(),
        }
    }
}
