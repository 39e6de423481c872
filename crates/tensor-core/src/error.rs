// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor construction, codec, and kernel operations.

use crate::Shape;

/// Errors that can occur while building, decoding, or combining tensors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TensorError {
    /// The wire element-type tag is neither `DOUBLE` (0) nor `INTEGER` (1).
    #[error("invalid element type tag {tag}; expected 0 (DOUBLE) or 1 (INTEGER)")]
    InvalidElementType { tag: i32 },

    /// The payload is too short (or, in strict mode, not exactly sized) for the declared shape.
    #[error("buffer size mismatch for {shape}: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch {
        shape: Shape,
        expected: usize,
        actual: usize,
    },

    /// The shape's element count or byte size does not fit in memory.
    #[error("shape {shape} is too large to address")]
    ShapeOverflow { shape: Shape },

    /// The number of element values does not match the shape.
    #[error("element count mismatch for {shape}: expected {expected}, got {actual}")]
    ElementCountMismatch {
        shape: Shape,
        expected: usize,
        actual: usize,
    },

    /// Two tensors have incompatible shapes for the requested operation.
    #[error("incompatible shapes for {op}: {lhs} vs {rhs}")]
    ShapeMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },

    /// The operation is not defined for a tensor of this shape.
    #[error("unsupported shape {shape} for operation {op}")]
    UnsupportedShape { op: &'static str, shape: Shape },
}
