// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for reductions.

use crate::OperationKind;
use std::fmt;
use tensor_core::{Shape, TensorError};

/// Coarse failure category, stable across error variants.
///
/// Every kind is a recoverable call-level failure; none are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A payload carried an element-type tag other than DOUBLE or INTEGER.
    InvalidElementType,
    /// Incompatible shapes were detected mid-fold (or an operand had the wrong rank).
    ShapeMismatch,
    /// A fixed-arity operation ended before all operands arrived.
    InsufficientInput,
    /// A fold received no input and the policy rejects empty results.
    EmptyResult,
    /// A fixed-arity operation received more operands than it takes.
    ExcessInput,
    /// A payload's length or declared shape could not describe a tensor.
    MalformedPayload,
    /// The session was used out of order (e.g. finished twice).
    InvalidCall,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidElementType => "invalid_element_type",
            ErrorKind::ShapeMismatch => "shape_mismatch",
            ErrorKind::InsufficientInput => "insufficient_input",
            ErrorKind::EmptyResult => "empty_result",
            ErrorKind::ExcessInput => "excess_input",
            ErrorKind::MalformedPayload => "malformed_payload",
            ErrorKind::InvalidCall => "invalid_call",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&TensorError> for ErrorKind {
    fn from(err: &TensorError) -> Self {
        match err {
            TensorError::InvalidElementType { .. } => ErrorKind::InvalidElementType,
            TensorError::ShapeMismatch { .. } | TensorError::UnsupportedShape { .. } => {
                ErrorKind::ShapeMismatch
            }
            TensorError::BufferSizeMismatch { .. }
            | TensorError::ElementCountMismatch { .. }
            | TensorError::ShapeOverflow { .. } => ErrorKind::MalformedPayload,
        }
    }
}

/// Errors produced by a [`crate::ReductionSession`] or a unary transform.
///
/// `position` fields are 1-based operand indices within the call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReductionError {
    /// The incoming tensor cannot be combined with the accumulator.
    #[error("incompatible shapes for {op} at operand {position}: accumulator {accumulator} vs incoming {incoming}")]
    ShapeMismatch {
        op: OperationKind,
        position: usize,
        accumulator: Shape,
        incoming: Shape,
    },

    /// The operand does not have the rank the operation accepts.
    #[error("{op} expects {expected} operands, got {shape} at operand {position}")]
    UnsupportedOperand {
        op: OperationKind,
        position: usize,
        expected: &'static str,
        shape: Shape,
    },

    /// A fixed-arity operation ended before the named operand arrived.
    #[error("insufficient input for {op}: no incoming operand {missing_operand}")]
    InsufficientInput {
        op: OperationKind,
        missing_operand: usize,
    },

    /// A fold over zero tensors under [`crate::EmptyFoldPolicy::Reject`].
    #[error("{op} received no input")]
    EmptyResult { op: OperationKind },

    /// A fixed-arity operation received an operand beyond its arity.
    #[error("{op} takes exactly {expected} operands; received operand {position}")]
    TooManyOperands {
        op: OperationKind,
        expected: usize,
        position: usize,
    },

    /// The operation cannot be driven this way (fold vs unary).
    #[error("{op} is not a {expected} operation")]
    WrongOperation {
        op: OperationKind,
        expected: &'static str,
    },

    /// `finish` was called on a session that already finished.
    #[error("session for {op} is already finalized")]
    SessionClosed { op: OperationKind },

    /// A tensor kernel rejected validated operands.
    #[error("kernel error in {op}: {source}")]
    Kernel {
        op: OperationKind,
        #[source]
        source: TensorError,
    },
}

impl ReductionError {
    /// Returns the failure category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReductionError::ShapeMismatch { .. } | ReductionError::UnsupportedOperand { .. } => {
                ErrorKind::ShapeMismatch
            }
            ReductionError::InsufficientInput { .. } => ErrorKind::InsufficientInput,
            ReductionError::EmptyResult { .. } => ErrorKind::EmptyResult,
            ReductionError::TooManyOperands { .. } => ErrorKind::ExcessInput,
            ReductionError::WrongOperation { .. } | ReductionError::SessionClosed { .. } => {
                ErrorKind::InvalidCall
            }
            ReductionError::Kernel { source, .. } => ErrorKind::from(source),
        }
    }

    /// Returns the operation the error belongs to.
    pub fn operation(&self) -> OperationKind {
        match self {
            ReductionError::ShapeMismatch { op, .. }
            | ReductionError::UnsupportedOperand { op, .. }
            | ReductionError::InsufficientInput { op, .. }
            | ReductionError::EmptyResult { op }
            | ReductionError::TooManyOperands { op, .. }
            | ReductionError::WrongOperation { op, .. }
            | ReductionError::SessionClosed { op }
            | ReductionError::Kernel { op, .. } => *op,
        }
    }
}
