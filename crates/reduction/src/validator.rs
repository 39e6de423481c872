// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shape compatibility rules.
//!
//! [`check`] decides whether an incoming tensor can be combined with the
//! accumulator of a fold, and what shape the accumulator takes afterwards:
//!
//! | Operation | Compatible when | New shape |
//! |---|---|---|
//! | `Sum`, `MatrixSum` | shapes are equal | unchanged |
//! | `DotProduct` | both vectors, equal length | unchanged |
//! | `MatrixChainProduct` | `acc.cols == incoming.rows` | `(acc.rows, incoming.cols)` |
//! | `Reverse` | never (unary) | n/a |

use crate::OperationKind;
use tensor_core::Shape;

/// Outcome of a shape check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compatibility {
    /// The tensors can be combined; the accumulator takes this shape.
    Compatible(Shape),
    Incompatible,
}

impl Compatibility {
    pub fn is_compatible(&self) -> bool {
        matches!(self, Compatibility::Compatible(_))
    }

    /// Returns the accumulator shape after combining, if compatible.
    pub fn new_shape(&self) -> Option<Shape> {
        match self {
            Compatibility::Compatible(shape) => Some(*shape),
            Compatibility::Incompatible => None,
        }
    }
}

/// Checks whether `incoming` can be folded into an accumulator of shape `accumulator`.
pub fn check(op: OperationKind, accumulator: &Shape, incoming: &Shape) -> Compatibility {
    match op {
        OperationKind::Sum | OperationKind::MatrixSum => {
            if accumulator == incoming && check_operand(op, incoming) {
                Compatibility::Compatible(*accumulator)
            } else {
                Compatibility::Incompatible
            }
        }
        OperationKind::DotProduct => match (accumulator, incoming) {
            (Shape::Vector { length: a }, Shape::Vector { length: b }) if a == b => {
                Compatibility::Compatible(*accumulator)
            }
            _ => Compatibility::Incompatible,
        },
        OperationKind::MatrixChainProduct => {
            match (accumulator.matrix_dims(), incoming.matrix_dims()) {
                (Some((rows, acc_cols)), Some((inc_rows, cols))) if acc_cols == inc_rows => {
                    Compatibility::Compatible(Shape::matrix(rows, cols))
                }
                _ => Compatibility::Incompatible,
            }
        }
        OperationKind::Reverse => Compatibility::Incompatible,
    }
}

/// Returns `true` if `shape` has the rank `op` accepts.
pub fn check_operand(op: OperationKind, shape: &Shape) -> bool {
    op.operand_rank().matches(shape)
}
