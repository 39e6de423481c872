// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Single-input, single-output operations.
//!
//! No session, no accumulator: a lone tensor is trivially self-compatible.

use crate::{validator, OperationKind, ReductionError};
use tensor_core::Tensor;

/// Reverses the element order of a vector.
///
/// # Errors
/// Returns [`ReductionError::UnsupportedOperand`] for a matrix.
pub fn reverse(tensor: &Tensor) -> Result<Tensor, ReductionError> {
    apply_unary(OperationKind::Reverse, tensor)
}

/// Applies a unary operation.
///
/// # Errors
/// Returns [`ReductionError::WrongOperation`] for fold operations.
pub fn apply_unary(op: OperationKind, tensor: &Tensor) -> Result<Tensor, ReductionError> {
    if op.is_fold() {
        return Err(ReductionError::WrongOperation {
            op,
            expected: "unary",
        });
    }
    if !validator::check_operand(op, tensor.shape()) {
        return Err(ReductionError::UnsupportedOperand {
            op,
            position: 1,
            expected: op.operand_rank().as_str(),
            shape: *tensor.shape(),
        });
    }
    tensor_core::reverse(tensor).map_err(|source| ReductionError::Kernel { op, source })
}
