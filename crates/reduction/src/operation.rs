// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Operation kinds.

use std::fmt;
use tensor_core::Shape;

/// The operations a call can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationKind {
    /// Element-order reversal of a single vector (unary, no fold).
    Reverse,
    /// Elementwise sum of any number of equal-length vectors.
    Sum,
    /// Dot product of exactly two equal-length vectors.
    DotProduct,
    /// Elementwise sum of any number of equally shaped matrices.
    MatrixSum,
    /// Left-to-right product of a chain of matrices (non-commutative).
    MatrixChainProduct,
}

/// The tensor rank an operation accepts as operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandRank {
    Vector,
    Matrix,
}

impl OperandRank {
    /// Returns `true` if `shape` has this rank.
    pub fn matches(self, shape: &Shape) -> bool {
        match self {
            OperandRank::Vector => shape.is_vector(),
            OperandRank::Matrix => shape.is_matrix(),
        }
    }

    /// Returns the zero-element shape of this rank.
    pub fn empty_shape(self) -> Shape {
        match self {
            OperandRank::Vector => Shape::vector(0),
            OperandRank::Matrix => Shape::matrix(0, 0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OperandRank::Vector => "vector",
            OperandRank::Matrix => "matrix",
        }
    }
}

impl OperationKind {
    /// Returns the operand rank this operation accepts.
    pub fn operand_rank(self) -> OperandRank {
        match self {
            OperationKind::Reverse | OperationKind::Sum | OperationKind::DotProduct => {
                OperandRank::Vector
            }
            OperationKind::MatrixSum | OperationKind::MatrixChainProduct => OperandRank::Matrix,
        }
    }

    /// Returns `true` for operations driven through a [`crate::ReductionSession`].
    pub fn is_fold(self) -> bool {
        !matches!(self, OperationKind::Reverse)
    }

    /// Returns the exact operand count for fixed-arity operations.
    pub fn arity(self) -> Option<usize> {
        match self {
            OperationKind::Reverse => Some(1),
            OperationKind::DotProduct => Some(2),
            _ => None,
        }
    }

    /// Returns a stable label for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Reverse => "reverse",
            OperationKind::Sum => "sum",
            OperationKind::DotProduct => "dot-product",
            OperationKind::MatrixSum => "matrix-sum",
            OperationKind::MatrixChainProduct => "matrix-chain-product",
        }
    }
}

impl OperationKind {
    /// Parses an operation name as printed by [`OperationKind::as_str`].
    ///
    /// Also accepts the short call-style aliases `add`, `dot`, `flip`,
    /// `add-matrices` and `multiply-matrices`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "reverse" | "flip" => Some(OperationKind::Reverse),
            "sum" | "add" => Some(OperationKind::Sum),
            "dot-product" | "dot" => Some(OperationKind::DotProduct),
            "matrix-sum" | "add-matrices" => Some(OperationKind::MatrixSum),
            "matrix-chain-product" | "multiply-matrices" => {
                Some(OperationKind::MatrixChainProduct)
            }
            _ => None,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
