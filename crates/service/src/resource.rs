// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! JSON resource documents.
//!
//! # Format
//! ```json
//! { "value": [1.0, 2.0, 3.0] }            // vector
//! { "value": [[1.0, 2.0], [3.0, 4.0]] }   // matrix, one array per row
//! ```

use crate::{ResourceKind, ServiceError};
use serde::{Deserialize, Serialize};
use tensor_core::{Shape, Tensor};

/// A vector or matrix wrapped in a `{"value": ...}` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDocument {
    pub value: ResourceValue,
}

/// The payload of a [`ResourceDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceValue {
    Vector(Vec<f64>),
    Matrix(Vec<Vec<f64>>),
}

impl ResourceDocument {
    /// Builds the document for a tensor.
    ///
    /// A `[0 x n]` matrix has no rows to carry `n`, so its document reads
    /// back as `[0 x 0]`; [`to_json`] refuses such tensors.
    pub fn from_tensor(tensor: &Tensor) -> Self {
        let value = match tensor.shape() {
            Shape::Vector { .. } => ResourceValue::Vector(tensor.elements().to_vec()),
            Shape::Matrix { .. } => {
                ResourceValue::Matrix(tensor.rows().into_iter().map(<[f64]>::to_vec).collect())
            }
        };
        Self { value }
    }

    /// Converts the document into a tensor of the expected kind.
    ///
    /// An empty array is accepted as an empty vector, or as a `0 x 0` matrix.
    pub fn into_tensor(self, kind: ResourceKind) -> Result<Tensor, ServiceError> {
        let invalid = |detail: String| ServiceError::InvalidResource { kind, detail };
        match (kind, self.value) {
            (ResourceKind::Vector, ResourceValue::Vector(values)) => Ok(Tensor::vector(values)),
            (ResourceKind::Matrix, ResourceValue::Vector(values)) if values.is_empty() => {
                Ok(Tensor::empty_like(&Shape::matrix(0, 0)))
            }
            (ResourceKind::Matrix, ResourceValue::Matrix(rows)) => {
                let cols = rows.first().map_or(0, Vec::len);
                if let Some(bad) = rows.iter().position(|r| r.len() != cols) {
                    return Err(invalid(format!(
                        "row {bad} has {} columns, expected {cols}",
                        rows[bad].len()
                    )));
                }
                let n_rows = rows.len();
                Tensor::matrix(n_rows, cols, rows.into_iter().flatten().collect())
                    .map_err(|e| invalid(e.to_string()))
            }
            (ResourceKind::Vector, ResourceValue::Matrix(_)) => {
                Err(invalid("expected a flat array of numbers".into()))
            }
            (ResourceKind::Matrix, ResourceValue::Vector(_)) => {
                Err(invalid("expected an array of rows".into()))
            }
        }
    }
}

/// Parses and validates a JSON document.
pub fn parse(kind: ResourceKind, json: &str) -> Result<Tensor, ServiceError> {
    let doc: ResourceDocument =
        serde_json::from_str(json).map_err(|e| ServiceError::InvalidResource {
            kind,
            detail: e.to_string(),
        })?;
    doc.into_tensor(kind)
}

/// Renders a tensor as a JSON document.
///
/// # Errors
/// Returns [`ServiceError::InvalidResource`] for a matrix with zero rows and
/// a nonzero column count, which the row-array format cannot express.
pub fn to_json(tensor: &Tensor) -> Result<String, ServiceError> {
    let kind = if tensor.shape().is_vector() {
        ResourceKind::Vector
    } else {
        ResourceKind::Matrix
    };
    if let Some((0, cols @ 1..)) = tensor.shape().matrix_dims() {
        return Err(ServiceError::InvalidResource {
            kind,
            detail: format!("a [0 x {cols}] matrix has no rows to carry its column count"),
        });
    }
    serde_json::to_string(&ResourceDocument::from_tensor(tensor)).map_err(|e| {
        ServiceError::InvalidResource {
            kind,
            detail: e.to_string(),
        }
    })
}
