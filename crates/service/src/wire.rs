// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Wire messages exchanged with the transport.

use tensor_core::{ElementType, Shape, Tensor, TensorError};

/// A framed tensor as delivered by (or handed to) the transport.
///
/// `element_type` is the raw wire tag (`DOUBLE = 0`, `INTEGER = 1`) and is
/// only resolved on decode, so an unknown tag becomes a recoverable error.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TensorMessage {
    pub element_type: i32,
    /// `length` for vectors, `rows` and `cols` for matrices.
    pub size: Shape,
    /// Native-endian fixed-width values, row-major.
    pub payload: Vec<u8>,
}

impl TensorMessage {
    /// Builds an outbound message. Always `DOUBLE`, whatever the tensor's source type.
    pub fn from_tensor(tensor: &Tensor) -> Self {
        Self {
            element_type: ElementType::DOUBLE_TAG,
            size: *tensor.shape(),
            payload: tensor_core::encode(tensor),
        }
    }

    /// Builds a message from `i32` values with the `INTEGER` tag.
    pub fn from_i32(size: Shape, values: &[i32]) -> Self {
        Self {
            element_type: ElementType::INTEGER_TAG,
            size,
            payload: values.iter().flat_map(|v| v.to_ne_bytes()).collect(),
        }
    }

    /// Decodes the payload; `strict` also rejects trailing bytes.
    pub fn decode(&self, strict: bool) -> Result<Tensor, TensorError> {
        let element_type = ElementType::from_tag(self.element_type)?;
        if strict {
            tensor_core::decode_strict(&self.payload, self.size, element_type)
        } else {
            tensor_core::decode(&self.payload, self.size, element_type)
        }
    }
}

/// Greeting request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HelloRequest {
    pub name: String,
}

/// Greeting reply.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HelloReply {
    pub message: String,
}
