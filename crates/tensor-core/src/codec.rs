// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Binary tensor codec.
//!
//! A payload is a contiguous run of fixed-width values in the platform's
//! native byte order, one per logical position, row-major for matrices:
//!
//! ```text
//! element_type = DOUBLE  →  8 bytes per element (f64)
//! element_type = INTEGER →  4 bytes per element (i32, widened to f64)
//! ```
//!
//! [`encode`] always emits `DOUBLE`-width values regardless of the tensor's
//! source type, so `Int32` input round-trips in value but not in wire width.
//!
//! # Framing
//! [`decode`] ignores bytes past `shape.element_count() * width`; a payload
//! shorter than that is rejected. [`decode_strict`] also rejects excess bytes.
//! A shape whose byte size overflows is rejected before the payload is
//! looked at.

use crate::{ElementType, Shape, Tensor, TensorError};

/// Decodes `bytes` into a tensor of the given shape and element type.
///
/// # Errors
/// Returns [`TensorError::BufferSizeMismatch`] if `bytes` holds fewer than
/// `shape.element_count()` values, and [`TensorError::ShapeOverflow`] if the
/// shape's byte size is not addressable.
///
/// # Examples
/// ```
/// use tensor_core::{decode, encode, ElementType, Shape, Tensor};
/// let t = Tensor::vector(vec![1.5, -2.0]);
/// let back = decode(&encode(&t), Shape::vector(2), ElementType::Float64).unwrap();
/// assert_eq!(back, t);
/// ```
pub fn decode(bytes: &[u8], shape: Shape, element_type: ElementType) -> Result<Tensor, TensorError> {
    let expected = shape
        .size_bytes(element_type)
        .ok_or(TensorError::ShapeOverflow { shape })?;
    if bytes.len() < expected {
        return Err(TensorError::BufferSizeMismatch {
            shape,
            expected,
            actual: bytes.len(),
        });
    }

    let payload = &bytes[..expected];
    let elements: Vec<f64> = match element_type {
        ElementType::Float64 => payload
            .chunks_exact(8)
            .map(|c| f64::from_ne_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
            .collect(),
        ElementType::Int32 => payload
            .chunks_exact(4)
            .map(|c| f64::from(i32::from_ne_bytes([c[0], c[1], c[2], c[3]])))
            .collect(),
    };

    Tensor::new(element_type, shape, elements)
}

/// Like [`decode`], but the payload length must match the shape exactly.
pub fn decode_strict(
    bytes: &[u8],
    shape: Shape,
    element_type: ElementType,
) -> Result<Tensor, TensorError> {
    let expected = shape
        .size_bytes(element_type)
        .ok_or(TensorError::ShapeOverflow { shape })?;
    if bytes.len() != expected {
        return Err(TensorError::BufferSizeMismatch {
            shape,
            expected,
            actual: bytes.len(),
        });
    }
    decode(bytes, shape, element_type)
}

/// Resolves a raw wire tag and decodes.
///
/// # Errors
/// Returns [`TensorError::InvalidElementType`] for a tag other than
/// `DOUBLE` (0) or `INTEGER` (1), plus any error from [`decode`].
pub fn decode_tagged(bytes: &[u8], shape: Shape, tag: i32) -> Result<Tensor, TensorError> {
    decode(bytes, shape, ElementType::from_tag(tag)?)
}

/// Encodes a tensor as `Float64` native-endian values in row-major order.
pub fn encode(tensor: &Tensor) -> Vec<u8> {
    let mut out = Vec::with_capacity(tensor.len() * ElementType::Float64.byte_width());
    for value in tensor.elements() {
        out.extend_from_slice(&value.to_ne_bytes());
    }
    out
}

/// Returns the byte length [`encode`] produces for a shape, `None` if it
/// overflows.
pub fn encoded_len(shape: &Shape) -> Option<usize> {
    shape.size_bytes(ElementType::Float64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn i32_payload(values: &[i32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_ne_bytes()).collect()
    }

    #[test]
    fn test_roundtrip_f64_bit_exact() {
        let values = vec![0.0, -0.0, 1.0e-300, f64::MAX, f64::MIN_POSITIVE, -3.25];
        let t = Tensor::vector(values.clone());
        let back = decode(&encode(&t), Shape::vector(values.len()), ElementType::Float64).unwrap();
        for (a, b) in back.elements().iter().zip(&values) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_matrix_row_major() {
        let bytes: Vec<u8> = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0]
            .iter()
            .flat_map(|v| v.to_ne_bytes())
            .collect();
        let t = decode(&bytes, Shape::matrix(2, 3), ElementType::Float64).unwrap();
        assert_eq!(t.get(0, 2), Some(3.0));
        assert_eq!(t.get(1, 0), Some(4.0));
        assert_eq!(encode(&t), bytes);
    }

    #[test]
    fn test_decode_int32_widens() {
        let bytes = i32_payload(&[i32::MIN, -1, 0, i32::MAX]);
        let t = decode(&bytes, Shape::vector(4), ElementType::Int32).unwrap();
        assert_eq!(t.elements(), &[i32::MIN as f64, -1.0, 0.0, i32::MAX as f64]);
        assert_eq!(t.element_type(), ElementType::Int32);

        // Re-encoding widens to 8 bytes per element.
        assert_eq!(encode(&t).len(), 32);
    }

    #[test]
    fn test_invalid_tag() {
        let err = decode_tagged(&[0u8; 8], Shape::vector(1), 5).unwrap_err();
        assert_eq!(err, TensorError::InvalidElementType { tag: 5 });
    }

    #[test]
    fn test_short_payload_rejected() {
        let err = decode(&[0u8; 12], Shape::vector(2), ElementType::Float64).unwrap_err();
        assert!(matches!(
            err,
            TensorError::BufferSizeMismatch { expected: 16, actual: 12, .. }
        ));
    }

    #[test]
    fn test_excess_bytes_ignored_unless_strict() {
        let mut bytes = 7.0f64.to_ne_bytes().to_vec();
        bytes.extend_from_slice(&[0xAA; 3]);

        let t = decode(&bytes, Shape::vector(1), ElementType::Float64).unwrap();
        assert_eq!(t.elements(), &[7.0]);

        assert!(decode_strict(&bytes, Shape::vector(1), ElementType::Float64).is_err());
        assert!(decode_strict(&bytes[..8], Shape::vector(1), ElementType::Float64).is_ok());
    }

    #[test]
    fn test_oversized_shape_rejected() {
        let huge_matrix = Shape::matrix(1 << 32, 1 << 32);
        for decode_fn in [decode, decode_strict] {
            let err = decode_fn(&[], huge_matrix, ElementType::Float64).unwrap_err();
            assert_eq!(err, TensorError::ShapeOverflow { shape: huge_matrix });
        }

        let huge_vector = Shape::vector(usize::MAX / 4);
        let err = decode(&[0u8; 16], huge_vector, ElementType::Float64).unwrap_err();
        assert_eq!(err, TensorError::ShapeOverflow { shape: huge_vector });
        assert_eq!(encoded_len(&huge_vector), None);
    }

    #[test]
    fn test_empty_payload() {
        let t = decode(&[], Shape::vector(0), ElementType::Int32).unwrap();
        assert!(t.is_empty());
        assert!(encode(&t).is_empty());
        assert_eq!(encoded_len(&Shape::matrix(3, 2)), Some(48));
    }
}
