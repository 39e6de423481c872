// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Wire element types.

use crate::TensorError;

/// Enumerates the numeric types a tensor payload can carry on the wire.
///
/// The codec uses `ElementType` to decide the per-element byte width. Once
/// decoded, every element is held as `f64` regardless of its wire type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    /// 64-bit IEEE 754 floating point (wire tag `DOUBLE = 0`).
    Float64,
    /// 32-bit signed integer (wire tag `INTEGER = 1`).
    Int32,
}

impl ElementType {
    /// Wire tag for [`ElementType::Float64`].
    pub const DOUBLE_TAG: i32 = 0;
    /// Wire tag for [`ElementType::Int32`].
    pub const INTEGER_TAG: i32 = 1;

    /// Returns the size of a single element in bytes.
    pub fn byte_width(self) -> usize {
        match self {
            ElementType::Float64 => 8,
            ElementType::Int32 => 4,
        }
    }

    /// Returns the wire tag for this element type.
    pub fn tag(self) -> i32 {
        match self {
            ElementType::Float64 => Self::DOUBLE_TAG,
            ElementType::Int32 => Self::INTEGER_TAG,
        }
    }

    /// Resolves a raw wire tag.
    pub fn from_tag(tag: i32) -> Result<Self, TensorError> {
        match tag {
            Self::DOUBLE_TAG => Ok(ElementType::Float64),
            Self::INTEGER_TAG => Ok(ElementType::Int32),
            other => Err(TensorError::InvalidElementType { tag: other }),
        }
    }

    /// Returns a human-readable label for this element type.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Float64 => "f64",
            ElementType::Int32 => "i32",
        }
    }
}

impl TryFrom<i32> for ElementType {
    type Error = TensorError;

    fn try_from(tag: i32) -> Result<Self, Self::Error> {
        Self::from_tag(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_width() {
        assert_eq!(ElementType::Float64.byte_width(), 8);
        assert_eq!(ElementType::Int32.byte_width(), 4);
    }

    #[test]
    fn test_tag_roundtrip() {
        for ty in [ElementType::Float64, ElementType::Int32] {
            assert_eq!(ElementType::from_tag(ty.tag()).unwrap(), ty);
        }
    }

    #[test]
    fn test_invalid_tag() {
        assert_eq!(
            ElementType::try_from(7),
            Err(TensorError::InvalidElementType { tag: 7 })
        );
        assert!(ElementType::from_tag(-1).is_err());
    }
}
