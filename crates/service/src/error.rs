// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the call adapter and their call-level status mapping.

use crate::ResourceKind;
use reduction::{ErrorKind, ReductionError};
use std::fmt;
use tensor_core::TensorError;

/// Errors that can occur while serving a call.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// An inbound message could not be decoded.
    #[error("malformed tensor message: {0}")]
    Decode(#[from] TensorError),

    /// The reduction kernel rejected the input.
    #[error(transparent)]
    Reduction(#[from] ReductionError),

    /// The transport failed to deliver the next message.
    #[error("transport error: {0}")]
    Transport(String),

    /// No stored resource has this id.
    #[error("{kind} resource {id} not found")]
    NotFound { kind: ResourceKind, id: u64 },

    /// A resource document could not be parsed.
    #[error("invalid {kind} document: {detail}")]
    InvalidResource { kind: ResourceKind, detail: String },

    /// The resource store is unusable.
    #[error("storage error: {0}")]
    Storage(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl ServiceError {
    /// Returns the kernel failure category, if this error came from the kernel.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ServiceError::Decode(err) => Some(ErrorKind::from(err)),
            ServiceError::Reduction(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// Maps the error to the status reported to the caller.
    pub fn status(&self) -> CallStatus {
        let code = match self {
            ServiceError::Decode(_) => StatusCode::InvalidArgument,
            ServiceError::Reduction(err) => match err.kind() {
                ErrorKind::ShapeMismatch
                | ErrorKind::InsufficientInput
                | ErrorKind::ExcessInput => StatusCode::Cancelled,
                ErrorKind::InvalidElementType | ErrorKind::MalformedPayload => {
                    StatusCode::InvalidArgument
                }
                ErrorKind::EmptyResult => StatusCode::FailedPrecondition,
                ErrorKind::InvalidCall => StatusCode::Internal,
            },
            ServiceError::Transport(_) => StatusCode::Unavailable,
            ServiceError::NotFound { .. } => StatusCode::NotFound,
            ServiceError::InvalidResource { .. } => StatusCode::InvalidArgument,
            ServiceError::Storage(_) | ServiceError::ConfigError(_) => StatusCode::Internal,
        };
        CallStatus::new(code, self.to_string())
    }
}

/// Status codes for failed calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    Cancelled,
    InvalidArgument,
    FailedPrecondition,
    NotFound,
    Unavailable,
    Internal,
}

impl StatusCode {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Cancelled => "CANCELLED",
            StatusCode::InvalidArgument => "INVALID_ARGUMENT",
            StatusCode::FailedPrecondition => "FAILED_PRECONDITION",
            StatusCode::NotFound => "NOT_FOUND",
            StatusCode::Unavailable => "UNAVAILABLE",
            StatusCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed-call response: a status code plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct CallStatus {
    pub code: StatusCode,
    pub message: String,
}

impl CallStatus {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<ServiceError> for CallStatus {
    fn from(err: ServiceError) -> Self {
        err.status()
    }
}
