// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # reduction
//!
//! Folds a sequence of tensors into a single result under a chosen
//! operation, validating shapes at every step.
//!
//! # Key Components
//!
//! - [`OperationKind`]: the supported operations and the operand rank each
//!   accepts.
//! - [`validator`]: the pure shape-compatibility check.
//! - [`ReductionSession`]: the per-call fold state machine.
//! - [`transform`]: single-input operations (vector reversal).
//!
//! # Session Lifecycle
//!
//! ```text
//!            feed (first)          feed (compatible)
//!   Empty ───────────────► Accumulating ◄──────┐
//!     │                     │   │   └──────────┘
//!     │ finish              │   │ feed (incompatible)
//!     ▼                     │   ▼
//!  Finalized ◄──── finish ──┘  Failed
//! ```
//!
//! `Failed` and `Finalized` are terminal. A session is owned by exactly one
//! call and is never shared.
//!
//! # Example
//! ```
//! use reduction::{OperationKind, ReductionSession};
//! use tensor_core::Tensor;
//!
//! let mut session = ReductionSession::begin(OperationKind::DotProduct);
//! session.feed(Tensor::vector(vec![1.0, 2.0, 3.0])).unwrap();
//! session.feed(Tensor::vector(vec![4.0, 5.0, 6.0])).unwrap();
//! assert_eq!(session.finish().unwrap().elements(), &[32.0]);
//! ```

mod error;
mod operation;
mod session;
pub mod transform;
pub mod validator;

pub use error::{ErrorKind, ReductionError};
pub use operation::{OperandRank, OperationKind};
pub use session::{reduce, EmptyFoldPolicy, ReductionSession, SessionStatus};
pub use validator::Compatibility;
