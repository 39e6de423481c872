// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # service
//!
//! The call adapter that sits between a message transport and the
//! reduction kernel.
//!
//! For each client-streaming call the adapter:
//! 1. Opens a [`reduction::ReductionSession`] for the requested operation.
//! 2. Pulls inbound [`TensorMessage`]s from a [`MessageSource`] one at a time,
//!    decodes them, and feeds the session in arrival order.
//! 3. On the first failure, stops reading and answers with a [`CallStatus`].
//! 4. On end of input, finishes the session and encodes the result as a
//!    `DOUBLE` message.
//!
//! ```text
//! MessageSource ──► TensorMessage ──decode──► ReductionSession ──finish──► encode ──► TensorMessage
//!                                                  │
//!                                                  └── failure ──► CallStatus (no further reads)
//! ```
//!
//! The transport owns channel teardown: after a failure the adapter simply
//! returns, and any messages still in flight are the transport's to discard.
//!
//! # Concurrency
//! [`CallAdapter`] is `Clone + Send + Sync`. Each call owns its session; the
//! only shared state is the resource store behind an `Arc`.

mod adapter;
mod config;
mod error;
mod metrics;
pub mod resource;
mod source;
mod store;
mod wire;

pub use adapter::CallAdapter;
pub use config::ServiceConfig;
pub use error::{CallStatus, ServiceError, StatusCode};
pub use metrics::{human_size, CallMetrics};
pub use source::{MessageSource, QueueSource};
pub use store::{MemoryStore, ResourceKind, ResourceStore};
pub use wire::{HelloReply, HelloRequest, TensorMessage};
