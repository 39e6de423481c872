// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Resource storage: opaque blobs under numeric ids.
//!
//! Ids are assigned per [`ResourceKind`], starting at 1, and never reused.

use crate::ServiceError;
use reduction::{OperandRank, OperationKind};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// The two resource collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Vector,
    Matrix,
}

impl ResourceKind {
    /// Returns the collection an operation reads its operands from.
    pub fn for_operation(op: OperationKind) -> Self {
        match op.operand_rank() {
            OperandRank::Vector => ResourceKind::Vector,
            OperandRank::Matrix => ResourceKind::Matrix,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Vector => "vector",
            ResourceKind::Matrix => "matrix",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Create/read storage for resource blobs.
pub trait ResourceStore: Send + Sync {
    /// Stores `blob` and returns its new id.
    fn store_resource(&self, kind: ResourceKind, blob: Vec<u8>) -> Result<u64, ServiceError>;

    /// Loads a blob by id; `Ok(None)` if no such resource exists.
    fn load_resource(&self, kind: ResourceKind, id: u64) -> Result<Option<Vec<u8>>, ServiceError>;
}

type Entries = HashMap<(ResourceKind, u64), Vec<u8>>;

/// An in-process [`ResourceStore`].
#[derive(Debug)]
pub struct MemoryStore {
    next_vector_id: AtomicU64,
    next_matrix_id: AtomicU64,
    entries: Mutex<Entries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_vector_id: AtomicU64::new(1),
            next_matrix_id: AtomicU64::new(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the number of stored resources across both kinds.
    pub fn len(&self) -> Result<usize, ServiceError> {
        Ok(self.lock_entries()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, ServiceError> {
        Ok(self.len()? == 0)
    }

    fn lock_entries(&self) -> Result<MutexGuard<'_, Entries>, ServiceError> {
        self.entries
            .lock()
            .map_err(|_| ServiceError::Storage("resource table lock poisoned".into()))
    }

    fn counter(&self, kind: ResourceKind) -> &AtomicU64 {
        match kind {
            ResourceKind::Vector => &self.next_vector_id,
            ResourceKind::Matrix => &self.next_matrix_id,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceStore for MemoryStore {
    fn store_resource(&self, kind: ResourceKind, blob: Vec<u8>) -> Result<u64, ServiceError> {
        let mut entries = self.lock_entries()?;
        let id = self.counter(kind).fetch_add(1, Ordering::Relaxed);
        entries.insert((kind, id), blob);
        tracing::debug!("stored {kind} resource {id}");
        Ok(id)
    }

    fn load_resource(&self, kind: ResourceKind, id: u64) -> Result<Option<Vec<u8>>, ServiceError> {
        let entries = self.lock_entries()?;
        Ok(entries.get(&(kind, id)).cloned())
    }
}
