// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Streaming commands: `flip`, `add-vectors`, `dot`, `add-matrices`,
//! `mul-matrices`.
//!
//! Operands are read up front, then a producer task pushes them through a
//! bounded channel while the adapter consumes the other end:
//! ```text
//! files → Tensor → TensorMessage → mpsc → CallAdapter → TensorMessage → JSON
//! ```

use super::{print_tensor, read_tensor};
use reduction::OperationKind;
use service::{CallAdapter, ResourceKind, ServiceConfig, TensorMessage};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub fn flip(config: ServiceConfig, file: PathBuf) -> anyhow::Result<()> {
    let tensor = read_tensor(&file, ResourceKind::Vector)?;
    let adapter = CallAdapter::new(config);
    let reply = adapter.flip_vector(&TensorMessage::from_tensor(&tensor))?;
    print_tensor(&reply.decode(true)?)
}

pub async fn execute(
    config: ServiceConfig,
    op: OperationKind,
    files: Vec<PathBuf>,
) -> anyhow::Result<()> {
    let kind = ResourceKind::for_operation(op);
    let tensors = files
        .iter()
        .map(|file| read_tensor(file, kind))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let adapter = CallAdapter::new(config);
    let (tx, mut rx) = mpsc::channel(adapter.config().channel_capacity);
    let producer = tokio::spawn(async move {
        for tensor in tensors {
            if tx.send(TensorMessage::from_tensor(&tensor)).await.is_err() {
                tracing::debug!("call ended before every operand was sent");
                break;
            }
        }
    });

    let reply = match op {
        OperationKind::Sum => adapter.add_vectors(&mut rx).await,
        OperationKind::DotProduct => adapter.multiply_vectors(&mut rx).await,
        OperationKind::MatrixSum => adapter.add_matrices(&mut rx).await,
        OperationKind::MatrixChainProduct => adapter.multiply_matrices(&mut rx).await,
        OperationKind::Reverse => {
            return Err(anyhow::anyhow!("{op} takes a single vector, use `flip`"));
        }
    };

    // Closing the receiver unblocks a producer stuck on a full channel.
    drop(rx);
    producer.await?;

    print_tensor(&reply?.decode(true)?)
}
