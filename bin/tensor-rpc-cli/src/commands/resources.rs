// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tensor-rpc resources` command: store documents, then operate by id.

use super::{print_tensor, read_document};
use reduction::OperationKind;
use service::{CallAdapter, ResourceKind, ServiceConfig};
use std::path::PathBuf;

pub async fn execute(
    config: ServiceConfig,
    op: OperationKind,
    files: Vec<PathBuf>,
) -> anyhow::Result<()> {
    let kind = ResourceKind::for_operation(op);
    let adapter = CallAdapter::new(config);

    let mut ids = Vec::with_capacity(files.len());
    for file in &files {
        let id = adapter.create_resource(kind, &read_document(file)?)?;
        eprintln!("  stored {} as {kind} {id}", file.display());
        ids.push(id);
    }

    let result = adapter.operate_on_resources(op, &ids).await?;
    print_tensor(&result)
}
