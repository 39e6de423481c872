// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tensor-rpc greet` command.

use service::{CallAdapter, HelloRequest, ServiceConfig};

pub fn execute(config: ServiceConfig, name: String) -> anyhow::Result<()> {
    let adapter = CallAdapter::new(config);
    let reply = adapter.greet(&HelloRequest { name });
    println!("{}", reply.message);
    Ok(())
}
