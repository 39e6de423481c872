// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

pub mod greet;
pub mod resources;
pub mod stream;

use anyhow::Context;
use service::{resource, ResourceKind, ServiceConfig};
use std::path::Path;
use tensor_core::Tensor;
use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<ServiceConfig> {
    match path {
        Some(path) => {
            let config = ServiceConfig::from_file(path)?;
            tracing::info!("loaded configuration from {}", path.display());
            Ok(config)
        }
        None => Ok(ServiceConfig::default()),
    }
}

pub fn read_document(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read '{}'", path.display()))
}

pub fn read_tensor(path: &Path, kind: ResourceKind) -> anyhow::Result<Tensor> {
    let json = read_document(path)?;
    resource::parse(kind, &json).with_context(|| format!("invalid operand '{}'", path.display()))
}

pub fn print_tensor(tensor: &Tensor) -> anyhow::Result<()> {
    println!("{}", resource::to_json(tensor)?);
    Ok(())
}
