// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-rpc
//!
//! Command-line front end for the tensor call adapter.
//!
//! Operands are JSON documents of the form `{"value": [1, 2, 3]}` (vectors)
//! or `{"value": [[1, 2], [3, 4]]}` (matrices). Results are printed in the
//! same form.
//!
//! ## Usage
//! ```bash
//! # Dot product of two vectors
//! tensor-rpc dot a.json b.json
//!
//! # Chain product of three matrices, with debug logging
//! tensor-rpc -vv mul-matrices m1.json m2.json m3.json
//!
//! # Store operands as resources and operate on them by id
//! tensor-rpc resources --op matrix-sum m1.json m2.json
//! ```

mod commands;

use clap::{Parser, Subcommand};
use reduction::OperationKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tensor-rpc",
    about = "Streams tensors through vector and matrix reductions",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a greeting and print the reply.
    Greet {
        /// Name to greet.
        name: String,
    },

    /// Reverse a vector.
    Flip {
        /// Vector document.
        file: PathBuf,
    },

    /// Elementwise sum of vectors.
    AddVectors {
        /// Vector documents, in stream order.
        files: Vec<PathBuf>,
    },

    /// Dot product of two vectors.
    Dot {
        /// First vector document.
        a: PathBuf,
        /// Second vector document.
        b: PathBuf,
    },

    /// Elementwise sum of matrices.
    AddMatrices {
        /// Matrix documents, in stream order.
        files: Vec<PathBuf>,
    },

    /// Left-to-right product of matrices.
    MulMatrices {
        /// Matrix documents, in stream order.
        files: Vec<PathBuf>,
    },

    /// Store documents as resources, then run an operation over their ids.
    Resources {
        /// Operation: reverse, sum, dot-product, matrix-sum, matrix-chain-product.
        #[arg(short, long)]
        op: String,

        /// Documents to store, in operand order.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the effective configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Greet { name } => commands::greet::execute(config, name),
        Commands::Flip { file } => commands::stream::flip(config, file),
        Commands::AddVectors { files } => {
            commands::stream::execute(config, OperationKind::Sum, files).await
        }
        Commands::Dot { a, b } => {
            commands::stream::execute(config, OperationKind::DotProduct, vec![a, b]).await
        }
        Commands::AddMatrices { files } => {
            commands::stream::execute(config, OperationKind::MatrixSum, files).await
        }
        Commands::MulMatrices { files } => {
            commands::stream::execute(config, OperationKind::MatrixChainProduct, files).await
        }
        Commands::Resources { op, files } => {
            let op = OperationKind::parse(&op)
                .ok_or_else(|| anyhow::anyhow!("unknown operation '{op}'"))?;
            commands::resources::execute(config, op, files).await
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
