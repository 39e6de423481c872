// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor arithmetic kernels.
//!
//! Every kernel validates shapes first and returns a `Float64` result;
//! nothing here panics on caller-supplied shapes.

mod add_op;
mod dot_op;
mod matmul_op;
mod reverse_op;

pub use add_op::add;
pub use dot_op::dot;
pub use matmul_op::matmul;
pub use reverse_op::reverse;
