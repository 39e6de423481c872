// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The per-call fold state machine.
//!
//! ```text
//! ReductionSession::begin(op)       state = Empty
//!     │  .feed(t1)                  accumulator = t1
//!     ▼
//!   Accumulating ──.feed(tn)──► validator::check ──► combine / Failed
//!     │  .finish()
//!     ▼
//!   Result<Tensor, ReductionError>  state = Finalized | Failed
//! ```
//!
//! Sums and chain products keep a running accumulator. A dot product keeps
//! both operands verbatim in a two-slot buffer and combines them only in
//! `finish`, once both are known.

use crate::validator::{self, Compatibility};
use crate::{OperationKind, ReductionError};
use tensor_core::Tensor;

/// What `finish` returns for a fold that received no tensors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyFoldPolicy {
    /// Return an empty `Float64` tensor (`[0]` or `[0 x 0]`).
    #[default]
    EmptyResult,
    /// Fail with [`ReductionError::EmptyResult`].
    Reject,
}

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Empty,
    Accumulating,
    Failed,
    Finalized,
}

#[derive(Debug, Clone, Default)]
enum SessionState {
    #[default]
    Empty,
    Accumulating(Accumulator),
    Failed(ReductionError),
    Finalized,
}

#[derive(Debug, Clone)]
enum Accumulator {
    /// Running value for open folds.
    Running(Tensor),
    /// Operand slots for the dot product.
    Operands { first: Tensor, second: Option<Tensor> },
}

/// Transient fold state for one call.
///
/// Created at call start, fed once per inbound tensor in arrival order, and
/// dropped at call end.
#[derive(Debug, Clone)]
pub struct ReductionSession {
    operation: OperationKind,
    policy: EmptyFoldPolicy,
    state: SessionState,
    elements_seen: usize,
}

impl ReductionSession {
    /// Starts an empty session under the default [`EmptyFoldPolicy`].
    pub fn begin(operation: OperationKind) -> Self {
        Self::begin_with_policy(operation, EmptyFoldPolicy::default())
    }

    /// Starts an empty session with an explicit zero-input policy.
    pub fn begin_with_policy(operation: OperationKind, policy: EmptyFoldPolicy) -> Self {
        Self {
            operation,
            policy,
            state: SessionState::Empty,
            elements_seen: 0,
        }
    }

    pub fn operation(&self) -> OperationKind {
        self.operation
    }

    pub fn policy(&self) -> EmptyFoldPolicy {
        self.policy
    }

    /// Returns the number of tensors accepted so far.
    pub fn elements_seen(&self) -> usize {
        self.elements_seen
    }

    pub fn status(&self) -> SessionStatus {
        match self.state {
            SessionState::Empty => SessionStatus::Empty,
            SessionState::Accumulating(_) => SessionStatus::Accumulating,
            SessionState::Failed(_) => SessionStatus::Failed,
            SessionState::Finalized => SessionStatus::Finalized,
        }
    }

    /// Returns the recorded failure, if the session is `Failed`.
    pub fn error(&self) -> Option<&ReductionError> {
        match &self.state {
            SessionState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Returns `true` once the session is `Failed` or `Finalized`.
    pub fn is_terminal(&self) -> bool {
        matches!(self.state, SessionState::Failed(_) | SessionState::Finalized)
    }

    /// Returns `true` while another inbound tensor is meaningful.
    ///
    /// False in terminal states and once a dot product holds both operands,
    /// so callers never read past what the operation needs.
    pub fn wants_input(&self) -> bool {
        match &self.state {
            SessionState::Empty => true,
            SessionState::Accumulating(Accumulator::Operands { second, .. }) => second.is_none(),
            SessionState::Accumulating(Accumulator::Running(_)) => true,
            SessionState::Failed(_) | SessionState::Finalized => false,
        }
    }

    /// Pure transition: consumes the session and returns its successor.
    pub fn step(mut self, tensor: Tensor) -> Self {
        self.advance(tensor);
        self
    }

    /// Feeds one tensor.
    ///
    /// Returns the session's failure if it is `Failed` after this call; the
    /// caller must then stop reading input. Feeding a `Finalized` session is
    /// a no-op.
    pub fn feed(&mut self, tensor: Tensor) -> Result<(), ReductionError> {
        self.advance(tensor);
        match &self.state {
            SessionState::Failed(err) => Err(err.clone()),
            _ => Ok(()),
        }
    }

    /// Completes the fold and returns the result.
    ///
    /// The session is `Finalized` on success and `Failed` on error.
    pub fn finish(&mut self) -> Result<Tensor, ReductionError> {
        let op = self.operation;
        let outcome = match std::mem::replace(&mut self.state, SessionState::Finalized) {
            SessionState::Finalized => return Err(ReductionError::SessionClosed { op }),
            SessionState::Failed(err) => Err(err),
            SessionState::Empty => self.finish_empty(),
            SessionState::Accumulating(Accumulator::Running(tensor)) => Ok(tensor),
            SessionState::Accumulating(Accumulator::Operands {
                first,
                second: Some(second),
            }) => tensor_core::dot(&first, &second)
                .map(|value| Tensor::vector(vec![value]))
                .map_err(|source| ReductionError::Kernel { op, source }),
            SessionState::Accumulating(Accumulator::Operands { second: None, .. }) => {
                Err(ReductionError::InsufficientInput {
                    op,
                    missing_operand: 2,
                })
            }
        };

        if let Err(err) = &outcome {
            self.state = SessionState::Failed(err.clone());
        }
        outcome
    }

    fn finish_empty(&self) -> Result<Tensor, ReductionError> {
        let op = self.operation;
        match op {
            OperationKind::Reverse => Err(ReductionError::WrongOperation {
                op,
                expected: "fold",
            }),
            OperationKind::DotProduct => Err(ReductionError::InsufficientInput {
                op,
                missing_operand: 1,
            }),
            _ => match self.policy {
                EmptyFoldPolicy::EmptyResult => {
                    Ok(Tensor::empty_like(&op.operand_rank().empty_shape()))
                }
                EmptyFoldPolicy::Reject => Err(ReductionError::EmptyResult { op }),
            },
        }
    }

    fn advance(&mut self, tensor: Tensor) {
        let position = self.elements_seen + 1;
        let next = match std::mem::take(&mut self.state) {
            SessionState::Empty => self.start(tensor, position),
            SessionState::Accumulating(acc) => self.combine(acc, tensor, position),
            terminal => {
                self.state = terminal;
                return;
            }
        };

        self.state = match next {
            Ok(acc) => {
                self.elements_seen = position;
                SessionState::Accumulating(acc)
            }
            Err(err) => {
                tracing::debug!("{} failed at operand {position}: {err}", self.operation);
                SessionState::Failed(err)
            }
        };
    }

    fn start(&self, tensor: Tensor, position: usize) -> Result<Accumulator, ReductionError> {
        let op = self.operation;
        if !op.is_fold() {
            return Err(ReductionError::WrongOperation {
                op,
                expected: "fold",
            });
        }
        if !validator::check_operand(op, tensor.shape()) {
            return Err(ReductionError::UnsupportedOperand {
                op,
                position,
                expected: op.operand_rank().as_str(),
                shape: *tensor.shape(),
            });
        }

        Ok(match op {
            OperationKind::DotProduct => Accumulator::Operands {
                first: tensor,
                second: None,
            },
            _ => Accumulator::Running(tensor),
        })
    }

    fn combine(
        &self,
        acc: Accumulator,
        incoming: Tensor,
        position: usize,
    ) -> Result<Accumulator, ReductionError> {
        let op = self.operation;
        let mismatch = |accumulator: &Tensor, incoming: &Tensor| ReductionError::ShapeMismatch {
            op,
            position,
            accumulator: *accumulator.shape(),
            incoming: *incoming.shape(),
        };

        match acc {
            Accumulator::Operands {
                second: Some(_), ..
            } => Err(ReductionError::TooManyOperands {
                op,
                expected: 2,
                position,
            }),
            Accumulator::Operands {
                first,
                second: None,
            } => match validator::check(op, first.shape(), incoming.shape()) {
                Compatibility::Compatible(_) => Ok(Accumulator::Operands {
                    first,
                    second: Some(incoming),
                }),
                Compatibility::Incompatible => Err(mismatch(&first, &incoming)),
            },
            Accumulator::Running(running) => {
                if !validator::check(op, running.shape(), incoming.shape()).is_compatible() {
                    return Err(mismatch(&running, &incoming));
                }
                let combined = match op {
                    OperationKind::MatrixChainProduct => tensor_core::matmul(&running, &incoming),
                    _ => tensor_core::add(&running, &incoming),
                };
                combined
                    .map(Accumulator::Running)
                    .map_err(|source| ReductionError::Kernel { op, source })
            }
        }
    }
}

/// Folds `tensors` under `op` with the default policy.
///
/// Stops pulling from the iterator as soon as the session fails or no longer
/// wants input, so a mismatch at position `k` leaves the rest unconsumed.
pub fn reduce<I>(op: OperationKind, tensors: I) -> Result<Tensor, ReductionError>
where
    I: IntoIterator<Item = Tensor>,
{
    let mut session = ReductionSession::begin(op);
    let mut tensors = tensors.into_iter();
    while session.wants_input() {
        match tensors.next() {
            Some(tensor) => session.feed(tensor)?,
            None => break,
        }
    }
    session.finish()
}
