// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The inbound side of the transport.
//!
//! A [`MessageSource`] yields messages in arrival order and `Ok(None)` at end
//! of stream. Awaiting the next message is the only suspension point of a
//! call; the kernel itself never blocks or times out. A source must tolerate
//! the adapter stopping early: after a failure no further message is read.

use crate::{ServiceError, TensorMessage};
use std::collections::VecDeque;
use std::future::Future;
use tokio::sync::mpsc;

/// A stream of inbound tensor messages for one call.
pub trait MessageSource: Send {
    /// Returns the next message, `Ok(None)` at end of stream.
    fn next_message(
        &mut self,
    ) -> impl Future<Output = Result<Option<TensorMessage>, ServiceError>> + Send;
}

impl MessageSource for mpsc::Receiver<TensorMessage> {
    async fn next_message(&mut self) -> Result<Option<TensorMessage>, ServiceError> {
        Ok(self.recv().await)
    }
}

impl MessageSource for mpsc::Receiver<Result<TensorMessage, ServiceError>> {
    async fn next_message(&mut self) -> Result<Option<TensorMessage>, ServiceError> {
        self.recv().await.transpose()
    }
}

/// An in-memory source over already-received messages.
///
/// Counts how many messages were taken so callers can confirm the adapter
/// stopped reading.
#[derive(Debug, Default)]
pub struct QueueSource {
    queue: VecDeque<TensorMessage>,
    taken: usize,
}

impl QueueSource {
    pub fn new(messages: impl IntoIterator<Item = TensorMessage>) -> Self {
        Self {
            queue: messages.into_iter().collect(),
            taken: 0,
        }
    }

    /// Messages handed out so far.
    pub fn taken(&self) -> usize {
        self.taken
    }

    /// Messages never read.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl MessageSource for QueueSource {
    async fn next_message(&mut self) -> Result<Option<TensorMessage>, ServiceError> {
        let next = self.queue.pop_front();
        if next.is_some() {
            self.taken += 1;
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensor_core::Tensor;

    fn msg(v: f64) -> TensorMessage {
        TensorMessage::from_tensor(&Tensor::vector(vec![v]))
    }

    #[tokio::test]
    async fn test_queue_source() {
        let mut source = QueueSource::new(vec![msg(1.0), msg(2.0)]);
        assert!(source.next_message().await.unwrap().is_some());
        assert_eq!(source.taken(), 1);
        assert_eq!(source.remaining(), 1);
        assert!(source.next_message().await.unwrap().is_some());
        assert!(source.next_message().await.unwrap().is_none());
        assert_eq!(source.taken(), 2);
    }

    #[tokio::test]
    async fn test_channel_source_ends_when_sender_dropped() {
        let (tx, mut rx) = mpsc::channel::<TensorMessage>(4);
        tx.send(msg(1.0)).await.unwrap();
        drop(tx);
        assert!(rx.next_message().await.unwrap().is_some());
        assert!(rx.next_message().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fallible_channel_source() {
        let (tx, mut rx) = mpsc::channel::<Result<TensorMessage, ServiceError>>(4);
        tx.send(Err(ServiceError::Transport("stream reset".into())))
            .await
            .unwrap();
        let err = rx.next_message().await.unwrap_err();
        assert!(matches!(err, ServiceError::Transport(_)));
    }
}
