// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The call adapter: one method per remote call.
//!
//! | Call | Input | Operation |
//! |---|---|---|
//! | `greet` | name | n/a |
//! | `flip_vector` | one vector | `Reverse` |
//! | `add_vectors` | stream of vectors | `Sum` |
//! | `multiply_vectors` | two vectors | `DotProduct` |
//! | `add_matrices` | stream of matrices | `MatrixSum` |
//! | `multiply_matrices` | stream of matrices | `MatrixChainProduct` |
//!
//! Every tensor response is encoded as `DOUBLE`.

use crate::resource;
use crate::{
    CallMetrics, CallStatus, HelloReply, HelloRequest, MemoryStore, MessageSource, QueueSource,
    ResourceKind, ResourceStore, ServiceConfig, ServiceError, TensorMessage,
};
use reduction::{OperationKind, ReductionSession};
use std::sync::Arc;
use std::time::Instant;
use tensor_core::Tensor;

/// Drives kernel operations on behalf of the transport.
///
/// # Example
/// ```
/// use service::{CallAdapter, QueueSource, ServiceConfig, TensorMessage};
/// use tensor_core::Tensor;
///
/// # async fn example() -> Result<(), service::CallStatus> {
/// let adapter = CallAdapter::new(ServiceConfig::default());
/// let mut inbound = QueueSource::new(vec![
///     TensorMessage::from_tensor(&Tensor::vector(vec![1.0, 2.0, 3.0])),
///     TensorMessage::from_tensor(&Tensor::vector(vec![4.0, 5.0, 6.0])),
/// ]);
/// let reply = adapter.multiply_vectors(&mut inbound).await?;
/// assert_eq!(reply.decode(true).unwrap().elements(), &[32.0]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CallAdapter {
    config: ServiceConfig,
    store: Arc<dyn ResourceStore>,
}

impl CallAdapter {
    /// Creates an adapter backed by an in-process [`MemoryStore`].
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// Creates an adapter over an existing resource store.
    pub fn with_store(config: ServiceConfig, store: Arc<dyn ResourceStore>) -> Self {
        tracing::info!(
            "call adapter created (empty folds: {:?}, strict framing: {})",
            config.empty_fold_policy,
            config.strict_framing,
        );
        Self { config, store }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    // ── Calls ──────────────────────────────────────────────────

    /// Answers a greeting; used to check the service is up.
    pub fn greet(&self, request: &HelloRequest) -> HelloReply {
        tracing::info!("greeting requested by {}", request.name);
        HelloReply {
            message: format!("Hello, {}!", request.name),
        }
    }

    /// Reverses a single vector.
    pub fn flip_vector(&self, request: &TensorMessage) -> Result<TensorMessage, CallStatus> {
        tracing::info!("vector flip requested");
        let started = Instant::now();
        let mut metrics = CallMetrics::new("FlipVector", OperationKind::Reverse);
        metrics.record_message(request.payload.len());

        let outcome = self
            .decode(request)
            .and_then(|tensor| Ok(reduction::transform::reverse(&tensor)?));
        self.respond(metrics, started, outcome)
    }

    /// Elementwise sum of a stream of vectors.
    pub async fn add_vectors<S: MessageSource>(
        &self,
        inbound: &mut S,
    ) -> Result<TensorMessage, CallStatus> {
        self.fold_call("AddVectors", OperationKind::Sum, inbound).await
    }

    /// Dot product of exactly two vectors; never reads a third message.
    pub async fn multiply_vectors<S: MessageSource>(
        &self,
        inbound: &mut S,
    ) -> Result<TensorMessage, CallStatus> {
        self.fold_call("MultiplyVectors", OperationKind::DotProduct, inbound)
            .await
    }

    /// Elementwise sum of a stream of matrices.
    pub async fn add_matrices<S: MessageSource>(
        &self,
        inbound: &mut S,
    ) -> Result<TensorMessage, CallStatus> {
        self.fold_call("AddMatrices", OperationKind::MatrixSum, inbound)
            .await
    }

    /// Left-to-right product of a stream of matrices.
    pub async fn multiply_matrices<S: MessageSource>(
        &self,
        inbound: &mut S,
    ) -> Result<TensorMessage, CallStatus> {
        self.fold_call("MultiplyMatrices", OperationKind::MatrixChainProduct, inbound)
            .await
    }

    // ── Resources ──────────────────────────────────────────────

    /// Validates a JSON resource document and stores it; returns the new id.
    pub fn create_resource(&self, kind: ResourceKind, json: &str) -> Result<u64, CallStatus> {
        resource::parse(kind, json)?;
        let id = self.store.store_resource(kind, json.as_bytes().to_vec())?;
        tracing::info!("{kind} resource {id} created");
        Ok(id)
    }

    /// Loads a stored resource as a tensor.
    pub fn load_resource(&self, kind: ResourceKind, id: u64) -> Result<Tensor, CallStatus> {
        Ok(self.load_tensor(kind, id)?)
    }

    /// Runs `op` over stored resources, in the order of `ids`.
    ///
    /// The stored tensors go through the same wire path as a streaming call.
    pub async fn operate_on_resources(
        &self,
        op: OperationKind,
        ids: &[u64],
    ) -> Result<Tensor, CallStatus> {
        let kind = ResourceKind::for_operation(op);
        let messages = ids
            .iter()
            .map(|&id| self.load_tensor(kind, id).map(|t| TensorMessage::from_tensor(&t)))
            .collect::<Result<Vec<_>, ServiceError>>()?;

        let reply = match op {
            OperationKind::Reverse => match messages.as_slice() {
                [single] => self.flip_vector(single)?,
                _ => {
                    return Err(ServiceError::from(reduction::ReductionError::WrongOperation {
                        op,
                        expected: "single-operand",
                    })
                    .status())
                }
            },
            _ => {
                let mut source = QueueSource::new(messages);
                self.fold_call("OperateOnResources", op, &mut source).await?
            }
        };
        Ok(self.decode(&reply)?)
    }

    // ── Private helpers ────────────────────────────────────────

    async fn fold_call<S: MessageSource>(
        &self,
        call: &'static str,
        op: OperationKind,
        inbound: &mut S,
    ) -> Result<TensorMessage, CallStatus> {
        tracing::info!("{call} requested ({op})");
        let started = Instant::now();
        let mut metrics = CallMetrics::new(call, op);
        let outcome = self.fold(op, inbound, &mut metrics).await;
        self.respond(metrics, started, outcome)
    }

    /// Feeds inbound messages to a fresh session until it stops wanting input
    /// or the stream ends. Returns on the first failure without reading on.
    async fn fold<S: MessageSource>(
        &self,
        op: OperationKind,
        inbound: &mut S,
        metrics: &mut CallMetrics,
    ) -> Result<Tensor, ServiceError> {
        let mut session = ReductionSession::begin_with_policy(op, self.config.empty_fold_policy);

        while session.wants_input() {
            let Some(message) = inbound.next_message().await? else {
                break;
            };
            metrics.record_message(message.payload.len());
            tracing::debug!(
                "operand {}: {} message, {}",
                session.elements_seen() + 1,
                message.size,
                crate::human_size(message.payload.len()),
            );

            let tensor = self.decode(&message)?;
            session.feed(tensor)?;
        }

        Ok(session.finish()?)
    }

    fn decode(&self, message: &TensorMessage) -> Result<Tensor, ServiceError> {
        let tensor = message.decode(self.config.strict_framing)?;
        if self.config.log_tensors {
            tracing::trace!("incoming {}: {:?}", tensor.shape(), tensor.elements());
        }
        Ok(tensor)
    }

    fn load_tensor(&self, kind: ResourceKind, id: u64) -> Result<Tensor, ServiceError> {
        let blob = self
            .store
            .load_resource(kind, id)?
            .ok_or(ServiceError::NotFound { kind, id })?;
        let json = String::from_utf8(blob).map_err(|e| ServiceError::InvalidResource {
            kind,
            detail: e.to_string(),
        })?;
        resource::parse(kind, &json)
    }

    fn respond(
        &self,
        mut metrics: CallMetrics,
        started: Instant,
        outcome: Result<Tensor, ServiceError>,
    ) -> Result<TensorMessage, CallStatus> {
        match outcome {
            Ok(result) => {
                metrics.finalise(started.elapsed(), None);
                tracing::info!("{}", metrics.summary());
                tracing::debug!("result {}: {:?}", result.shape(), result.elements());
                Ok(TensorMessage::from_tensor(&result))
            }
            Err(err) => {
                let label = err
                    .kind()
                    .map_or_else(|| err.status().code.to_string(), |k| k.to_string());
                metrics.finalise(started.elapsed(), Some(label));
                tracing::warn!("{} failed: {err}", metrics.call);
                tracing::info!("{}", metrics.summary());
                Err(err.status())
            }
        }
    }
}

impl std::fmt::Debug for CallAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallAdapter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StatusCode;
    use reduction::EmptyFoldPolicy;
    use tensor_core::{ElementType, Shape};

    fn vec_msg(values: &[f64]) -> TensorMessage {
        TensorMessage::from_tensor(&Tensor::vector(values.to_vec()))
    }

    fn mat_msg(rows: usize, cols: usize, values: &[f64]) -> TensorMessage {
        TensorMessage::from_tensor(&Tensor::matrix(rows, cols, values.to_vec()).unwrap())
    }

    fn adapter() -> CallAdapter {
        CallAdapter::new(ServiceConfig::default())
    }

    #[test]
    fn test_greet() {
        let reply = adapter().greet(&HelloRequest {
            name: "Ada".into(),
        });
        assert_eq!(reply.message, "Hello, Ada!");
    }

    #[test]
    fn test_flip_vector() {
        let reply = adapter().flip_vector(&vec_msg(&[1.0, 2.0, 3.0, 4.0])).unwrap();
        assert_eq!(reply.element_type, ElementType::DOUBLE_TAG);
        assert_eq!(reply.decode(true).unwrap().elements(), &[4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_flip_int_vector_answers_double() {
        let request = TensorMessage::from_i32(Shape::vector(3), &[1, 2, 3]);
        let reply = adapter().flip_vector(&request).unwrap();
        assert_eq!(reply.element_type, ElementType::DOUBLE_TAG);
        assert_eq!(reply.payload.len(), 24);
        assert_eq!(reply.decode(true).unwrap().elements(), &[3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_flip_invalid_tag() {
        let mut request = vec_msg(&[1.0]);
        request.element_type = 9;
        let status = adapter().flip_vector(&request).unwrap_err();
        assert_eq!(status.code, StatusCode::InvalidArgument);
    }

    #[tokio::test]
    async fn test_oversized_shapes_are_invalid_argument() {
        let huge_matrix = TensorMessage {
            element_type: ElementType::DOUBLE_TAG,
            size: Shape::matrix(1 << 32, 1 << 32),
            payload: Vec::new(),
        };
        let mut inbound = QueueSource::new(vec![huge_matrix]);
        let status = adapter().add_matrices(&mut inbound).await.unwrap_err();
        assert_eq!(status.code, StatusCode::InvalidArgument);
        assert!(status.message.contains("too large"));

        let huge_vector = TensorMessage {
            element_type: ElementType::DOUBLE_TAG,
            size: Shape::vector(usize::MAX / 4),
            payload: vec![0; 8],
        };
        let status = adapter().flip_vector(&huge_vector).unwrap_err();
        assert_eq!(status.code, StatusCode::InvalidArgument);
    }

    #[tokio::test]
    async fn test_add_vectors() {
        let mut inbound = QueueSource::new(vec![
            vec_msg(&[1.0, 2.0, 3.0, 4.0]),
            vec_msg(&[5.0, 4.0, 2.0, 0.0]),
        ]);
        let reply = adapter().add_vectors(&mut inbound).await.unwrap();
        assert_eq!(reply.decode(true).unwrap().elements(), &[6.0, 6.0, 5.0, 4.0]);
    }

    #[tokio::test]
    async fn test_mismatch_stops_reading() {
        let mut inbound = QueueSource::new(vec![
            vec_msg(&[1.0, 2.0]),
            vec_msg(&[1.0]),
            vec_msg(&[1.0, 2.0]),
            vec_msg(&[1.0, 2.0]),
        ]);
        let status = adapter().add_vectors(&mut inbound).await.unwrap_err();
        assert_eq!(status.code, StatusCode::Cancelled);
        assert_eq!(inbound.taken(), 2);
        assert_eq!(inbound.remaining(), 2);
    }

    #[tokio::test]
    async fn test_multiply_vectors_reads_two() {
        let mut inbound = QueueSource::new(vec![
            vec_msg(&[1.0, 2.0, 3.0]),
            vec_msg(&[4.0, 5.0, 6.0]),
            vec_msg(&[7.0]),
        ]);
        let reply = adapter().multiply_vectors(&mut inbound).await.unwrap();
        let result = reply.decode(true).unwrap();
        assert_eq!(result.shape(), &Shape::vector(1));
        assert_eq!(result.elements(), &[32.0]);
        assert_eq!(inbound.remaining(), 1);
    }

    #[tokio::test]
    async fn test_multiply_vectors_missing_second() {
        let mut inbound = QueueSource::new(vec![vec_msg(&[1.0, 2.0, 3.0])]);
        let status = adapter().multiply_vectors(&mut inbound).await.unwrap_err();
        assert_eq!(status.code, StatusCode::Cancelled);
        assert!(status.message.contains("no incoming operand 2"));
    }

    #[tokio::test]
    async fn test_multiply_matrices_chain() {
        let mut inbound = QueueSource::new(vec![
            mat_msg(2, 2, &[1.0, 0.0, 0.0, 1.0]),
            mat_msg(2, 2, &[2.0, 3.0, 4.0, 5.0]),
        ]);
        let reply = adapter().multiply_matrices(&mut inbound).await.unwrap();
        assert_eq!(reply.size, Shape::matrix(2, 2));
        assert_eq!(reply.decode(true).unwrap().elements(), &[2.0, 3.0, 4.0, 5.0]);
    }

    #[tokio::test]
    async fn test_vector_sent_to_matrix_call() {
        let mut inbound = QueueSource::new(vec![vec_msg(&[1.0, 2.0])]);
        let status = adapter().add_matrices(&mut inbound).await.unwrap_err();
        assert_eq!(status.code, StatusCode::Cancelled);
    }

    #[tokio::test]
    async fn test_empty_stream_policy() {
        let mut inbound = QueueSource::default();
        let reply = adapter().add_matrices(&mut inbound).await.unwrap();
        assert_eq!(reply.size, Shape::matrix(0, 0));
        assert!(reply.payload.is_empty());

        let strict = CallAdapter::new(ServiceConfig {
            empty_fold_policy: EmptyFoldPolicy::Reject,
            ..Default::default()
        });
        let status = strict.add_vectors(&mut QueueSource::default()).await.unwrap_err();
        assert_eq!(status.code, StatusCode::FailedPrecondition);
    }

    #[tokio::test]
    async fn test_strict_framing() {
        let mut message = vec_msg(&[1.0]);
        message.payload.push(0);

        let lenient = adapter();
        let mut inbound = QueueSource::new(vec![message.clone()]);
        assert!(lenient.add_vectors(&mut inbound).await.is_ok());

        let strict = CallAdapter::new(ServiceConfig {
            strict_framing: true,
            ..Default::default()
        });
        let mut inbound = QueueSource::new(vec![message]);
        let status = strict.add_vectors(&mut inbound).await.unwrap_err();
        assert_eq!(status.code, StatusCode::InvalidArgument);
    }

    #[tokio::test]
    async fn test_resources() {
        let adapter = adapter();
        let a = adapter
            .create_resource(ResourceKind::Matrix, r#"{"value": [[1, 2], [3, 4]]}"#)
            .unwrap();
        let b = adapter
            .create_resource(ResourceKind::Matrix, r#"{"value": [[5, 4], [2, 0]]}"#)
            .unwrap();

        let sum = adapter
            .operate_on_resources(OperationKind::MatrixSum, &[a, b])
            .await
            .unwrap();
        assert_eq!(sum.elements(), &[6.0, 6.0, 5.0, 4.0]);

        let product = adapter
            .operate_on_resources(OperationKind::MatrixChainProduct, &[a, b])
            .await
            .unwrap();
        assert_eq!(product.elements(), &[9.0, 4.0, 23.0, 12.0]);

        let status = adapter
            .operate_on_resources(OperationKind::MatrixSum, &[a, 42])
            .await
            .unwrap_err();
        assert_eq!(status.code, StatusCode::NotFound);
    }

    #[test]
    fn test_create_invalid_resource() {
        let status = adapter()
            .create_resource(ResourceKind::Vector, r#"{"mycar": 2}"#)
            .unwrap_err();
        assert_eq!(status.code, StatusCode::InvalidArgument);
    }
}
