use std::future::Future;
use std::sync::Arc;

use aws_lambda_events::sqs::{SqsBatchResponse, SqsEvent, SqsMessage};
use futures::future::BoxFuture;
use lambda_runtime::LambdaEvent;
use tracing::info;

use crate::errors::SqsLambdaError;
use crate::queue::{SqsQueue, SqsQueueOps};

pub mod config;
mod process;

pub use config::{FailureReporting, SqsHandlerConfig};

/// The future produced by a generated handler for one invocation.
pub type SqsHandlerFuture = BoxFuture<'static, Result<SqsBatchResponse, lambda_runtime::Error>>;

/// A generated Lambda entry point, ready to be passed to
/// `lambda_runtime::service_fn`.
pub type SqsHandlerFn = Box<dyn Fn(LambdaEvent<SqsEvent>) -> SqsHandlerFuture + Send + Sync>;

/// Creates a Lambda entry point that consumes an SQS batch with the given
/// per-record runner, selecting the failure reporting mode from `config`.
///
/// With the default configuration (`report_batch_item_failures = true`) the
/// handler returns a `batchItemFailures` list and SQS redelivers only the
/// failed records; see [`create_report_failure_handler`]. With
/// `report_batch_item_failures = false` the handler deletes handled records
/// itself and fails the whole invocation when any record fails; see
/// [`create_manual_delete_handler`].
///
/// # Arguments
///
/// * `runner` - The per-record handler function
/// * `config` - Failure reporting configuration
///
/// # Example
///
/// ```rust,no_run
/// use lambda_runtime::{run, service_fn};
/// use rs_sqs_lambda::handler::{SqsHandlerConfig, create_sqs_handler};
///
/// #[tokio::main]
/// async fn main() -> Result<(), lambda_runtime::Error> {
///     let handler = create_sqs_handler(
///         |message| async move {
///             let body = message.body.unwrap_or_default();
///             if body.trim().is_empty() {
///                 // failed, but not worth redelivering
///                 tracing::error!("record body is empty");
///                 return Ok(());
///             }
///             tracing::info!(%body, "processing record");
///             Ok(())
///         },
///         SqsHandlerConfig::default(),
///     );
///
///     run(service_fn(handler)).await
/// }
/// ```
pub fn create_sqs_handler<F, Fut>(runner: F, config: SqsHandlerConfig) -> SqsHandlerFn
where
    F: Fn(SqsMessage) -> Fut + Send + Sync + Clone + 'static,
    Fut: Future<Output = Result<(), SqsLambdaError>> + Send + 'static,
{
    match config.failure_reporting() {
        FailureReporting::BatchItemFailures => create_report_failure_handler(runner),
        FailureReporting::ManualDelete => create_manual_delete_handler(runner),
    }
}

/// Creates a Lambda entry point that reports failed records individually.
///
/// Every record's runner is invoked concurrently; the response lists the
/// message ids of the records whose runner failed, so SQS redelivers only
/// those. Runner errors are logged and never fail the invocation.
///
/// The queue's Lambda trigger must have report batch item failures enabled,
/// otherwise SQS ignores the response's failure list.
pub fn create_report_failure_handler<F, Fut>(runner: F) -> SqsHandlerFn
where
    F: Fn(SqsMessage) -> Fut + Send + Sync + Clone + 'static,
    Fut: Future<Output = Result<(), SqsLambdaError>> + Send + 'static,
{
    Box::new(move |event: LambdaEvent<SqsEvent>| {
        let runner = runner.clone();
        Box::pin(async move { Ok(process::report_batch(event.payload.records, &runner).await) })
    })
}

/// Creates a Lambda entry point that acknowledges records manually.
///
/// Every record's runner is invoked concurrently, and each successfully
/// handled record is deleted from the queue named by its source ARN. When
/// any record fails, the invocation fails with a single
/// [`SqsLambdaError::BatchFailure`] listing every failure, and SQS
/// redelivers the whole batch, including the records that were already
/// handled and deleted.
///
/// The SQS client is built from the environment, and only when the batch is
/// non-empty.
pub fn create_manual_delete_handler<F, Fut>(runner: F) -> SqsHandlerFn
where
    F: Fn(SqsMessage) -> Fut + Send + Sync + Clone + 'static,
    Fut: Future<Output = Result<(), SqsLambdaError>> + Send + 'static,
{
    Box::new(move |event: LambdaEvent<SqsEvent>| {
        let runner = runner.clone();
        Box::pin(async move {
            let records = event.payload.records;
            if records.is_empty() {
                info!("received an empty batch, nothing to process");
                return Ok(SqsBatchResponse::default());
            }

            let queue = SqsQueue::from_env().await;
            process::manual_delete_batch(records, &runner, &queue).await?;

            Ok(SqsBatchResponse::default())
        })
    })
}

/// Like [`create_manual_delete_handler`], but with a caller-supplied queue.
///
/// Use this to share one SQS client across invocations, or to substitute
/// another [`SqsQueueOps`] implementation.
pub fn create_manual_delete_handler_with_queue<F, Fut, Q>(runner: F, queue: Arc<Q>) -> SqsHandlerFn
where
    F: Fn(SqsMessage) -> Fut + Send + Sync + Clone + 'static,
    Fut: Future<Output = Result<(), SqsLambdaError>> + Send + 'static,
    Q: SqsQueueOps + ?Sized + 'static,
{
    Box::new(move |event: LambdaEvent<SqsEvent>| {
        let runner = runner.clone();
        let queue = Arc::clone(&queue);
        Box::pin(async move {
            process::manual_delete_batch(event.payload.records, &runner, queue.as_ref()).await?;

            Ok(SqsBatchResponse::default())
        })
    })
}
