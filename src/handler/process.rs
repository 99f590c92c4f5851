use std::future::Future;

use aws_lambda_events::sqs::{BatchItemFailure, SqsBatchResponse, SqsMessage};
use futures::future::join_all;
use tracing::{error, info};

use crate::errors::{GenericError, SqsLambdaError};
use crate::queue::{SqsQueueOps, queue_name_from_arn};

/// Runs the runner over every record concurrently and collects the message
/// ids of the records that failed.
///
/// Runner errors are logged and converted into batch item failures; they
/// never propagate out of the batch.
pub(crate) async fn report_batch<F, Fut>(records: Vec<SqsMessage>, runner: &F) -> SqsBatchResponse
where
    F: Fn(SqsMessage) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), SqsLambdaError>> + Send,
{
    if records.is_empty() {
        info!("received an empty batch, nothing to process");
        return SqsBatchResponse::default();
    }

    let outcomes = join_all(records.into_iter().map(|message| {
        let message_id = message.message_id.clone().unwrap_or_default();
        async move {
            match runner(message).await {
                Ok(()) => None,
                Err(err) => {
                    error!(message_id = %message_id, error = %err, "record handler failed");
                    Some(BatchItemFailure {
                        item_identifier: message_id,
                        ..Default::default()
                    })
                }
            }
        }
    }))
    .await;

    SqsBatchResponse {
        batch_item_failures: outcomes.into_iter().flatten().collect(),
        ..Default::default()
    }
}

/// Runs the runner over every record concurrently, deleting each
/// successfully handled record from its source queue.
///
/// Every record settles before the result is inspected; a failing record
/// never aborts its siblings. If any record failed, the collected failure
/// messages are raised as a single [`SqsLambdaError::BatchFailure`].
pub(crate) async fn manual_delete_batch<F, Fut, Q>(
    records: Vec<SqsMessage>,
    runner: &F,
    queue: &Q,
) -> Result<(), SqsLambdaError>
where
    F: Fn(SqsMessage) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), SqsLambdaError>> + Send,
    Q: SqsQueueOps + ?Sized,
{
    if records.is_empty() {
        info!("received an empty batch, nothing to process");
        return Ok(());
    }

    let outcomes = join_all(records.into_iter().map(|message| async move {
        match settle_record(message, runner, queue).await {
            Ok(()) => None,
            Err(err) => {
                error!(error = %err, "record handler failed");
                Some(err.to_string())
            }
        }
    }))
    .await;

    let failures: Vec<String> = outcomes.into_iter().flatten().collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(SqsLambdaError::batch_failure(&failures))
    }
}

/// Runs one record to completion: runner first, then the delete against the
/// queue named by the record's source ARN.
///
/// The runner is invoked even when the source ARN is unusable; such a record
/// only fails at the delete step.
async fn settle_record<F, Fut, Q>(
    message: SqsMessage,
    runner: &F,
    queue: &Q,
) -> Result<(), SqsLambdaError>
where
    F: Fn(SqsMessage) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), SqsLambdaError>> + Send,
    Q: SqsQueueOps + ?Sized,
{
    runner(message.clone()).await?;

    let queue_name = message
        .event_source_arn
        .as_deref()
        .and_then(queue_name_from_arn)
        .ok_or_else(|| {
            GenericError::new(format!(
                "no queue name in event source ARN {:?}",
                message.event_source_arn
            ))
        })?;

    queue.delete_message_from_record(queue_name, &message).await
}
