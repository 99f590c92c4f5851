use std::collections::HashMap;

use async_trait::async_trait;
use aws_lambda_events::sqs::{SqsMessage, SqsMessageAttribute};
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::primitives::Blob;
use aws_sdk_sqs::types::MessageAttributeValue;

use crate::errors::SqsLambdaError;

/// Extracts the queue name from an SQS queue ARN.
///
/// SQS ARNs are colon delimited with the queue name as the sixth segment,
/// e.g. `arn:aws:sqs:us-east-1:123456789012:my-queue` yields `my-queue`.
/// Returns `None` when the segment is missing or empty.
pub fn queue_name_from_arn(arn: &str) -> Option<&str> {
    arn.split(':').nth(5).filter(|name| !name.is_empty())
}

/// Converts message attributes from a received Lambda event record into the
/// attribute type the SQS client expects when sending.
///
/// Only the data type, string value and binary value carry over; SQS does not
/// support list values on send.
pub fn to_message_attributes(
    attributes: &HashMap<String, SqsMessageAttribute>,
) -> Result<HashMap<String, MessageAttributeValue>, SqsLambdaError> {
    let mut converted = HashMap::with_capacity(attributes.len());

    for (name, attribute) in attributes {
        let mut builder =
            MessageAttributeValue::builder().set_data_type(attribute.data_type.clone());
        if let Some(string_value) = &attribute.string_value {
            builder = builder.string_value(string_value);
        }
        if let Some(binary_value) = &attribute.binary_value {
            builder = builder.binary_value(Blob::new(binary_value.0.clone()));
        }
        let value = builder
            .build()
            .map_err(|err| SqsLambdaError::QueueOperation(err.to_string()))?;
        converted.insert(name.clone(), value);
    }

    Ok(converted)
}

/// Direct queue operations used by manually acknowledged handlers and
/// available for use outside the handler flow.
///
/// The three raw operations take their parameters as `Option`s and pass them
/// through to the underlying client unvalidated; a missing queue URL is
/// rejected by the client when the request is built, not by this trait. The
/// `*_from_record` methods derive their parameters from a received
/// [`SqsMessage`] and accept either a literal queue URL (detected by its
/// `http` prefix) or a queue name to resolve first.
///
/// Implemented by [`SqsQueue`] for real SQS access; implement it yourself to
/// substitute a fake in tests.
#[async_trait]
pub trait SqsQueueOps: Send + Sync {
    /// Looks up a queue URL by queue name.
    ///
    /// Returns `Ok(None)` when the queue does not exist. Other client
    /// failures surface as [`SqsLambdaError::QueueOperation`].
    async fn resolve_queue_url(&self, queue_name: &str) -> Result<Option<String>, SqsLambdaError>;

    /// Sends a message with the given destination URL, body and attributes.
    async fn send_message(
        &self,
        queue_url: Option<String>,
        body: Option<String>,
        attributes: Option<HashMap<String, MessageAttributeValue>>,
    ) -> Result<(), SqsLambdaError>;

    /// Deletes a message with the given destination URL and receipt handle.
    async fn delete_message(
        &self,
        queue_url: Option<String>,
        receipt_handle: Option<String>,
    ) -> Result<(), SqsLambdaError>;

    /// Normalizes a queue URL or queue name into a queue URL.
    ///
    /// Literal URLs are returned as-is; anything else is resolved as a queue
    /// name. An unresolved name yields `Ok(None)`, which the raw operations
    /// pass through to the client for rejection.
    async fn normalize_queue_url(
        &self,
        queue_url_or_name: &str,
    ) -> Result<Option<String>, SqsLambdaError> {
        if queue_url_or_name.starts_with("http") {
            Ok(Some(queue_url_or_name.to_string()))
        } else {
            self.resolve_queue_url(queue_url_or_name).await
        }
    }

    /// Sends a new message derived from a received record.
    ///
    /// The record's body and message attributes are reused; attributes in
    /// `extra_attributes` take precedence over the record's on key collision.
    async fn send_message_from_record(
        &self,
        queue_url_or_name: &str,
        message: &SqsMessage,
        extra_attributes: Option<HashMap<String, MessageAttributeValue>>,
    ) -> Result<(), SqsLambdaError> {
        let queue_url = self.normalize_queue_url(queue_url_or_name).await?;

        let mut attributes = to_message_attributes(&message.message_attributes)?;
        if let Some(extra) = extra_attributes {
            attributes.extend(extra);
        }
        let attributes = (!attributes.is_empty()).then_some(attributes);

        self.send_message(queue_url, message.body.clone(), attributes)
            .await
    }

    /// Deletes a received record from its queue using the record's receipt handle.
    async fn delete_message_from_record(
        &self,
        queue_url_or_name: &str,
        message: &SqsMessage,
    ) -> Result<(), SqsLambdaError> {
        let queue_url = self.normalize_queue_url(queue_url_or_name).await?;

        self.delete_message(queue_url, message.receipt_handle.clone())
            .await
    }
}

/// A thin facade over `aws_sdk_sqs::Client` implementing [`SqsQueueOps`].
pub struct SqsQueue {
    sqs_client: aws_sdk_sqs::Client,
}

impl SqsQueue {
    /// Wraps an existing SQS client.
    pub fn new(sqs_client: aws_sdk_sqs::Client) -> Self {
        SqsQueue { sqs_client }
    }

    /// Builds a facade over a client configured from the environment.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use rs_sqs_lambda::queue::{SqsQueue, SqsQueueOps};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let queue = SqsQueue::from_env().await;
    ///     let url = queue.resolve_queue_url("my-queue").await?;
    ///     println!("queue url: {:?}", url);
    ///     Ok(())
    /// }
    /// ```
    pub async fn from_env() -> Self {
        SqsQueue::new(crate::client::create_sqs_client_from_env().await)
    }

    /// Returns the wrapped SQS client.
    pub fn client(&self) -> &aws_sdk_sqs::Client {
        &self.sqs_client
    }
}

#[async_trait]
impl SqsQueueOps for SqsQueue {
    async fn resolve_queue_url(&self, queue_name: &str) -> Result<Option<String>, SqsLambdaError> {
        match self
            .sqs_client
            .get_queue_url()
            .queue_name(queue_name)
            .send()
            .await
        {
            Ok(output) => Ok(output.queue_url),
            Err(err) => {
                let err = err.into_service_error();
                if err.is_queue_does_not_exist() {
                    Ok(None)
                } else {
                    Err(SqsLambdaError::QueueOperation(
                        DisplayErrorContext(err).to_string(),
                    ))
                }
            }
        }
    }

    async fn send_message(
        &self,
        queue_url: Option<String>,
        body: Option<String>,
        attributes: Option<HashMap<String, MessageAttributeValue>>,
    ) -> Result<(), SqsLambdaError> {
        self.sqs_client
            .send_message()
            .set_queue_url(queue_url)
            .set_message_body(body)
            .set_message_attributes(attributes)
            .send()
            .await
            .map_err(|err| SqsLambdaError::QueueOperation(DisplayErrorContext(err).to_string()))?;

        Ok(())
    }

    async fn delete_message(
        &self,
        queue_url: Option<String>,
        receipt_handle: Option<String>,
    ) -> Result<(), SqsLambdaError> {
        self.sqs_client
            .delete_message()
            .set_queue_url(queue_url)
            .set_receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|err| SqsLambdaError::QueueOperation(DisplayErrorContext(err).to_string()))?;

        Ok(())
    }
}
