use std::str::FromStr;

use thiserror::Error;

/// Error types for SQS Lambda handler operations.
///
/// This enum represents all possible errors that can occur while
/// processing an SQS batch or issuing direct queue operations.
#[derive(Debug, Error)]
pub enum SqsLambdaError {
    /// An underlying SQS operation (resolve URL, send, delete) failed.
    #[error("queue operation failed: {0}")]
    QueueOperation(String),

    /// At least one record in a manually acknowledged batch failed.
    ///
    /// The payload is the serialized list of per-record failure messages.
    /// Returning this error fails the whole invocation, so SQS redelivers
    /// the entire batch.
    #[error("failure with errors: {0}")]
    BatchFailure(String),

    #[error("{0}")]
    GenericError(#[from] GenericError),
}

impl SqsLambdaError {
    /// Builds a [`SqsLambdaError::BatchFailure`] from per-record failure messages.
    pub(crate) fn batch_failure(messages: &[String]) -> Self {
        let serialized =
            serde_json::to_string(messages).unwrap_or_else(|_| messages.join(", "));
        SqsLambdaError::BatchFailure(serialized)
    }
}

/// Generic error type for handling unexpected errors.
#[derive(Debug, Error)]
pub struct GenericError(String);

impl GenericError {
    /// Creates a new `GenericError` with the provided message.
    pub fn new(message: String) -> Self {
        GenericError(message)
    }
}

impl std::fmt::Display for GenericError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GenericError {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(GenericError::new(s.to_string()))
    }
}

impl From<String> for GenericError {
    fn from(s: String) -> Self {
        GenericError::new(s)
    }
}
