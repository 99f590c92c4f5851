/// How a generated handler reports record failures back to SQS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReporting {
    /// Return a `batchItemFailures` list so SQS redelivers only the failed
    /// records. Requires the queue's Lambda trigger to have report batch
    /// item failures enabled.
    BatchItemFailures,

    /// Delete each successfully handled record from the queue and raise one
    /// aggregate error when any record fails, making SQS redeliver the
    /// whole batch.
    ManualDelete,
}

/// Configuration for a generated SQS Lambda handler.
///
/// # Fields
/// - `report_batch_item_failures`: selects the failure reporting mode.
///   Defaults to `true`.
#[derive(Debug, Clone)]
pub struct SqsHandlerConfig {
    /// Whether to report failed records individually via `batchItemFailures`
    /// rather than deleting handled records manually.
    pub report_batch_item_failures: bool,
}

impl SqsHandlerConfig {
    /// The failure reporting mode selected by this configuration.
    pub fn failure_reporting(&self) -> FailureReporting {
        if self.report_batch_item_failures {
            FailureReporting::BatchItemFailures
        } else {
            FailureReporting::ManualDelete
        }
    }
}

impl Default for SqsHandlerConfig {
    fn default() -> Self {
        SqsHandlerConfig {
            report_batch_item_failures: true,
        }
    }
}
