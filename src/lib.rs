//! # AWS SQS Lambda Helpers
//!
//! Helper constructors for AWS Lambda functions triggered by SQS, with
//! per-record failure isolation and configurable failure reporting.
//!
//! ## Features
//!
//! - Concurrent per-record processing of an SQS batch with tokio
//! - Failed records never abort their siblings; every record settles
//! - Batch item failure reporting so SQS redelivers only failed records
//! - Alternative manual acknowledgment mode that deletes handled records
//!   and fails the whole invocation on any error
//! - Direct queue operations (resolve URL, send, delete) usable outside
//!   the handler flow, derivable from received records
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lambda_runtime::{run, service_fn};
//! use rs_sqs_lambda::handler::{SqsHandlerConfig, create_sqs_handler};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lambda_runtime::Error> {
//!     let handler = create_sqs_handler(
//!         |message| async move {
//!             // no try/catch needed, errors become batch item failures
//!             tracing::info!("processing record: {:?}", message.body);
//!             Ok(())
//!         },
//!         SqsHandlerConfig::default(),
//!     );
//!
//!     run(service_fn(handler)).await
//! }
//! ```

pub mod client;
pub mod errors;
pub mod handler;
pub mod queue;
