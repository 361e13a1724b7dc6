use std::sync::Arc;

use aws_lambda_events::firehose::{KinesisFirehoseEvent, KinesisFirehoseResponse};
use lambda_runtime::{
    Error, LambdaEvent,
    tracing::{self},
};

use crate::{config::Config, process::process_batch};

/// Normalizes every tweet in a firehose delivery batch
#[tracing::instrument(skip_all, fields(request_id = %event.context.request_id, invocation_id = ?event.payload.invocation_id))]
pub async fn handler(
    config: Arc<Config>,
    event: LambdaEvent<KinesisFirehoseEvent>,
) -> Result<KinesisFirehoseResponse, Error> {
    let records = process_batch(event.payload.records, config.failure_policy).inspect_err(|e| {
        tracing::error!(error=?e, record_id=?e.record_id, "batch transformation failed");
    })?;

    tracing::info!(records=%records.len(), "processing complete");

    Ok(KinesisFirehoseResponse { records })
}
