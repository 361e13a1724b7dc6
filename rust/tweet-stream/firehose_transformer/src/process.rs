use std::str::FromStr;

use aws_lambda_events::{
    encodings::Base64Data,
    firehose::{
        KinesisFirehoseEventRecord, KinesisFirehoseResponseRecord,
        KinesisFirehoseResponseRecordMetadata,
    },
};
use lambda_runtime::tracing;
use models_tweet::TransformError;
use thiserror::Error;

use crate::model::RecordResult;

/// What happens to the rest of the batch when one record cannot be transformed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// the whole invocation fails and firehose retries the batch
    #[default]
    FailFast,
    /// the record is returned as `ProcessingFailed` and the batch continues
    Isolate,
}

#[derive(Debug, Error)]
#[error("Could not convert {0} into a failure policy, expected fail-fast or isolate")]
pub struct UnknownPolicy(String);

impl FromStr for FailurePolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail-fast" | "failfast" => Ok(FailurePolicy::FailFast),
            "isolate" => Ok(FailurePolicy::Isolate),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("unable to transform record {record_id:?}: {source}")]
pub struct BatchError {
    pub record_id: Option<String>,
    #[source]
    pub source: TransformError,
}

fn response_record(
    record_id: Option<String>,
    result: RecordResult,
    data: Vec<u8>,
) -> KinesisFirehoseResponseRecord {
    KinesisFirehoseResponseRecord {
        record_id,
        result: Some(result.into()),
        data: Base64Data(data),
        metadata: KinesisFirehoseResponseRecordMetadata {
            partition_keys: std::collections::HashMap::new(),
        },
    }
}

fn process_record(
    record: KinesisFirehoseEventRecord,
    policy: FailurePolicy,
) -> Result<KinesisFirehoseResponseRecord, BatchError> {
    match models_tweet::transform(&record.data.0) {
        Ok(data) => Ok(response_record(record.record_id, RecordResult::Ok, data)),
        Err(e) => {
            tracing::error!(record_id=?record.record_id, error=?e, "unable to transform record");
            match policy {
                FailurePolicy::FailFast => Err(BatchError {
                    record_id: record.record_id,
                    source: e,
                }),
                FailurePolicy::Isolate => Ok(response_record(
                    record.record_id,
                    RecordResult::ProcessingFailed,
                    record.data.0,
                )),
            }
        }
    }
}

/// Transforms every record of a delivery batch in order.
/// Under [FailurePolicy::FailFast] the first failing record stops processing and no output is
/// returned.
#[tracing::instrument(skip(records), fields(records = records.len()))]
pub fn process_batch(
    records: Vec<KinesisFirehoseEventRecord>,
    policy: FailurePolicy,
) -> Result<Vec<KinesisFirehoseResponseRecord>, BatchError> {
    records
        .into_iter()
        .map(|record| process_record(record, policy))
        .collect()
}
