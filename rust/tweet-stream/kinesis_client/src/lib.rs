use aws_sdk_kinesis as kinesis;
use kinesis::primitives::Blob;
use thiserror::Error;

/// Kinesis rejects records whose data is larger than 1MiB
pub const MAX_RECORD_SIZE_BYTES: usize = 1_048_576;

#[derive(Debug, Error)]
pub enum KinesisErr {
    #[error("{0:?}")]
    AwsErr(#[from] aws_sdk_kinesis::Error),
    #[error("record of {0} bytes exceeds the kinesis record size limit")]
    RecordTooLarge(usize),
    #[error("partition key must not be empty")]
    EmptyPartitionKey,
}

#[derive(Clone, Debug)]
pub struct Kinesis {
    /// Inner Kinesis client
    inner: kinesis::Client,
    /// The stream records are put to
    stream_name: String,
}

impl Kinesis {
    pub fn new(inner: kinesis::Client, stream_name: &str) -> Self {
        Self {
            inner,
            stream_name: stream_name.to_string(),
        }
    }

    /// Puts a single record onto the stream. There is no retry.
    #[tracing::instrument(err, skip(self, data), fields(stream_name = %self.stream_name, size = data.len()))]
    pub async fn put_record(&self, data: Vec<u8>, partition_key: &str) -> Result<(), KinesisErr> {
        validate_record(&data, partition_key)?;

        let output = self
            .inner
            .put_record()
            .stream_name(&self.stream_name)
            .partition_key(partition_key)
            .data(Blob::new(data))
            .send()
            .await
            .map_err(aws_sdk_kinesis::Error::from)?;

        tracing::trace!(output=?output, "put record");

        Ok(())
    }
}

fn validate_record(data: &[u8], partition_key: &str) -> Result<(), KinesisErr> {
    if partition_key.is_empty() {
        return Err(KinesisErr::EmptyPartitionKey);
    }
    if data.len() > MAX_RECORD_SIZE_BYTES {
        return Err(KinesisErr::RecordTooLarge(data.len()));
    }
    Ok(())
}
