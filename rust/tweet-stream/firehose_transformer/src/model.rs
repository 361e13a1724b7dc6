//! Result statuses firehose accepts for a transformed record.
//! The envelope itself is [aws_lambda_events::firehose]; its `result` field is a plain string.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordResult {
    /// the record was transformed
    Ok,
    /// the record is intentionally discarded
    #[allow(dead_code)]
    Dropped,
    /// the record could not be transformed and is sent to the error output
    ProcessingFailed,
}

impl RecordResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordResult::Ok => "Ok",
            RecordResult::Dropped => "Dropped",
            RecordResult::ProcessingFailed => "ProcessingFailed",
        }
    }
}

impl From<RecordResult> for String {
    fn from(result: RecordResult) -> Self {
        result.as_str().to_string()
    }
}
