//! Tweet payload models shared by the producer, the firehose transformer and the stream event
//! processor.

pub mod normalized;
pub mod source;
pub mod stream;
pub mod timestamp;

pub use normalized::{NormalizedTweet, TransformError, transform};
