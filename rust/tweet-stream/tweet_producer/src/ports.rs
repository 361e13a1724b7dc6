//! The collaborators the producer talks to, abstracted so the run loop can be exercised without
//! twitter or kinesis.

use async_trait::async_trait;
use kinesis_client::{Kinesis, KinesisErr};
use twitter_client::{StatusStream, Trend, TwitterClient, TwitterError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TwitterApi: Send + Sync + 'static {
    /// the trending topics for a location
    async fn place_trends(&self, woeid: &str) -> Result<Vec<Trend>, TwitterError>;

    /// a stream of json messages matching `track`
    async fn filter(&self, track: &str) -> Result<StatusStream, TwitterError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordPublisher: Send + Sync + 'static {
    /// put `data` onto the output stream
    async fn put_record(&self, data: Vec<u8>, partition_key: &str) -> Result<(), KinesisErr>;
}

#[async_trait]
impl TwitterApi for TwitterClient {
    async fn place_trends(&self, woeid: &str) -> Result<Vec<Trend>, TwitterError> {
        TwitterClient::place_trends(self, woeid).await
    }

    async fn filter(&self, track: &str) -> Result<StatusStream, TwitterError> {
        TwitterClient::filter(self, track).await
    }
}

#[async_trait]
impl RecordPublisher for Kinesis {
    async fn put_record(&self, data: Vec<u8>, partition_key: &str) -> Result<(), KinesisErr> {
        Kinesis::put_record(self, data, partition_key).await
    }
}
