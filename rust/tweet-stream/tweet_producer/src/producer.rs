use std::sync::Arc;

use futures::TryStreamExt;
use kinesis_client::KinesisErr;
use lambda_runtime::tracing;
use models_tweet::stream::{author_screen_name, is_status};
use serde_json::Value;
use thiserror::Error;
use twitter_client::TwitterError;

use crate::{
    ports::{RecordPublisher, TwitterApi},
    trend,
};

#[derive(Debug, Error)]
pub enum ProducerError {
    #[error("twitter request failed: {0}")]
    Upstream(#[from] TwitterError),
    #[error("unable to decode stream message: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("status has no user.screen_name to partition on")]
    MissingPartitionKey,
    #[error("unable to put record to stream: {0}")]
    Publish(#[source] KinesisErr),
}

/// What a single run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// the topic that was tracked
    pub trend: String,
    /// statuses put onto the stream
    pub published: usize,
    /// control notices that were not forwarded
    pub skipped: usize,
}

/// Forwards statuses for the current top trend onto the output stream
pub struct StreamProducer<T, P> {
    twitter: Arc<T>,
    publisher: Arc<P>,
    woeid: String,
}

impl<T, P> StreamProducer<T, P>
where
    T: TwitterApi,
    P: RecordPublisher,
{
    pub fn new(twitter: Arc<T>, publisher: Arc<P>, woeid: &str) -> Self {
        Self {
            twitter,
            publisher,
            woeid: woeid.to_string(),
        }
    }

    /// Tracks the top trend and publishes every status until the subscription ends.
    /// The first failure ends the run.
    #[tracing::instrument(err, skip(self), fields(woeid = %self.woeid))]
    pub async fn run(&self) -> Result<RunSummary, ProducerError> {
        let trend = trend::select_top_trend(self.twitter.as_ref(), &self.woeid).await?;

        tracing::info!(trend = %trend, "get public statuses for trend");
        let mut messages = self.twitter.filter(&trend).await?;

        let mut summary = RunSummary {
            trend,
            published: 0,
            skipped: 0,
        };

        while let Some(message) = messages.try_next().await? {
            let item: Value = serde_json::from_slice(&message)?;

            if !is_status(&item) {
                tracing::trace!(item=?item, "skipping control message");
                summary.skipped += 1;
                continue;
            }

            let partition_key =
                author_screen_name(&item).ok_or(ProducerError::MissingPartitionKey)?;

            self.publisher
                .put_record(message.to_vec(), partition_key)
                .await
                .map_err(|e| {
                    tracing::error!(error=?e, text=?item.get("text"), "unable to put status to stream");
                    ProducerError::Publish(e)
                })?;

            tracing::debug!(text=?item.get("text"), partition_key=%partition_key, "published status");
            summary.published += 1;
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockRecordPublisher, MockTwitterApi};
    use bytes::Bytes;
    use futures::{StreamExt, stream};
    use mockall::Sequence;
    use serde_json::json;
    use twitter_client::Trend;

    fn trends() -> Vec<Trend> {
        vec![
            Trend {
                name: "#NoVolume".to_string(),
                tweet_volume: None,
            },
            Trend {
                name: "#Rust".to_string(),
                tweet_volume: Some(4000),
            },
        ]
    }

    fn status(screen_name: &str, text: &str) -> Bytes {
        Bytes::from(
            serde_json::to_vec(&json!({
                "text": text,
                "user": { "screen_name": screen_name }
            }))
            .unwrap(),
        )
    }

    fn twitter_with(messages: Vec<Result<Bytes, TwitterError>>) -> MockTwitterApi {
        let mut twitter = MockTwitterApi::new();
        twitter
            .expect_place_trends()
            .returning(|_| Ok(trends()));
        twitter
            .expect_filter()
            .withf(|track| track == "#Rust")
            .return_once(move |_| Ok(stream::iter(messages).boxed()));
        twitter
    }

    #[tokio::test]
    async fn test_run_publishes_statuses_partitioned_by_author() {
        let first = status("alice", "hello #Rust");
        let second = status("bob", "more #Rust");
        let twitter = twitter_with(vec![
            Ok(first.clone()),
            Ok(Bytes::from_static(b"{\"limit\":{\"track\":4}}")),
            Ok(second.clone()),
        ]);

        let mut publisher = MockRecordPublisher::new();
        let mut seq = Sequence::new();
        publisher
            .expect_put_record()
            .withf(move |data, key| data == &first.to_vec() && key == "alice")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        publisher
            .expect_put_record()
            .withf(move |data, key| data == &second.to_vec() && key == "bob")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let producer = StreamProducer::new(Arc::new(twitter), Arc::new(publisher), "1");
        let summary = producer.run().await.unwrap();

        assert_eq!(
            summary,
            RunSummary {
                trend: "#Rust".to_string(),
                published: 2,
                skipped: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_run_stops_on_publish_failure() {
        let twitter = twitter_with(vec![
            Ok(status("alice", "one")),
            Ok(status("bob", "two")),
        ]);

        let mut publisher = MockRecordPublisher::new();
        publisher
            .expect_put_record()
            .times(1)
            .returning(|_, _| Err(KinesisErr::EmptyPartitionKey));

        let producer = StreamProducer::new(Arc::new(twitter), Arc::new(publisher), "1");
        let err = producer.run().await.unwrap_err();

        assert!(matches!(err, ProducerError::Publish(_)));
    }

    #[tokio::test]
    async fn test_run_requires_partition_key() {
        let twitter = twitter_with(vec![Ok(Bytes::from_static(b"{\"text\":\"anonymous\"}"))]);

        let mut publisher = MockRecordPublisher::new();
        publisher.expect_put_record().never();

        let producer = StreamProducer::new(Arc::new(twitter), Arc::new(publisher), "1");
        assert!(matches!(
            producer.run().await.unwrap_err(),
            ProducerError::MissingPartitionKey
        ));
    }

    #[tokio::test]
    async fn test_run_surfaces_stream_errors() {
        let twitter = twitter_with(vec![
            Ok(status("alice", "one")),
            Err(TwitterError::Request {
                status_code: 420,
                body: "Enhance Your Calm".to_string(),
            }),
        ]);

        let mut publisher = MockRecordPublisher::new();
        publisher.expect_put_record().times(1).returning(|_, _| Ok(()));

        let producer = StreamProducer::new(Arc::new(twitter), Arc::new(publisher), "1");
        assert!(matches!(
            producer.run().await.unwrap_err(),
            ProducerError::Upstream(TwitterError::Request {
                status_code: 420,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_run_does_not_subscribe_when_trends_fail() {
        let mut twitter = MockTwitterApi::new();
        twitter.expect_place_trends().returning(|_| {
            Err(TwitterError::Request {
                status_code: 429,
                body: "Rate limit exceeded".to_string(),
            })
        });
        twitter.expect_filter().never();

        let producer = StreamProducer::new(
            Arc::new(twitter),
            Arc::new(MockRecordPublisher::new()),
            "1",
        );

        assert!(matches!(
            producer.run().await.unwrap_err(),
            ProducerError::Upstream(_)
        ));
    }
}
