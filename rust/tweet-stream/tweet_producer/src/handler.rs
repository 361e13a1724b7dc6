use std::sync::Arc;

use lambda_runtime::{
    Error, LambdaEvent,
    tracing::{self},
};
use serde_json::Value;

use crate::{
    ports::{RecordPublisher, TwitterApi},
    producer::StreamProducer,
};

#[derive(serde::Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProducerResponse {
    pub status_code: u16,
    pub body: String,
}

/// Handles a producer invocation. The event payload carries no data and is only logged.
#[tracing::instrument(skip_all, fields(request_id = %event.context.request_id))]
pub async fn handler<T, P>(
    producer: Arc<StreamProducer<T, P>>,
    event: LambdaEvent<Value>,
) -> Result<ProducerResponse, Error>
where
    T: TwitterApi,
    P: RecordPublisher,
{
    tracing::info!(event=?event.payload, "incoming event");

    let summary = producer.run().await.inspect_err(|e| {
        tracing::error!(error=?e, "producer run failed");
    })?;

    tracing::info!(
        trend=%summary.trend,
        published=%summary.published,
        skipped=%summary.skipped,
        "processing complete"
    );

    Ok(ProducerResponse {
        status_code: 200,
        body: "Processing Complete".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockRecordPublisher, MockTwitterApi};
    use bytes::Bytes;
    use futures::{StreamExt, stream};
    use twitter_client::{Trend, TwitterError};

    fn producer(
        messages: Vec<Result<Bytes, TwitterError>>,
        publisher: MockRecordPublisher,
    ) -> Arc<StreamProducer<MockTwitterApi, MockRecordPublisher>> {
        let mut twitter = MockTwitterApi::new();
        twitter.expect_place_trends().returning(|_| {
            Ok(vec![Trend {
                name: "#OnlyOne".to_string(),
                tweet_volume: Some(10),
            }])
        });
        // a single trend falls back to the default topic
        twitter
            .expect_filter()
            .withf(|track| track == "#serverless")
            .return_once(move |_| Ok(stream::iter(messages).boxed()));

        Arc::new(StreamProducer::new(
            Arc::new(twitter),
            Arc::new(publisher),
            "1",
        ))
    }

    #[tokio::test]
    async fn test_handler() {
        let mut publisher = MockRecordPublisher::new();
        publisher.expect_put_record().times(1).returning(|_, _| Ok(()));

        let producer = producer(
            vec![Ok(Bytes::from_static(
                b"{\"text\":\"#serverless all the things\",\"user\":{\"screen_name\":\"dev\"}}",
            ))],
            publisher,
        );

        let response = handler(
            producer,
            LambdaEvent::new(serde_json::json!({}), lambda_runtime::Context::default()),
        )
        .await
        .unwrap();

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({ "statusCode": 200, "body": "Processing Complete" })
        );
    }

    #[tokio::test]
    async fn test_handler_fails_when_run_fails() {
        let mut publisher = MockRecordPublisher::new();
        publisher
            .expect_put_record()
            .returning(|_, _| Err(kinesis_client::KinesisErr::EmptyPartitionKey));

        let producer = producer(
            vec![Ok(Bytes::from_static(
                b"{\"text\":\"hi\",\"user\":{\"screen_name\":\"dev\"}}",
            ))],
            publisher,
        );

        let result = handler(
            producer,
            LambdaEvent::new(serde_json::json!({}), lambda_runtime::Context::default()),
        )
        .await;

        assert!(result.is_err());
    }
}
