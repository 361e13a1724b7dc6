use std::sync::Arc;

use aws_lambda_events::event::kinesis::KinesisEvent;
use lambda_runtime::{
    Error, LambdaEvent,
    tracing::{self},
};

use crate::{
    store::TweetStore,
    unpack::{expiration_time, unpack_items},
};

/// Stores the tweets of a kinesis batch. Any write failure fails the invocation so the batch is
/// redelivered.
#[tracing::instrument(skip_all, fields(request_id = %event.context.request_id, records = event.payload.records.len()))]
pub async fn handler<S: TweetStore>(
    store: Arc<S>,
    ttl_days: u32,
    event: LambdaEvent<KinesisEvent>,
) -> Result<(), Error> {
    let expiration = expiration_time(chrono::Utc::now(), ttl_days);

    let items = unpack_items(
        event
            .payload
            .records
            .iter()
            .map(|record| record.kinesis.data.0.as_slice()),
        expiration,
    );

    if items.is_empty() {
        tracing::info!("no tweets to store");
        return Ok(());
    }

    let count = items.len();
    store.put_items(items).await.inspect_err(|e| {
        tracing::error!(error=?e, "unable to store tweets");
    })?;

    tracing::info!(stored=%count, "processing complete");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MockTweetStore, StoreErr};
    use base64::{Engine as _, engine::general_purpose};
    use lambda_runtime::Context;
    use serde_json::json;

    fn record(payload: &[u8]) -> serde_json::Value {
        json!({
            "kinesis": {
                "kinesisSchemaVersion": "1.0",
                "partitionKey": "goserverless",
                "sequenceNumber": "49590338271490256608559692538361571095921575989136588898",
                "data": general_purpose::STANDARD.encode(payload),
                "approximateArrivalTimestamp": 1545084650.987
            },
            "eventSource": "aws:kinesis",
            "eventVersion": "1.0",
            "eventID": "shardId-000000000006:49590338271490256608559692538361571095921575989136588898",
            "eventName": "aws:kinesis:record",
            "invokeIdentityArn": "arn:aws:iam::123456789012:role/lambda-role",
            "awsRegion": "us-east-2",
            "eventSourceARN": "arn:aws:kinesis:us-east-2:123456789012:stream/lambda-stream"
        })
    }

    fn tweet(id: &str) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "id_str": id,
            "created_at": "Wed Oct 10 20:19:24 +0000 2018",
            "text": "#serverless all the things",
            "user": { "name": "Serverless" }
        }))
        .unwrap()
    }

    fn event(payloads: Vec<Vec<u8>>) -> LambdaEvent<KinesisEvent> {
        let records: Vec<_> = payloads.iter().map(|p| record(p)).collect();
        let payload = serde_json::from_value(json!({ "Records": records })).unwrap();
        LambdaEvent::new(payload, Context::default())
    }

    #[tokio::test]
    async fn test_handler() {
        let mut store = MockTweetStore::new();
        store
            .expect_put_items()
            .withf(|items| {
                items.iter().map(|i| i.id.as_str()).collect::<Vec<_>>() == vec!["1", "2"]
                    && items.iter().all(|i| i.expiration_time > 1539202764)
            })
            .times(1)
            .returning(|_| Ok(()));

        handler(
            Arc::new(store),
            7,
            event(vec![tweet("1"), tweet("1"), b"garbage".to_vec(), tweet("2")]),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_handler_skips_write_without_tweets() {
        let mut store = MockTweetStore::new();
        store.expect_put_items().never();

        handler(Arc::new(store), 7, event(vec![b"{}".to_vec()]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_handler_fails_on_unprocessed_items() {
        let mut store = MockTweetStore::new();
        store
            .expect_put_items()
            .returning(|_| Err(StoreErr::Unprocessed(1)));

        let err = handler(Arc::new(store), 7, event(vec![tweet("1")]))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "dynamodb left 1 items unprocessed");
    }
}
