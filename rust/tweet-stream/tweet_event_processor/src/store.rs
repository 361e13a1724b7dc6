use aws_sdk_dynamodb as dynamodb;
use dynamodb::types::{PutRequest, WriteRequest};
use lambda_runtime::tracing;
use thiserror::Error;

use crate::model::TweetItem;

/// BatchWriteItem accepts at most 25 requests per call
pub const MAX_BATCH_WRITE_ITEMS: usize = 25;

#[derive(Debug, Error)]
pub enum StoreErr {
    #[error("{0:?}")]
    AwsErr(#[from] dynamodb::Error),
    #[error("could not convert tweet into a dynamodb item: {0}")]
    Serialize(#[from] serde_dynamo::Error),
    #[error("dynamodb left {0} items unprocessed")]
    Unprocessed(usize),
}

/// Where unpacked tweets are persisted
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TweetStore: Send + Sync + 'static {
    async fn put_items(&self, items: Vec<TweetItem>) -> Result<(), StoreErr>;
}

#[derive(Clone, Debug)]
pub struct DynamoTweetStore {
    /// Inner DynamoDB client
    inner: dynamodb::Client,
    /// The table tweets are written to
    table: String,
}

impl DynamoTweetStore {
    pub fn new(inner: dynamodb::Client, table: &str) -> Self {
        Self {
            inner,
            table: table.to_string(),
        }
    }
}

/// Groups items into put requests of at most [MAX_BATCH_WRITE_ITEMS]
fn write_batches(items: Vec<TweetItem>) -> Result<Vec<Vec<WriteRequest>>, StoreErr> {
    let requests = items
        .into_iter()
        .map(|item| -> Result<WriteRequest, StoreErr> {
            let put = PutRequest::builder()
                .set_item(Some(item.to_attributes()?))
                .build()
                .map_err(dynamodb::Error::from)?;

            Ok(WriteRequest::builder().put_request(put).build())
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(requests
        .chunks(MAX_BATCH_WRITE_ITEMS)
        .map(<[WriteRequest]>::to_vec)
        .collect())
}

#[async_trait::async_trait]
impl TweetStore for DynamoTweetStore {
    /// Writes every item with one BatchWriteItem call per chunk. Unprocessed items are an error.
    #[tracing::instrument(err, skip(self, items), fields(table = %self.table, items = items.len()))]
    async fn put_items(&self, items: Vec<TweetItem>) -> Result<(), StoreErr> {
        for batch in write_batches(items)? {
            let output = self
                .inner
                .batch_write_item()
                .request_items(&self.table, batch)
                .send()
                .await
                .map_err(dynamodb::Error::from)?;

            let unprocessed: usize = output
                .unprocessed_items()
                .map(|tables| tables.values().map(Vec::len).sum())
                .unwrap_or(0);

            if unprocessed > 0 {
                return Err(StoreErr::Unprocessed(unprocessed));
            }
        }

        Ok(())
    }
}
