mod config;
mod handler;
mod model;
mod store;
mod unpack;

use std::sync::Arc;

use anyhow::Context;
use aws_lambda_events::event::kinesis::KinesisEvent;
use config::Config;
use handler::handler;
use lambda_runtime::{Error, LambdaEvent, run, service_fn, tracing};
use pipeline_entrypoint::PipelineEntrypoint;
use store::DynamoTweetStore;

#[tokio::main]
async fn main() -> Result<(), Error> {
    PipelineEntrypoint::from_env().init();
    tracing::trace!("initiating lambda");

    let config = Config::from_env().context("all necessary env vars should be available")?;

    tracing::trace!(config=?config, "initialized config");

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;

    let store = Arc::new(DynamoTweetStore::new(
        aws_sdk_dynamodb::Client::new(&aws_config),
        &config.ddb_table,
    ));
    let ttl_days = config.ttl_days;

    let func = service_fn(move |event: LambdaEvent<KinesisEvent>| {
        let store = store.clone();

        async move { handler(store, ttl_days, event).await }
    });

    run(func).await
}
