mod config;
mod credentials;
mod handler;
mod ports;
mod producer;
mod trend;

use std::sync::Arc;

use anyhow::Context;
use config::Config;
use handler::handler;
use lambda_runtime::{Error, LambdaEvent, run, service_fn, tracing};
use pipeline_entrypoint::PipelineEntrypoint;
use producer::StreamProducer;
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    PipelineEntrypoint::from_env().init();
    tracing::trace!("initiating lambda");

    let config = Config::from_env().context("all necessary env vars should be available")?;

    tracing::trace!(config=?config, "initialized config");

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;

    let ssm = ssm_client::SsmClient::new(aws_sdk_ssm::Client::new(&aws_config));
    let credentials = credentials::load_credentials(&ssm)
        .await
        .context("unable to load twitter credentials")?;

    tracing::trace!("loaded twitter credentials");

    let twitter = twitter_client::TwitterClient::new(credentials);
    let kinesis = kinesis_client::Kinesis::new(
        aws_sdk_kinesis::Client::new(&aws_config),
        &config.kinesis_stream_name,
    );

    let producer = Arc::new(StreamProducer::new(
        Arc::new(twitter),
        Arc::new(kinesis),
        &config.woeid,
    ));

    let func = service_fn(move |event: LambdaEvent<Value>| {
        let producer = producer.clone();

        async move { handler(producer, event).await }
    });

    run(func).await
}
