mod config;
mod handler;
mod model;
mod process;

use std::sync::Arc;

use anyhow::Context;
use aws_lambda_events::firehose::KinesisFirehoseEvent;
use config::Config;
use handler::handler;
use lambda_runtime::{Error, LambdaEvent, run, service_fn, tracing};
use pipeline_entrypoint::PipelineEntrypoint;

#[tokio::main]
async fn main() -> Result<(), Error> {
    PipelineEntrypoint::from_env().init();
    tracing::trace!("initiating lambda");

    let config = Config::from_env().context("all necessary env vars should be available")?;

    tracing::trace!(config=?config, "initialized config");

    let config = Arc::new(config);

    let func = service_fn(move |event: LambdaEvent<KinesisFirehoseEvent>| {
        let config = config.clone();

        async move { handler(config, event).await }
    });

    run(func).await
}
