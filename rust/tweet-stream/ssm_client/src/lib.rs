use std::collections::HashMap;

use aws_sdk_ssm as ssm;
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct SsmClient {
    inner: ssm::Client,
}

#[derive(Debug, Error)]
pub enum SsmErr {
    #[error("{0:?}")]
    AwsErr(#[from] aws_sdk_ssm::Error),
    #[error("parameters do not exist in ssm: {0:?}")]
    NotPresent(Vec<String>),
}

impl SsmClient {
    pub fn new(inner: ssm::Client) -> Self {
        Self { inner }
    }

    /// Fetches and decrypts every parameter in `names`, keyed by parameter name.
    /// Fails with [SsmErr::NotPresent] if any of them does not resolve.
    #[tracing::instrument(err, skip(self))]
    pub async fn get_parameters(&self, names: &[&str]) -> Result<HashMap<String, String>, SsmErr> {
        let result = self
            .inner
            .get_parameters()
            .set_names(Some(names.iter().map(|name| name.to_string()).collect()))
            .with_decryption(true)
            .send()
            .await
            .map_err(aws_sdk_ssm::Error::from)?;

        let parameters: HashMap<String, String> = result
            .parameters
            .unwrap_or_default()
            .into_iter()
            .filter_map(|parameter| Some((parameter.name?, parameter.value?)))
            .collect();

        let missing = missing_parameters(names, &parameters);
        if !missing.is_empty() {
            return Err(SsmErr::NotPresent(missing));
        }

        Ok(parameters)
    }
}

fn missing_parameters(names: &[&str], parameters: &HashMap<String, String>) -> Vec<String> {
    names
        .iter()
        .filter(|name| !parameters.contains_key(**name))
        .map(|name| name.to_string())
        .collect()
}
