use std::collections::HashMap;

use lambda_runtime::tracing;
use ssm_client::{SsmClient, SsmErr};
use thiserror::Error;
use twitter_client::Credentials;

pub const CONSUMER_KEY_PARAMETER: &str = "/twitter/consumer_key";
pub const CONSUMER_SECRET_PARAMETER: &str = "/twitter/consumer_secret";
pub const ACCESS_TOKEN_KEY_PARAMETER: &str = "/twitter/access_token_key";
pub const ACCESS_TOKEN_SECRET_PARAMETER: &str = "/twitter/access_token_secret";

pub const TWITTER_PARAMETERS: [&str; 4] = [
    CONSUMER_KEY_PARAMETER,
    CONSUMER_SECRET_PARAMETER,
    ACCESS_TOKEN_KEY_PARAMETER,
    ACCESS_TOKEN_SECRET_PARAMETER,
];

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("problem getting twitter credentials from ssm: {0}")]
    Ssm(#[from] SsmErr),
    #[error("twitter credential {0} was not returned by ssm")]
    Missing(&'static str),
}

fn take(
    parameters: &mut HashMap<String, String>,
    name: &'static str,
) -> Result<String, CredentialError> {
    parameters
        .remove(name)
        .ok_or(CredentialError::Missing(name))
}

pub fn credentials_from_parameters(
    mut parameters: HashMap<String, String>,
) -> Result<Credentials, CredentialError> {
    Ok(Credentials {
        consumer_key: take(&mut parameters, CONSUMER_KEY_PARAMETER)?,
        consumer_secret: take(&mut parameters, CONSUMER_SECRET_PARAMETER)?,
        access_token_key: take(&mut parameters, ACCESS_TOKEN_KEY_PARAMETER)?,
        access_token_secret: take(&mut parameters, ACCESS_TOKEN_SECRET_PARAMETER)?,
    })
}

/// Fetches the twitter oauth credentials from the parameter store
#[tracing::instrument(err, skip(ssm))]
pub async fn load_credentials(ssm: &SsmClient) -> Result<Credentials, CredentialError> {
    let parameters = ssm.get_parameters(&TWITTER_PARAMETERS).await?;
    credentials_from_parameters(parameters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_from_parameters() {
        let parameters = TWITTER_PARAMETERS
            .iter()
            .map(|name| (name.to_string(), format!("value-of-{name}")))
            .collect();

        let credentials = credentials_from_parameters(parameters).unwrap();
        assert_eq!(credentials.consumer_key, "value-of-/twitter/consumer_key");
        assert_eq!(
            credentials.access_token_secret,
            "value-of-/twitter/access_token_secret"
        );
    }

    #[test]
    fn test_credentials_from_parameters_missing() {
        let parameters = TWITTER_PARAMETERS[..3]
            .iter()
            .map(|name| (name.to_string(), "value".to_string()))
            .collect();

        assert!(matches!(
            credentials_from_parameters(parameters),
            Err(CredentialError::Missing(ACCESS_TOKEN_SECRET_PARAMETER))
        ));
    }
}
