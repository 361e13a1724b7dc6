//! OAuth 1.0a request signing with HMAC-SHA1, as required by the v1.1 user context endpoints.
use base64::{Engine as _, engine::general_purpose};
use hmac::{Hmac, Mac};
use rand::{Rng, distributions::Alphanumeric};
use sha1::Sha1;
use urlencoding::encode;

use crate::{Credentials, TwitterError};

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";
const NONCE_LENGTH: usize = 32;

pub(crate) fn nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}

/// Builds the signature base string: the method, the url without its query, and every oauth and
/// request parameter percent-encoded, sorted, and joined.
pub(crate) fn signature_base_string(method: &str, url: &str, params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (encode(k).into_owned(), encode(v).into_owned()))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        encode(url),
        encode(&param_string)
    )
}

pub(crate) fn sign(
    consumer_secret: &str,
    token_secret: &str,
    base_string: &str,
) -> Result<String, TwitterError> {
    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| TwitterError::Signature(e.to_string()))?;
    mac.update(base_string.as_bytes());
    Ok(general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

/// Returns the value of the `Authorization` header for the request.
/// `request_params` are the query string and form body parameters, unencoded.
pub(crate) fn authorization_header(
    credentials: &Credentials,
    method: &str,
    url: &str,
    request_params: &[(&str, &str)],
    nonce: &str,
    timestamp: i64,
) -> Result<String, TwitterError> {
    let timestamp = timestamp.to_string();
    let oauth_params: Vec<(&str, &str)> = vec![
        ("oauth_consumer_key", credentials.consumer_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", SIGNATURE_METHOD),
        ("oauth_timestamp", timestamp.as_str()),
        ("oauth_token", credentials.access_token_key.as_str()),
        ("oauth_version", OAUTH_VERSION),
    ];

    let all_params: Vec<(&str, &str)> = oauth_params
        .iter()
        .chain(request_params.iter())
        .copied()
        .collect();

    let signature = sign(
        &credentials.consumer_secret,
        &credentials.access_token_secret,
        &signature_base_string(method, url, &all_params),
    )?;

    let mut header_params = oauth_params;
    header_params.push(("oauth_signature", signature.as_str()));
    header_params.sort();

    let fields = header_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("OAuth {fields}"))
}
