use serde_json::Value;
use thiserror::Error;

use crate::{
    source,
    timestamp::{self, TimestampError},
};

/// The flattened tweet written to downstream storage.
/// Field order here is the key order of the serialized json.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTweet {
    /// `created_at` rendered as `YYYY-MM-DD HH:MM:SS`
    pub created_at: String,
    pub id: u64,
    /// the untruncated `full_text` of the tweet
    pub text: String,
    pub user_name: String,
    pub user_screen_name: String,
    /// the posting client with its markup removed
    pub source: String,
    pub retweet_count: u64,
    /// null when twitter has no count for the tweet
    pub favorite_count: Option<u64>,
    /// null when twitter could not detect a language
    pub lang: Option<String>,
    pub verified: bool,
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("unable to parse tweet json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tweet is missing required field {0}")]
    MissingField(&'static str),
    #[error("tweet field {field} is not {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
    #[error(transparent)]
    Timestamp(#[from] TimestampError),
    #[error("unable to serialize normalized tweet: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Resolves a dotted path such as `user.screen_name`
fn field<'a>(tweet: &'a Value, path: &'static str) -> Result<&'a Value, TransformError> {
    path.split('.')
        .try_fold(tweet, |value, key| value.get(key))
        .ok_or(TransformError::MissingField(path))
}

fn str_field<'a>(tweet: &'a Value, path: &'static str) -> Result<&'a str, TransformError> {
    field(tweet, path)?
        .as_str()
        .ok_or(TransformError::InvalidField {
            field: path,
            expected: "a string",
        })
}

fn u64_field(tweet: &Value, path: &'static str) -> Result<u64, TransformError> {
    field(tweet, path)?
        .as_u64()
        .ok_or(TransformError::InvalidField {
            field: path,
            expected: "an unsigned integer",
        })
}

/// A nullable field: the key must be present, `null` is passed through as [None]
fn nullable_field<'a, T>(
    tweet: &'a Value,
    path: &'static str,
    expected: &'static str,
    read: impl Fn(&'a Value) -> Option<T>,
) -> Result<Option<T>, TransformError> {
    match field(tweet, path)? {
        Value::Null => Ok(None),
        value => read(value)
            .map(Some)
            .ok_or(TransformError::InvalidField {
                field: path,
                expected,
            }),
    }
}

fn bool_field(tweet: &Value, path: &'static str) -> Result<bool, TransformError> {
    field(tweet, path)?
        .as_bool()
        .ok_or(TransformError::InvalidField {
            field: path,
            expected: "a boolean",
        })
}

impl NormalizedTweet {
    /// Projects a raw tweet onto the normalized shape.
    /// Fields are read in a fixed order so the first missing one is the one reported.
    pub fn from_raw(tweet: &Value) -> Result<Self, TransformError> {
        let created_at = str_field(tweet, "created_at")?;
        let id = u64_field(tweet, "id")?;
        let text = str_field(tweet, "full_text")?;
        let user_name = str_field(tweet, "user.name")?;
        let user_screen_name = str_field(tweet, "user.screen_name")?;
        let source = str_field(tweet, "source")?;
        let retweet_count = u64_field(tweet, "retweet_count")?;
        let favorite_count =
            nullable_field(tweet, "favorite_count", "an unsigned integer", Value::as_u64)?;
        let lang = nullable_field(tweet, "lang", "a string", Value::as_str)?;
        let verified = bool_field(tweet, "user.verified")?;

        Ok(Self {
            created_at: timestamp::normalize(created_at)?,
            id,
            text: text.to_string(),
            user_name: user_name.to_string(),
            user_screen_name: user_screen_name.to_string(),
            source: source::strip_tags(source).into_owned(),
            retweet_count,
            favorite_count,
            lang: lang.map(str::to_string),
            verified,
        })
    }
}

/// Transforms the utf-8 json of a raw tweet into the utf-8 json of a [NormalizedTweet]
#[tracing::instrument(skip_all, err)]
pub fn transform(raw: &[u8]) -> Result<Vec<u8>, TransformError> {
    let tweet: Value = serde_json::from_slice(raw)?;
    let normalized = NormalizedTweet::from_raw(&tweet)?;

    tracing::trace!(id = normalized.id, "normalized tweet");

    serde_json::to_vec(&normalized).map_err(TransformError::Serialize)
}
