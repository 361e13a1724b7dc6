use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_dynamo::{Item, to_item};

/// The subset of a stream tweet the event table stores
#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StreamTweet {
    pub id_str: String,
    pub created_at: String,
    pub text: String,
    pub user: StreamUser,
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StreamUser {
    pub name: String,
}

impl StreamTweet {
    /// Identifies a tweet within a batch
    pub fn dedupe_key(&self) -> String {
        format!("{}{}", self.user.name, self.id_str)
    }
}

/// A row of the event table
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct TweetItem {
    pub username: String,
    pub id: String,
    /// ISO-8601 creation time
    pub timestamp: String,
    pub message: String,
    /// epoch seconds after which dynamodb expires the item
    pub expiration_time: i64,
}

impl TweetItem {
    pub fn to_attributes(&self) -> Result<HashMap<String, AttributeValue>, serde_dynamo::Error> {
        let item: Item = to_item(self)?;
        Ok(item.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_attributes() {
        let attributes = TweetItem {
            username: "Twitter Dev".to_string(),
            id: "850006245121695744".to_string(),
            timestamp: "2017-04-06T15:24:15.000Z".to_string(),
            message: "hello".to_string(),
            expiration_time: 1491493455,
        }
        .to_attributes()
        .unwrap();

        assert_eq!(attributes.len(), 5);
        assert_eq!(
            attributes.get("Username"),
            Some(&AttributeValue::S("Twitter Dev".to_string()))
        );
        assert_eq!(
            attributes.get("Timestamp"),
            Some(&AttributeValue::S("2017-04-06T15:24:15.000Z".to_string()))
        );
        assert_eq!(
            attributes.get("ExpirationTime"),
            Some(&AttributeValue::N("1491493455".to_string()))
        );
    }

    #[test]
    fn test_stream_tweet_ignores_extra_fields() {
        let tweet: StreamTweet = serde_json::from_value(serde_json::json!({
            "id": 1,
            "id_str": "1",
            "created_at": "Thu Apr 06 15:24:15 +0000 2017",
            "text": "hi",
            "lang": "en",
            "user": { "name": "dev", "screen_name": "dev" }
        }))
        .unwrap();

        assert_eq!(tweet.dedupe_key(), "dev1");
    }
}
