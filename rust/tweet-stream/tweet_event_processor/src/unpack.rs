use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use lambda_runtime::tracing;

use crate::model::{StreamTweet, TweetItem};

/// The epoch second an item written at `now` expires
pub fn expiration_time(now: DateTime<Utc>, ttl_days: u32) -> i64 {
    (now + Duration::days(i64::from(ttl_days))).timestamp()
}

/// Converts raw stream payloads into table items.
/// Payloads which are not tweets are logged and skipped, as are tweets already seen in the batch.
pub fn unpack_items<'a, I>(payloads: I, expiration_time: i64) -> Vec<TweetItem>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut seen = HashSet::new();

    payloads
        .into_iter()
        .filter_map(|payload| {
            let tweet: StreamTweet = serde_json::from_slice(payload)
                .inspect_err(|e| {
                    tracing::warn!(error=?e, payload=%String::from_utf8_lossy(payload), "skipping record");
                })
                .ok()?;

            if !seen.insert(tweet.dedupe_key()) {
                tracing::debug!(id=%tweet.id_str, "skipping duplicate tweet");
                return None;
            }

            let timestamp = models_tweet::timestamp::to_iso8601(&tweet.created_at)
                .inspect_err(|e| {
                    tracing::warn!(error=?e, id=%tweet.id_str, "skipping record");
                })
                .ok()?;

            Some(TweetItem {
                username: tweet.user.name,
                id: tweet.id_str,
                timestamp,
                message: tweet.text,
                expiration_time,
            })
        })
        .collect()
}
