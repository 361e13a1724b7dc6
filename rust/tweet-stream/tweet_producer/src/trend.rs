use lambda_runtime::tracing;
use twitter_client::{Trend, TwitterError};

use crate::ports::TwitterApi;

/// Tracked when no usable trend is found
pub const FALLBACK_TREND: &str = "#serverless";

/// Picks the topic to track.
/// Trends with a volume are moved ahead of trends without one, otherwise the api order is kept;
/// volumes are not compared with each other.
pub fn top_trend(mut trends: Vec<Trend>) -> String {
    trends.sort_by_key(|trend| trend.tweet_volume.is_none());

    // a list holding a single trend falls back as well
    if trends.len() > 1 {
        return trends.swap_remove(0).name;
    }

    FALLBACK_TREND.to_string()
}

/// Fetches the trends for `woeid` and selects the one to track
#[tracing::instrument(err, skip(twitter))]
pub async fn select_top_trend<T>(twitter: &T, woeid: &str) -> Result<String, TwitterError>
where
    T: TwitterApi + ?Sized,
{
    let trends = twitter.place_trends(woeid).await?;
    let trend = top_trend(trends);

    tracing::info!(trend = %trend, "selected top trend");

    Ok(trend)
}
