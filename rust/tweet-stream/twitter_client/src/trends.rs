use reqwest::header::AUTHORIZATION;

use crate::{API_URL, TwitterClient, TwitterError, error_for_status};

/// A trending topic. `tweet_volume` is null when twitter has no volume for the topic.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Trend {
    pub name: String,
    pub tweet_volume: Option<u64>,
}

/// `trends/place` answers with a single element array wrapping the trends
#[derive(serde::Deserialize, Debug)]
struct PlaceTrends {
    trends: Vec<Trend>,
}

pub(crate) fn parse_place_trends(body: &[u8]) -> Result<Vec<Trend>, TwitterError> {
    let places: Vec<PlaceTrends> = serde_json::from_slice(body)?;
    Ok(places
        .into_iter()
        .next()
        .map(|place| place.trends)
        .unwrap_or_default())
}

pub(crate) async fn place_trends(
    client: &TwitterClient,
    woeid: &str,
) -> Result<Vec<Trend>, TwitterError> {
    let url = format!("{API_URL}/trends/place.json");
    let params = [("id", woeid)];

    let response = client
        .inner
        .get(&url)
        .query(&params)
        .header(AUTHORIZATION, client.authorization("GET", &url, &params)?)
        .send()
        .await?;

    let body = error_for_status(response).await?.bytes().await?;
    let trends = parse_place_trends(&body)?;

    tracing::debug!(count = trends.len(), "fetched trends");

    Ok(trends)
}
