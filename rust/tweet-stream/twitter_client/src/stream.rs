use bytes::{Bytes, BytesMut};
use futures::{
    Stream, StreamExt, TryStreamExt,
    stream::{self, BoxStream},
};
use reqwest::header::AUTHORIZATION;

use crate::{STREAM_URL, TwitterClient, TwitterError, error_for_status};

/// One json message per item, keep-alive lines removed
pub type StatusStream = BoxStream<'static, Result<Bytes, TwitterError>>;

/// Splits the streaming body into messages.
/// Messages are delimited by `\r\n` and twitter sends bare `\r\n` as a keep-alive.
#[derive(Debug, Default)]
pub struct MessageSplitter {
    buffer: BytesMut,
}

impl MessageSplitter {
    /// Appends a chunk and returns every message it completed
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Bytes> {
        self.buffer.extend_from_slice(chunk);

        let mut messages = Vec::new();
        while let Some(end) = self.buffer.iter().position(|b| *b == b'\n') {
            let line = self.buffer.split_to(end + 1).freeze();
            let start = line.iter().take_while(|b| b.is_ascii_whitespace()).count();
            let trailing = line[start..]
                .iter()
                .rev()
                .take_while(|b| b.is_ascii_whitespace())
                .count();

            if start + trailing < line.len() {
                messages.push(line.slice(start..line.len() - trailing));
            }
        }

        messages
    }

    /// Bytes received after the last delimiter
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

/// Adapts a chunked body into a stream of complete messages.
/// A partial message left when the body ends is dropped.
pub fn split_messages<S, E>(body: S) -> impl Stream<Item = Result<Bytes, TwitterError>>
where
    S: Stream<Item = Result<Bytes, E>>,
    TwitterError: From<E>,
{
    let mut splitter = MessageSplitter::default();
    body.map(move |chunk| -> Result<_, TwitterError> {
        let messages = splitter.push(&chunk?);
        Ok(stream::iter(
            messages.into_iter().map(Ok::<Bytes, TwitterError>),
        ))
    })
    .try_flatten()
}

pub(crate) async fn filter(client: &TwitterClient, track: &str) -> Result<StatusStream, TwitterError> {
    let url = format!("{STREAM_URL}/statuses/filter.json");
    let params = [("track", track)];

    let response = client
        .inner
        .post(&url)
        .form(&params)
        .header(AUTHORIZATION, client.authorization("POST", &url, &params)?)
        .send()
        .await?;

    let response = error_for_status(response).await?;

    tracing::info!(track = %track, "connected to filter stream");

    Ok(split_messages(response.bytes_stream()).boxed())
}
