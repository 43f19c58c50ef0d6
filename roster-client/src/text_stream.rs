use anyhow::{Context, Result};
use futures_util::{Stream, StreamExt};
use roster_core::{api::routes::api, streaming::DEFAULT_CHAR_DELAY};

use crate::api_client::ApiClient;

/// Consumes the character streaming endpoint.
#[derive(Clone, Debug)]
pub struct TextStreamClient {
    api: ApiClient,
}

impl TextStreamClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Path for a per-character delay of `speed_ms`; the default speed uses
    /// the plain endpoint.
    pub fn path_for(speed_ms: u64) -> String {
        if u128::from(speed_ms) == DEFAULT_CHAR_DELAY.as_millis() {
            api::streaming::TEXT.to_string()
        } else {
            api::streaming::text_with_speed_path(speed_ms)
        }
    }

    /// Opens the stream and yields characters as they arrive.
    ///
    /// Multi-byte characters split across network chunks are reassembled.
    pub async fn stream(
        &self,
        speed_ms: u64,
    ) -> Result<impl Stream<Item = Result<char>> + use<>> {
        let url = self.api.build_url(&Self::path_for(speed_ms));
        let response = self.api.execute_raw(self.api.http().get(url)).await?;
        let mut bytes = response.bytes_stream();

        Ok(async_stream::try_stream! {
            let mut pending: Vec<u8> = Vec::new();
            while let Some(chunk) = bytes.next().await {
                let chunk = chunk.context("text stream interrupted")?;
                pending.extend_from_slice(&chunk);

                let decoded = decode_prefix(&pending).to_owned();
                pending.drain(..decoded.len());
                for ch in decoded.chars() {
                    yield ch;
                }
            }
            if !pending.is_empty() {
                Err::<(), _>(anyhow::anyhow!("text stream ended mid-character"))?;
            }
        })
    }

    /// Reads the whole stream, calling `on_char` for each character, and
    /// returns the full text.
    pub async fn collect_text<F>(
        &self,
        speed_ms: u64,
        mut on_char: F,
    ) -> Result<String>
    where
        F: FnMut(char),
    {
        let stream = self.stream(speed_ms).await?;
        futures_util::pin_mut!(stream);

        let mut text = String::new();
        while let Some(ch) = stream.next().await {
            let ch = ch?;
            on_char(ch);
            text.push(ch);
        }
        log::debug!(
            "[TextStream] received {} characters",
            text.chars().count()
        );
        Ok(text)
    }
}

/// Longest valid UTF-8 prefix of `bytes`.
fn decode_prefix(bytes: &[u8]) -> &str {
    match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            // valid_up_to always marks a char boundary
            std::str::from_utf8(&bytes[..err.valid_up_to()])
                .unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_speed_uses_plain_endpoint() {
        assert_eq!(TextStreamClient::path_for(50), "/api/stream-text");
        assert_eq!(TextStreamClient::path_for(5), "/api/stream-text/5");
    }

    #[test]
    fn split_multibyte_char_waits_for_the_rest() {
        let bytes = "hé".as_bytes();
        assert_eq!(decode_prefix(&bytes[..2]), "h");
        assert_eq!(decode_prefix(bytes), "hé");
    }
}
