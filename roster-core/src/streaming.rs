//! Character-by-character text streaming.

use std::time::Duration;

use futures::Stream;

use crate::lorem;

/// Paragraphs per stream when not configured.
pub const DEFAULT_PARAGRAPHS: usize = 32;
/// Delay between characters when not configured.
pub const DEFAULT_CHAR_DELAY: Duration = Duration::from_millis(50);

/// Parses the `{speed}` path segment. Anything that is not a positive
/// integer falls back to [`DEFAULT_CHAR_DELAY`].
pub fn parse_speed(raw: &str) -> Duration {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Duration::from_millis(ms),
        _ => DEFAULT_CHAR_DELAY,
    }
}

/// Generates `paragraphs` lorem paragraphs separated by newlines.
pub fn generate_text(paragraphs: usize) -> String {
    lorem::paragraphs(&mut rand::rng(), paragraphs)
}

/// Yields `text` one character at a time, sleeping `delay` between
/// characters. Dropping the stream stops it.
pub fn char_stream(text: String, delay: Duration) -> impl Stream<Item = char> {
    async_stream::stream! {
        for (index, ch) in text.chars().enumerate() {
            if index > 0 {
                tokio::time::sleep(delay).await;
            }
            yield ch;
        }
    }
}
