//! Splits a normalized token stream into fixed-size word windows.

use crate::topics::TopicError;

/// Chunk size used by the topic endpoint.
pub const DEFAULT_CHUNK_SIZE: usize = 110;

/// Partitions `tokens` into consecutive groups of at most `chunk_size` tokens, each joined with a
/// single space. Only the last group may be shorter. No tokens are dropped or reordered.
pub fn chunk<S: AsRef<str>>(tokens: &[S], chunk_size: usize) -> Result<Vec<String>, TopicError> {
    if chunk_size == 0 {
        return Err(TopicError::InvalidChunkSize(chunk_size));
    }

    Ok(tokens
        .chunks(chunk_size)
        .map(|window| {
            window
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .join(" ")
        })
        .collect())
}
