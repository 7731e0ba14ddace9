//! Word-cap text chunking for the webhook pipeline.
//!
//! Splits arbitrarily long text into an ordered sequence of bounded-size
//! chunks so each can be submitted to the remote transform service as one
//! request. Tokenization is whitespace-delimited: any run of whitespace in
//! the input collapses to a single separating space in the chunk text, so
//! word order and content survive chunking exactly but inter-word whitespace
//! does not.

use tracing::debug;

use textrelay_shared::ChunkInfo;

/// Maximum number of words submitted per webhook request.
pub const MAX_WORDS_PER_CHUNK: usize = 300;

/// Split `text` into ordered chunks of at most [`MAX_WORDS_PER_CHUNK`] words.
///
/// Empty or whitespace-only input yields an empty vec, not an error. The
/// final chunk may hold fewer words; an exact multiple of the cap produces
/// no trailing empty chunk. Offsets in the returned [`ChunkInfo`]s index the
/// conceptual re-joined chunk text (each chunk advances the running offset
/// by its length plus one separator), not the original input.
pub fn split_into_chunks(text: &str) -> Vec<ChunkInfo> {
    let words: Vec<&str> = text.split_whitespace().collect();

    let mut chunks = Vec::with_capacity(words.len().div_ceil(MAX_WORDS_PER_CHUNK));
    let mut current_index = 0usize;

    for group in words.chunks(MAX_WORDS_PER_CHUNK) {
        let chunk_text = group.join(" ");
        let end_index = current_index + chunk_text.len();
        chunks.push(ChunkInfo {
            text: chunk_text,
            start_index: current_index,
            end_index,
        });
        current_index = end_index + 1;
    }

    debug!(
        words = words.len(),
        chunks = chunks.len(),
        "split text into chunks"
    );

    chunks
}

/// Count the non-empty whitespace-delimited words in `text`.
///
/// Independent of chunking; this backs the caller-facing word-count surface.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
