//! Core domain types for the TextRelay processing pipeline.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ProcessingState
// ---------------------------------------------------------------------------

/// Mutable progress state for one processing run.
///
/// Owned by the orchestrator and observed by the caller. Reset to the
/// all-zero state on construction and on [`ProcessingState::reset`],
/// reinitialized at the start of each run, and finalized
/// (`is_processing = false`) on success or failure. Only one run may be in
/// flight against a given instance; a new run overwrites prior state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingState {
    /// True strictly between run start and run completion/failure.
    pub is_processing: bool,
    /// Percentage of chunks fully processed (0..=100).
    pub progress: u8,
    /// 1-based index of the chunk currently in flight (0 before start).
    pub current_chunk: usize,
    /// Chunk count for the current run.
    pub total_chunks: usize,
    /// Last failure message; cleared when a new run starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessingState {
    /// Return to the all-zero/absent state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Reinitialize for a run over `total_chunks` chunks.
    pub fn begin(&mut self, total_chunks: usize) {
        *self = Self {
            is_processing: true,
            progress: 0,
            current_chunk: 0,
            total_chunks,
            error: None,
        };
    }
}

// ---------------------------------------------------------------------------
// ChunkInfo
// ---------------------------------------------------------------------------

/// One bounded-size slice of the input's word sequence.
///
/// Produced once per run by the chunker and never mutated. `start_index` and
/// `end_index` are character offsets into the re-joined chunk text, not into
/// the original input (exact inter-word whitespace is not preserved through
/// chunking). They are bookkeeping only; do not use them to locate a chunk
/// within the original source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkInfo {
    /// The chunk's word-joined content.
    pub text: String,
    /// Offset of the chunk within the conceptual re-joined text.
    pub start_index: usize,
    /// End offset (start + text length).
    pub end_index: usize,
}
