//! The chunked webhook processing run: chunk → submit → reassemble.

use std::time::{Duration, Instant};

use tracing::{info, instrument};

use textrelay_chunker::split_into_chunks;
use textrelay_shared::{PipelineError, ProcessingState, Result};
use textrelay_webhook::WebhookClient;

// ---------------------------------------------------------------------------
// ChunkObserver
// ---------------------------------------------------------------------------

/// Observer callbacks for one processing run.
///
/// Callers wanting incremental rendering implement [`chunk_processed`];
/// callers wanting a progress display implement [`progress`]. All methods
/// default to no-ops.
///
/// [`chunk_processed`]: ChunkObserver::chunk_processed
/// [`progress`]: ChunkObserver::progress
pub trait ChunkObserver: Send + Sync {
    /// Called after every processing-state update.
    fn progress(&self, _state: &ProcessingState) {}

    /// Called with each chunk's transformed text and its 0-based index,
    /// immediately after that chunk succeeds and before the next starts.
    fn chunk_processed(&self, _text: &str, _index: usize) {}
}

/// No-op observer for headless/test usage.
pub struct SilentObserver;

impl ChunkObserver for SilentObserver {}

// ---------------------------------------------------------------------------
// WebhookProcessor
// ---------------------------------------------------------------------------

/// Orchestrates processing runs and owns their [`ProcessingState`].
///
/// Only one run may be in flight per processor; `process` takes `&mut self`
/// so the borrow checker enforces that. Chunk submission is strictly
/// sequential: no request is issued before the previous response is known,
/// which keeps ordering and progress accounting trivially correct and bounds
/// the remote service's concurrent load to one request.
pub struct WebhookProcessor {
    state: ProcessingState,
    timeout: Option<Duration>,
}

impl WebhookProcessor {
    /// Create an idle processor with no per-request timeout.
    pub fn new() -> Self {
        Self {
            state: ProcessingState::default(),
            timeout: None,
        }
    }

    /// Apply a per-request timeout to webhook calls.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The current processing state.
    pub fn state(&self) -> &ProcessingState {
        &self.state
    }

    /// Return the processing state to idle, clearing any recorded error.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Run the full pipeline over `text` and return the final document markup.
    ///
    /// Splits `text` into word-capped chunks, submits each to `endpoint` in
    /// ascending order, invokes `observer` per chunk, joins the transformed
    /// chunks with a blank line, and promotes the result to markup.
    ///
    /// An empty endpoint fails with [`PipelineError::MissingEndpoint`] before
    /// any network activity or state mutation. Empty or whitespace-only text
    /// returns an empty document without touching the state. Any chunk
    /// failure aborts the run: the failure message is recorded in the state,
    /// the error propagates, and the partial results are discarded.
    ///
    /// Progress is monotonically non-decreasing within a run and reaches 100
    /// only on full success.
    #[instrument(skip_all, fields(endpoint = %endpoint, text_len = text.len()))]
    pub async fn process(
        &mut self,
        endpoint: &str,
        text: &str,
        observer: &dyn ChunkObserver,
    ) -> Result<String> {
        // Endpoint precondition first: no state mutation, no network.
        let client = WebhookClient::new(endpoint, self.timeout)?;

        let chunks = split_into_chunks(text);
        if chunks.is_empty() {
            return Ok(String::new());
        }

        let start = Instant::now();
        let total = chunks.len();

        self.state.begin(total);
        observer.progress(&self.state);

        info!(total_chunks = total, "starting processing run");

        let mut results: Vec<String> = Vec::with_capacity(total);

        for (i, chunk) in chunks.iter().enumerate() {
            self.state.current_chunk = i + 1;
            self.state.progress = ((100 * i) / total) as u8;
            observer.progress(&self.state);

            let transformed = match client.transform(&chunk.text).await {
                Ok(t) => t,
                Err(e) => {
                    self.state.is_processing = false;
                    self.state.error = Some(e.to_string());
                    observer.progress(&self.state);
                    info!(
                        failed_chunk = i + 1,
                        total_chunks = total,
                        error = %e,
                        "processing run aborted"
                    );
                    return Err(e);
                }
            };

            results.push(transformed);
            observer.chunk_processed(results.last().expect("just pushed"), i);

            self.state.progress = ((100 * (i + 1)) / total) as u8;
            observer.progress(&self.state);
        }

        self.state.is_processing = false;
        self.state.progress = 100;
        observer.progress(&self.state);

        let combined = results.join("\n\n");
        let markup = textrelay_markup::promote(&combined);

        info!(
            total_chunks = total,
            output_len = markup.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "processing run complete"
        );

        Ok(markup)
    }
}

impl Default for WebhookProcessor {
    fn default() -> Self {
        Self::new()
    }
}
