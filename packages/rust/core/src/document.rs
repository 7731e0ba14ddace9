//! Document seams the pipeline reads from and writes to.
//!
//! The editor that hosts the pipeline is an external collaborator; these
//! traits are the contract it implements. [`BufferDocument`] is the
//! in-memory implementation used by the CLI and by tests.

use tracing::debug;

use textrelay_shared::Result;

use crate::pipeline::{ChunkObserver, WebhookProcessor};

/// Where the pipeline's input text comes from.
pub trait DocumentSource {
    /// The document's current content as plain text.
    fn plain_text(&self) -> String;

    /// Count of non-empty whitespace-delimited words in the current text.
    fn word_count(&self) -> usize;
}

/// Where the pipeline's final markup goes.
pub trait DocumentSink {
    /// Replace the document's content wholesale (not merged or appended).
    fn set_content(&mut self, markup: &str);
}

// ---------------------------------------------------------------------------
// BufferDocument
// ---------------------------------------------------------------------------

/// A markup-holding in-memory document.
#[derive(Debug, Clone, Default)]
pub struct BufferDocument {
    markup: String,
}

impl BufferDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document holding `markup`.
    pub fn from_markup(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    /// Create a document from plain text, promoting it to markup.
    pub fn from_plain_text(text: &str) -> Self {
        Self {
            markup: textrelay_markup::promote(text),
        }
    }

    /// The document's current markup.
    pub fn markup(&self) -> &str {
        &self.markup
    }
}

impl DocumentSource for BufferDocument {
    fn plain_text(&self) -> String {
        textrelay_markup::to_plain_text(&self.markup)
    }

    fn word_count(&self) -> usize {
        textrelay_chunker::count_words(&self.plain_text())
    }
}

impl DocumentSink for BufferDocument {
    fn set_content(&mut self, markup: &str) {
        self.markup = markup.to_string();
    }
}

// ---------------------------------------------------------------------------
// Document-level processing
// ---------------------------------------------------------------------------

/// Run the pipeline over a document's text and replace its content with the
/// result.
///
/// The sink is only written on full success; a failed run leaves the
/// document untouched.
pub async fn process_document<D>(
    processor: &mut WebhookProcessor,
    endpoint: &str,
    document: &mut D,
    observer: &dyn ChunkObserver,
) -> Result<()>
where
    D: DocumentSource + DocumentSink,
{
    let text = document.plain_text();
    debug!(words = document.word_count(), "processing document");

    let markup = processor.process(endpoint, &text, observer).await?;
    document.set_content(&markup);
    Ok(())
}
