//! Pipeline orchestration for TextRelay.
//!
//! Drives text through the chunk → webhook → reassemble pipeline:
//! the orchestrator splits the caller's text into bounded-size chunks,
//! submits them to the remote transform service strictly in order, tracks
//! fine-grained progress, and promotes the reassembled result to editor
//! markup.

pub mod document;
pub mod pipeline;

pub use document::{BufferDocument, DocumentSink, DocumentSource, process_document};
pub use pipeline::{ChunkObserver, SilentObserver, WebhookProcessor};
