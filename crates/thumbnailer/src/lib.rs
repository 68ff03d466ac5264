//! Event-triggered thumbnail generation.
//!
//! Receives a batch of "object created" records, renders a JPEG thumbnail for
//! every configured size of each eligible image, uploads them to the output
//! bucket and publishes one notification per processed image.

pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod notification;
pub mod pipeline;

pub use config::ThumbnailerConfig;
pub use context::InvocationContext;
pub use error::{BatchError, PipelineError};
pub use event::ObjectRef;
pub use pipeline::{BatchSummary, InvocationResponse, RecordOutcome, ThumbnailPipeline};
