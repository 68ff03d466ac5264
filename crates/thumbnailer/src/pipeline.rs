//! Batch dispatch, thumbnail generation and notification for one invocation.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use pinboard_cloud::{Notifier, ObjectStore, PutObject};
use pinboard_core::imaging::{SourceImage, THUMBNAIL_CONTENT_TYPE};
use pinboard_core::thumbnail::{check_eligibility, thumbnail_key};
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::ThumbnailerConfig;
use crate::context::InvocationContext;
use crate::error::PipelineError;
use crate::event::{parse_batch, ObjectRef};
use crate::notification::{self, Notification, PublishOutcome, ThumbnailReport};

/// Value of the `processed-by` metadata on every thumbnail.
pub const PROCESSED_BY: &str = "pinboard-thumbnailer";

/// Per-invocation record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Status object returned to the function host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    /// JSON document encoded as a string.
    pub body: String,
}

impl InvocationResponse {
    fn ok(summary: BatchSummary) -> Self {
        Self::new(
            200,
            json!({
                "message": "Images processed successfully",
                "processed": summary.processed,
                "skipped": summary.skipped,
                "failed": summary.failed,
            }),
        )
    }

    fn error(message: String) -> Self {
        Self::new(500, json!({ "error": message }))
    }

    fn new(status_code: u16, body: Value) -> Self {
        Self {
            status_code,
            body: body.to_string(),
        }
    }
}

/// Outcome of a single record.
#[derive(Debug)]
pub enum RecordOutcome {
    Processed(Vec<ThumbnailReport>),
    Skipped,
    Failed(PipelineError),
}

/// Turns object-created batches into thumbnails and notifications.
///
/// Records run strictly one after another; every size for one image is
/// rendered and uploaded before the next record starts.
pub struct ThumbnailPipeline {
    config: ThumbnailerConfig,
    store: Arc<dyn ObjectStore>,
    notifier: Arc<dyn Notifier>,
}

impl ThumbnailPipeline {
    pub fn new(
        config: ThumbnailerConfig,
        store: Arc<dyn ObjectStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            store,
            notifier,
        }
    }

    /// Handle a raw event payload. A malformed batch yields a 500 response
    /// before any record is touched; otherwise the response is 200 whatever
    /// happened to individual records.
    pub async fn handle_event(
        &self,
        event: &Value,
        context: &InvocationContext,
    ) -> InvocationResponse {
        let records = match parse_batch(event) {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(error = %e, "Rejected malformed event batch");
                return InvocationResponse::error(e.to_string());
            }
        };

        let summary = self.process_batch(&records, context).await;
        tracing::info!(
            processed = summary.processed,
            skipped = summary.skipped,
            failed = summary.failed,
            "Batch complete"
        );
        InvocationResponse::ok(summary)
    }

    /// Process every record in order. A failing record never stops the
    /// ones after it.
    pub async fn process_batch(
        &self,
        records: &[ObjectRef],
        context: &InvocationContext,
    ) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for record in records {
            match self.process_record(record, context).await {
                RecordOutcome::Processed(_) => summary.processed += 1,
                RecordOutcome::Skipped => summary.skipped += 1,
                RecordOutcome::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// Filter, generate and notify for one record.
    pub async fn process_record(
        &self,
        record: &ObjectRef,
        context: &InvocationContext,
    ) -> RecordOutcome {
        tracing::info!(container = %record.container, key = %record.key, "Processing object");

        if let Err(reason) = check_eligibility(&record.key) {
            tracing::info!(key = %record.key, reason = reason.as_str(), "Skipping object");
            return RecordOutcome::Skipped;
        }

        match self.generate(record).await {
            Ok(thumbnails) => {
                tracing::info!(
                    key = %record.key,
                    thumbnails = thumbnails.len(),
                    "Image processed"
                );
                let message =
                    Notification::processed(&record.key, &thumbnails, context, Utc::now());
                self.notify(&record.key, &message).await;
                RecordOutcome::Processed(thumbnails)
            }
            Err(e) => {
                tracing::error!(key = %record.key, error = %e, "Image processing failed");
                let message =
                    Notification::failed(&record.key, &e.to_string(), context, Utc::now());
                self.notify(&record.key, &message).await;
                RecordOutcome::Failed(e)
            }
        }
    }

    /// Fetch and decode the source once, then render and upload each size.
    /// The first failure abandons the remaining sizes.
    async fn generate(&self, record: &ObjectRef) -> Result<Vec<ThumbnailReport>, PipelineError> {
        let bucket = self
            .config
            .output_bucket
            .as_deref()
            .ok_or(PipelineError::MissingConfig("OUTPUT_BUCKET"))?;

        let bytes = self
            .store
            .get_object(&record.container, &record.key)
            .await
            .map_err(PipelineError::Fetch)?;

        let source = SourceImage::decode(&bytes)?;
        tracing::debug!(key = %record.key, dimensions = %source.dimensions(), "Decoded source image");

        let mut reports = Vec::with_capacity(self.config.specs.len());
        for &spec in &self.config.specs {
            let rendered = source.render(spec)?;
            let key = thumbnail_key(&record.key, spec);
            let size = spec.label();

            let metadata = BTreeMap::from([
                ("original-image".to_string(), record.key.clone()),
                ("thumbnail-size".to_string(), size.clone()),
                ("processed-by".to_string(), PROCESSED_BY.to_string()),
            ]);

            self.store
                .put_object(PutObject {
                    container: bucket.to_string(),
                    key: key.clone(),
                    body: rendered.bytes,
                    content_type: THUMBNAIL_CONTENT_TYPE.to_string(),
                    metadata,
                })
                .await
                .map_err(|source| PipelineError::Upload {
                    key: key.clone(),
                    source,
                })?;

            tracing::info!(key = %key, dimensions = %rendered.dimensions, "Created thumbnail");
            reports.push(ThumbnailReport {
                size,
                key,
                dimensions: rendered.dimensions,
            });
        }
        Ok(reports)
    }

    /// Best-effort publish. The outcome is logged and dropped.
    async fn notify(&self, key: &str, message: &Notification) {
        let outcome = notification::publish(
            self.notifier.as_ref(),
            self.config.topic_arn.as_deref(),
            message,
        )
        .await;
        if let PublishOutcome::Failed { error } = outcome {
            tracing::warn!(key, error = %error, "Continuing without notification");
        }
    }
}
