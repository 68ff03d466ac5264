//! Success and failure notifications for processed images.

use chrono::{DateTime, SecondsFormat, Utc};
use pinboard_cloud::Notifier;
use pinboard_core::thumbnail::Dimensions;
use serde::Serialize;

use crate::context::InvocationContext;

/// Longest subject the topic accepts.
pub const MAX_SUBJECT_LEN: usize = 100;

/// One generated thumbnail as reported in a success notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThumbnailReport {
    /// Requested bounding box label, e.g. `"150x150"`.
    pub size: String,
    /// Output key in the destination bucket.
    pub key: String,
    /// Emitted pixel dimensions.
    pub dimensions: Dimensions,
}

#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Payload<'a> {
    ImageProcessed {
        original_image: &'a str,
        thumbnails_created: usize,
        thumbnails: &'a [ThumbnailReport],
        request_id: Option<&'a str>,
        timestamp: String,
    },
    ImageProcessingError {
        original_image: &'a str,
        error: &'a str,
        request_id: Option<&'a str>,
        timestamp: String,
    },
}

/// A rendered message ready to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub message: String,
}

impl Notification {
    /// `image_processed` message for an image whose thumbnails were all
    /// uploaded.
    pub fn processed(
        original_key: &str,
        thumbnails: &[ThumbnailReport],
        context: &InvocationContext,
        at: DateTime<Utc>,
    ) -> Self {
        let payload = Payload::ImageProcessed {
            original_image: original_key,
            thumbnails_created: thumbnails.len(),
            thumbnails,
            request_id: context.request_id.as_deref(),
            timestamp: format_timestamp(at),
        };
        Self::render(format!("Image Processed: {original_key}"), &payload)
    }

    /// `image_processing_error` message for an image that failed.
    pub fn failed(
        original_key: &str,
        error: &str,
        context: &InvocationContext,
        at: DateTime<Utc>,
    ) -> Self {
        let payload = Payload::ImageProcessingError {
            original_image: original_key,
            error,
            request_id: context.request_id.as_deref(),
            timestamp: format_timestamp(at),
        };
        Self::render(format!("Image Processing Error: {original_key}"), &payload)
    }

    fn render(subject: String, payload: &Payload<'_>) -> Self {
        // Only strings and integers in the payload, so serialization cannot fail.
        let message = serde_json::to_string_pretty(payload).unwrap_or_default();
        Self {
            subject: truncate_subject(&subject),
            message,
        }
    }
}

/// Cut `subject` to at most [`MAX_SUBJECT_LEN`] characters.
pub fn truncate_subject(subject: &str) -> String {
    subject.chars().take(MAX_SUBJECT_LEN).collect()
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Result of a best-effort publish. Only ever logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published { message_id: Option<String> },
    Failed { error: String },
}

/// Publish `notification` to `topic`, logging instead of propagating any
/// failure. A missing topic is a failed outcome.
pub async fn publish(
    notifier: &dyn Notifier,
    topic: Option<&str>,
    notification: &Notification,
) -> PublishOutcome {
    let Some(topic) = topic else {
        tracing::warn!(subject = %notification.subject, "SNS_TOPIC_ARN not set, notification dropped");
        return PublishOutcome::Failed {
            error: "SNS_TOPIC_ARN is not configured".into(),
        };
    };

    match notifier
        .publish(topic, &notification.subject, &notification.message)
        .await
    {
        Ok(message_id) => {
            tracing::info!(
                subject = %notification.subject,
                message_id = message_id.as_deref().unwrap_or("-"),
                "Notification published"
            );
            PublishOutcome::Published { message_id }
        }
        Err(e) => {
            tracing::error!(error = %e, subject = %notification.subject, "Failed to publish notification");
            PublishOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}
