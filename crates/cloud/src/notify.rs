//! Notification seam and its SNS implementation.

use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;

use crate::error::CloudError;

/// Publish a message to a pub/sub topic.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Publish `message` with `subject` to `topic`, returning the provider's
    /// message id when it assigns one.
    async fn publish(
        &self,
        topic: &str,
        subject: &str,
        message: &str,
    ) -> Result<Option<String>, CloudError>;
}

/// [`Notifier`] backed by Amazon SNS. `topic` is the topic ARN.
#[derive(Clone)]
pub struct SnsNotifier {
    client: aws_sdk_sns::Client,
}

impl SnsNotifier {
    pub fn new(client: aws_sdk_sns::Client) -> Self {
        Self { client }
    }

    pub fn from_sdk_config(config: &aws_config::SdkConfig) -> Self {
        Self::new(aws_sdk_sns::Client::new(config))
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    async fn publish(
        &self,
        topic: &str,
        subject: &str,
        message: &str,
    ) -> Result<Option<String>, CloudError> {
        let output = self
            .client
            .publish()
            .topic_arn(topic)
            .subject(subject)
            .message(message)
            .send()
            .await
            .map_err(|e| CloudError::Publish {
                topic: topic.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(output.message_id().map(str::to_string))
    }
}
