use pinboard_core::error::CoreError;
use pinboard_core::thumbnail::{parse_spec_list, ThumbnailSpec, DEFAULT_SPECS};

/// Thumbnail function configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailerConfig {
    /// Bucket receiving generated thumbnails. Records fail when unset.
    pub output_bucket: Option<String>,
    /// Topic receiving success and failure notifications. Publishing is
    /// skipped (and logged) when unset.
    pub topic_arn: Option<String>,
    /// Bounding boxes to render, in order.
    pub specs: Vec<ThumbnailSpec>,
}

impl ThumbnailerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var           | Default                      |
    /// |-------------------|------------------------------|
    /// | `OUTPUT_BUCKET`   | unset                        |
    /// | `SNS_TOPIC_ARN`   | unset                        |
    /// | `THUMBNAIL_SIZES` | `150x150,300x300,600x600`    |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_values(
            std::env::var("OUTPUT_BUCKET").ok(),
            std::env::var("SNS_TOPIC_ARN").ok(),
            std::env::var("THUMBNAIL_SIZES").ok(),
        )
    }

    /// Build a configuration from raw values. Blank strings count as unset.
    pub fn from_values(
        output_bucket: Option<String>,
        topic_arn: Option<String>,
        sizes: Option<String>,
    ) -> Result<Self, CoreError> {
        let specs = match non_blank(sizes) {
            Some(sizes) => parse_spec_list(&sizes)?,
            None => DEFAULT_SPECS.to_vec(),
        };

        Ok(Self {
            output_bucket: non_blank(output_bucket),
            topic_arn: non_blank(topic_arn),
            specs,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
