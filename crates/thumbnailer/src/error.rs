use pinboard_cloud::CloudError;
use pinboard_core::imaging::ImagingError;

/// Failure while processing one record. Reported through a failure
/// notification and never aborts the rest of the batch.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Failed to fetch source image: {0}")]
    Fetch(#[source] CloudError),

    #[error(transparent)]
    Thumbnail(#[from] ImagingError),

    #[error("Failed to upload thumbnail {key}: {source}")]
    Upload {
        key: String,
        #[source]
        source: CloudError,
    },

    #[error("{0} is not configured")]
    MissingConfig(&'static str),
}

/// The invocation payload is not a usable batch of object records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    #[error("Event payload must be a JSON object")]
    NotAnObject,

    #[error("Event payload has no Records array")]
    MissingRecords,

    #[error("Record {index} has no {field}")]
    MissingField { index: usize, field: &'static str },
}
