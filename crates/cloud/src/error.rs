/// Errors raised by the object storage and notification clients.
#[derive(Debug, thiserror::Error)]
pub enum CloudError {
    /// Reading an object failed (missing object, permissions, network, body stream).
    #[error("Failed to read {container}/{key}: {message}")]
    Read {
        container: String,
        key: String,
        message: String,
    },

    /// Writing an object failed.
    #[error("Failed to write {container}/{key}: {message}")]
    Write {
        container: String,
        key: String,
        message: String,
    },

    /// Publishing a notification failed.
    #[error("Failed to publish to {topic}: {message}")]
    Publish { topic: String, message: String },
}
