//! Object storage seam and its S3 implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use crate::error::CloudError;

/// An object to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutObject {
    pub container: String,
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: String,
    /// User metadata stored alongside the object.
    pub metadata: BTreeMap<String, String>,
}

/// Read and write whole objects in a container (bucket).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Download the full body of `container/key`.
    async fn get_object(&self, container: &str, key: &str) -> Result<Vec<u8>, CloudError>;

    /// Upload (create or overwrite) an object.
    async fn put_object(&self, object: PutObject) -> Result<(), CloudError>;
}

/// [`ObjectStore`] backed by Amazon S3 (or an S3-compatible endpoint).
#[derive(Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    pub fn from_sdk_config(config: &aws_config::SdkConfig) -> Self {
        Self::new(aws_sdk_s3::Client::new(config))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, container: &str, key: &str) -> Result<Vec<u8>, CloudError> {
        let read_error = |message: String| CloudError::Read {
            container: container.to_string(),
            key: key.to_string(),
            message,
        };

        let output = self
            .client
            .get_object()
            .bucket(container)
            .key(key)
            .send()
            .await
            .map_err(|e| read_error(DisplayErrorContext(&e).to_string()))?;

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| read_error(e.to_string()))?;

        let bytes = body.into_bytes().to_vec();
        tracing::debug!(container, key, size = bytes.len(), "Downloaded object");
        Ok(bytes)
    }

    async fn put_object(&self, object: PutObject) -> Result<(), CloudError> {
        let PutObject {
            container,
            key,
            body,
            content_type,
            metadata,
        } = object;
        let size = body.len();

        let mut request = self
            .client
            .put_object()
            .bucket(&container)
            .key(&key)
            .body(ByteStream::from(body))
            .content_type(content_type);
        for (name, value) in metadata {
            request = request.metadata(name, value);
        }

        request.send().await.map_err(|e| CloudError::Write {
            container: container.clone(),
            key: key.clone(),
            message: DisplayErrorContext(&e).to_string(),
        })?;

        tracing::debug!(container = %container, key = %key, size, "Uploaded object");
        Ok(())
    }
}
