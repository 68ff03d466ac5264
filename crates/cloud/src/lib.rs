//! Cloud provider seams for the thumbnail function.
//!
//! - [`ObjectStore`]: read source images, write thumbnails ([`S3ObjectStore`])
//! - [`Notifier`]: publish outcome messages ([`SnsNotifier`])
//!
//! Both traits are object safe so the pipeline can hold `Arc<dyn ...>` and
//! tests can substitute in-memory fakes.

pub mod error;
pub mod notify;
pub mod storage;

pub use error::CloudError;
pub use notify::{Notifier, SnsNotifier};
pub use storage::{ObjectStore, PutObject, S3ObjectStore};

/// Load the shared AWS configuration (region, credentials, endpoint) from
/// the environment.
pub async fn load_sdk_config() -> aws_config::SdkConfig {
    aws_config::load_from_env().await
}
