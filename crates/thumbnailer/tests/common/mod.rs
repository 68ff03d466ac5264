//! In-memory fakes for the storage and notification seams, plus helpers to
//! build event payloads and source images.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use pinboard_cloud::{CloudError, Notifier, ObjectStore, PutObject};
use pinboard_thumbnailer::{ThumbnailPipeline, ThumbnailerConfig};
use serde_json::{json, Value};

pub const SOURCE_BUCKET: &str = "uploads";
pub const OUTPUT_BUCKET: &str = "thumbs";
pub const TOPIC: &str = "arn:aws:sns:us-east-1:123456789012:image-events";

// ---------------------------------------------------------------------------
// Object store fake
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<(String, String), PutObject>>,
    reads: Mutex<Vec<String>>,
    failing_puts: Mutex<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, container: &str, key: &str, body: Vec<u8>) {
        let object = PutObject {
            container: container.to_string(),
            key: key.to_string(),
            body,
            content_type: "application/octet-stream".to_string(),
            metadata: BTreeMap::new(),
        };
        self.objects
            .lock()
            .unwrap()
            .insert((container.to_string(), key.to_string()), object);
    }

    /// Make every upload to `key` fail.
    pub fn fail_put(&self, key: &str) {
        self.failing_puts.lock().unwrap().insert(key.to_string());
    }

    pub fn get(&self, container: &str, key: &str) -> Option<PutObject> {
        self.objects
            .lock()
            .unwrap()
            .get(&(container.to_string(), key.to_string()))
            .cloned()
    }

    /// Keys stored in `container`, sorted.
    pub fn keys(&self, container: &str) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .keys()
            .filter(|(c, _)| c == container)
            .map(|(_, k)| k.clone())
            .collect()
    }

    /// Keys passed to `get_object`, in call order.
    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get_object(&self, container: &str, key: &str) -> Result<Vec<u8>, CloudError> {
        self.reads.lock().unwrap().push(key.to_string());
        self.get(container, key)
            .map(|o| o.body)
            .ok_or_else(|| CloudError::Read {
                container: container.to_string(),
                key: key.to_string(),
                message: "NoSuchKey".to_string(),
            })
    }

    async fn put_object(&self, object: PutObject) -> Result<(), CloudError> {
        if self.failing_puts.lock().unwrap().contains(&object.key) {
            return Err(CloudError::Write {
                container: object.container,
                key: object.key,
                message: "AccessDenied".to_string(),
            });
        }
        self.objects
            .lock()
            .unwrap()
            .insert((object.container.clone(), object.key.clone()), object);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Notifier fake
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Published {
    pub topic: String,
    pub subject: String,
    pub message: Value,
}

#[derive(Default)]
pub struct RecordingNotifier {
    published: Mutex<Vec<Published>>,
    attempts: Mutex<usize>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A notifier whose every publish fails.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    pub fn published(&self) -> Vec<Published> {
        self.published.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(
        &self,
        topic: &str,
        subject: &str,
        message: &str,
    ) -> Result<Option<String>, CloudError> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            *attempts += 1;
            *attempts
        };
        if self.fail {
            return Err(CloudError::Publish {
                topic: topic.to_string(),
                message: "Throttling".to_string(),
            });
        }
        self.published.lock().unwrap().push(Published {
            topic: topic.to_string(),
            subject: subject.to_string(),
            message: serde_json::from_str(message).expect("notification is JSON"),
        });
        Ok(Some(format!("msg-{attempt}")))
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn config() -> ThumbnailerConfig {
    ThumbnailerConfig::from_values(Some(OUTPUT_BUCKET.into()), Some(TOPIC.into()), None)
        .expect("default config")
}

pub fn pipeline(
    config: ThumbnailerConfig,
    store: &Arc<MemoryStore>,
    notifier: &Arc<RecordingNotifier>,
) -> ThumbnailPipeline {
    ThumbnailPipeline::new(config, store.clone(), notifier.clone())
}

/// S3-style event batch for `keys` in [`SOURCE_BUCKET`].
pub fn event(keys: &[&str]) -> Value {
    let records: Vec<Value> = keys
        .iter()
        .map(|key| {
            json!({
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "bucket": { "name": SOURCE_BUCKET },
                    "object": { "key": key }
                }
            })
        })
        .collect();
    json!({ "Records": records })
}

/// Encode an opaque RGB gradient of the given size.
pub fn rgb_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    encode(DynamicImage::ImageRgb8(image), format)
}

/// Encode a half-transparent RGBA PNG.
pub fn rgba_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |x, _| Rgba([200, (x % 256) as u8, 10, 127]));
    encode(DynamicImage::ImageRgba8(image), ImageFormat::Png)
}

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, format).expect("encode test image");
    bytes.into_inner()
}

/// Decode an uploaded thumbnail and return its pixel size.
pub fn decoded_size(bytes: &[u8]) -> (u32, u32) {
    let image = image::load_from_memory(bytes).expect("thumbnail decodes");
    (image.width(), image.height())
}
