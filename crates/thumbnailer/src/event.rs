//! Parsing of storage "object created" event batches.
//!
//! Only the fields the pipeline needs are read:
//! `Records[].s3.bucket.name` and `Records[].s3.object.key`.

use serde_json::Value;

use crate::error::BatchError;

/// A stored object named by container (bucket) and key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub container: String,
    pub key: String,
}

impl ObjectRef {
    pub fn new(container: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            key: key.into(),
        }
    }
}

/// Extract every record of a batch. The whole batch is rejected if any
/// record lacks its bucket name or object key.
pub fn parse_batch(event: &Value) -> Result<Vec<ObjectRef>, BatchError> {
    let event = event.as_object().ok_or(BatchError::NotAnObject)?;
    let records = event
        .get("Records")
        .and_then(Value::as_array)
        .ok_or(BatchError::MissingRecords)?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let s3 = &record["s3"];
            let container = s3["bucket"]["name"]
                .as_str()
                .ok_or(BatchError::MissingField {
                    index,
                    field: "s3.bucket.name",
                })?;
            let key = s3["object"]["key"]
                .as_str()
                .ok_or(BatchError::MissingField {
                    index,
                    field: "s3.object.key",
                })?;
            Ok(ObjectRef::new(container, key))
        })
        .collect()
}
