//! Driver error mapping

use mongodb::error::{Error, ErrorKind};
use mongorm::StoreError;

/// Translate a driver error into a store error
pub(crate) fn store_error(err: Error) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::Write(_) | ErrorKind::BulkWrite(_) => StoreError::Write(err.to_string()),
        ErrorKind::BsonSerialization(_) | ErrorKind::BsonDeserialization(_) => {
            StoreError::Serialization(err.to_string())
        }
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
            StoreError::Connection(err.to_string())
        }
        _ => StoreError::Query(err.to_string()),
    }
}
