//! Generic key/value storage primitive.
//!
//! The service layer treats storage as an external collaborator with three
//! operations and no cross-key transactions. Values are raw JSON so that
//! readers can apply structural validity checks and drop corrupt records
//! instead of failing the whole scan.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// Minimal key/value contract the persistence service is built on.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Writes a value, overwriting any existing value at `key`.
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Returns all `(key, value)` pairs whose key starts with `prefix`.
    ///
    /// Scan order is backend-defined but stable for a given backend.
    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<(String, Value)>, StoreError>;
}
