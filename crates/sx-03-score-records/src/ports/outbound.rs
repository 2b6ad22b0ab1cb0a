//! # Outbound Ports
//!
//! Storage the Score Records service depends on.
//!
//! Production: JSON seed file + JSON-lines score log (`adapters/file.rs`)
//! Testing: in-memory stores (`adapters/memory.rs`)

use crate::domain::StoreError;
use async_trait::async_trait;
use shared_types::{Engineer, ObjectId, ScoreRecord};

/// Read access to engineer documents.
#[async_trait]
pub trait EngineerDirectory: Send + Sync {
    async fn find_engineer(&self, id: &ObjectId) -> Result<Option<Engineer>, StoreError>;
}

/// Append-only score record storage.
///
/// Records are never updated or deleted once inserted.
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Insert a new record. Fails with [`StoreError::DuplicateId`] if the id exists.
    async fn insert(&self, record: &ScoreRecord) -> Result<(), StoreError>;

    /// Records for one engineer, newest first (`last_updated`, then id), at most `limit`.
    async fn find_by_engineer(
        &self,
        engineer_id: &ObjectId,
        limit: usize,
    ) -> Result<Vec<ScoreRecord>, StoreError>;
}
