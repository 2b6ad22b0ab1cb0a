use crate::domain::{newest_first, StoreError};
use crate::ports::{EngineerDirectory, ScoreRepository};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Engineer, ObjectId, ScoreRecord};
use std::collections::HashMap;

/// In-memory engineer directory.
///
/// Seeded at startup (see [`crate::adapters::load_engineers`]) or by tests.
#[derive(Default)]
pub struct InMemoryEngineerDirectory {
    engineers: RwLock<HashMap<ObjectId, Engineer>>,
}

impl InMemoryEngineerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engineers(engineers: impl IntoIterator<Item = Engineer>) -> Self {
        let directory = Self::new();
        for engineer in engineers {
            directory.insert(engineer);
        }
        directory
    }

    /// Add or replace an engineer.
    pub fn insert(&self, engineer: Engineer) {
        self.engineers.write().insert(engineer.id, engineer);
    }

    pub fn len(&self) -> usize {
        self.engineers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.engineers.read().is_empty()
    }
}

#[async_trait]
impl EngineerDirectory for InMemoryEngineerDirectory {
    async fn find_engineer(&self, id: &ObjectId) -> Result<Option<Engineer>, StoreError> {
        Ok(self.engineers.read().get(id).cloned())
    }
}

/// In-memory, append-only score store.
#[derive(Default)]
pub struct InMemoryScoreRepository {
    records: RwLock<Vec<ScoreRecord>>,
}

impl InMemoryScoreRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted records; a repeated id is an error.
    pub(crate) fn from_records(records: Vec<ScoreRecord>) -> Result<Self, StoreError> {
        let repository = Self::new();
        for record in records {
            repository.append(record)?;
        }
        Ok(repository)
    }

    /// Total records across all engineers.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    pub(crate) fn contains(&self, id: &ObjectId) -> bool {
        self.records.read().iter().any(|r| &r.id == id)
    }

    pub(crate) fn append(&self, record: ScoreRecord) -> Result<(), StoreError> {
        let mut records = self.records.write();
        if records.iter().any(|r| r.id == record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }
        records.push(record);
        Ok(())
    }

    pub(crate) fn query(&self, engineer_id: &ObjectId, limit: usize) -> Vec<ScoreRecord> {
        newest_first(self.records.read().iter(), engineer_id, limit)
    }
}

#[async_trait]
impl ScoreRepository for InMemoryScoreRepository {
    async fn insert(&self, record: &ScoreRecord) -> Result<(), StoreError> {
        self.append(record.clone())
    }

    async fn find_by_engineer(
        &self,
        engineer_id: &ObjectId,
        limit: usize,
    ) -> Result<Vec<ScoreRecord>, StoreError> {
        Ok(self.query(engineer_id, limit))
    }
}
