//! # File-backed Stores
//!
//! - Engineers: a JSON array loaded once at startup.
//! - Scores: an append-only JSON-lines log, one record per line, synced to
//!   disk before the insert returns. The log is replayed into memory on open.
//!
//! A failed append truncates the log back to its previous length, so an
//! insert either lands whole or not at all. A torn, unterminated final line
//! left by a crash mid-write is dropped on open.

use crate::adapters::memory::InMemoryScoreRepository;
use crate::domain::StoreError;
use crate::ports::ScoreRepository;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{Engineer, ObjectId, ScoreRecord};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Read a JSON array of engineer documents.
pub fn load_engineers(path: &Path) -> Result<Vec<Engineer>, StoreError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| StoreError::Io(format!("{}: {}", path.display(), e)))?;
    let engineers: Vec<Engineer> = serde_json::from_str(&contents)
        .map_err(|e| StoreError::Serialization(format!("{}: {}", path.display(), e)))?;
    info!(
        count = engineers.len(),
        path = %path.display(),
        "[sx-03] Loaded engineer directory"
    );
    Ok(engineers)
}

/// Append-only score log on disk.
pub struct FileScoreRepository {
    path: PathBuf,
    index: InMemoryScoreRepository,
    file: Arc<Mutex<File>>,
    /// Serializes inserts so the duplicate check and the append are one step.
    insert_lock: tokio::sync::Mutex<()>,
}

impl FileScoreRepository {
    /// Open (or create) the log at `path` and replay existing records.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let records = if path.exists() {
            Self::recover(&path)?
        } else {
            Vec::new()
        };
        let count = records.len();
        let index = InMemoryScoreRepository::from_records(records)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StoreError::Io(format!("{}: {}", path.display(), e)))?;

        info!(records = count, path = %path.display(), "[sx-03] Opened score log");

        Ok(Self {
            path,
            index,
            file: Arc::new(Mutex::new(file)),
            insert_lock: tokio::sync::Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Replay the log, cutting off a torn final line first.
    fn recover(path: &Path) -> Result<Vec<ScoreRecord>, StoreError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| StoreError::Io(format!("{}: {}", path.display(), e)))?;

        let complete = contents.rfind('\n').map_or(0, |i| i + 1);
        if complete < contents.len() {
            warn!(
                path = %path.display(),
                dropped_bytes = contents.len() - complete,
                "[sx-03] Dropping unterminated tail of score log"
            );
            OpenOptions::new()
                .write(true)
                .open(path)
                .and_then(|file| {
                    file.set_len(complete as u64)?;
                    file.sync_data()
                })
                .map_err(|e| StoreError::Io(format!("{}: {}", path.display(), e)))?;
        }

        Self::replay(&contents[..complete])
    }

    fn replay(contents: &str) -> Result<Vec<ScoreRecord>, StoreError> {
        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|e| StoreError::Corrupt {
                    line: i + 1,
                    reason: e.to_string(),
                })
            })
            .collect()
    }
}

/// Append `line` and sync; on failure cut the file back to where it was.
fn append_whole(file: &mut File, line: &[u8]) -> std::io::Result<()> {
    let previous = file.metadata()?.len();
    let result = file.write_all(line).and_then(|()| file.sync_data());
    if let Err(e) = result {
        if let Err(rollback) = file.set_len(previous).and_then(|()| file.sync_data()) {
            warn!(error = %rollback, "[sx-03] Could not roll back partial append");
        }
        return Err(e);
    }
    Ok(())
}

#[async_trait]
impl ScoreRepository for FileScoreRepository {
    async fn insert(&self, record: &ScoreRecord) -> Result<(), StoreError> {
        let _guard = self.insert_lock.lock().await;
        if self.index.contains(&record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }

        let mut line =
            serde_json::to_vec(record).map_err(|e| StoreError::Serialization(e.to_string()))?;
        line.push(b'\n');

        let file = Arc::clone(&self.file);
        tokio::task::spawn_blocking(move || append_whole(&mut file.lock(), &line))
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?
            .map_err(|e| StoreError::Io(e.to_string()))?;

        self.index.append(record.clone())
    }

    async fn find_by_engineer(
        &self,
        engineer_id: &ObjectId,
        limit: usize,
    ) -> Result<Vec<ScoreRecord>, StoreError> {
        Ok(self.index.query(engineer_id, limit))
    }
}
