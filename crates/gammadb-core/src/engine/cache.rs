use super::config::CacheBackend;
use crate::core::models::structural::{ComparisonKey, StructuralComparisonResult};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Persisted layout: subunit name → lowercased species → result.
pub type CacheDocument = BTreeMap<String, BTreeMap<String, StructuralComparisonResult>>;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O error at {path}: {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cache document at {path} is corrupt: {source}", path = path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize cache document: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Cache lock was poisoned")]
    Poisoned,
}

/// Storage for structural comparison results keyed by (subunit, species).
///
/// Holds at most one result per key; `put` overwrites.
pub trait ComparisonCache: Send + Sync {
    fn get(&self, key: &ComparisonKey) -> Result<Option<StructuralComparisonResult>, CacheError>;

    fn put(&self, key: &ComparisonKey, result: &StructuralComparisonResult) -> Result<(), CacheError>;

    /// Every stored entry, ordered by subunit then species.
    fn entries(&self) -> Result<Vec<(ComparisonKey, StructuralComparisonResult)>, CacheError>;
}

fn flatten(document: &CacheDocument) -> Vec<(ComparisonKey, StructuralComparisonResult)> {
    document
        .iter()
        .flat_map(|(subunit, by_species)| {
            by_species
                .iter()
                .map(move |(species, result)| (ComparisonKey::new(subunit.clone(), species), result.clone()))
        })
        .collect()
}

/// A JSON document on disk, rewritten wholesale through a temporary file in
/// the same directory and renamed over the existing file.
#[derive(Debug)]
pub struct JsonFileCache {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> CacheError {
        CacheError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_document(&self) -> Result<CacheDocument, CacheError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(CacheDocument::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if content.trim().is_empty() {
            return Ok(CacheDocument::new());
        }
        serde_json::from_str(&content).map_err(|source| CacheError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_document(&self, document: &CacheDocument) -> Result<(), CacheError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| self.io_error(e))?;

        let mut file = NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        serde_json::to_writer_pretty(&mut file, document).map_err(CacheError::Serialize)?;
        file.write_all(b"\n").map_err(|e| self.io_error(e))?;
        file.as_file().sync_all().map_err(|e| self.io_error(e))?;
        file.persist(&self.path).map_err(|e| self.io_error(e.error))?;
        Ok(())
    }
}

impl ComparisonCache for JsonFileCache {
    fn get(&self, key: &ComparisonKey) -> Result<Option<StructuralComparisonResult>, CacheError> {
        let document = self.read_document()?;
        Ok(document
            .get(key.subunit())
            .and_then(|by_species| by_species.get(key.species()))
            .cloned())
    }

    fn put(&self, key: &ComparisonKey, result: &StructuralComparisonResult) -> Result<(), CacheError> {
        let _guard = self.write_lock.lock().map_err(|_| CacheError::Poisoned)?;
        // A corrupt document is reported rather than replaced, so existing
        // entries are never silently discarded.
        let mut document = self.read_document()?;
        document
            .entry(key.subunit().to_string())
            .or_default()
            .insert(key.species().to_string(), result.clone());
        self.write_document(&document)?;
        debug!(%key, path = ?self.path, "Cached structural comparison.");
        Ok(())
    }

    fn entries(&self) -> Result<Vec<(ComparisonKey, StructuralComparisonResult)>, CacheError> {
        Ok(flatten(&self.read_document()?))
    }
}

#[derive(Debug, Default)]
pub struct MemoryCache {
    data: RwLock<HashMap<String, HashMap<String, StructuralComparisonResult>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ComparisonCache for MemoryCache {
    fn get(&self, key: &ComparisonKey) -> Result<Option<StructuralComparisonResult>, CacheError> {
        let data = self.data.read().map_err(|_| CacheError::Poisoned)?;
        Ok(data
            .get(key.subunit())
            .and_then(|by_species| by_species.get(key.species()))
            .cloned())
    }

    fn put(&self, key: &ComparisonKey, result: &StructuralComparisonResult) -> Result<(), CacheError> {
        let mut data = self.data.write().map_err(|_| CacheError::Poisoned)?;
        data.entry(key.subunit().to_string())
            .or_default()
            .insert(key.species().to_string(), result.clone());
        Ok(())
    }

    fn entries(&self) -> Result<Vec<(ComparisonKey, StructuralComparisonResult)>, CacheError> {
        let data = self.data.read().map_err(|_| CacheError::Poisoned)?;
        let document: CacheDocument = data
            .iter()
            .map(|(subunit, by_species)| {
                let ordered = by_species
                    .iter()
                    .map(|(species, result)| (species.clone(), result.clone()))
                    .collect();
                (subunit.clone(), ordered)
            })
            .collect();
        Ok(flatten(&document))
    }
}

/// The cache selected by [`CacheBackend`].
#[derive(Debug)]
pub enum CacheStore {
    File(JsonFileCache),
    Memory(MemoryCache),
}

impl CacheStore {
    pub fn open(backend: &CacheBackend) -> Self {
        match backend {
            CacheBackend::File(path) => CacheStore::File(JsonFileCache::new(path.clone())),
            CacheBackend::Memory => CacheStore::Memory(MemoryCache::new()),
        }
    }
}

impl ComparisonCache for CacheStore {
    fn get(&self, key: &ComparisonKey) -> Result<Option<StructuralComparisonResult>, CacheError> {
        match self {
            CacheStore::File(cache) => cache.get(key),
            CacheStore::Memory(cache) => cache.get(key),
        }
    }

    fn put(&self, key: &ComparisonKey, result: &StructuralComparisonResult) -> Result<(), CacheError> {
        match self {
            CacheStore::File(cache) => cache.put(key, result),
            CacheStore::Memory(cache) => cache.put(key, result),
        }
    }

    fn entries(&self) -> Result<Vec<(ComparisonKey, StructuralComparisonResult)>, CacheError> {
        match self {
            CacheStore::File(cache) => cache.entries(),
            CacheStore::Memory(cache) => cache.entries(),
        }
    }
}
