use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::error::LoadError;
use super::loader::load_file;
use super::model::GameTable;

/// Identity of a source file on disk: a change in any field means the
/// cached table is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceKey {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl SourceKey {
    /// Read the current identity of `path` from file metadata.
    pub fn probe(path: &Path) -> Result<Self, LoadError> {
        let meta = std::fs::metadata(path).map_err(|e| LoadError::io(path, e))?;
        Ok(SourceKey {
            path: path.to_path_buf(),
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

/// Loaded base tables, keyed by source identity.
///
/// Owned by whoever drives the pipeline and passed in explicitly. Entries
/// are replaced whole; a failed reload drops the stale entry.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, (SourceKey, Arc<GameTable>)>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `path`, loading it when absent or when
    /// the file changed since it was cached.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<GameTable>, LoadError> {
        let key = SourceKey::probe(path)?;

        if let Some((cached_key, table)) = self.entries.get(path) {
            if *cached_key == key {
                log::debug!("cache hit for {}", path.display());
                return Ok(Arc::clone(table));
            }
            log::debug!("{} changed on disk, reloading", path.display());
        } else {
            log::debug!("cache miss for {}", path.display());
        }

        self.entries.remove(path);
        let table = Arc::new(load_file(path)?);
        self.entries
            .insert(path.to_path_buf(), (key, Arc::clone(&table)));
        Ok(table)
    }

    /// Forget the entry for `path`; the next lookup reloads it.
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str = "name,release_date,price,positive_ratings,negative_ratings,owners,genres,platforms,publisher,average_playtime,achievements";

    fn write_catalog(path: &Path, rows: &[&str]) {
        let mut file = std::fs::File::create(path).unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
    }

    #[test]
    fn unchanged_file_is_served_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.csv");
        write_catalog(&path, &["A,2015-01-01,0,1,1,100,Action,windows,P,1,0"]);

        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn changed_file_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.csv");
        write_catalog(&path, &["A,2015-01-01,0,1,1,100,Action,windows,P,1,0"]);

        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(&path).unwrap();
        assert_eq!(first.len(), 1);

        // a different size changes the key even when mtime resolution is coarse
        write_catalog(
            &path,
            &[
                "A,2015-01-01,0,1,1,100,Action,windows,P,1,0",
                "B,2016-01-01,5,1,1,100,RPG,mac,P,1,0",
            ],
        );
        let second = cache.get_or_load(&path).unwrap();
        assert_eq!(second.len(), 2);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn invalidate_forces_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.csv");
        write_catalog(&path, &["A,2015-01-01,0,1,1,100,Action,windows,P,1,0"]);

        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(&path).unwrap();
        cache.invalidate(&path);
        assert!(!cache.contains(&path));
        let second = cache.get_or_load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[test]
    fn failed_reload_leaves_no_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.csv");
        write_catalog(&path, &["A,2015-01-01,0,1,1,100,Action,windows,P,1,0"]);

        let mut cache = DatasetCache::new();
        cache.get_or_load(&path).unwrap();

        write_catalog(&path, &["A,garbage-date,0,1,1,100,Action,windows,P,1,0"]);
        assert!(matches!(
            cache.get_or_load(&path),
            Err(LoadError::InvalidDate { .. })
        ));
        assert!(cache.is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut cache = DatasetCache::new();
        let err = cache.get_or_load(Path::new("/no/such/catalog.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
