use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use critique_core::{StateKey, StateStore, StoreError};
use critique_logging::critique_debug;

use crate::persist::{ensure_dir, AtomicFileWriter, PersistError};

/// [`StateStore`] keeping one `{key}.json` file per slot in a directory.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    writer: AtomicFileWriter,
}

impl FileStateStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self {
            writer: AtomicFileWriter::new(dir),
        })
    }

    pub fn dir(&self) -> &Path {
        self.writer.dir()
    }

    pub fn path_for(&self, key: StateKey) -> PathBuf {
        self.dir().join(file_name(key))
    }
}

fn file_name(key: StateKey) -> String {
    format!("{}.json", key.as_str())
}

impl StateStore for FileStateStore {
    fn get(&self, key: StateKey) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.as_str(),
                source,
            }),
        }
    }

    fn set(&self, key: StateKey, value: &str) -> Result<(), StoreError> {
        let path = self
            .writer
            .write(&file_name(key), value.as_bytes())
            .map_err(|err| StoreError::Io {
                key: key.as_str(),
                source: err.into_io(),
            })?;
        critique_debug!("Persisted {} to {:?}", key.as_str(), path);
        Ok(())
    }
}
