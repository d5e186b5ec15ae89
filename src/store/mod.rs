mod file;
mod memory;
pub(crate) use self::file::JsonFileStore;
pub(crate) use self::memory::MemoryStore;
use crate::calendar::DateKey;
use crate::grade::Grade;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A persistent string-to-string mapping.  Writes are durable by the time
/// they return.
pub(crate) trait KeyValueStore {
    fn get(&self, key: &str) -> Option<&str>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Reads and writes the grade for each day through a [`KeyValueStore`].
///
/// Nothing is cached here; every `get()` consults the backend.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GradeStore<B> {
    backend: B,
    prefix: String,
}

impl<B: KeyValueStore> GradeStore<B> {
    pub(crate) fn new(backend: B) -> GradeStore<B> {
        GradeStore {
            backend,
            prefix: String::new(),
        }
    }

    /// Prepend `prefix` to every key written to or read from the backend
    pub(crate) fn with_prefix<S: Into<String>>(mut self, prefix: S) -> GradeStore<B> {
        self.prefix = prefix.into();
        self
    }

    fn storage_key(&self, key: &DateKey) -> String {
        format!("{}{key}", self.prefix)
    }

    /// Returns the grade stored for the given day.  A stored value that is
    /// not a valid grade is treated as absent.
    pub(crate) fn get(&self, key: &DateKey) -> Option<Grade> {
        let skey = self.storage_key(key);
        let value = self.backend.get(&skey)?;
        match value.parse::<Grade>() {
            Ok(grade) => Some(grade),
            Err(_) => {
                log::warn!("Ignoring unrecognized grade {value:?} stored under {skey:?}");
                None
            }
        }
    }

    pub(crate) fn set(&mut self, key: &DateKey, grade: Grade) -> Result<(), StoreError> {
        let skey = self.storage_key(key);
        log::debug!("Setting grade for {skey:?} to {grade}");
        self.backend.set(&skey, &grade.to_string())
    }

    pub(crate) fn clear(&mut self, key: &DateKey) -> Result<(), StoreError> {
        let skey = self.storage_key(key);
        log::debug!("Clearing grade for {skey:?}");
        self.backend.remove(&skey)
    }

    /// Apply the raw value of a grade choice control: one of the six grade
    /// symbols sets that grade, anything else clears the day.  Returns the
    /// grade now in effect.
    pub(crate) fn apply_selection(
        &mut self,
        key: &DateKey,
        value: &str,
    ) -> Result<Option<Grade>, StoreError> {
        match Grade::from_selection(value) {
            Some(grade) => {
                self.set(key, grade)?;
                Ok(Some(grade))
            }
            None => {
                self.clear(key)?;
                Ok(None)
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub(crate) fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("failed to read grades file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse grades file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write grades file {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize grades")]
    Serialize(#[from] serde_json::Error),
}
