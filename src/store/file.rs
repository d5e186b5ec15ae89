use super::{KeyValueStore, StoreError};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A [`KeyValueStore`] kept in a JSON object on disk.
///
/// The whole file is loaded when opened.  Every `set()` and `remove()`
/// rewrites the file (via a temporary file that is renamed into place) before
/// returning; if the write fails, the in-memory contents are rolled back so
/// that they always match what is on disk.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct JsonFileStore {
    path: PathBuf,
    data: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`.  A nonexistent or empty file is treated as
    /// an empty store; the file is not created until the first write.
    pub(crate) fn open<P: AsRef<Path>>(path: P) -> Result<JsonFileStore, StoreError> {
        let path = path.as_ref().to_path_buf();
        let data = match fs::read_to_string(&path) {
            Ok(s) if s.trim().is_empty() => BTreeMap::new(),
            Ok(s) => match serde_json::from_str(&s) {
                Ok(data) => data,
                Err(source) => return Err(StoreError::Parse { path, source }),
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        log::info!(
            "Loaded {} stored value(s) from {}",
            data.len(),
            path.display()
        );
        Ok(JsonFileStore { path, data })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), StoreError> {
        let mut content = serde_json::to_string_pretty(&self.data)?;
        content.push('\n');
        let tmp = self.temp_path();
        let write = || -> io::Result<()> {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&tmp, content.as_bytes())?;
            fs::rename(&tmp, &self.path)
        };
        write().map_err(|source| {
            // Don't leave a stray temporary file behind
            let _ = fs::remove_file(&tmp);
            StoreError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(ToOwned::to_owned)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let old = self.data.insert(key.to_owned(), value.to_owned());
        if let Err(e) = self.save() {
            match old {
                Some(v) => self.data.insert(key.to_owned(), v),
                None => self.data.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let Some(old) = self.data.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.save() {
            self.data.insert(key.to_owned(), old);
            return Err(e);
        }
        Ok(())
    }
}
