//! JSON file store

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use directories::ProjectDirs;
use tracing::debug;

use super::{StoreError, StoredDay, TimeStore};

const STATE_FILE_NAME: &str = "today.json";

/// Persists the day record as a small JSON document
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Platform data directory, or the working directory when none can be resolved
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "time-timer")
            .map(|dirs| dirs.data_local_dir().join(STATE_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(STATE_FILE_NAME))
    }
}

impl TimeStore for FileStore {
    fn load(&self) -> Result<StoredDay, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No state file at {}, starting empty", self.path.display());
                return Ok(StoredDay::default());
            }
            Err(e) => return Err(e.into()),
        };

        let day: StoredDay = serde_json::from_slice(&bytes)?;
        day.validate()
    }

    fn save(&mut self, day: &StoredDay) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write beside the target and rename so a crash never leaves half a file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(day)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!("Saved {:.1}s to {}", day.cumulative_time_today, self.path.display());
        Ok(())
    }
}
