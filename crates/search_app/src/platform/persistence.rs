use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use engine_logging::engine_info;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

const STATE_FILENAME: &str = ".search_state.ron";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] ron::Error),
    #[error("failed to parse state: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedState {
    last_term: String,
    saved_at: String,
}

pub(crate) fn state_path(state_dir: &Path) -> PathBuf {
    state_dir.join(STATE_FILENAME)
}

/// Reads the last submitted term. A missing state file yields `Ok(None)`.
pub(crate) fn load_last_term(state_dir: &Path) -> Result<Option<String>, PersistError> {
    let path = state_path(state_dir);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    let state: PersistedState = ron::from_str(&content)?;
    engine_info!(
        "Restored last search term from {:?} (saved {})",
        path,
        state.saved_at
    );
    Ok(Some(state.last_term))
}

/// Atomically writes the last submitted term: temp file in the same
/// directory, then rename over the target.
pub(crate) fn save_last_term(state_dir: &Path, term: &str) -> Result<PathBuf, PersistError> {
    fs::create_dir_all(state_dir)?;

    let state = PersistedState {
        last_term: term.to_string(),
        saved_at: Utc::now().to_rfc3339(),
    };
    let content = ron::ser::to_string_pretty(&state, ron::ser::PrettyConfig::new())?;

    let target = state_path(state_dir);
    let mut tmp = NamedTempFile::new_in(state_dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
    Ok(target)
}
