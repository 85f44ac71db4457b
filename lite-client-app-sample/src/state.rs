//! File-backed persistence of the lite client state.
//!
//! The whole mutable state (head + producer tables) is stored as one
//! borsh-serialized snapshot, rewritten after every accepted head. Blocks
//! that failed validation are kept on the side for later inspection.

use crate::error::{Error, ErrorKind};
use near_lite_client::near_types::LightClientBlockView;
use near_lite_client::PersistedState;
use std::fs;
use std::path::{Path, PathBuf};

const STATE_FILE_NAME: &str = "client_state";
const FAILED_HEAD_SUB_FOLDER: &str = "failed_head";

/// Store for the lite client state under a base folder.
pub struct ClientStateStore {
    base_folder: PathBuf,
}

impl ClientStateStore {
    pub fn new(base_folder: impl AsRef<Path>) -> Self {
        Self {
            base_folder: base_folder.as_ref().to_path_buf(),
        }
    }

    fn state_file(&self) -> PathBuf {
        self.base_folder.join(STATE_FILE_NAME)
    }

    /// Load the persisted state, or `None` when no snapshot exists yet.
    pub fn load_state(&self) -> Result<Option<PersistedState>, Error> {
        let state_file = self.state_file();
        if !state_file.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&state_file)?;
        let state = PersistedState::from_bytes(&bytes)
            .map_err(|err| ErrorKind::State.context(err))?;
        Ok(Some(state))
    }

    /// Rewrite the state snapshot.
    pub fn save_state(&self, state: &PersistedState) -> Result<(), Error> {
        fs::create_dir_all(&self.base_folder)?;
        fs::write(self.state_file(), state.to_bytes())?;
        Ok(())
    }

    /// Keep a block that failed validation, named by its height.
    pub fn save_failed_head(&self, head: &LightClientBlockView) -> Result<(), Error> {
        let folder = self.base_folder.join(FAILED_HEAD_SUB_FOLDER);
        fs::create_dir_all(&folder)?;
        let bytes = borsh::to_vec(head).map_err(|err| ErrorKind::State.context(err))?;
        fs::write(folder.join(head.inner_lite.height.to_string()), bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_snapshot_loads_as_none() {
        let store = ClientStateStore::new("./target/nonexistent-state-folder");
        assert!(store.load_state().unwrap().is_none());
    }
}
