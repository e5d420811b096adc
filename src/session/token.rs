//! Session Token Persistence
//!
//! Where the opaque session token survives between runs: a JSON file for the
//! terminal front end, `localStorage` in the browser, or plain memory.

use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors from a token store
#[derive(Error, Debug)]
pub enum TokenStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt token file: {0}")]
    Format(String),

    #[error("Token storage unavailable: {0}")]
    Unavailable(String),
}

/// Persistent slot for the session token
pub trait TokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError>;

    fn save(&self, token: &str) -> Result<(), TokenStoreError>;

    /// Remove the token; clearing an empty store is not an error
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// Token kept in memory only; clones share the same slot
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.into()))),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.slot().clone())
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.slot() = None;
        Ok(())
    }
}

#[cfg(feature = "client")]
pub use file::FileTokenStore;

#[cfg(feature = "client")]
mod file {
    use serde::{Deserialize, Serialize};
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use super::{TokenStore, TokenStoreError};

    #[derive(Serialize, Deserialize)]
    struct TokenFile {
        session_token: String,
    }

    /// Token stored as `{"session_token": "..."}` in a file readable only by
    /// the current user
    #[derive(Debug, Clone)]
    pub struct FileTokenStore {
        path: PathBuf,
    }

    impl FileTokenStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl TokenStore for FileTokenStore {
        fn load(&self) -> Result<Option<String>, TokenStoreError> {
            let content = match std::fs::read_to_string(&self.path) {
                Ok(content) => content,
                Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
                Err(e) => return Err(e.into()),
            };
            let file: TokenFile = serde_json::from_str(&content)
                .map_err(|e| TokenStoreError::Format(e.to_string()))?;
            Ok(Some(file.session_token).filter(|t| !t.is_empty()))
        }

        fn save(&self, token: &str) -> Result<(), TokenStoreError> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string(&TokenFile {
                session_token: token.to_string(),
            })
            .map_err(|e| TokenStoreError::Format(e.to_string()))?;
            std::fs::write(&self.path, content)?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
            }

            tracing::debug!(path = %self.path.display(), "session token saved");
            Ok(())
        }

        fn clear(&self) -> Result<(), TokenStoreError> {
            match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        }
    }
}
