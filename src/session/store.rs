use crate::core::error::SessionError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info};

/// On-disk layout of the session file: `{"token": "..."}`
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// Process-wide holder of the API bearer token.
///
/// A present, non-empty token means the dashboard is authenticated. When a
/// path is configured the token is mirrored to disk so it survives restarts;
/// the last writer wins.
pub struct SessionStore {
    path: Option<PathBuf>,
    token: RwLock<Option<String>>,
}

impl SessionStore {
    /// Session kept in memory only
    pub fn in_memory() -> Self {
        Self {
            path: None,
            token: RwLock::new(None),
        }
    }

    /// Open a file-backed session, loading a previously stored token if any
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();

        let token = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => None,
            Ok(content) => {
                let document: SessionDocument = serde_json::from_str(&content)?;
                document.token.filter(|t| !t.is_empty())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        debug!(
            path = %path.display(),
            restored = token.is_some(),
            "Session store opened"
        );

        Ok(Self {
            path: Some(path),
            token: RwLock::new(token),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_deref()
            .is_some_and(|t| !t.is_empty())
    }

    /// Replace the stored token
    pub fn store(&self, token: impl Into<String>) -> Result<(), SessionError> {
        let token = token.into();
        self.persist(Some(&token))?;

        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token);

        info!("Session token stored");
        Ok(())
    }

    /// Forget the stored token
    pub fn clear(&self) -> Result<(), SessionError> {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;

        self.persist(None)?;

        info!("Session token cleared");
        Ok(())
    }

    fn persist(&self, token: Option<&str>) -> Result<(), SessionError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let document = SessionDocument {
            token: token.map(str::to_string),
        };
        let content = serde_json::to_string(&document)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        // Write to a sibling file first so a crash never leaves half a token
        let tmp_path = path.with_extension("tmp");
        std::fs::write(&tmp_path, content)?;
        std::fs::rename(&tmp_path, path)?;

        Ok(())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}
