// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable storage for the access token.
//!
//! The session keeps exactly one credential on disk so it survives process
//! restarts. Storage is pluggable so embedders and tests can swap the file
//! for an in-memory slot.

use anyhow::Context;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// One durable slot holding the current access token.
///
/// Implementations are read and written by the session store only; nothing
/// else touches the slot directly.
pub trait TokenStore: Send + Sync {
    /// Read the stored token. Absent storage reads as `None`, not an error.
    fn load(&self) -> anyhow::Result<Option<String>>;

    /// Persist the token, replacing any previous value.
    fn store(&self, token: &str) -> anyhow::Result<()>;

    /// Remove the stored token. Clearing an empty slot is not an error.
    fn clear(&self) -> anyhow::Result<()>;
}

/// Token slot backed by a single file under the user config directory.
///
/// The file holds the raw token string. It is created with mode 600 on unix
/// since the token grants full API access.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store at the default location
    /// (`<config_dir>/issuehub/access_token`).
    pub fn new() -> anyhow::Result<Self> {
        let base = dirs::config_dir().context("could not determine user config directory")?;
        Ok(Self {
            path: base.join("issuehub").join("access_token"),
        })
    }

    /// Create a store at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> anyhow::Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read token file {}", self.path.display()))?;
        let token = content.trim();

        if token.is_empty() {
            Ok(None)
        } else {
            Ok(Some(token.to_string()))
        }
    }

    fn store(&self, token: &str) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        fs::write(&self.path, token)
            .with_context(|| format!("failed to write token file {}", self.path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .with_context(|| format!("failed to chmod {}", self.path.display()))?;
        }

        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("failed to remove {}", self.path.display()))
            }
        }
    }
}

/// In-process token slot for tests and embedders that manage persistence
/// themselves.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a token already present, as after a previous session.
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> anyhow::Result<Option<String>> {
        Ok(self.token.lock().unwrap().clone())
    }

    fn store(&self, token: &str) -> anyhow::Result<()> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}
