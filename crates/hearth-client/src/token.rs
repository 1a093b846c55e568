// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable storage for the bearer token.
//!
//! The token is the only client state that survives a restart. It lives in
//! a single file under the platform data directory (or wherever
//! `session.token_path` points), mode 0600 on unix.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use hearth_config::model::SessionConfig;
use hearth_core::HearthError;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// File-backed bearer token store.
pub struct TokenStore {
    path: PathBuf,
    cached: RwLock<Option<SecretString>>,
}

impl TokenStore {
    /// Opens the store at the configured location, reading any existing
    /// token into memory.
    pub fn from_config(config: &SessionConfig) -> Self {
        let path = config
            .token_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(default_token_path);
        Self::at(path)
    }

    /// Opens the store at an explicit path.
    pub fn at(path: PathBuf) -> Self {
        let cached = std::fs::read_to_string(&path)
            .ok()
            .map(|s| SecretString::from(s.trim().to_string()))
            .filter(|s| !s.expose_secret().is_empty());
        Self {
            path,
            cached: RwLock::new(cached),
        }
    }

    /// The currently stored token, if any.
    pub fn current(&self) -> Option<SecretString> {
        self.cached.read().expect("token lock poisoned").clone()
    }

    /// Persists a fresh token, replacing any previous one.
    pub fn save(&self, token: &str) -> Result<(), HearthError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| store_error(&self.path, e))?;
        }
        std::fs::write(&self.path, token).map_err(|e| store_error(&self.path, e))?;
        restrict_permissions(&self.path)?;
        *self.cached.write().expect("token lock poisoned") =
            Some(SecretString::from(token.to_string()));
        debug!(path = %self.path.display(), "bearer token persisted");
        Ok(())
    }

    /// Removes the stored token. Missing file is not an error.
    pub fn clear(&self) -> Result<(), HearthError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(store_error(&self.path, e)),
        }
        *self.cached.write().expect("token lock poisoned") = None;
        debug!(path = %self.path.display(), "bearer token cleared");
        Ok(())
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("path", &self.path)
            .field(
                "token",
                &self.current().as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

fn default_token_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hearth/token")
}

fn store_error(path: &Path, e: std::io::Error) -> HearthError {
    HearthError::Token {
        message: format!("cannot access token file {}", path.display()),
        source: Some(Box::new(e)),
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), HearthError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| store_error(path, e))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), HearthError> {
    Ok(())
}
