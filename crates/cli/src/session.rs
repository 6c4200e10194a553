//! Doctor sign-in session cache.
//!
//! The identity provider's contribution to this system is just a display name; the client
//! keeps it in an explicit session object rather than ambient global state. The session is
//! created on sign-in, cleared on sign-out, and cached in a local JSON file so it survives
//! between invocations — the file is a cache, not a source of authority.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// A signed-in doctor's session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub display_name: String,
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            signed_in_at: Utc::now(),
        }
    }
}

/// The on-disk session cache.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// Cache at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolves the cache location: `DOCSYS_SESSION_FILE` if set, otherwise
    /// `$HOME/.docsys/session.json`.
    pub fn from_env() -> Self {
        if let Ok(path) = std::env::var("DOCSYS_SESSION_FILE") {
            return Self::at(path);
        }
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        Self::at(Path::new(&home).join(".docsys").join("session.json"))
    }

    /// Loads the cached session, if any.
    ///
    /// A missing or unreadable cache file means no session; a corrupt cache is treated the
    /// same way rather than failing the command.
    pub fn load(&self) -> Option<Session> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Persists the session to the cache file, creating parent directories as needed.
    pub fn save(&self, session: &Session) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(session)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(&self.path, contents)
    }

    /// Clears the cached session. Clearing an absent session is not an error.
    pub fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
