use std::{
    io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{Role, Store, User, UserId};

/// Id recorded for a login whose email matches no known user.
const GUEST_ID: &str = "1";

/// Name recorded for a login whose email matches no known user.
const GUEST_NAME: &str = "Admin User";

/// The logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Who is logged in.
    pub user: User,
}

impl Session {
    /// Logs in by email.
    ///
    /// There is no authentication. A user in the store with a matching email
    /// (ignoring case) is logged in as themselves; any other address is logged
    /// in as an administrator.
    #[must_use]
    pub fn login(store: &Store, email: &str) -> Self {
        let user = store.user_by_email(email).cloned().unwrap_or_else(|| {
            tracing::debug!(email, "no user with this email, logging in as admin");
            User {
                id: UserId::new(GUEST_ID),
                name: GUEST_NAME.to_string(),
                email: email.trim().to_string(),
                role: Role::Admin,
            }
        });
        Self { user }
    }

    /// Path of the session file under `root`.
    #[must_use]
    pub fn path(root: &Path) -> PathBuf {
        super::workspace_dir(root).join("session.json")
    }

    /// Reads the session stored under `root`, if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Option<Self>, SessionError> {
        let path = Self::path(root);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionError::Io(e)),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Writes the session under `root`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the workspace directory or the file cannot be
    /// written.
    pub fn save(&self, root: &Path) -> Result<(), SessionError> {
        let path = Self::path(root);
        std::fs::create_dir_all(super::workspace_dir(root))?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        tracing::debug!("Saved session to {}", path.display());
        Ok(())
    }

    /// Removes the session stored under `root`.
    ///
    /// Returns `false` if there was no session to remove.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(root: &Path) -> Result<bool, SessionError> {
        match std::fs::remove_file(Self::path(root)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SessionError::Io(e)),
        }
    }
}

/// Errors reading or writing the session file.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The file could not be read or written.
    #[error("failed to access session file: {0}")]
    Io(#[from] io::Error),

    /// The file does not hold a valid session.
    #[error("failed to parse session file: {0}")]
    Json(#[from] serde_json::Error),
}
