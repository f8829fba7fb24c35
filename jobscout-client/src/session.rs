//! Session storage
//!
//! The session store is the single owner of the authenticated identity.
//! Every component reads it; only the auth gateway (login, register,
//! logout) and the HTTP client (on 401) write it, and every write replaces
//! or clears the whole session at once.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use jobscout_core::domain::session::Session;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::StoreError;

/// Holder of the current session
///
/// Implementations must make `save` and `clear` all-or-nothing so that a
/// concurrent `read` never observes half a session.
pub trait SessionStore: Send + Sync {
    /// Replaces the stored session
    ///
    /// Fails with `StoreError::Malformed` if either token is empty.
    fn save(&self, session: &Session) -> Result<(), StoreError>;

    /// Returns the stored session, if any
    fn read(&self) -> Option<Session>;

    /// Removes the stored session
    fn clear(&self) -> Result<(), StoreError>;

    fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// False when nobody is logged in
    fn is_admin(&self) -> bool {
        self.read().is_some_and(|session| session.is_admin())
    }

    fn refresh_token(&self) -> Option<String> {
        self.read().map(|session| session.refresh_token)
    }
}

/// In-memory store for tests and short-lived processes
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that starts out logged in
    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &Session) -> Result<(), StoreError> {
        session.validate()?;
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn read(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Store persisted as a JSON document on disk
///
/// The document holds the `access_token`, `refresh_token` and `user`
/// entries. It is written to a temp file next to the target and renamed
/// into place, so the three entries always change together. The session is
/// cached in memory after `open`; the file is only read once.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    cached: RwLock<Option<Session>>,
}

impl FileSessionStore {
    /// Opens the store, loading any session left by a previous run
    ///
    /// A missing file means "logged out". An unreadable or incomplete
    /// document is ignored with a warning rather than failing startup.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let cached = match fs::read_to_string(&path) {
            Ok(content) => Self::decode(&path, &content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        debug!(
            "Opened session store at {} (logged in: {})",
            path.display(),
            cached.is_some()
        );

        Ok(Self {
            path,
            cached: RwLock::new(cached),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn decode(path: &Path, content: &str) -> Option<Session> {
        let session = match serde_json::from_str::<Session>(content) {
            Ok(session) => session,
            Err(e) => {
                warn!("Ignoring unreadable session file {}: {}", path.display(), e);
                return None;
            }
        };
        match session.validate() {
            Ok(()) => Some(session),
            Err(e) => {
                warn!("Ignoring session file {}: {}", path.display(), e);
                None
            }
        }
    }

    fn write_atomically(&self, content: &str) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o600))?;
        }

        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, session: &Session) -> Result<(), StoreError> {
        session.validate()?;
        let content = serde_json::to_string_pretty(session)?;

        let mut cached = self.cached.write().unwrap_or_else(PoisonError::into_inner);
        self.write_atomically(&content)?;
        *cached = Some(session.clone());

        debug!("Saved session for {}", session.user.username);
        Ok(())
    }

    fn read(&self) -> Option<Session> {
        self.cached
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut cached = self.cached.write().unwrap_or_else(PoisonError::into_inner);
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        *cached = None;

        debug!("Cleared session at {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobscout_core::domain::user::{Role, User};

    fn session(role: Role) -> Session {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            role,
            email: Some("alice@example.com".to_string()),
            first_name: None,
            last_name: None,
            phone: None,
        };
        Session::new("access-1", "refresh-1", user).unwrap()
    }

    #[test]
    fn test_memory_store_lifecycle() {
        let store = MemorySessionStore::new();
        assert!(!store.is_authenticated());
        assert!(!store.is_admin());

        store.save(&session(Role::Admin)).unwrap();
        assert!(store.is_authenticated());
        assert!(store.is_admin());
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));

        store.clear().unwrap();
        assert!(store.read().is_none());
        assert!(!store.is_admin());
    }

    #[test]
    fn test_memory_store_rejects_malformed_session() {
        let store = MemorySessionStore::new();
        let mut bad = session(Role::JobSeeker);
        bad.refresh_token.clear();

        assert!(matches!(store.save(&bad), Err(StoreError::Malformed(_))));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileSessionStore::open(&path).unwrap();
        assert!(store.read().is_none());
        store.save(&session(Role::JobSeeker)).unwrap();

        let reopened = FileSessionStore::open(&path).unwrap();
        assert_eq!(reopened.read(), Some(session(Role::JobSeeker)));
        assert!(!reopened.is_admin());
    }

    #[test]
    fn test_file_store_writes_three_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::open(&path).unwrap();
        store.save(&session(Role::Admin)).unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let keys: Vec<_> = doc.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        assert_eq!(doc["access_token"], "access-1");
        assert_eq!(doc["refresh_token"], "refresh-1");
        assert_eq!(doc["user"]["role"], "admin");
    }

    #[test]
    fn test_file_store_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::open(&path).unwrap();
        store.save(&session(Role::Admin)).unwrap();

        store.clear().unwrap();
        assert!(!path.exists());
        assert!(!store.is_authenticated());

        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_partial_file_reads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"access_token": "A", "user": null}"#).unwrap();

        let store = FileSessionStore::open(&path).unwrap();
        assert!(store.read().is_none());
    }
}
