//! Durable storage for the single bearer token.
//!
//! Every backend is a pass-through: no caching, no expiry tracking. Storage
//! failures are logged and read back as "no token".

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use keyring::Entry;
use tracing::{debug, warn};

const KEYRING_SERVICE: &str = "quizdesk";
const KEYRING_USER: &str = "session-token";

/// Token file name in the data directory
const TOKEN_FILE: &str = "token";

pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);
}

/// Plain-text token file.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(TOKEN_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read token file");
                None
            }
        }
    }

    fn set(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(error = %e, "Failed to create data directory for token");
                return;
            }
        }
        if let Err(e) = std::fs::write(&self.path, token) {
            warn!(path = %self.path.display(), error = %e, "Failed to write token file");
            return;
        }
        restrict_permissions(&self.path);
        debug!("Token stored");
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Token file removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to remove token file"),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)) {
        warn!(error = %e, "Failed to restrict token file permissions");
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}

/// OS keychain entry.
pub struct KeyringTokenStore;

impl KeyringTokenStore {
    fn entry() -> Option<Entry> {
        match Entry::new(KEYRING_SERVICE, KEYRING_USER) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "Failed to open keyring entry");
                None
            }
        }
    }
}

impl TokenStore for KeyringTokenStore {
    fn get(&self) -> Option<String> {
        match Self::entry()?.get_password() {
            Ok(token) => Some(token),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read token from keychain");
                None
            }
        }
    }

    fn set(&self, token: &str) {
        if let Some(entry) = Self::entry() {
            if let Err(e) = entry.set_password(token) {
                warn!(error = %e, "Failed to store token in keychain");
            }
        }
    }

    fn clear(&self) {
        if let Some(entry) = Self::entry() {
            match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(e) => warn!(error = %e, "Failed to delete token from keychain"),
            }
        }
    }
}

/// Process-local store, used by tests and one-shot commands.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: Mutex::new(token),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.lock().map(|t| t.clone()).unwrap_or(None)
    }

    fn set(&self, token: &str) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = None;
        }
    }
}
