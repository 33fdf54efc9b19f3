use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuthError;
use crate::provider::AuthSession;

const DEFAULT_KEYRING_SERVICE: &str = "ideahub-cli";
const KEYRING_USER: &str = "session";
const SESSION_FILE_NAME: &str = "session.json";

/// Returns the keyring service name.
///
/// Defaults to `"ideahub-cli"`. Override via `IDEAHUB_KEYRING_SERVICE` env var
/// for testing (e.g., `"ideahub-cli-test"`) to avoid touching real sessions.
fn keyring_service() -> String {
    std::env::var("IDEAHUB_KEYRING_SERVICE").unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Where the provider persists its session between CLI invocations.
#[derive(Debug, Clone)]
pub enum SessionStore {
    /// OS keychain, falling back to `~/.ideahub/session.json`.
    System,
    /// A single JSON file, no keychain. Used by tests and headless setups.
    File(PathBuf),
    /// Nothing is persisted.
    Disabled,
}

impl SessionStore {
    /// Persist a session. Keyring first, file on failure.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the session cannot be written
    /// anywhere.
    pub fn save(&self, session: &AuthSession) -> Result<(), AuthError> {
        let json = serde_json::to_string(session)
            .map_err(|e| AuthError::TokenStoreError(format!("serialize session: {e}")))?;
        match self {
            Self::Disabled => Ok(()),
            Self::File(path) => write_file(path, &json),
            Self::System => match keyring::Entry::new(&keyring_service(), KEYRING_USER) {
                Ok(entry) => match entry.set_password(&json) {
                    Ok(()) => Ok(()),
                    Err(error) => {
                        tracing::warn!(%error, "keyring store failed; falling back to file");
                        write_file(&default_session_path()?, &json)
                    }
                },
                Err(error) => {
                    tracing::warn!(%error, "keyring unavailable; falling back to file");
                    write_file(&default_session_path()?, &json)
                }
            },
        }
    }

    /// Load the persisted session, if any. Unparseable entries are ignored.
    #[must_use]
    pub fn load(&self) -> Option<AuthSession> {
        self.load_raw().and_then(|(raw, source)| {
            serde_json::from_str(&raw)
                .inspect_err(|error| {
                    tracing::warn!(%error, source, "stored session is unreadable; ignoring");
                })
                .ok()
        })
    }

    /// Remove the persisted session from every tier.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the session file cannot be removed.
    pub fn delete(&self) -> Result<(), AuthError> {
        match self {
            Self::Disabled => Ok(()),
            Self::File(path) => remove_file(path),
            Self::System => {
                // Missing entries are fine.
                if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER) {
                    let _ = entry.delete_credential();
                }
                remove_file(&default_session_path()?)
            }
        }
    }

    /// Which tier the stored session came from (for status display).
    #[must_use]
    pub fn source(&self) -> Option<&'static str> {
        self.load_raw().map(|(_, source)| source)
    }

    fn load_raw(&self) -> Option<(String, &'static str)> {
        match self {
            Self::Disabled => None,
            Self::File(path) => read_file(path).map(|raw| (raw, "file")),
            Self::System => {
                if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER)
                    && let Ok(raw) = entry.get_password()
                    && !raw.is_empty()
                {
                    return Some((raw, "keyring"));
                }
                let path = default_session_path().ok()?;
                read_file(&path).map(|raw| (raw, "file"))
            }
        }
    }
}

// --- Private file helpers ---

fn default_session_path() -> Result<PathBuf, AuthError> {
    dirs::home_dir()
        .map(|h| h.join(".ideahub").join(SESSION_FILE_NAME))
        .ok_or_else(|| {
            AuthError::TokenStoreError("home directory not found; cannot store session".into())
        })
}

fn write_file(path: &Path, contents: &str) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(path, contents)
        .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::TokenStoreError(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

fn read_file(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .filter(|s| !s.trim().is_empty())
}

fn remove_file(path: &Path) -> Result<(), AuthError> {
    if path.exists() {
        fs::remove_file(path).map_err(|e| {
            AuthError::TokenStoreError(format!("failed to delete {}: {e}", path.display()))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_core::Identity;

    fn session() -> AuthSession {
        AuthSession {
            access_token: "at".into(),
            refresh_token: "rt".into(),
            expires_at: Some(1_900_000_000),
            user: Identity::new("u1", Some("ada@example.com".into())),
        }
    }

    #[test]
    fn default_path_is_under_home() {
        let path = default_session_path().expect("should resolve");
        assert!(path.ends_with(".ideahub/session.json"));
    }

    #[test]
    fn file_store_save_load_delete_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = SessionStore::File(tmp.path().join("nested").join("session.json"));

        assert!(store.load().is_none());
        store.save(&session()).expect("save");
        assert_eq!(store.load(), Some(session()));
        assert_eq!(store.source(), Some("file"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(tmp.path().join("nested").join("session.json"))
                .expect("metadata")
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(mode, 0o600, "session file should be 0600");
        }

        store.delete().expect("delete");
        assert!(store.load().is_none());
        // Deleting twice is fine.
        store.delete().expect("second delete");
    }

    #[test]
    fn load_ignores_blank_and_garbage() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("session.json");
        let store = SessionStore::File(path.clone());

        std::fs::write(&path, "   \n  ").expect("write");
        assert!(store.load().is_none());

        std::fs::write(&path, "{not json").expect("write");
        assert!(store.load().is_none());
    }

    #[test]
    fn disabled_store_keeps_nothing() {
        let store = SessionStore::Disabled;
        store.save(&session()).expect("save");
        assert!(store.load().is_none());
        assert!(store.source().is_none());
    }
}
