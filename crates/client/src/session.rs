//! Authenticated session state and its durable storage.
//!
//! [`SessionStore`] owns the signed-in identity and keeps the API client's
//! credential slot in sync with it. The token/identity pair is persisted
//! through a [`SessionStorage`] so a new process starts signed in; the
//! stored token is trusted as-is and only proven stale when a protected
//! call fails.

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::api::types::{AuthSession, Identity};
use crate::api::ApiClient;
use crate::error::AuthError;
use crate::validate::NewAccount;

/// Failures from durable session storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session storage io: {0}")]
    Io(#[from] io::Error),
    #[error("session storage encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// The token/identity pair written to storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedSession {
    pub token: String,
    pub identity: Identity,
}

/// Durable storage for the signed-in session.
///
/// `load` returning `Ok(None)` means "signed out"; implementations treat
/// absent data the same way.
pub trait SessionStorage: Send + Sync {
    /// Read the persisted session, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when storage is present but unreadable.
    fn load(&self) -> Result<Option<PersistedSession>, StorageError>;

    /// Persist the session, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error when the session cannot be written.
    fn store(&self, session: &PersistedSession) -> Result<(), StorageError>;

    /// Remove the persisted session. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error when existing storage cannot be removed.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Process-local storage, mainly for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemorySessionStorage {
    slot: Mutex<Option<PersistedSession>>,
}

impl InMemorySessionStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a session, for hydration tests.
    #[must_use]
    pub fn with_session(session: PersistedSession) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

impl SessionStorage for InMemorySessionStorage {
    fn load(&self) -> Result<Option<PersistedSession>, StorageError> {
        Ok(self.slot.lock().map_or(None, |slot| slot.clone()))
    }

    fn store(&self, session: &PersistedSession) -> Result<(), StorageError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(session.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
        Ok(())
    }
}

/// JSON file storage at a configured path.
///
/// A missing file means "signed out". A file that exists but does not
/// parse is treated the same way, with a warning, rather than blocking
/// sign-in.
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<PersistedSession>, StorageError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str(&contents) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    fn store(&self, session: &PersistedSession) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, contents)?;

        // The file holds a bearer token; keep it owner-readable only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Signed-in state for the process.
///
/// Holds the current identity and keeps the [`ApiClient`] credential slot
/// and the durable storage in sync with every transition. All transitions
/// leave state unchanged on failure.
pub struct SessionStore {
    api: ApiClient,
    storage: Box<dyn SessionStorage>,
    identity: Option<Identity>,
    token: Option<SecretString>,
}

impl SessionStore {
    /// Create the store and hydrate from storage.
    ///
    /// A storage read failure is logged and treated as signed out; the
    /// application still starts.
    #[must_use]
    pub fn new(api: ApiClient, storage: Box<dyn SessionStorage>) -> Self {
        let mut store = Self {
            api,
            storage,
            identity: None,
            token: None,
        };
        match store.storage.load() {
            Ok(Some(session)) => {
                debug!(user = %session.identity.email, "restored session from storage");
                let token = SecretString::from(session.token);
                store.api.set_credential(token.clone());
                store.token = Some(token);
                store.identity = Some(session.identity);
            }
            Ok(None) => {}
            Err(err) => warn!(error = %err, "could not read session storage"),
        }
        store
    }

    /// Validate the form, create the account, and sign in as it.
    ///
    /// # Errors
    ///
    /// Validation failures short-circuit before any network call. A
    /// conflict surfaces as [`AuthError::FieldTaken`].
    #[instrument(skip(self, account), fields(email = %account.email))]
    pub async fn register(&mut self, account: &NewAccount) -> Result<&Identity, AuthError> {
        account.validate()?;
        let session = self.api.register(account).await?;
        self.install(session)
    }

    /// Sign in with an email/password pair.
    ///
    /// # Errors
    ///
    /// Any rejection maps to [`AuthError::InvalidCredentials`]; the store
    /// stays signed out.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&Identity, AuthError> {
        let session = self.api.login(email, password).await?;
        self.install(session)
    }

    /// Persist the session, then adopt it in memory. Storage failure
    /// leaves the store signed out.
    fn install(&mut self, session: AuthSession) -> Result<&Identity, AuthError> {
        self.storage.store(&PersistedSession {
            token: session.token.clone(),
            identity: session.identity.clone(),
        })?;
        let token = SecretString::from(session.token);
        self.api.set_credential(token.clone());
        self.token = Some(token);
        Ok(self.identity.insert(session.identity))
    }

    /// Sign out: drop the in-memory identity and credential, then clear
    /// storage. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error only when existing storage cannot be removed; the
    /// in-memory state is already signed out at that point.
    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.identity = None;
        self.token = None;
        self.api.clear_credential();
        self.storage.clear()
    }

    /// The signed-in identity, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// The current bearer credential, if any.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.token.clone()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use novashop_core::{Role, UserId};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    fn identity(email: &str) -> Identity {
        Identity {
            id: UserId::new(7),
            full_name: "Test User".to_string(),
            email: email.to_string(),
            username: "testuser".to_string(),
            phone_number: "0555123456".to_string(),
            role: Role::Customer,
        }
    }

    fn persisted(email: &str) -> PersistedSession {
        PersistedSession {
            token: "stored-token".to_string(),
            identity: identity(email),
        }
    }

    /// Serve exactly one connection with a canned HTTP response, then stop.
    async fn one_shot_server(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_hydrates_from_storage() {
        let api = ApiClient::new("http://localhost:8000");
        let storage = InMemorySessionStorage::with_session(persisted("user@example.com"));

        let store = SessionStore::new(api.clone(), Box::new(storage));

        assert!(store.is_authenticated());
        assert_eq!(store.current().unwrap().email, "user@example.com");
        assert!(store.token().is_some());
        assert!(api.has_credential());
    }

    #[test]
    fn test_starts_signed_out_without_storage() {
        let api = ApiClient::new("http://localhost:8000");
        let store = SessionStore::new(api.clone(), Box::new(InMemorySessionStorage::new()));

        assert!(!store.is_authenticated());
        assert!(store.current().is_none());
        assert!(!api.has_credential());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let api = ApiClient::new("http://localhost:8000");
        let storage = InMemorySessionStorage::with_session(persisted("user@example.com"));
        let mut store = SessionStore::new(api.clone(), Box::new(storage));

        store.logout().unwrap();
        store.logout().unwrap();

        assert!(!store.is_authenticated());
        assert!(!api.has_credential());
    }

    #[tokio::test]
    async fn test_register_validation_short_circuits() {
        let api = ApiClient::new("http://localhost:1"); // never reached
        let mut store = SessionStore::new(api, Box::new(InMemorySessionStorage::new()));

        let account = NewAccount {
            full_name: "Test User".to_string(),
            email: "not-an-email".to_string(),
            username: "testuser".to_string(),
            phone_number: "0555123456".to_string(),
            password: "hunter22".to_string(),
        };

        assert!(matches!(
            store.register(&account).await,
            Err(AuthError::Invalid(_))
        ));
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_rejection_leaves_store_signed_out() {
        let base = one_shot_server("401 Unauthorized", r#"{"error": "bad credentials"}"#).await;
        let api = ApiClient::new(base);
        let mut store = SessionStore::new(api.clone(), Box::new(InMemorySessionStorage::new()));

        let result = store.login("user@example.com", "wrong").await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert!(!store.is_authenticated());
        assert!(!api.has_credential());
    }

    #[tokio::test]
    async fn test_register_conflict_names_field() {
        let base = one_shot_server("409 Conflict", r#"{"error": [{"path": "email"}]}"#).await;
        let api = ApiClient::new(base);
        let mut store = SessionStore::new(api, Box::new(InMemorySessionStorage::new()));

        let account = NewAccount {
            full_name: "Test User".to_string(),
            email: "user@example.com".to_string(),
            username: "testuser".to_string(),
            phone_number: "0555123456".to_string(),
            password: "hunter22".to_string(),
        };

        match store.register(&account).await {
            Err(AuthError::FieldTaken { field }) => assert_eq!(field, "email"),
            other => panic!("expected FieldTaken, got {other:?}"),
        }
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_success_installs_session() {
        let base = one_shot_server(
            "200 OK",
            r#"{"user": {"id": 7, "email": "user@example.com", "full_name": "Test User"}, "token": "tok-123"}"#,
        )
        .await;
        let api = ApiClient::new(base);
        let storage = Box::new(InMemorySessionStorage::new());
        let mut store = SessionStore::new(api.clone(), storage);

        let identity = store.login("user@example.com", "hunter22").await.unwrap();

        assert_eq!(identity.email, "user@example.com");
        assert!(store.is_authenticated());
        assert!(api.has_credential());
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = std::env::temp_dir().join(format!("novashop-session-{}", std::process::id()));
        let path = dir.join("session.json");
        let storage = FileSessionStorage::new(path.clone());

        assert!(storage.load().unwrap().is_none());

        storage.store(&persisted("user@example.com")).unwrap();
        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded.token, "stored-token");
        assert_eq!(loaded.identity.email, "user@example.com");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }

        storage.clear().unwrap();
        storage.clear().unwrap(); // idempotent
        assert!(storage.load().unwrap().is_none());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_file_storage_ignores_corrupt_file() {
        let dir = std::env::temp_dir().join(format!("novashop-corrupt-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = FileSessionStorage::new(path);
        assert!(storage.load().unwrap().is_none());

        std::fs::remove_dir_all(dir).unwrap();
    }
}
