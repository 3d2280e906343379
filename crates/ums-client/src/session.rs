//! Login, registration and the stored auth token.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use ums_model::{Credentials, RegisterResponse};

use crate::{
    error::{SessionError, StoreError},
    remote::{AuthRemote, HttpRemote},
    validation::{validate_credentials, validate_registration},
};

/// Key the auth token is stored under
pub const TOKEN_KEY: &str = "token";

/// Small persistent key-value storage on the client
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Store that lives as long as the process
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries().remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object on disk.
///
/// A missing file reads as empty; it is created on the first write.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<HashMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(HashMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(entries)?)?;
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut HashMap<String, String>)) -> Result<(), StoreError> {
        let _lock = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read()?;
        f(&mut entries);
        self.write(&entries)
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _lock = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

/// Registration form input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }
}

/// Authentication state of the client
#[derive(Debug)]
pub struct AuthSession<R, S> {
    remote: R,
    store: S,
}

impl<R: AuthRemote, S: TokenStore> AuthSession<R, S> {
    pub const fn new(remote: R, store: S) -> Self {
        Self { remote, store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Log in and keep the returned token
    pub async fn login(&self, credentials: &Credentials) -> Result<String, SessionError> {
        validate_credentials(credentials)?;

        let response = self
            .remote
            .login(credentials)
            .await
            .inspect_err(|err| tracing::warn!(email = %credentials.email, error = %err, "Login failed"))?;

        self.store.set(TOKEN_KEY, &response.token)?;
        tracing::info!(email = %credentials.email, "Logged in");

        Ok(response.token)
    }

    /// Create an account. The token is not kept; the user logs in afterwards.
    pub async fn register(&self, form: &RegistrationForm) -> Result<RegisterResponse, SessionError> {
        validate_registration(form)?;

        let response = self
            .remote
            .register(&form.credentials())
            .await
            .inspect_err(|err| tracing::warn!(email = %form.email, error = %err, "Registration failed"))?;

        tracing::info!(email = %form.email, id = response.id, "Registered");
        Ok(response)
    }

    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.remove(TOKEN_KEY)?;
        tracing::info!("Logged out");
        Ok(())
    }

    pub fn token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.store.get(TOKEN_KEY)?)
    }

    /// An unreadable store counts as logged out
    pub fn is_authenticated(&self) -> bool {
        matches!(self.token(), Ok(Some(_)))
    }

    /// Token for views that need a logged-in user
    pub fn require_token(&self) -> Result<String, SessionError> {
        self.token()?.ok_or(SessionError::NotAuthenticated)
    }

    /// `remote` sending the stored token as `Authorization: Bearer`
    pub fn authorize(&self, remote: HttpRemote) -> Result<HttpRemote, SessionError> {
        Ok(remote.with_bearer_token(self.require_token()?))
    }
}
