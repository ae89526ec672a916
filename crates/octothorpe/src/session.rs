// File: src/session.rs
// Purpose: Session/auth collaborator and its in-memory implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use octothorpe_router::{Role, Viewer};

use crate::error::AuthError;
use crate::storage::{self, KvStore};

pub type UserId = Uuid;

/// Account identity carried by an authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Registration payload for a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Session state as seen by one render cycle
///
/// Captured once at cycle start; guards, layout and role-conditional
/// templates all read from the same snapshot.
#[derive(Debug, Clone, Default)]
pub struct SessionView {
    pub user: Option<User>,
}

impl SessionView {
    pub fn authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    /// The guard-facing slice of this snapshot
    pub fn guard_viewer(&self) -> Viewer {
        Viewer {
            authenticated: self.authenticated(),
            role: self.role(),
        }
    }

    /// Only authenticated visitors may register to events
    pub fn can_register(&self) -> bool {
        self.role() == Some(Role::Visitor)
    }
}

/// Trait for the session/auth collaborator
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Whether a session is currently signed in
    async fn is_authenticated(&self) -> bool;

    /// The signed-in user, if any
    async fn user(&self) -> Option<User>;

    /// The signed-in user's role, if any
    async fn role(&self) -> Option<Role>;

    /// Signs in with credentials; fails with an authentication error
    async fn login_with_email(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Creates an account; fails on a duplicate email
    async fn register_user(&self, new_user: NewUser) -> Result<(), AuthError>;

    /// Clears the signed-in session
    async fn logout(&self);

    /// One coherent snapshot for a render cycle
    async fn snapshot(&self) -> SessionView {
        SessionView { user: self.user().await }
    }
}

struct Account {
    user: User,
    password: String,
}

/// In-memory session service
///
/// Accounts live in a shared map keyed by email. The active session is
/// additionally persisted as JSON in the provided key-value store, so a
/// fresh service opened over the same store boots already signed in,
/// the way a browser tab restores its stored session.
#[derive(Clone)]
pub struct MemorySessions {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
    current: Arc<RwLock<Option<User>>>,
    vault: Arc<dyn KvStore>,
    session_key: String,
}

impl MemorySessions {
    /// Opens the service over a key-value store, restoring any persisted
    /// session found under `session_key`
    ///
    /// An unreadable persisted session is discarded, leaving the service
    /// anonymous.
    pub async fn open(vault: Arc<dyn KvStore>, session_key: impl Into<String>) -> Self {
        let session_key = session_key.into();
        let restored = match storage::get_json::<User>(vault.as_ref(), &session_key).await {
            Ok(user) => user,
            Err(err) => {
                warn!("discarding unreadable persisted session: {err:#}");
                None
            }
        };
        if let Some(user) = &restored {
            debug!(email = %user.email, "restored persisted session");
        }

        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            current: Arc::new(RwLock::new(restored)),
            vault,
            session_key,
        }
    }

    /// Number of registered accounts
    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[async_trait]
impl SessionService for MemorySessions {
    async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    async fn user(&self) -> Option<User> {
        self.current.read().await.clone()
    }

    async fn role(&self) -> Option<Role> {
        self.current.read().await.as_ref().map(|user| user.role)
    }

    async fn login_with_email(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let accounts = self.accounts.read().await;
        let account = accounts
            .get(email)
            .filter(|account| account.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        let user = account.user.clone();
        drop(accounts);

        *self.current.write().await = Some(user.clone());

        // Persistence is best effort; the in-memory session is already live.
        if let Err(err) = storage::set_json(self.vault.as_ref(), &self.session_key, &user).await {
            warn!("failed to persist session: {err:#}");
        }

        debug!(email = %user.email, role = %user.role, "signed in");
        Ok(())
    }

    async fn register_user(&self, new_user: NewUser) -> Result<(), AuthError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&new_user.email) {
            return Err(AuthError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email.clone(),
            role: new_user.role,
        };
        accounts.insert(
            new_user.email,
            Account {
                user,
                password: new_user.password,
            },
        );

        Ok(())
    }

    async fn logout(&self) {
        *self.current.write().await = None;
        if let Err(err) = self.vault.remove(&self.session_key).await {
            warn!("failed to clear persisted session: {err:#}");
        }
        debug!("signed out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKv;

    fn visitor_signup() -> NewUser {
        NewUser {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "longenough".to_string(),
            role: Role::Visitor,
        }
    }

    async fn service() -> MemorySessions {
        MemorySessions::open(Arc::new(MemoryKv::new()), "ems_session").await
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let sessions = service().await;
        sessions.register_user(visitor_signup()).await.unwrap();

        // Registration alone does not sign in
        assert!(!sessions.is_authenticated().await);

        sessions
            .login_with_email("ada@example.com", "longenough")
            .await
            .unwrap();
        assert!(sessions.is_authenticated().await);
        assert_eq!(sessions.role().await, Some(Role::Visitor));
        assert_eq!(sessions.user().await.unwrap().name, "Ada");
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let sessions = service().await;
        sessions.register_user(visitor_signup()).await.unwrap();

        let wrong_password = sessions.login_with_email("ada@example.com", "nope").await;
        assert_eq!(wrong_password, Err(AuthError::InvalidCredentials));

        let unknown_email = sessions.login_with_email("none@example.com", "longenough").await;
        assert_eq!(unknown_email, Err(AuthError::InvalidCredentials));

        assert!(!sessions.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let sessions = service().await;
        sessions.register_user(visitor_signup()).await.unwrap();

        let again = sessions.register_user(visitor_signup()).await;
        assert_eq!(again, Err(AuthError::DuplicateEmail));
        assert_eq!(sessions.account_count().await, 1);
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_vault() {
        let vault: Arc<MemoryKv> = Arc::new(MemoryKv::new());
        let sessions = MemorySessions::open(vault.clone(), "ems_session").await;
        sessions.register_user(visitor_signup()).await.unwrap();
        sessions
            .login_with_email("ada@example.com", "longenough")
            .await
            .unwrap();
        assert!(vault.get("ems_session").await.unwrap().is_some());

        sessions.logout().await;
        assert!(!sessions.is_authenticated().await);
        assert!(vault.get("ems_session").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_session_restored_from_vault() {
        let vault: Arc<MemoryKv> = Arc::new(MemoryKv::new());

        let first = MemorySessions::open(vault.clone(), "ems_session").await;
        first.register_user(visitor_signup()).await.unwrap();
        first
            .login_with_email("ada@example.com", "longenough")
            .await
            .unwrap();

        // A fresh service over the same store boots signed in
        let second = MemorySessions::open(vault.clone(), "ems_session").await;
        assert!(second.is_authenticated().await);
        assert_eq!(second.user().await.unwrap().email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_corrupt_persisted_session_is_discarded() {
        let vault: Arc<MemoryKv> = Arc::new(MemoryKv::new());
        vault.set("ems_session", "{not json".to_string()).await.unwrap();

        let sessions = MemorySessions::open(vault, "ems_session").await;
        assert!(!sessions.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_snapshot_and_can_register() {
        let sessions = service().await;
        assert!(!sessions.snapshot().await.can_register());

        sessions.register_user(visitor_signup()).await.unwrap();
        sessions
            .login_with_email("ada@example.com", "longenough")
            .await
            .unwrap();

        let view = sessions.snapshot().await;
        assert!(view.authenticated());
        assert!(view.can_register());
        assert!(view.guard_viewer().authenticated);

        let admin = NewUser {
            name: "Root".to_string(),
            email: "root@example.com".to_string(),
            password: "longenough".to_string(),
            role: Role::Admin,
        };
        sessions.register_user(admin).await.unwrap();
        sessions
            .login_with_email("root@example.com", "longenough")
            .await
            .unwrap();
        assert!(!sessions.snapshot().await.can_register());
    }
}
