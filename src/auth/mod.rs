//! Account sign-in boundary.
//!
//! Screens only see [`CredentialService`]; the concrete provider is injected.
//! [`InMemoryCredentials`] keeps accounts in process memory and is what the
//! binary and tests use.

mod memory;

pub use memory::InMemoryCredentials;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Auth result type
pub type Result<T> = std::result::Result<T, AuthError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account already exists for this email")]
    UserExists,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Sign-in was cancelled")]
    Cancelled,

    #[error("No account found for this email")]
    UnknownAccount,
}

/// How an account signs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInProvider {
    Password,
    Google,
}

/// Signed-in account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub provider: SignInProvider,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: impl Into<String>, provider: SignInProvider) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            provider,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Create an account and sign it in
    async fn sign_up(&self, email: &str, password: &str) -> Result<User>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<User>;

    async fn sign_in_with_google(&self) -> Result<User>;

    /// End the current session. Succeeds when nobody is signed in.
    async fn sign_out(&self) -> Result<()>;

    /// Send a reset link to a known account
    async fn reset_password(&self, email: &str) -> Result<()>;

    fn current_user(&self) -> Option<User>;
}
