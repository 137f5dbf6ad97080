use super::{AuthError, CredentialService, Result, SignInProvider, User};
use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};
use parking_lot::RwLock;
use tracing::{debug, info};
use validator::Validate;

const GOOGLE_EMAIL: &str = "google@example.com";

#[derive(Debug, Validate)]
struct PasswordCredentials {
    #[validate(email)]
    email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    password: String,
}

impl PasswordCredentials {
    fn parse(email: &str, password: &str) -> Result<Self> {
        let credentials = Self {
            email: normalize(email),
            password: password.to_string(),
        };
        credentials
            .validate()
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        Ok(credentials)
    }
}

#[derive(Debug, Validate)]
struct EmailAddress {
    #[validate(email)]
    email: String,
}

struct Account {
    user: User,
    password: Option<String>,
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Accounts held in process memory, keyed by lower-cased email
pub struct InMemoryCredentials {
    accounts: DashMap<String, Account>,
    session: RwLock<Option<User>>,
    google_cancelled: bool,
}

impl Default for InMemoryCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCredentials {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            session: RwLock::new(None),
            google_cancelled: false,
        }
    }

    /// Seed a password account. Invalid input is ignored.
    pub fn with_user(self, email: &str, password: &str) -> Self {
        if let Ok(credentials) = PasswordCredentials::parse(email, password) {
            let user = User::new(&credentials.email, SignInProvider::Password);
            self.accounts.insert(
                credentials.email,
                Account {
                    user,
                    password: Some(credentials.password),
                },
            );
        }
        self
    }

    /// Make Google sign-in behave as if the user dismissed the prompt
    pub fn with_google_cancelled(mut self) -> Self {
        self.google_cancelled = true;
        self
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    fn begin_session(&self, user: User) -> User {
        info!("Signed in {}", user.email);
        *self.session.write() = Some(user.clone());
        user
    }
}

#[async_trait]
impl CredentialService for InMemoryCredentials {
    async fn sign_up(&self, email: &str, password: &str) -> Result<User> {
        let credentials = PasswordCredentials::parse(email, password)?;

        let user = match self.accounts.entry(credentials.email.clone()) {
            Entry::Occupied(_) => return Err(AuthError::UserExists),
            Entry::Vacant(slot) => {
                let user = User::new(credentials.email, SignInProvider::Password);
                slot.insert(Account {
                    user: user.clone(),
                    password: Some(credentials.password),
                });
                user
            }
        };

        Ok(self.begin_session(user))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let credentials = PasswordCredentials::parse(email, password)?;

        let user = {
            let account = self
                .accounts
                .get(&credentials.email)
                .ok_or(AuthError::InvalidCredentials)?;
            if account.password.as_deref() != Some(credentials.password.as_str()) {
                debug!("Password mismatch for {}", credentials.email);
                return Err(AuthError::InvalidCredentials);
            }
            account.user.clone()
        };

        Ok(self.begin_session(user))
    }

    async fn sign_in_with_google(&self) -> Result<User> {
        if self.google_cancelled {
            return Err(AuthError::Cancelled);
        }

        let user = self
            .accounts
            .entry(GOOGLE_EMAIL.to_string())
            .or_insert_with(|| Account {
                user: User::new(GOOGLE_EMAIL, SignInProvider::Google),
                password: None,
            })
            .user
            .clone();

        Ok(self.begin_session(user))
    }

    async fn sign_out(&self) -> Result<()> {
        if let Some(user) = self.session.write().take() {
            info!("Signed out {}", user.email);
        }
        Ok(())
    }

    async fn reset_password(&self, email: &str) -> Result<()> {
        let address = EmailAddress {
            email: normalize(email),
        };
        address
            .validate()
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        if !self.accounts.contains_key(&address.email) {
            return Err(AuthError::UnknownAccount);
        }
        info!("Password reset requested for {}", address.email);
        Ok(())
    }

    fn current_user(&self) -> Option<User> {
        self.session.read().clone()
    }
}
