//! In-memory user directory for development and tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use rr_core::domain::entities::DirectoryUser;
use rr_core::services::lifecycle::UserDirectoryTrait;

struct StoredUser {
    user: DirectoryUser,
    password_hash: Option<String>,
}

/// Accounts keyed by exact email address.
///
/// Passwords are stored as bcrypt hashes.
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, StoredUser>>,
    bcrypt_cost: u32,
}

impl Default for InMemoryUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }

    /// Lower costs keep tests fast
    pub fn with_cost(bcrypt_cost: u32) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            bcrypt_cost,
        }
    }

    /// Register an account; returns its generated id
    pub fn add_user(&self, email: &str, name: Option<&str>) -> String {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let mut user = DirectoryUser::new(id.clone(), email);
        if let Some(name) = name {
            user = user.with_name(name);
        }

        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                email.to_string(),
                StoredUser {
                    user,
                    password_hash: None,
                },
            );
        id
    }

    /// Check a password against the stored hash
    pub fn check_password(&self, email: &str, password: &str) -> bool {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        users
            .get(email)
            .and_then(|stored| stored.password_hash.as_deref())
            .map(|hash| bcrypt::verify(password, hash).unwrap_or(false))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.users.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn update<F>(&self, user_id: &str, apply: F) -> Result<(), String>
    where
        F: FnOnce(&mut StoredUser),
    {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        let stored = users
            .values_mut()
            .find(|stored| stored.user.id == user_id)
            .ok_or_else(|| format!("User {} not found", user_id))?;
        apply(stored);
        Ok(())
    }
}

#[async_trait]
impl UserDirectoryTrait for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<DirectoryUser>, String> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        Ok(users.get(email).map(|stored| stored.user.clone()))
    }

    async fn set_email_verified(&self, user_id: &str, verified: bool) -> Result<(), String> {
        self.update(user_id, |stored| stored.user.email_verified = verified)
    }

    async fn set_password(&self, user_id: &str, new_password: &str) -> Result<(), String> {
        let hash = bcrypt::hash(new_password, self.bcrypt_cost).map_err(|e| e.to_string())?;
        self.update(user_id, |stored| stored.password_hash = Some(hash))
    }
}
