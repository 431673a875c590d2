//! User Directory Service
//!
//! Username to user cache over the user repository.

use std::collections::BTreeMap;
use std::sync::Arc;

use shared_types::{NewUser, User, UserId, UserRepository, UserRole, UserUpdate};
use tracing::{debug, info};

use crate::domain::{CacheError, CacheResult, CacheStats, SharedCache};
use crate::ports::inbound::UserDirectoryApi;

/// Cached user lookups.
///
/// Registration, update and deactivation hold the cache write lock from the
/// uniqueness check through the cache refresh.
pub struct UserDirectory {
    users: Arc<dyn UserRepository>,
    cache: SharedCache<String, User>,
}

impl UserDirectory {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            users,
            cache: SharedCache::new("users"),
        }
    }

    fn load_by_id(&self, id: UserId) -> CacheResult<User> {
        self.users
            .find_by_id(id)?
            .ok_or_else(|| CacheError::not_found("User", id))
    }

    fn validate_registration(request: &NewUser) -> CacheResult<()> {
        if request.username.trim().is_empty() {
            return Err(CacheError::InvalidRequest("username is empty".into()));
        }
        if request.email.trim().is_empty() {
            return Err(CacheError::InvalidRequest("email is empty".into()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for UserDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDirectory")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl UserDirectoryApi for UserDirectory {
    fn get_user_by_username(&self, username: &str) -> CacheResult<User> {
        self.cache.get_or_load(&username.to_string(), |key| {
            self.users
                .find_by_username(key)?
                .ok_or_else(|| CacheError::not_found("User", key))
        })
    }

    fn get_user_by_id(&self, id: UserId) -> CacheResult<User> {
        self.load_by_id(id)
    }

    fn users_by_role(&self, role: UserRole) -> CacheResult<Vec<User>> {
        Ok(self.users.find_by_role(role)?)
    }

    fn all_users(&self) -> CacheResult<Vec<User>> {
        Ok(self.users.find_all()?)
    }

    fn register_user(&self, request: NewUser) -> CacheResult<User> {
        Self::validate_registration(&request)?;

        let mut cache = self.cache.write();
        if self.users.exists_by_username(&request.username)? {
            return Err(CacheError::Conflict(format!(
                "username already exists: {}",
                request.username
            )));
        }
        if self.users.exists_by_email(&request.email)? {
            return Err(CacheError::Conflict(format!(
                "email already exists: {}",
                request.email
            )));
        }

        let user = self.users.insert(request)?;
        cache.put_or_refresh(user.username.clone(), user.clone());

        info!(user_id = %user.id, username = %user.username, role = ?user.role, "User registered");
        Ok(user)
    }

    fn update_user(&self, id: UserId, update: UserUpdate) -> CacheResult<User> {
        let mut cache = self.cache.write();
        let mut user = self.load_by_id(id)?;

        if let Some(first_name) = update.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = update.email {
            if email != user.email {
                if self.users.exists_by_email(&email)? {
                    return Err(CacheError::Conflict(format!("email already exists: {email}")));
                }
                user.email = email;
            }
        }

        let user = self.users.update(user)?;
        cache.put_or_refresh(user.username.clone(), user.clone());

        debug!(user_id = %user.id, username = %user.username, "User updated, cache refreshed");
        Ok(user)
    }

    fn deactivate_user(&self, id: UserId) -> CacheResult<User> {
        let mut cache = self.cache.write();
        let mut user = self.load_by_id(id)?;
        user.active = false;

        let user = self.users.update(user)?;
        cache.invalidate(&user.username);

        info!(user_id = %user.id, username = %user.username, "User deactivated");
        Ok(user)
    }

    fn invalidate(&self, username: &str) -> bool {
        self.cache.invalidate(&username.to_string())
    }

    fn clear_cache(&self) {
        self.cache.clear();
        info!("User cache cleared");
    }

    fn snapshot_all(&self) -> BTreeMap<String, User> {
        self.cache.snapshot_all()
    }

    fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
