use tracing::{info, warn};
use uuid::Uuid;

use crate::api::MockBackend;
use crate::error::ApiError;
use crate::models::{Role, User, UserRecord};
use crate::storage::StoreKey;

pub const MIN_PASSWORD_LEN: usize = 8;

impl MockBackend {
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        ip_key: Option<&str>,
    ) -> Result<User, ApiError> {
        self.delay(self.options.latency.auth).await;

        let users: Vec<UserRecord> = self.storage.get(StoreKey::Users, Vec::new()).await;
        let user = users
            .into_iter()
            .find(|u| u.matches_email(email))
            .ok_or(ApiError::NotFound)?;

        if user.password.as_deref() != Some(password) {
            warn!("login rejected for {}: wrong password", user.id);
            return Err(ApiError::InvalidCredentials);
        }

        if user.role == Role::Teacher && !self.ip_key_matches(ip_key) {
            warn!("login rejected for {}: wrong ip key", user.id);
            return Err(ApiError::InvalidIpKey { during_registration: false });
        }

        info!("user {} logged in", user.id);
        Ok(user.into())
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
        ip_key: Option<&str>,
    ) -> Result<User, ApiError> {
        self.delay(self.options.latency.auth).await;

        let _guard = self.write_lock.lock().await;
        let mut users: Vec<UserRecord> = self.storage.get(StoreKey::Users, Vec::new()).await;

        if users.iter().any(|u| u.matches_email(email)) {
            return Err(ApiError::DuplicateEmail);
        }

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::WeakPassword);
        }

        if role == Role::Teacher && !self.ip_key_matches(ip_key) {
            warn!("teacher registration rejected for {}: wrong ip key", email);
            return Err(ApiError::InvalidIpKey { during_registration: true });
        }

        let record = UserRecord {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            password: Some(password.to_string()),
        };
        let user = record.to_user();
        users.push(record);

        self.storage.set(StoreKey::Users, &users).await?;

        info!("registered {:?} {}", user.role, user.id);
        Ok(user)
    }

    fn ip_key_matches(&self, ip_key: Option<&str>) -> bool {
        ip_key == Some(self.options.teacher_ip_key.as_str())
    }
}
