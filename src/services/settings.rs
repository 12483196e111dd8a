//! Admin settings service: shared secret resolution and rotation

use crate::{
    error::{AppError, AppResult},
    repository::Repository,
};

#[derive(Clone)]
pub struct SettingsService {
    repository: Repository,
    /// Fallback secret from configuration, used until one lands in the DB
    bootstrap_secret: String,
}

impl SettingsService {
    pub fn new(repository: Repository, bootstrap_secret: String) -> Self {
        Self {
            repository,
            bootstrap_secret,
        }
    }

    /// Effective admin secret: the database value wins over configuration
    pub async fn admin_secret(&self) -> AppResult<String> {
        if let Some(secret) = self.repository.settings.get_admin_secret().await? {
            return Ok(secret);
        }
        Ok(self.bootstrap_secret.trim().to_string())
    }

    /// Validate a presented `x-api-key` value
    pub async fn verify_key(&self, key: &str) -> AppResult<()> {
        let secret = self.admin_secret().await?;
        if secret.is_empty() || key.trim() != secret {
            return Err(AppError::Authentication("Unauthorized".to_string()));
        }
        Ok(())
    }

    /// Rotate the admin secret. The current secret must be presented and
    /// the new one must be at least 4 characters after trimming.
    pub async fn change_password(&self, current: &str, new: &str) -> AppResult<()> {
        let secret = self.admin_secret().await?;
        if current.trim() != secret {
            return Err(AppError::Validation(
                "Current password is incorrect".to_string(),
            ));
        }
        let new_secret = new.trim();
        if new_secret.len() < 4 {
            return Err(AppError::Validation(
                "New password must be at least 4 characters".to_string(),
            ));
        }
        self.repository.settings.set_admin_secret(new_secret).await
    }
}
