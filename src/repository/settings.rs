//! Settings repository: booking configuration (JSONB key/value) and
//! admin settings (shared secret).

use serde_json::Value;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::booking::SlotsConfig};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: Pool<Postgres>,
}

impl SettingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // ---- Booking config (JSONB) ----

    pub async fn get_config_value(&self, key: &str) -> AppResult<Option<Value>> {
        let value: Option<Value> =
            sqlx::query_scalar("SELECT value FROM booking_config WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value)
    }

    pub async fn set_config_value(&self, key: &str, value: &Value) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO booking_config (key, value) VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // ---- Admin settings ----

    /// Stored admin secret; `None` when the database holds no usable value
    pub async fn get_admin_secret(&self) -> AppResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM admin_settings WHERE key = 'admin_secret'")
                .fetch_optional(&self.pool)
                .await?;
        Ok(value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
    }

    pub async fn set_admin_secret(&self, secret: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO admin_settings (key, value) VALUES ('admin_secret', $1)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(secret)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Seed the admin secret and default slot list on first start.
    ///
    /// Existing values are never overwritten, so a secret changed through
    /// the admin UI survives restarts with a stale env var.
    pub async fn seed_defaults(&self, bootstrap_secret: &str) -> AppResult<()> {
        let secret = bootstrap_secret.trim();
        if !secret.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO admin_settings (key, value) VALUES ('admin_secret', $1)
                ON CONFLICT (key) DO NOTHING
                "#,
            )
            .bind(secret)
            .execute(&self.pool)
            .await?;
        }

        let defaults = SlotsConfig::default();
        sqlx::query(
            r#"
            INSERT INTO booking_config (key, value) VALUES ('time_slots', $1)
            ON CONFLICT (key) DO NOTHING
            "#,
        )
        .bind(serde_json::json!(defaults.time_slots))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
