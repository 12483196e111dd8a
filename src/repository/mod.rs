//! Repository layer for database operations

pub mod settings;
pub mod submissions;
pub mod visits;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub submissions: submissions::SubmissionsRepository,
    pub visits: visits::VisitsRepository,
    pub settings: settings::SettingsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            submissions: submissions::SubmissionsRepository::new(pool.clone()),
            visits: visits::VisitsRepository::new(pool.clone()),
            settings: settings::SettingsRepository::new(pool.clone()),
            pool,
        }
    }
}
