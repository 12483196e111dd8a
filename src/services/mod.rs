//! Business logic services

pub mod analytics;
pub mod booking;
pub mod email;
pub mod notifications;
pub mod settings;
pub mod submissions;

use crate::{config::AppConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub submissions: submissions::SubmissionsService,
    pub booking: booking::BookingService,
    pub analytics: analytics::AnalyticsService,
    pub email: email::EmailService,
    pub notifications: notifications::NotificationsService,
    pub settings: settings::SettingsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        let email = email::EmailService::new(config.email.clone(), config.site.clone());
        Self {
            submissions: submissions::SubmissionsService::new(repository.clone(), email.clone()),
            booking: booking::BookingService::new(repository.clone()),
            analytics: analytics::AnalyticsService::new(repository.clone(), config.tracking.clone()),
            email,
            notifications: notifications::NotificationsService::new(),
            settings: settings::SettingsService::new(repository, config.admin.secret.clone()),
        }
    }
}
