//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{GenesisError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_roles_config(&settings.roles)?;
    validate_notification_config(&settings.notifications)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate HTTP server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(GenesisError::Config("Server host is required".to_string()));
    }

    if config.port == 0 {
        return Err(GenesisError::Config(
            "Server port must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(GenesisError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(GenesisError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(GenesisError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate role allow-lists
fn validate_roles_config(config: &super::RolesConfig) -> Result<()> {
    if config.admin_emails.is_empty() {
        return Err(GenesisError::Config(
            "At least one admin email must be configured".to_string(),
        ));
    }

    for email in config.admin_emails.iter().chain(&config.volunteer_emails) {
        if !crate::utils::helpers::is_valid_email(email) {
            return Err(GenesisError::Config(format!(
                "Invalid email in role configuration: {}",
                email
            )));
        }
    }

    Ok(())
}

/// Validate notification webhook configuration
fn validate_notification_config(config: &super::NotificationConfig) -> Result<()> {
    if config.enabled && config.webhook_url.is_none() {
        return Err(GenesisError::Config(
            "Notification webhook URL is required when notifications are enabled".to_string(),
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(GenesisError::Config(
            "Notification timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(GenesisError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(GenesisError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.roles.admin_emails = vec!["admin@genesis.events".to_string()];
        settings
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_missing_admins_rejected() {
        let mut settings = valid_settings();
        settings.roles.admin_emails.clear();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_bad_role_email_rejected() {
        let mut settings = valid_settings();
        settings.roles.volunteer_emails = vec!["nope".to_string()];
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_enabled_notifications_require_url() {
        let mut settings = valid_settings();
        settings.notifications.enabled = true;
        settings.notifications.webhook_url = None;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut settings = valid_settings();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
