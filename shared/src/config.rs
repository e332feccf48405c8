//! Configuration management for Lambda functions.

use std::env;

use crate::{Error, Result};

const DEFAULT_EMAIL_HOST: &str = "smtp.gmail.com";
const DEFAULT_EMAIL_PORT: u16 = 587;
const DEFAULT_CORS_ORIGIN: &str = "*";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// SMTP relay host
    pub smtp_host: String,
    /// SMTP relay port
    pub smtp_port: u16,
    /// SMTP username, also used as the sender address
    pub smtp_user: Option<String>,
    /// SMTP password
    pub smtp_password: Option<String>,
    /// Recipient of booking notifications
    pub notify_to: Option<String>,
    /// Value for the Access-Control-Allow-Origin header
    pub cors_origin: String,
    /// Whether bookings are refused when their slot is already taken
    pub slot_check_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            smtp_host: DEFAULT_EMAIL_HOST.to_string(),
            smtp_port: DEFAULT_EMAIL_PORT,
            smtp_user: None,
            smtp_password: None,
            notify_to: None,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            slot_check_enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// CORS origin from the environment, ignoring every other setting.
    pub fn cors_origin_from_env() -> String {
        Self::cors_origin_from_lookup(|key| env::var(key).ok())
    }

    /// CORS origin from an arbitrary key lookup, defaulting to `*`.
    pub fn cors_origin_from_lookup<F>(lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("CORS_ORIGIN")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let smtp_port = match var("EMAIL_PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("EMAIL_PORT is not a valid port: {}", port)))?,
            None => DEFAULT_EMAIL_PORT,
        };

        let slot_check_enabled = match var("SLOT_CHECK_ENABLED") {
            Some(flag) => parse_flag(&flag).ok_or_else(|| {
                Error::Config(format!("SLOT_CHECK_ENABLED is not a boolean: {}", flag))
            })?,
            None => true,
        };

        Ok(Self {
            smtp_host: var("EMAIL_HOST").unwrap_or_else(|| DEFAULT_EMAIL_HOST.to_string()),
            smtp_port,
            smtp_user: var("EMAIL_USER"),
            smtp_password: var("EMAIL_PASS"),
            notify_to: var("NOTIFY_TO"),
            cors_origin: Self::cors_origin_from_lookup(&lookup),
            slot_check_enabled,
        })
    }

    /// Address booking notifications are delivered to.
    ///
    /// Falls back to the SMTP user when no explicit recipient is set.
    pub fn notification_recipient(&self) -> Option<&str> {
        self.notify_to.as_deref().or(self.smtp_user.as_deref())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
