use std::path::PathBuf;

use skz_api::ApiSettings;
use skz_config::constants::*;
use skz_config::env_string;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(String),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid value for {name}: {value}")]
    InvalidFlag { name: &'static str, value: String },
    #[error("Invalid URL for {name}: {value}")]
    InvalidUrl { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    /// `None` selects `~/.skz/proposals.db`
    pub database_path: Option<PathBuf>,
    pub base_url: String,
    pub admin_password: Option<String>,
    pub cookie_secure: bool,
    pub resend_api_key: Option<String>,
    pub email_from: Option<String>,
    pub notification_email: Option<String>,
    /// Overrides the agency WhatsApp number shown on the proposal page
    pub whatsapp: Option<String>,
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_string)
    }

    /// Builds the configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(SKZ_API_PORT).or_else(|| lookup(PORT)) {
            Some(raw) => {
                let port = raw
                    .parse::<u16>()
                    .map_err(|_| ConfigError::InvalidPort(raw.clone()))?;
                if port == 0 {
                    return Err(ConfigError::PortOutOfRange(port));
                }
                port
            }
            None => DEFAULT_API_PORT,
        };

        let cors_origin = lookup(SKZ_CORS_ORIGIN)
            .or_else(|| lookup(CORS_ORIGIN))
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        let base_url = lookup(SKZ_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl {
                name: SKZ_BASE_URL,
                value: base_url,
            });
        }

        let cookie_secure = match lookup(SKZ_COOKIE_SECURE) {
            None => base_url.starts_with("https://"),
            Some(raw) => match raw.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => true,
                "false" | "0" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::InvalidFlag {
                        name: SKZ_COOKIE_SECURE,
                        value: raw,
                    })
                }
            },
        };

        Ok(Config {
            port,
            cors_origin,
            database_path: lookup(SKZ_DATABASE_PATH).map(PathBuf::from),
            base_url,
            admin_password: lookup(ADMIN_PASSWORD),
            cookie_secure,
            resend_api_key: lookup(RESEND_API_KEY),
            email_from: lookup(EMAIL_FROM),
            notification_email: lookup(SKZ_NOTIFICATION_EMAIL),
            whatsapp: lookup(SKZ_WHATSAPP).filter(|n| n.chars().any(|c| c.is_ascii_digit())),
        })
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.base_url.clone(),
            admin_password: self.admin_password.clone(),
            notification_email: self.notification_email.clone(),
            cookie_secure: self.cookie_secure,
        }
    }
}
