//! Process configuration
//!
//! Everything is read once at startup (from the environment, optionally
//! primed from a `.env` file by the binary) and handed to the pipeline as an
//! immutable [`Settings`] value. Nothing below reads the environment after
//! that point.

use std::env;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::core::error::ConfigError;
use crate::directory::DoctorDirectory;

/// JSON array of doctor records
pub const DOCTORS_DATA_VAR: &str = "DOCTORS_DATA";
/// External intake script endpoint
pub const INTAKE_URL_VAR: &str = "INTAKE_SCRIPT_URL";
/// Older name of the intake endpoint variable, still honoured
pub const INTAKE_URL_LEGACY_VAR: &str = "GOOGLE_SCRIPT_URL";
/// Telegram bot secret
pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
/// Send the doctor a Telegram message directly after a successful intake
pub const DIRECT_RELAY_VAR: &str = "TELEGRAM_DIRECT_RELAY";
pub const INTAKE_TIMEOUT_VAR: &str = "INTAKE_TIMEOUT_SECS";
pub const WEB_PORT_VAR: &str = "WEB_PORT";

/// Network configuration
pub mod network {
    use super::Duration;

    /// Upper bound for the single outbound intake call (in seconds)
    pub const INTAKE_TIMEOUT_SECS: u64 = 15;

    /// Intake call timeout duration
    pub fn intake_timeout() -> Duration {
        Duration::from_secs(INTAKE_TIMEOUT_SECS)
    }
}

/// Web server configuration
pub mod web {
    /// Port used when WEB_PORT is not set
    pub const DEFAULT_PORT: u16 = 3000;
}

/// Immutable configuration shared by every request.
///
/// Missing directory or intake URL are kept as `None` instead of failing
/// startup: the contact pipeline reports them per request as configuration
/// errors, while the roster and health endpoints keep working.
#[derive(Debug)]
pub struct Settings {
    pub doctors: Option<DoctorDirectory>,
    pub intake_url: Option<Url>,
    pub bot_token: Option<SecretString>,
    pub direct_relay: bool,
    pub intake_timeout: Duration,
    pub web_port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            doctors: None,
            intake_url: None,
            bot_token: None,
            direct_relay: false,
            intake_timeout: network::intake_timeout(),
            web_port: web::DEFAULT_PORT,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let doctors = get(DOCTORS_DATA_VAR)
            .map(|raw| DoctorDirectory::from_json(&raw))
            .transpose()?;

        let intake_url = get(INTAKE_URL_VAR)
            .or_else(|| get(INTAKE_URL_LEGACY_VAR))
            .map(|raw| parse_intake_url(&raw))
            .transpose()?;

        let bot_token = get(BOT_TOKEN_VAR).map(|raw| SecretString::from(raw.trim().to_string()));

        let direct_relay = get(DIRECT_RELAY_VAR).map(|raw| parse_flag(&raw)).unwrap_or(false);

        let intake_timeout = match get(INTAKE_TIMEOUT_VAR) {
            Some(raw) => match parse_number::<u64>(INTAKE_TIMEOUT_VAR, &raw)? {
                // A zero timeout would fail every intake call
                0 => {
                    return Err(ConfigError::InvalidNumber {
                        var: INTAKE_TIMEOUT_VAR,
                        value: raw,
                    })
                }
                secs => Duration::from_secs(secs),
            },
            None => network::intake_timeout(),
        };

        let web_port = match get(WEB_PORT_VAR) {
            Some(raw) => parse_number(WEB_PORT_VAR, &raw)?,
            None => web::DEFAULT_PORT,
        };

        Ok(Self {
            doctors,
            intake_url,
            bot_token,
            direct_relay,
            intake_timeout,
            web_port,
        })
    }

    /// Logs which pieces of configuration are present. Never logs values of secrets.
    pub fn log_summary(&self) {
        match &self.doctors {
            Some(directory) => tracing::info!(doctors = directory.len(), "doctor directory loaded"),
            None => tracing::warn!("{} not set, contact form submissions will fail", DOCTORS_DATA_VAR),
        }
        match &self.intake_url {
            Some(url) => tracing::info!(host = url.host_str().unwrap_or(""), "intake endpoint configured"),
            None => tracing::warn!("{} not set, contact form submissions will fail", INTAKE_URL_VAR),
        }
        if self.bot_token.is_none() {
            tracing::warn!("{} not set, intake payloads carry an empty bot token", BOT_TOKEN_VAR);
        }
        if self.direct_relay && self.bot_token.is_none() {
            tracing::warn!("{} is on but there is no bot token, direct relay disabled", DIRECT_RELAY_VAR);
        }
        tracing::info!(
            timeout_secs = self.intake_timeout.as_secs(),
            direct_relay = self.direct_relay,
            "intake settings"
        );
    }
}

fn parse_intake_url(raw: &str) -> Result<Url, ConfigError> {
    let value = raw.trim();
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidIntakeUrl {
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidIntakeUrl {
            value: value.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(url)
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn parse_number<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: raw.to_string(),
    })
}
