use thiserror::Error;

use crate::intake::IntakeError;

/// Message returned to the browser whenever the failure detail must stay
/// server-side (configuration, transport, unexpected upstream shape).
pub const GENERIC_FAILURE: &str = "Failed to process request";

/// Message returned when the requested doctor id does not resolve.
pub const DOCTOR_NOT_FOUND: &str = "Doctor not found";

/// Fallback for an upstream failure that carries no error string.
pub const UPSTREAM_FAILURE: &str = "Intake endpoint reported failure";

/// Startup configuration errors.
///
/// Raised while building [`Settings`](crate::core::config::Settings); the
/// service refuses to start rather than serving with a half-parsed config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `DOCTORS_DATA` is set but is not a JSON array of doctor records
    #[error("DOCTORS_DATA is not a valid doctor list: {0}")]
    InvalidDoctorsData(#[from] serde_json::Error),

    /// Two records share the same id
    #[error("DOCTORS_DATA contains duplicate doctor id {0}")]
    DuplicateDoctorId(i64),

    /// Intake URL present but unparsable or not http(s)
    #[error("Invalid intake endpoint URL '{value}': {reason}")]
    InvalidIntakeUrl { value: String, reason: String },

    /// A numeric variable (port, timeout) could not be parsed
    #[error("Invalid value '{value}' for {var}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Failures of a single inquiry submission.
///
/// Every variant is terminal for the attempt. Only [`InquiryError::DoctorNotFound`]
/// and [`InquiryError::Upstream`] carry a message that is safe to show to
/// the visitor; everything else is reported with [`GENERIC_FAILURE`].
#[derive(Debug, Error)]
pub enum InquiryError {
    #[error("malformed inquiry body: {0}")]
    MalformedRequest(String),

    #[error("doctor directory is not configured")]
    DirectoryNotConfigured,

    #[error("doctor '{0}' not found in directory")]
    DoctorNotFound(String),

    #[error("intake endpoint is not configured")]
    IntakeNotConfigured,

    /// The intake endpoint answered and reported failure
    #[error("intake endpoint reported failure: {}", .0.as_deref().unwrap_or("<no message>"))]
    Upstream(Option<String>),

    /// Transport failure or unusable reply from the intake endpoint
    #[error(transparent)]
    Intake(#[from] IntakeError),
}

impl InquiryError {
    /// True for conditions the visitor can fix by resubmitting (HTTP 400).
    pub fn is_client_error(&self) -> bool {
        matches!(self, InquiryError::DoctorNotFound(_))
    }

    /// True for missing process configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            InquiryError::DirectoryNotConfigured | InquiryError::IntakeNotConfigured
        )
    }

    /// The message that may be shown to the caller.
    pub fn public_message(&self) -> String {
        match self {
            InquiryError::DoctorNotFound(_) => DOCTOR_NOT_FOUND.to_string(),
            InquiryError::Upstream(Some(msg)) if !msg.trim().is_empty() => msg.clone(),
            InquiryError::Upstream(_) => UPSTREAM_FAILURE.to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }

    /// Short label for structured logs.
    pub fn category(&self) -> &'static str {
        match self {
            InquiryError::DirectoryNotConfigured | InquiryError::IntakeNotConfigured => "config",
            InquiryError::MalformedRequest(_) => "malformed_request",
            InquiryError::DoctorNotFound(_) => "doctor_not_found",
            InquiryError::Upstream(_) => "upstream",
            InquiryError::Intake(_) => "transport",
        }
    }
}
