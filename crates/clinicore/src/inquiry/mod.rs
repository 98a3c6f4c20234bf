//! Contact-form inquiries
//!
//! A visitor's request for consultation, the pipeline that routes it to the
//! intake endpoint, and the JSON result handed back to the browser.

pub mod pipeline;

use serde::{Deserialize, Serialize};

use crate::core::error::InquiryError;

pub use pipeline::ContactPipeline;

/// Fields submitted by the contact form. Formats are not validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub birth_date: String,
    pub subject: String,
    #[serde(default)]
    pub message: String,
    pub doctor_id: String,
    pub locale: String,
}

/// `{success: true}` or `{success: false, error: "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InquiryOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

impl From<&InquiryError> for InquiryOutcome {
    fn from(err: &InquiryError) -> Self {
        Self::failed(err.public_message())
    }
}

impl From<&Result<(), InquiryError>> for InquiryOutcome {
    fn from(result: &Result<(), InquiryError>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(err) => err.into(),
        }
    }
}
