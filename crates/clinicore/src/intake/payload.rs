use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::directory::DoctorRecord;
use crate::inquiry::InquiryRequest;

/// Normalized inquiry as posted to the intake endpoint.
///
/// Only constructible from a resolved [`DoctorRecord`]. `Debug` is written
/// by hand so the bot token never reaches the logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundPayload {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub birth_date: String,
    pub subject: String,
    pub subject_name: String,
    pub message: String,
    pub doctor_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_email: Option<String>,
    /// Empty when the doctor has no Telegram chat
    pub doctor_telegram_chat_id: String,
    /// Lets the intake script call the Bot API; empty when unconfigured
    pub telegram_bot_token: String,
}

impl OutboundPayload {
    pub fn new(
        request: &InquiryRequest,
        doctor: &DoctorRecord,
        subject_name: String,
        bot_token: Option<&SecretString>,
    ) -> Self {
        Self {
            name: request.name.clone(),
            phone: request.phone.clone(),
            email: request.email.clone(),
            birth_date: request.birth_date.clone(),
            subject: request.subject.clone(),
            subject_name,
            message: request.message.clone(),
            doctor_name: doctor.name.clone(),
            doctor_email: doctor.email.clone(),
            doctor_telegram_chat_id: doctor.telegram_chat_id.clone().unwrap_or_default(),
            telegram_bot_token: bot_token.map(|t| t.expose_secret().to_string()).unwrap_or_default(),
        }
    }
}

impl std::fmt::Debug for OutboundPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutboundPayload")
            .field("subject", &self.subject)
            .field("subject_name", &self.subject_name)
            .field("doctor_name", &self.doctor_name)
            .field("doctor_email", &self.doctor_email)
            .field("doctor_telegram_chat_id", &self.doctor_telegram_chat_id)
            .field("telegram_bot_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// What the intake endpoint answers: `{success: bool, error?: string}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IntakeReply {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}
