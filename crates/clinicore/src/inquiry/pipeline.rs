use std::sync::Arc;

use crate::core::config::Settings;
use crate::core::error::InquiryError;
use crate::i18n::{self, SubjectCatalog};
use crate::intake::{IntakeGateway, OutboundPayload};
use crate::telegram::{format_inquiry_message, Messenger};

use super::InquiryRequest;

/// Routes one inquiry to the intake endpoint.
///
/// Holds only read-only collaborators; a single instance serves every
/// request concurrently. Each step short-circuits on failure, so no payload
/// is ever sent for a request that failed an earlier step.
pub struct ContactPipeline {
    settings: Arc<Settings>,
    intake: Arc<dyn IntakeGateway>,
    catalog: Arc<dyn SubjectCatalog>,
    messenger: Option<Arc<dyn Messenger>>,
}

impl ContactPipeline {
    pub fn new(settings: Arc<Settings>, intake: Arc<dyn IntakeGateway>, catalog: Arc<dyn SubjectCatalog>) -> Self {
        Self {
            settings,
            intake,
            catalog,
            messenger: None,
        }
    }

    /// Enables the direct relay to doctors, if the settings ask for it.
    pub fn with_messenger(mut self, messenger: Arc<dyn Messenger>) -> Self {
        self.messenger = Some(messenger);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Submits the inquiry. Failures are logged here with their full cause;
    /// callers only need [`InquiryError::public_message`].
    pub async fn submit(&self, request: &InquiryRequest) -> Result<(), InquiryError> {
        let result = self.try_submit(request).await;

        match &result {
            Ok(()) => tracing::info!(
                doctor_id = %request.doctor_id,
                locale = %request.locale,
                subject = %request.subject,
                "inquiry delivered to intake endpoint"
            ),
            Err(err) if err.is_client_error() => tracing::warn!(
                doctor_id = %request.doctor_id,
                category = err.category(),
                "inquiry rejected: {}",
                err
            ),
            Err(err) => tracing::error!(
                doctor_id = %request.doctor_id,
                locale = %request.locale,
                category = err.category(),
                error = ?err,
                "inquiry failed: {}",
                err
            ),
        }

        result
    }

    async fn try_submit(&self, request: &InquiryRequest) -> Result<(), InquiryError> {
        let directory = self
            .settings
            .doctors
            .as_ref()
            .ok_or(InquiryError::DirectoryNotConfigured)?;

        let doctor = directory
            .find_by_form_id(&request.doctor_id)
            .ok_or_else(|| InquiryError::DoctorNotFound(request.doctor_id.clone()))?;

        let subject_name = i18n::subject_label(self.catalog.as_ref(), &request.locale, &request.subject);

        let payload = OutboundPayload::new(request, doctor, subject_name, self.settings.bot_token.as_ref());

        let endpoint = self
            .settings
            .intake_url
            .as_ref()
            .ok_or(InquiryError::IntakeNotConfigured)?;

        tracing::debug!(doctor = %doctor.name, payload = ?payload, "sending inquiry to intake endpoint");

        let reply = self.intake.submit(endpoint, &payload).await?;
        if !reply.success {
            return Err(InquiryError::Upstream(reply.error));
        }

        self.relay(&payload, &request.locale);
        Ok(())
    }

    /// Direct Telegram notification after a successful intake. Runs detached
    /// so the visitor's result never waits on the Bot API, and never fails
    /// the inquiry.
    fn relay(&self, payload: &OutboundPayload, locale: &str) {
        if !self.settings.direct_relay {
            return;
        }
        let Some(messenger) = &self.messenger else {
            return;
        };
        if payload.doctor_telegram_chat_id.is_empty() {
            tracing::debug!(doctor = %payload.doctor_name, "doctor has no Telegram chat, relay skipped");
            return;
        }

        let messenger = Arc::clone(messenger);
        let chat_id = payload.doctor_telegram_chat_id.clone();
        let doctor = payload.doctor_name.clone();
        let text = format_inquiry_message(payload, locale);

        tokio::spawn(async move {
            if let Err(e) = messenger.send(&chat_id, &text).await {
                tracing::error!(doctor = %doctor, "Failed to relay inquiry to Telegram: {}", e);
            }
        });
    }
}
