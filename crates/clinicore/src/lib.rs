//! clinicore - server-side core of the clinic website
//!
//! # Module Structure
//!
//! - `core`: configuration, errors and logging
//! - `directory`: doctor directory and its browser-safe roster
//! - `i18n`: localized subject tags (Fluent resources under `locales/`)
//! - `intake`: outbound payload and the intake endpoint client
//! - `inquiry`: the contact-form submission pipeline
//! - `telegram`: doctor notification relay and chat onboarding

pub mod core;
pub mod directory;
pub mod i18n;
pub mod inquiry;
pub mod intake;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{config, InquiryError, Settings};
pub use directory::{DoctorDirectory, DoctorRecord, PublicDoctor};
pub use i18n::{FluentCatalog, SubjectCatalog, SubjectTag};
pub use inquiry::{ContactPipeline, InquiryOutcome, InquiryRequest};
pub use intake::{IntakeGateway, OutboundPayload, ScriptIntake};
pub use telegram::{Messenger, PendingChat, TeloxideMessenger};
