//! Outbound side of the contact pipeline: the normalized payload, the
//! reply contract and the HTTP client for the intake script.

pub mod client;
pub mod payload;

pub use client::{interpret_reply, IntakeError, IntakeGateway, ScriptIntake};
pub use payload::{IntakeReply, OutboundPayload};
