//! clinicweb - HTTP front of the clinic site
//!
//! - `cli`: command line interface
//! - `web_server`: axum router, handlers and server lifecycle

pub mod cli;
pub mod web_server;

pub use web_server::{create_router, start_web_server, ApiError, WebState};
