//! Configuration, errors and logging shared by the whole service

pub mod config;
pub mod error;
pub mod logging;

// Re-exports for convenience
pub use config::Settings;
pub use error::{ConfigError, InquiryError};
pub use logging::init_logger;
