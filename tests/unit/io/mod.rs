pub mod configuration;
pub mod error;
pub mod export;
pub mod progress;
