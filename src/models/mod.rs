//! Data Models
//!
//! Configuration structures used throughout the application.

pub mod settings;

pub use settings::*;
