//! Storage Layer
//!
//! Reads the JSON configuration file. The relay keeps no other state.

pub mod config;

pub use config::*;
