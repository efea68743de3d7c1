//! Configuration module for age-of-money
//!
//! This module provides configuration management including:
//! - Base directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::AomPaths;
pub use settings::Settings;
