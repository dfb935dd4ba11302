//! Infrastructure layer module
//!
//! This module contains the adapters around the curriculum core:
//! - Configuration management
//! - Logging infrastructure
//! - Trainer state and suggestion files

pub mod config;
pub mod files;
pub mod logging;
