//! Promptdock Core Library
//!
//! This crate provides the pieces shared by the promptdock shell and its
//! plugins: the error type and the configuration model with its loader.

pub mod config;
pub mod error;

pub use error::{Error, Result};

/// Promptdock version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
