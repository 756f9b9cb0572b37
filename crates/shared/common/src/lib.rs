//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified error handling for HTTP
//! - Explicit per-request logging context
//! - Configuration structures

pub mod config;
pub mod context;
pub mod error;

pub use config::*;
pub use context::RequestContext;
pub use error::{AppError, AppResult, OptionExt};
