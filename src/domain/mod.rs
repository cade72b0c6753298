//! Domain module containing the core analytics types and rules
//!
//! This module defines the keyword series, the calendar-month type used to
//! address it, the growth calculations, the keyword classification table and
//! the per-session insight request state machine.

pub mod types;
pub mod series;
pub mod growth;
pub mod category;
pub mod session;

// Re-export public types for easy access
pub use types::*;
pub use series::*;
pub use growth::*;
pub use category::*;
pub use session::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("Invalid year: {0}")]
    InvalidYear(i32),

    #[error("Invalid period key '{0}' (expected YYYY-MM)")]
    InvalidPeriodKey(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },
}
