//! Denom Core - Fundamental types
//!
//! This crate provides the core types used throughout Denom:
//! - `Decimal`: Exact decimal numbers (sign, digit magnitude, scale)
//! - `RoundingMode`: How a capped fraction is rounded
//! - `ConversionError`: Engine failures (`InvalidNumber`, `UnknownUnit`)
//! - `DenomError`: Structured, serializable errors for hosts

mod decimal;
mod error;

pub use decimal::{Decimal, RoundingMode};
pub use error::{codes, ConversionError, DenomError, ErrorContext, Severity};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{ConversionError, Decimal, DenomError, RoundingMode, Severity};
}
