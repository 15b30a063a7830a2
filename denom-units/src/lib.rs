//! Denom Units - Exact power-of-ten unit conversion
//!
//! A domain is an ordered set of units, each worth 10^exponent base units.
//! Conversions shift the decimal point and never go through a float.
//!
//! Built-in domains:
//! - ethereum (Wei, Gwei, Szabo, Finney, Ether)
//! - length (nm ... km)
//! - mass (mg ... t)
//! - data (B ... TB, SI prefixes)

mod unit;
mod unit_set;
mod convert;
mod units;

pub use unit::Unit;
pub use unit_set::{UnitSet, UnitSetError};
pub use convert::{ConversionOptions, ConversionTable};
pub use units::{domain, domains, DomainRegistry, DOMAINS};

pub use denom_core::{ConversionError, RoundingMode};
