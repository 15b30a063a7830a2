//! Server configuration from the environment
//!
//! - `DENOM_DOMAIN`: domain used when a call names none (default `ethereum`)
//! - `DENOM_MAX_FRACTION_DIGITS`: cap on fractional digits (default: exact)
//! - `DENOM_ROUNDING`: `truncate`, `half_up` or `half_even` (default `truncate`)

use std::env;
use denom_units::{domain, ConversionOptions, RoundingMode};

pub const DOMAIN_VAR: &str = "DENOM_DOMAIN";
pub const MAX_FRACTION_DIGITS_VAR: &str = "DENOM_MAX_FRACTION_DIGITS";
pub const ROUNDING_VAR: &str = "DENOM_ROUNDING";

const DEFAULT_DOMAIN: &str = "ethereum";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub default_domain: String,
    pub options: ConversionOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            default_domain: DEFAULT_DOMAIN.to_string(),
            options: ConversionOptions::exact(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(name) = get(DOMAIN_VAR) {
            let set = domain(&name)
                .ok_or_else(|| format!("{}: unknown domain '{}'", DOMAIN_VAR, name))?;
            config.default_domain = set.name().to_string();
        }

        if let Some(digits) = get(MAX_FRACTION_DIGITS_VAR) {
            let digits: u32 = digits.trim().parse()
                .map_err(|_| format!("{}: expected a non-negative integer, got '{}'", MAX_FRACTION_DIGITS_VAR, digits))?;
            config.options.max_fraction_digits = Some(digits);
        }

        if let Some(mode) = get(ROUNDING_VAR) {
            config.options.rounding = mode.parse::<RoundingMode>()
                .map_err(|e| format!("{}: {}", ROUNDING_VAR, e))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert!(config.options.is_exact());
    }

    #[test]
    fn test_reads_all_vars() {
        let config = ServerConfig::from_lookup(lookup(&[
            (DOMAIN_VAR, "Length"),
            (MAX_FRACTION_DIGITS_VAR, "6"),
            (ROUNDING_VAR, "half_even"),
        ])).unwrap();
        assert_eq!(config.default_domain, "length");
        assert_eq!(config.options, ConversionOptions::capped(6, RoundingMode::HalfEven));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = ServerConfig::from_lookup(lookup(&[(MAX_FRACTION_DIGITS_VAR, " ")])).unwrap();
        assert!(config.options.is_exact());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(ServerConfig::from_lookup(lookup(&[(DOMAIN_VAR, "temperature")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[(MAX_FRACTION_DIGITS_VAR, "-1")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[(ROUNDING_VAR, "ceil")])).is_err());
    }
}
