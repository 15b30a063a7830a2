//! Built-in unit domains

use std::sync::LazyLock;
use tracing::error;
use crate::{Unit, UnitSet};

/// Global domain registry
pub static DOMAINS: LazyLock<DomainRegistry> = LazyLock::new(DomainRegistry::new);

/// Look up a built-in domain by name (ASCII case-insensitive)
pub fn domain(name: &str) -> Option<&'static UnitSet> {
    DOMAINS.get(name)
}

/// All built-in domains in registration order
pub fn domains() -> &'static [UnitSet] {
    DOMAINS.all()
}

/// Registry of all built-in domains
pub struct DomainRegistry {
    domains: Vec<UnitSet>,
}

impl DomainRegistry {
    pub fn new() -> Self {
        let mut registry = DomainRegistry { domains: Vec::new() };
        registry.register_all_domains();
        registry
    }

    pub fn get(&self, name: &str) -> Option<&UnitSet> {
        let name = name.trim();
        self.domains.iter().find(|d| d.name().eq_ignore_ascii_case(name))
    }

    pub fn all(&self) -> &[UnitSet] {
        &self.domains
    }

    pub fn names(&self) -> Vec<&str> {
        self.domains.iter().map(|d| d.name()).collect()
    }

    fn register(&mut self, name: &str, units: Vec<Unit>) {
        match UnitSet::new(name, units) {
            Ok(set) => self.domains.push(set),
            Err(e) => error!(domain = name, error = %e, "skipping invalid built-in domain"),
        }
    }

    fn register_all_domains(&mut self) {
        self.register_ethereum();
        self.register_length();
        self.register_mass();
        self.register_data();
    }

    fn register_ethereum(&mut self) {
        self.register("ethereum", vec![
            Unit::new("Wei", 0),
            Unit::new("Gwei", 9).named("gigawei").with_aliases(&["shannon", "nanoether"]),
            Unit::new("Szabo", 12).with_aliases(&["microether"]),
            Unit::new("Finney", 15).with_aliases(&["milliether"]),
            Unit::new("Ether", 18).with_aliases(&["eth"]),
        ]);
    }

    fn register_length(&mut self) {
        // Base unit is the nanometer
        self.register("length", vec![
            Unit::new("Nanometer", 0).with_aliases(&["nm", "nanometre"]),
            Unit::new("Micrometer", 3).with_aliases(&["um", "μm", "micron", "micrometre"]),
            Unit::new("Millimeter", 6).with_aliases(&["mm", "millimetre"]),
            Unit::new("Centimeter", 7).with_aliases(&["cm", "centimetre"]),
            Unit::new("Decimeter", 8).with_aliases(&["dm", "decimetre"]),
            Unit::new("Meter", 9).with_aliases(&["m", "metre"]),
            Unit::new("Kilometer", 12).with_aliases(&["km", "kilometre"]),
        ]);
    }

    fn register_mass(&mut self) {
        self.register("mass", vec![
            Unit::new("Milligram", 0).with_aliases(&["mg"]),
            Unit::new("Gram", 3).with_aliases(&["g"]),
            Unit::new("Kilogram", 6).with_aliases(&["kg"]),
            Unit::new("Tonne", 9).named("metric ton").with_aliases(&["t"]),
        ]);
    }

    fn register_data(&mut self) {
        // SI decimal prefixes; 1 kB = 1000 B
        self.register("data", vec![
            Unit::new("Byte", 0).with_aliases(&["b"]),
            Unit::new("Kilobyte", 3).with_aliases(&["kb"]),
            Unit::new("Megabyte", 6).with_aliases(&["mb"]),
            Unit::new("Gigabyte", 9).with_aliases(&["gb"]),
            Unit::new("Terabyte", 12).with_aliases(&["tb"]),
        ]);
    }
}

impl Default for DomainRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtin_domains_register() {
        assert_eq!(DOMAINS.names(), vec!["ethereum", "length", "mass", "data"]);
    }

    #[test]
    fn test_domain_lookup_case_insensitive() {
        assert!(domain("Ethereum").is_some());
        assert!(domain(" LENGTH ").is_some());
        assert!(domain("temperature").is_none());
    }

    #[test]
    fn test_ethereum_exponents() {
        let eth = domain("ethereum").unwrap();
        let pairs: Vec<(&str, i32)> = eth.iter().map(|u| (u.label.as_str(), u.exponent)).collect();
        assert_eq!(pairs, vec![("Wei", 0), ("Gwei", 9), ("Szabo", 12), ("Finney", 15), ("Ether", 18)]);
        assert!(eth.base().is_base());
    }

    #[test]
    fn test_every_domain_has_a_base_unit() {
        for d in domains() {
            assert_eq!(d.base().exponent, 0, "{}", d.name());
        }
    }

    #[test]
    fn test_length_domain_converts() {
        let len = domain("length").unwrap();
        assert_eq!(len.convert_labels("1.5", "km", "m").unwrap(), "1500");
        assert_eq!(len.convert_labels("25", "mm", "m").unwrap(), "0.025");
        assert_eq!(len.convert_labels("1", "cm", "um").unwrap(), "10000");
    }

    #[test]
    fn test_mass_domain_converts() {
        let mass = domain("mass").unwrap();
        assert_eq!(mass.convert_labels("2.5", "t", "kg").unwrap(), "2500");
        assert_eq!(mass.convert_labels("1", "mg", "kg").unwrap(), "0.000001");
    }

    #[test]
    fn test_data_domain_converts() {
        let data = domain("data").unwrap();
        assert_eq!(data.convert_labels("1", "TB", "MB").unwrap(), "1000000");
        assert_eq!(data.convert_labels("512", "kB", "GB").unwrap(), "0.000512");
    }
}
