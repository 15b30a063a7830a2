//! Unit representation: a label and a power-of-ten exponent

use std::fmt;
use serde::{Serialize, Deserialize};

/// A named denomination worth 10^exponent base units
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    /// Display label (e.g., "Wei", "Gwei", "Meter")
    pub label: String,
    /// Long name (e.g., "gigawei"); defaults to the lowercased label
    #[serde(default)]
    pub name: String,
    /// Power of ten relative to the domain's base unit
    pub exponent: i32,
    /// Alternative spellings accepted on lookup
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl Unit {
    pub fn new(label: &str, exponent: i32) -> Self {
        Unit {
            label: label.to_string(),
            name: label.to_ascii_lowercase(),
            exponent,
            aliases: Vec::new(),
        }
    }

    /// Builder: set the long name
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Builder: add lookup aliases
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases.extend(aliases.iter().map(|a| a.to_string()));
        self
    }

    /// Check whether `label` names this unit (ASCII case-insensitive)
    pub fn matches(&self, label: &str) -> bool {
        let label = label.trim();
        self.label.eq_ignore_ascii_case(label)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(label))
    }

    /// Same denomination: equal label (case-insensitive) and exponent
    pub fn same_as(&self, other: &Unit) -> bool {
        self.exponent == other.exponent && self.label.eq_ignore_ascii_case(&other.label)
    }

    /// Decimal places a value moves when converted from this unit to `target`
    pub fn shift_to(&self, target: &Unit) -> i64 {
        self.exponent as i64 - target.exponent as i64
    }

    /// Whether this is the base unit of its domain
    pub fn is_base(&self) -> bool {
        self.exponent == 0
    }

    /// Every spelling this unit answers to, label first
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.label.as_str()).chain(self.aliases.iter().map(|a| a.as_str()))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gwei() -> Unit {
        Unit::new("Gwei", 9).named("gigawei").with_aliases(&["shannon", "nanoether"])
    }

    #[test]
    fn test_new_defaults_name() {
        let u = Unit::new("Ether", 18);
        assert_eq!(u.name, "ether");
        assert!(u.aliases.is_empty());
    }

    #[test]
    fn test_matches_label_and_aliases() {
        let g = gwei();
        assert!(g.matches("Gwei"));
        assert!(g.matches("GWEI"));
        assert!(g.matches(" shannon "));
        assert!(g.matches("NanoEther"));
        assert!(!g.matches("wei"));
        assert!(!g.matches("gigawei"));
    }

    #[test]
    fn test_shift_to() {
        let ether = Unit::new("Ether", 18);
        let wei = Unit::new("Wei", 0);
        assert_eq!(ether.shift_to(&wei), 18);
        assert_eq!(wei.shift_to(&ether), -18);
        assert_eq!(ether.shift_to(&ether), 0);
    }

    #[test]
    fn test_same_as() {
        assert!(gwei().same_as(&Unit::new("gwei", 9)));
        assert!(!gwei().same_as(&Unit::new("Gwei", 6)));
    }

    #[test]
    fn test_is_base() {
        assert!(Unit::new("Wei", 0).is_base());
        assert!(!gwei().is_base());
    }

    #[test]
    fn test_spellings() {
        let g = gwei();
        let spellings: Vec<&str> = g.spellings().collect();
        assert_eq!(spellings, vec!["Gwei", "shannon", "nanoether"]);
    }
}
