//! Unit representation with conversion descriptors

use std::fmt;
use serde::{Serialize, Deserialize};

/// Offset between the Kelvin and Celsius scales
pub const KELVIN_OFFSET: f64 = 273.15;

/// Temperature scales handled by the affine conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureScale {
    /// Convert a reading on this scale to Celsius
    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => value,
            TemperatureScale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureScale::Kelvin => value - KELVIN_OFFSET,
        }
    }

    /// Convert a Celsius reading to this scale
    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => celsius,
            TemperatureScale::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureScale::Kelvin => celsius + KELVIN_OFFSET,
        }
    }
}

/// How a unit converts to and from its category's base representation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Descriptor {
    /// `factor * base_value = unit_value`
    Linear { factor: f64 },
    /// Affine conversion through Celsius
    Temperature { scale: TemperatureScale },
}

impl Descriptor {
    /// Express `value` (in this unit) in the base representation.
    /// For temperature the base representation is Celsius.
    pub fn to_base(&self, value: f64) -> f64 {
        match self {
            Descriptor::Linear { factor } => value / factor,
            Descriptor::Temperature { scale } => scale.to_celsius(value),
        }
    }

    /// Express a base-representation value in this unit
    pub fn from_base(&self, base: f64) -> f64 {
        match self {
            Descriptor::Linear { factor } => base * factor,
            Descriptor::Temperature { scale } => scale.from_celsius(base),
        }
    }

    pub fn is_linear(&self) -> bool {
        matches!(self, Descriptor::Linear { .. })
    }

    /// Scale factor, for linear units only
    pub fn factor(&self) -> Option<f64> {
        match self {
            Descriptor::Linear { factor } => Some(*factor),
            Descriptor::Temperature { .. } => None,
        }
    }

    /// Check if two descriptors use the same conversion scheme
    pub fn same_kind(&self, other: &Descriptor) -> bool {
        self.is_linear() == other.is_linear()
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Descriptor::Linear { .. } => "linear",
            Descriptor::Temperature { .. } => "temperature",
        }
    }
}

/// A named unit within a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Canonical unit name (e.g., "Meter", "Gallon (US)")
    pub name: String,
    /// Abbreviations, matched exactly ("mm" is not "Mm")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symbols: Vec<String>,
    /// Spelled-out alternatives, matched case-insensitively
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(flatten)]
    pub descriptor: Descriptor,
}

impl Unit {
    /// Create a unit with proportional conversion
    pub fn linear(name: &str, factor: f64) -> Self {
        Unit {
            name: name.to_string(),
            symbols: Vec::new(),
            aliases: Vec::new(),
            descriptor: Descriptor::Linear { factor },
        }
    }

    /// Create a temperature unit
    pub fn temperature(name: &str, scale: TemperatureScale) -> Self {
        Unit {
            name: name.to_string(),
            symbols: Vec::new(),
            aliases: Vec::new(),
            descriptor: Descriptor::Temperature { scale },
        }
    }

    /// Builder: add case-sensitive abbreviations
    pub fn with_symbols(mut self, symbols: &[&str]) -> Self {
        self.symbols.extend(symbols.iter().map(|s| s.to_string()));
        self
    }

    /// Builder: add spelled-out alternatives
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases.extend(aliases.iter().map(|a| a.to_string()));
        self
    }

    /// Exact match on the canonical name, a symbol or an alias
    pub fn matches_exact(&self, name: &str) -> bool {
        self.spellings().any(|s| s == name)
    }

    /// ASCII case-insensitive match on the canonical name or an alias.
    /// Symbols never match here: case distinguishes "mm" from "Mm".
    pub fn matches_ignore_case(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// Canonical name, then symbols, then aliases
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.symbols.iter().map(|s| s.as_str()))
            .chain(self.aliases.iter().map(|a| a.as_str()))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_temperature_to_celsius() {
        assert_eq!(TemperatureScale::Celsius.to_celsius(25.0), 25.0);
        assert_eq!(TemperatureScale::Fahrenheit.to_celsius(212.0), 100.0);
        assert!(close(TemperatureScale::Kelvin.to_celsius(0.0), -273.15));
    }

    #[test]
    fn test_temperature_from_celsius() {
        assert_eq!(TemperatureScale::Fahrenheit.from_celsius(100.0), 212.0);
        assert_eq!(TemperatureScale::Fahrenheit.from_celsius(-40.0), -40.0);
        assert!(close(TemperatureScale::Kelvin.from_celsius(0.0), 273.15));
    }

    #[test]
    fn test_linear_descriptor() {
        let km = Descriptor::Linear { factor: 0.001 };
        assert!(close(km.to_base(1.0), 1000.0));
        assert!(close(km.from_base(5000.0), 5.0));
        assert_eq!(km.factor(), Some(0.001));
    }

    #[test]
    fn test_same_kind() {
        let linear = Descriptor::Linear { factor: 2.0 };
        let temp = Descriptor::Temperature { scale: TemperatureScale::Kelvin };
        assert!(linear.same_kind(&Descriptor::Linear { factor: 3.0 }));
        assert!(!linear.same_kind(&temp));
        assert_eq!(temp.factor(), None);
    }

    #[test]
    fn test_unit_matching() {
        let unit = Unit::linear("Kilometer", 0.001)
            .with_symbols(&["km"])
            .with_aliases(&["kilometres"]);
        assert!(unit.matches_exact("Kilometer"));
        assert!(unit.matches_exact("km"));
        assert!(unit.matches_exact("kilometres"));
        assert!(!unit.matches_exact("KM"));
        assert!(unit.matches_ignore_case("kilometer"));
        assert!(unit.matches_ignore_case("KILOMETRES"));
        assert_eq!(unit.spellings().count(), 3);
    }

    #[test]
    fn test_symbols_are_case_sensitive() {
        let unit = Unit::linear("Millimeter", 1000.0).with_symbols(&["mm"]);
        assert!(unit.matches_exact("mm"));
        assert!(!unit.matches_exact("Mm"));
        assert!(!unit.matches_ignore_case("Mm"));
        assert!(!unit.matches_ignore_case("MM"));
    }

    #[test]
    fn test_descriptor_serialization() {
        let unit = Unit::temperature("Kelvin", TemperatureScale::Kelvin);
        let json = serde_json::to_value(&unit).unwrap();
        assert_eq!(json["kind"], "temperature");
        assert_eq!(json["scale"], "kelvin");
        assert!(json.get("aliases").is_none());
        assert!(json.get("symbols").is_none());

        let unit = Unit::linear("Gram", 1000.0).with_symbols(&["g"]).with_aliases(&["grams"]);
        let json = serde_json::to_value(&unit).unwrap();
        assert_eq!(json["kind"], "linear");
        assert_eq!(json["factor"], 1000.0);
        assert_eq!(json["symbols"][0], "g");
        assert_eq!(json["aliases"][0], "grams");
    }
}
