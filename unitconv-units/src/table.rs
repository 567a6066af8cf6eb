//! Unit table - the fixed reference data, organized by category

use std::collections::HashSet;
use std::sync::LazyLock;
use serde::{Serialize, Deserialize};
use unitconv_core::prelude::*;
use crate::{Descriptor, TemperatureScale, Unit};

/// Global unit table, built on first access and never mutated
pub static TABLE: LazyLock<UnitTable> = LazyLock::new(UnitTable::new);

/// Maximum number of "did you mean" candidates attached to an error
const MAX_SUGGESTIONS: usize = 5;

/// A named group of mutually convertible units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    /// Implicit base unit; `None` for temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub units: Vec<Unit>,
}

impl Category {
    pub fn new(name: &str, base_unit: Option<&str>) -> Self {
        Category {
            name: name.to_string(),
            base_unit: base_unit.map(|b| b.to_string()),
            aliases: Vec::new(),
            units: Vec::new(),
        }
    }

    /// Builder: add alternate category names
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases.extend(aliases.iter().map(|a| a.to_string()));
        self
    }

    /// Builder: append a unit
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.units.push(unit);
        self
    }

    /// Resolve a unit by exact spelling, then by name or alias ignoring case.
    /// Symbols only match exactly.
    pub fn unit(&self, name: &str) -> Option<&Unit> {
        let name = name.trim();
        self.units.iter().find(|u| u.matches_exact(name))
            .or_else(|| self.units.iter().find(|u| u.matches_ignore_case(name)))
    }

    /// Unit names in table order
    pub fn unit_names(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.name.as_str()).collect()
    }

    pub fn is_temperature(&self) -> bool {
        self.units.iter().any(|u| !u.descriptor.is_linear())
    }

    fn matches_exact(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| a == name)
    }

    fn matches_ignore_case(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    fn unknown_unit(&self, name: &str) -> ConvertError {
        let candidates = self.units.iter()
            .map(|u| (u.name.as_str(), u.spellings().map(|s| similarity_score(name, s)).max().unwrap_or(0)));
        ConvertError::unknown_unit(&self.name, name)
            .with_suggestions(rank_suggestions(candidates))
    }
}

/// The read-only reference table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitTable {
    categories: Vec<Category>,
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitTable {
    /// Build the built-in reference table
    pub fn new() -> Self {
        let mut table = UnitTable { categories: Vec::new() };
        table.register_all_categories();
        table
    }

    /// Build a table from caller-supplied categories, checking invariants
    pub fn from_categories(categories: Vec<Category>) -> Result<Self, ConvertError> {
        let table = UnitTable { categories };
        table.validate()?;
        Ok(table)
    }

    /// Category names in table order
    pub fn categories(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Iterate over category records
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Look up a category by canonical name, alias, then case-insensitively
    pub fn category(&self, name: &str) -> Result<&Category, ConvertError> {
        let name = name.trim();
        self.categories.iter().find(|c| c.matches_exact(name))
            .or_else(|| self.categories.iter().find(|c| c.matches_ignore_case(name)))
            .ok_or_else(|| self.unknown_category(name))
    }

    /// Unit names of a category, in table order
    pub fn units_in(&self, category: &str) -> Result<Vec<&str>, ConvertError> {
        Ok(self.category(category)?.unit_names())
    }

    /// Resolve a unit within a category
    pub fn unit(&self, category: &str, unit: &str) -> Result<&Unit, ConvertError> {
        let cat = self.category(category)?;
        cat.unit(unit).ok_or_else(|| cat.unknown_unit(unit.trim()))
    }

    /// Conversion descriptor of a unit within a category
    pub fn descriptor_of(&self, category: &str, unit: &str) -> Result<Descriptor, ConvertError> {
        Ok(self.unit(category, unit)?.descriptor)
    }

    /// Check the table invariants, reporting the first violation
    pub fn validate(&self) -> Result<(), ConvertError> {
        let mut category_names = HashSet::new();

        for cat in &self.categories {
            for name in std::iter::once(&cat.name).chain(cat.aliases.iter()) {
                if !category_names.insert(name.to_ascii_lowercase()) {
                    return Err(ConvertError::invalid_table(format!(
                        "category name '{}' is not unique", name
                    )));
                }
            }

            if cat.units.len() < 2 {
                return Err(ConvertError::invalid_table(format!(
                    "category {} has {} unit(s), at least 2 required", cat.name, cat.units.len()
                )));
            }

            let mut spellings = HashSet::new();
            let mut folded = HashSet::new();
            for unit in &cat.units {
                if let Descriptor::Linear { factor } = unit.descriptor {
                    if !factor.is_finite() || factor <= 0.0 {
                        return Err(ConvertError::invalid_table(format!(
                            "{} / {}: factor {} must be positive and finite", cat.name, unit.name, factor
                        )));
                    }
                }
                if !unit.descriptor.same_kind(&cat.units[0].descriptor) {
                    return Err(ConvertError::invalid_table(format!(
                        "{} mixes linear and temperature units ({})", cat.name, unit.name
                    )));
                }
                for spelling in unit.spellings() {
                    if !spellings.insert(spelling) {
                        return Err(ConvertError::invalid_table(format!(
                            "{}: unit name '{}' is not unique", cat.name, spelling
                        )));
                    }
                }
                // names and aliases also match ignoring case
                for spelling in std::iter::once(&unit.name).chain(unit.aliases.iter()) {
                    if !folded.insert(spelling.to_ascii_lowercase()) {
                        return Err(ConvertError::invalid_table(format!(
                            "{}: unit name '{}' is not unique ignoring case", cat.name, spelling
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    fn unknown_category(&self, name: &str) -> ConvertError {
        let candidates = self.categories.iter().map(|c| {
            let score = std::iter::once(c.name.as_str())
                .chain(c.aliases.iter().map(|a| a.as_str()))
                .map(|s| similarity_score(name, s))
                .max()
                .unwrap_or(0);
            (c.name.as_str(), score)
        });
        ConvertError::unknown_category(name).with_suggestions(rank_suggestions(candidates))
    }

    fn register(&mut self, category: Category) {
        self.categories.push(category);
    }

    fn register_all_categories(&mut self) {
        self.register_length_units();
        self.register_mass_units();
        self.register_temperature_units();
        self.register_area_units();
        self.register_volume_units();
        self.register_speed_units();
        self.register_time_units();
        self.register_data_units();
        self.register_energy_units();
        self.register_pressure_units();
    }

    fn register_length_units(&mut self) {
        self.register(Category::new("Length", Some("Meter"))
            .with_aliases(&["Distance"])
            .with_unit(Unit::linear("Meter", 1.0).with_symbols(&["m"]).with_aliases(&["meters", "metre", "metres"]))
            .with_unit(Unit::linear("Kilometer", 0.001).with_symbols(&["km"]).with_aliases(&["kilometers", "kilometre", "kilometres"]))
            .with_unit(Unit::linear("Centimeter", 100.0).with_symbols(&["cm"]).with_aliases(&["centimeters"]))
            .with_unit(Unit::linear("Millimeter", 1000.0).with_symbols(&["mm"]).with_aliases(&["millimeters"]))
            .with_unit(Unit::linear("Mile", 0.000621371).with_symbols(&["mi"]).with_aliases(&["miles"]))
            .with_unit(Unit::linear("Yard", 1.09361).with_symbols(&["yd"]).with_aliases(&["yards"]))
            .with_unit(Unit::linear("Foot", 3.28084).with_symbols(&["ft"]).with_aliases(&["feet"]))
            .with_unit(Unit::linear("Inch", 39.3701).with_symbols(&["in"]).with_aliases(&["inches"]))
            .with_unit(Unit::linear("Nautical Mile", 0.000539957).with_symbols(&["nmi"]).with_aliases(&["nautical miles"])));
    }

    fn register_mass_units(&mut self) {
        self.register(Category::new("Weight/Mass", Some("Kilogram"))
            .with_aliases(&["Weight", "Mass"])
            .with_unit(Unit::linear("Kilogram", 1.0).with_symbols(&["kg"]).with_aliases(&["kilograms"]))
            .with_unit(Unit::linear("Gram", 1000.0).with_symbols(&["g"]).with_aliases(&["grams"]))
            .with_unit(Unit::linear("Milligram", 1e6).with_symbols(&["mg"]).with_aliases(&["milligrams"]))
            .with_unit(Unit::linear("Metric Ton", 0.001).with_symbols(&["t"]).with_aliases(&["tonne", "tonnes"]))
            .with_unit(Unit::linear("Pound", 2.20462).with_symbols(&["lb", "lbs"]).with_aliases(&["pounds"]))
            .with_unit(Unit::linear("Ounce", 35.274).with_symbols(&["oz"]).with_aliases(&["ounces"]))
            .with_unit(Unit::linear("Stone", 0.157473).with_symbols(&["st"])));
    }

    fn register_temperature_units(&mut self) {
        self.register(Category::new("Temperature", None)
            .with_aliases(&["Temp"])
            .with_unit(Unit::temperature("Celsius", TemperatureScale::Celsius).with_symbols(&["C", "°C"]))
            .with_unit(Unit::temperature("Fahrenheit", TemperatureScale::Fahrenheit).with_symbols(&["F", "°F"]))
            .with_unit(Unit::temperature("Kelvin", TemperatureScale::Kelvin).with_symbols(&["K"])));
    }

    fn register_area_units(&mut self) {
        self.register(Category::new("Area", Some("Square Meter"))
            .with_unit(Unit::linear("Square Meter", 1.0).with_symbols(&["m²", "m2"]).with_aliases(&["sq m"]))
            .with_unit(Unit::linear("Square Kilometer", 1e-6).with_symbols(&["km²", "km2"]).with_aliases(&["sq km"]))
            .with_unit(Unit::linear("Square Mile", 3.861e-7).with_symbols(&["mi²", "mi2"]).with_aliases(&["sq mi"]))
            .with_unit(Unit::linear("Square Yard", 1.19599).with_symbols(&["yd²", "yd2"]).with_aliases(&["sq yd"]))
            .with_unit(Unit::linear("Square Foot", 10.7639).with_symbols(&["ft²", "ft2"]).with_aliases(&["sq ft"]))
            .with_unit(Unit::linear("Acre", 0.000247105).with_symbols(&["ac"]).with_aliases(&["acres"]))
            .with_unit(Unit::linear("Hectare", 0.0001).with_symbols(&["ha"]).with_aliases(&["hectares"])));
    }

    fn register_volume_units(&mut self) {
        self.register(Category::new("Volume", Some("Cubic Meter"))
            .with_unit(Unit::linear("Cubic Meter", 1.0).with_symbols(&["m³", "m3"]))
            .with_unit(Unit::linear("Liter", 1000.0).with_symbols(&["L"]).with_aliases(&["liters", "litre", "litres"]))
            .with_unit(Unit::linear("Milliliter", 1e6).with_symbols(&["mL"]).with_aliases(&["milliliters"]))
            .with_unit(Unit::linear("Gallon (US)", 264.172).with_symbols(&["gal"]).with_aliases(&["Gallon(US)", "gallon"]))
            .with_unit(Unit::linear("Quart (US)", 1056.69).with_symbols(&["qt"]).with_aliases(&["Quart(US)", "quart"]))
            .with_unit(Unit::linear("Pint (US)", 2113.38).with_symbols(&["pt"]).with_aliases(&["Pint(US)", "pint"]))
            .with_unit(Unit::linear("Cup", 4226.75).with_aliases(&["cups"])));
    }

    fn register_speed_units(&mut self) {
        self.register(Category::new("Speed", Some("Meters per Second"))
            .with_aliases(&["Velocity"])
            .with_unit(Unit::linear("Meters per Second", 1.0).with_symbols(&["m/s", "mps"]))
            .with_unit(Unit::linear("Kilometers per Hour", 3.6).with_symbols(&["km/h", "kph", "kmh"]))
            .with_unit(Unit::linear("Miles per Hour", 2.23694).with_symbols(&["mph", "mi/h"]))
            .with_unit(Unit::linear("Knots", 1.94384).with_symbols(&["kn", "kt"]).with_aliases(&["knot"])));
    }

    fn register_time_units(&mut self) {
        self.register(Category::new("Time", Some("Second"))
            .with_aliases(&["Duration"])
            .with_unit(Unit::linear("Second", 1.0).with_symbols(&["s", "sec"]).with_aliases(&["seconds"]))
            .with_unit(Unit::linear("Minute", 1.0 / 60.0).with_symbols(&["min"]).with_aliases(&["minutes"]))
            .with_unit(Unit::linear("Hour", 1.0 / 3600.0).with_symbols(&["h", "hr"]).with_aliases(&["hours"]))
            .with_unit(Unit::linear("Day", 1.0 / 86400.0).with_symbols(&["d"]).with_aliases(&["days"]))
            .with_unit(Unit::linear("Week", 1.0 / 604800.0).with_symbols(&["wk"]).with_aliases(&["weeks"]))
            .with_unit(Unit::linear("Month", 1.0 / 2592000.0).with_symbols(&["mo"]).with_aliases(&["months"]))
            .with_unit(Unit::linear("Year", 1.0 / 31536000.0).with_symbols(&["yr"]).with_aliases(&["years"])));
    }

    fn register_data_units(&mut self) {
        self.register(Category::new("Digital Storage", Some("Byte"))
            .with_aliases(&["Data", "Storage"])
            .with_unit(Unit::linear("Byte", 1.0).with_symbols(&["B"]).with_aliases(&["bytes"]))
            .with_unit(Unit::linear("Kilobyte", 1.0 / 1024.0).with_symbols(&["KB"]).with_aliases(&["kilobytes"]))
            .with_unit(Unit::linear("Megabyte", 1.0 / 1048576.0).with_symbols(&["MB"]).with_aliases(&["megabytes"]))
            .with_unit(Unit::linear("Gigabyte", 1.0 / 1073741824.0).with_symbols(&["GB"]).with_aliases(&["gigabytes"]))
            .with_unit(Unit::linear("Terabyte", 1.0 / 1099511627776.0).with_symbols(&["TB"]).with_aliases(&["terabytes"])));
    }

    fn register_energy_units(&mut self) {
        self.register(Category::new("Energy", Some("Joule"))
            .with_unit(Unit::linear("Joule", 1.0).with_symbols(&["J"]).with_aliases(&["joules"]))
            .with_unit(Unit::linear("Kilojoule", 0.001).with_symbols(&["kJ"]).with_aliases(&["kilojoules"]))
            .with_unit(Unit::linear("Calorie", 0.239006).with_symbols(&["cal"]).with_aliases(&["calories"]))
            .with_unit(Unit::linear("Kilocalorie", 0.000239006).with_symbols(&["kcal"]).with_aliases(&["kilocalories"]))
            .with_unit(Unit::linear("Watt-hour", 0.000277778).with_symbols(&["Wh"]).with_aliases(&["watt hour"]))
            .with_unit(Unit::linear("Kilowatt-hour", 0.000000277778).with_symbols(&["kWh"]).with_aliases(&["kilowatt hour"])));
    }

    fn register_pressure_units(&mut self) {
        self.register(Category::new("Pressure", Some("Pascal"))
            .with_unit(Unit::linear("Pascal", 1.0).with_symbols(&["Pa"]))
            .with_unit(Unit::linear("Kilopascal", 0.001).with_symbols(&["kPa"]))
            .with_unit(Unit::linear("Bar", 0.00001).with_aliases(&["bars"]))
            .with_unit(Unit::linear("PSI", 0.000145038).with_symbols(&["lbf/in²"]))
            .with_unit(Unit::linear("Atmosphere", 0.00000986923).with_symbols(&["atm"])));
    }
}

/// Similarity between a query and a candidate spelling (0 = unrelated)
fn similarity_score(query: &str, candidate: &str) -> usize {
    let query = query.to_lowercase();
    let candidate = candidate.to_lowercase();
    if query.is_empty() {
        return 0;
    }

    let mut score = 0;

    // Exact prefix match is best
    if candidate.starts_with(&query) {
        score += 100;
    }
    // Contains the query
    else if candidate.contains(&query) {
        score += 50;
    }
    // Query extends the candidate ("meters2" -> "meters")
    else if candidate.len() >= 3 && query.starts_with(&candidate) {
        score += 25;
    }

    score
}

/// Keep candidates with a positive score, best first, table order on ties
fn rank_suggestions<'a>(candidates: impl Iterator<Item = (&'a str, usize)>) -> Vec<String> {
    let mut matches: Vec<(&str, usize)> = candidates.filter(|(_, score)| *score > 0).collect();
    matches.sort_by(|a, b| b.1.cmp(&a.1));
    matches.into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(name, _)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_valid() {
        assert_eq!(TABLE.validate(), Ok(()));
    }

    #[test]
    fn test_category_order() {
        assert_eq!(TABLE.categories(), vec![
            "Length", "Weight/Mass", "Temperature", "Area", "Volume",
            "Speed", "Time", "Digital Storage", "Energy", "Pressure",
        ]);
    }

    #[test]
    fn test_units_in_preserves_order() {
        let units = TABLE.units_in("Length").unwrap();
        assert_eq!(units.first(), Some(&"Meter"));
        assert_eq!(units.last(), Some(&"Nautical Mile"));
        assert_eq!(units.len(), 9);

        assert_eq!(TABLE.units_in("Temperature").unwrap(), vec!["Celsius", "Fahrenheit", "Kelvin"]);
    }

    #[test]
    fn test_every_category_has_two_units() {
        for cat in TABLE.iter() {
            assert!(cat.units.len() >= 2, "{} has too few units", cat.name);
        }
    }

    #[test]
    fn test_reference_factors() {
        assert_eq!(TABLE.descriptor_of("Length", "Mile").unwrap().factor(), Some(0.000621371));
        assert_eq!(TABLE.descriptor_of("Weight/Mass", "Stone").unwrap().factor(), Some(0.157473));
        assert_eq!(TABLE.descriptor_of("Area", "Square Mile").unwrap().factor(), Some(3.861e-7));
        assert_eq!(TABLE.descriptor_of("Volume", "Cup").unwrap().factor(), Some(4226.75));
        assert_eq!(TABLE.descriptor_of("Time", "Year").unwrap().factor(), Some(1.0 / 31536000.0));
        assert_eq!(TABLE.descriptor_of("Energy", "Kilowatt-hour").unwrap().factor(), Some(0.000000277778));
        assert_eq!(TABLE.descriptor_of("Pressure", "Atmosphere").unwrap().factor(), Some(0.00000986923));
    }

    #[test]
    fn test_temperature_descriptors() {
        let desc = TABLE.descriptor_of("Temperature", "Kelvin").unwrap();
        assert_eq!(desc, Descriptor::Temperature { scale: TemperatureScale::Kelvin });
        assert!(TABLE.category("Temperature").unwrap().is_temperature());
        assert!(!TABLE.category("Length").unwrap().is_temperature());
        assert_eq!(TABLE.category("Temperature").unwrap().base_unit, None);
    }

    #[test]
    fn test_alias_resolution() {
        assert_eq!(TABLE.unit("Length", "km").unwrap().name, "Kilometer");
        assert_eq!(TABLE.unit("Speed", "m/s").unwrap().name, "Meters per Second");
        assert_eq!(TABLE.unit("Digital Storage", "KB").unwrap().name, "Kilobyte");
        assert_eq!(TABLE.unit("Volume", "Gallon(US)").unwrap().name, "Gallon (US)");
        assert_eq!(TABLE.unit("Temperature", "°F").unwrap().name, "Fahrenheit");
    }

    #[test]
    fn test_case_insensitive_resolution() {
        assert_eq!(TABLE.unit("length", "METER").unwrap().name, "Meter");
        assert_eq!(TABLE.unit("digital storage", "KILOBYTES").unwrap().name, "Kilobyte");
        assert_eq!(TABLE.unit("Volume", "gallon(us)").unwrap().name, "Gallon (US)");
        assert_eq!(TABLE.unit("Pressure", "psi").unwrap().name, "PSI");
        assert_eq!(TABLE.unit(" Length ", " Foot ").unwrap().name, "Foot");
    }

    #[test]
    fn test_symbols_do_not_fold_case() {
        assert_eq!(TABLE.unit("Length", "mm").unwrap().name, "Millimeter");
        assert_eq!(TABLE.unit("Weight/Mass", "mg").unwrap().name, "Milligram");
        assert_eq!(TABLE.unit("Digital Storage", "MB").unwrap().name, "Megabyte");

        // case carries meaning: Mm is megameter, Mb is megabit
        for (category, unit) in [
            ("Length", "Mm"),
            ("Length", "M"),
            ("Volume", "ML"),
            ("Digital Storage", "Mb"),
            ("Digital Storage", "kb"),
        ] {
            assert!(
                matches!(TABLE.unit(category, unit), Err(ConvertError::UnknownUnit { .. })),
                "{} resolved in {}", unit, category
            );
        }
    }

    #[test]
    fn test_category_aliases() {
        assert_eq!(TABLE.category("Mass").unwrap().name, "Weight/Mass");
        assert_eq!(TABLE.category("weight").unwrap().name, "Weight/Mass");
        assert_eq!(TABLE.category("data").unwrap().name, "Digital Storage");
    }

    #[test]
    fn test_unknown_category() {
        let err = TABLE.units_in("Bogus").unwrap_err();
        assert!(matches!(err, ConvertError::UnknownCategory { ref category, .. } if category == "Bogus"));
    }

    #[test]
    fn test_unknown_category_suggestions() {
        match TABLE.category("Temper").unwrap_err() {
            ConvertError::UnknownCategory { suggestions, .. } => {
                assert_eq!(suggestions, vec!["Temperature".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_unit_names_key_and_category() {
        let err = TABLE.descriptor_of("Length", "Bogus").unwrap_err();
        match err {
            ConvertError::UnknownUnit { category, unit, suggestions } => {
                assert_eq!(category, "Length");
                assert_eq!(unit, "Bogus");
                assert!(suggestions.is_empty());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_unit_suggestions() {
        match TABLE.unit("Length", "Mil").unwrap_err() {
            ConvertError::UnknownUnit { suggestions, .. } => {
                assert!(suggestions.contains(&"Mile".to_string()));
                assert!(suggestions.contains(&"Millimeter".to_string()));
                assert!(suggestions.len() <= MAX_SUGGESTIONS);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unit_from_other_category_is_unknown() {
        assert!(matches!(
            TABLE.unit("Length", "Kilogram"),
            Err(ConvertError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_single_unit_category() {
        let cat = Category::new("Lonely", Some("One")).with_unit(Unit::linear("One", 1.0));
        assert!(matches!(
            UnitTable::from_categories(vec![cat]),
            Err(ConvertError::InvalidTable(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_factor() {
        for factor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cat = Category::new("Broken", Some("A"))
                .with_unit(Unit::linear("A", 1.0))
                .with_unit(Unit::linear("B", factor));
            assert!(
                matches!(UnitTable::from_categories(vec![cat]), Err(ConvertError::InvalidTable(_))),
                "factor {} accepted", factor
            );
        }
    }

    #[test]
    fn test_validate_rejects_duplicate_spelling() {
        let cat = Category::new("Dup", Some("A"))
            .with_unit(Unit::linear("A", 1.0).with_aliases(&["x"]))
            .with_unit(Unit::linear("B", 2.0).with_aliases(&["X"]));
        assert!(matches!(
            UnitTable::from_categories(vec![cat]),
            Err(ConvertError::InvalidTable(_))
        ));
    }

    #[test]
    fn test_validate_allows_symbols_differing_in_case() {
        let cat = Category::new("Length", Some("Meter"))
            .with_unit(Unit::linear("Millimeter", 1000.0).with_symbols(&["mm"]))
            .with_unit(Unit::linear("Megameter", 1e-6).with_symbols(&["Mm"]));
        let table = UnitTable::from_categories(vec![cat]).unwrap();
        assert_eq!(table.unit("Length", "Mm").unwrap().name, "Megameter");
        assert_eq!(table.unit("Length", "mm").unwrap().name, "Millimeter");
        assert!(table.unit("Length", "MM").is_err());
    }

    #[test]
    fn test_validate_rejects_mixed_kinds() {
        let cat = Category::new("Mixed", None)
            .with_unit(Unit::linear("A", 1.0))
            .with_unit(Unit::temperature("Celsius", TemperatureScale::Celsius));
        assert!(matches!(
            UnitTable::from_categories(vec![cat]),
            Err(ConvertError::InvalidTable(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_category() {
        let make = |name: &str| Category::new(name, Some("A"))
            .with_unit(Unit::linear("A", 1.0))
            .with_unit(Unit::linear("B", 2.0));
        assert!(matches!(
            UnitTable::from_categories(vec![make("Same"), make("same")]),
            Err(ConvertError::InvalidTable(_))
        ));
    }

    #[test]
    fn test_custom_table() {
        let cat = Category::new("Ratio", Some("Whole"))
            .with_unit(Unit::linear("Whole", 1.0))
            .with_unit(Unit::linear("Percent", 100.0).with_aliases(&["%"]));
        let table = UnitTable::from_categories(vec![cat]).unwrap();
        assert_eq!(table.categories(), vec!["Ratio"]);
        assert_eq!(table.unit("Ratio", "%").unwrap().name, "Percent");
    }

    #[test]
    fn test_similarity_score() {
        assert_eq!(similarity_score("met", "Meter"), 100);
        assert_eq!(similarity_score("ile", "Mile"), 50);
        assert_eq!(similarity_score("meters2", "meters"), 25);
        assert_eq!(similarity_score("xyz", "Meter"), 0);
        assert_eq!(similarity_score("", "Meter"), 0);
    }
}
