//! unitconv Units - Unit table and conversion engine
//!
//! A fixed table of named units grouped by category, and a pure conversion
//! function over it. Linear categories scale through an implicit base unit;
//! temperature converts through Celsius.
//!
//! Categories:
//! - Length (Meter, Kilometer, Mile, Foot, etc.)
//! - Weight/Mass (Kilogram, Gram, Pound, Ounce, etc.)
//! - Temperature (Celsius, Fahrenheit, Kelvin)
//! - Area (Square Meter, Acre, Hectare, etc.)
//! - Volume (Cubic Meter, Liter, Gallon (US), etc.)
//! - Speed (Meters per Second, Kilometers per Hour, Knots, etc.)
//! - Time (Second, Minute, Hour, ..., Year)
//! - Digital Storage (Byte, Kilobyte, ..., Terabyte)
//! - Energy (Joule, Calorie, Kilowatt-hour, etc.)
//! - Pressure (Pascal, Bar, PSI, Atmosphere, etc.)
//!
//! ```
//! let km = unitconv_units::convert("Length", "Meter", "Kilometer", 1000.0).unwrap();
//! assert_eq!(km, 1.0);
//! ```

mod descriptor;
mod engine;
mod table;

pub use descriptor::{Descriptor, TemperatureScale, Unit, KELVIN_OFFSET};
pub use engine::{convert, convert_detailed, convert_in, to_base, to_base_in, Conversion};
pub use table::{Category, UnitTable, TABLE};
pub use unitconv_core::ConvertError;

/// Category names of the built-in table, in table order
pub fn categories() -> Vec<&'static str> {
    TABLE.categories()
}

/// Unit names of a built-in category, in table order
pub fn units_in(category: &str) -> Result<Vec<&'static str>, ConvertError> {
    TABLE.units_in(category)
}

/// Conversion descriptor of a unit in the built-in table
pub fn descriptor_of(category: &str, unit: &str) -> Result<Descriptor, ConvertError> {
    TABLE.descriptor_of(category, unit)
}
