//! Conversion engine
//!
//! Every conversion goes through the category's base representation:
//! `to.from_base(from.to_base(value))`. For linear units that is
//! `value / factor(from) * factor(to)`; for temperature the base is Celsius.

use serde::{Serialize, Deserialize};
use unitconv_core::prelude::*;
use crate::table::{UnitTable, TABLE};

/// A completed conversion, with canonical names resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub category: String,
    pub from: String,
    pub to: String,
    pub value: f64,
    pub result: f64,
}

/// Convert `value` from one unit to another within a category
pub fn convert(category: &str, from_unit: &str, to_unit: &str, value: f64) -> Result<f64, ConvertError> {
    convert_in(&TABLE, category, from_unit, to_unit, value).map(|c| c.result)
}

/// Like [`convert`], returning the resolved names alongside the result
pub fn convert_detailed(category: &str, from_unit: &str, to_unit: &str, value: f64) -> Result<Conversion, ConvertError> {
    convert_in(&TABLE, category, from_unit, to_unit, value)
}

/// Express `value` in the category's base unit (Celsius for temperature)
pub fn to_base(category: &str, unit: &str, value: f64) -> Result<f64, ConvertError> {
    to_base_in(&TABLE, category, unit, value)
}

/// Convert against an explicit table
pub fn convert_in(
    table: &UnitTable,
    category: &str,
    from_unit: &str,
    to_unit: &str,
    value: f64,
) -> Result<Conversion, ConvertError> {
    check_finite(value)?;

    let cat = table.category(category)?;
    let from = table.unit(&cat.name, from_unit)?;
    let to = table.unit(&cat.name, to_unit)?;

    if !from.descriptor.same_kind(&to.descriptor) {
        return Err(ConvertError::invalid_table(format!(
            "{}: cannot convert {} ({}) to {} ({})",
            cat.name, from.name, from.descriptor.kind_name(), to.name, to.descriptor.kind_name()
        )));
    }

    // Same unit, no conversion needed
    let result = if from.name == to.name {
        value
    } else {
        to.descriptor.from_base(from.descriptor.to_base(value))
    };
    check_finite(result)?;

    tracing::trace!(category = %cat.name, from = %from.name, to = %to.name, value, result, "converted");

    Ok(Conversion {
        category: cat.name.clone(),
        from: from.name.clone(),
        to: to.name.clone(),
        value,
        result,
    })
}

/// Express a value in the base representation of an explicit table
pub fn to_base_in(table: &UnitTable, category: &str, unit: &str, value: f64) -> Result<f64, ConvertError> {
    check_finite(value)?;
    let base = table.descriptor_of(category, unit)?.to_base(value);
    check_finite(base)?;
    Ok(base)
}

fn check_finite(value: f64) -> Result<(), ConvertError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConvertError::invalid_value(value))
    }
}
