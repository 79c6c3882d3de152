//! Units of measure and measured values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Units of measure understood by the metadata model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Metre,
    Kilometre,
    Centimetre,
    Millimetre,
    Foot,
    Degree,
    Radian,
    Arcsecond,
    Second,
    Day,
    Unity,
    PartsPerMillion,
    Percent,
}

impl Unit {
    pub const ALL: [Unit; 13] = [
        Unit::Metre,
        Unit::Kilometre,
        Unit::Centimetre,
        Unit::Millimetre,
        Unit::Foot,
        Unit::Degree,
        Unit::Radian,
        Unit::Arcsecond,
        Unit::Second,
        Unit::Day,
        Unit::Unity,
        Unit::PartsPerMillion,
        Unit::Percent,
    ];

    /// The unit symbol, as written in `uom` attributes.
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Metre => "m",
            Unit::Kilometre => "km",
            Unit::Centimetre => "cm",
            Unit::Millimetre => "mm",
            Unit::Foot => "ft",
            Unit::Degree => "deg",
            Unit::Radian => "rad",
            Unit::Arcsecond => "arcsec",
            Unit::Second => "s",
            Unit::Day => "d",
            Unit::Unity => "1",
            Unit::PartsPerMillion => "ppm",
            Unit::Percent => "%",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Unit::Metre => "metre",
            Unit::Kilometre => "kilometre",
            Unit::Centimetre => "centimetre",
            Unit::Millimetre => "millimetre",
            Unit::Foot => "foot",
            Unit::Degree => "degree",
            Unit::Radian => "radian",
            Unit::Arcsecond => "arc-second",
            Unit::Second => "second",
            Unit::Day => "day",
            Unit::Unity => "unity",
            Unit::PartsPerMillion => "parts per million",
            Unit::Percent => "percent",
        }
    }

    /// The EPSG code of this unit. Units without a code have no canonical
    /// reference and are always written by symbol.
    pub fn epsg_code(self) -> Option<u32> {
        match self {
            Unit::Metre => Some(9001),
            Unit::Kilometre => Some(9036),
            Unit::Centimetre => Some(1033),
            Unit::Millimetre => Some(1025),
            Unit::Foot => Some(9002),
            Unit::Degree => Some(9122),
            Unit::Radian => Some(9101),
            Unit::Arcsecond => Some(9104),
            Unit::Second => Some(1040),
            Unit::Day => None,
            Unit::Unity => Some(9201),
            Unit::PartsPerMillion => Some(9202),
            Unit::Percent => None,
        }
    }

    pub fn from_epsg_code(code: u32) -> Option<Unit> {
        Unit::ALL.into_iter().find(|u| u.epsg_code() == Some(code))
    }

    /// Finds a unit by symbol or name, ignoring case for names.
    pub fn from_symbol(symbol: &str) -> Option<Unit> {
        let symbol = symbol.trim();
        if let Some(unit) = Unit::ALL.into_iter().find(|u| u.symbol() == symbol) {
            return Some(unit);
        }
        let lower = symbol.to_ascii_lowercase();
        let unit = match lower.as_str() {
            "meter" | "meters" | "metres" => Unit::Metre,
            "kilometer" | "kilometers" | "kilometres" => Unit::Kilometre,
            "centimeter" | "centimeters" | "centimetres" => Unit::Centimetre,
            "millimeter" | "millimeters" | "millimetres" => Unit::Millimetre,
            "feet" => Unit::Foot,
            "°" | "degrees" => Unit::Degree,
            "radians" => Unit::Radian,
            "″" | "arcsecond" | "arcseconds" => Unit::Arcsecond,
            "sec" | "seconds" => Unit::Second,
            "days" => Unit::Day,
            "percentage" => Unit::Percent,
            other => return Unit::ALL.into_iter().find(|u| u.name() == other),
        };
        Some(unit)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A numeric value with its unit of measure.
///
/// A measure built with [`Measure::by_reference`] asks writers to designate
/// its unit by canonical reference instead of by symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Measure {
    pub value: Decimal,
    pub unit: Unit,
    prefer_pointer: bool,
}

impl Measure {
    pub fn new(value: Decimal, unit: Unit) -> Self {
        Self {
            value,
            unit,
            prefer_pointer: false,
        }
    }

    /// Same measure, designating its unit by reference.
    ///
    /// Units without an EPSG code have no canonical reference and stay
    /// designated by symbol.
    pub fn by_reference(mut self) -> Self {
        self.prefer_pointer = self.unit.epsg_code().is_some();
        self
    }

    pub fn prefer_pointer(&self) -> bool {
        self.prefer_pointer
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_unit_lookup() {
        assert_eq!(Unit::from_symbol("m"), Some(Unit::Metre));
        assert_eq!(Unit::from_symbol("Metres"), Some(Unit::Metre));
        assert_eq!(Unit::from_symbol("parts per million"), Some(Unit::PartsPerMillion));
        assert_eq!(Unit::from_symbol("furlong"), None);
        assert_eq!(Unit::from_epsg_code(9122), Some(Unit::Degree));
        assert_eq!(Unit::from_epsg_code(1), None);
    }

    #[test]
    fn test_every_symbol_round_trips() {
        for unit in Unit::ALL {
            assert_eq!(Unit::from_symbol(unit.symbol()), Some(unit));
            assert_eq!(Unit::from_symbol(unit.name()), Some(unit));
        }
    }

    #[test]
    fn test_measure_display() {
        let measure = Measure::new(dec!(12.5), Unit::Metre).by_reference();
        assert!(measure.prefer_pointer());
        assert_eq!(measure.to_string(), "12.5 m");
    }

    #[test]
    fn test_units_without_code_stay_symbolic() {
        let percent = Measure::new(dec!(40), Unit::Percent).by_reference();
        assert!(!percent.prefer_pointer());
        assert_eq!(percent, Measure::new(dec!(40), Unit::Percent));
        assert!(Measure::new(dec!(1), Unit::Degree).by_reference().prefer_pointer());
    }
}
