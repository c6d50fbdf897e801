//! Vehicle dataset column contract.
//!
//! The engine is purely numeric. This module is the one place that names the
//! columns callers are expected to supply, and how the fuel-type label turns
//! into the number the engine sees. Encoding at the caller and at training
//! time must agree, so both sides should go through [`FuelType::code`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const ENGINESIZE: &str = "ENGINESIZE";
pub const CYLINDERS: &str = "CYLINDERS";
pub const FUELTYPE: &str = "FUELTYPE";
pub const FUELCONSUMPTION_CITY: &str = "FUELCONSUMPTION_CITY";
pub const FUELCONSUMPTION_HWY: &str = "FUELCONSUMPTION_HWY";
pub const FUELCONSUMPTION_COMB: &str = "FUELCONSUMPTION_COMB";

/// Target column.
pub const TARGET: &str = "CO2EMISSIONS";

/// Feature columns in training column order.
pub const FEATURE_COLUMNS: [&str; 6] = [
    ENGINESIZE,
    CYLINDERS,
    FUELTYPE,
    FUELCONSUMPTION_CITY,
    FUELCONSUMPTION_HWY,
    FUELCONSUMPTION_COMB,
];

/// Fuel type label as it appears in the vehicle dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FuelType {
    /// Premium gasoline.
    Z,
    /// Ethanol blend.
    E,
    /// Regular gasoline.
    X,
    /// Diesel.
    D,
}

impl FuelType {
    /// All labels, in code order.
    pub const ALL: [FuelType; 4] = [FuelType::Z, FuelType::E, FuelType::X, FuelType::D];

    /// Numeric code used by the vehicle dataset: Z=0, E=1, X=2, D=3.
    pub fn code(self) -> f64 {
        match self {
            FuelType::Z => 0.0,
            FuelType::E => 1.0,
            FuelType::X => 2.0,
            FuelType::D => 3.0,
        }
    }

    /// Inverse of [`FuelType::code`].
    pub fn from_code(code: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.code() == code)
    }

    /// Parse a single-letter label (case-insensitive, surrounding whitespace ignored).
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "D" | "d" => Some(FuelType::D),
            "E" | "e" => Some(FuelType::E),
            "X" | "x" => Some(FuelType::X),
            "Z" | "z" => Some(FuelType::Z),
            _ => None,
        }
    }

    /// The dataset letter.
    pub fn letter(self) -> char {
        match self {
            FuelType::D => 'D',
            FuelType::E => 'E',
            FuelType::X => 'X',
            FuelType::Z => 'Z',
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Error returned when a fuel-type label is not one of `D`, `E`, `X`, `Z`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fuel type {0:?} (expected one of D, E, X, Z)")]
pub struct UnknownFuelType(pub String);

impl FromStr for FuelType {
    type Err = UnknownFuelType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownFuelType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("z", FuelType::Z, 0.0)]
    #[case("E", FuelType::E, 1.0)]
    #[case("X", FuelType::X, 2.0)]
    #[case("D", FuelType::D, 3.0)]
    #[case(" X ", FuelType::X, 2.0)]
    fn parse_and_code(#[case] label: &str, #[case] fuel: FuelType, #[case] code: f64) {
        assert_eq!(FuelType::parse(label), Some(fuel));
        assert_eq!(fuel.code(), code);
    }

    #[test]
    fn codes_follow_dataset_encoding() {
        let letters: String = FuelType::ALL.iter().map(|f| f.letter()).collect();
        assert_eq!(letters, "ZEXD");

        let codes: Vec<f64> = FuelType::ALL.iter().map(|f| f.code()).collect();
        assert_eq!(codes, vec![0.0, 1.0, 2.0, 3.0]);

        for fuel in FuelType::ALL {
            assert_eq!(FuelType::from_code(fuel.code()), Some(fuel));
        }
        assert_eq!(FuelType::from_code(4.0), None);
    }

    #[test]
    fn unknown_label_rejected() {
        assert_eq!(FuelType::parse("N"), None);
        assert_eq!(FuelType::parse(""), None);
        assert!("diesel".parse::<FuelType>().is_err());
        assert_eq!("E".parse::<FuelType>(), Ok(FuelType::E));
    }

    #[test]
    fn column_contract() {
        assert_eq!(FEATURE_COLUMNS.len(), 6);
        assert_eq!(FEATURE_COLUMNS[2], FUELTYPE);
        assert!(!FEATURE_COLUMNS.contains(&TARGET));
    }
}
