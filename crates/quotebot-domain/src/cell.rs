//! Scalar values written to a cell sink

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// A single value destined for a named cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Free text
    Text(String),
    /// Whole number
    Integer(i64),
    /// Decimal amount or rate
    Number(Decimal),
}

impl CellValue {
    /// Numeric value as `f64`, for sinks that only store floating point
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Text(_) => None,
            CellValue::Integer(n) => Some(*n as f64),
            CellValue::Number(d) => d.to_f64(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Integer(i64::from(value))
    }
}

impl From<Decimal> for CellValue {
    fn from(value: Decimal) -> Self {
        CellValue::Number(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Integer(n) => write!(f, "{}", n),
            CellValue::Number(d) => write!(f, "{}", d.normalize()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_numeric_conversion() {
        assert_eq!(CellValue::Integer(40).as_f64(), Some(40.0));
        let amount = CellValue::Number(dec!(19673.55)).as_f64().unwrap();
        assert!((amount - 19673.55).abs() < 1e-9);
        assert_eq!(CellValue::from("INSURED: X").as_f64(), None);
    }

    #[test]
    fn test_display_normalizes_decimals() {
        assert_eq!(CellValue::Number(dec!(19000.00)).to_string(), "19000");
        assert_eq!(CellValue::Number(dec!(0.01050)).to_string(), "0.0105");
    }

    #[test]
    fn test_serializes_as_plain_json_scalars() {
        assert_eq!(serde_json::to_string(&CellValue::from(3u32)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&CellValue::from("a")).unwrap(), "\"a\"");
    }
}
