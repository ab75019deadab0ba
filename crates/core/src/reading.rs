//! Telemetry readings as reported by the device cloud.
//!
//! Sensor-capable devices expose `currentTemperature` / `currentHumidity`
//! in their `params` object. Values arrive as numbers or numeric strings,
//! and as the literal string `"unavailable"` when the probe is offline.
//! Plain switches have neither key.

/// The sentinel the vendor reports when a sensor probe has no value.
const UNAVAILABLE: &str = "unavailable";

/// A single reading: either a numeric value or unavailable.
///
/// "Unavailable" covers the vendor sentinel, a missing key, and anything
/// that fails to parse as a number; in every case the evaluator must skip
/// all checks on this reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Value(f64),
    Unavailable,
}

impl Reading {
    /// Parse a reading from a raw vendor params field.
    pub fn from_json(value: Option<&serde_json::Value>) -> Self {
        match value {
            Some(serde_json::Value::Number(n)) => match n.as_f64() {
                Some(v) => Reading::Value(v),
                None => Reading::Unavailable,
            },
            Some(serde_json::Value::String(s)) if s != UNAVAILABLE => {
                match s.parse::<f64>() {
                    Ok(v) => Reading::Value(v),
                    Err(_) => Reading::Unavailable,
                }
            }
            _ => Reading::Unavailable,
        }
    }

    /// The numeric value, if available.
    pub fn value(self) -> Option<f64> {
        match self {
            Reading::Value(v) => Some(v),
            Reading::Unavailable => None,
        }
    }
}

/// The pair of readings the evaluator inspects for one device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    pub temperature: Reading,
    pub humidity: Reading,
}

impl Telemetry {
    /// Extract temperature and humidity from a device's `params` object.
    pub fn from_params(params: &serde_json::Value) -> Self {
        Self {
            temperature: Reading::from_json(params.get("currentTemperature")),
            humidity: Reading::from_json(params.get("currentHumidity")),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
