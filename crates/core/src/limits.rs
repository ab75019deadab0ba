//! Per-device alert bounds.

use serde::{Deserialize, Serialize};

/// Threshold configuration for one device. All bounds are optional; an
/// unset bound is simply never checked. Updates are last-write-wins with
/// no versioning.
///
/// Wire names are camelCase to match the original portal frontend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceLimits {
    pub temp_high: Option<f64>,
    pub temp_low: Option<f64>,
    pub humid_high: Option<f64>,
    pub humid_low: Option<f64>,
}

impl DeviceLimits {
    /// True when no bound is set at all.
    pub fn is_empty(&self) -> bool {
        self.temp_high.is_none()
            && self.temp_low.is_none()
            && self.humid_high.is_none()
            && self.humid_low.is_none()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_partial_bounds() {
        let limits: DeviceLimits =
            serde_json::from_str(r#"{ "tempHigh": 30, "humidLow": 25.5 }"#).unwrap();
        assert_eq!(limits.temp_high, Some(30.0));
        assert_eq!(limits.temp_low, None);
        assert_eq!(limits.humid_high, None);
        assert_eq!(limits.humid_low, Some(25.5));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let limits = DeviceLimits {
            temp_high: Some(28.0),
            ..Default::default()
        };
        let json = serde_json::to_value(&limits).unwrap();
        assert_eq!(json["tempHigh"], 28.0);
        assert!(json["tempLow"].is_null());
    }

    #[test]
    fn empty_when_no_bound_set() {
        assert!(DeviceLimits::default().is_empty());
        assert!(!DeviceLimits {
            humid_high: Some(60.0),
            ..Default::default()
        }
        .is_empty());
    }
}
