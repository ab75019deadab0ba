//! Threshold evaluation for device telemetry.
//!
//! Pure logic with no store access: the poller fetches devices and limits
//! and passes them in. The four checks form an explicit ordered rule list; the
//! first breached rule wins and at most one message is produced per cycle,
//! even when several bounds are breached at once. Whether that message
//! becomes a *new* alert is decided by the alert store's dedup, not here.

use crate::limits::DeviceLimits;
use crate::reading::{Reading, Telemetry};

/// Which telemetry reading a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Temperature,
    Humidity,
}

impl Quantity {
    fn noun(self) -> &'static str {
        match self {
            Quantity::Temperature => "Temperature",
            Quantity::Humidity => "Humidity",
        }
    }

    fn unit(self) -> &'static str {
        match self {
            Quantity::Temperature => "°C",
            Quantity::Humidity => "%",
        }
    }
}

/// Which side of the configured bound a rule guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    High,
    Low,
}

/// One entry of the evaluation order: a (reading, bound) pair.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdRule {
    pub quantity: Quantity,
    pub bound: Bound,
}

/// Evaluation order. Fixed priority: temperature before humidity, high
/// before low. Only the first match per cycle is reported.
pub const RULES: [ThresholdRule; 4] = [
    ThresholdRule {
        quantity: Quantity::Temperature,
        bound: Bound::High,
    },
    ThresholdRule {
        quantity: Quantity::Temperature,
        bound: Bound::Low,
    },
    ThresholdRule {
        quantity: Quantity::Humidity,
        bound: Bound::High,
    },
    ThresholdRule {
        quantity: Quantity::Humidity,
        bound: Bound::Low,
    },
];

impl ThresholdRule {
    fn reading(&self, telemetry: &Telemetry) -> Reading {
        match self.quantity {
            Quantity::Temperature => telemetry.temperature,
            Quantity::Humidity => telemetry.humidity,
        }
    }

    fn limit(&self, limits: &DeviceLimits) -> Option<f64> {
        match (self.quantity, self.bound) {
            (Quantity::Temperature, Bound::High) => limits.temp_high,
            (Quantity::Temperature, Bound::Low) => limits.temp_low,
            (Quantity::Humidity, Bound::High) => limits.humid_high,
            (Quantity::Humidity, Bound::Low) => limits.humid_low,
        }
    }

    /// Strict comparison: a reading exactly on the bound is not a breach.
    fn breached(&self, value: f64, limit: f64) -> bool {
        match self.bound {
            Bound::High => value > limit,
            Bound::Low => value < limit,
        }
    }

    fn message(&self, value: f64, limit: f64) -> String {
        let direction = match self.bound {
            Bound::High => "HIGH",
            Bound::Low => "LOW",
        };
        let unit = self.quantity.unit();
        format!(
            "{} is too {direction}: {value}{unit} (Your limit is {limit}{unit}).",
            self.quantity.noun()
        )
    }

    /// Check this single rule. `None` when the bound is unset, the reading
    /// is unavailable, or the reading is within the bound.
    pub fn check(&self, telemetry: &Telemetry, limits: &DeviceLimits) -> Option<String> {
        let value = self.reading(telemetry).value()?;
        let limit = self.limit(limits)?;
        if self.breached(value, limit) {
            Some(self.message(value, limit))
        } else {
            None
        }
    }
}

/// Run the ordered rule list against one device's telemetry.
///
/// Returns the breach message of the first matching rule, or `None` when no
/// set bound is breached.
pub fn evaluate(telemetry: &Telemetry, limits: &DeviceLimits) -> Option<String> {
    RULES.iter().find_map(|rule| rule.check(telemetry, limits))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
