//! Per-feature estimation output.

use serde::{Deserialize, Serialize};

/// Weeks-to-months conversion factor (52 / 12).
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// Round to one decimal place. Applied only to final display/aggregation
/// values; intermediate stage math stays unrounded.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Delivery-speed classification of an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// One week or less
    Fast,
    /// Up to two weeks
    Normal,
    /// Up to four weeks
    Slow,
    /// More than four weeks
    Critical,
}

impl DeliveryStatus {
    /// Classify a (rounded) week count.
    pub fn from_weeks(weeks: f64) -> Self {
        if weeks <= 1.0 {
            Self::Fast
        } else if weeks <= 2.0 {
            Self::Normal
        } else if weeks <= 4.0 {
            Self::Slow
        } else {
            Self::Critical
        }
    }

    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Normal => "normal",
            Self::Slow => "slow",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One applied stage of the estimation pipeline.
///
/// Steps are recorded in application order so the presentation layer can
/// show exactly how the final number came to be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownStep {
    /// Stage name, e.g. "Dependency delay"
    pub title: String,

    /// Human-readable description of the applied operation
    pub detail: String,

    /// Week value before this stage ran
    pub before: f64,

    /// Signed change in weeks produced by this stage
    pub delta: f64,
}

impl BreakdownStep {
    /// Week value after this stage ran.
    pub fn after(&self) -> f64 {
        self.before + self.delta
    }
}

/// Derived duration estimate for one feature.
///
/// Recomputed on every call; never persisted by this subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    /// Estimated weeks, rounded to one decimal, clamped to [0.4, 16]
    pub weeks: f64,

    /// Working days, weeks x 5 rounded to an integer
    pub days: i64,

    /// Months, weeks / 4.33 rounded to one decimal
    pub months: f64,

    /// Delivery-speed classification
    pub status: DeliveryStatus,

    /// 0-100 score, higher means faster delivery
    pub health_score: u8,

    /// Itemized calculation trace, one entry per applied stage
    pub breakdown: Vec<BreakdownStep>,
}

impl EstimationResult {
    /// Build the derived outputs from the final (already clamped, unrounded)
    /// week value and the accumulated trace.
    pub fn from_weeks(weeks: f64, breakdown: Vec<BreakdownStep>) -> Self {
        let weeks = round1(weeks);
        let health = (100.0 - weeks * 10.0).clamp(0.0, 100.0).round();
        Self {
            weeks,
            days: (weeks * 5.0).round() as i64,
            months: round1(weeks / WEEKS_PER_MONTH),
            status: DeliveryStatus::from_weeks(weeks),
            health_score: health as u8,
            breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round1() {
        assert_eq!(round1(1.2499), 1.2);
        assert_eq!(round1(1.25), 1.3);
        assert_eq!(round1(0.4), 0.4);
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(DeliveryStatus::from_weeks(0.4), DeliveryStatus::Fast);
        assert_eq!(DeliveryStatus::from_weeks(1.0), DeliveryStatus::Fast);
        assert_eq!(DeliveryStatus::from_weeks(1.1), DeliveryStatus::Normal);
        assert_eq!(DeliveryStatus::from_weeks(2.0), DeliveryStatus::Normal);
        assert_eq!(DeliveryStatus::from_weeks(4.0), DeliveryStatus::Slow);
        assert_eq!(DeliveryStatus::from_weeks(4.1), DeliveryStatus::Critical);
    }

    #[test]
    fn test_derived_outputs() {
        let result = EstimationResult::from_weeks(1.0, Vec::new());
        assert_eq!(result.weeks, 1.0);
        assert_eq!(result.days, 5);
        assert_eq!(result.months, 0.2);
        assert_eq!(result.status, DeliveryStatus::Fast);
        assert_eq!(result.health_score, 90);
    }

    #[test]
    fn test_health_score_floors_at_zero() {
        let result = EstimationResult::from_weeks(16.0, Vec::new());
        assert_eq!(result.health_score, 0);
        assert_eq!(result.status, DeliveryStatus::Critical);
        assert_eq!(result.days, 80);
    }

    #[test]
    fn test_breakdown_step_after() {
        let step = BreakdownStep {
            title: "Dependency delay".into(),
            detail: "2 dependencies x 0.5 weeks".into(),
            before: 1.0,
            delta: 1.0,
        };
        assert_eq!(step.after(), 2.0);
    }
}
