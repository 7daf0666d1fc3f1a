//! Portfolio-level forecast output.

use serde::{Deserialize, Serialize};

/// Feature counts per delivery-speed bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Features estimated at one week or less
    pub fast: usize,
    /// Features estimated at up to two weeks
    pub normal: usize,
    /// Features estimated at up to four weeks
    pub slow: usize,
    /// Features estimated beyond four weeks
    pub critical: usize,
}

/// Feature counts per workflow bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowCounts {
    /// Shipped features
    pub done: usize,
    /// Features currently being worked
    pub in_progress: usize,
    /// Features not yet started
    pub planning: usize,
}

/// Forecast completion point for the remaining portfolio work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectCompletion {
    /// Remaining weeks, rounded to an integer
    pub weeks: i64,
    /// Remaining months, rounded to one decimal
    pub months: f64,
}

/// Aggregate statistics over an estimated feature set.
///
/// Derived on demand from the current features and team configuration; an
/// empty feature set yields all-zero fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Mean estimated weeks across all features, one decimal
    pub average_weeks: f64,

    /// Counts per delivery-speed bucket
    pub status_counts: StatusCounts,

    /// Counts per workflow bucket
    pub workflow_counts: WorkflowCounts,

    /// Completion forecast for the remaining work
    pub project_completion: ProjectCompletion,
}
