//! Shipcast core data models.
//!
//! This crate defines the data structures shared by the time-to-market
//! estimation engine: feature documents as read from the product document
//! store, the caller-supplied team configuration, and the derived
//! estimation/portfolio outputs.

#![warn(missing_docs)]

// Inputs
mod feature;
mod config;

// Derived outputs
mod estimate;
mod summary;

// Feature & inputs
pub use feature::{EstimationInputs, Feature, WorkflowStatus, TECH_DEBT_TAG};

// Team configuration
pub use config::{ConfigError, TeamConfig, WorkMode};

// Estimation outputs
pub use estimate::{round1, BreakdownStep, DeliveryStatus, EstimationResult, WEEKS_PER_MONTH};

// Portfolio outputs
pub use summary::{PortfolioSummary, ProjectCompletion, StatusCounts, WorkflowCounts};
