//! Shipcast estimation engine.
//!
//! Two pure, deterministic calculations:
//!
//! - [`estimator::estimate`] turns one feature's attributes into a duration
//!   estimate with an itemized calculation trace.
//! - [`scheduler::schedule`] aggregates estimated features into a portfolio
//!   summary and a project-completion forecast.
//!
//! Neither function performs I/O or touches shared state; both are safe to
//! call concurrently from any number of callers.

#![warn(missing_docs)]

pub mod estimator;
pub mod scheduler;

pub use estimator::{estimate, EstimatedFeature};
pub use scheduler::schedule;
