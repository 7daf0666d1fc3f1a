//! Team configuration supplied by the caller.
//!
//! The original product kept this in ad hoc browser-local state; here it is
//! an explicit value passed into every estimation/scheduling call, with
//! persistence delegated to an injected settings store.

use serde::{Deserialize, Serialize};

/// How the team works through the roadmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkMode {
    /// Several tracks pull features concurrently
    Parallel,
    /// One track works features back-to-back
    Sequential,
}

/// Errors raised by team-configuration validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Velocity must be a positive, finite number of points per week
    #[error("team velocity must be a positive number, got {0}")]
    InvalidVelocity(f64),

    /// Parallel mode needs at least one track
    #[error("team size must be at least 1 in parallel mode")]
    InvalidTeamSize,
}

/// Caller-supplied team configuration for a calculation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamConfig {
    /// Work mode used by the completion forecast
    pub work_mode: WorkMode,

    /// Number of parallel tracks (meaningful only in parallel mode)
    pub team_size: usize,

    /// Story points one track completes per week
    pub team_velocity: f64,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            work_mode: WorkMode::Parallel,
            team_size: 2,
            team_velocity: 10.0,
        }
    }
}

impl TeamConfig {
    /// Validate the configuration.
    ///
    /// Velocity must always be positive and finite; team size must be at
    /// least 1 when the work mode is parallel. Callers are expected to
    /// validate before estimating, and both engine entry points also check
    /// so that an invalid configuration fails fast instead of producing
    /// NaN or infinite durations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.team_velocity.is_finite() || self.team_velocity <= 0.0 {
            return Err(ConfigError::InvalidVelocity(self.team_velocity));
        }
        if self.work_mode == WorkMode::Parallel && self.team_size == 0 {
            return Err(ConfigError::InvalidTeamSize);
        }
        Ok(())
    }
}
