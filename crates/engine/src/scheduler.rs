//! Portfolio completion forecasting.
//!
//! Aggregates already-estimated features into summary statistics and a
//! single completion forecast. Parallel mode runs a deterministic
//! longest-processing-time-first (LPT) list-scheduling simulation over
//! `team_size` tracks; this is a bin-packing calculation, not actual
//! concurrency, and the same inputs always produce the same assignment.

use shipcast_core::{
    round1, ConfigError, PortfolioSummary, ProjectCompletion, TeamConfig, WorkMode,
    WorkflowStatus, DeliveryStatus, StatusCounts, WorkflowCounts, WEEKS_PER_MONTH,
};
use tracing::debug;

use crate::estimator::EstimatedFeature;

/// Remaining weeks of work for one feature, by workflow state.
///
/// `None` means the feature is descoped and must not influence the
/// completion forecast at all.
fn remaining_weeks(feature: &EstimatedFeature) -> Option<f64> {
    match feature.feature.workflow_status() {
        WorkflowStatus::Done => Some(0.0),
        WorkflowStatus::InProgress => Some(feature.estimate.weeks * 0.5),
        WorkflowStatus::Planning => Some(feature.estimate.weeks),
        WorkflowStatus::WontDo => None,
    }
}

/// Greedy LPT makespan over `tracks` identical tracks.
///
/// Longest jobs first (stable sort), each assigned to the currently
/// least-loaded track with ties broken by the lowest track index. A known
/// 4/3-approximation for minimizing makespan; good enough for a roadmap
/// forecast and, more importantly here, deterministic.
fn lpt_makespan(durations: &[f64], tracks: usize) -> f64 {
    let mut loads = vec![0.0_f64; tracks];
    let mut ordered = durations.to_vec();
    ordered.sort_by(|a, b| b.total_cmp(a));
    for duration in ordered {
        let mut lightest = 0;
        for (index, load) in loads.iter().enumerate().skip(1) {
            if *load < loads[lightest] {
                lightest = index;
            }
        }
        loads[lightest] += duration;
    }
    loads.into_iter().fold(0.0, f64::max)
}

/// Compute the portfolio summary and completion forecast.
///
/// Pure and deterministic. An empty feature list is not an error and yields
/// an all-zero summary; an invalid team configuration is rejected up front.
pub fn schedule(
    features: &[EstimatedFeature],
    config: &TeamConfig,
) -> Result<PortfolioSummary, ConfigError> {
    config.validate()?;

    if features.is_empty() {
        return Ok(PortfolioSummary::default());
    }

    let mut status_counts = StatusCounts::default();
    let mut workflow_counts = WorkflowCounts::default();
    let mut total_weeks = 0.0;
    let mut remaining = Vec::with_capacity(features.len());

    for feature in features {
        total_weeks += feature.estimate.weeks;
        match feature.estimate.status {
            DeliveryStatus::Fast => status_counts.fast += 1,
            DeliveryStatus::Normal => status_counts.normal += 1,
            DeliveryStatus::Slow => status_counts.slow += 1,
            DeliveryStatus::Critical => status_counts.critical += 1,
        }
        match feature.feature.workflow_status() {
            WorkflowStatus::Done => workflow_counts.done += 1,
            WorkflowStatus::InProgress => workflow_counts.in_progress += 1,
            WorkflowStatus::Planning => workflow_counts.planning += 1,
            WorkflowStatus::WontDo => {}
        }
        if let Some(weeks) = remaining_weeks(feature) {
            remaining.push(weeks);
        }
    }

    let total_remaining = match config.work_mode {
        WorkMode::Sequential => remaining.iter().sum(),
        WorkMode::Parallel => lpt_makespan(&remaining, config.team_size),
    };
    debug!(
        features = features.len(),
        mode = ?config.work_mode,
        remaining_weeks = total_remaining,
        "scheduled portfolio"
    );

    Ok(PortfolioSummary {
        average_weeks: round1(total_weeks / features.len() as f64),
        status_counts,
        workflow_counts,
        project_completion: ProjectCompletion {
            weeks: total_remaining.round() as i64,
            months: round1(total_remaining / WEEKS_PER_MONTH),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipcast_core::{EstimationResult, Feature};

    fn estimated(id: &str, weeks: f64, status: Option<&str>) -> EstimatedFeature {
        let mut feature = Feature::new(id, id);
        feature.workflow_status = status.map(String::from);
        EstimatedFeature {
            feature,
            estimate: EstimationResult::from_weeks(weeks, Vec::new()),
        }
    }

    fn config(mode: WorkMode, team_size: usize) -> TeamConfig {
        TeamConfig {
            work_mode: mode,
            team_size,
            team_velocity: 10.0,
        }
    }

    #[test]
    fn test_empty_portfolio_is_all_zeros() {
        let summary = schedule(&[], &config(WorkMode::Parallel, 3)).unwrap();
        assert_eq!(summary, PortfolioSummary::default());
    }

    #[test]
    fn test_sequential_sums_remaining_work() {
        let features = vec![
            estimated("a", 1.0, None),
            estimated("b", 2.0, None),
            estimated("c", 3.0, None),
        ];
        let summary = schedule(&features, &config(WorkMode::Sequential, 1)).unwrap();
        assert_eq!(summary.project_completion.weeks, 6);
        assert_eq!(summary.average_weeks, 2.0);
        assert_eq!(summary.workflow_counts.planning, 3);
    }

    #[test]
    fn test_parallel_balances_across_tracks() {
        let features = vec![
            estimated("a", 5.0, None),
            estimated("b", 5.0, None),
            estimated("c", 5.0, None),
            estimated("d", 5.0, None),
        ];
        let summary = schedule(&features, &config(WorkMode::Parallel, 2)).unwrap();
        assert_eq!(summary.project_completion.weeks, 10);
        assert_eq!(summary.project_completion.months, 2.3);
    }

    #[test]
    fn test_single_track_parallel_matches_sequential() {
        let features = vec![
            estimated("a", 2.5, None),
            estimated("b", 4.0, Some("In Progress")),
            estimated("c", 1.0, None),
        ];
        let parallel = schedule(&features, &config(WorkMode::Parallel, 1)).unwrap();
        let sequential = schedule(&features, &config(WorkMode::Sequential, 1)).unwrap();
        assert_eq!(
            parallel.project_completion.weeks,
            sequential.project_completion.weeks
        );
    }

    #[test]
    fn test_done_features_leave_no_remaining_work() {
        let features = vec![
            estimated("a", 8.0, Some("Done")),
            estimated("b", 8.0, Some("Completed")),
        ];
        let summary = schedule(&features, &config(WorkMode::Sequential, 1)).unwrap();
        assert_eq!(summary.project_completion.weeks, 0);
        assert_eq!(summary.workflow_counts.done, 2);
        // Done features still show up in the averages.
        assert_eq!(summary.average_weeks, 8.0);
    }

    #[test]
    fn test_in_progress_counts_half() {
        let features = vec![estimated("a", 4.0, Some("In Progress"))];
        let summary = schedule(&features, &config(WorkMode::Sequential, 1)).unwrap();
        assert_eq!(summary.project_completion.weeks, 2);
        assert_eq!(summary.workflow_counts.in_progress, 1);
    }

    #[test]
    fn test_wont_do_excluded_from_forecast() {
        let kept = vec![estimated("a", 2.0, None)];
        let with_descope = vec![
            estimated("a", 2.0, None),
            estimated("b", 16.0, Some("Won't Do")),
        ];
        let base = schedule(&kept, &config(WorkMode::Parallel, 2)).unwrap();
        let summary = schedule(&with_descope, &config(WorkMode::Parallel, 2)).unwrap();
        assert_eq!(
            summary.project_completion,
            base.project_completion
        );
        assert_eq!(summary.workflow_counts.planning, 1);
    }

    #[test]
    fn test_lpt_tie_breaks_deterministically() {
        // Three equal jobs on two tracks: first two split, third joins the
        // lower-indexed track.
        assert_eq!(lpt_makespan(&[3.0, 3.0, 3.0], 2), 6.0);
        let repeat = lpt_makespan(&[3.0, 3.0, 3.0], 2);
        assert_eq!(repeat, 6.0);
    }

    #[test]
    fn test_lpt_prefers_longest_first() {
        // Longest-first packs [4] against [3,2] for a makespan of 5; naive
        // in-order assignment would give 6.
        assert_eq!(lpt_makespan(&[3.0, 2.0, 4.0], 2), 5.0);
    }

    #[test]
    fn test_status_buckets_tallied() {
        let features = vec![
            estimated("a", 0.5, None),
            estimated("b", 1.5, None),
            estimated("c", 3.0, None),
            estimated("d", 7.0, None),
        ];
        let summary = schedule(&features, &config(WorkMode::Sequential, 1)).unwrap();
        assert_eq!(summary.status_counts.fast, 1);
        assert_eq!(summary.status_counts.normal, 1);
        assert_eq!(summary.status_counts.slow, 1);
        assert_eq!(summary.status_counts.critical, 1);
        assert_eq!(summary.average_weeks, 3.0);
    }

    #[test]
    fn test_zero_tracks_rejected() {
        let features = vec![estimated("a", 1.0, None)];
        let err = schedule(&features, &config(WorkMode::Parallel, 0)).unwrap_err();
        assert_eq!(err, ConfigError::InvalidTeamSize);
    }
}
