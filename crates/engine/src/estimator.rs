//! Feature duration estimation.
//!
//! The estimate is built by threading an accumulator (current week value,
//! QA share, trace so far) through a fixed sequence of stage functions. Each
//! stage is pure and appends one trace entry, so the presentation layer can
//! show exactly how the final number came to be and each stage can be
//! exercised on its own. Intermediate values stay unrounded; only the final
//! week value is rounded for display and aggregation.

use serde::{Deserialize, Serialize};
use shipcast_core::{
    BreakdownStep, ConfigError, EstimationInputs, EstimationResult, Feature, TeamConfig,
};
use tracing::debug;

/// Full-time equivalents assumed to burn down supplied dev hours.
const DEV_FTE: f64 = 2.0;

/// Working hours in one week for one FTE.
const HOURS_PER_WEEK: f64 = 40.0;

/// QA share of development time when no QA hours were planned.
const QA_BUFFER_RATIO: f64 = 0.15;

/// Schedule surcharge for features tagged as tech debt.
const TECH_DEBT_MULTIPLIER: f64 = 1.25;

/// Smallest estimate the calculator will report, in weeks.
const MIN_WEEKS: f64 = 0.4;

/// Largest estimate the calculator will report, in weeks.
const MAX_WEEKS: f64 = 16.0;

/// Accumulator threaded through the stage pipeline.
#[derive(Debug, Clone)]
struct StageState {
    weeks: f64,
    qa_weeks: f64,
    trace: Vec<BreakdownStep>,
}

impl StageState {
    fn start(weeks: f64, detail: String) -> Self {
        Self {
            weeks,
            qa_weeks: 0.0,
            trace: vec![BreakdownStep {
                title: "Base effort".to_string(),
                detail,
                before: 0.0,
                delta: weeks,
            }],
        }
    }

    /// Record a stage that moved the estimate to `weeks`.
    fn apply(mut self, title: &str, detail: String, weeks: f64) -> Self {
        self.trace.push(BreakdownStep {
            title: title.to_string(),
            detail,
            before: self.weeks,
            delta: weeks - self.weeks,
        });
        self.weeks = weeks;
        self
    }
}

fn mean3(a: f64, b: f64, c: f64) -> f64 {
    (a + b + c) / 3.0
}

/// Stage 1: raw effort from story points and track velocity.
fn base_effort(inputs: &EstimationInputs, config: &TeamConfig) -> StageState {
    let points = inputs.story_points();
    StageState::start(
        points / config.team_velocity,
        format!(
            "{points} story points at {} points/week",
            config.team_velocity
        ),
    )
}

/// Stage 2: scale by complexity and requirements clarity.
fn complexity_and_clarity(state: StageState, inputs: &EstimationInputs) -> StageState {
    let score = (inputs.technical_complexity()
        + inputs.dependency_risk()
        + inputs.unknowns()
        + inputs.effort_required())
        / 4.0;
    let complexity = 1.0 + (score - 3.0) * 0.25;
    let clarity = 1.0 - (inputs.requirements_clarity() - 3.0) * 0.15;
    let weeks = state.weeks * complexity * clarity;
    state.apply(
        "Complexity & clarity",
        format!("complexity x{complexity:.2}, clarity x{clarity:.2}"),
        weeks,
    )
}

/// Stage 3: scale by how many architectural layers the feature touches.
fn layer_impact(state: StageState, inputs: &EstimationInputs) -> StageState {
    let avg = mean3(
        inputs.frontend_impact(),
        inputs.backend_impact(),
        inputs.database_impact(),
    );
    let multiplier = 1.0 + (avg - 3.0) * 0.2;
    let weeks = state.weeks * multiplier;
    state.apply(
        "Layer impact",
        format!("average layer impact {avg:.2} => x{multiplier:.2}"),
        weeks,
    )
}

/// Stage 4: half a week of coordination per blocking dependency.
fn dependency_delay(state: StageState, inputs: &EstimationInputs) -> StageState {
    let count = inputs.dependency_count();
    let weeks = state.weeks + count * 0.5;
    state.apply(
        "Dependency delay",
        format!("{count} dependencies x 0.5 weeks"),
        weeks,
    )
}

/// Stage 5: planned QA hours, or a 15% buffer when none were planned.
fn qa_overhead(mut state: StageState, inputs: &EstimationInputs) -> StageState {
    let qa_hours = inputs.estimated_qa_hours();
    let (qa_weeks, detail) = if qa_hours > 0.0 {
        (
            qa_hours / HOURS_PER_WEEK,
            format!("{qa_hours} QA hours / {HOURS_PER_WEEK} h per week"),
        )
    } else {
        (state.weeks * QA_BUFFER_RATIO, "15% QA buffer".to_string())
    };
    state.qa_weeks = qa_weeks;
    let weeks = state.weeks + qa_weeks;
    state.apply("QA overhead", detail, weeks)
}

/// Stage 6: when dev hours were planned, the estimate cannot undercut what
/// those hours take with the assumed staffing (2 FTE at 40 h/week).
fn dev_hours_floor(state: StageState, inputs: &EstimationInputs) -> StageState {
    let dev_hours = inputs.estimated_backend_hours() + inputs.estimated_frontend_hours();
    if dev_hours <= 0.0 {
        return state;
    }
    let from_hours = dev_hours / (DEV_FTE * HOURS_PER_WEEK) + state.qa_weeks;
    let weeks = state.weeks.max(from_hours);
    state.apply(
        "Dev-hours floor",
        format!("{dev_hours} dev hours across {DEV_FTE} FTE at {HOURS_PER_WEEK} h/week"),
        weeks,
    )
}

/// Stage 7: 25% surcharge for features carrying the tech-debt gap tag.
fn tech_debt_tax(state: StageState, feature: &Feature) -> StageState {
    if !feature.has_tech_debt() {
        return state;
    }
    let weeks = state.weeks * TECH_DEBT_MULTIPLIER;
    state.apply(
        "Tech-debt surcharge",
        format!("x{TECH_DEBT_MULTIPLIER} for tech-debt gap"),
        weeks,
    )
}

/// Stage 8: clamp into the reportable range. Traced only when it bites.
fn clamp_bounds(state: StageState) -> StageState {
    let clamped = state.weeks.clamp(MIN_WEEKS, MAX_WEEKS);
    if clamped == state.weeks {
        return state;
    }
    state.apply(
        "Bounds clamp",
        format!("clamped into [{MIN_WEEKS}, {MAX_WEEKS}] weeks"),
        clamped,
    )
}

fn run_pipeline(feature: &Feature, config: &TeamConfig) -> StageState {
    let state = base_effort(&feature.inputs, config);
    let state = complexity_and_clarity(state, &feature.inputs);
    let state = layer_impact(state, &feature.inputs);
    let state = dependency_delay(state, &feature.inputs);
    let state = qa_overhead(state, &feature.inputs);
    let state = dev_hours_floor(state, &feature.inputs);
    let state = tech_debt_tax(state, feature);
    clamp_bounds(state)
}

/// Estimate the delivery duration of a single feature.
///
/// Pure and total over feature attributes: absent or non-numeric inputs fall
/// back to their documented defaults and never produce NaN. The team
/// configuration is the one precondition; an invalid one is rejected with a
/// [`ConfigError`] before any math runs.
pub fn estimate(feature: &Feature, config: &TeamConfig) -> Result<EstimationResult, ConfigError> {
    config.validate()?;
    let state = run_pipeline(feature, config);
    debug!(
        feature = %feature.id,
        weeks = state.weeks,
        stages = state.trace.len(),
        "estimated feature duration"
    );
    Ok(EstimationResult::from_weeks(state.weeks, state.trace))
}

/// A feature paired with its computed duration estimate, ready for the
/// portfolio scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedFeature {
    /// The feature document
    pub feature: Feature,

    /// Its duration estimate
    pub estimate: EstimationResult,
}

impl EstimatedFeature {
    /// Estimate `feature` under `config` and pair the two up.
    pub fn new(feature: Feature, config: &TeamConfig) -> Result<Self, ConfigError> {
        let estimate = estimate(&feature, config)?;
        Ok(Self { feature, estimate })
    }
}
