//! Feature documents - the unit of estimable work.
//!
//! Features are owned by the external document store; this crate treats them
//! as read-only input. Every numeric estimation attribute is optional, and a
//! documented default is substituted when the value is absent or not a finite
//! number, so a half-filled document never poisons the estimate with NaN.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Gap tag that triggers the tech-debt schedule surcharge.
pub const TECH_DEBT_TAG: &str = "Technology/Tech Debt";

/// A feature as read from the product document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Opaque identifier assigned by the document store
    pub id: String,

    /// Feature name
    pub name: String,

    /// Roadmap category, if the feature has been categorized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Estimation attributes (all optional)
    #[serde(flatten)]
    pub inputs: EstimationInputs,

    /// Raw workflow status label; unset means the feature is still in planning
    #[serde(
        default,
        rename = "workflowStatus",
        alias = "workflow_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub workflow_status: Option<String>,
}

impl Feature {
    /// Create a feature with the given id and name and no estimation inputs.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            inputs: EstimationInputs::default(),
            workflow_status: None,
        }
    }

    /// Parsed workflow status. Unset or unrecognized labels fall back to
    /// [`WorkflowStatus::Planning`].
    pub fn workflow_status(&self) -> WorkflowStatus {
        self.workflow_status
            .as_deref()
            .map(WorkflowStatus::from_label)
            .unwrap_or(WorkflowStatus::Planning)
    }

    /// Whether the feature carries the tech-debt gap tag.
    pub fn has_tech_debt(&self) -> bool {
        self.inputs.gap_types.contains(TECH_DEBT_TAG)
    }
}

/// Qualitative and quantitative estimation attributes of a feature.
///
/// Field names follow the document-store schema (camelCase on the wire).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationInputs {
    /// Relative effort in story points (default 5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_points: Option<f64>,

    /// Technical complexity, 1-5 (default 3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_complexity: Option<f64>,

    /// Risk from external dependencies, 1-5 (default 3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_risk: Option<f64>,

    /// Number of open unknowns, 1-5 (default 3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unknowns: Option<f64>,

    /// Raw effort required, 1-5 (default 3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_required: Option<f64>,

    /// How well the requirements are understood, 1-5 (default 3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements_clarity: Option<f64>,

    /// Frontend layer impact, 1-5 (default 3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend_impact: Option<f64>,

    /// Backend layer impact, 1-5 (default 3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_impact: Option<f64>,

    /// Database layer impact, 1-5 (default 3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_impact: Option<f64>,

    /// Count of blocking dependencies (default 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_count: Option<f64>,

    /// Planned QA hours (default 0)
    #[serde(
        default,
        rename = "estimatedQAHours",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_qa_hours: Option<f64>,

    /// Planned backend development hours (default 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_backend_hours: Option<f64>,

    /// Planned frontend development hours (default 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_frontend_hours: Option<f64>,

    /// Gap tags attached to the feature
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub gap_types: BTreeSet<String>,
}

/// Substitute the default for absent or non-finite values.
fn value_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(n) if n.is_finite() => n,
        _ => default,
    }
}

impl EstimationInputs {
    /// Story points, defaulting to 5.
    pub fn story_points(&self) -> f64 {
        value_or(self.story_points, 5.0)
    }

    /// Technical complexity score, defaulting to 3.
    pub fn technical_complexity(&self) -> f64 {
        value_or(self.technical_complexity, 3.0)
    }

    /// Dependency risk score, defaulting to 3.
    pub fn dependency_risk(&self) -> f64 {
        value_or(self.dependency_risk, 3.0)
    }

    /// Unknowns score, defaulting to 3.
    pub fn unknowns(&self) -> f64 {
        value_or(self.unknowns, 3.0)
    }

    /// Effort score, defaulting to 3.
    pub fn effort_required(&self) -> f64 {
        value_or(self.effort_required, 3.0)
    }

    /// Requirements clarity score, defaulting to 3.
    pub fn requirements_clarity(&self) -> f64 {
        value_or(self.requirements_clarity, 3.0)
    }

    /// Frontend impact score, defaulting to 3.
    pub fn frontend_impact(&self) -> f64 {
        value_or(self.frontend_impact, 3.0)
    }

    /// Backend impact score, defaulting to 3.
    pub fn backend_impact(&self) -> f64 {
        value_or(self.backend_impact, 3.0)
    }

    /// Database impact score, defaulting to 3.
    pub fn database_impact(&self) -> f64 {
        value_or(self.database_impact, 3.0)
    }

    /// Blocking dependency count, defaulting to 0.
    pub fn dependency_count(&self) -> f64 {
        value_or(self.dependency_count, 0.0)
    }

    /// Planned QA hours, defaulting to 0.
    pub fn estimated_qa_hours(&self) -> f64 {
        value_or(self.estimated_qa_hours, 0.0)
    }

    /// Planned backend hours, defaulting to 0.
    pub fn estimated_backend_hours(&self) -> f64 {
        value_or(self.estimated_backend_hours, 0.0)
    }

    /// Planned frontend hours, defaulting to 0.
    pub fn estimated_frontend_hours(&self) -> f64 {
        value_or(self.estimated_frontend_hours, 0.0)
    }
}

/// Workflow state of a feature on the roadmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowStatus {
    /// Shipped; contributes no remaining work
    Done,
    /// Being worked on; assumed half complete
    InProgress,
    /// Not yet started
    Planning,
    /// Descoped; excluded from the completion forecast
    WontDo,
}

impl WorkflowStatus {
    /// Parse a document-store status label. Unknown labels are treated as
    /// planning, matching how the roadmap treats untriaged features.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Done" | "Completed" => Self::Done,
            "In Progress" => Self::InProgress,
            "Won't Do" => Self::WontDo,
            _ => Self::Planning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_absent() {
        let feature = Feature::new("feat-1", "Saved filters");
        assert_eq!(feature.inputs.story_points(), 5.0);
        assert_eq!(feature.inputs.technical_complexity(), 3.0);
        assert_eq!(feature.inputs.requirements_clarity(), 3.0);
        assert_eq!(feature.inputs.dependency_count(), 0.0);
        assert_eq!(feature.inputs.estimated_qa_hours(), 0.0);
    }

    #[test]
    fn test_non_finite_values_fall_back_to_defaults() {
        let mut feature = Feature::new("feat-1", "Saved filters");
        feature.inputs.story_points = Some(f64::NAN);
        feature.inputs.unknowns = Some(f64::INFINITY);
        assert_eq!(feature.inputs.story_points(), 5.0);
        assert_eq!(feature.inputs.unknowns(), 3.0);
    }

    #[test]
    fn test_workflow_status_labels() {
        assert_eq!(WorkflowStatus::from_label("Done"), WorkflowStatus::Done);
        assert_eq!(WorkflowStatus::from_label("Completed"), WorkflowStatus::Done);
        assert_eq!(
            WorkflowStatus::from_label("In Progress"),
            WorkflowStatus::InProgress
        );
        assert_eq!(WorkflowStatus::from_label("Won't Do"), WorkflowStatus::WontDo);
        assert_eq!(
            WorkflowStatus::from_label("Backlog"),
            WorkflowStatus::Planning
        );
    }

    #[test]
    fn test_unset_status_is_planning() {
        let feature = Feature::new("feat-1", "Saved filters");
        assert_eq!(feature.workflow_status(), WorkflowStatus::Planning);
    }

    #[test]
    fn test_tech_debt_tag_detection() {
        let mut feature = Feature::new("feat-1", "Migrate legacy reports");
        assert!(!feature.has_tech_debt());
        feature.inputs.gap_types.insert(TECH_DEBT_TAG.to_string());
        assert!(feature.has_tech_debt());
    }

    #[test]
    fn test_deserialize_document_store_shape() {
        let doc = serde_json::json!({
            "id": "feat-9",
            "name": "Usage dashboard",
            "storyPoints": 8,
            "technicalComplexity": 4,
            "dependencyCount": 2,
            "estimatedQAHours": 12,
            "gapTypes": ["Technology/Tech Debt"],
            "workflowStatus": "In Progress",
        });
        let feature: Feature = serde_json::from_value(doc).unwrap();
        assert_eq!(feature.inputs.story_points(), 8.0);
        assert_eq!(feature.inputs.technical_complexity(), 4.0);
        assert_eq!(feature.inputs.dependency_count(), 2.0);
        assert_eq!(feature.inputs.estimated_qa_hours(), 12.0);
        assert!(feature.has_tech_debt());
        assert_eq!(feature.workflow_status(), WorkflowStatus::InProgress);
    }
}
