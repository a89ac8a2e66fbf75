//! Approval and governance pattern classifier.
//!
//! Human approval steps cannot be mechanically translated: the question
//! is always whether the target keeps a human in the loop, automates the
//! gate, or drops it. Everything here classifies restrictively and lets
//! the decision interview relax it.

use crate::core::{
    Analysis, Classifier, ClassifiedComponent, MigrationPath, TranslatabilityLevel,
};
use anyhow::Result;

pub const GOVERNANCE_CATEGORY: &str = "approval_governance";

pub struct GovernanceClassifier;

impl GovernanceClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GovernanceClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for GovernanceClassifier {
    fn name(&self) -> &'static str {
        "approval-governance"
    }

    fn priority(&self) -> u32 {
        10
    }

    fn can_classify(&self, analysis: &Analysis) -> bool {
        analysis.has_detections(GOVERNANCE_CATEGORY)
            || analysis
                .intent
                .as_ref()
                .is_some_and(|i| i.governance.requires_approval())
    }

    fn classify(&self, analysis: &Analysis) -> Result<Vec<ClassifiedComponent>> {
        let mut components = Vec::new();

        for detection in analysis.detections_for(GOVERNANCE_CATEGORY) {
            let lower = detection.name.to_lowercase();

            let component = if lower.contains("servicenow") || lower.contains("changerequest") {
                ClassifiedComponent::new(
                    detection.name.clone(),
                    GOVERNANCE_CATEGORY,
                    TranslatabilityLevel::Blocked,
                    "Change-management integration calls an external ITSM system with no platform-native counterpart",
                )
                .with_equivalent("external ITSM webhook from the pipeline")
                .with_migration_path(MigrationPath::PathC)
                .with_recommendation(
                    "Keep the ITSM system as the source of truth and trigger it via a webhook task",
                )
            } else {
                ClassifiedComponent::new(
                    detection.name.clone(),
                    GOVERNANCE_CATEGORY,
                    TranslatabilityLevel::Manual,
                    "Interactive approval step requires a human decision the target platform cannot infer",
                )
                .with_equivalent("pipeline manual approval gate")
                .with_migration_path(MigrationPath::PathB)
                .with_recommendation(
                    "Decide whether the approval stays human, becomes an automated policy gate, or is dropped",
                )
            };

            components.push(
                component
                    .with_location(detection.location.clone())
                    .with_evidence(detection.evidence.clone()),
            );
        }

        // Intent-level approval policy with no pattern evidence still
        // needs a decision before anything is generated.
        let intent_approval = analysis
            .intent
            .as_ref()
            .is_some_and(|i| i.governance.requires_approval());
        if intent_approval && components.is_empty() {
            components.push(
                ClassifiedComponent::new(
                    "workflow approval policy",
                    GOVERNANCE_CATEGORY,
                    TranslatabilityLevel::Manual,
                    "Intent document declares an approval requirement for this workflow",
                )
                .with_equivalent("pipeline manual approval gate")
                .with_migration_path(MigrationPath::PathB)
                .with_recommendation(
                    "Decide whether the approval stays human, becomes an automated policy gate, or is dropped",
                ),
            );
        }

        Ok(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Detection;
    use serde_json::json;

    #[test]
    fn test_user_interaction_is_manual() {
        let analysis = Analysis::new("wf").with_detections(
            GOVERNANCE_CATEGORY,
            vec![Detection::new(GOVERNANCE_CATEGORY, "UserInteraction")
                .with_location("workflow.xml:12")],
        );

        let components = GovernanceClassifier::new().classify(&analysis).unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].level, TranslatabilityLevel::Manual);
        assert_eq!(components[0].migration_path, Some(MigrationPath::PathB));
    }

    #[test]
    fn test_servicenow_integration_is_blocked() {
        let analysis = Analysis::new("wf").with_detections(
            GOVERNANCE_CATEGORY,
            vec![Detection::new(GOVERNANCE_CATEGORY, "serviceNowClient.createChangeRequest")],
        );

        let components = GovernanceClassifier::new().classify(&analysis).unwrap();
        assert_eq!(components[0].level, TranslatabilityLevel::Blocked);
    }

    #[test]
    fn test_intent_approval_without_detections_synthesizes_component() {
        let intent = serde_json::from_value(json!({"governance": {"approval": true}})).unwrap();
        let analysis = Analysis::new("wf").with_intent(intent);

        let classifier = GovernanceClassifier::new();
        assert!(classifier.can_classify(&analysis));

        let components = classifier.classify(&analysis).unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].name, "workflow approval policy");
    }

    #[test]
    fn test_detections_suppress_the_synthesized_component() {
        let intent = serde_json::from_value(json!({"governance": {"approval": true}})).unwrap();
        let analysis = Analysis::new("wf")
            .with_detections(
                GOVERNANCE_CATEGORY,
                vec![Detection::new(GOVERNANCE_CATEGORY, "approvalRequest")],
            )
            .with_intent(intent);

        let components = GovernanceClassifier::new().classify(&analysis).unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].name, "approvalRequest");
    }
}
