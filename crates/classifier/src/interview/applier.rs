//! Decision application.
//!
//! Rewrites classified components according to stored decisions, keyed by
//! component location. Non-destructive: the input list is read-only and
//! every touched component is rebuilt through copy-with constructors, so
//! the pre-decision state remains available for auditing.

use crate::core::{ClassifiedComponent, TranslatabilityLevel};
use crate::interview::decision::{Decision, DecisionStore};
use tracing::warn;

/// Produces a new component list with decisions applied. Components
/// without a matching decision, and decisions whose classification name
/// is unrecognized, pass the original value through unchanged.
pub fn apply_decisions(
    components: &[ClassifiedComponent],
    decisions: &DecisionStore,
) -> Vec<ClassifiedComponent> {
    components
        .iter()
        .map(|component| {
            let decision = component
                .location
                .as_deref()
                .and_then(|location| decisions.get(location));
            match decision {
                Some(decision) => apply_one(component, decision),
                None => component.clone(),
            }
        })
        .collect()
}

fn apply_one(component: &ClassifiedComponent, decision: &Decision) -> ClassifiedComponent {
    let Some(level) = TranslatabilityLevel::parse(&decision.classification) else {
        warn!(
            component = %component.name,
            classification = %decision.classification,
            "ignoring decision with unrecognized classification"
        );
        return component.clone();
    };

    // Warnings lead, original recommendations keep their order, manual
    // steps close the list.
    let mut recommendations = Vec::with_capacity(
        decision.warnings.len()
            + component.recommendations.len()
            + decision.manual_steps_required.len(),
    );
    recommendations.extend(decision.warnings.iter().map(|w| format!("Warning: {}", w)));
    recommendations.extend(component.recommendations.iter().cloned());
    recommendations.extend(
        decision
            .manual_steps_required
            .iter()
            .map(|s| format!("Manual step: {}", s)),
    );

    component
        .with_level(level)
        .with_reason(decision.reason.clone())
        .with_appended_evidence(&audit_line(decision))
        .with_recommendations(recommendations)
}

/// Audit line recording that a decision rewrote this component. No
/// timestamp: application must stay a pure function of its inputs.
fn audit_line(decision: &Decision) -> String {
    format!(
        "Decision applied: reclassified to {} ({})",
        decision.classification, decision.reason
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MigrationPath;

    fn component() -> ClassifiedComponent {
        ClassifiedComponent::new(
            "firewallRule",
            "network_security",
            TranslatabilityLevel::Manual,
            "DFW rule set has no full equivalent",
        )
        .with_location("workflow.xml:8")
        .with_migration_path(MigrationPath::PathC)
        .with_evidence("Pattern match: firewallRule in context (workflow.xml:8): ...")
        .with_recommendation("Review each firewall rule")
    }

    fn decision() -> Decision {
        serde_json::from_value(serde_json::json!({
            "classification": "PARTIAL",
            "reason": "Approximate NetworkPolicy equivalence accepted",
            "flags": {"approximate_equivalence": true},
            "warnings": ["L3/L4 only"],
            "manual_steps_required": ["Verify logging requirements separately"]
        }))
        .unwrap()
    }

    #[test]
    fn test_matched_component_is_rewritten() {
        let mut store = DecisionStore::new();
        store.insert("workflow.xml:8", decision());

        let input = vec![component()];
        let output = apply_decisions(&input, &store);

        assert_eq!(output[0].level, TranslatabilityLevel::Partial);
        assert_eq!(output[0].reason, "Approximate NetworkPolicy equivalence accepted");
        assert_eq!(output[0].recommendations[0], "Warning: L3/L4 only");
        assert_eq!(output[0].recommendations[1], "Review each firewall rule");
        assert!(output[0].recommendations[2].starts_with("Manual step:"));
        assert!(output[0]
            .evidence
            .as_deref()
            .unwrap()
            .contains("Decision applied: reclassified to PARTIAL"));

        // Untouched fields carry over.
        assert_eq!(output[0].migration_path, Some(MigrationPath::PathC));
        // And the input was not mutated.
        assert_eq!(input[0].level, TranslatabilityLevel::Manual);
    }

    #[test]
    fn test_empty_store_returns_equal_list() {
        let input = vec![component()];
        let output = apply_decisions(&input, &DecisionStore::new());
        assert_eq!(input, output);
    }

    #[test]
    fn test_unrecognized_classification_is_ignored() {
        let mut bad = decision();
        bad.classification = "SOMEDAY".to_string();

        let mut store = DecisionStore::new();
        store.insert("workflow.xml:8", bad);

        let input = vec![component()];
        let output = apply_decisions(&input, &store);
        assert_eq!(input, output);
    }

    #[test]
    fn test_unmatched_location_passes_through() {
        let mut store = DecisionStore::new();
        store.insert("other.xml:99", decision());

        let input = vec![component()];
        let output = apply_decisions(&input, &store);
        assert_eq!(input, output);
    }
}
