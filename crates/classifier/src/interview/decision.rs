//! Decision derivation: answers in, classification out.
//!
//! Each interview route has a fixed decision table. Derivation is a pure
//! function of (component type, answers): the same answer combination
//! always yields the same decision, which is what makes stored decisions
//! replayable as an audit trail.

use crate::core::{ClassifiedComponent, TranslatabilityLevel};
use crate::interview::questions::{question_id, route_component_type, InterviewRoute};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A stored, user-confirmed resolution for one ambiguous component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Level name (`"PARTIAL"`, ...). Kept as a string because the store
    /// is external; [`TranslatabilityLevel::parse`] gates it on use.
    pub classification: String,

    pub reason: String,

    /// Answer-derived flags, for downstream generators that need to know
    /// why, not just what.
    #[serde(default)]
    pub flags: BTreeMap<String, bool>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub manual_steps_required: Vec<String>,
}

impl Decision {
    fn new(level: TranslatabilityLevel, reason: impl Into<String>) -> Self {
        Self {
            classification: level.as_str().to_string(),
            reason: reason.into(),
            flags: BTreeMap::new(),
            warnings: Vec::new(),
            manual_steps_required: Vec::new(),
        }
    }

    fn flag(mut self, name: &str) -> Self {
        self.flags.insert(name.to_string(), true);
        self
    }

    fn warning(mut self, warning: &str) -> Self {
        self.warnings.push(warning.to_string());
        self
    }

    fn manual_step(mut self, step: &str) -> Self {
        self.manual_steps_required.push(step.to_string());
        self
    }
}

/// Decisions keyed by component location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionStore {
    decisions: BTreeMap<String, Decision>,
}

impl DecisionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, location: impl Into<String>, decision: Decision) {
        self.decisions.insert(location.into(), decision);
    }

    pub fn get(&self, location: &str) -> Option<&Decision> {
        self.decisions.get(location)
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Decision)> {
        self.decisions.iter()
    }

    /// Parses and validates an externally stored decisions document.
    /// Structural problems (not a map, missing fields) and unknown
    /// classification names are rejected here, before anything is
    /// trusted.
    pub fn from_json(json: &str) -> Result<Self> {
        let store: Self = serde_json::from_str(json)?;
        store.validate()?;
        Ok(store)
    }

    pub fn validate(&self) -> Result<()> {
        for (location, decision) in &self.decisions {
            if TranslatabilityLevel::parse(&decision.classification).is_none() {
                bail!(
                    "decision for {} has unrecognized classification {:?}",
                    location,
                    decision.classification
                );
            }
            if decision.reason.trim().is_empty() {
                bail!("decision for {} has an empty reason", location);
            }
        }
        Ok(())
    }
}

/// Answers keyed by question id.
pub type AnswerMap = BTreeMap<String, String>;

/// Derives the decision for one component from its answers. `None` when
/// the component type has no question set. Unanswered questions fall
/// back to the question's documented default.
pub fn derive_decision(component: &ClassifiedComponent, answers: &AnswerMap) -> Option<Decision> {
    let route = route_component_type(&component.component_type)?;
    let answer = |key: &str, default: &str| -> String {
        answers
            .get(&question_id(component, key))
            .cloned()
            .unwrap_or_else(|| default.to_string())
    };

    Some(match route {
        InterviewRoute::NetworkSecurity => derive_network_security(&answer),
        InterviewRoute::Governance => derive_governance(&answer),
        InterviewRoute::ExternalApi => derive_external_api(&answer),
    })
}

/// Network/security table. Rule order matters: an exact-equivalence
/// requirement pins the most restrictive level regardless of the other
/// answers.
fn derive_network_security(answer: &dyn Fn(&str, &str) -> String) -> Decision {
    if answer("equivalence", "approximate_ok") == "exact_behavior_required" {
        return Decision::new(
            TranslatabilityLevel::Manual,
            "Exact NSX behavior is required; NetworkPolicy cannot reproduce the full feature set",
        )
        .flag("exact_behavior_required")
        .manual_step("Design the security construct by hand and verify parity against the NSX rule set");
    }

    if answer("labels", "yes") == "no" {
        return Decision::new(
            TranslatabilityLevel::Manual,
            "No stable targeting labels exist; generated policy selectors would be meaningless",
        )
        .flag("missing_labels")
        .manual_step("Define and apply a stable labeling scheme, then re-run the interview");
    }

    if answer("scope", "namespace") == "cluster_wide" {
        return Decision::new(
            TranslatabilityLevel::Blocked,
            "Cluster-wide scope requested; cluster-scoped policy needs specialist review",
        )
        .flag("cluster_scope")
        .warning("Cluster-scoped network policy affects tenants beyond this workflow");
    }

    Decision::new(
        TranslatabilityLevel::Partial,
        "Approximate NetworkPolicy equivalence accepted with documented feature gaps",
    )
    .flag("approximate_equivalence")
    .warning("NetworkPolicy expresses L3/L4 allow rules only; logging and L7 inspection do not carry over")
}

fn derive_governance(answer: &dyn Fn(&str, &str) -> String) -> Decision {
    let mut decision = match answer("approval_mode", "keep_human").as_str() {
        "automate_policy" => Decision::new(
            TranslatabilityLevel::Partial,
            "Approval becomes an automated policy gate with an audit trail",
        )
        .flag("automated_gate")
        .warning("Verify the audit trail satisfies the original approval's compliance intent"),
        "drop" => Decision::new(
            TranslatabilityLevel::Supported,
            "Approval step dropped by explicit decision; the workflow runs unattended",
        )
        .flag("approval_dropped")
        .warning("The legacy workflow required human sign-off here; that control no longer exists"),
        _ => Decision::new(
            TranslatabilityLevel::Manual,
            "A human approval step is retained and must be designed into the target pipeline",
        )
        .flag("human_approval")
        .manual_step("Add a manual approval task and define who can approve"),
    };

    if answer("ticketing", "none") == "itsm_required" {
        decision = decision
            .flag("itsm_integration")
            .manual_step("Wire an outbound webhook so the ITSM system still receives a change record");
    }
    decision
}

fn derive_external_api(answer: &dyn Fn(&str, &str) -> String) -> Decision {
    if answer("reachability", "reachable") == "unreachable" {
        return Decision::new(
            TranslatabilityLevel::Blocked,
            "The API endpoint is not reachable from the target cluster",
        )
        .flag("unreachable_endpoint")
        .manual_step("Establish network connectivity or an egress path to the endpoint");
    }

    if answer("auth", "portable") == "not_portable" {
        return Decision::new(
            TranslatabilityLevel::Partial,
            "Endpoint reachable, but credentials are tied to the legacy host",
        )
        .flag("credentials_not_portable")
        .manual_step("Re-issue credentials that can live in a Secret on the target platform");
    }

    Decision::new(
        TranslatabilityLevel::Supported,
        "Endpoint reachable and credentials portable; the call translates to a pipeline task",
    )
    .flag("portable_integration")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn firewall_component() -> ClassifiedComponent {
        ClassifiedComponent::new(
            "firewallRule",
            "network_security",
            TranslatabilityLevel::Manual,
            "r",
        )
        .with_location("workflow.xml:8")
    }

    fn answer(component: &ClassifiedComponent, key: &str, value: &str) -> (String, String) {
        (question_id(component, key), value.to_string())
    }

    #[test]
    fn test_exact_behavior_pins_manual_regardless_of_other_answers() {
        let c = firewall_component();
        let answers: AnswerMap = [
            answer(&c, "equivalence", "exact_behavior_required"),
            answer(&c, "labels", "yes"),
            answer(&c, "scope", "namespace"),
        ]
        .into_iter()
        .collect();

        let decision = derive_decision(&c, &answers).unwrap();
        assert_eq!(decision.classification, "MANUAL");
        assert!(decision.flags["exact_behavior_required"]);
    }

    #[test]
    fn test_missing_labels_stay_restrictive() {
        let c = firewall_component();
        let answers: AnswerMap = [
            answer(&c, "equivalence", "approximate_ok"),
            answer(&c, "labels", "no"),
        ]
        .into_iter()
        .collect();

        let decision = derive_decision(&c, &answers).unwrap();
        assert_eq!(decision.classification, "MANUAL");
        assert!(decision.flags["missing_labels"]);
    }

    #[test]
    fn test_cluster_scope_escalates_to_blocked() {
        let c = firewall_component();
        let answers: AnswerMap = [
            answer(&c, "equivalence", "approximate_ok"),
            answer(&c, "labels", "yes"),
            answer(&c, "scope", "cluster_wide"),
        ]
        .into_iter()
        .collect();

        let decision = derive_decision(&c, &answers).unwrap();
        assert_eq!(decision.classification, "BLOCKED");
    }

    #[test]
    fn test_relaxed_network_decision_carries_caveats() {
        let c = firewall_component();
        let answers: AnswerMap = [
            answer(&c, "equivalence", "approximate_ok"),
            answer(&c, "labels", "yes"),
            answer(&c, "scope", "namespace"),
        ]
        .into_iter()
        .collect();

        let decision = derive_decision(&c, &answers).unwrap();
        assert_eq!(decision.classification, "PARTIAL");
        assert!(!decision.warnings.is_empty());
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let c = firewall_component();
        let answers: AnswerMap = [answer(&c, "equivalence", "approximate_ok")]
            .into_iter()
            .collect();

        let a = derive_decision(&c, &answers).unwrap();
        let b = derive_decision(&c, &answers).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_governance_itsm_adds_manual_step() {
        let c = ClassifiedComponent::new(
            "approvalRequest",
            "approval_governance",
            TranslatabilityLevel::Manual,
            "r",
        )
        .with_location("workflow.xml:12");
        let answers: AnswerMap = [
            answer(&c, "approval_mode", "automate_policy"),
            answer(&c, "ticketing", "itsm_required"),
        ]
        .into_iter()
        .collect();

        let decision = derive_decision(&c, &answers).unwrap();
        assert_eq!(decision.classification, "PARTIAL");
        assert!(decision.flags["itsm_integration"]);
        assert_eq!(decision.manual_steps_required.len(), 1);
    }

    #[test]
    fn test_unroutable_component_has_no_decision() {
        let c = ClassifiedComponent::new("w", "workload", TranslatabilityLevel::Partial, "r");
        assert_eq!(derive_decision(&c, &AnswerMap::new()), None);
    }

    #[test]
    fn test_store_validation_rejects_unknown_classification() {
        let json = r#"{"workflow.xml:8": {"classification": "IMPOSSIBLE", "reason": "x", "flags": {}}}"#;
        assert!(DecisionStore::from_json(json).is_err());

        let json = r#"{"workflow.xml:8": {"classification": "PARTIAL", "reason": "x", "flags": {}}}"#;
        let store = DecisionStore::from_json(json).unwrap();
        assert_eq!(store.len(), 1);
    }
}
