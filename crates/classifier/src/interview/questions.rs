//! Question generation for ambiguous components.
//!
//! One question set per component-type family, routed by substring so
//! classifier-specific type names (`network_security`,
//! `external_api_integration`, ...) all land in the right set without a
//! central table of every type string. Options state their downstream
//! impact in plain language: the person answering should never need to
//! know the classification rules.

use crate::core::ClassifiedComponent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const QUESTION_SCHEMA_VERSION: &str = "1.0";

/// Which decision table a component's answers feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewRoute {
    NetworkSecurity,
    Governance,
    ExternalApi,
}

/// Routes a component type to its question set. Unmatched types get no
/// questions: there is nothing useful to ask.
pub fn route_component_type(component_type: &str) -> Option<InterviewRoute> {
    let lower = component_type.to_lowercase();
    if lower.contains("network") || lower.contains("security") {
        return Some(InterviewRoute::NetworkSecurity);
    }
    if lower.contains("approval") || lower.contains("governance") {
        return Some(InterviewRoute::Governance);
    }
    if lower.contains("api") || lower.contains("integration") || lower.contains("rest") {
        return Some(InterviewRoute::ExternalApi);
    }
    None
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub value: String,
    pub label: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub component: String,
    pub component_type: String,
    pub location: String,
    pub prompt: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub options: Vec<QuestionOption>,
    pub default: String,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionCatalog {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub questions: Vec<Question>,
}

/// Deterministic question id: the component's location (or its name when
/// unanchored) plus the question key. Stable ids make answer files
/// reviewable and replayable.
pub fn question_id(component: &ClassifiedComponent, key: &str) -> String {
    let anchor = component.location.as_deref().unwrap_or(&component.name);
    format!("{}::{}", anchor, key)
}

/// Generates the interview for a component list: 1-3 questions per
/// ambiguous (non-SUPPORTED) component with a routable type.
pub fn generate_questions(components: &[ClassifiedComponent]) -> QuestionCatalog {
    let mut questions = Vec::new();

    for component in components {
        if !component.is_ambiguous() {
            continue;
        }
        let Some(route) = route_component_type(&component.component_type) else {
            continue;
        };
        questions.extend(questions_for(route, component));
    }

    QuestionCatalog {
        schema_version: QUESTION_SCHEMA_VERSION.to_string(),
        generated_at: Utc::now(),
        questions,
    }
}

fn questions_for(route: InterviewRoute, component: &ClassifiedComponent) -> Vec<Question> {
    match route {
        InterviewRoute::NetworkSecurity => network_security_questions(component),
        InterviewRoute::Governance => governance_questions(component),
        InterviewRoute::ExternalApi => external_api_questions(component),
    }
}

fn question(
    component: &ClassifiedComponent,
    key: &str,
    prompt: &str,
    options: Vec<QuestionOption>,
    default: &str,
) -> Question {
    Question {
        id: question_id(component, key),
        component: component.name.clone(),
        component_type: component.component_type.clone(),
        location: component
            .location
            .clone()
            .unwrap_or_else(|| "unknown".to_string()),
        prompt: prompt.to_string(),
        question_type: "single_choice".to_string(),
        options,
        default: default.to_string(),
        required: true,
    }
}

fn option(value: &str, label: &str, impact: &str) -> QuestionOption {
    QuestionOption {
        value: value.to_string(),
        label: label.to_string(),
        impact: impact.to_string(),
    }
}

fn network_security_questions(component: &ClassifiedComponent) -> Vec<Question> {
    vec![
        question(
            component,
            "equivalence",
            "Does this operation need exact NSX behavior, or is an approximate OpenShift equivalent acceptable?",
            vec![
                option(
                    "exact_behavior_required",
                    "Exact NSX behavior required",
                    "The component stays a manual design task; full parity cannot be generated",
                ),
                option(
                    "approximate_ok",
                    "Approximate NetworkPolicy behavior is acceptable",
                    "The component can be translated automatically, with documented feature gaps",
                ),
            ],
            "approximate_ok",
        ),
        question(
            component,
            "labels",
            "Do stable labels exist (or can they be added) to target the affected workloads?",
            vec![
                option(
                    "yes",
                    "Yes, workloads carry stable labels",
                    "Policy selectors can be generated from the labels",
                ),
                option(
                    "no",
                    "No stable labels are available",
                    "The component stays restrictive until a labeling scheme exists",
                ),
            ],
            "yes",
        ),
        question(
            component,
            "scope",
            "What scope does this rule apply to?",
            vec![
                option(
                    "namespace",
                    "A single namespace/application",
                    "A namespaced NetworkPolicy covers it",
                ),
                option(
                    "cluster_wide",
                    "Cluster-wide or shared infrastructure",
                    "Escalates to specialist review of cluster-scoped policy",
                ),
            ],
            "namespace",
        ),
    ]
}

fn governance_questions(component: &ClassifiedComponent) -> Vec<Question> {
    vec![
        question(
            component,
            "approval_mode",
            "How should this approval step exist on the target platform?",
            vec![
                option(
                    "keep_human",
                    "Keep a human approval step",
                    "A manual approval gate must be designed and staffed",
                ),
                option(
                    "automate_policy",
                    "Automate it as a policy check with an audit trail",
                    "The gate can be generated, with audit configuration to verify",
                ),
                option(
                    "drop",
                    "Drop the approval entirely",
                    "The step is removed; the workflow proceeds unattended",
                ),
            ],
            "keep_human",
        ),
        question(
            component,
            "ticketing",
            "Does a change ticket still need to be filed in an external system?",
            vec![
                option(
                    "itsm_required",
                    "Yes, the ITSM system remains the record",
                    "An outbound webhook to the ITSM system must be wired up manually",
                ),
                option("none", "No ticketing requirement", "No extra integration work"),
            ],
            "none",
        ),
    ]
}

fn external_api_questions(component: &ClassifiedComponent) -> Vec<Question> {
    vec![
        question(
            component,
            "reachability",
            "Is the API endpoint reachable from the target cluster's network?",
            vec![
                option(
                    "reachable",
                    "Yes, reachable from the cluster",
                    "The call can run in-cluster as a task",
                ),
                option(
                    "unreachable",
                    "No, it is on an isolated network",
                    "The component is blocked until connectivity or an egress path exists",
                ),
            ],
            "reachable",
        ),
        question(
            component,
            "auth",
            "Can the call's credentials move to the target platform (token or certificate in a Secret)?",
            vec![
                option(
                    "portable",
                    "Yes, credentials can be re-homed",
                    "Credentials become a Secret; the call translates",
                ),
                option(
                    "not_portable",
                    "No, authentication is tied to the legacy host",
                    "Credentials must be re-issued before the call can be translated",
                ),
            ],
            "portable",
        ),
    ]
}
