use crate::core::level::{MigrationPath, TranslatabilityLevel};
use serde::{Deserialize, Serialize};

/// The unit of classification output: one detected operation annotated
/// with a translatability level, rationale, and recommendations.
///
/// Components are immutable values. Anything that needs to change one
/// (the decision applier, notably) builds a new value with the `with_*`
/// constructors and leaves the original untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedComponent {
    pub name: String,

    pub component_type: String,

    pub level: TranslatabilityLevel,

    pub reason: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub openshift_equivalent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub migration_path: Option<MigrationPath>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub evidence: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub recommendations: Vec<String>,
}

impl ClassifiedComponent {
    pub fn new(
        name: impl Into<String>,
        component_type: impl Into<String>,
        level: TranslatabilityLevel,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            component_type: component_type.into(),
            level,
            reason: reason.into(),
            openshift_equivalent: None,
            migration_path: None,
            evidence: None,
            location: None,
            recommendations: Vec::new(),
        }
    }

    pub fn with_equivalent(mut self, equivalent: impl Into<String>) -> Self {
        self.openshift_equivalent = Some(equivalent.into());
        self
    }

    pub fn with_migration_path(mut self, path: MigrationPath) -> Self {
        self.migration_path = Some(path);
        self
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_recommendations(mut self, recommendations: Vec<String>) -> Self {
        self.recommendations = recommendations;
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendations.push(recommendation.into());
        self
    }

    /// Copy with the level replaced. Used by the decision applier; the
    /// original value is not touched.
    pub fn with_level(&self, level: TranslatabilityLevel) -> Self {
        Self {
            level,
            ..self.clone()
        }
    }

    pub fn with_reason(&self, reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            ..self.clone()
        }
    }

    /// Copy with an extra line appended to the evidence trail.
    pub fn with_appended_evidence(&self, line: &str) -> Self {
        let evidence = match &self.evidence {
            Some(existing) if !existing.is_empty() => format!("{}\n{}", existing, line),
            _ => line.to_string(),
        };
        Self {
            evidence: Some(evidence),
            ..self.clone()
        }
    }

    pub fn severity(&self) -> u8 {
        self.level.severity()
    }

    /// Whether this component needs a human in the loop before any
    /// translation attempt: the decision interview targets exactly these.
    pub fn is_ambiguous(&self) -> bool {
        self.level != TranslatabilityLevel::Supported
    }
}

/// Worst-first default ordering: `(severity desc, name asc)`. The name
/// tiebreak keeps report output deterministic across runs.
pub fn sort_components(components: &mut [ClassifiedComponent]) {
    components.sort_by(|a, b| {
        b.severity()
            .cmp(&a.severity())
            .then_with(|| a.name.cmp(&b.name))
    });
}
