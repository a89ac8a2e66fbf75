//! External API and plugin integration classifier.
//!
//! Covers REST/SOAP host calls, plugin invocations (PowerShell, SSH,
//! directory services), and the integration entries of the intent
//! document. Integrations that are really network/security operations in
//! disguise are deferred to the network classifier's mapping table so
//! the two classifiers produce a union without duplicated rows.

use crate::classifiers::network_security::classify_network_operation;
use crate::core::{
    Analysis, Classifier, ClassifiedComponent, Integration, MigrationPath, TranslatabilityLevel,
};
use anyhow::Result;

pub const EXTERNAL_API_CATEGORY: &str = "external_api";
pub const PLUGIN_CATEGORY: &str = "plugin_integration";

pub struct IntegrationClassifier;

impl IntegrationClassifier {
    pub fn new() -> Self {
        Self
    }

    fn classify_api_detection(name: &str) -> ClassifiedComponent {
        let lower = name.to_lowercase();
        if lower.contains("soap") {
            ClassifiedComponent::new(
                name,
                EXTERNAL_API_CATEGORY,
                TranslatabilityLevel::Blocked,
                "SOAP endpoint calls need a client shim; no first-class SOAP task exists on the target",
            )
            .with_equivalent("containerized SOAP client task")
            .with_migration_path(MigrationPath::PathC)
            .with_recommendation("Wrap the SOAP interaction in a small container image the pipeline can run")
        } else {
            ClassifiedComponent::new(
                name,
                EXTERNAL_API_CATEGORY,
                TranslatabilityLevel::Partial,
                "HTTP API call is expressible as a pipeline task once endpoint and credentials are re-homed",
            )
            .with_equivalent("HTTP task / Job")
            .with_migration_path(MigrationPath::PathA)
            .with_recommendation("Confirm the endpoint is reachable from the cluster and move credentials to a Secret")
        }
    }

    fn classify_plugin_detection(name: &str) -> ClassifiedComponent {
        let lower = name.to_lowercase();
        if lower.contains("powershell") || lower.contains("ssh") {
            ClassifiedComponent::new(
                name,
                PLUGIN_CATEGORY,
                TranslatabilityLevel::Partial,
                "Remote script execution maps onto a Job running the script in a purpose-built image",
            )
            .with_equivalent("Job with script runner image")
            .with_migration_path(MigrationPath::PathB)
            .with_recommendation("Package the script environment as a container image and mount credentials as Secrets")
        } else if lower.contains("activedirectory") || lower.contains("directory") {
            ClassifiedComponent::new(
                name,
                PLUGIN_CATEGORY,
                TranslatabilityLevel::Blocked,
                "Directory-service plugin operations depend on infrastructure outside the cluster",
            )
            .with_equivalent("external identity integration")
            .with_migration_path(MigrationPath::PathC)
            .with_recommendation("Keep identity management external and integrate through the platform's OIDC/LDAP support")
        } else {
            ClassifiedComponent::new(
                name,
                PLUGIN_CATEGORY,
                TranslatabilityLevel::Manual,
                "Vendor plugin invocation has no generic equivalent and needs a case-by-case port",
            )
            .with_migration_path(MigrationPath::PathC)
            .with_recommendation("Identify what the plugin call actually does and re-implement that operation natively")
        }
    }

    fn classify_intent_integration(integration: &Integration) -> Option<ClassifiedComponent> {
        let name = integration
            .name
            .clone()
            .or_else(|| integration.kind.clone())?;
        let descriptor = format!(
            "{} {}",
            name,
            integration.kind.as_deref().unwrap_or("")
        )
        .to_lowercase();

        // Network-flavored integrations get the network table's verdict.
        if descriptor.contains("nsx")
            || descriptor.contains("security")
            || descriptor.contains("firewall")
        {
            return Some(classify_network_operation(&name, None, None));
        }

        let mut component = Self::classify_api_detection(&name);
        component.component_type = "external_api_integration".to_string();
        if let Some(endpoint) = &integration.endpoint {
            component = component.with_recommendation(format!(
                "Verify the endpoint {} is reachable from the target cluster",
                endpoint
            ));
        }
        Some(component)
    }
}

impl Default for IntegrationClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for IntegrationClassifier {
    fn name(&self) -> &'static str {
        "plugin-integration"
    }

    fn priority(&self) -> u32 {
        20
    }

    fn can_classify(&self, analysis: &Analysis) -> bool {
        analysis.has_detections(EXTERNAL_API_CATEGORY)
            || analysis.has_detections(PLUGIN_CATEGORY)
            || analysis
                .intent
                .as_ref()
                .is_some_and(|i| !i.integrations.is_empty())
    }

    fn classify(&self, analysis: &Analysis) -> Result<Vec<ClassifiedComponent>> {
        let mut components = Vec::new();

        for detection in analysis.detections_for(EXTERNAL_API_CATEGORY) {
            components.push(
                Self::classify_api_detection(&detection.name)
                    .with_location(detection.location.clone())
                    .with_evidence(detection.evidence.clone()),
            );
        }

        for detection in analysis.detections_for(PLUGIN_CATEGORY) {
            components.push(
                Self::classify_plugin_detection(&detection.name)
                    .with_location(detection.location.clone())
                    .with_evidence(detection.evidence.clone()),
            );
        }

        if let Some(intent) = &analysis.intent {
            for integration in &intent.integrations {
                // Intent entries duplicate pattern detections when both
                // observed the same system; detections carry evidence, so
                // they win.
                let already_detected = components.iter().any(|c| {
                    integration
                        .name
                        .as_deref()
                        .is_some_and(|n| c.name.to_lowercase().contains(&n.to_lowercase()))
                });
                if already_detected {
                    continue;
                }
                components.extend(Self::classify_intent_integration(integration));
            }
        }

        Ok(components)
    }
}
