//! Network/security operation classifier.
//!
//! Owns the NSX-era categories: security groups, distributed firewall
//! rules, load balancers, logical switches/edges, security tags. The
//! mapping table is deliberately fixed data; anything genuinely ambiguous
//! stays at a restrictive level and is resolved later by the decision
//! interview, not by guessing here.

use crate::core::{
    Analysis, Classifier, ClassifiedComponent, Detection, MigrationPath, TranslatabilityLevel,
};
use anyhow::Result;

pub const NETWORK_SECURITY_CATEGORY: &str = "network_security";

struct MappingRow {
    needle: &'static str,
    level: TranslatabilityLevel,
    equivalent: &'static str,
    path: MigrationPath,
    recommendation: &'static str,
}

/// First matching row wins, so more specific needles come first.
const MAPPING: &[MappingRow] = &[
    MappingRow {
        needle: "loadbalancer",
        level: TranslatabilityLevel::Supported,
        equivalent: "Service (type LoadBalancer) or Route",
        path: MigrationPath::PathA,
        recommendation: "Expose the workload through a Service or Route instead of an NSX load balancer pool",
    },
    MappingRow {
        needle: "securitytag",
        level: TranslatabilityLevel::Partial,
        equivalent: "Pod/VM labels",
        path: MigrationPath::PathA,
        recommendation: "Replace security tags with labels and reference them from NetworkPolicy selectors",
    },
    MappingRow {
        needle: "firewall",
        level: TranslatabilityLevel::Manual,
        equivalent: "NetworkPolicy (L3/L4 subset)",
        path: MigrationPath::PathC,
        recommendation: "Review each firewall rule: NetworkPolicy covers L3/L4 allow rules only, not the full NSX DFW feature set",
    },
    MappingRow {
        needle: "logicalswitch",
        level: TranslatabilityLevel::Partial,
        equivalent: "NetworkAttachmentDefinition (Multus)",
        path: MigrationPath::PathB,
        recommendation: "Model the segment as a secondary network attachment and validate routing outside the cluster",
    },
    MappingRow {
        needle: "edge",
        level: TranslatabilityLevel::Blocked,
        equivalent: "MetalLB / external gateway appliance",
        path: MigrationPath::PathC,
        recommendation: "Edge services (NAT, VPN, gateway firewall) have no in-cluster equivalent; plan a dedicated gateway design",
    },
    MappingRow {
        needle: "securitygroup",
        level: TranslatabilityLevel::Partial,
        equivalent: "NetworkPolicy",
        path: MigrationPath::PathA,
        recommendation: "Express group membership as label selectors on a NetworkPolicy",
    },
    MappingRow {
        needle: "sg",
        level: TranslatabilityLevel::Partial,
        equivalent: "NetworkPolicy",
        path: MigrationPath::PathA,
        recommendation: "Express group membership as label selectors on a NetworkPolicy",
    },
];

/// Fallback for network/security detections no row matches.
const DEFAULT_ROW: MappingRow = MappingRow {
    needle: "",
    level: TranslatabilityLevel::Partial,
    equivalent: "NetworkPolicy",
    path: MigrationPath::PathB,
    recommendation: "Map the operation onto NetworkPolicy/Service primitives and verify behavior parity manually",
};

pub struct NetworkSecurityClassifier;

impl NetworkSecurityClassifier {
    pub fn new() -> Self {
        Self
    }

    fn mapping_for(name: &str) -> &'static MappingRow {
        let lower = name.to_lowercase();
        MAPPING
            .iter()
            .find(|row| lower.contains(row.needle))
            .unwrap_or(&DEFAULT_ROW)
    }
}

impl Default for NetworkSecurityClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the component for one network/security operation name. Public
/// within the crate so the integration classifier can defer its
/// network-flavored integrations here instead of duplicating the table.
pub(crate) fn classify_network_operation(
    name: &str,
    location: Option<&str>,
    evidence: Option<&str>,
) -> ClassifiedComponent {
    let row = NetworkSecurityClassifier::mapping_for(name);

    let mut component = ClassifiedComponent::new(
        name,
        NETWORK_SECURITY_CATEGORY,
        row.level,
        format!(
            "NSX {} operation: nearest equivalent is {}",
            if row.needle.is_empty() { "network" } else { row.needle },
            row.equivalent
        ),
    )
    .with_equivalent(row.equivalent)
    .with_migration_path(row.path)
    .with_recommendation(row.recommendation);

    if let Some(location) = location {
        component = component.with_location(location);
    }
    if let Some(evidence) = evidence {
        component = component.with_evidence(evidence);
    }
    component
}

impl Classifier for NetworkSecurityClassifier {
    fn name(&self) -> &'static str {
        "network-security"
    }

    fn priority(&self) -> u32 {
        10
    }

    fn can_classify(&self, analysis: &Analysis) -> bool {
        analysis.has_detections(NETWORK_SECURITY_CATEGORY)
    }

    fn classify(&self, analysis: &Analysis) -> Result<Vec<ClassifiedComponent>> {
        let components = analysis
            .detections_for(NETWORK_SECURITY_CATEGORY)
            .iter()
            .map(|d: &Detection| {
                classify_network_operation(&d.name, Some(&d.location), Some(&d.evidence))
            })
            .collect();
        Ok(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis_with(name: &str) -> Analysis {
        Analysis::new("wf").with_detections(
            NETWORK_SECURITY_CATEGORY,
            vec![Detection::new(NETWORK_SECURITY_CATEGORY, name)
                .with_location("workflow.xml:64")
                .with_confidence(0.9)
                .with_evidence("Pattern match: x in context (workflow.xml:64): y")],
        )
    }

    #[test]
    fn test_firewall_rules_stay_manual() {
        let components = NetworkSecurityClassifier::new()
            .classify(&analysis_with("firewallRule"))
            .unwrap();

        assert_eq!(components.len(), 1);
        assert_eq!(components[0].level, TranslatabilityLevel::Manual);
        assert_eq!(components[0].migration_path, Some(MigrationPath::PathC));
    }

    #[test]
    fn test_security_group_calls_map_to_network_policy() {
        let components = NetworkSecurityClassifier::new()
            .classify(&analysis_with("nsxClient.createSG"))
            .unwrap();

        assert_eq!(components[0].level, TranslatabilityLevel::Partial);
        assert_eq!(
            components[0].openshift_equivalent.as_deref(),
            Some("NetworkPolicy")
        );
        assert_eq!(components[0].location.as_deref(), Some("workflow.xml:64"));
    }

    #[test]
    fn test_load_balancer_is_supported() {
        let components = NetworkSecurityClassifier::new()
            .classify(&analysis_with("loadBalancer"))
            .unwrap();
        assert_eq!(components[0].level, TranslatabilityLevel::Supported);
    }

    #[test]
    fn test_not_applicable_without_detections() {
        let classifier = NetworkSecurityClassifier::new();
        assert!(!classifier.can_classify(&Analysis::default()));
        assert!(classifier.classify(&Analysis::default()).unwrap().is_empty());
    }
}
