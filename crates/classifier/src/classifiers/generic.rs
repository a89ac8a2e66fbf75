//! Generic intent-based classifier.
//!
//! Last resort: when no pattern-specific classifier claimed a concern,
//! coarse intent fields still say something about translatability. This
//! classifier also backs the registry's empty-discovery fallback, so the
//! system can never silently classify nothing.

use crate::core::{
    Analysis, Classifier, ClassifiedComponent, MigrationPath, TranslatabilityLevel,
};
use anyhow::Result;

pub const VM_LIFECYCLE_CATEGORY: &str = "vm_lifecycle";

pub struct GenericIntentClassifier;

impl GenericIntentClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GenericIntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for GenericIntentClassifier {
    fn name(&self) -> &'static str {
        "generic-intent"
    }

    fn priority(&self) -> u32 {
        100
    }

    fn can_classify(&self, analysis: &Analysis) -> bool {
        analysis.intent.is_some() || analysis.has_detections(VM_LIFECYCLE_CATEGORY)
    }

    fn classify(&self, analysis: &Analysis) -> Result<Vec<ClassifiedComponent>> {
        let mut components = Vec::new();

        // Baseline VM operations: the one category where the platform
        // has a direct, mechanical equivalent.
        for detection in analysis.detections_for(VM_LIFECYCLE_CATEGORY) {
            components.push(
                ClassifiedComponent::new(
                    detection.name.clone(),
                    VM_LIFECYCLE_CATEGORY,
                    TranslatabilityLevel::Supported,
                    "VM lifecycle operation translates to the target's virtualization API",
                )
                .with_equivalent("VirtualMachine API (KubeVirt)")
                .with_migration_path(MigrationPath::PathA)
                .with_location(detection.location.clone())
                .with_evidence(detection.evidence.clone()),
            );
        }

        let Some(intent) = &analysis.intent else {
            return Ok(components);
        };

        if let Some(workload) = &intent.workload_type {
            components.push(
                ClassifiedComponent::new(
                    format!("workload: {}", workload),
                    "workload",
                    TranslatabilityLevel::Supported,
                    "Base workload provisioning translates to a VirtualMachine manifest",
                )
                .with_equivalent("VirtualMachine (KubeVirt)")
                .with_migration_path(MigrationPath::PathA),
            );
        }

        if intent.infrastructure.networking.is_multi_nic() {
            components.push(
                ClassifiedComponent::new(
                    "multi-NIC networking",
                    "infrastructure_networking",
                    TranslatabilityLevel::Partial,
                    "Secondary interfaces need explicit network attachments on the target",
                )
                .with_equivalent("Multus secondary networks")
                .with_migration_path(MigrationPath::PathB)
                .with_recommendation(
                    "Define a NetworkAttachmentDefinition per secondary interface and validate addressing",
                ),
            );
        }

        if intent.infrastructure.has_advanced_storage() {
            components.push(
                ClassifiedComponent::new(
                    "advanced storage features",
                    "infrastructure_storage",
                    TranslatabilityLevel::Partial,
                    "Raw device mappings / shared disks require storage re-design on the target",
                )
                .with_equivalent("PersistentVolume re-design")
                .with_migration_path(MigrationPath::PathB)
                .with_recommendation(
                    "Inventory the disks involved and map each to a storage class that supports the access mode",
                ),
            );
        }

        if !intent.day2_operations.is_empty() {
            components.push(
                ClassifiedComponent::new(
                    "day-2 operations",
                    "day2_operations",
                    TranslatabilityLevel::Partial,
                    "Ongoing operational procedures need target-native automation, not one-shot translation",
                )
                .with_migration_path(MigrationPath::PathB)
                .with_recommendation(
                    "Re-express each day-2 procedure as a pipeline or operator action",
                ),
            );
        }

        Ok(components)
    }
}
