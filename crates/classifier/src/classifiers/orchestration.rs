//! Orchestration-complexity classifier.
//!
//! Control-flow constructs (nested workflows, async tokens, event waits,
//! schedules) translate individually, but a workflow that leans on many
//! of them is a re-design, not a translation. The classifier therefore
//! maps each construct through a fixed table and adds one summary
//! component when the nesting count crosses a threshold.

use crate::core::{
    Analysis, Classifier, ClassifiedComponent, MigrationPath, TranslatabilityLevel,
};
use anyhow::Result;

pub const ORCHESTRATION_CATEGORY: &str = "orchestration";

/// Nested-workflow invocations above which the graph as a whole is
/// flagged for manual re-design.
const NESTED_WORKFLOW_THRESHOLD: usize = 3;

pub struct OrchestrationClassifier;

impl OrchestrationClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OrchestrationClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for OrchestrationClassifier {
    fn name(&self) -> &'static str {
        "orchestration-complexity"
    }

    fn priority(&self) -> u32 {
        20
    }

    fn can_classify(&self, analysis: &Analysis) -> bool {
        analysis.has_detections(ORCHESTRATION_CATEGORY)
    }

    fn classify(&self, analysis: &Analysis) -> Result<Vec<ClassifiedComponent>> {
        let detections = analysis.detections_for(ORCHESTRATION_CATEGORY);
        let mut components = Vec::new();
        let mut nested_count = 0;

        for detection in detections {
            let lower = detection.name.to_lowercase();

            let component = if lower.contains("workflow.execute") || lower.contains("nested") {
                nested_count += 1;
                ClassifiedComponent::new(
                    detection.name.clone(),
                    ORCHESTRATION_CATEGORY,
                    TranslatabilityLevel::Partial,
                    "Nested workflow invocation maps onto a sub-pipeline with explicit parameter passing",
                )
                .with_equivalent("Tekton sub-Pipeline / PipelineRun")
                .with_migration_path(MigrationPath::PathA)
                .with_recommendation("Extract the callee as its own Pipeline and pass parameters explicitly")
            } else if lower.contains("asyncworkflowtoken") {
                ClassifiedComponent::new(
                    detection.name.clone(),
                    ORCHESTRATION_CATEGORY,
                    TranslatabilityLevel::Blocked,
                    "Async token polling has no direct equivalent; completion must be modeled as run status",
                )
                .with_equivalent("PipelineRun status watch")
                .with_migration_path(MigrationPath::PathB)
                .with_recommendation("Replace token polling with a watch on the child run's completion status")
            } else if lower.contains("waitforevent") {
                ClassifiedComponent::new(
                    detection.name.clone(),
                    ORCHESTRATION_CATEGORY,
                    TranslatabilityLevel::Blocked,
                    "Event wait requires an external trigger source in the target platform",
                )
                .with_equivalent("event-driven trigger (Tekton Triggers)")
                .with_migration_path(MigrationPath::PathB)
                .with_recommendation("Identify the event producer and wire it to an EventListener")
            } else if lower.contains("scheduler") {
                ClassifiedComponent::new(
                    detection.name.clone(),
                    ORCHESTRATION_CATEGORY,
                    TranslatabilityLevel::Partial,
                    "Scheduled execution maps onto a cron-triggered run",
                )
                .with_equivalent("CronJob / scheduled PipelineRun")
                .with_migration_path(MigrationPath::PathA)
                .with_recommendation("Recreate the schedule as a cron trigger and remove the in-workflow scheduling call")
            } else {
                // System.sleep and similar pacing calls.
                ClassifiedComponent::new(
                    detection.name.clone(),
                    ORCHESTRATION_CATEGORY,
                    TranslatabilityLevel::Supported,
                    "Pacing/delay call is expressible with task-level timeout and retry settings",
                )
                .with_equivalent("task timeout/retry settings")
                .with_migration_path(MigrationPath::PathA)
            };

            components.push(
                component
                    .with_location(detection.location.clone())
                    .with_evidence(detection.evidence.clone()),
            );
        }

        if nested_count > NESTED_WORKFLOW_THRESHOLD {
            components.push(
                ClassifiedComponent::new(
                    "nested workflow graph",
                    ORCHESTRATION_CATEGORY,
                    TranslatabilityLevel::Manual,
                    format!(
                        "{} nested workflow invocations: the call graph should be re-designed, not translated call-for-call",
                        nested_count
                    ),
                )
                .with_migration_path(MigrationPath::PathC)
                .with_recommendation("Map the full call graph first and decide which layers collapse into a single pipeline"),
            );
        }

        Ok(components)
    }
}
