//! Watari Classifier - Workflow Translatability Analysis
//!
//! This crate classifies automation components detected in legacy
//! workflow sources by how mechanically they can be translated to an
//! OpenShift target, and turns the ambiguous cases into structured,
//! auditable decisions.
//!
//! The pipeline: a [`detector::Detector`] scans a parsed workflow
//! document for category patterns, the [`dedup::Deduplicator`] collapses
//! redundant detections of the same logical operation, the classifier
//! plugins in [`classifiers`] map the result to leveled
//! [`core::ClassifiedComponent`]s, and the [`report::GapReporter`]
//! renders the aggregation. The [`interview`] module closes the loop:
//! it asks targeted questions about every ambiguous component and
//! deterministically rewrites classifications from the answers.

pub mod classifiers;
pub mod core;
pub mod dedup;
pub mod detector;
pub mod interview;
pub mod report;
pub mod runner;

pub use crate::core::{
    Analysis, ClassificationSummary, Classifier, ClassifiedComponent, Detection, IntentDocument,
    MigrationPath, OverallAssessment, TranslatabilityLevel,
};

pub use crate::dedup::Deduplicator;

pub use crate::detector::{Detector, DocumentError, PatternLibrary, WorkflowDocument};

pub use crate::interview::{
    apply_decisions, derive_decision, generate_questions, AnswerMap, Decision, DecisionStore,
    QuestionCatalog,
};

pub use crate::report::{GapReport, GapReporter, ReportFormat};

pub use crate::runner::{ClassificationEngine, ClassifierRegistry};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_is_populated() {
        let registry = ClassifierRegistry::default();
        assert_eq!(registry.len(), 5);
    }
}
