//! Core abstractions for the classification framework.
//!
//! Fundamental building blocks shared by every stage of the pipeline:
//! the raw [`Detection`] record produced by the detector, the immutable
//! [`ClassifiedComponent`] value classifiers emit, the [`Classifier`]
//! trait the registry composes, and the evidence layer that keeps merged
//! detections auditable from first pattern match through applied decision.

pub mod analysis;
pub mod classifier;
pub mod component;
pub mod detection;
pub mod evidence;
pub mod level;
pub mod summary;

pub use analysis::{Analysis, Governance, Infrastructure, Integration, IntentDocument, Networking};
pub use classifier::Classifier;
pub use component::{sort_components, ClassifiedComponent};
pub use detection::{parse_file_line, Detection, CONFIDENCE_CEILING, UNKNOWN_LOCATION};
pub use evidence::{
    consolidate_evidence, pattern_names, render_item_evidence, render_pattern_evidence,
    EvidenceRecord,
};
pub use level::{MigrationPath, TranslatabilityLevel};
pub use summary::{
    ClassificationSummary, LevelCounts, OverallAssessment, PathCounts,
    MOSTLY_MANUAL_PARTIAL_RATIO,
};
