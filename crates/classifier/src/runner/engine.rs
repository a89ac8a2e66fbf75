use crate::core::Analysis;
use crate::dedup::Deduplicator;
use crate::detector::{Detector, WorkflowDocument};
use crate::report::GapReport;
use crate::runner::ClassifierRegistry;
use tracing::debug;

/// Ties the pipeline together: detect, deduplicate, classify, aggregate.
///
/// Each stage is usable on its own; the engine is the convenience path
/// from a parsed document to a finished [`GapReport`].
pub struct ClassificationEngine {
    detector: Detector,
    deduplicator: Deduplicator,
    registry: ClassifierRegistry,
}

impl ClassificationEngine {
    pub fn new() -> Self {
        Self {
            detector: Detector::default(),
            deduplicator: Deduplicator::default(),
            registry: ClassifierRegistry::with_defaults(),
        }
    }

    pub fn with_registry(mut self, registry: ClassifierRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_detector(mut self, detector: Detector) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_deduplicator(mut self, deduplicator: Deduplicator) -> Self {
        self.deduplicator = deduplicator;
        self
    }

    /// Detection + deduplication: the raw-form analysis payload for a
    /// document.
    pub fn build_analysis(&self, doc: &WorkflowDocument) -> Analysis {
        let raw = self.detector.detect(doc);
        let raw_total: usize = raw.values().map(Vec::len).sum();

        let mut analysis = Analysis::new(if doc.name.is_empty() {
            doc.file.clone()
        } else {
            doc.name.clone()
        });
        for (category, detections) in raw {
            let merged = self.deduplicator.deduplicate(&detections);
            if !merged.is_empty() {
                analysis.detections.insert(category, merged);
            }
        }

        debug!(
            workflow = %analysis.workflow_name,
            raw = raw_total,
            merged = analysis.total_detections(),
            "detection pass complete"
        );
        analysis
    }

    /// Classification + aggregation for an already-built analysis.
    pub fn classify(&self, analysis: &Analysis) -> GapReport {
        let components = self.registry.classify_all(analysis);
        debug!(
            workflow = %analysis.workflow_name,
            components = components.len(),
            "classification complete"
        );
        GapReport::new(analysis.workflow_name.clone(), components)
    }

    /// Full pipeline: document in, gap report out.
    pub fn analyze(&self, doc: &WorkflowDocument) -> GapReport {
        let analysis = self.build_analysis(doc);
        self.classify(&analysis)
    }
}

impl Default for ClassificationEngine {
    fn default() -> Self {
        Self::new()
    }
}
