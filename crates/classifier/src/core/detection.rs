use serde::{Deserialize, Serialize};

/// Hard ceiling on detection confidence. Pattern matching is heuristic,
/// so no detection is ever reported as certain; a value above this
/// ceiling indicates a bug in a scorer, not a stronger signal.
pub const CONFIDENCE_CEILING: f64 = 0.95;

/// Location string used when a detection has no structural anchor in the
/// source document (e.g. free-floating script content).
pub const UNKNOWN_LOCATION: &str = "unknown";

/// A single raw pattern match found by the detector.
///
/// Detections are ephemeral: the deduplicator consumes them and emits a
/// merged set, which is what classifiers actually see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Pattern category that produced the match (e.g. `network_security`).
    pub category: String,

    /// The matched operation or object name, as specific as the match
    /// allows (`nsxClient.createSG` beats `SecurityGroup`).
    pub name: String,

    /// `"<file>:<line>"` for anchored matches, [`UNKNOWN_LOCATION`] otherwise.
    pub location: String,

    /// Heuristic confidence in `[0, CONFIDENCE_CEILING]`.
    pub confidence: f64,

    /// Rendered evidence lines. See [`crate::core::evidence`] for the two
    /// fixed layouts this must follow to survive consolidation.
    pub evidence: String,
}

impl Detection {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            location: UNKNOWN_LOCATION.to_string(),
            confidence: 0.0,
            evidence: String::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, CONFIDENCE_CEILING);
        self
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = evidence.into();
        self
    }

    pub fn has_known_location(&self) -> bool {
        self.location != UNKNOWN_LOCATION
    }

    /// Splits a `"<file>:<line>"` location. Locations without a trailing
    /// line number (including `"unknown"`) yield `None`.
    pub fn file_line(&self) -> Option<(&str, u32)> {
        parse_file_line(&self.location)
    }
}

/// Parses `"<file>:<line>"`. The line is the final `:`-separated segment
/// so Windows-style paths with embedded colons still parse.
pub fn parse_file_line(location: &str) -> Option<(&str, u32)> {
    let (file, line) = location.rsplit_once(':')?;
    if file.is_empty() {
        return None;
    }
    let line = line.parse().ok()?;
    Some((file, line))
}
