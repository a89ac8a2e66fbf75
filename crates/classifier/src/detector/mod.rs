//! Pattern detection over parsed workflow documents.
//!
//! The detector walks a [`WorkflowDocument`] three ways: regex patterns
//! against item script bodies (anchored to `file:line`), category
//! keywords against item names/types (anchored to the item), and regex
//! patterns against free-floating script content (no anchor, location
//! `"unknown"`). Every match becomes a raw [`Detection`] carrying a
//! ±50-character context window as evidence; the deduplicator is
//! responsible for collapsing the redundancy this deliberately produces.

pub mod confidence;
pub mod document;
pub mod patterns;

pub use confidence::{classify_match, confidence, MatchKind};
pub use document::{DocumentError, ScriptBlock, WorkflowDocument, WorkflowItem};
pub use patterns::{PatternCategory, PatternLibrary};

use crate::core::detection::{Detection, UNKNOWN_LOCATION};
use crate::core::evidence::{render_item_evidence, render_pattern_evidence};
use std::collections::BTreeMap;

/// Width of the evidence context window on each side of a match.
const CONTEXT_WINDOW: usize = 50;

pub struct Detector {
    library: PatternLibrary,
}

impl Detector {
    pub fn new(library: PatternLibrary) -> Self {
        Self { library }
    }

    /// Scans the document and returns raw detections keyed by category.
    /// Raw means redundant: the same operation observed through several
    /// patterns or contexts appears several times.
    pub fn detect(&self, doc: &WorkflowDocument) -> BTreeMap<String, Vec<Detection>> {
        let mut detections: BTreeMap<String, Vec<Detection>> = BTreeMap::new();

        for category in self.library.categories() {
            let mut found = Vec::new();

            for item in &doc.items {
                if let Some(script) = &item.script {
                    found.extend(self.scan_script(category, doc, script));
                }
                found.extend(self.scan_item(category, doc, item));
            }
            for script in &doc.free_scripts {
                found.extend(self.scan_script(category, doc, script));
            }

            if !found.is_empty() {
                detections.insert(category.name.to_string(), found);
            }
        }

        detections
    }

    fn scan_script(
        &self,
        category: &PatternCategory,
        doc: &WorkflowDocument,
        script: &ScriptBlock,
    ) -> Vec<Detection> {
        let mut detections = Vec::new();

        for pattern in &category.patterns {
            for m in pattern.find_iter(&script.content) {
                let matched = m.as_str();
                let context = context_window(&script.content, m.start(), m.end());

                let location = match script.start_line {
                    Some(start) => {
                        let offset = script.content[..m.start()]
                            .bytes()
                            .filter(|b| *b == b'\n')
                            .count() as u32;
                        format!("{}:{}", doc.file, start + offset)
                    }
                    None => UNKNOWN_LOCATION.to_string(),
                };

                let kind = classify_match(matched);
                let name = clean_match_name(matched);
                let score = confidence(kind, &context, matched);

                detections.push(
                    Detection::new(category.name, name)
                        .with_location(location.clone())
                        .with_confidence(score)
                        .with_evidence(render_pattern_evidence(
                            &[clean_match_name(matched)],
                            &location,
                            &context,
                        )),
                );
            }
        }

        detections
    }

    fn scan_item(
        &self,
        category: &PatternCategory,
        doc: &WorkflowDocument,
        item: &WorkflowItem,
    ) -> Vec<Detection> {
        let Some(keyword) = category.matches_item(&item.name, &item.item_type) else {
            return Vec::new();
        };

        let location = doc.item_location(item);
        let text = format!("{} [{}]", item.name, item.item_type);
        let score = confidence(MatchKind::Keyword, &text, keyword);

        vec![Detection::new(category.name, item.name.clone())
            .with_location(location.clone())
            .with_confidence(score)
            .with_evidence(render_item_evidence(keyword, &location, &text))]
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(PatternLibrary::defaults())
    }
}

/// Match text normalized into a detection name: call-shaped matches drop
/// the trailing paren, everything else is kept as-is.
fn clean_match_name(matched: &str) -> String {
    matched
        .trim_end_matches(|c: char| c == '(' || c.is_whitespace())
        .to_string()
}

/// ±`CONTEXT_WINDOW` characters around the match, flattened to one line.
fn context_window(text: &str, start: usize, end: usize) -> String {
    let mut lo = start.saturating_sub(CONTEXT_WINDOW);
    while lo > 0 && !text.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = (end + CONTEXT_WINDOW).min(text.len());
    while hi < text.len() && !text.is_char_boundary(hi) {
        hi += 1;
    }
    text[lo..hi].replace(['\n', '\r'], " ").trim().to_string()
}
