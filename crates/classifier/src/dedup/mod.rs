//! Detection deduplication and evidence consolidation.
//!
//! The detector deliberately over-reports: an API call pattern and an
//! object-type pattern often fire on the same line, and the same
//! operation can be seen both in an item script and in free-floating
//! content. This module collapses raw detections of one logical
//! operation into a single merged detection without losing any pattern
//! evidence. The merge is conservative: a group is only formed on exact
//! location equality, a small same-file line window, or explicit name
//! similarity for unanchored detections.

use crate::core::detection::{parse_file_line, Detection, UNKNOWN_LOCATION};
use crate::core::evidence::consolidate_evidence;

/// Same-file line distance treated as one physical occurrence.
/// Inherited from the legacy analyzer without documented rationale;
/// flagged for product-owner review rather than re-derived.
pub const LINE_MERGE_WINDOW: u32 = 5;

/// Vendor prefixes stripped before name-similarity comparison.
const VENDOR_PREFIXES: &[&str] = &["nsx", "vro", "vcd", "vc"];

#[derive(Debug, Default)]
pub struct DeduplicationStats {
    pub raw_count: usize,
    pub merged_count: usize,
    pub removed_count: usize,
}

pub struct Deduplicator {
    line_window: u32,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self {
            line_window: LINE_MERGE_WINDOW,
        }
    }

    pub fn with_line_window(mut self, line_window: u32) -> Self {
        self.line_window = line_window;
        self
    }

    /// Collapses raw detections of one category. The output is never
    /// larger than the input, and re-running on the output is a no-op.
    pub fn deduplicate(&self, detections: &[Detection]) -> Vec<Detection> {
        self.deduplicate_with_stats(detections).0
    }

    pub fn deduplicate_with_stats(
        &self,
        detections: &[Detection],
    ) -> (Vec<Detection>, DeduplicationStats) {
        let groups = self.group_by_location(detections);
        let merged: Vec<Detection> = groups.iter().map(|g| merge_group(g)).collect();
        let consolidated = self.consolidate_unanchored(merged);

        let stats = DeduplicationStats {
            raw_count: detections.len(),
            merged_count: consolidated.len(),
            removed_count: detections.len() - consolidated.len(),
        };
        (consolidated, stats)
    }

    /// Step 1: group by exact location string, additionally merging
    /// `file:line` locations within the line window in the same file.
    fn group_by_location<'a>(&self, detections: &'a [Detection]) -> Vec<Vec<&'a Detection>> {
        let mut groups: Vec<Vec<&Detection>> = Vec::new();

        'next: for detection in detections {
            for group in groups.iter_mut() {
                if self.belongs_to_group(detection, group) {
                    group.push(detection);
                    continue 'next;
                }
            }
            groups.push(vec![detection]);
        }

        groups
    }

    fn belongs_to_group(&self, detection: &Detection, group: &[&Detection]) -> bool {
        if group.iter().any(|d| d.location == detection.location) {
            return true;
        }
        let Some((file, line)) = parse_file_line(&detection.location) else {
            return false;
        };
        group.iter().any(|d| match parse_file_line(&d.location) {
            Some((group_file, group_line)) => {
                group_file == file && group_line.abs_diff(line) <= self.line_window
            }
            None => false,
        })
    }

    /// Step 3: merge `"unknown"`-located detections into located ones by
    /// name similarity; keep the unmatched ones standalone.
    fn consolidate_unanchored(&self, merged: Vec<Detection>) -> Vec<Detection> {
        let (mut located, unanchored): (Vec<Detection>, Vec<Detection>) = merged
            .into_iter()
            .partition(|d| d.location != UNKNOWN_LOCATION);

        let mut standalone = Vec::new();

        for unknown in unanchored {
            let target = located
                .iter_mut()
                .find(|d| names_similar(&unknown.category, &d.name, &unknown.name));
            match target {
                Some(existing) => {
                    existing.evidence =
                        consolidate_evidence(&[&existing.evidence, &unknown.evidence]);
                    if unknown.confidence > existing.confidence {
                        existing.confidence = unknown.confidence;
                    }
                }
                None => standalone.push(unknown),
            }
        }

        located.extend(standalone);
        located
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new()
    }
}

/// Step 2: collapse one location group into a single detection.
fn merge_group(group: &[&Detection]) -> Detection {
    debug_assert!(!group.is_empty());
    if group.len() == 1 {
        return group[0].clone();
    }

    let name = most_specific_name(group);
    let confidence = group
        .iter()
        .map(|d| d.confidence)
        .fold(0.0_f64, f64::max);
    let location = group
        .iter()
        .find(|d| d.location != UNKNOWN_LOCATION)
        .map(|d| d.location.clone())
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());
    let evidence_blocks: Vec<&str> = group.iter().map(|d| d.evidence.as_str()).collect();

    Detection::new(group[0].category.clone(), name)
        .with_location(location)
        .with_confidence(confidence)
        .with_evidence(consolidate_evidence(&evidence_blocks))
}

/// Prefers an API-call-shaped name over a bare type name, then the first
/// name that is more than a restatement of the category.
fn most_specific_name(group: &[&Detection]) -> String {
    if let Some(call) = group.iter().find(|d| looks_like_api_call(&d.name)) {
        return call.name.clone();
    }
    if let Some(named) = group
        .iter()
        .find(|d| normalize(&d.name) != normalize(&d.category))
    {
        return named.name.clone();
    }
    group[0].name.clone()
}

fn looks_like_api_call(name: &str) -> bool {
    match name.split_once('.') {
        Some((receiver, method)) => {
            !receiver.is_empty()
                && !method.is_empty()
                && receiver.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                && method.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    }
}

/// Name similarity for cross-context consolidation: vendor/category
/// prefixes stripped then substring containment, or both names sharing a
/// category keyword.
fn names_similar(category: &str, a: &str, b: &str) -> bool {
    let a_stripped = strip_common_prefixes(category, a);
    let b_stripped = strip_common_prefixes(category, b);

    if !a_stripped.is_empty()
        && !b_stripped.is_empty()
        && (a_stripped.contains(&b_stripped) || b_stripped.contains(&a_stripped))
    {
        return true;
    }

    let a_lower = normalize(a);
    let b_lower = normalize(b);
    category
        .split('_')
        .any(|kw| a_lower.contains(kw) && b_lower.contains(kw))
}

fn strip_common_prefixes(category: &str, name: &str) -> String {
    let mut stripped = normalize(name);
    loop {
        let before = stripped.len();
        for prefix in VENDOR_PREFIXES {
            if let Some(rest) = stripped.strip_prefix(prefix) {
                stripped = rest.to_string();
            }
        }
        for segment in category.split('_') {
            if let Some(rest) = stripped.strip_prefix(segment) {
                stripped = rest.to_string();
            }
        }
        stripped = stripped
            .trim_start_matches(|c: char| !c.is_ascii_alphanumeric())
            .to_string();
        if stripped.len() == before {
            return stripped;
        }
    }
}

fn normalize(s: &str) -> String {
    s.to_lowercase()
}
