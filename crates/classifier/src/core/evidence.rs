//! Evidence line parsing and consolidation.
//!
//! Evidence travels as rendered text so it survives serialization to the
//! decisions store and the gap report unchanged. Exactly two layouts are
//! ever produced:
//!
//! ```text
//! Pattern match: <names> in context (<location>): <context>
//! Workflow item name/type contains <keyword> (<location>): <text>
//! ```
//!
//! Re-deriving structure from these strings is confined to this module:
//! [`EvidenceRecord::parse`] is the only place the layouts are read back,
//! and the render functions below are the only places they are written.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const PATTERN_PREFIX: &str = "Pattern match: ";
const PATTERN_INFIX: &str = " in context (";
const ITEM_PREFIX: &str = "Workflow item name/type contains ";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EvidenceRecord {
    /// A regex pattern (or several, after consolidation) matched at a
    /// location. `names` keeps first-occurrence order.
    Pattern {
        names: Vec<String>,
        location: String,
        context: String,
    },

    /// A workflow item's name or type contained a category keyword.
    WorkflowItem {
        keyword: String,
        location: String,
        text: String,
    },

    /// Anything that does not match a known layout. Kept verbatim so
    /// consolidation never loses information.
    Other { line: String },
}

impl EvidenceRecord {
    /// Parses one evidence line. Never fails: unknown layouts become
    /// [`EvidenceRecord::Other`].
    pub fn parse(line: &str) -> Self {
        if let Some(rest) = line.strip_prefix(PATTERN_PREFIX) {
            if let Some(infix_at) = rest.find(PATTERN_INFIX) {
                let names_part = &rest[..infix_at];
                let tail = &rest[infix_at + PATTERN_INFIX.len()..];
                if let Some((location, context)) = tail.split_once("): ") {
                    return Self::Pattern {
                        names: names_part.split(", ").map(str::to_string).collect(),
                        location: location.to_string(),
                        context: context.to_string(),
                    };
                }
            }
        }

        if let Some(rest) = line.strip_prefix(ITEM_PREFIX) {
            if let Some((head, text)) = rest.split_once("): ") {
                if let Some((keyword, location)) = head.rsplit_once(" (") {
                    return Self::WorkflowItem {
                        keyword: keyword.to_string(),
                        location: location.to_string(),
                        text: text.to_string(),
                    };
                }
            }
        }

        Self::Other {
            line: line.to_string(),
        }
    }

    pub fn render(&self) -> String {
        match self {
            Self::Pattern {
                names,
                location,
                context,
            } => render_pattern_evidence(names, location, context),
            Self::WorkflowItem {
                keyword,
                location,
                text,
            } => render_item_evidence(keyword, location, text),
            Self::Other { line } => line.clone(),
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Pattern { location, .. } | Self::WorkflowItem { location, .. } => Some(location),
            Self::Other { .. } => None,
        }
    }
}

pub fn render_pattern_evidence(names: &[String], location: &str, context: &str) -> String {
    format!(
        "{}{}{}{}): {}",
        PATTERN_PREFIX,
        names.join(", "),
        PATTERN_INFIX,
        location,
        context
    )
}

pub fn render_item_evidence(keyword: &str, location: &str, text: &str) -> String {
    format!("{}{} ({}): {}", ITEM_PREFIX, keyword, location, text)
}

/// Collapses the evidence of several detections of one logical operation
/// into a single multi-line string.
///
/// Pattern records sharing a location become one line listing the
/// de-duplicated pattern names (first occurrence wins the ordering)
/// paired with the longest captured context. Everything else passes
/// through unchanged, in its original position. Running the result back
/// through this function is a no-op.
pub fn consolidate_evidence(evidence_blocks: &[&str]) -> String {
    let records: Vec<EvidenceRecord> = evidence_blocks
        .iter()
        .flat_map(|block| block.lines())
        .filter(|line| !line.trim().is_empty())
        .map(EvidenceRecord::parse)
        .collect();

    let mut emitted_locations: HashSet<String> = HashSet::new();
    let mut lines = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        match record {
            EvidenceRecord::Pattern { location, .. } => {
                if !emitted_locations.insert(location.clone()) {
                    continue;
                }
                lines.push(combine_patterns_at(&records[idx..], location).render());
            }
            other => lines.push(other.render()),
        }
    }

    lines.join("\n")
}

/// Merges all pattern records at `location` (searched from the first
/// occurrence onward) into one record.
fn combine_patterns_at(records: &[EvidenceRecord], location: &str) -> EvidenceRecord {
    let mut names: Vec<String> = Vec::new();
    let mut best_context = String::new();

    for record in records {
        let EvidenceRecord::Pattern {
            names: record_names,
            location: record_location,
            context,
        } = record
        else {
            continue;
        };
        if record_location != location {
            continue;
        }
        for name in record_names {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        if context.len() > best_context.len() {
            best_context = context.clone();
        }
    }

    EvidenceRecord::Pattern {
        names,
        location: location.to_string(),
        context: best_context,
    }
}

/// Distinct pattern names mentioned anywhere in an evidence string.
/// Merge steps use this to assert no names were dropped.
pub fn pattern_names(evidence: &str) -> HashSet<String> {
    evidence
        .lines()
        .filter_map(|line| match EvidenceRecord::parse(line) {
            EvidenceRecord::Pattern { names, .. } => Some(names),
            _ => None,
        })
        .flatten()
        .collect()
}
