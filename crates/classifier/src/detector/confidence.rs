//! Confidence scoring.
//!
//! `confidence` is a pure function of its three arguments: the same
//! inputs always produce the same score, so detection output is
//! reproducible across runs and across reimplementations. Supportive
//! tokens are counted as a deduplicated set from a fixed list, in the
//! list's declared order, which makes the boost independent of where or
//! how often a token appears in the context window.

use crate::core::detection::CONFIDENCE_CEILING;

/// Shape of a pattern match, decided from the matched text alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// `identifier.identifier(` — a concrete API invocation.
    ApiCall,
    /// A bare object/type name (`SecurityGroup`).
    TypeName,
    /// A generic keyword hit.
    Keyword,
}

/// Method prefixes that mark an API call as a recognizable operation
/// rather than an arbitrary helper.
const METHOD_PREFIXES: &[&str] = &[
    "create", "delete", "update", "get", "add", "remove", "apply", "invoke", "execute", "attach",
];

/// Tokens whose presence near a match supports it being a real
/// operation: protocol markers plus the keywords of the other pattern
/// categories.
const SUPPORTIVE_TOKENS: &[&str] = &[
    "nsx", "security", "firewall", "network", "approval", "rest", "soap", "http", "https",
    "endpoint", "token", "workflow", "vcenter", "datastore", "snapshot", "plugin", "credential",
];

/// Per-token boost and its overall cap. Two or more co-occurring tokens
/// are what the boost is meant to reward; a single token moves the score
/// only marginally.
const TOKEN_BOOST: f64 = 0.03;
const MAX_BOOST: f64 = 0.15;

/// Decides the match kind from the matched text. An API call is
/// identifier-dot-identifier followed by an opening paren; a type name is
/// a capitalized bare identifier; everything else is a keyword hit.
pub fn classify_match(matched: &str) -> MatchKind {
    let trimmed = matched.trim_end();
    if trimmed.ends_with('(') {
        let body = trimmed.trim_end_matches('(').trim_end();
        if let Some((receiver, method)) = body.rsplit_once('.') {
            if is_identifier(receiver) && is_identifier(method) {
                return MatchKind::ApiCall;
            }
        }
    }
    if trimmed.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && is_identifier(trimmed)
    {
        return MatchKind::TypeName;
    }
    MatchKind::Keyword
}

/// Maps (match kind, context, matched text) to a bounded confidence
/// score in `[0, 0.95]`.
pub fn confidence(kind: MatchKind, context: &str, matched: &str) -> f64 {
    let base = match kind {
        MatchKind::ApiCall => {
            if has_recognized_prefix(matched) {
                0.90
            } else {
                0.85
            }
        }
        MatchKind::TypeName => {
            if is_compound_name(matched) {
                0.65
            } else {
                0.55
            }
        }
        MatchKind::Keyword => 0.35,
    };

    let context_lower = context.to_lowercase();
    let matched_lower = matched.to_lowercase();
    let boost = SUPPORTIVE_TOKENS
        .iter()
        .filter(|token| context_lower.contains(**token) && !matched_lower.contains(**token))
        .count() as f64
        * TOKEN_BOOST;

    (base + boost.min(MAX_BOOST)).clamp(0.0, CONFIDENCE_CEILING)
}

fn has_recognized_prefix(matched: &str) -> bool {
    let method = matched
        .trim_end_matches(|c: char| c == '(' || c.is_whitespace())
        .rsplit('.')
        .next()
        .unwrap_or("");
    let method_lower = method.to_lowercase();
    METHOD_PREFIXES.iter().any(|p| method_lower.starts_with(p))
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !s.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// CamelCase with at least two humps (`SecurityGroup`), a stronger
/// signal than a single capitalized word.
fn is_compound_name(s: &str) -> bool {
    s.chars().filter(|c| c.is_ascii_uppercase()).count() >= 2
}
