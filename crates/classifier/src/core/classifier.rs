//! Classifier trait and plugin architecture.
//!
//! Classification is split across independent plugins implementing a
//! common trait, rather than one monolithic mapping. Each classifier owns
//! a domain (network/security operations, approval patterns, ...) and
//! encodes a fixed detection-category -> classification table for it.
//! The registry composes them; because classifiers are stateless and
//! side-effect-free over the analysis payload, composition is
//! order-independent apart from the explicit priority sort.

use crate::core::analysis::Analysis;
use crate::core::component::ClassifiedComponent;
use anyhow::Result;

pub trait Classifier: Send + Sync {
    fn name(&self) -> &'static str;

    /// Lower runs first. Priorities need not be unique: ties keep
    /// registration order.
    fn priority(&self) -> u32 {
        100
    }

    /// Cheap applicability check, called before `classify`.
    fn can_classify(&self, analysis: &Analysis) -> bool;

    /// Maps the analysis payload to classified components. Absent or
    /// malformed input is not an error: return an empty list and let the
    /// aggregator report the workflow as translatable.
    fn classify(&self, analysis: &Analysis) -> Result<Vec<ClassifiedComponent>>;
}
