use crate::core::component::ClassifiedComponent;
use crate::core::level::{MigrationPath, TranslatabilityLevel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// PARTIAL share above which a workflow is assessed MOSTLY_MANUAL.
/// Inherited from the legacy analyzer without documented rationale;
/// flagged for product-owner review rather than re-derived.
pub const MOSTLY_MANUAL_PARTIAL_RATIO: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallAssessment {
    FullyTranslatable,
    MostlyAutomatic,
    MostlyManual,
    RequiresManualWork,
}

impl OverallAssessment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullyTranslatable => "FULLY_TRANSLATABLE",
            Self::MostlyAutomatic => "MOSTLY_AUTOMATIC",
            Self::MostlyManual => "MOSTLY_MANUAL",
            Self::RequiresManualWork => "REQUIRES_MANUAL_WORK",
        }
    }
}

impl fmt::Display for OverallAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts {
    #[serde(rename = "SUPPORTED")]
    pub supported: usize,
    #[serde(rename = "PARTIAL")]
    pub partial: usize,
    #[serde(rename = "BLOCKED")]
    pub blocked: usize,
    #[serde(rename = "MANUAL")]
    pub manual: usize,
}

impl LevelCounts {
    pub fn total(&self) -> usize {
        self.supported + self.partial + self.blocked + self.manual
    }

    fn record(&mut self, level: TranslatabilityLevel) {
        match level {
            TranslatabilityLevel::Supported => self.supported += 1,
            TranslatabilityLevel::Partial => self.partial += 1,
            TranslatabilityLevel::Blocked => self.blocked += 1,
            TranslatabilityLevel::Manual => self.manual += 1,
        }
    }
}

/// Migration-path distribution. Components with no assigned path are
/// counted explicitly rather than dropped: a missing path on a
/// non-SUPPORTED component is a signal worth surfacing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathCounts {
    #[serde(rename = "PATH_A")]
    pub path_a: usize,
    #[serde(rename = "PATH_B")]
    pub path_b: usize,
    #[serde(rename = "PATH_C")]
    pub path_c: usize,
    #[serde(rename = "NONE")]
    pub none: usize,
}

impl PathCounts {
    fn record(&mut self, path: Option<MigrationPath>) {
        match path {
            Some(MigrationPath::PathA) => self.path_a += 1,
            Some(MigrationPath::PathB) => self.path_b += 1,
            Some(MigrationPath::PathC) => self.path_c += 1,
            None => self.none += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationSummary {
    pub total_components: usize,

    pub counts: LevelCounts,

    pub overall_assessment: OverallAssessment,

    pub migration_paths: PathCounts,

    pub has_blocking_issues: bool,

    pub requires_manual_work: bool,
}

impl ClassificationSummary {
    pub fn from_components(components: &[ClassifiedComponent]) -> Self {
        let mut counts = LevelCounts::default();
        let mut migration_paths = PathCounts::default();

        for component in components {
            counts.record(component.level);
            migration_paths.record(component.migration_path);
        }

        Self {
            total_components: counts.total(),
            overall_assessment: assess(&counts),
            has_blocking_issues: counts.blocked > 0,
            requires_manual_work: counts.blocked > 0 || counts.manual > 0,
            counts,
            migration_paths,
        }
    }
}

fn assess(counts: &LevelCounts) -> OverallAssessment {
    let total = counts.total();
    if total == 0 {
        return OverallAssessment::FullyTranslatable;
    }
    if counts.blocked > 0 || counts.manual > 0 {
        return OverallAssessment::RequiresManualWork;
    }
    if counts.partial as f64 > MOSTLY_MANUAL_PARTIAL_RATIO * total as f64 {
        return OverallAssessment::MostlyManual;
    }
    if counts.partial > 0 {
        return OverallAssessment::MostlyAutomatic;
    }
    OverallAssessment::FullyTranslatable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::level::TranslatabilityLevel as Level;

    fn component(name: &str, level: Level) -> ClassifiedComponent {
        ClassifiedComponent::new(name, "test", level, "test")
    }

    #[test]
    fn test_empty_is_fully_translatable() {
        let summary = ClassificationSummary::from_components(&[]);
        assert_eq!(summary.overall_assessment, OverallAssessment::FullyTranslatable);
        assert!(!summary.has_blocking_issues);
        assert!(!summary.requires_manual_work);
    }

    #[test]
    fn test_blocked_forces_manual_work_assessment() {
        let components = vec![
            component("a", Level::Supported),
            component("b", Level::Blocked),
        ];
        let summary = ClassificationSummary::from_components(&components);
        assert_eq!(summary.overall_assessment, OverallAssessment::RequiresManualWork);
        assert!(summary.has_blocking_issues);
        assert!(summary.requires_manual_work);
    }

    #[test]
    fn test_partial_majority_is_mostly_manual() {
        // 5 PARTIAL out of 8: above the 50% threshold.
        let mut components: Vec<_> = (0..5)
            .map(|i| component(&format!("p{}", i), Level::Partial))
            .collect();
        components.extend((0..3).map(|i| component(&format!("s{}", i), Level::Supported)));

        let summary = ClassificationSummary::from_components(&components);
        assert_eq!(summary.overall_assessment, OverallAssessment::MostlyManual);
        assert!(!summary.requires_manual_work);
    }

    #[test]
    fn test_exactly_half_partial_is_mostly_automatic() {
        let components = vec![
            component("p1", Level::Partial),
            component("p2", Level::Partial),
            component("s1", Level::Supported),
            component("s2", Level::Supported),
        ];
        let summary = ClassificationSummary::from_components(&components);
        assert_eq!(summary.overall_assessment, OverallAssessment::MostlyAutomatic);
    }

    #[test]
    fn test_path_distribution_counts_none_bucket() {
        let components = vec![
            component("a", Level::Partial).with_migration_path(crate::core::MigrationPath::PathA),
            component("b", Level::Partial),
        ];
        let summary = ClassificationSummary::from_components(&components);
        assert_eq!(summary.migration_paths.path_a, 1);
        assert_eq!(summary.migration_paths.none, 1);
    }
}
