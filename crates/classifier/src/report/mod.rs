//! Gap report rendering.
//!
//! Two equivalent views of one aggregation: a narrative markdown document
//! for humans and a structured JSON document for tooling. Both are
//! derived from the same [`GapReport`] value so neither consumer has to
//! re-derive anything.

use crate::core::{
    sort_components, ClassificationSummary, ClassifiedComponent, TranslatabilityLevel,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Markdown,
    Json,
}

/// The aggregated classification result for one workflow: the boundary
/// document downstream tooling consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapReport {
    pub workflow_name: String,

    pub summary: ClassificationSummary,

    pub components: Vec<ClassifiedComponent>,

    /// Guidance per migration path that actually occurs in the result.
    pub migration_guidance: BTreeMap<String, String>,
}

impl GapReport {
    /// Builds the report from classifier output: sorts worst-first and
    /// computes the summary and guidance.
    pub fn new(workflow_name: impl Into<String>, mut components: Vec<ClassifiedComponent>) -> Self {
        sort_components(&mut components);
        let summary = ClassificationSummary::from_components(&components);

        let mut migration_guidance = BTreeMap::new();
        if summary.migration_paths.path_a > 0 {
            migration_guidance.insert(
                "PATH_A".to_string(),
                "Replace with the platform-native equivalent listed per component; these translate mechanically.".to_string(),
            );
        }
        if summary.migration_paths.path_b > 0 {
            migration_guidance.insert(
                "PATH_B".to_string(),
                "Hybrid: keep the legacy system for these pieces and bridge to it until a native design exists.".to_string(),
            );
        }
        if summary.migration_paths.path_c > 0 {
            migration_guidance.insert(
                "PATH_C".to_string(),
                "Custom specialist work: scope each item individually before committing to a migration date.".to_string(),
            );
        }

        Self {
            workflow_name: workflow_name.into(),
            summary,
            components,
            migration_guidance,
        }
    }

    pub fn components_at(&self, level: TranslatabilityLevel) -> Vec<&ClassifiedComponent> {
        self.components.iter().filter(|c| c.level == level).collect()
    }
}

pub struct GapReporter;

impl GapReporter {
    pub fn generate(report: &GapReport, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Markdown => Ok(Self::generate_markdown(report)),
            ReportFormat::Json => Self::generate_json(report),
        }
    }

    fn generate_json(report: &GapReport) -> Result<String> {
        serde_json::to_string_pretty(report)
            .map_err(|e| anyhow::anyhow!("failed to serialize gap report: {}", e))
    }

    fn generate_markdown(report: &GapReport) -> String {
        let mut out = String::new();

        out.push_str(&format!("# Migration Gap Report: {}\n\n", report.workflow_name));

        out.push_str("## Summary\n\n");
        out.push_str(&format!(
            "- **Total components**: {}\n",
            report.summary.total_components
        ));
        out.push_str(&format!("- **Manual**: {}\n", report.summary.counts.manual));
        out.push_str(&format!("- **Blocked**: {}\n", report.summary.counts.blocked));
        out.push_str(&format!("- **Partial**: {}\n", report.summary.counts.partial));
        out.push_str(&format!(
            "- **Supported**: {}\n",
            report.summary.counts.supported
        ));
        out.push_str(&format!(
            "- **Overall assessment**: {}\n\n",
            report.summary.overall_assessment
        ));

        // Worst first, same order the severity sort uses.
        for level in [
            TranslatabilityLevel::Manual,
            TranslatabilityLevel::Blocked,
            TranslatabilityLevel::Partial,
            TranslatabilityLevel::Supported,
        ] {
            let components = report.components_at(level);
            if components.is_empty() {
                continue;
            }

            out.push_str(&format!(
                "## {} ({} — {})\n\n",
                level,
                components.len(),
                level_heading(level)
            ));

            for component in components {
                out.push_str(&format!("### {}\n\n", component.name));
                out.push_str(&format!("- **Type**: {}\n", component.component_type));
                if let Some(location) = &component.location {
                    out.push_str(&format!("- **Location**: {}\n", location));
                }
                if let Some(equivalent) = &component.openshift_equivalent {
                    out.push_str(&format!("- **OpenShift equivalent**: {}\n", equivalent));
                }
                if let Some(path) = component.migration_path {
                    out.push_str(&format!("- **Migration path**: {}\n", path));
                }
                out.push_str(&format!("\n{}\n\n", component.reason));

                if let Some(evidence) = &component.evidence {
                    out.push_str("**Evidence**:\n\n```\n");
                    out.push_str(evidence);
                    out.push_str("\n```\n\n");
                }

                if !component.recommendations.is_empty() {
                    out.push_str("**Recommendations**:\n\n");
                    for rec in &component.recommendations {
                        out.push_str(&format!("- {}\n", rec));
                    }
                    out.push('\n');
                }
            }
        }

        if !report.migration_guidance.is_empty() {
            out.push_str("## Migration Guidance\n\n");
            for (path, guidance) in &report.migration_guidance {
                out.push_str(&format!("- **{}**: {}\n", path, guidance));
            }
        }

        out
    }
}

fn level_heading(level: TranslatabilityLevel) -> &'static str {
    match level {
        TranslatabilityLevel::Manual => "needs human design work",
        TranslatabilityLevel::Blocked => "no mechanical translation",
        TranslatabilityLevel::Partial => "translatable with caveats",
        TranslatabilityLevel::Supported => "translates mechanically",
    }
}
