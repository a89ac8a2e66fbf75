use serde::{Deserialize, Serialize};
use std::fmt;

/// How mechanically a detected component can be translated to the target
/// platform. Ordering is by severity: `Supported` is the best case,
/// `Manual` the worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TranslatabilityLevel {
    Supported,
    Partial,
    Blocked,
    Manual,
}

impl TranslatabilityLevel {
    /// Fixed severity rank, 0 (Supported) to 3 (Manual). The default
    /// display/sort order of classified components is worst-first on
    /// this rank.
    pub fn severity(&self) -> u8 {
        match self {
            Self::Supported => 0,
            Self::Partial => 1,
            Self::Blocked => 2,
            Self::Manual => 3,
        }
    }

    /// Canonical wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supported => "SUPPORTED",
            Self::Partial => "PARTIAL",
            Self::Blocked => "BLOCKED",
            Self::Manual => "MANUAL",
        }
    }

    /// Parses a stored level name. Decision records carry these as plain
    /// strings; an unrecognized name yields `None` so the caller can
    /// ignore the record rather than corrupt state.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "SUPPORTED" => Some(Self::Supported),
            "PARTIAL" => Some(Self::Partial),
            "BLOCKED" => Some(Self::Blocked),
            "MANUAL" => Some(Self::Manual),
            _ => None,
        }
    }

    pub fn all() -> [Self; 4] {
        [Self::Supported, Self::Partial, Self::Blocked, Self::Manual]
    }
}

impl fmt::Display for TranslatabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommended route for a component that is not fully supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MigrationPath {
    /// Platform-native replacement.
    #[serde(rename = "PATH_A")]
    PathA,
    /// Hybrid: keep the legacy system for this piece.
    #[serde(rename = "PATH_B")]
    PathB,
    /// Custom specialist work.
    #[serde(rename = "PATH_C")]
    PathC,
}

impl MigrationPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PathA => "PATH_A",
            Self::PathB => "PATH_B",
            Self::PathC => "PATH_C",
        }
    }
}

impl fmt::Display for MigrationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering_matches_enum_ordering() {
        let levels = TranslatabilityLevel::all();
        for pair in levels.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].severity() < pair[1].severity());
        }
    }

    #[test]
    fn test_parse_round_trips() {
        for level in TranslatabilityLevel::all() {
            assert_eq!(TranslatabilityLevel::parse(level.as_str()), Some(level));
        }
        assert_eq!(TranslatabilityLevel::parse("CRITICAL"), None);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&TranslatabilityLevel::Manual).unwrap(),
            "\"MANUAL\""
        );
        assert_eq!(serde_json::to_string(&MigrationPath::PathA).unwrap(), "\"PATH_A\"");
    }
}
