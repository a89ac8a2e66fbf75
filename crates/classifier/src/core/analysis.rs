use crate::core::detection::Detection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The payload classifiers operate on: deduplicated detections keyed by
/// pattern category, plus (optionally) the normalized intent document the
/// external extraction step produced for the same workflow.
///
/// Every field tolerates absence. A default `Analysis` classifies to an
/// empty component list, which the aggregator reports as fully
/// translatable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub workflow_name: String,

    /// Category name -> merged detections. `BTreeMap` keeps category
    /// iteration order stable so classifier output is reproducible.
    #[serde(default)]
    pub detections: BTreeMap<String, Vec<Detection>>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub intent: Option<IntentDocument>,
}

impl Analysis {
    pub fn new(workflow_name: impl Into<String>) -> Self {
        Self {
            workflow_name: workflow_name.into(),
            detections: BTreeMap::new(),
            intent: None,
        }
    }

    pub fn with_detections(mut self, category: impl Into<String>, detections: Vec<Detection>) -> Self {
        self.detections.insert(category.into(), detections);
        self
    }

    pub fn with_intent(mut self, intent: IntentDocument) -> Self {
        self.intent = Some(intent);
        self
    }

    pub fn detections_for(&self, category: &str) -> &[Detection] {
        self.detections.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_detections(&self, category: &str) -> bool {
        !self.detections_for(category).is_empty()
    }

    pub fn total_detections(&self) -> usize {
        self.detections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_detections() == 0 && self.intent.is_none()
    }
}

/// Normalized intent document for one workflow, as produced by the
/// external extraction collaborator. Sections the classifiers do not
/// inspect stay schemaless (`Value`) so additions upstream never break
/// deserialization here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntentDocument {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub workload_type: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub inputs: Vec<Value>,

    #[serde(default)]
    pub governance: Governance,

    #[serde(skip_serializing_if = "Value::is_null", default)]
    pub security: Value,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub integrations: Vec<Integration>,

    #[serde(default)]
    pub infrastructure: Infrastructure,

    #[serde(skip_serializing_if = "Value::is_null", default)]
    pub resources: Value,

    #[serde(skip_serializing_if = "Value::is_null", default)]
    pub metadata: Value,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub day2_operations: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Governance {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub approval: Option<Value>,
}

impl Governance {
    /// Whether the workflow carries an approval step. Extractors emit
    /// either a bare boolean or an object describing the flow; `false`
    /// and `null` both mean "no approval".
    pub fn requires_approval(&self) -> bool {
        match &self.approval {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(_) => true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Integration {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Infrastructure {
    #[serde(default)]
    pub networking: Networking,

    #[serde(skip_serializing_if = "Value::is_null", default)]
    pub storage: Value,
}

/// Storage flags that force manual review when present and truthy.
const ADVANCED_STORAGE_FLAGS: &[&str] = &[
    "rdm",
    "raw_device_mapping",
    "shared_disks",
    "multi_writer",
    "independent_persistent",
];

impl Infrastructure {
    pub fn has_advanced_storage(&self) -> bool {
        let Value::Object(map) = &self.storage else {
            return false;
        };
        ADVANCED_STORAGE_FLAGS.iter().any(|flag| {
            matches!(map.get(*flag), Some(Value::Bool(true)))
                || matches!(map.get(*flag), Some(Value::Object(_)) | Some(Value::Array(_)))
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Networking {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub nics: Vec<Value>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub multi_nic: Option<bool>,
}

impl Networking {
    pub fn is_multi_nic(&self) -> bool {
        self.multi_nic.unwrap_or(false) || self.nics.len() > 1
    }
}
