//! Parsed workflow source model.
//!
//! The detector never touches raw XML: callers parse a source file into a
//! [`WorkflowDocument`] first, so scanning works identically whether the
//! document came from disk or was assembled in memory by a test.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to parse workflow XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("workflow document has no root element name and no items")]
    EmptyDocument,
}

/// One structural item of a workflow: a task, a decision point, a wait, a
/// user interaction. Items anchor detections to a `file:line` location.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowItem {
    pub name: String,
    pub item_type: String,
    pub line: u32,
    pub script: Option<ScriptBlock>,
}

/// Inline script content. `start_line` is the line of the enclosing
/// element in the source file when known; free-floating blocks (content
/// assembled outside any structural item) have none and produce
/// detections with an `"unknown"` location.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptBlock {
    pub content: String,
    pub start_line: Option<u32>,
}

impl ScriptBlock {
    pub fn anchored(content: impl Into<String>, start_line: u32) -> Self {
        Self {
            content: content.into(),
            start_line: Some(start_line),
        }
    }

    pub fn floating(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            start_line: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WorkflowDocument {
    pub name: String,

    /// Source file name, used verbatim in detection locations.
    pub file: String,

    pub items: Vec<WorkflowItem>,

    /// Script content with no structural anchor.
    pub free_scripts: Vec<ScriptBlock>,
}

impl WorkflowDocument {
    pub fn new(name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            items: Vec::new(),
            free_scripts: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: WorkflowItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_free_script(mut self, script: ScriptBlock) -> Self {
        self.free_scripts.push(script);
        self
    }

    /// Parses a workflow XML tree. Structural items are `<workflow-item>`
    /// elements (name/type attributes, optional `<script>` child); any
    /// `<script>` element outside an item is collected as free-floating
    /// content. This is the only place a structurally invalid document
    /// surfaces as an error to the caller.
    pub fn from_xml(file: &str, xml: &str) -> Result<Self, DocumentError> {
        let tree = roxmltree::Document::parse(xml)?;
        let root = tree.root_element();

        let name = root
            .attribute("name")
            .or_else(|| root.attribute("object-name"))
            .unwrap_or("")
            .to_string();

        let mut doc = WorkflowDocument::new(name, file);

        for node in root.descendants().filter(|n| n.has_tag_name("workflow-item")) {
            let line = tree.text_pos_at(node.range().start).row;
            let script = node
                .children()
                .find(|c| c.has_tag_name("script"))
                .map(|script_node| {
                    let script_line = tree.text_pos_at(script_node.range().start).row;
                    ScriptBlock::anchored(script_node.text().unwrap_or("").trim(), script_line)
                });

            doc.items.push(WorkflowItem {
                name: node.attribute("name").unwrap_or("").to_string(),
                item_type: node.attribute("type").unwrap_or("task").to_string(),
                line,
                script,
            });
        }

        for node in root.descendants().filter(|n| n.has_tag_name("script")) {
            let in_item = node
                .ancestors()
                .any(|a| a.has_tag_name("workflow-item"));
            if in_item {
                continue;
            }
            if let Some(text) = node.text() {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    doc.free_scripts.push(ScriptBlock::floating(trimmed));
                }
            }
        }

        if doc.name.is_empty() && doc.items.is_empty() && doc.free_scripts.is_empty() {
            return Err(DocumentError::EmptyDocument);
        }

        Ok(doc)
    }

    /// `"<file>:<line>"` location string for an item.
    pub fn item_location(&self, item: &WorkflowItem) -> String {
        format!("{}:{}", self.file, item.line)
    }
}
