//! JSON output types for the nested heading structure.

use super::tree::HTree;
use indextree::NodeId;
use serde::{Deserialize, Serialize};

/// Root document structure with metadata and nested sections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentOutput {
    pub document: DocumentRoot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRoot {
    pub metadata: DocumentMetadata,
    /// Text before the first heading
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub preamble: String,
    pub sections: Vec<SectionOutput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub source: Option<String>,
    #[serde(rename = "headingCount")]
    pub heading_count: usize,
    #[serde(rename = "maxDepth")]
    pub max_depth: usize,
    #[serde(rename = "wordCount")]
    pub word_count: usize,
}

/// A section with nested children based on heading hierarchy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionOutput {
    /// Heading level (1-5)
    pub level: u32,
    /// Heading line text
    pub title: String,
    /// Raw content between the heading line and the first child
    pub content: String,
    /// Child sections (nested headings)
    pub children: Vec<SectionOutput>,
}

fn section_output(tree: &HTree, id: NodeId) -> SectionOutput {
    let section = tree.section(id);
    SectionOutput {
        level: section.level(),
        title: section.heading_line(),
        content: section.body_text(),
        children: tree
            .children(id)
            .map(|child| section_output(tree, child))
            .collect(),
    }
}

/// Convert a heading tree into its serializable form.
pub fn build_json_output(tree: &HTree, source: Option<&str>) -> DocumentOutput {
    let root = tree.section(tree.root());
    let word_count = tree
        .nodes()
        .map(|id| {
            let section = tree.section(id);
            section.heading_line().split_whitespace().count()
                + section.body_text().split_whitespace().count()
        })
        .sum();

    DocumentOutput {
        document: DocumentRoot {
            metadata: DocumentMetadata {
                source: source.map(str::to_string),
                heading_count: tree.len(),
                max_depth: tree.max_depth(),
                word_count,
            },
            preamble: root.body_text(),
            sections: tree
                .children(tree.root())
                .map(|id| section_output(tree, id))
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_markdown;

    #[test]
    fn test_nested_sections() {
        let tree = parse_markdown("intro\n# A\nalpha beta\n## B\n# C\n").unwrap();
        let output = build_json_output(&tree, Some("doc.md"));
        let doc = &output.document;

        assert_eq!(doc.metadata.source.as_deref(), Some("doc.md"));
        assert_eq!(doc.metadata.heading_count, 3);
        assert_eq!(doc.metadata.max_depth, 2);
        assert_eq!(doc.metadata.word_count, 6);
        assert_eq!(doc.preamble, "intro\n");
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].title, "A");
        assert_eq!(doc.sections[0].content, "\nalpha beta\n");
        assert_eq!(doc.sections[0].children[0].level, 2);
        assert_eq!(doc.sections[1].title, "C");
    }

    #[test]
    fn test_serializes_camel_case_metadata() {
        let tree = parse_markdown("# Only\n").unwrap();
        let json = serde_json::to_value(build_json_output(&tree, None)).unwrap();
        assert_eq!(json["document"]["metadata"]["headingCount"], 1);
        assert_eq!(json["document"]["sections"][0]["title"], "Only");
        assert!(json["document"].get("preamble").is_none());
    }
}
