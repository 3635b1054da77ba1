//! Heading hierarchy built from a normalized token stream.
//!
//! Nodes live in an [`indextree::Arena`]; parent links are arena indices, so
//! ownership stays acyclic and dropping the tree is a single deallocation.

use super::token::{Token, TokenKind};
use indextree::{Arena, NodeId};
use std::fmt;
use tracing::debug;

/// One node of the hierarchy: a heading and the tokens collected under it.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    heading: Option<Token>,
    contents: Vec<Token>,
}

impl Section {
    fn root() -> Self {
        Self {
            heading: None,
            contents: Vec::new(),
        }
    }

    fn with_heading(heading: Token) -> Self {
        Self {
            heading: Some(heading),
            contents: Vec::new(),
        }
    }

    /// The heading marker token, or `None` for the synthetic root.
    pub fn heading(&self) -> Option<&Token> {
        self.heading.as_ref()
    }

    /// Heading level; the root is level 0.
    pub fn level(&self) -> u32 {
        self.heading
            .as_ref()
            .and_then(|h| h.kind().heading_level())
            .unwrap_or(0)
    }

    pub fn is_root(&self) -> bool {
        self.heading.is_none()
    }

    /// Every non-heading token collected while this node was active.
    pub fn contents(&self) -> &[Token] {
        &self.contents
    }

    /// The space that confirmed the heading marker (`contents[0]`).
    pub fn separator(&self) -> Option<&Token> {
        self.heading.as_ref()?;
        self.contents
            .first()
            .filter(|t| t.kind() == TokenKind::Empty)
    }

    /// The token right after the separator (`contents[1]`).
    pub fn title_token(&self) -> Option<&Token> {
        self.title_tokens().first()
    }

    fn title_start(&self) -> usize {
        usize::from(self.separator().is_some())
    }

    fn title_end(&self) -> usize {
        if self.is_root() {
            return 0;
        }
        let start = self.title_start();
        self.contents[start..]
            .iter()
            .position(|t| matches!(t.kind(), TokenKind::Newline | TokenKind::EndOfFile))
            .map(|pos| start + pos)
            .unwrap_or(self.contents.len())
    }

    /// Tokens of the heading line after the separator.
    pub fn title_tokens(&self) -> &[Token] {
        if self.is_root() {
            return &[];
        }
        &self.contents[self.title_start()..self.title_end()]
    }

    /// Text of the title token. Empty for the root and for bare markers.
    pub fn title(&self) -> &str {
        self.title_token().map(Token::text).unwrap_or_default()
    }

    /// Whole heading line after the separator, trimmed.
    pub fn heading_line(&self) -> String {
        let line: String = self.title_tokens().iter().map(Token::text).collect();
        line.trim().to_string()
    }

    /// Tokens after the heading line. For the root, all of its contents.
    pub fn body(&self) -> &[Token] {
        &self.contents[self.title_end()..]
    }

    /// Concatenated text of [`Section::body`].
    pub fn body_text(&self) -> String {
        self.body().iter().map(Token::text).collect()
    }
}

/// A rooted heading tree for one document.
#[derive(Debug, Clone)]
pub struct HTree {
    arena: Arena<Section>,
    root: NodeId,
}

impl HTree {
    /// Build the hierarchy from a normalized token stream.
    ///
    /// Structural headings (levels 1 to 5) attach under the nearest open
    /// heading of a strictly lower level, or the root. Everything else is
    /// appended to whichever node is currently active.
    pub fn build(tokens: impl IntoIterator<Item = Token>) -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(Section::root());
        let mut active = root;

        for token in tokens {
            let kind = token.kind();
            if !kind.is_structural_heading() {
                arena[active].get_mut().contents.push(token);
                continue;
            }

            let level = kind.heading_level().unwrap_or(0);
            let mut parent = active;
            while arena[parent].get().level() >= level {
                match arena[parent].parent() {
                    Some(up) => parent = up,
                    None => break,
                }
            }

            let node = arena.new_node(Section::with_heading(token));
            parent.append(node, &mut arena);
            active = node;
        }

        let tree = Self { arena, root };
        debug!(headings = tree.len(), depth = tree.max_depth(), "built heading tree");
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn section(&self, id: NodeId) -> &Section {
        self.arena[id].get()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].parent()
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    /// Distance from the root; the root itself is depth 0.
    pub fn depth(&self, id: NodeId) -> usize {
        id.ancestors(&self.arena).count() - 1
    }

    /// All nodes in document order, starting with the root.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.root.descendants(&self.arena)
    }

    /// All heading nodes in document order (the root excluded).
    pub fn headings(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes().skip(1)
    }

    /// Number of heading nodes.
    pub fn len(&self) -> usize {
        self.headings().count()
    }

    pub fn is_empty(&self) -> bool {
        self.arena[self.root].first_child().is_none()
    }

    pub fn max_depth(&self) -> usize {
        self.headings().map(|id| self.depth(id)).max().unwrap_or(0)
    }

    /// Title of the first top-level heading, or an empty string.
    pub fn first_title(&self) -> String {
        self.children(self.root)
            .next()
            .map(|id| self.section(id).title().to_string())
            .unwrap_or_default()
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let section = self.section(id);
        let kind = TokenKind::Heading(section.level());
        writeln!(f, "{}{} {}", "#".repeat(depth), kind, section.title())?;
        for token in section.body() {
            if token.kind() == TokenKind::EndOfFile {
                continue;
            }
            writeln!(f, "{}=>{}", "-".repeat(depth), token.text().escape_debug())?;
        }
        for child in self.children(id) {
            self.write_outline(f, child, depth + 1)?;
        }
        Ok(())
    }
}

/// Outline dump: one `H<level> <title>` line per node, indented with `#`,
/// followed by its body tokens as `=>` lines.
impl fmt::Display for HTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, self.root, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenize;

    fn tree(input: &str) -> HTree {
        HTree::build(tokenize(input).unwrap())
    }

    fn titles(tree: &HTree, id: NodeId) -> Vec<String> {
        tree.children(id)
            .map(|c| tree.section(c).title().to_string())
            .collect()
    }

    #[test]
    fn test_single_heading_with_body() {
        let tree = tree("# Title\nbody text\n");
        let top: Vec<_> = tree.children(tree.root()).collect();
        assert_eq!(top.len(), 1);

        let h1 = tree.section(top[0]);
        assert_eq!(h1.level(), 1);
        assert_eq!(h1.separator().map(Token::kind), Some(TokenKind::Empty));
        assert_eq!(h1.title_token().map(Token::text), Some("Title"));
        let texts: Vec<_> = h1.contents().iter().map(Token::text).collect();
        assert_eq!(texts, vec![" ", "Title", "\n", "body", " ", "text", "\n", ""]);
        assert_eq!(tree.children(top[0]).count(), 0);
        assert!(tree.section(tree.root()).contents().is_empty());
    }

    #[test]
    fn test_level_two_at_document_start_attaches_to_root() {
        let tree = tree("## Sub\n");
        let top: Vec<_> = tree.children(tree.root()).collect();
        assert_eq!(top.len(), 1);
        assert_eq!(tree.section(top[0]).level(), 2);
        assert_eq!(tree.depth(top[0]), 1);
    }

    #[test]
    fn test_shallower_heading_closes_subtree() {
        let tree = tree("# A\n## B\n# C\n");
        assert_eq!(titles(&tree, tree.root()), vec!["A", "C"]);

        let a = tree.children(tree.root()).next().unwrap();
        assert_eq!(titles(&tree, a), vec!["B"]);
        let c = tree.children(tree.root()).nth(1).unwrap();
        assert_eq!(tree.children(c).count(), 0);
    }

    #[test]
    fn test_skipped_level_nests_under_nearest_lower() {
        let tree = tree("# A\n### C\n## B\n### D\n");
        let a = tree.children(tree.root()).next().unwrap();
        assert_eq!(titles(&tree, a), vec!["C", "B"]);
        let b = tree.children(a).nth(1).unwrap();
        assert_eq!(titles(&tree, b), vec!["D"]);
    }

    #[test]
    fn test_equal_level_becomes_sibling() {
        let tree = tree("## X\n## Y\n### Z\n## W\n");
        assert_eq!(titles(&tree, tree.root()), vec!["X", "Y", "W"]);
    }

    #[test]
    fn test_hierarchy_invariant() {
        let tree = tree("### a\n# b\n##### c\n## d\n#### e\n# f\n### g\n## h\n");
        for id in tree.headings() {
            let section = tree.section(id);
            assert!((1..=5).contains(&section.level()));
            let parent = tree.parent(id).unwrap();
            assert!(tree.section(parent).level() < section.level());
        }
        assert_eq!(tree.len(), 8);
    }

    #[test]
    fn test_deep_heading_is_content() {
        let tree = tree("# A\n###### Six\n");
        let a = tree.children(tree.root()).next().unwrap();
        assert_eq!(tree.children(a).count(), 0);
        let kinds: Vec<_> = tree.section(a).contents().iter().map(Token::kind).collect();
        assert!(kinds.contains(&TokenKind::Heading(6)));
    }

    #[test]
    fn test_preamble_goes_to_root() {
        let tree = tree("#notaheading\n");
        assert!(tree.is_empty());
        let root = tree.section(tree.root());
        assert_eq!(root.body_text(), "#notaheading\n");
        assert_eq!(root.title(), "");
        assert_eq!(tree.first_title(), "");
    }

    #[test]
    fn test_multi_word_title() {
        let tree = tree("## Getting started  \ntext\n");
        let id = tree.headings().next().unwrap();
        let section = tree.section(id);
        assert_eq!(section.title(), "Getting");
        assert_eq!(section.title_token().map(Token::text), Some("Getting"));
        assert_eq!(section.heading_line(), "Getting started");
        assert_eq!(section.body_text(), "\ntext\n");
    }

    #[test]
    fn test_mid_line_marker_opens_section() {
        let tree = tree("a #b\nmore\n");
        let id = tree.headings().next().unwrap();
        let section = tree.section(id);
        assert_eq!(tree.len(), 1);
        assert_eq!(section.level(), 1);
        assert_eq!(section.separator(), None);
        assert_eq!(section.title(), "b");
        assert_eq!(tree.section(tree.root()).body_text(), "a ");
    }

    #[test]
    fn test_first_title_is_title_token() {
        let tree = tree("# Project Guide\nbody\n");
        assert_eq!(tree.first_title(), "Project");
    }

    #[test]
    fn test_outline_dump() {
        let tree = tree("# A\nx\n## B\n");
        let dump = tree.to_string();
        let lines: Vec<_> = dump.lines().collect();
        assert_eq!(lines[0], "H0 ");
        assert_eq!(lines[1], "#H1 A");
        assert_eq!(lines[2], "-=>\\n");
        assert_eq!(lines[3], "-=>x");
        assert_eq!(lines[4], "-=>\\n");
        assert_eq!(lines[5], "##H2 B");
    }
}
