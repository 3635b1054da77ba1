//! Query evaluator.
//!
//! Walks a heading tree along a [`Query`] and serializes the matched sections.

use indextree::NodeId;
use tracing::debug;

use super::step::{Query, QueryStep};
use crate::parser::HTree;

/// Find every node matched by the full step sequence, in document order.
pub fn find_sections(tree: &HTree, query: &Query) -> Vec<NodeId> {
    let mut found = Vec::new();
    if !query.is_empty() {
        collect_matches(tree, tree.root(), query.steps(), &mut found);
    }
    debug!(steps = query.steps().len(), matched = found.len(), "evaluated query");
    found
}

fn collect_matches(tree: &HTree, id: NodeId, steps: &[QueryStep], found: &mut Vec<NodeId>) {
    let Some((step, rest)) = steps.split_first() else {
        return;
    };
    if !step.matches(tree.section(id)) {
        return;
    }
    if rest.is_empty() {
        found.push(id);
        return;
    }
    for child in tree.children(id) {
        collect_matches(tree, child, rest, found);
    }
}

/// Serialize a node and its whole subtree.
///
/// A heading contributes `"<marker> <title>"` and its body, each followed by a
/// blank line; children follow in document order.
pub fn section_text(tree: &HTree, id: NodeId) -> String {
    let section = tree.section(id);
    let mut out = String::new();

    if let Some(heading) = section.heading() {
        out.push_str(heading.text());
        out.push(' ');
        out.push_str(&section.heading_line());
        out.push_str("\n\n");
    }

    let body = section.body_text();
    let body = body.trim_start_matches('\n').trim_end();
    if !body.is_empty() {
        out.push_str(body);
        out.push_str("\n\n");
    }

    for child in tree.children(id) {
        out.push_str(&section_text(tree, child));
    }
    out
}

/// Run `query` against `tree` and concatenate the matched sections.
///
/// No steps, or no match anywhere, yields an empty string.
pub fn execute(tree: &HTree, query: &Query) -> String {
    find_sections(tree, query)
        .into_iter()
        .map(|id| section_text(tree, id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Token, TokenKind, parse_markdown};
    use crate::query::{Pattern, PatternOptions};
    use indoc::indoc;

    fn query(patterns: &[&str]) -> Query {
        Query::under_root(patterns.iter().copied(), &PatternOptions::default()).unwrap()
    }

    fn eval(md: &str, patterns: &[&str]) -> String {
        execute(&parse_markdown(md).unwrap(), &query(patterns))
    }

    #[test]
    fn test_select_includes_children() {
        let out = eval("# A\n## B\n# C\n", &["A"]);
        assert_eq!(out, "# A\n\n## B\n\n");
    }

    #[test]
    fn test_explicit_root_step() {
        let tree = parse_markdown("# A\n## B\n# C\n").unwrap();
        let options = PatternOptions::default();
        let steps = vec![
            QueryStep::new(Pattern::parse("*", &options).unwrap()),
            QueryStep::new(Pattern::parse("A", &options).unwrap()),
        ];
        let out = execute(&tree, &Query::new(steps));
        assert!(out.contains("# A"));
        assert!(out.contains("## B"));
        assert!(!out.contains("C"));
    }

    #[test]
    fn test_anchored_pattern_matches_first_title_word() {
        let md = "# Project Guide\nbody\n";
        assert_eq!(eval(md, &["^Project$"]), "# Project Guide\n\nbody\n\n");
        assert_eq!(eval(md, &["Guide"]), "");
    }

    #[test]
    fn test_nested_path() {
        let md = indoc! {"
            # Guide
            intro

            ## Install
            run the installer

            ### Linux
            apt install

            ### macOS
            brew install

            ## Usage
            call it
        "};
        assert_eq!(eval(md, &["Guide", "Install", "mac"]), "### macOS\n\nbrew install\n\n");
        let both = eval(md, &["Guide", "Install", ".*"]);
        assert!(both.starts_with("### Linux\n\napt install\n\n### macOS"));
        assert_eq!(eval(md, &["Guide", "Usage"]), "## Usage\n\ncall it\n\n");
    }

    #[test]
    fn test_wildcard_fans_out() {
        let md = "# One\n## Notes\nfirst\n# Two\n## Notes\nsecond\n## Other\n";
        assert_eq!(
            eval(md, &[".*", "Notes"]),
            "## Notes\n\nfirst\n\n## Notes\n\nsecond\n\n"
        );
    }

    #[test]
    fn test_depth_follows_tree_not_level() {
        // a level-2 heading at the top sits at depth 1
        assert_eq!(eval("## Sub\nx\n", &["Sub"]), "## Sub\n\nx\n\n");
        assert_eq!(eval("## Sub\nx\n", &["*", "Sub"]), "");
    }

    #[test]
    fn test_no_match_is_empty() {
        assert_eq!(eval("# A\n## B\n", &["Missing"]), "");
        assert_eq!(eval("# A\n", &["A", "B"]), "");
        assert_eq!(eval("", &["A"]), "");
    }

    #[test]
    fn test_zero_steps_is_empty() {
        let tree = parse_markdown("# A\n").unwrap();
        assert_eq!(execute(&tree, &Query::default()), "");
        assert!(find_sections(&tree, &Query::default()).is_empty());
    }

    #[test]
    fn test_root_only_query_returns_document() {
        let out = eval("preface\n# A\nbody\n", &[]);
        assert_eq!(out, "preface\n\n# A\n\nbody\n\n");
    }

    #[test]
    fn test_subtree_content_preserved_in_order() {
        let md = indoc! {"
            # Alpha
            one _two_ three
            ## Beta
            four **five**
            ### Gamma
            six
            ## Delta
            seven
            # Epsilon
            eight
        "};
        let tree = parse_markdown(md).unwrap();
        let options = PatternOptions {
            fixed_strings: true,
            ..PatternOptions::default()
        };

        for id in tree.headings() {
            let path = title_path(&tree, id);
            let query = Query::under_root(&path, &options).unwrap();
            let out = execute(&tree, &query);

            let mut expected = Vec::new();
            for node in tree.nodes().filter(|n| is_within(&tree, *n, id)) {
                let section = tree.section(node);
                expected.extend(
                    section
                        .title_tokens()
                        .iter()
                        .chain(section.body())
                        .filter(|t| !matches!(t.kind(), TokenKind::Empty | TokenKind::Newline))
                        .map(Token::text)
                        .filter(|t| !t.is_empty()),
                );
            }

            let mut cursor = 0;
            for text in expected {
                let pos = out[cursor..]
                    .find(text)
                    .unwrap_or_else(|| panic!("{text:?} missing from {out:?}"));
                cursor += pos + text.len();
            }
        }
    }

    fn is_within(tree: &HTree, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = tree.parent(id);
        }
        false
    }

    /// Titles from the top-level heading down to `id`.
    fn title_path(tree: &HTree, id: NodeId) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            let section = tree.section(node);
            if !section.is_root() {
                path.push(section.title().to_string());
            }
            current = tree.parent(node);
        }
        path.reverse();
        path
    }
}
