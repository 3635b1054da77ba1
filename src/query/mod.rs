//! Path queries over heading trees.
//!
//! A query is a sequence of title patterns, one per tree depth: the first
//! step matches the root, the second a top-level heading, and so on. Every
//! node matched by the last step is serialized together with its subtree.
//!
//! ## Example
//!
//! ```
//! use mdsection::query::{self, PatternOptions, Query};
//!
//! let tree = mdsection::parse_markdown("# A\n## B\nbody\n# C\n").unwrap();
//! let query = Query::under_root(["A", "B"], &PatternOptions::default()).unwrap();
//! assert_eq!(query::execute(&tree, &query), "## B\n\nbody\n\n");
//! ```

mod eval;
pub mod report;
mod step;

pub use eval::{execute, find_sections, section_text};
pub use report::{DocumentResult, render_report};
pub use step::{Pattern, PatternOptions, Query, QueryError, QueryStep};
