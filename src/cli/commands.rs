use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mdsection")]
#[command(version)]
#[command(about = "Extract heading sections from markdown by path queries")]
#[command(
    long_about = "mdsection - Pull sections out of markdown documents by heading path.\n\n\
    Each --path pattern matches one heading level, starting at the top-level\n\
    headings. The matched section is printed with all of its subsections.\n\n\
    Examples:\n  \
    mdsection -p Guide -p Install README.md   # Guide > Install\n  \
    mdsection -p '.*' -p '^Usage' docs/       # every top-level section's Usage\n  \
    mdsection --tree notes.md                 # dump the heading tree\n  \
    cat doc.md | mdsection -o json            # nested JSON structure"
)]
pub struct Cli {
    /// Markdown files or directories, or '-' for stdin
    ///
    /// Directories contribute their files with a configured extension
    /// (md and markdown by default), sorted by name, without recursing.
    /// If no path is given, input is read from stdin.
    pub paths: Vec<PathBuf>,

    /// Heading pattern for the next level down (repeatable)
    ///
    /// The first --path matches top-level headings, the second their children,
    /// and so on. Patterns are regular expressions searched anywhere in the
    /// heading text; '.*' or '*' match any heading.
    ///
    /// Example: -p Guide -p "^Install"
    #[arg(short = 'p', long = "path", value_name = "PATTERN")]
    pub path: Vec<String>,

    /// Treat patterns as literal text instead of regular expressions
    #[arg(short = 'F', long = "fixed-strings")]
    pub fixed_strings: bool,

    /// Output format
    ///
    ///   report - Matched sections framed per document (default)
    ///   tree   - Heading tree dump
    ///   json   - Nested JSON structure
    #[arg(short = 'o', long = "output", value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Show the heading tree (same as --output tree)
    #[arg(long = "tree", conflicts_with = "output")]
    pub tree: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Report,
    Tree,
    Json,
}

impl OutputFormat {
    /// Parse a config-file format name, ignoring case
    pub fn from_config(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

impl Cli {
    /// Resolve the output format: --tree, then --output, then the config value
    pub fn output_format(&self, configured: &str) -> OutputFormat {
        if self.tree {
            return OutputFormat::Tree;
        }
        self.output
            .or_else(|| OutputFormat::from_config(configured))
            .unwrap_or(OutputFormat::Report)
    }
}
