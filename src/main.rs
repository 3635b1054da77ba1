//! # mdsection
//!
//! Extract heading sections from lightweight markdown by path queries.
//!
//! ## Usage
//!
//! Print the "Install" section under the "Guide" heading:
//! ```sh
//! mdsection -p Guide -p Install README.md
//! ```
//!
//! Collect every "Usage" section from a directory of notes:
//! ```sh
//! mdsection -p '.*' -p Usage notes/
//! ```
//!
//! Dump the heading tree:
//! ```sh
//! mdsection --tree README.md
//! ```

mod cli;

use clap::Parser as ClapParser;
use cli::{Cli, OutputFormat};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use mdsection::input::{self, SourceDocument};
use mdsection::query::{self, DocumentResult, Query};
use mdsection::{Config, HTree, parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `MDSECTION_LOG=debug`
const LOG_ENV: &str = "MDSECTION_LOG";

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let args = Cli::parse();
    let config = Config::load();

    let mut pattern_options = config.pattern_options();
    if args.fixed_strings {
        pattern_options.fixed_strings = true;
    }
    let format = args.output_format(&config.output.format);
    let query = Query::under_root(&args.path, &pattern_options)?;

    let documents = input::collect_documents(&args.paths, &config.input.extensions)?;
    info!(documents = documents.len(), ?format, "processing input");

    let trees = documents
        .iter()
        .map(|doc| parse_document(doc).map(|tree| (doc, tree)))
        .collect::<Result<Vec<_>>>()?;

    match format {
        OutputFormat::Report => print_report(&trees, &query)?,
        OutputFormat::Tree => print_trees(&trees),
        OutputFormat::Json => print_json(&trees)?,
    }
    Ok(())
}

fn init_tracing() {
    // Logs go to stderr so query output stays pipeable
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_document(doc: &SourceDocument) -> Result<HTree> {
    parser::parse_markdown(&doc.content).wrap_err_with(|| format!("failed to parse {}", doc.name))
}

fn print_report(trees: &[(&SourceDocument, HTree)], query: &Query) -> Result<()> {
    let results = trees
        .iter()
        .map(|(_, tree)| DocumentResult::from_tree(tree, query));
    let report = query::render_report(results);
    query::report::write_report(&mut std::io::stdout().lock(), &report)?;
    Ok(())
}

fn print_trees(trees: &[(&SourceDocument, HTree)]) {
    for (doc, tree) in trees {
        println!("{:?}", doc.name);
        print!("{}", tree);
    }
}

fn print_json(trees: &[(&SourceDocument, HTree)]) -> Result<()> {
    let outputs: Vec<_> = trees
        .iter()
        .map(|(doc, tree)| parser::build_json_output(tree, Some(&doc.name)))
        .collect();
    let json = match outputs.as_slice() {
        [single] => serde_json::to_string_pretty(single)?,
        _ => serde_json::to_string_pretty(&outputs)?,
    };
    println!("{}", json);
    Ok(())
}
