//! Input handling for files, directories and stdin.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Path argument that stands for standard input.
pub const STDIN_PATH: &str = "-";

#[derive(Debug, Error)]
pub enum InputError {
    /// No paths were given and stdin is an interactive terminal
    #[error("no input: give a file or directory, or pipe markdown on stdin")]
    NoTty,
    #[error("cannot read stdin: {0}")]
    Stdin(#[source] io::Error),
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One document's name and full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// File path as given, or `<stdin>`
    pub name: String,
    pub content: String,
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Path of a directory entry; unreadable entries are logged and skipped.
fn entry_path(dir: &Path, entry: io::Result<fs::DirEntry>) -> Option<PathBuf> {
    match entry {
        Ok(entry) => Some(entry.path()),
        Err(err) => {
            warn!(dir = %dir.display(), error = %err, "skipping unreadable directory entry");
            None
        }
    }
}

/// Replace each directory with its matching files, sorted by path.
///
/// Directories are not descended into recursively. Files and `-` are kept as
/// given.
pub fn expand_paths(paths: &[PathBuf], extensions: &[String]) -> Result<Vec<PathBuf>, InputError> {
    let mut expanded = Vec::with_capacity(paths.len());
    for path in paths {
        if is_stdin(path) || !path.is_dir() {
            expanded.push(path.clone());
            continue;
        }

        let entries = fs::read_dir(path).map_err(|source| InputError::Io {
            path: path.clone(),
            source,
        })?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry_path(path, entry))
            .filter(|p| p.is_file())
            .filter(|p| {
                let keep = has_extension(p, extensions);
                if !keep {
                    debug!(path = %p.display(), "skipping non-markdown file");
                }
                keep
            })
            .collect();
        files.sort();
        if files.is_empty() {
            warn!(dir = %path.display(), "no markdown files in directory");
        }
        expanded.extend(files);
    }
    Ok(expanded)
}

fn read_stdin() -> Result<String, InputError> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(InputError::NoTty);
    }
    let mut content = String::new();
    stdin.read_to_string(&mut content).map_err(InputError::Stdin)?;
    Ok(content)
}

/// Read every document named by `paths`.
///
/// With no paths, stdin is read. A `-` path reads stdin once; later `-` paths
/// are ignored.
pub fn collect_documents(
    paths: &[PathBuf],
    extensions: &[String],
) -> Result<Vec<SourceDocument>, InputError> {
    if paths.is_empty() {
        return Ok(vec![SourceDocument {
            name: "<stdin>".to_string(),
            content: read_stdin()?,
        }]);
    }

    let mut documents = Vec::new();
    let mut have_read_stdin = false;
    for path in expand_paths(paths, extensions)? {
        if is_stdin(&path) {
            if !have_read_stdin {
                documents.push(SourceDocument {
                    name: "<stdin>".to_string(),
                    content: read_stdin()?,
                });
                have_read_stdin = true;
            }
            continue;
        }
        let content = fs::read_to_string(&path).map_err(|source| InputError::Io {
            path: path.clone(),
            source,
        })?;
        documents.push(SourceDocument {
            name: path.display().to_string(),
            content,
        });
    }
    debug!(documents = documents.len(), "collected input documents");
    Ok(documents)
}
