use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use errors::{ConfigError, FileError, PortError};

/// One file to work on, together with the source root it was found under
/// so destination mirroring and the generic-rename heuristic can compute
/// its relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePath {
    pub root: PathBuf,
    pub path: PathBuf,
}

impl TemplatePath {
    /// The path relative to its source root; bare file inputs have no
    /// directory part.
    pub fn relative(&self) -> &Path {
        self.path.strip_prefix(&self.root).unwrap_or(&self.path)
    }
}

fn hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

/// Resolve the given paths into the list of files to work on.
///
/// Directories are walked recursively in sorted order without following
/// symlinks; dot-prefixed files and directories are skipped. Paths that are
/// files are taken as given, with their parent directory as the root.
/// Nothing found at all is fatal.
pub fn resolve_template_paths(paths: &[PathBuf]) -> Result<Vec<TemplatePath>, PortError> {
    let mut resolved = vec![];

    for path in paths {
        if path.is_dir() {
            let walk = WalkDir::new(path)
                .sort_by_file_name()
                .follow_links(false)
                .into_iter()
                .filter_entry(|entry| !hidden(entry));

            for entry in walk {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        log::debug!("skipping unreadable entry: {err}");
                        continue;
                    }
                };

                if entry.file_type().is_dir() {
                    continue;
                }

                resolved.push(TemplatePath {
                    root: path.clone(),
                    path: entry.into_path(),
                });
            }
        } else if path.is_file() {
            resolved.push(TemplatePath {
                root: path.parent().unwrap_or(Path::new("")).to_path_buf(),
                path: path.clone(),
            });
        } else {
            log::warn!("{} is not a file or directory", path.display());
        }
    }

    if resolved.is_empty() {
        return Err(ConfigError::NoTemplatesFound.into());
    }

    Ok(resolved)
}

/// Whether a file gets rewritten; anything else is copied through verbatim.
pub fn is_template(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extensions.iter().any(|e| e == extension))
        .unwrap_or(false)
}

/// Guess the new-style name for an old-style generic template.
///
/// Applies only to templates exactly one directory below their source root
/// whose filename starts with a pluralized component:
/// `blog/entries_detail.html` becomes `blog/entry_detail.html`. A best
/// guess; callers keep the original file alongside the copy.
pub fn generic_rename(relative: &Path) -> Option<PathBuf> {
    let mut components = relative.components();
    let directory = components.next()?;
    let file = components.next()?;
    if components.next().is_some() {
        return None;
    }

    let name = file.as_os_str().to_str()?;
    let (first, rest) = name.split_once('_')?;
    let singular = first.strip_suffix('s')?;
    if singular.is_empty() {
        return None;
    }

    Some(Path::new(directory.as_os_str()).join(format!("{singular}_{rest}")))
}

pub fn read_template(path: &Path) -> Result<String, PortError> {
    fs::read_to_string(path).map_err(|err| {
        FileError::Unreadable {
            path: path.display().to_string(),
            message: err.to_string(),
        }
        .into()
    })
}

/// Write a file, creating parent directories as needed.
pub fn write_template(path: &Path, text: &str) -> Result<(), PortError> {
    let unwritable = |err: std::io::Error| {
        PortError::from(FileError::Unwritable {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(unwritable)?;
    }

    fs::write(path, text).map_err(unwritable)
}

/// Copy a non-template file into the destination tree verbatim.
pub fn copy_file(from: &Path, to: &Path) -> Result<(), PortError> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            PortError::from(FileError::Unwritable {
                path: to.display().to_string(),
                message: err.to_string(),
            })
        })?;
    }

    fs::copy(from, to)
        .map(|_| ())
        .map_err(|err| {
            FileError::Unwritable {
                path: to.display().to_string(),
                message: err.to_string(),
            }
            .into()
        })
}
