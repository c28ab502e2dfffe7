//! Filesystem collection of sequence candidates.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, bail};
use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder, WalkState};
use rayon::prelude::*;

use crate::app::group::group;
use crate::domain::item::Item;
use crate::domain::sequence::Sequence;
use crate::infra::config::Config;

const GLOB_CHARS: &[char] = &['*', '?', '[', '{'];

/// What a command-line path names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Children (or descendants) of a directory.
    Directory(PathBuf),
    /// Files under `root` whose relative path matches `pattern`.
    Pattern { root: PathBuf, pattern: String },
    /// A single file.
    File(PathBuf),
}

impl Source {
    pub fn resolve(path: &Path) -> Result<Self> {
        let text = path.to_string_lossy();
        if text.contains(GLOB_CHARS) {
            let (root, pattern) = split_pattern(path);
            if !root.is_dir() {
                bail!("no such directory: {}", root.display());
            }
            return Ok(Source::Pattern { root, pattern });
        }

        let metadata = path
            .metadata()
            .with_context(|| format!("cannot access {}", path.display()))?;
        if metadata.is_dir() {
            Ok(Source::Directory(path.to_path_buf()))
        } else {
            Ok(Source::File(path.to_path_buf()))
        }
    }

    pub fn root(&self) -> &Path {
        match self {
            Source::Directory(root) | Source::File(root) => root,
            Source::Pattern { root, .. } => root,
        }
    }
}

/// Split a glob path into the literal directory prefix and the rest.
fn split_pattern(path: &Path) -> (PathBuf, String) {
    let mut root = PathBuf::new();
    let mut rest: Vec<String> = Vec::new();
    for component in path.components() {
        let part = component.as_os_str().to_string_lossy();
        if rest.is_empty() && !part.contains(GLOB_CHARS) {
            root.push(component);
        } else if !matches!(component, Component::CurDir) {
            rest.push(part.into_owned());
        }
    }
    if root.as_os_str().is_empty() {
        root.push(".");
    }
    (root, rest.join("/"))
}

/// Inputs for a single scan.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub source: Source,
    pub recursive: bool,
    pub show_hidden: bool,
    pub config: Config,
}

impl ScannerConfig {
    pub fn from_source(source: Source, config: Config) -> Self {
        Self {
            source,
            recursive: config.scan.recursive,
            show_hidden: config.scan.show_hidden,
            config,
        }
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = self.recursive || recursive;
        self
    }

    pub fn with_show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = self.show_hidden || show_hidden;
        self
    }
}

/// Files collected for one source, sorted by path.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub root: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Sequences found in one directory.
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    pub directory: PathBuf,
    pub sequences: Vec<Sequence>,
}

/// Walks sources respecting hidden-file and ignore-glob settings.
#[derive(Debug, Default)]
pub struct Scanner;

impl Scanner {
    pub fn new() -> Self {
        Self
    }

    pub fn scan(&self, cfg: &ScannerConfig) -> Result<ScanResult> {
        let root = cfg.source.root().to_path_buf();
        if let Source::File(path) = &cfg.source {
            return Ok(ScanResult {
                root,
                files: vec![path.clone()],
            });
        }

        let ignored = Arc::new(build_ignore_set(&cfg.config)?);
        let pattern = match &cfg.source {
            Source::Pattern { pattern, .. } => Some(
                GlobBuilder::new(pattern)
                    .literal_separator(true)
                    .build()
                    .with_context(|| format!("invalid pattern: {pattern}"))?
                    .compile_matcher(),
            ),
            _ => None,
        };

        let mut builder = WalkBuilder::new(&root);
        builder
            .standard_filters(false)
            .hidden(!cfg.show_hidden)
            .max_depth(walk_depth(cfg));
        builder.filter_entry({
            let ignored = ignored.clone();
            move |entry| entry.depth() == 0 || !ignored.is_match(entry.file_name())
        });

        let files = Mutex::new(Vec::new());
        builder.build_parallel().run(|| {
            let files = &files;
            let root = &root;
            let pattern = pattern.as_ref();
            Box::new(move |result| match result {
                Ok(entry) => {
                    if let Some(path) = accept_entry(&entry, root, pattern)
                        && let Ok(mut guard) = files.lock()
                    {
                        guard.push(path);
                    }
                    WalkState::Continue
                }
                Err(err) => {
                    tracing::warn!(error = %err, "scanner error");
                    WalkState::Continue
                }
            })
        });

        let mut files = files.into_inner().unwrap_or_default();
        files.sort();
        tracing::debug!(root = %root.display(), files = files.len(), "scanned");
        Ok(ScanResult { root, files })
    }
}

fn walk_depth(cfg: &ScannerConfig) -> Option<usize> {
    match &cfg.source {
        _ if cfg.recursive => None,
        Source::Pattern { pattern, .. } if pattern.contains("**") => None,
        Source::Pattern { pattern, .. } => Some(pattern.split('/').count()),
        _ => Some(1),
    }
}

fn accept_entry(entry: &DirEntry, root: &Path, pattern: Option<&GlobMatcher>) -> Option<PathBuf> {
    if entry.depth() == 0 || entry.file_type().is_none_or(|kind| kind.is_dir()) {
        return None;
    }
    let path = entry.path();
    if let Some(pattern) = pattern {
        let relative = path.strip_prefix(root).unwrap_or(path);
        if !pattern.is_match(relative) {
            return None;
        }
    }
    Some(path.to_path_buf())
}

fn build_ignore_set(config: &Config) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for glob in &config.ignore.globs {
        builder.add(Glob::new(glob).with_context(|| format!("invalid ignore glob: {glob}"))?);
    }
    builder.build().context("failed to build ignore matcher")
}

/// Group scanned files per directory. Directories come out in path order;
/// each one is grouped independently.
pub fn collect_sequences(files: Vec<PathBuf>) -> Result<Vec<DirectoryListing>> {
    let mut by_directory: BTreeMap<PathBuf, Vec<Item>> = BTreeMap::new();
    for file in files {
        let directory = file.parent().map(Path::to_path_buf).unwrap_or_default();
        by_directory.entry(directory).or_default().push(Item::from(file));
    }

    by_directory
        .into_par_iter()
        .map(|(directory, items)| -> Result<DirectoryListing> {
            let sequences = group(items)
                .with_context(|| format!("failed to group {}", directory.display()))?;
            Ok(DirectoryListing {
                directory,
                sequences,
            })
        })
        .collect()
}
