//! A single filename split into literal and numeric components.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) static DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"));

/// One path, parsed once at construction.
///
/// `digits` holds the maximal digit runs of the file name and `parts` the
/// literal fragments around them, so the two interleave back into `name`
/// (`parts` always has one more entry than `digits`).
#[derive(Debug, Clone)]
pub struct Item {
    path: String,
    name: String,
    dirname: String,
    digits: Vec<String>,
    parts: Vec<String>,
}

impl Item {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let (dirname, name) = split_path(&path);

        let mut digits = Vec::new();
        let mut parts = Vec::new();
        let mut cursor = 0;
        for found in DIGITS.find_iter(name) {
            parts.push(name[cursor..found.start()].to_owned());
            digits.push(found.as_str().to_owned());
            cursor = found.end();
        }
        parts.push(name[cursor..].to_owned());

        Self {
            name: name.to_owned(),
            dirname: dirname.to_owned(),
            path,
            digits,
            parts,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dirname(&self) -> &str {
        &self.dirname
    }

    pub fn digits(&self) -> &[String] {
        &self.digits
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// True when both items live in the same directory and share every literal
    /// fragment, so that only digit runs may differ.
    pub fn is_sibling(&self, other: &Item) -> bool {
        self.dirname == other.dirname && self.parts == other.parts
    }

    /// The digit run at `field`, if the name has that many runs.
    pub fn frame_text(&self, field: usize) -> Option<&str> {
        self.digits.get(field).map(String::as_str)
    }

    /// Name text before the digit run at `field`.
    pub(crate) fn head_at(&self, field: usize) -> String {
        let mut head = String::new();
        for index in 0..=field.min(self.digits.len()) {
            head.push_str(&self.parts[index]);
            if index < field && index < self.digits.len() {
                head.push_str(&self.digits[index]);
            }
        }
        head
    }

    /// Name text after the digit run at `field`.
    pub(crate) fn tail_at(&self, field: usize) -> String {
        let mut tail = String::new();
        for index in field + 1..self.parts.len() {
            tail.push_str(&self.parts[index]);
            if let Some(digits) = self.digits.get(index) {
                tail.push_str(digits);
            }
        }
        tail
    }
}

fn split_path(path: &str) -> (&str, &str) {
    match path.rfind(std::path::is_separator) {
        Some(0) => (&path[..1], &path[1..]),
        Some(index) => {
            let separator_len = path[index..].chars().next().map_or(1, char::len_utf8);
            (&path[..index], &path[index + separator_len..])
        }
        None => ("", path),
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.path.cmp(&other.path)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Item {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&String> for Item {
    fn from(value: &String) -> Self {
        Self::new(value.as_str())
    }
}

impl From<&Item> for Item {
    fn from(value: &Item) -> Self {
        value.clone()
    }
}

impl From<&Path> for Item {
    fn from(value: &Path) -> Self {
        Self::new(value.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for Item {
    fn from(value: PathBuf) -> Self {
        Self::from(value.as_path())
    }
}
