//! Domain models shared across the sequence services.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use super::errors::{SeqResult, SequenceError};
use super::item::Item;
use super::sequence::Sequence;

/// Ordered candidates for admission into a [`Sequence`].
///
/// Every mutating sequence operation takes `impl Into<Members>`, so a bare
/// path, an [`Item`], a list of either, or another sequence all flow through
/// the same checked insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Members(Vec<Item>);

impl Members {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.0.iter()
    }

    pub fn into_items(self) -> Vec<Item> {
        self.0
    }
}

impl FromIterator<Item> for Members {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Item> for Members {
    fn from(value: Item) -> Self {
        Self(vec![value])
    }
}

impl From<&Item> for Members {
    fn from(value: &Item) -> Self {
        Self(vec![value.clone()])
    }
}

impl From<&str> for Members {
    fn from(value: &str) -> Self {
        Self(vec![Item::new(value)])
    }
}

impl From<String> for Members {
    fn from(value: String) -> Self {
        Self(vec![Item::new(value)])
    }
}

impl From<&Path> for Members {
    fn from(value: &Path) -> Self {
        Self(vec![Item::from(value)])
    }
}

impl From<PathBuf> for Members {
    fn from(value: PathBuf) -> Self {
        Self(vec![Item::from(value)])
    }
}

impl<T: Into<Item>> From<Vec<T>> for Members {
    fn from(value: Vec<T>) -> Self {
        value.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Item>, const N: usize> From<[T; N]> for Members {
    fn from(value: [T; N]) -> Self {
        value.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Item> + Clone> From<&[T]> for Members {
    fn from(value: &[T]) -> Self {
        value.iter().cloned().map(Into::into).collect()
    }
}

impl From<Sequence> for Members {
    fn from(value: Sequence) -> Self {
        Self(value.into_items())
    }
}

impl From<&Sequence> for Members {
    fn from(value: &Sequence) -> Self {
        Self(value.items().to_vec())
    }
}

/// Accepts a JSON string or an array of strings.
impl TryFrom<Value> for Members {
    type Error = SequenceError;

    fn try_from(value: Value) -> SeqResult<Self> {
        match value {
            Value::String(path) => Ok(Self(vec![Item::new(path)])),
            Value::Array(values) => values
                .into_iter()
                .map(|value| match value {
                    Value::String(path) => Ok(Item::new(path)),
                    other => Err(type_mismatch(&other)),
                })
                .collect::<SeqResult<Vec<_>>>()
                .map(Self),
            other => Err(type_mismatch(&other)),
        }
    }
}

fn type_mismatch(value: &Value) -> SequenceError {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    SequenceError::TypeMismatch {
        expected: "a filename or a list of filenames",
        actual: format!("{kind} {value}"),
    }
}

/// Serializable description of one sequence for machine-readable listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceSummary {
    pub directory: String,
    pub head: String,
    pub tail: String,
    pub padding: String,
    pub start: Option<u64>,
    pub end: Option<u64>,
    pub length: usize,
    pub frames: String,
    pub missing: String,
    pub rendered: String,
}
