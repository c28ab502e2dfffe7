//! Ordered members sharing one literal structure and a single varying frame
//! field.

use std::collections::HashSet;
use std::ops::{Index, Range};
use std::path::{MAIN_SEPARATOR, Path};

use super::diff::numeric_sibling_run;
use super::errors::{SeqResult, SequenceError};
use super::frames::{FrameSet, padding_placeholder};
use super::item::Item;
use super::model::Members;

/// A numbered file sequence.
///
/// `field` indexes the digit run that varies across members. It is fixed by
/// the first admitted sibling and cleared only when the sequence empties; a
/// lone file has no field and renders its whole name as the head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    items: Vec<Item>,
    paths: HashSet<String>,
    field: Option<usize>,
}

enum Admission {
    Accept(Option<usize>),
    Duplicate,
    Reject,
}

impl Sequence {
    /// Build a sequence from candidates. The first candidate seeds it; later
    /// candidates that do not belong are skipped.
    pub fn new(members: impl Into<Members>) -> SeqResult<Self> {
        let mut candidates = members.into().into_items().into_iter();
        let first = candidates.next().ok_or(SequenceError::EmptyInput)?;
        let mut sequence = Self::seed(first);
        for item in candidates {
            if let Err(item) = sequence.try_push(item) {
                tracing::debug!(path = %item, "skipping non-member");
            }
        }
        Ok(sequence)
    }

    pub(crate) fn seed(item: Item) -> Self {
        let mut paths = HashSet::new();
        paths.insert(item.path().to_owned());
        Self {
            items: vec![item],
            paths,
            field: None,
        }
    }

    /// Append `item` if it belongs, handing it back otherwise.
    pub(crate) fn try_push(&mut self, item: Item) -> Result<(), Item> {
        match self.admission(&item, None) {
            Admission::Accept(field) => {
                self.field = field;
                self.paths.insert(item.path().to_owned());
                self.items.push(item);
                Ok(())
            }
            Admission::Duplicate => Ok(()),
            Admission::Reject => Err(item),
        }
    }

    pub(crate) fn set_field(&mut self, field: usize) {
        self.field = Some(field);
    }

    fn admission(&self, item: &Item, replacing: Option<usize>) -> Admission {
        if self.paths.contains(item.path()) {
            return Admission::Duplicate;
        }

        let reference = self
            .items
            .iter()
            .enumerate()
            .rev()
            .find(|(index, _)| Some(*index) != replacing)
            .map(|(_, member)| member);
        let Some(reference) = reference else {
            return Admission::Accept(None);
        };

        if !reference.is_sibling(item) {
            return Admission::Reject;
        }
        if numeric_sibling_run(reference.name(), item.name()).is_none() {
            return Admission::Reject;
        }

        let Some(field) = reference
            .digits()
            .iter()
            .zip(item.digits())
            .position(|(a, b)| a != b)
        else {
            return Admission::Reject;
        };

        match self.field {
            Some(known) if known != field => Admission::Reject,
            _ => Admission::Accept(Some(field)),
        }
    }

    fn admit_one(&mut self, index: usize, item: Item) -> SeqResult<bool> {
        match self.admission(&item, None) {
            Admission::Accept(field) => {
                self.field = field;
                self.paths.insert(item.path().to_owned());
                self.items.insert(index, item);
                Ok(true)
            }
            Admission::Duplicate => Ok(false),
            Admission::Reject => Err(SequenceError::StructuralMismatch {
                item: item.path().to_owned(),
            }),
        }
    }

    /// Insert every candidate at `index`, in order. Either all candidates are
    /// admitted or the sequence is left untouched.
    fn admit(&mut self, index: usize, members: Members) -> SeqResult<()> {
        let mut items = members.into_items();
        if items.len() == 1 {
            if let Some(item) = items.pop() {
                self.admit_one(index, item)?;
            }
            return Ok(());
        }

        let mut staged = self.clone();
        let mut at = index;
        for item in items {
            if staged.admit_one(at, item)? {
                at += 1;
            }
        }
        *self = staged;
        Ok(())
    }

    pub fn append(&mut self, members: impl Into<Members>) -> SeqResult<()> {
        self.admit(self.items.len(), members.into())
    }

    pub fn extend(&mut self, members: impl Into<Members>) -> SeqResult<()> {
        self.append(members)
    }

    pub fn insert(&mut self, index: usize, members: impl Into<Members>) -> SeqResult<()> {
        if index > self.items.len() {
            return Err(self.out_of_range(index));
        }
        self.admit(index, members.into())
    }

    /// Replace the member at `index`.
    pub fn set(&mut self, index: usize, item: impl Into<Item>) -> SeqResult<()> {
        let item = item.into();
        if index >= self.items.len() {
            return Err(self.out_of_range(index));
        }
        if self.items[index] == item {
            return Ok(());
        }

        match self.admission(&item, Some(index)) {
            Admission::Accept(field) => {
                self.field = field;
                self.paths.remove(self.items[index].path());
                self.paths.insert(item.path().to_owned());
                self.items[index] = item;
                Ok(())
            }
            Admission::Duplicate => Err(SequenceError::DuplicateMember {
                item: item.path().to_owned(),
            }),
            Admission::Reject => Err(SequenceError::StructuralMismatch {
                item: item.path().to_owned(),
            }),
        }
    }

    /// Replace the members in `range` with `members`. Bounds are clamped to
    /// the sequence like slice assignment.
    pub fn splice(&mut self, range: Range<usize>, members: impl Into<Members>) -> SeqResult<()> {
        let start = range.start.min(self.items.len());
        let end = range.end.clamp(start, self.items.len());

        let mut staged = self.clone();
        staged.drain(start..end);
        let mut at = start;
        for item in members.into().into_items() {
            if staged.admit_one(at, item)? {
                at += 1;
            }
        }
        *self = staged;
        Ok(())
    }

    /// A new sequence holding this one's members followed by `members`.
    pub fn concat(&self, members: impl Into<Members>) -> SeqResult<Sequence> {
        let mut joined = self.clone();
        joined.extend(members)?;
        Ok(joined)
    }

    /// Remove and return the member at `index`.
    pub fn remove(&mut self, index: usize) -> SeqResult<Item> {
        if index >= self.items.len() {
            return Err(self.out_of_range(index));
        }
        let item = self.items.remove(index);
        self.paths.remove(item.path());
        if self.items.is_empty() {
            self.field = None;
        }
        Ok(item)
    }

    fn drain(&mut self, range: Range<usize>) {
        for item in self.items.drain(range) {
            self.paths.remove(item.path());
        }
        if self.items.is_empty() {
            self.field = None;
        }
    }

    fn out_of_range(&self, index: usize) -> SequenceError {
        SequenceError::IndexOutOfRange {
            index,
            len: self.items.len(),
        }
    }

    /// `item` could join this sequence, whether or not its frame lies inside
    /// the current range.
    pub fn includes(&self, item: impl Into<Item>) -> bool {
        !matches!(self.admission(&item.into(), None), Admission::Reject)
    }

    /// `item` could join this sequence and its frame lies between the start
    /// and end frames.
    pub fn contains(&self, item: impl Into<Item>) -> bool {
        let item = item.into();
        if self.has(&item) {
            return true;
        }
        let Admission::Accept(Some(field)) = self.admission(&item, None) else {
            return false;
        };
        let Some(frame) = item.frame_text(field).and_then(|text| text.parse::<u64>().ok()) else {
            return false;
        };
        let frames = FrameSet::collect(&self.items, field);
        matches!(
            (frames.start(), frames.end()),
            (Some(start), Some(end)) if start <= frame && frame <= end
        )
    }

    /// Exact membership.
    pub fn has(&self, item: &Item) -> bool {
        self.paths.contains(item.path())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn first(&self) -> Option<&Item> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&Item> {
        self.items.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    pub fn field(&self) -> Option<usize> {
        self.field
    }

    pub fn frame_set(&self) -> FrameSet {
        match self.field {
            Some(field) => FrameSet::collect(&self.items, field),
            None => FrameSet::default(),
        }
    }

    pub fn frames(&self) -> Vec<u64> {
        self.frame_set().present()
    }

    pub fn missing(&self) -> Vec<u64> {
        self.frame_set().missing()
    }

    pub fn start(&self) -> Option<u64> {
        self.frame_set().start()
    }

    pub fn end(&self) -> Option<u64> {
        self.frame_set().end()
    }

    /// Padding placeholder such as `%04d`; empty for a sequence without a
    /// frame field.
    pub fn padding(&self) -> String {
        match self.field {
            Some(_) => padding_placeholder(self.frame_set().padding_width()),
            None => String::new(),
        }
    }

    pub fn head(&self) -> String {
        match (self.items.first(), self.field) {
            (Some(first), Some(field)) => first.head_at(field),
            (Some(first), None) => first.name().to_owned(),
            (None, _) => String::new(),
        }
    }

    pub fn tail(&self) -> String {
        match (self.items.first(), self.field) {
            (Some(first), Some(field)) => first.tail_at(field),
            _ => String::new(),
        }
    }

    /// Absolute directory of the members, with a trailing separator.
    pub fn directory(&self) -> String {
        let dirname = self.items.first().map(Item::dirname).unwrap_or_default();
        let base = if dirname.is_empty() {
            Path::new(".")
        } else {
            Path::new(dirname)
        };
        let mut directory = std::path::absolute(base)
            .unwrap_or_else(|_| base.to_path_buf())
            .to_string_lossy()
            .into_owned();
        if !directory.ends_with(MAIN_SEPARATOR) {
            directory.push(MAIN_SEPARATOR);
        }
        directory
    }
}

impl Index<usize> for Sequence {
    type Output = Item;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
