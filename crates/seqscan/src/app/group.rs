//! Grouping of loose filenames into sequences.

use crate::domain::errors::{SeqResult, SequenceError};
use crate::domain::item::Item;
use crate::domain::model::Members;
use crate::domain::sequence::Sequence;

/// Partition `filenames` into sequences.
///
/// Names are sorted by path and deduplicated, then walked once: each item
/// joins the open sequence when it belongs there, otherwise it starts a new
/// one. Every input lands in exactly one sequence.
pub fn group(filenames: impl Into<Members>) -> SeqResult<Vec<Sequence>> {
    let mut items = filenames.into().into_items();
    if items.is_empty() {
        return Err(SequenceError::EmptyInput);
    }
    items.sort();
    items.dedup();

    let mut sequences: Vec<Sequence> = Vec::new();
    for item in items {
        let rejected = match sequences.last_mut() {
            Some(open) => open.try_push(item).err(),
            None => Some(item),
        };
        if let Some(item) = rejected {
            tracing::trace!(path = %item, "starting new sequence");
            sequences.push(Sequence::seed(item));
        }
    }

    tracing::debug!(sequences = sequences.len(), "grouped filenames");
    Ok(sequences)
}

/// Group and render every sequence with `template`.
pub fn group_rendered(
    filenames: impl IntoIterator<Item = impl Into<Item>>,
    template: &str,
) -> SeqResult<Vec<String>> {
    let members: Members = filenames.into_iter().map(Into::into).collect();
    group(members)?
        .iter()
        .map(|sequence| sequence.format(template).map_err(SequenceError::from))
        .collect()
}
