//! Core sequence model: filename parsing, structural diffing, frame
//! bookkeeping and the sequence type itself. Nothing here touches the
//! filesystem.

pub mod diff;
pub mod errors;
pub mod frames;
pub mod item;
pub mod model;
pub mod sequence;

pub use diff::{DiffRun, diff};
pub use errors::{SeqResult, SequenceError, TemplateError};
pub use frames::{FrameSet, range_compress};
pub use item::Item;
pub use model::{Members, SequenceSummary};
pub use sequence::Sequence;
