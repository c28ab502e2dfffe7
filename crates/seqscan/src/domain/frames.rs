//! Frame-set bookkeeping: present and missing frames, padding inference and
//! the compressed range notation.

use std::collections::BTreeSet;

use super::errors::TemplateError;
use super::item::Item;

const RANGE_JOIN: &str = ", ";

/// Integer frames held by the members of a sequence at one digit field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSet {
    present: BTreeSet<u64>,
    widths: BTreeSet<usize>,
}

impl FrameSet {
    /// Gather the frames found at `field` across `members`.
    ///
    /// Digit runs too long for a `u64` are skipped.
    pub fn collect<'a>(members: impl IntoIterator<Item = &'a Item>, field: usize) -> Self {
        let mut set = Self::default();
        for text in members.into_iter().filter_map(|item| item.frame_text(field)) {
            set.widths.insert(text.len());
            match text.parse::<u64>() {
                Ok(frame) => {
                    set.present.insert(frame);
                }
                Err(err) => {
                    tracing::debug!(frame = %text, error = %err, "skipping unrepresentable frame");
                }
            }
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.present.is_empty()
    }

    pub fn len(&self) -> usize {
        self.present.len()
    }

    pub fn contains(&self, frame: u64) -> bool {
        self.present.contains(&frame)
    }

    pub fn start(&self) -> Option<u64> {
        self.present.first().copied()
    }

    pub fn end(&self) -> Option<u64> {
        self.present.last().copied()
    }

    /// Sorted distinct frames.
    pub fn present(&self) -> Vec<u64> {
        self.present.iter().copied().collect()
    }

    /// Sorted frames strictly between the bounds that no member carries.
    pub fn missing(&self) -> Vec<u64> {
        self.missing_runs()
            .into_iter()
            .flat_map(|(lo, hi)| lo..=hi)
            .collect()
    }

    /// Present frames as inclusive runs.
    pub fn present_runs(&self) -> Vec<(u64, u64)> {
        runs(self.present.iter().copied())
    }

    /// Gaps between consecutive present frames as inclusive runs.
    pub fn missing_runs(&self) -> Vec<(u64, u64)> {
        let mut gaps = Vec::new();
        let mut frames = self.present.iter().copied();
        let Some(mut previous) = frames.next() else {
            return gaps;
        };
        for frame in frames {
            if frame > previous + 1 {
                gaps.push((previous + 1, frame - 1));
            }
            previous = frame;
        }
        gaps
    }

    /// Common digit count of every member's field, or `None` when members
    /// disagree and frames render unpadded.
    pub fn padding_width(&self) -> Option<usize> {
        match self.widths.len() {
            1 => self.widths.first().copied(),
            _ => None,
        }
    }
}

/// Collapse sorted distinct values into inclusive runs.
fn runs(values: impl IntoIterator<Item = u64>) -> Vec<(u64, u64)> {
    let mut runs: Vec<(u64, u64)> = Vec::new();
    for value in values {
        if let Some(last) = runs.last_mut()
            && last.1.checked_add(1) == Some(value)
        {
            last.1 = value;
            continue;
        }
        runs.push((value, value));
    }
    runs
}

/// Render inclusive runs as `1-3, 6`.
pub fn render_runs(runs: &[(u64, u64)]) -> String {
    runs.iter()
        .map(|&(lo, hi)| {
            if lo == hi {
                lo.to_string()
            } else {
                format!("{lo}-{hi}")
            }
        })
        .collect::<Vec<_>>()
        .join(RANGE_JOIN)
}

/// Canonical compressed form of a sorted list of distinct integers.
pub fn range_compress(values: &[u64]) -> String {
    render_runs(&runs(values.iter().copied()))
}

/// Parse a compressed list such as `[1-3, 10, 12-14]` back into inclusive runs.
///
/// Surrounding brackets and whitespace are optional; an empty list is valid.
pub fn parse_runs(text: &str) -> Result<Vec<(u64, u64)>, TemplateError> {
    let inner = text.trim();
    let inner = inner.strip_prefix('[').unwrap_or(inner);
    let inner = inner.strip_suffix(']').unwrap_or(inner).trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(|group| -> Result<(u64, u64), TemplateError> {
            let group = group.trim();
            match group.split_once('-') {
                Some((lo, hi)) => {
                    let lo = parse_frame(lo)?;
                    let hi = parse_frame(hi)?;
                    Ok((lo.min(hi), lo.max(hi)))
                }
                None => parse_frame(group).map(|frame| (frame, frame)),
            }
        })
        .collect()
}

/// Upper bound on the frames a compressed list may expand to.
pub const MAX_EXPANDED_FRAMES: u64 = 1_000_000;

/// Reject run lists that would expand past [`MAX_EXPANDED_FRAMES`].
pub fn check_expansion(runs: &[(u64, u64)]) -> Result<(), TemplateError> {
    let requested = runs.iter().fold(0u64, |total, (lo, hi)| {
        total.saturating_add(hi.saturating_sub(*lo).saturating_add(1))
    });
    if requested > MAX_EXPANDED_FRAMES {
        return Err(TemplateError::TooManyFrames {
            requested,
            limit: MAX_EXPANDED_FRAMES,
        });
    }
    Ok(())
}

/// Expand a compressed list into sorted distinct frames.
pub fn parse_ranges(text: &str) -> Result<Vec<u64>, TemplateError> {
    let runs = parse_runs(text)?;
    check_expansion(&runs)?;
    let frames: BTreeSet<u64> = runs
        .into_iter()
        .flat_map(|(lo, hi)| lo..=hi)
        .collect();
    Ok(frames.into_iter().collect())
}

pub(crate) fn parse_frame(text: &str) -> Result<u64, TemplateError> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TemplateError::InvalidNumber(text.to_owned()));
    }
    text.parse()
        .map_err(|_| TemplateError::InvalidNumber(text.to_owned()))
}

/// printf-style placeholder describing a padding width: `%04d`, or `%d` when
/// frames are unpadded.
pub fn padding_placeholder(width: Option<usize>) -> String {
    match width {
        Some(width) if width > 1 => format!("%0{width}d"),
        _ => "%d".to_owned(),
    }
}

/// Render `frame` zero-padded to `width`.
pub fn pad_frame(frame: u64, width: Option<usize>) -> String {
    match width {
        Some(width) => format!("{frame:0width$}"),
        None => frame.to_string(),
    }
}

/// Largest frame a fixed `width` can hold. Frames above it overflow the
/// padding and are never materialised.
pub fn width_ceiling(width: Option<usize>) -> u64 {
    match width {
        Some(width) if width > 1 && width < 20 => 10u64.pow(width as u32) - 1,
        _ => u64::MAX,
    }
}
