//! Structural diff of two filenames.
//!
//! The walk pairs a cursor in each string. Equal characters are skipped; a
//! mismatch opens a run. When the mismatch touches a digit, the run is widened
//! to the whole digit run on both sides, so `0040` vs `0041` reports the full
//! field rather than its last character. Any other mismatch closes at the next
//! agreeing position, or spans to each string's end when one of them runs out.

use serde::Serialize;

/// A maximal differing span between two strings.
///
/// `start` and `end` are character positions in the first string only. When
/// the two sides of a numeric run differ in width (`9` vs `10`), swapping the
/// arguments keeps `start` but moves `end`; the boundaries agree in both
/// directions only for equal-width runs. `frames` always holds each side's
/// full text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRun {
    pub start: usize,
    pub end: usize,
    pub frames: (String, String),
}

impl DiffRun {
    /// Both sides are non-empty runs of ASCII digits.
    pub fn is_numeric(&self) -> bool {
        is_number(&self.frames.0) && is_number(&self.frames.1)
    }
}

fn is_number(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Compute the ordered list of differing runs between `a` and `b`.
pub fn diff(a: &str, b: &str) -> Vec<DiffRun> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut runs = Vec::new();
    let (mut i, mut j) = (0, 0);

    loop {
        while i < a.len() && j < b.len() && a[i] == b[j] {
            i += 1;
            j += 1;
        }
        if i == a.len() && j == b.len() {
            break;
        }

        let (mut start_a, mut start_b) = (i, j);
        if digit_at(&a, i) || digit_at(&b, j) {
            while start_a > 0
                && start_b > 0
                && a[start_a - 1].is_ascii_digit()
                && b[start_b - 1].is_ascii_digit()
            {
                start_a -= 1;
                start_b -= 1;
            }
        }

        let (end_a, end_b) = if digit_at(&a, start_a) && digit_at(&b, start_b) {
            (digit_run_end(&a, start_a), digit_run_end(&b, start_b))
        } else {
            let (mut end_a, mut end_b) = (i, j);
            while end_a < a.len() && end_b < b.len() && a[end_a] != b[end_b] {
                end_a += 1;
                end_b += 1;
            }
            if end_a == a.len() || end_b == b.len() {
                (a.len(), b.len())
            } else {
                (end_a, end_b)
            }
        };

        runs.push(DiffRun {
            start: start_a,
            end: end_a,
            frames: (
                a[start_a..end_a].iter().collect(),
                b[start_b..end_b].iter().collect(),
            ),
        });
        i = end_a;
        j = end_b;
    }

    runs
}

/// The single numeric run separating two sibling names, if that is all that
/// separates them.
pub fn numeric_sibling_run(a: &str, b: &str) -> Option<DiffRun> {
    let mut runs = diff(a, b);
    if runs.len() != 1 || !runs[0].is_numeric() {
        return None;
    }
    runs.pop()
}

fn digit_at(chars: &[char], index: usize) -> bool {
    chars.get(index).is_some_and(char::is_ascii_digit)
}

fn digit_run_end(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while digit_at(chars, end) {
        end += 1;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(start: usize, end: usize, a: &str, b: &str) -> DiffRun {
        DiffRun {
            start,
            end,
            frames: (a.to_owned(), b.to_owned()),
        }
    }

    #[test]
    fn widens_to_the_whole_digit_field() {
        assert_eq!(
            diff("file01_0040.rgb", "file01_0041.rgb"),
            vec![run(7, 11, "0040", "0041")]
        );
    }

    #[test]
    fn single_digit_field() {
        assert_eq!(
            diff("file3.03.rgb", "file4.03.rgb"),
            vec![run(4, 5, "3", "4")]
        );
    }

    #[test]
    fn identical_strings_have_no_runs() {
        assert!(diff("file.0001.jpg", "file.0001.jpg").is_empty());
    }

    #[test]
    fn fields_of_different_width() {
        assert_eq!(diff("file.9.jpg", "file.10.jpg"), vec![run(5, 6, "9", "10")]);
        assert_eq!(diff("file.12.jpg", "file.1.jpg"), vec![run(5, 7, "12", "1")]);
    }

    #[test]
    fn boundaries_follow_the_first_argument() {
        assert_eq!(diff("file.10.jpg", "file.9.jpg"), vec![run(5, 7, "10", "9")]);
        assert_eq!(diff("file.0009.jpg", "file.0010.jpg"), vec![run(5, 9, "0009", "0010")]);
        assert_eq!(diff("file.0010.jpg", "file.0009.jpg"), vec![run(5, 9, "0010", "0009")]);
    }

    #[test]
    fn two_varying_fields_are_two_runs() {
        let runs = diff("z1_001_v1.4.png", "z1_002_v1.1.png");
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], run(3, 6, "001", "002"));
        assert_eq!(runs[1], run(10, 11, "4", "1"));
        assert!(numeric_sibling_run("z1_001_v1.4.png", "z1_002_v1.1.png").is_none());
    }

    #[test]
    fn literal_changes_are_not_numeric() {
        let runs = diff("fileA.1.rgb", "fileB.1.rgb");
        assert_eq!(runs, vec![run(4, 5, "A", "B")]);
        assert!(!runs[0].is_numeric());

        let runs = diff("file.1.jpg", "file.a.jpg");
        assert_eq!(runs, vec![run(5, 6, "1", "a")]);
        assert!(!runs[0].is_numeric());
    }

    #[test]
    fn digits_before_a_literal_change_stay_out_of_the_run() {
        assert_eq!(diff("x12a", "x12b"), vec![run(3, 4, "a", "b")]);
    }

    #[test]
    fn exhausted_string_spans_to_the_end() {
        assert_eq!(diff("abc", "abcd"), vec![run(3, 3, "", "d")]);
        assert_eq!(diff("fileA.1", "fileAB.1"), vec![run(5, 7, ".1", "B.1")]);
    }

    #[test]
    fn swapping_inputs_swaps_frames() {
        let forward = diff("file01_0040.rgb", "file01_0041.rgb");
        let backward = diff("file01_0041.rgb", "file01_0040.rgb");
        assert_eq!(forward.len(), backward.len());
        assert_eq!(forward[0].start, backward[0].start);
        assert_eq!(forward[0].end, backward[0].end);
        assert_eq!(forward[0].frames.0, backward[0].frames.1);
    }

    #[test]
    fn sibling_run_requires_one_numeric_run() {
        let found = numeric_sibling_run("a.001.tga", "a.014.tga").expect("siblings");
        assert_eq!(found.frames, ("001".to_owned(), "014".to_owned()));
        assert!(numeric_sibling_run("a.001.tga", "a.001.tga").is_none());
        assert!(numeric_sibling_run("a.001.tga", "b.001.tga").is_none());
    }
}
