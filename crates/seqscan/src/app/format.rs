//! Template rendering and parsing of the compressed sequence notation.
//!
//! A template mixes literal text with `%` directives (`%h%p%t %R`). Rendering
//! substitutes each directive with a value computed from a [`Sequence`];
//! [`Formatter::uncompress_with`] runs the other way and materialises the
//! sequence a rendered string describes.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use regex::{Captures, Regex};

use crate::domain::errors::{SeqResult, TemplateError};
use crate::domain::frames::{
    FrameSet, check_expansion, pad_frame, padding_placeholder, parse_frame, parse_runs,
    render_runs, width_ceiling,
};
use crate::domain::item::{DIGITS, Item};
use crate::domain::sequence::Sequence;
use crate::infra::config::Config;

/// Template used when none is supplied: `file.1-3.jpg`.
pub const DEFAULT_TEMPLATE: &str = "%h%r%t";

/// A single template directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// `%h`: name text before the frame field.
    Head,
    /// `%t`: name text after the frame field.
    Tail,
    /// `%p`: printf-style padding placeholder.
    Padding,
    /// `%r`: `start-end`.
    Range,
    /// `%f`: compressed present frames.
    Frames,
    /// `%R`: bracketed compressed present frames.
    FramesBracketed,
    /// `%m`: compressed missing frames.
    Missing,
    /// `%M`: bracketed compressed missing frames.
    MissingBracketed,
    /// `%s`
    Start,
    /// `%e`
    End,
    /// `%l`: member count.
    Length,
    /// `%d` or `%D`: absolute directory with a trailing separator.
    Directory,
}

impl Directive {
    pub fn from_letter(letter: char) -> Option<Self> {
        let directive = match letter {
            'h' => Directive::Head,
            't' => Directive::Tail,
            'p' => Directive::Padding,
            'r' => Directive::Range,
            'f' => Directive::Frames,
            'R' => Directive::FramesBracketed,
            'm' => Directive::Missing,
            'M' => Directive::MissingBracketed,
            's' => Directive::Start,
            'e' => Directive::End,
            'l' => Directive::Length,
            'd' | 'D' => Directive::Directory,
            _ => return None,
        };
        Some(directive)
    }

    pub fn letter(&self) -> char {
        match self {
            Directive::Head => 'h',
            Directive::Tail => 't',
            Directive::Padding => 'p',
            Directive::Range => 'r',
            Directive::Frames => 'f',
            Directive::FramesBracketed => 'R',
            Directive::Missing => 'm',
            Directive::MissingBracketed => 'M',
            Directive::Start => 's',
            Directive::End => 'e',
            Directive::Length => 'l',
            Directive::Directory => 'd',
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, Directive::Start | Directive::End | Directive::Length)
    }

    /// Capture pattern used when parsing a rendered string.
    fn pattern(&self) -> &'static str {
        match self {
            // Heads never end in a digit: the frame field is a maximal digit run.
            Directive::Head => r"((?:\S*?[^0-9\s])??)",
            Directive::Tail => r"(\S*)",
            Directive::Padding => r"(%[0-9]*d)",
            Directive::Range => RangeForm::Span.pattern(),
            Directive::Frames | Directive::Missing => r"(\[?[0-9,\s-]*\]?)",
            Directive::FramesBracketed | Directive::MissingBracketed => r"(\[[0-9,\s-]*\])",
            Directive::Start | Directive::End | Directive::Length => r"\s*([0-9]+)",
            Directive::Directory => r"((?:\S*[/\\])?)",
        }
    }
}

/// Shapes a `%r` value may take, tried in order when parsing.
///
/// A bare number is only a frame when no span fits, and an empty range is
/// how a lone file renders under a template without `%p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeForm {
    Span,
    Single,
    Empty,
}

impl RangeForm {
    fn pattern(self) -> &'static str {
        match self {
            RangeForm::Span => r"([0-9]+-[0-9]+)",
            RangeForm::Single => r"([0-9]+)",
            RangeForm::Empty => r"()",
        }
    }
}

/// A literal run or a directive with its optional width and zero flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    Directive {
        directive: Directive,
        width: Option<usize>,
        zero_pad: bool,
    },
}

impl Token {
    fn directive(directive: Directive) -> Self {
        Token::Directive {
            directive,
            width: None,
            zero_pad: false,
        }
    }
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    tokens: Vec<Token>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch != '%' {
                literal.push(ch);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                literal.push('%');
                continue;
            }

            let mut flags = String::new();
            while let Some(digit) = chars.next_if(char::is_ascii_digit) {
                flags.push(digit);
            }
            let zero_pad = flags.starts_with('0');
            let digits = flags.trim_start_matches('0');
            let width = if digits.is_empty() {
                None
            } else {
                Some(
                    digits
                        .parse::<usize>()
                        .map_err(|_| TemplateError::InvalidNumber(flags.clone()))?,
                )
            };

            let letter = chars.next().ok_or(TemplateError::DanglingPercent)?;
            let directive =
                Directive::from_letter(letter).ok_or(TemplateError::UnknownDirective(letter))?;

            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Token::Directive {
                directive,
                width,
                zero_pad,
            });
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Ok(Self {
            source: source.to_owned(),
            tokens,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    fn has(&self, wanted: Directive) -> bool {
        self.tokens.iter().any(|token| {
            matches!(token, Token::Directive { directive, .. } if *directive == wanted)
        })
    }

    fn range_forms(&self) -> &'static [RangeForm] {
        if !self.has(Directive::Range) {
            &[RangeForm::Span]
        } else if self.has(Directive::Padding) {
            &[RangeForm::Span, RangeForm::Single]
        } else {
            &[RangeForm::Span, RangeForm::Single, RangeForm::Empty]
        }
    }

    /// Anchored regex expecting this template's literals in order, with one
    /// capture group per directive.
    fn matcher(&self, form: RangeForm) -> Result<(Regex, Vec<Directive>), TemplateError> {
        let mut pattern = String::from("^");
        let mut captured = Vec::new();
        for token in &self.tokens {
            match token {
                Token::Literal(text) => pattern.push_str(&regex::escape(text)),
                Token::Directive {
                    directive: Directive::Range,
                    ..
                } => {
                    pattern.push_str(form.pattern());
                    captured.push(Directive::Range);
                }
                Token::Directive { directive, .. } => {
                    pattern.push_str(directive.pattern());
                    captured.push(*directive);
                }
            }
        }
        pattern.push('$');

        let regex = Regex::new(&pattern).map_err(|err| TemplateError::InvalidPattern {
            template: self.source.clone(),
            reason: err.to_string(),
        })?;
        Ok((regex, captured))
    }

    /// Match `text` against each accepted range shape in turn.
    fn captures<'t>(
        &self,
        text: &'t str,
    ) -> Result<(Captures<'t>, Vec<Directive>), TemplateError> {
        for form in self.range_forms() {
            let (regex, captured) = self.matcher(*form)?;
            if let Some(captures) = regex.captures(text) {
                return Ok((captures, captured));
            }
        }
        Err(TemplateError::NoMatch {
            text: text.to_owned(),
            template: self.source.clone(),
        })
    }
}

impl Default for Template {
    fn default() -> Self {
        Self {
            source: DEFAULT_TEMPLATE.to_owned(),
            tokens: vec![
                Token::directive(Directive::Head),
                Token::directive(Directive::Range),
                Token::directive(Directive::Tail),
            ],
        }
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Renders sequences to text and parses text back into sequences.
///
/// The default template is explicit state chosen at construction, so callers
/// can thread a configured template through without any process-wide setting.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    default_template: Template,
}

impl Formatter {
    pub fn new(default_template: Template) -> Self {
        Self { default_template }
    }

    /// Build a formatter using the configured default template.
    pub fn from_config(config: &Config) -> Result<Self, TemplateError> {
        Template::parse(&config.format.default).map(Self::new)
    }

    pub fn default_template(&self) -> &Template {
        &self.default_template
    }

    /// Render with the default template.
    pub fn render(&self, sequence: &Sequence) -> String {
        self.render_with(sequence, &self.default_template)
    }

    /// Parse `template` and render with it.
    pub fn format(&self, sequence: &Sequence, template: &str) -> Result<String, TemplateError> {
        let template = Template::parse(template)?;
        Ok(self.render_with(sequence, &template))
    }

    pub fn render_with(&self, sequence: &Sequence, template: &Template) -> String {
        let frames = sequence.frame_set();
        let mut rendered = String::new();
        for token in &template.tokens {
            match token {
                Token::Literal(text) => rendered.push_str(text),
                Token::Directive {
                    directive,
                    width,
                    zero_pad,
                } => {
                    let value = directive_value(*directive, sequence, &frames);
                    let zero_pad = *zero_pad && directive.is_numeric() && !value.is_empty();
                    rendered.push_str(&align(value, *width, zero_pad));
                }
            }
        }
        rendered
    }

    /// Parse `text` with the default template.
    pub fn uncompress(&self, text: &str) -> SeqResult<Sequence> {
        self.uncompress_with(text, &self.default_template)
    }

    /// Materialise the sequence described by `text`, rendered with `template`.
    ///
    /// The whole text is matched; member paths are `%d` (when present) plus
    /// head, frame and tail, so a head carrying a directory keeps it. Frames
    /// come from an explicit frame list when the template has one, otherwise
    /// from `%r`, otherwise from `%s`/`%e`; missing lists are subtracted and
    /// frames too wide for a fixed padding are dropped. A bare `%r` number
    /// without `%p`, or an empty `%r`, names a lone file verbatim.
    pub fn uncompress_with(&self, text: &str, template: &Template) -> SeqResult<Sequence> {
        let (captures, captured) = template.captures(text)?;
        let value = |wanted: &[Directive]| {
            captured
                .iter()
                .position(|directive| wanted.contains(directive))
                .and_then(|index| captures.get(index + 1))
                .map(|found| found.as_str())
        };

        let directory = value(&[Directive::Directory]).unwrap_or_default();
        let head = value(&[Directive::Head]).unwrap_or_default();
        let tail = value(&[Directive::Tail]).unwrap_or_default();
        let width = match value(&[Directive::Padding]) {
            Some(placeholder) => padding_width(placeholder)?,
            None => None,
        };
        let ceiling = width_ceiling(width);

        let list = value(&[Directive::Frames, Directive::FramesBracketed]);
        let range = value(&[Directive::Range]);
        if list.is_none()
            && value(&[Directive::Padding]).is_none()
            && let Some(range) = range.filter(|range| !range.contains('-'))
        {
            let path = format!("{directory}{head}{range}{tail}");
            tracing::debug!(text, path = %path, "uncompressed lone file");
            return Sequence::new(path);
        }

        let runs = if let Some(list) = list {
            parse_runs(list)?
        } else if let Some(range) = range {
            parse_runs(range)?
        } else if let Some(start) = value(&[Directive::Start]) {
            let start = parse_frame(start)?;
            let end = match value(&[Directive::End]) {
                Some(end) => parse_frame(end)?,
                None => start,
            };
            vec![(start.min(end), start.max(end))]
        } else {
            return Err(TemplateError::MissingFrames(template.as_str().to_owned()).into());
        };
        let runs: Vec<(u64, u64)> = runs
            .into_iter()
            .filter(|(lo, _)| *lo <= ceiling)
            .map(|(lo, hi)| (lo, hi.min(ceiling)))
            .collect();

        check_expansion(&runs)?;

        let missing = match value(&[Directive::Missing, Directive::MissingBracketed]) {
            Some(list) => parse_runs(list)?,
            None => Vec::new(),
        };

        let frames: BTreeSet<u64> = runs
            .into_iter()
            .flat_map(|(lo, hi)| lo..=hi)
            .filter(|frame| !missing.iter().any(|(lo, hi)| lo <= frame && frame <= hi))
            .collect();
        tracing::debug!(text, frames = frames.len(), "uncompressed sequence notation");

        let items: Vec<Item> = frames
            .into_iter()
            .map(|frame| {
                Item::new(format!(
                    "{directory}{head}{}{tail}",
                    pad_frame(frame, width)
                ))
            })
            .collect();
        let mut sequence = Sequence::new(items)?;
        if sequence.len() == 1 && sequence.field().is_none() {
            let name_head = head.rsplit(std::path::is_separator).next().unwrap_or(head);
            sequence.set_field(DIGITS.find_iter(name_head).count());
        }
        Ok(sequence)
    }
}

fn directive_value(directive: Directive, sequence: &Sequence, frames: &FrameSet) -> String {
    let framed = sequence.field().is_some() && !frames.is_empty();
    match directive {
        Directive::Head => sequence.head(),
        Directive::Tail => sequence.tail(),
        Directive::Padding if framed => padding_placeholder(frames.padding_width()),
        Directive::Range => match (frames.start(), frames.end()) {
            (Some(start), Some(end)) if framed && start == end => start.to_string(),
            (Some(start), Some(end)) if framed => format!("{start}-{end}"),
            _ => String::new(),
        },
        Directive::Frames => render_runs(&frames.present_runs()),
        Directive::FramesBracketed if framed => format!("[{}]", render_runs(&frames.present_runs())),
        Directive::Missing => render_runs(&frames.missing_runs()),
        Directive::MissingBracketed if framed => {
            format!("[{}]", render_runs(&frames.missing_runs()))
        }
        Directive::Start => frames.start().map(|frame| frame.to_string()).unwrap_or_default(),
        Directive::End => frames.end().map(|frame| frame.to_string()).unwrap_or_default(),
        Directive::Length => sequence.len().to_string(),
        Directive::Directory => sequence.directory(),
        Directive::Padding | Directive::FramesBracketed | Directive::MissingBracketed => {
            String::new()
        }
    }
}

fn align(value: String, width: Option<usize>, zero_pad: bool) -> String {
    match width {
        Some(width) if zero_pad => format!("{value:0>width$}"),
        Some(width) => format!("{value:>width$}"),
        None => value,
    }
}

/// Width encoded in a placeholder such as `%04d`; `%d` means unpadded.
fn padding_width(placeholder: &str) -> Result<Option<usize>, TemplateError> {
    let digits = placeholder
        .trim_start_matches('%')
        .trim_end_matches('d')
        .trim_start_matches('0');
    if digits.is_empty() {
        return Ok(None);
    }
    digits
        .parse()
        .map(Some)
        .map_err(|_| TemplateError::InvalidNumber(placeholder.to_owned()))
}

/// Parse `text` rendered with `template` into a sequence.
pub fn uncompress(text: &str, template: &str) -> SeqResult<Sequence> {
    let template = Template::parse(template)?;
    Formatter::default().uncompress_with(text, &template)
}

impl Sequence {
    /// Render with an ad-hoc template.
    pub fn format(&self, template: &str) -> Result<String, TemplateError> {
        Formatter::default().format(self, template)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Formatter::default().render(self))
    }
}
