//! Rendering of grouped sequences for output.

use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::app::format::{Formatter, Template};
use crate::app::scan::DirectoryListing;
use crate::domain::frames::render_runs;
use crate::domain::model::SequenceSummary;
use crate::domain::sequence::Sequence;
use crate::infra::config::Config;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum ListingFormat {
    /// One rendered line per sequence.
    #[default]
    Text,
    /// A JSON array of sequence summaries.
    Json,
}

impl ListingFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingFormat::Text => "text",
            ListingFormat::Json => "json",
        }
    }
}

impl FromStr for ListingFormat {
    type Err = ListingFormatParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" | "txt" => Ok(ListingFormat::Text),
            "json" => Ok(ListingFormat::Json),
            other => Err(ListingFormatParseError::UnknownFormat(other.to_string())),
        }
    }
}

/// Error returned when parsing a [`ListingFormat`] fails.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ListingFormatParseError {
    #[error("unknown output format '{0}'")]
    UnknownFormat(String),
}

/// Runtime options controlling how listings are printed.
#[derive(Debug, Clone)]
pub struct ListingOptions {
    pub format: ListingFormat,
    pub template: Template,
    /// Print a `<dir>:` line before each directory.
    pub headers: bool,
}

impl ListingOptions {
    /// Options using the configured listing template.
    pub fn from_config(config: &Config) -> Result<Self> {
        let template = Template::parse(&config.format.listing)
            .with_context(|| format!("invalid listing template '{}'", config.format.listing))?;
        Ok(Self {
            format: ListingFormat::Text,
            template,
            headers: false,
        })
    }
}

/// Renders sequences as text lines or JSON summaries.
#[derive(Debug, Clone, Default)]
pub struct Lister {
    formatter: Formatter,
}

impl Lister {
    pub fn new(formatter: Formatter) -> Self {
        Self { formatter }
    }

    pub fn summarize(&self, sequence: &Sequence) -> SequenceSummary {
        let frames = sequence.frame_set();
        let framed = sequence.field().is_some();
        SequenceSummary {
            directory: sequence.directory(),
            head: sequence.head(),
            tail: sequence.tail(),
            padding: sequence.padding(),
            start: sequence.start(),
            end: sequence.end(),
            length: sequence.len(),
            frames: if framed {
                render_runs(&frames.present_runs())
            } else {
                String::new()
            },
            missing: render_runs(&frames.missing_runs()),
            rendered: self.formatter.render(sequence),
        }
    }

    /// Render one group of sequences.
    pub fn render(&self, sequences: &[Sequence], options: &ListingOptions) -> Result<String> {
        match options.format {
            ListingFormat::Text => Ok(self.text_lines(sequences, &options.template)),
            ListingFormat::Json => {
                let summaries: Vec<SequenceSummary> =
                    sequences.iter().map(|seq| self.summarize(seq)).collect();
                serde_json::to_string_pretty(&summaries).context("failed to encode listing")
            }
        }
    }

    /// Render scanned directories, with optional headers in text mode.
    pub fn render_listings(
        &self,
        listings: &[DirectoryListing],
        options: &ListingOptions,
    ) -> Result<String> {
        if options.format == ListingFormat::Json {
            let sequences: Vec<Sequence> = listings
                .iter()
                .flat_map(|listing| listing.sequences.iter().cloned())
                .collect();
            return self.render(&sequences, options);
        }

        let mut out = String::new();
        for (index, listing) in listings.iter().enumerate() {
            if options.headers {
                if index > 0 {
                    out.push('\n');
                }
                out.push_str(&format!("{}:\n", listing.directory.display()));
            }
            out.push_str(&self.text_lines(&listing.sequences, &options.template));
        }
        Ok(out)
    }

    fn text_lines(&self, sequences: &[Sequence], template: &Template) -> String {
        sequences
            .iter()
            .map(|sequence| self.formatter.render_with(sequence, template) + "\n")
            .collect()
    }
}
