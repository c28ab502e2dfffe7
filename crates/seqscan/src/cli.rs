//! Command-line surface of the `seqscan` binary.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::app::format::{Formatter, Template};
use crate::app::group::group;
use crate::app::listing::{Lister, ListingFormat, ListingOptions};
use crate::app::scan::{ScannerConfig, Scanner, Source, collect_sequences};
use crate::domain::item::Item;
use crate::domain::model::Members;
use crate::infra::config::Config;

#[derive(Debug, Parser)]
#[command(author, version, about = "Find and format numbered file sequences", long_about = None)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the sequences found in directories, files or glob patterns
    Ls {
        /// Directories, files or glob patterns to list
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,
        /// Walk subdirectories
        #[arg(short, long)]
        recursive: bool,
        /// Template for each line
        #[arg(short, long)]
        format: Option<String>,
        /// Include hidden files
        #[arg(short, long)]
        all: bool,
        #[arg(long, value_enum, default_value_t = ListingFormat::Text)]
        output: ListingFormat,
    },
    /// Group filenames read from stdin (one per line, or a JSON array)
    Group {
        /// Template for each line
        #[arg(short, long)]
        format: Option<String>,
        #[arg(long, value_enum, default_value_t = ListingFormat::Text)]
        output: ListingFormat,
    },
    /// Print every member path of a compressed sequence notation
    Expand {
        /// Notation such as "a.%03d.tga [1-3, 10]"
        text: String,
        /// Template the notation was rendered with
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "seqscan", &mut out);
            Ok(())
        }
        command => {
            let config = Config::load().context("failed to load configuration")?;
            let formatter = Formatter::from_config(&config)
                .with_context(|| format!("invalid default template '{}'", config.format.default))?;
            execute(command, &config, formatter, &mut out)
        }
    }
}

fn execute(
    command: Commands,
    config: &Config,
    formatter: Formatter,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Ls {
            paths,
            recursive,
            format,
            all,
            output,
        } => {
            let mut options = ListingOptions::from_config(config)?;
            if let Some(format) = format {
                options.template = parse_template(&format)?;
            }
            options.format = output;
            options.headers = recursive || config.scan.recursive || paths.len() > 1;

            let scanner = Scanner::new();
            let mut files = Vec::new();
            for path in &paths {
                let source = Source::resolve(path)?;
                let cfg = ScannerConfig::from_source(source, config.clone())
                    .with_recursive(recursive)
                    .with_show_hidden(all);
                files.extend(scanner.scan(&cfg)?.files);
            }
            files.sort();
            files.dedup();

            let listings = collect_sequences(files)?;
            let rendered = Lister::new(formatter).render_listings(&listings, &options)?;
            write_rendered(out, &rendered, output)
        }
        Commands::Group { format, output } => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read filenames from stdin")?;
            let members = parse_members(&input)?;
            if members.is_empty() {
                return Ok(());
            }

            let template = match format {
                Some(format) => parse_template(&format)?,
                None => formatter.default_template().clone(),
            };
            let sequences = group(members)?;
            let options = ListingOptions {
                format: output,
                template,
                headers: false,
            };
            let rendered = Lister::new(formatter).render(&sequences, &options)?;
            write_rendered(out, &rendered, output)
        }
        Commands::Expand { text, format } => {
            let template = match format {
                Some(format) => parse_template(&format)?,
                None => formatter.default_template().clone(),
            };
            let sequence = formatter
                .uncompress_with(&text, &template)
                .with_context(|| format!("cannot expand '{text}'"))?;
            for item in &sequence {
                writeln!(out, "{item}")?;
            }
            Ok(())
        }
        Commands::Completions { .. } => Ok(()),
    }
}

fn parse_template(source: &str) -> Result<Template> {
    Template::parse(source).with_context(|| format!("invalid template '{source}'"))
}

/// Newline-separated names, or a JSON array when the input starts with `[`.
fn parse_members(input: &str) -> Result<Members> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('[') {
        let value: serde_json::Value =
            serde_json::from_str(trimmed).context("failed to parse JSON filename list")?;
        return Ok(Members::try_from(value)?);
    }
    Ok(input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Item::new)
        .collect())
}

fn write_rendered(out: &mut impl Write, rendered: &str, format: ListingFormat) -> Result<()> {
    out.write_all(rendered.as_bytes())?;
    if format == ListingFormat::Json {
        writeln!(out)?;
    }
    Ok(())
}
