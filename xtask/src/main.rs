use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::Command;

#[derive(Parser)]
#[command(author, version, about = "Project automation commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the seqscan test suite through cargo nextest
    Nextest {
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        release: bool,
        /// Accept changed insta snapshots instead of failing on them
        #[arg(long)]
        accept: bool,
    },
    /// Write shell completion scripts for seqscan into a directory
    Completions {
        #[arg(long, default_value = "target/completions")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Nextest {
            profile,
            release,
            accept,
        } => run_nextest(profile, release, accept)?,
        Commands::Completions { out_dir } => write_completions(&out_dir)?,
    }
    Ok(())
}

fn run_nextest(profile: Option<String>, release: bool, accept: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("nextest").arg("run").arg("-p").arg("seqscan");
    if let Some(profile) = profile {
        cmd.arg("--profile").arg(profile);
    }
    if release {
        cmd.arg("--release");
    }
    if accept {
        cmd.env("INSTA_UPDATE", "always");
    }
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("cargo nextest run failed");
    }
    Ok(())
}

fn write_completions(out_dir: &PathBuf) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    for (shell, file) in [("bash", "seqscan.bash"), ("zsh", "_seqscan"), ("fish", "seqscan.fish")] {
        let output = Command::new("cargo")
            .args(["run", "--quiet", "-p", "seqscan", "--", "completions", shell])
            .output()?;
        if !output.status.success() {
            anyhow::bail!("generating {shell} completions failed");
        }
        fs::write(out_dir.join(file), output.stdout)?;
    }
    Ok(())
}
