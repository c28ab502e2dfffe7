use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = seqscan::cli::Cli::parse();
    seqscan::init(cli.verbose);
    seqscan::cli::run(cli)
}
