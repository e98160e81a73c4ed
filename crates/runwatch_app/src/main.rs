mod cli;
mod logging;
mod terminal;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    logging::initialize(args.log.into());
    terminal::watch::run(args)
}
