use clap::Parser;
use cncview::init_logging;
use cncview::preview::{self, PreviewArgs};

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let args = PreviewArgs::parse();
    let summary = preview::run(&args)?;
    summary.log();

    Ok(())
}
