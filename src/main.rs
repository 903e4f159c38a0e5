use anyhow::Result;
use clap::Parser;
use spendbook::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    spendbook::init_tracing(cli.verbose);
    cli.run()
}
