use clap::Parser;
use recent_brews::cli::Cli;
use recent_brews::config::Config;
use recent_brews::{output, pipeline};

fn main() -> anyhow::Result<()> {
    let config = Config::from_cli(Cli::parse());

    let progress = output::RunProgress::new(&config);
    let result = pipeline::run(&config, &progress);
    progress.finish();

    output::print_outcome(&result?, &config);
    Ok(())
}
