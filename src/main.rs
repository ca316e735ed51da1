//! CLI entry point for the grid path puzzle generator

use clap::Parser;
use pathgrid::io::cli::{Cli, GenerationRunner};

fn main() -> pathgrid::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut runner = GenerationRunner::new(cli);
    runner.run(&mut std::io::stdout().lock())
}
