//! CLI entry point for the edge-matching puzzle solvers

use clap::Parser;
use eternity_solver::io::cli::{Cli, CommandRunner};

fn main() -> eternity_solver::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();
    CommandRunner::new(cli).run()
}
