//! mig CLI - ledger-driven schema migrations for DuckDB

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{add, common::ExitCode, down, list, recreate, run, status, up};

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = dispatch(&cli) {
        match err.downcast_ref::<ExitCode>() {
            Some(code) => std::process::exit(code.0),
            None => {
                eprintln!("Error: {err:#}");
                std::process::exit(1);
            }
        }
    }
}

fn dispatch(cli: &Cli) -> Result<()> {
    match &cli.command {
        cli::Commands::Add => add::execute(&cli.global),
        cli::Commands::List(args) => list::execute(args, &cli.global),
        cli::Commands::Run(args) => run::execute(args, &cli.global),
        cli::Commands::Up(args) => up::execute(args, &cli.global),
        cli::Commands::Down(args) => down::execute(args, &cli.global),
        cli::Commands::Status => status::execute(&cli.global),
        cli::Commands::Recreate => recreate::execute(&cli.global),
    }
}
