mod cli;
mod client;
mod commands;
mod render;

use clap::Parser;
use colored::Colorize;

fn main() {
    let cli = cli::Cli::parse();
    if let Err(err) = commands::run_command(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}
