//! obumbra CLI - shader compatibility build matrix for Minecraft mods

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::Session;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("obumbra=debug")
    } else {
        EnvFilter::new("obumbra=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let Cli {
        verbose,
        no_color,
        project_dir,
        selection,
        command,
    } = cli;
    let session = || Session::load(project_dir.clone(), &selection, verbose, !no_color);

    match command {
        Commands::Check(args) => commands::check::execute(&session()?, args),
        Commands::Plan(args) => commands::plan::execute(&session()?, args),
        Commands::Coordinates(args) => commands::coordinates::execute(&session()?, args),
        Commands::Stage(args) => commands::stage::execute(&session()?, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
