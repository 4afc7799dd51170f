mod cli;
mod commands;
mod error;
mod session;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use error::Result;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.session.verbose);

    if let Err(err) = run(cli) {
        ui::error(err.to_string());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Status => commands::status::run(&cli.session),
        Commands::Connect => commands::connect::run(&cli.session),
        Commands::Mint => commands::mint::run(&cli.session),
        Commands::Count => commands::count::run(&cli.session),
        Commands::Watch(args) => commands::watch::run(&cli.session, args),
        Commands::Completions(args) => commands::completions::run(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
