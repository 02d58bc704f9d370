//! keg CLI - Entry point
//!
//! Usage: keg <command> [options]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use keg::cli::{Cli, Commands};
use keg::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so piped output stays clean
    let default_filter = if cli.verbose { "keg=debug" } else { "keg=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Init(args) => keg::cli::init::run(args, &config),
        Commands::Create(args) => keg::cli::create::run(args, &config),
        Commands::Edit(args) => keg::cli::edit::run(args, &config),
        Commands::Delete(args) => keg::cli::delete::run(args, &config),
        Commands::Titles(args) => keg::cli::titles::run(args, &config),
        Commands::Latest(args) => keg::cli::latest::run(args, &config),
        Commands::Dir(args) => keg::cli::dir::run(args, &config),
        Commands::Random(args) => keg::cli::random::run(args, &config),
        Commands::Current => keg::cli::current::run(&config),
        Commands::Dex(args) => keg::cli::dex::run(args, &config),
        Commands::Config(args) => keg::cli::config::run(args, cli.config.as_deref(), &config),
    }
}
