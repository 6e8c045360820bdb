// this_file: crates/uitext-cli/src/main.rs

//! uitext - render a UI text line and inspect font resolution from the shell

mod cli;
mod commands;
mod png;

use anyhow::Result;
use clap::Parser;
use uitext::{Config, TextContext};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    // Face inspection needs no font index
    let ctx = || TextContext::new(&config(&cli));
    match &cli.command {
        Commands::Render(args) => commands::render::run(&ctx(), args),
        Commands::Family(args) => commands::lookup::family(&ctx(), args),
        Commands::Fallback(args) => commands::lookup::fallback(&ctx(), args),
        Commands::List => commands::list::run(&ctx()),
        Commands::Face(args) => commands::face::run(args),
    }
}

/// Environment configuration with command-line flags on top
fn config(cli: &Cli) -> Config {
    let mut config = Config::from_env();
    config.font_dirs.extend(cli.font_dirs.iter().cloned());
    if cli.no_system_fonts {
        config.load_system_fonts = false;
    }
    config
}
