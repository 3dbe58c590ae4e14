use clap::Parser;
use cooker::cli::{Cli, Commands};
use cooker::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Cook(args) => cooker::cli::cook::run(args, &printer)?,
        Commands::Tilemap(args) => cooker::cli::tilemap::run(args, &printer)?,
        Commands::Tileset(args) => cooker::cli::tileset::run(args, &printer)?,
        Commands::Objectsheet(args) => cooker::cli::objectsheet::run(args, &printer)?,
        Commands::Animation(args) => cooker::cli::animation::run(args, &printer)?,
        Commands::List(args) => cooker::cli::list::run(args, &printer)?,
        Commands::Completions(args) => cooker::cli::completions::run(args)?,
    }

    Ok(())
}
