pub mod animation;
pub mod completions;
pub mod cook;
pub mod list;
pub mod objectsheet;
pub mod tilemap;
pub mod tileset;

use clap::{Parser, Subcommand};

/// cooker - Game asset build pipeline
#[derive(Parser, Debug)]
#[command(name = "cooker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cook every stale asset in the project
    Cook(cook::CookArgs),

    /// Cook a single tilemap
    Tilemap(tilemap::TilemapArgs),

    /// Cook a single tileset
    Tileset(tileset::TilesetArgs),

    /// Cook a single objectsheet
    Objectsheet(objectsheet::ObjectsheetArgs),

    /// Cook a single animation sheet
    Animation(animation::AnimationArgs),

    /// List discovered assets
    List(list::ListArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
