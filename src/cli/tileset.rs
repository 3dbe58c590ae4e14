//! Tileset command implementation.
//!
//! Cooks a single `.tileset.json` single-image tileset.

use std::path::PathBuf;

use clap::Args;

use crate::cook;
use crate::error::Result;
use crate::output::{display_path, Printer};

/// Cook a single tileset
#[derive(Args, Debug)]
pub struct TilesetArgs {
    /// Tileset file to cook (.tileset.json)
    pub file: PathBuf,

    /// Export tree root
    #[arg(long, short, default_value = "build/assets")]
    pub output: PathBuf,
}

pub fn run(args: TilesetArgs, printer: &Printer) -> Result<()> {
    super::tilemap::ensure_output(&args.output)?;

    printer.status("Cooking", &display_path(&args.file));
    let output = cook::tileset::cook(&args.file, &args.output)?;
    printer.success("Finished", &display_path(&output));

    Ok(())
}
