//! Objectsheet command implementation.
//!
//! Cooks a single `.tsx` image-collection tileset into a packed sheet.

use std::path::PathBuf;

use clap::Args;

use crate::cook;
use crate::error::Result;
use crate::output::{display_path, Printer};
use crate::tools::{TexturePackerCli, TiledCli};

/// Cook a single objectsheet
#[derive(Args, Debug)]
pub struct ObjectsheetArgs {
    /// Tileset file to cook (.tsx)
    pub file: PathBuf,

    /// Export tree root
    #[arg(long, short, default_value = "build/assets")]
    pub output: PathBuf,

    /// Tiled executable
    #[arg(long, default_value = "tiled")]
    pub tiled: PathBuf,

    /// TexturePacker executable
    #[arg(long, default_value = "TexturePacker")]
    pub packer: PathBuf,
}

pub fn run(args: ObjectsheetArgs, printer: &Printer) -> Result<()> {
    super::tilemap::ensure_output(&args.output)?;

    printer.status("Cooking", &display_path(&args.file));
    let output = cook::objectsheet::cook(
        &args.file,
        &args.output,
        &TiledCli::new(&args.tiled),
        &TexturePackerCli::new(&args.packer),
    )?;
    printer.success("Finished", &display_path(&output));

    Ok(())
}
