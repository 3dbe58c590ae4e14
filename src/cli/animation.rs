//! Animation command implementation.
//!
//! Cooks a single `.tps` packer project into a spritesheet.

use std::path::PathBuf;

use clap::Args;

use crate::cook;
use crate::error::Result;
use crate::output::{display_path, Printer};
use crate::tools::TexturePackerCli;

/// Cook a single animation sheet
#[derive(Args, Debug)]
pub struct AnimationArgs {
    /// Packer project to cook (.tps)
    pub file: PathBuf,

    /// Export tree root
    #[arg(long, short, default_value = "build/assets")]
    pub output: PathBuf,

    /// TexturePacker executable
    #[arg(long, default_value = "TexturePacker")]
    pub packer: PathBuf,
}

pub fn run(args: AnimationArgs, printer: &Printer) -> Result<()> {
    super::tilemap::ensure_output(&args.output)?;

    printer.status("Cooking", &display_path(&args.file));
    let output = cook::animation::cook(&args.file, &args.output, &TexturePackerCli::new(&args.packer))?;
    printer.success("Finished", &display_path(&output));

    Ok(())
}
