//! Tilemap command implementation.
//!
//! Cooks a single `.tmx` map, bypassing discovery and freshness.

use std::path::PathBuf;

use clap::Args;

use crate::cook;
use crate::error::{CookError, Result};
use crate::output::{display_path, Printer};
use crate::tools::TiledCli;

/// Cook a single tilemap
#[derive(Args, Debug)]
pub struct TilemapArgs {
    /// Map file to cook (.tmx)
    pub file: PathBuf,

    /// Export tree root
    #[arg(long, short, default_value = "build/assets")]
    pub output: PathBuf,

    /// Tiled executable
    #[arg(long, default_value = "tiled")]
    pub tiled: PathBuf,
}

pub fn run(args: TilemapArgs, printer: &Printer) -> Result<()> {
    ensure_output(&args.output)?;

    printer.status("Cooking", &display_path(&args.file));
    let output = cook::tilemap::cook(&args.file, &args.output, &TiledCli::new(&args.tiled))?;
    printer.success("Finished", &display_path(&output));

    Ok(())
}

pub(super) fn ensure_output(output: &std::path::Path) -> Result<()> {
    std::fs::create_dir_all(output).map_err(|e| CookError::Io {
        path: output.to_path_buf(),
        message: format!("failed to create output directory: {}", e),
    })
}
