//! Tiled map editor command line wrapper.
//!
//! Contract: `tiled --export-map json <src> <dst>` (and `--export-tileset`
//! for tilesets) exits 0 on success; any other exit code is fatal.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::Result;

use super::run_checked;

/// Handle to the Tiled executable.
#[derive(Debug, Clone)]
pub struct TiledCli {
    path: PathBuf,
}

impl TiledCli {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Export a `.tmx` map to JSON.
    pub fn export_map(&self, source: &Path, dest: &Path) -> Result<()> {
        self.export("--export-map", source, dest)
    }

    /// Export a `.tsx` tileset to JSON.
    pub fn export_tileset(&self, source: &Path, dest: &Path) -> Result<()> {
        self.export("--export-tileset", source, dest)
    }

    fn export(&self, flag: &str, source: &Path, dest: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.path);
        cmd.arg(flag).arg("json").arg(source).arg(dest);
        run_checked(cmd, "tiled")
    }
}
