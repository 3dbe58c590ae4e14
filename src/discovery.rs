//! File system scanner for discovering cookable assets.
//!
//! Recursively scans the import tree and categorizes files by extension
//! (`.tmx`, `.tsx`, `.tileset.json`, `.tps`).

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::manifest::Manifest;

/// The asset kinds the cooker knows how to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// A `.tmx` map.
    Tilemap,
    /// A `.tileset.json` single-image tileset.
    Tileset,
    /// A `.tsx` image-collection tileset.
    Objectsheet,
    /// A `.tps` packer project.
    Animation,
}

impl AssetKind {
    pub fn name(&self) -> &'static str {
        match self {
            AssetKind::Tilemap => "tilemap",
            AssetKind::Tileset => "tileset",
            AssetKind::Objectsheet => "objectsheet",
            AssetKind::Animation => "animation",
        }
    }
}

/// Result of scanning a directory for assets.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Discovered map files.
    pub tilemaps: Vec<PathBuf>,
    /// Discovered single-image tileset files.
    pub tilesets: Vec<PathBuf>,
    /// Discovered image-collection tileset files.
    pub objectsheets: Vec<PathBuf>,
    /// Discovered packer project files.
    pub animations: Vec<PathBuf>,
}

impl ScanResult {
    /// Create a new empty scan result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of discovered files.
    pub fn total(&self) -> usize {
        self.tilemaps.len() + self.tilesets.len() + self.objectsheets.len() + self.animations.len()
    }

    /// Check if no files were discovered.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Get files of a specific asset kind.
    pub fn files_of_kind(&self, kind: AssetKind) -> &[PathBuf] {
        match kind {
            AssetKind::Tilemap => &self.tilemaps,
            AssetKind::Tileset => &self.tilesets,
            AssetKind::Objectsheet => &self.objectsheets,
            AssetKind::Animation => &self.animations,
        }
    }

    /// Merge another scan result into this one.
    pub fn merge(&mut self, other: ScanResult) {
        self.tilemaps.extend(other.tilemaps);
        self.tilesets.extend(other.tilesets);
        self.objectsheets.extend(other.objectsheets);
        self.animations.extend(other.animations);
    }

    fn push(&mut self, kind: AssetKind, path: PathBuf) {
        match kind {
            AssetKind::Tilemap => self.tilemaps.push(path),
            AssetKind::Tileset => self.tilesets.push(path),
            AssetKind::Objectsheet => self.objectsheets.push(path),
            AssetKind::Animation => self.animations.push(path),
        }
    }
}

/// Scan a directory for cookable asset files.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.exists() {
        return result;
    }

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if path.is_dir() {
            continue;
        }

        if manifest.is_excluded(path) {
            continue;
        }

        if let Some(kind) = detect_asset_kind(path) {
            result.push(kind, path.to_path_buf());
        }
    }

    // pinned manifest entries come last so explicit order wins ties
    for (kind, pinned) in [
        (AssetKind::Tilemap, &manifest.tilemaps),
        (AssetKind::Tileset, &manifest.tilesets),
        (AssetKind::Objectsheet, &manifest.objectsheets),
        (AssetKind::Animation, &manifest.animations),
    ] {
        for path in pinned {
            if !result.files_of_kind(kind).contains(path) {
                result.push(kind, path.clone());
            }
        }
    }

    result
}

/// Detect the asset kind from a file path based on its extension.
pub fn detect_asset_kind(path: &Path) -> Option<AssetKind> {
    let filename = path.file_name()?.to_str()?;

    if filename.ends_with(".tmx") {
        Some(AssetKind::Tilemap)
    } else if filename.ends_with(".tileset.json") {
        Some(AssetKind::Tileset)
    } else if filename.ends_with(".tsx") {
        Some(AssetKind::Objectsheet)
    } else if filename.ends_with(".tps") {
        Some(AssetKind::Animation)
    } else {
        None
    }
}
