//! Project manifest (cooker.yaml) parsing.
//!
//! The manifest defines project configuration: import/export roots, paths to
//! the external tools, the optional final pack step, and pinned asset lists
//! for files discovery would miss.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CookError, Result};

/// Project manifest loaded from cooker.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Root directory scanned for source assets.
    #[serde(default = "default_import")]
    pub import: PathBuf,

    /// Root of the export tree.
    #[serde(default = "default_export")]
    pub export: PathBuf,

    /// External tool executables.
    pub tools: Tools,

    /// Final pack step run after cooking, if configured.
    pub packer: Option<Packer>,

    /// Pinned tilemap sources, cooked in addition to discovered ones.
    pub tilemaps: Vec<PathBuf>,

    /// Pinned tileset sources.
    pub tilesets: Vec<PathBuf>,

    /// Pinned objectsheet sources.
    pub objectsheets: Vec<PathBuf>,

    /// Pinned animation sources.
    pub animations: Vec<PathBuf>,

    /// Patterns to exclude from discovery.
    pub excludes: Vec<String>,
}

/// Paths to the external collaborator executables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tools {
    pub tiled: PathBuf,
    pub texture_packer: PathBuf,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            tiled: PathBuf::from("tiled"),
            texture_packer: PathBuf::from("TexturePacker"),
        }
    }
}

/// The game-side packer that folds the export tree into one archive.
///
/// Its data file doubles as the freshness anchor: a source older than the
/// archive needs no recook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Packer {
    pub executable: PathBuf,
    pub data_file: PathBuf,
}

fn default_import() -> PathBuf {
    PathBuf::from(".")
}

fn default_export() -> PathBuf {
    PathBuf::from("build/assets")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            import: default_import(),
            export: default_export(),
            tools: Tools::default(),
            packer: None,
            tilemaps: vec![],
            tilesets: vec![],
            objectsheets: vec![],
            animations: vec![],
            excludes: vec![],
        }
    }
}

impl Manifest {
    /// Load manifest from a cooker.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CookError::Io {
            path: path.to_path_buf(),
            message: format!("failed to read manifest: {}", e),
        })?;

        Self::parse(&content).map_err(|e| match e {
            CookError::Parse { message, .. } => CookError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| CookError::Parse {
            path: PathBuf::from("cooker.yaml"),
            message: format!("invalid manifest: {}", e),
        })
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        self.excludes
            .iter()
            .any(|pattern| Self::matches_pattern(&path_str, pattern))
    }

    /// Simple glob pattern matching.
    fn matches_pattern(path: &str, pattern: &str) -> bool {
        if let Some(suffix) = pattern.strip_prefix("**/") {
            if let Some(dir) = suffix.strip_suffix("/*") {
                // **/dir/* matches anything inside dir anywhere in the path
                return path.contains(&format!("{}/", dir))
                    || path.contains(&format!("/{}/", dir))
                    || path.starts_with(&format!("{}/", dir));
            }
            return path.contains(suffix) || path.ends_with(suffix);
        }

        if pattern.starts_with('*') && !pattern.contains('/') {
            // Match file extension or suffix
            return path.ends_with(&pattern[1..]);
        }

        if let Some(prefix) = pattern.strip_suffix("/*") {
            // Match directory contents
            return path.starts_with(&format!("{}/", prefix))
                || path.contains(&format!("/{}/", prefix));
        }

        // Exact match or contains
        path.contains(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest = Manifest::parse("export: build").unwrap();

        assert_eq!(manifest.export, PathBuf::from("build"));
        assert_eq!(manifest.import, PathBuf::from("."));
        assert_eq!(manifest.tools.tiled, PathBuf::from("tiled"));
        assert!(manifest.packer.is_none());
        assert!(manifest.tilemaps.is_empty());
    }

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r#"
import: assets
export: build/assets
tools:
  tiled: /opt/tiled/bin/tiled
  texture_packer: /usr/local/bin/TexturePacker
packer:
  executable: tools/pack.sh
  data_file: build/game.pack
tilemaps:
  - assets/maps/overworld.tmx
excludes:
  - "*.bak"
  - "**/wip/*"
"#;
        let manifest = Manifest::parse(yaml).unwrap();

        assert_eq!(manifest.import, PathBuf::from("assets"));
        assert_eq!(manifest.tools.tiled, PathBuf::from("/opt/tiled/bin/tiled"));
        let packer = manifest.packer.unwrap();
        assert_eq!(packer.data_file, PathBuf::from("build/game.pack"));
        assert_eq!(
            manifest.tilemaps,
            vec![PathBuf::from("assets/maps/overworld.tmx")]
        );
        assert_eq!(manifest.excludes, vec!["*.bak", "**/wip/*"]);
    }

    #[test]
    fn test_parse_empty_manifest_uses_defaults() {
        let manifest = Manifest::parse("").unwrap();

        assert_eq!(manifest.export, PathBuf::from("build/assets"));
        assert_eq!(
            manifest.tools.texture_packer,
            PathBuf::from("TexturePacker")
        );
    }

    #[test]
    fn test_parse_malformed_manifest() {
        let result = Manifest::parse("import: [unterminated");

        assert!(matches!(result, Err(CookError::Parse { .. })));
    }

    #[test]
    fn test_is_excluded_extension() {
        let manifest = Manifest {
            excludes: vec!["*.bak".to_string()],
            ..Default::default()
        };

        assert!(manifest.is_excluded(Path::new("map.tmx.bak")));
        assert!(manifest.is_excluded(Path::new("path/to/map.tmx.bak")));
        assert!(!manifest.is_excluded(Path::new("map.tmx")));
    }

    #[test]
    fn test_is_excluded_directory() {
        let manifest = Manifest {
            excludes: vec!["**/wip/*".to_string()],
            ..Default::default()
        };

        assert!(manifest.is_excluded(Path::new("wip/cave.tmx")));
        assert!(manifest.is_excluded(Path::new("maps/wip/cave.tmx")));
        assert!(!manifest.is_excluded(Path::new("maps/cave.tmx")));
    }

    #[test]
    fn test_is_excluded_exact() {
        let manifest = Manifest {
            excludes: vec!["scratch".to_string()],
            ..Default::default()
        };

        assert!(manifest.is_excluded(Path::new("scratch")));
        assert!(manifest.is_excluded(Path::new("maps/scratch/a.tmx")));
    }
}
