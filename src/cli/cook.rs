//! Cook command implementation.
//!
//! The incremental coordinator: discovers every cookable source under the
//! manifest's import root, cooks the stale ones, and optionally runs the
//! project's final pack step when anything actually changed. One failing
//! asset never stops its siblings; failures are tallied and reported at the
//! end.

use std::path::{Path, PathBuf};
use std::process::Command;

use clap::Args;

use crate::cook::{self, asset_stem, SPRITESHEET_DIR, TILEMAP_DIR, TILESET_DIR};
use crate::discovery::{scan_directory, AssetKind};
use crate::error::{CookError, Result};
use crate::freshness::{file_stem, is_stale};
use crate::manifest::Manifest;
use crate::output::{display_path, plural, Printer};
use crate::tools::{run_checked, TexturePackerCli, TiledCli};

/// Cook every stale asset in the project
#[derive(Args, Debug)]
pub struct CookArgs {
    /// Project manifest
    #[arg(long, short, default_value = "cooker.yaml")]
    pub manifest: PathBuf,

    /// Run the final pack step after cooking
    #[arg(long)]
    pub pack: bool,

    /// Cook everything, ignoring freshness
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: CookArgs, printer: &Printer) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;
    let scan = scan_directory(&manifest.import, &manifest);

    if scan.is_empty() {
        printer.warning(
            "Nothing",
            &format!("to cook under {}", display_path(&manifest.import)),
        );
        return Ok(());
    }

    std::fs::create_dir_all(&manifest.export).map_err(|e| CookError::Io {
        path: manifest.export.clone(),
        message: format!("failed to create export directory: {}", e),
    })?;

    let tiled = TiledCli::new(&manifest.tools.tiled);
    let packer = TexturePackerCli::new(&manifest.tools.texture_packer);

    let total = scan.total();
    let mut cooked = 0;
    let mut failed = 0;

    for kind in [
        AssetKind::Tileset,
        AssetKind::Objectsheet,
        AssetKind::Animation,
        AssetKind::Tilemap,
    ] {
        for source in scan.files_of_kind(kind) {
            if !args.force && !is_stale(&freshness_anchor(&manifest, kind, source), &[source]) {
                printer.info("Fresh", &display_path(source));
                continue;
            }

            printer.status("Cooking", &display_path(source));
            let result = match kind {
                AssetKind::Tilemap => cook::tilemap::cook(source, &manifest.export, &tiled),
                AssetKind::Tileset => cook::tileset::cook(source, &manifest.export),
                AssetKind::Objectsheet => {
                    cook::objectsheet::cook(source, &manifest.export, &tiled, &packer)
                }
                AssetKind::Animation => cook::animation::cook(source, &manifest.export, &packer),
            };

            match result {
                Ok(_) => cooked += 1,
                Err(e) => {
                    printer.error("Failed", &format!("{}: {}", display_path(source), e));
                    failed += 1;
                }
            }
        }
    }

    if failed > 0 {
        return Err(CookError::CookFailed { failed, total });
    }

    printer.success(
        "Finished",
        &format!(
            "{} cooked, {} fresh",
            plural(cooked, "asset", "assets"),
            total - cooked
        ),
    );

    if args.pack {
        run_pack_step(&manifest, cooked, printer)?;
    }

    Ok(())
}

/// The output file whose timestamp gates recooking of `source`.
///
/// When a final pack step is configured its archive anchors everything: a
/// source older than the archive is already packed. Without one, each asset
/// is gated on its own cooked document.
pub(super) fn freshness_anchor(manifest: &Manifest, kind: AssetKind, source: &Path) -> PathBuf {
    if let Some(packer) = &manifest.packer {
        return packer.data_file.clone();
    }

    match kind {
        AssetKind::Tilemap => manifest
            .export
            .join(TILEMAP_DIR)
            .join(format!("{}.json", file_stem(source))),
        AssetKind::Tileset => manifest
            .export
            .join(TILESET_DIR)
            .join(format!("{}.json", asset_stem(source))),
        AssetKind::Objectsheet | AssetKind::Animation => manifest
            .export
            .join(SPRITESHEET_DIR)
            .join(format!("{}.json", file_stem(source))),
    }
}

/// Run the configured pack step, but only when something was cooked.
fn run_pack_step(manifest: &Manifest, cooked: usize, printer: &Printer) -> Result<()> {
    let Some(packer) = &manifest.packer else {
        printer.warning("Skipping", "pack step: no packer configured in manifest");
        return Ok(());
    };

    if cooked == 0 {
        printer.info("Fresh", &display_path(&packer.data_file));
        return Ok(());
    }

    if let Some(parent) = packer.data_file.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CookError::Io {
            path: parent.to_path_buf(),
            message: format!("failed to create directory: {}", e),
        })?;
    }

    printer.status("Packing", &display_path(&packer.data_file));
    let mut cmd = Command::new(&packer.executable);
    cmd.arg(&packer.data_file).arg(&manifest.export);
    run_checked(cmd, "packer")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Packer;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_anchor_is_pack_archive_when_configured() {
        let manifest = Manifest {
            packer: Some(Packer {
                executable: PathBuf::from("pack.sh"),
                data_file: PathBuf::from("build/game.pack"),
            }),
            ..Default::default()
        };

        let anchor = freshness_anchor(&manifest, AssetKind::Tilemap, Path::new("a.tmx"));
        assert_eq!(anchor, PathBuf::from("build/game.pack"));
    }

    #[test]
    fn test_anchor_is_cooked_document_otherwise() {
        let manifest = Manifest {
            export: PathBuf::from("out"),
            ..Default::default()
        };

        assert_eq!(
            freshness_anchor(&manifest, AssetKind::Tilemap, Path::new("maps/overworld.tmx")),
            PathBuf::from("out/tilemaps/overworld.json")
        );
        assert_eq!(
            freshness_anchor(
                &manifest,
                AssetKind::Tileset,
                Path::new("terrain.tileset.json")
            ),
            PathBuf::from("out/tilesets/terrain.json")
        );
        assert_eq!(
            freshness_anchor(&manifest, AssetKind::Animation, Path::new("duck.tps")),
            PathBuf::from("out/spritesheets/duck.json")
        );
    }

    #[test]
    fn test_run_with_empty_project() {
        let dir = tempdir().unwrap();
        let manifest_path = dir.path().join("cooker.yaml");
        fs::write(
            &manifest_path,
            format!("import: {}\n", dir.path().join("assets").display()),
        )
        .unwrap();

        let args = CookArgs {
            manifest: manifest_path,
            pack: false,
            force: false,
        };

        run(args, &Printer::new()).unwrap();
    }

    #[test]
    fn test_run_missing_manifest() {
        let dir = tempdir().unwrap();
        let args = CookArgs {
            manifest: dir.path().join("cooker.yaml"),
            pack: false,
            force: false,
        };

        let result = run(args, &Printer::new());
        assert!(matches!(result, Err(CookError::Io { .. })));
    }

    #[test]
    fn test_run_reports_failed_assets() {
        let dir = tempdir().unwrap();
        let assets = dir.path().join("assets");
        fs::create_dir_all(&assets).unwrap();
        // a map that needs the editor, which points at `false` here
        fs::write(assets.join("broken.tmx"), "<map/>").unwrap();

        let manifest_path = dir.path().join("cooker.yaml");
        fs::write(
            &manifest_path,
            format!(
                "import: {}\nexport: {}\ntools:\n  tiled: false\n",
                assets.display(),
                dir.path().join("export").display()
            ),
        )
        .unwrap();

        let args = CookArgs {
            manifest: manifest_path,
            pack: false,
            force: false,
        };

        let result = run(args, &Printer::new());
        assert!(matches!(
            result,
            Err(CookError::CookFailed {
                failed: 1,
                total: 1
            })
        ));
    }
}
