//! List command implementation.
//!
//! Discovers assets and prints an organized inventory, marking the ones that
//! would be recooked by `cook`.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::{scan_directory, AssetKind};
use crate::error::Result;
use crate::freshness::is_stale;
use crate::manifest::Manifest;
use crate::output::{display_path, plural, Printer};

/// List discovered assets
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Project manifest
    #[arg(long, short, default_value = "cooker.yaml")]
    pub manifest: PathBuf,

    /// Directory to scan (default: the manifest's import root)
    pub path: Option<PathBuf>,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let manifest = if args.manifest.is_file() {
        Manifest::load(&args.manifest)?
    } else {
        Manifest::default()
    };

    let root = args.path.unwrap_or_else(|| manifest.import.clone());
    let scan = scan_directory(&root, &manifest);

    if scan.is_empty() {
        printer.warning("Nothing", &format!("found under {}", display_path(&root)));
        return Ok(());
    }

    let groups: &[(&str, AssetKind)] = &[
        ("Tilemaps", AssetKind::Tilemap),
        ("Tilesets", AssetKind::Tileset),
        ("Objectsheets", AssetKind::Objectsheet),
        ("Animations", AssetKind::Animation),
    ];

    let mut stale = 0;
    for (label, kind) in groups {
        let files = scan.files_of_kind(*kind);
        if files.is_empty() {
            continue;
        }

        let names: Vec<String> = files
            .iter()
            .map(|path| {
                let anchor = super::cook::freshness_anchor(&manifest, *kind, path);
                if is_stale(&anchor, &[path]) {
                    stale += 1;
                    format!("{} {}", display_path(path), printer.dim("(stale)"))
                } else {
                    display_path(path)
                }
            })
            .collect();
        printer.info(label, &names.join(", "));
    }

    printer.success(
        "Found",
        &format!(
            "{}, {} stale",
            plural(scan.total(), "asset", "assets"),
            stale
        ),
    );

    Ok(())
}
