//! Animation cooker (packer projects).
//!
//! A `.tps` project owns its own frame list, so the cooker's job is mostly
//! delegation: publish the sheet with flattened frame names, then fold an
//! optional sibling `<stem>.anim.json` document into the sheet data after
//! checking that every animation step references a frame the packer actually
//! produced.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CookError, Result};
use crate::freshness::{ensure_subdir, existing_dir, existing_file, file_stem};
use crate::tools::{PackRequest, TexturePackerCli};

use super::sheet::{Animation, SheetDoc};
use super::{read_json, write_pretty_json, IMAGE_DIR, SPRITESHEET_DIR};

/// Sibling animation description document.
#[derive(Debug, Deserialize)]
struct AnimDoc {
    animations: BTreeMap<String, Animation>,
}

/// Fold animations into a packed sheet, validating frame references.
pub fn attach_animations(
    document: &mut SheetDoc,
    animations: BTreeMap<String, Animation>,
    origin: &Path,
) -> Result<()> {
    for (name, animation) in &animations {
        for step in &animation.frames {
            if !document.frames.iter().any(|frame| frame.filename == step.name) {
                return Err(CookError::Parse {
                    path: origin.to_path_buf(),
                    message: format!(
                        "animation `{}` references unknown frame `{}`",
                        name, step.name
                    ),
                });
            }
        }
    }

    document.animations = Some(animations);
    Ok(())
}

/// Cook one `.tps` project into `export/spritesheets/<stem>.json` plus a
/// packed texture under `export/images/`.
pub fn cook(source: &Path, export_dir: &Path, packer: &TexturePackerCli) -> Result<PathBuf> {
    existing_file(source)?;
    existing_dir(export_dir)?;
    let image_dir = ensure_subdir(export_dir, IMAGE_DIR)?;
    let sheet_dir = ensure_subdir(export_dir, SPRITESHEET_DIR)?;

    let stem = file_stem(source);
    let data = sheet_dir.join(format!("{}.json", stem));
    packer.pack(&PackRequest {
        sheet: image_dir.join(format!("{}.png", stem)),
        data: data.clone(),
        texture_path: format!("../{}", IMAGE_DIR),
        flatten_names: true,
        inputs: vec![source.to_path_buf()],
    })?;

    let mut document: SheetDoc = read_json(&data)?;
    document
        .meta
        .insert("sheet_type".to_string(), "spritesheet".into());

    let source_dir = source.parent().unwrap_or_else(|| Path::new("."));
    let anim_path = source_dir.join(format!("{}.anim.json", stem));
    if anim_path.is_file() {
        let anim: AnimDoc = read_json(&anim_path)?;
        attach_animations(&mut document, anim.animations, &anim_path)?;
    }

    write_pretty_json(&data, &document)?;
    Ok(data)
}
