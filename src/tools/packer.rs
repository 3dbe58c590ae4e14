//! TexturePacker command line wrapper.
//!
//! Builds the flag set for a sheet+data publish as an argument vector and
//! validates every flag against the known option table before spawning, so a
//! typo never reaches the tool as a stray file argument.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{CookError, Result};

use super::run_checked;

/// TexturePacker options the cooker is allowed to emit.
const KNOWN_FLAGS: &[&str] = &[
    "--force-publish",
    "--sheet",
    "--format",
    "--data",
    "--texturepath",
    "--trim-sprite-names",
    "--prepend-folder-name",
    "--replace",
    "--algorithm",
    "--trim-mode",
    "--extrude",
    "--padding",
    "--enable-rotation",
    "--disable-rotation",
];

/// One sheet+data publish.
#[derive(Debug)]
pub struct PackRequest {
    /// Texture file to write.
    pub sheet: PathBuf,
    /// JSON-array data file to write.
    pub data: PathBuf,
    /// `texturepath` recorded in the data file's meta block.
    pub texture_path: String,
    /// Replace path separators in frame names with underscores
    /// (animation sheets key frames by flattened name).
    pub flatten_names: bool,
    /// Image files or `.tps` projects to pack.
    pub inputs: Vec<PathBuf>,
}

impl PackRequest {
    fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();

        // force write even when the tool considers the sheet unchanged; the
        // cooker owns the freshness decision
        args.push("--force-publish".into());
        args.push("--sheet".into());
        args.push(self.sheet.clone().into());

        args.push("--format".into());
        args.push("json-array".into());
        args.push("--data".into());
        args.push(self.data.clone().into());
        args.push("--texturepath".into());
        args.push(self.texture_path.clone().into());

        // frame naming: strip extensions, keep folder context
        args.push("--trim-sprite-names".into());
        args.push("--prepend-folder-name".into());
        if self.flatten_names {
            args.push("--replace".into());
            args.push(r"[\/]=_".into());
        }

        args.push("--algorithm".into());
        args.push("MaxRects".into());
        args.push("--trim-mode".into());
        args.push("Trim".into());
        args.push("--extrude".into());
        args.push("0".into());
        args.push("--padding".into());
        args.push("2".into());

        for input in &self.inputs {
            args.push(input.clone().into());
        }

        args
    }
}

/// Handle to the TexturePacker executable.
#[derive(Debug, Clone)]
pub struct TexturePackerCli {
    path: PathBuf,
}

impl TexturePackerCli {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Publish one sheet and data file.
    pub fn pack(&self, request: &PackRequest) -> Result<()> {
        let args = request.to_args();
        validate_args(&args)?;

        let mut cmd = Command::new(&self.path);
        cmd.args(&args);
        run_checked(cmd, "TexturePacker")
    }
}

/// Reject any long option missing from [`KNOWN_FLAGS`].
fn validate_args(args: &[OsString]) -> Result<()> {
    for arg in args {
        let Some(arg) = arg.to_str() else { continue };
        if arg.starts_with("--") && !KNOWN_FLAGS.contains(&arg) {
            return Err(CookError::UnknownToolOption {
                tool: "TexturePacker".to_string(),
                option: arg.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PackRequest {
        PackRequest {
            sheet: PathBuf::from("out/images/npcs.png"),
            data: PathBuf::from("out/spritesheets/npcs.json"),
            texture_path: "../images".to_string(),
            flatten_names: false,
            inputs: vec![PathBuf::from("npcs/duck.png")],
        }
    }

    #[test]
    fn test_args_are_schema_clean() {
        let args = request().to_args();
        validate_args(&args).unwrap();
    }

    #[test]
    fn test_inputs_follow_flags() {
        let args = request().to_args();
        assert_eq!(args.last().unwrap(), Path::new("npcs/duck.png"));
    }

    #[test]
    fn test_flatten_names_adds_replace() {
        let mut req = request();
        let without = req.to_args();
        req.flatten_names = true;
        let with = req.to_args();

        assert!(!without.iter().any(|a| a == "--replace"));
        assert!(with.iter().any(|a| a == "--replace"));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let args = vec![OsString::from("--multipack")];
        let result = validate_args(&args);

        assert!(matches!(
            result,
            Err(CookError::UnknownToolOption { option, .. }) if option == "--multipack"
        ));
    }

    #[test]
    fn test_nonzero_exit_is_tool_failure() {
        let packer = TexturePackerCli::new("false");
        let result = packer.pack(&request());

        assert!(matches!(
            result,
            Err(CookError::ExternalToolFailure { code: 1, .. })
        ));
    }
}
