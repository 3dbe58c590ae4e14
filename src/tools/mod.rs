//! Typed wrappers around the external collaborator executables.
//!
//! The cooker never interprets a shell string: every invocation is built as
//! an argument vector and waited on synchronously. A non-zero exit status
//! from any tool is fatal for the file being cooked.

mod packer;
mod tiled;

pub use packer::{PackRequest, TexturePackerCli};
pub use tiled::TiledCli;

use std::process::Command;

use crate::error::{CookError, Result};

/// Spawn a prepared command and wait for it to exit.
pub(crate) fn run_checked(mut cmd: Command, tool: &str) -> Result<()> {
    let status = cmd.status().map_err(|e| CookError::Io {
        path: cmd.get_program().into(),
        message: format!("failed to launch {}: {}", tool, e),
    })?;

    if !status.success() {
        return Err(CookError::ExternalToolFailure {
            tool: tool.to_string(),
            code: status.code().unwrap_or(-1),
        });
    }

    Ok(())
}
