use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for cooker operations.
///
/// Every variant is fatal to the current file's pipeline: a document is
/// either fully normalized and written, or not written at all.
#[derive(Error, Diagnostic, Debug)]
pub enum CookError {
    #[error("IO error: {0}")]
    #[diagnostic(code(cooker::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(cooker::io))]
    Io { path: PathBuf, message: String },

    #[error("parse error in {path}: {message}")]
    #[diagnostic(code(cooker::parse))]
    Parse { path: PathBuf, message: String },

    #[error("expected a {expected} document, found `{found}`")]
    #[diagnostic(code(cooker::format))]
    InvalidDocumentFormat {
        expected: &'static str,
        found: String,
    },

    #[error("ellipse is {width}x{height}: only circular ellipses are supported")]
    #[diagnostic(
        code(cooker::shape),
        help("resize the ellipse so width and height match")
    )]
    ShapeMismatch { width: f64, height: f64 },

    #[error("polygon has {count} vertices (maximum is 8)")]
    #[diagnostic(code(cooker::shape))]
    TooManyVertices { count: usize },

    #[error("unsupported object shape: {kind}")]
    #[diagnostic(code(cooker::shape))]
    UnsupportedShape { kind: &'static str },

    #[error("property `{name}` has no matching entry in propertytypes")]
    #[diagnostic(code(cooker::property))]
    PropertyTypeMismatch { name: String },

    #[error("property entry is missing required field `{field}`")]
    #[diagnostic(code(cooker::property))]
    InvalidPropertyFormat { field: &'static str },

    #[error("layer `{layer}` references tiles from more than one tileset")]
    #[diagnostic(
        code(cooker::gid),
        help("split the layer so each layer only uses a single tileset")
    )]
    MultiTilesetReference { layer: String },

    #[error("chunk size {found:?} does not match {expected:?}")]
    #[diagnostic(code(cooker::grid))]
    ChunkSizeMismatch {
        expected: (i64, i64),
        found: (i64, i64),
    },

    #[error("object_types property must be of type `file`, found `{found}`")]
    #[diagnostic(code(cooker::property))]
    InvalidObjectTypesProperty { found: String },

    #[error("{tool} exited with code {code}")]
    #[diagnostic(code(cooker::tool))]
    ExternalToolFailure { tool: String, code: i32 },

    #[error("unknown {tool} option: {option}")]
    #[diagnostic(code(cooker::tool))]
    UnknownToolOption { tool: String, option: String },

    #[error("cannot find input file: {path}")]
    #[diagnostic(code(cooker::missing))]
    MissingInput { path: PathBuf },

    #[error("cannot find output directory: {path}")]
    #[diagnostic(code(cooker::missing))]
    MissingOutputDirectory { path: PathBuf },

    #[error("{failed} of {total} asset(s) failed to cook")]
    #[diagnostic(code(cooker::cook))]
    CookFailed { failed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, CookError>;
