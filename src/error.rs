//! Error types for texture loading and clip selection.
//!
//! Only the fatal tier surfaces here: an image that cannot be decoded or a
//! shader that cannot be compiled means a broken asset reference, and the
//! owner (the viewer binary) treats it as unrecoverable. Manifest problems
//! never become errors; they degrade to an empty clip list and are logged.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextureError {
    /// The image file could not be read or decoded.
    #[error("Failed to decode image {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    /// The shader source was rejected by the backend.
    #[error("Failed to compile shader: {0}")]
    ShaderCompile(String),

    /// A clip index outside the texture's clip list was requested.
    #[error("Clip index {index} out of range ({count} clips)")]
    ClipOutOfRange { index: usize, count: usize },
}

/// Alias used across the crate.
pub type Result<T> = std::result::Result<T, TextureError>;
