use std::path::PathBuf;

use crate::foundation::core::PixelRect;

/// Convenience result type used across texel.
pub type TexelResult<T> = Result<T, TexelError>;

/// Top-level error taxonomy used by texture, sprite and animation APIs.
#[derive(thiserror::Error, Debug)]
pub enum TexelError {
    /// Missing or malformed source image or font.
    #[error("decode error: '{}': {reason}", path.display())]
    Decode {
        /// Path of the source that failed to decode.
        path: PathBuf,
        /// Underlying decoder message.
        reason: String,
    },

    /// Text shaping or glyph rasterization failed.
    #[error("rasterize error: {0}")]
    Rasterize(String),

    /// Hardware resource creation/destruction failed, or a handle is unknown.
    #[error("device error: {0}")]
    Device(String),

    /// Operation attempted on a texture that holds no resource.
    #[error("not loaded: cannot {0} an empty texture")]
    NotLoaded(&'static str),

    /// Sprite index outside the sheet's clip catalog.
    #[error("index error: sprite index {index} out of range for {len} clips")]
    Index {
        /// Requested index.
        index: usize,
        /// Catalog length.
        len: usize,
    },

    /// Clip region lies (partly) outside the backing texture.
    #[error(
        "invalid region: clip {index} {region:?} exceeds texture bounds {width}x{height}"
    )]
    InvalidRegion {
        /// Position of the region in the catalog.
        index: usize,
        /// Offending region.
        region: PixelRect,
        /// Backing texture width.
        width: u32,
        /// Backing texture height.
        height: u32,
    },

    /// Invalid construction constants or options.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TexelError {
    /// Build a [`TexelError::Decode`] value.
    pub fn decode(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::Decode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`TexelError::Rasterize`] value.
    pub fn rasterize(msg: impl Into<String>) -> Self {
        Self::Rasterize(msg.into())
    }

    /// Build a [`TexelError::Device`] value.
    pub fn device(msg: impl Into<String>) -> Self {
        Self::Device(msg.into())
    }

    /// Build a [`TexelError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
