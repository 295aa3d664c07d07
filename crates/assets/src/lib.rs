//! Filesystem-backed asset lookup for the GPU object layer.
//!
//! [`AssetDir`] roots the two asset conventions the renderer consumes:
//! shader source text under `shaders/<name>.<stage extension>` and texture
//! images under `textures/<file name>`, decoded to tightly-packed RGBA8.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gpu::{ShaderSources, ShaderStage};
use thiserror::Error;

/// Errors raised while reading or decoding assets.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("asset '{path}' could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("image '{path}' could not be decoded: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Decoded pixel data ready for [`gpu::GpuTexture::create`].
#[derive(Clone, Debug)]
pub struct ImagePixels {
    pub width: u32,
    pub height: u32,
    /// Tightly-packed RGBA8 rows, top to bottom.
    pub data: Vec<u8>,
}

/// An asset directory on disk.
#[derive(Clone, Debug)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a shader's source is expected at, derived from its logical name
    /// and the compiled stage's conventional suffix.
    pub fn shader_path(&self, name: &str, stage: ShaderStage) -> PathBuf {
        self.root
            .join("shaders")
            .join(format!("{name}.{}", stage.file_extension()))
    }

    /// Read and decode `textures/<file_name>` into RGBA8 pixels.
    ///
    /// Any channel layout the decoder understands is widened to four
    /// channels, matching the default texture config.
    pub fn load_image(&self, file_name: &str) -> Result<ImagePixels, AssetError> {
        let path = self.root.join("textures").join(file_name);
        let bytes = fs::read(&path).map_err(|source| AssetError::Io {
            path: path.clone(),
            source,
        })?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|source| AssetError::Decode { path, source })?;
        let rgba = decoded.to_rgba8();

        Ok(ImagePixels {
            width: rgba.width(),
            height: rgba.height(),
            data: rgba.into_raw(),
        })
    }
}

impl ShaderSources for AssetDir {
    fn source(&self, name: &str, stage: ShaderStage) -> io::Result<String> {
        fs::read_to_string(self.shader_path(name, stage))
    }
}
