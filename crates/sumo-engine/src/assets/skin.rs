//! Decorative head skins.
//!
//! A skin is a PNG painted over a character's head. Skins never affect the
//! simulation, and every failure to load one is recoverable: the head is
//! simply drawn as a plain circle.

use std::path::{Path, PathBuf};

use crate::error::AssetError;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
/// Signature, IHDR length and tag, then width and height.
const PNG_HEADER_LEN: usize = 24;

/// A loaded head image. Pixel decoding is left to the renderer backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skin {
    /// Where the image came from, as given by the user.
    pub source: String,
    pub width: u32,
    pub height: u32,
    /// The encoded PNG bytes.
    pub data: Vec<u8>,
}

impl Skin {
    /// Validate encoded PNG bytes and read the image size from the header.
    pub fn from_png(source: impl Into<String>, data: Vec<u8>) -> Result<Self, AssetError> {
        let source = source.into();
        let (width, height) = match png_dimensions(&data) {
            Ok(size) => size,
            Err(PngHeaderError::Signature) => return Err(AssetError::NotPng(source)),
            Err(PngHeaderError::Truncated) => return Err(AssetError::Truncated(source)),
        };
        Ok(Self {
            source,
            width,
            height,
            data,
        })
    }
}

enum PngHeaderError {
    Signature,
    Truncated,
}

fn png_dimensions(data: &[u8]) -> Result<(u32, u32), PngHeaderError> {
    if !data.starts_with(&PNG_SIGNATURE) {
        return Err(PngHeaderError::Signature);
    }
    if data.len() < PNG_HEADER_LEN || &data[12..16] != b"IHDR" {
        return Err(PngHeaderError::Truncated);
    }
    let word = |at: usize| u32::from_be_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]]);
    let (width, height) = (word(16), word(20));
    if width == 0 || height == 0 {
        return Err(PngHeaderError::Truncated);
    }
    Ok((width, height))
}

/// Fetches skin images by source name.
pub trait AssetLoader {
    fn load(&self, source: &str) -> Result<Skin, AssetError>;
}

/// Loads skins from the local filesystem. Accepts plain paths and `file://` URIs.
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    root: Option<PathBuf>,
}

impl FileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `root` instead of the working directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, source: &str) -> Result<PathBuf, AssetError> {
        let path = match source.split_once("://") {
            Some(("file", rest)) => rest,
            Some((scheme, _)) => return Err(AssetError::UnsupportedScheme(scheme.to_string())),
            None => source,
        };
        let path = Path::new(path);
        Ok(match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        })
    }
}

impl AssetLoader for FileLoader {
    fn load(&self, source: &str) -> Result<Skin, AssetError> {
        let path = self.resolve(source)?;
        let data = std::fs::read(&path).map_err(|error| AssetError::Io {
            source_name: source.to_string(),
            error,
        })?;
        let skin = Skin::from_png(source, data)?;
        log::debug!("loaded skin {} ({}x{})", source, skin.width, skin.height);
        Ok(skin)
    }
}

/// Load an optional skin, logging and discarding any failure.
pub fn load_or_warn(loader: &dyn AssetLoader, source: Option<&str>) -> Option<Skin> {
    let source = source?;
    match loader.load(source) {
        Ok(skin) => Some(skin),
        Err(err) => {
            log::warn!("skin unavailable, drawing plain head: {}", err);
            None
        }
    }
}
