//! Owned input bytes for the parser.

use std::fs;
use std::path::{Path, PathBuf};

use quickgltf_core::{GltfError, Result};

use crate::glb;

/// The raw bytes of a `.gltf` or `.glb` file.
///
/// When created with [`GltfDataBuffer::from_path`] the origin path is kept so
/// the container's binary chunk can be referenced by file range instead of
/// being copied.
#[derive(Debug, Clone, Default)]
pub struct GltfDataBuffer {
    bytes: Vec<u8>,
    path: Option<PathBuf>,
}

impl GltfDataBuffer {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes, path: None }
    }

    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes.to_vec())
    }

    /// Reads a whole file into memory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| GltfError::FileLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { bytes, path: Some(path.to_path_buf()) })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// File the bytes were read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// True if the bytes start with the GLB magic.
    pub fn is_binary(&self) -> bool {
        glb::has_glb_magic(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
