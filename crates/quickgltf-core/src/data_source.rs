//! Where the bytes of a buffer or image live.

use std::ops::Range;
use std::path::PathBuf;

use serde::Serialize;

use crate::types::MimeType;

/// Physical storage of a buffer or image payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DataSource {
    /// Bytes held in memory: a decoded data URI, a copied GLB chunk or a loaded file.
    Vector {
        #[serde(skip)]
        bytes: Vec<u8>,
        mime_type: MimeType,
    },
    /// A file on disk. `byte_range` is set when only part of the file is the
    /// payload (the binary chunk of a GLB read from disk).
    FilePath {
        path: PathBuf,
        byte_range: Option<Range<u64>>,
        mime_type: MimeType,
    },
    /// The binary chunk of an in-memory GLB, as an offset into the container.
    ContainerChunk { byte_offset: usize, byte_length: usize },
    /// A window of a buffer view. Only images use this source.
    BufferView { buffer_view: usize, mime_type: MimeType },
}

impl DataSource {
    pub fn mime_type(&self) -> MimeType {
        match self {
            DataSource::Vector { mime_type, .. }
            | DataSource::FilePath { mime_type, .. }
            | DataSource::BufferView { mime_type, .. } => *mime_type,
            DataSource::ContainerChunk { .. } => MimeType::GltfBuffer,
        }
    }

    /// In-memory bytes, if the payload has been decoded or loaded.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            DataSource::Vector { bytes, .. } => Some(bytes),
            _ => None,
        }
    }
}
