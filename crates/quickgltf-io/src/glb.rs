//! GLB binary container framing.
//!
//! Layout: a 12-byte header (magic, version, total length) followed by
//! chunks, each a u32 length, a u32 type and the payload. All integers are
//! little-endian.

use byteorder::{ByteOrder, LittleEndian};
use quickgltf_core::{GltfError, Result};

pub const GLB_MAGIC: u32 = 0x46546C67; // "glTF" in little-endian
pub const GLB_VERSION: u32 = 2;
pub const GLB_CHUNK_JSON: u32 = 0x4E4F534A; // "JSON"
pub const GLB_CHUNK_BIN: u32 = 0x004E4942; // "BIN\0"

const HEADER_LENGTH: usize = 12;
const CHUNK_HEADER_LENGTH: usize = 8;

/// Location of the binary chunk payload inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinChunk {
    pub offset: usize,
    pub length: usize,
}

/// The chunks of a GLB container.
#[derive(Debug)]
pub struct GlbChunks<'a> {
    pub json: &'a [u8],
    pub bin: Option<BinChunk>,
}

/// Returns true if `data` starts with the GLB magic.
pub fn has_glb_magic(data: &[u8]) -> bool {
    data.len() >= 4 && LittleEndian::read_u32(&data[0..4]) == GLB_MAGIC
}

/// Validates the header and locates the JSON and BIN chunks.
///
/// Unknown chunk types are skipped. When a chunk type repeats, the first
/// occurrence is used.
pub fn split_chunks(data: &[u8]) -> Result<GlbChunks<'_>> {
    if data.len() < HEADER_LENGTH {
        return Err(GltfError::invalid_glb("File too small for GLB header"));
    }

    let magic = LittleEndian::read_u32(&data[0..4]);
    let version = LittleEndian::read_u32(&data[4..8]);
    let length = LittleEndian::read_u32(&data[8..12]) as usize;

    if magic != GLB_MAGIC {
        return Err(GltfError::invalid_glb("Invalid GLB magic"));
    }
    if version != GLB_VERSION {
        return Err(GltfError::invalid_glb(format!(
            "Unsupported GLB version: {}",
            version
        )));
    }
    if length > data.len() {
        return Err(GltfError::invalid_glb("File truncated"));
    }

    let mut offset = HEADER_LENGTH;
    let mut json_chunk: Option<&[u8]> = None;
    let mut bin_chunk: Option<BinChunk> = None;

    while offset + CHUNK_HEADER_LENGTH <= length {
        let chunk_length = LittleEndian::read_u32(&data[offset..offset + 4]) as usize;
        let chunk_type = LittleEndian::read_u32(&data[offset + 4..offset + 8]);
        offset += CHUNK_HEADER_LENGTH;

        let end = offset
            .checked_add(chunk_length)
            .filter(|&end| end <= length)
            .ok_or_else(|| GltfError::invalid_glb("Chunk extends past file end"))?;

        match chunk_type {
            GLB_CHUNK_JSON if json_chunk.is_none() => json_chunk = Some(&data[offset..end]),
            GLB_CHUNK_BIN if bin_chunk.is_none() => {
                bin_chunk = Some(BinChunk { offset, length: chunk_length })
            }
            _ => log::debug!("Skipping GLB chunk of type {:#010x}", chunk_type),
        }
        offset = end;
    }

    let json = json_chunk.ok_or_else(|| GltfError::invalid_glb("No JSON chunk"))?;
    Ok(GlbChunks { json, bin: bin_chunk })
}
