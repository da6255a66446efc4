//! Texture extension dispatch.
//!
//! `KHR_texture_basisu` and `MSFT_texture_dds` both let a texture name an
//! alternative image in `extensions.<name>.source`. Enabled extensions are
//! tried in a fixed priority order and the first one present wins.

use quickgltf_core::{GltfError, Options, Result};
use serde_json::Value;

use crate::json::{self, Object};

pub const KHR_TEXTURE_BASISU: &str = "KHR_texture_basisu";
pub const MSFT_TEXTURE_DDS: &str = "MSFT_texture_dds";

const TEXTURE_SOURCE_EXTENSIONS: [(Options, &str); 2] = [
    (Options::ENABLE_BASIS_UNIVERSAL_TEXTURE_EXTENSION, KHR_TEXTURE_BASISU),
    (Options::ENABLE_DDS_TEXTURE_EXTENSION, MSFT_TEXTURE_DDS),
];

/// Image index supplied by the first enabled extension present in `extensions`.
///
/// Returns `Ok(None)` when no enabled extension is present. An enabled
/// extension object without an unsigned `source` is an error.
pub fn texture_source_from_extensions(
    extensions: &Object,
    options: Options,
    ctx: &str,
) -> Result<Option<usize>> {
    for (flag, name) in TEXTURE_SOURCE_EXTENSIONS {
        if !options.contains(flag) {
            continue;
        }

        let Some(extension) = extensions.get(name).and_then(Value::as_object) else {
            continue;
        };

        let source = extension.get("source").and_then(Value::as_u64).ok_or_else(|| {
            GltfError::invalid(format!("{}: {} does not provide an image `source`", ctx, name))
        })?;
        log::trace!("{}: image source {} taken from {}", ctx, source, name);
        return json::to_usize(source, ctx, "source").map(Some);
    }

    Ok(None)
}
