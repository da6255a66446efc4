//! Parser options.

use bitflags::bitflags;

bitflags! {
    /// Flags controlling validation strictness, byte loading and extensions.
    ///
    /// Flags combine freely; the empty set is the strictest configuration that
    /// loads nothing from disk and ignores all texture extensions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Options: u32 {
        /// Do not require a top-level `asset` object with a string `version`.
        const SKIP_ASSET_FIELD_VALIDATION = 1 << 0;
        /// Accept accessors with the double-precision component type (5130).
        const ALLOW_DOUBLE_PRECISION_ACCESSORS = 1 << 1;
        /// Copy the GLB binary chunk into the first buffer.
        const LOAD_CONTAINER_EMBEDDED_BUFFERS = 1 << 2;
        /// Read file-backed buffers into memory after parsing.
        const LOAD_EXTERNAL_FILE_BUFFERS = 1 << 3;
        /// Read file-backed images into memory after parsing.
        const LOAD_EXTERNAL_FILE_IMAGES = 1 << 4;
        /// Honor `KHR_texture_basisu` texture sources.
        const ENABLE_BASIS_UNIVERSAL_TEXTURE_EXTENSION = 1 << 5;
        /// Honor `MSFT_texture_dds` texture sources.
        const ENABLE_DDS_TEXTURE_EXTENSION = 1 << 6;
        /// Use the portable base64 decoder instead of the accelerated one.
        const FORCE_PORTABLE_DECODING = 1 << 7;
    }
}
