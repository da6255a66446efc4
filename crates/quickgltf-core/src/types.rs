//! Enumerations of the glTF type system.
//!
//! Numeric codes and string tags are decoded leniently where the caller is
//! expected to reject the value (`ComponentType::Invalid`,
//! `AccessorType::Invalid`) and strictly where no consumer could make sense of
//! it (`PrimitiveType`).

use std::path::Path;

use serde::Serialize;

/// Component type of an accessor element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComponentType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    UnsignedInt,
    Float,
    /// Only accepted when double-precision accessors are enabled.
    Double,
    /// Any code not in the table above.
    Invalid,
}

impl ComponentType {
    pub fn from_code(code: u64) -> Self {
        match code {
            5120 => ComponentType::Byte,
            5121 => ComponentType::UnsignedByte,
            5122 => ComponentType::Short,
            5123 => ComponentType::UnsignedShort,
            5125 => ComponentType::UnsignedInt,
            5126 => ComponentType::Float,
            5130 => ComponentType::Double,
            _ => ComponentType::Invalid,
        }
    }

    pub fn code(&self) -> Option<u32> {
        match self {
            ComponentType::Byte => Some(5120),
            ComponentType::UnsignedByte => Some(5121),
            ComponentType::Short => Some(5122),
            ComponentType::UnsignedShort => Some(5123),
            ComponentType::UnsignedInt => Some(5125),
            ComponentType::Float => Some(5126),
            ComponentType::Double => Some(5130),
            ComponentType::Invalid => None,
        }
    }

    pub fn byte_size(&self) -> usize {
        match self {
            ComponentType::Invalid => 0,
            ComponentType::Byte | ComponentType::UnsignedByte => 1,
            ComponentType::Short | ComponentType::UnsignedShort => 2,
            ComponentType::UnsignedInt | ComponentType::Float => 4,
            ComponentType::Double => 8,
        }
    }
}

/// Element shape of an accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AccessorType {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
    Invalid,
}

impl AccessorType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "SCALAR" => AccessorType::Scalar,
            "VEC2" => AccessorType::Vec2,
            "VEC3" => AccessorType::Vec3,
            "VEC4" => AccessorType::Vec4,
            "MAT2" => AccessorType::Mat2,
            "MAT3" => AccessorType::Mat3,
            "MAT4" => AccessorType::Mat4,
            _ => AccessorType::Invalid,
        }
    }

    /// Number of components per element.
    pub fn component_count(&self) -> usize {
        match self {
            AccessorType::Invalid => 0,
            AccessorType::Scalar => 1,
            AccessorType::Vec2 => 2,
            AccessorType::Vec3 => 3,
            AccessorType::Vec4 | AccessorType::Mat2 => 4,
            AccessorType::Mat3 => 9,
            AccessorType::Mat4 => 16,
        }
    }
}

/// Topology of a mesh primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum PrimitiveType {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl PrimitiveType {
    /// Decodes a `mode` value; returns `None` outside 0..=6.
    pub fn from_mode(mode: u64) -> Option<Self> {
        match mode {
            0 => Some(PrimitiveType::Points),
            1 => Some(PrimitiveType::Lines),
            2 => Some(PrimitiveType::LineLoop),
            3 => Some(PrimitiveType::LineStrip),
            4 => Some(PrimitiveType::Triangles),
            5 => Some(PrimitiveType::TriangleStrip),
            6 => Some(PrimitiveType::TriangleFan),
            _ => None,
        }
    }
}

/// GPU binding hint of a buffer view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BufferTarget {
    ArrayBuffer,
    ElementArrayBuffer,
}

impl BufferTarget {
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            34962 => Some(BufferTarget::ArrayBuffer),
            34963 => Some(BufferTarget::ElementArrayBuffer),
            _ => None,
        }
    }
}

pub const MIME_TYPE_JPEG: &str = "image/jpeg";
pub const MIME_TYPE_PNG: &str = "image/png";
pub const MIME_TYPE_KTX2: &str = "image/ktx2";
pub const MIME_TYPE_DDS: &str = "image/vnd-ms.dds";
pub const MIME_TYPE_GLTF_BUFFER: &str = "application/gltf-buffer";
pub const MIME_TYPE_OCTET_STREAM: &str = "application/octet-stream";

/// Recognized mime types of buffer and image payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum MimeType {
    #[default]
    None,
    Jpeg,
    Png,
    Ktx2,
    Dds,
    GltfBuffer,
    OctetStream,
}

impl MimeType {
    pub fn from_mime_str(mime: &str) -> Self {
        match mime {
            MIME_TYPE_JPEG => MimeType::Jpeg,
            MIME_TYPE_PNG => MimeType::Png,
            MIME_TYPE_KTX2 => MimeType::Ktx2,
            MIME_TYPE_DDS => MimeType::Dds,
            MIME_TYPE_GLTF_BUFFER => MimeType::GltfBuffer,
            MIME_TYPE_OCTET_STREAM => MimeType::OctetStream,
            _ => MimeType::None,
        }
    }

    /// Guesses the mime type of a file path from its extension.
    pub fn from_extension(path: &Path) -> Self {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return MimeType::None;
        };
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => MimeType::Jpeg,
            "png" => MimeType::Png,
            "ktx2" => MimeType::Ktx2,
            "dds" => MimeType::Dds,
            "bin" => MimeType::OctetStream,
            _ => MimeType::None,
        }
    }

    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            MimeType::None => None,
            MimeType::Jpeg => Some(MIME_TYPE_JPEG),
            MimeType::Png => Some(MIME_TYPE_PNG),
            MimeType::Ktx2 => Some(MIME_TYPE_KTX2),
            MimeType::Dds => Some(MIME_TYPE_DDS),
            MimeType::GltfBuffer => Some(MIME_TYPE_GLTF_BUFFER),
            MimeType::OctetStream => Some(MIME_TYPE_OCTET_STREAM),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_type_table() {
        assert_eq!(ComponentType::from_code(5126), ComponentType::Float);
        assert_eq!(ComponentType::from_code(5130), ComponentType::Double);
        assert_eq!(ComponentType::from_code(5124), ComponentType::Invalid);
        assert_eq!(ComponentType::from_code(0), ComponentType::Invalid);
        assert_eq!(ComponentType::UnsignedShort.code(), Some(5123));
        assert_eq!(ComponentType::Invalid.code(), None);
        assert_eq!(ComponentType::Double.byte_size(), 8);
    }

    #[test]
    fn test_accessor_type_tags() {
        assert_eq!(AccessorType::from_tag("VEC3"), AccessorType::Vec3);
        assert_eq!(AccessorType::from_tag("MAT4").component_count(), 16);
        assert_eq!(AccessorType::from_tag("vec3"), AccessorType::Invalid);
    }

    #[test]
    fn test_primitive_mode() {
        assert_eq!(PrimitiveType::default(), PrimitiveType::Triangles);
        assert_eq!(PrimitiveType::from_mode(4), Some(PrimitiveType::Triangles));
        assert_eq!(PrimitiveType::from_mode(0), Some(PrimitiveType::Points));
        assert_eq!(PrimitiveType::from_mode(7), None);
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(MimeType::from_mime_str("image/png"), MimeType::Png);
        assert_eq!(MimeType::from_mime_str("image/vnd-ms.dds"), MimeType::Dds);
        assert_eq!(MimeType::from_mime_str("text/plain"), MimeType::None);
        assert_eq!(MimeType::from_extension(Path::new("tex/albedo.JPG")), MimeType::Jpeg);
        assert_eq!(MimeType::from_extension(Path::new("scene.bin")), MimeType::OctetStream);
        assert_eq!(MimeType::from_extension(Path::new("noext")), MimeType::None);
        assert_eq!(MimeType::Ktx2.as_str(), Some("image/ktx2"));
    }
}
