//! quickgltf core library
//!
//! Typed glTF 2.0 document model, parser options, the error taxonomy and the
//! byte codecs shared by the parser in `quickgltf-io`.

pub mod base64_codec;
pub mod data_source;
pub mod document;
pub mod error;
pub mod options;
pub mod transform;
pub mod traversal;
pub mod types;
pub mod validation;

pub use data_source::DataSource;
pub use document::{
    Accessor, AssetInfo, Buffer, BufferView, Document, Image, Mesh, Node, Primitive, Scene,
    Texture,
};
pub use error::{error_message, ErrorCode, GltfError, Result};
pub use options::Options;
pub use transform::{Matrix4, NodeTransform, Trs, IDENTITY_MATRIX};
pub use traversal::{SceneWalker, VisitedNode};
pub use types::{AccessorType, BufferTarget, ComponentType, MimeType, PrimitiveType};
