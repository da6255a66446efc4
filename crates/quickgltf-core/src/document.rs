//! The parsed glTF document.
//!
//! Every entity is stored in file order; its position in the owning vector is
//! the index other entities use to refer to it. Indices are stored exactly as
//! written in the file; [`Document::validate_indices`] range-checks them.

use std::collections::HashMap;

use serde::Serialize;

use crate::data_source::DataSource;
use crate::transform::NodeTransform;
use crate::types::{AccessorType, BufferTarget, ComponentType, PrimitiveType};

/// Contents of the top-level `asset` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssetInfo {
    pub version: String,
    pub min_version: Option<String>,
    pub generator: Option<String>,
    pub copyright: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Buffer {
    pub byte_length: usize,
    pub data: DataSource,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BufferView {
    pub buffer_index: usize,
    pub byte_offset: usize,
    pub byte_length: usize,
    pub byte_stride: Option<usize>,
    pub target: Option<BufferTarget>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Accessor {
    pub component_type: ComponentType,
    pub accessor_type: AccessorType,
    pub count: usize,
    /// Absent for accessors whose elements are all zero (or sparse-only).
    pub buffer_view_index: Option<usize>,
    pub byte_offset: usize,
    pub normalized: bool,
    pub name: Option<String>,
}

impl Accessor {
    /// Size of one element in bytes, zero for invalid types.
    pub fn element_size(&self) -> usize {
        self.component_type.byte_size() * self.accessor_type.component_count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub data: DataSource,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Texture {
    /// Image to sample. `None` only when the texture carried an `extensions`
    /// object but neither `source` nor an enabled extension supplied one.
    pub image_index: Option<usize>,
    /// The plain `source` image when an extension supplied `image_index`.
    pub fallback_image_index: Option<usize>,
    /// When `None`, use repeat wrapping and automatic filtering.
    pub sampler_index: Option<usize>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Primitive {
    /// Semantic name (e.g. `POSITION`, `TEXCOORD_0`, `_CUSTOM`) to accessor index.
    pub attributes: HashMap<String, usize>,
    pub primitive_type: PrimitiveType,
    pub indices_accessor: Option<usize>,
    pub material_index: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Mesh {
    pub primitives: Vec<Primitive>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Node {
    pub mesh_index: Option<usize>,
    pub children: Vec<usize>,
    pub transform: NodeTransform,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    pub node_indices: Vec<usize>,
    pub name: Option<String>,
}

/// A fully parsed glTF asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub asset: Option<AssetInfo>,
    pub extensions_used: Vec<String>,
    pub extensions_required: Vec<String>,
    pub buffers: Vec<Buffer>,
    pub buffer_views: Vec<BufferView>,
    pub accessors: Vec<Accessor>,
    pub images: Vec<Image>,
    pub textures: Vec<Texture>,
    pub meshes: Vec<Mesh>,
    pub nodes: Vec<Node>,
    pub scenes: Vec<Scene>,
    pub default_scene: Option<usize>,
}

impl Document {
    /// The scene to show first: `scene` if set, else the first scene.
    pub fn default_scene_index(&self) -> Option<usize> {
        self.default_scene
            .or(if self.scenes.is_empty() { None } else { Some(0) })
    }
}
