//! Cross-reference checks.
//!
//! Parsing stores indices unresolved. Consumers that dereference them call
//! [`Document::validate_indices`] once instead of checking every lookup.

use crate::data_source::DataSource;
use crate::document::Document;
use crate::error::{GltfError, Result};

fn check(kind: &str, index: usize, len: usize, referrer: impl FnOnce() -> String) -> Result<()> {
    if index >= len {
        return Err(GltfError::invalid(format!(
            "{} references {} {} but only {} exist",
            referrer(),
            kind,
            index,
            len
        )));
    }
    Ok(())
}

impl Document {
    /// Verifies that every stored index points at an existing entity.
    pub fn validate_indices(&self) -> Result<()> {
        for (i, view) in self.buffer_views.iter().enumerate() {
            check("buffer", view.buffer_index, self.buffers.len(), || {
                format!("bufferViews[{}]", i)
            })?;
        }

        for (i, accessor) in self.accessors.iter().enumerate() {
            if let Some(view) = accessor.buffer_view_index {
                check("bufferView", view, self.buffer_views.len(), || {
                    format!("accessors[{}]", i)
                })?;
            }
        }

        for (i, image) in self.images.iter().enumerate() {
            if let DataSource::BufferView { buffer_view, .. } = image.data {
                check("bufferView", buffer_view, self.buffer_views.len(), || {
                    format!("images[{}]", i)
                })?;
            }
        }

        for (i, texture) in self.textures.iter().enumerate() {
            for image in texture.image_index.iter().chain(texture.fallback_image_index.iter()) {
                check("image", *image, self.images.len(), || format!("textures[{}]", i))?;
            }
        }

        for (i, mesh) in self.meshes.iter().enumerate() {
            for (j, primitive) in mesh.primitives.iter().enumerate() {
                let referrer = || format!("meshes[{}].primitives[{}]", i, j);
                for accessor in primitive.attributes.values() {
                    check("accessor", *accessor, self.accessors.len(), referrer)?;
                }
                if let Some(indices) = primitive.indices_accessor {
                    check("accessor", indices, self.accessors.len(), referrer)?;
                }
            }
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(mesh) = node.mesh_index {
                check("mesh", mesh, self.meshes.len(), || format!("nodes[{}]", i))?;
            }
            for child in &node.children {
                check("node", *child, self.nodes.len(), || format!("nodes[{}]", i))?;
            }
        }

        for (i, scene) in self.scenes.iter().enumerate() {
            for node in &scene.node_indices {
                check("node", *node, self.nodes.len(), || format!("scenes[{}]", i))?;
            }
        }

        if let Some(scene) = self.default_scene {
            check("scene", scene, self.scenes.len(), || "scene".to_string())?;
        }

        Ok(())
    }
}
