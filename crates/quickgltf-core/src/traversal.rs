//! Scene graph traversal.
//!
//! [`SceneWalker`] visits the nodes reachable from a scene's roots in
//! depth-first pre-order and computes each node's world matrix. It keeps its
//! own work stack, so deep hierarchies cannot overflow the call stack.

use crate::document::Document;
use crate::error::{GltfError, Result};
use crate::transform::{multiply, Matrix4, IDENTITY_MATRIX};

/// A node reached during traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitedNode {
    pub node_index: usize,
    pub parent_index: Option<usize>,
    pub world_matrix: Matrix4,
}

struct Pending {
    node_index: usize,
    parent_index: Option<usize>,
    parent_matrix: Matrix4,
}

/// Iterator over the nodes of one scene.
///
/// Yields an error and stops when an index is out of range or a node is
/// reached twice (a cycle, or a node shared between parents).
pub struct SceneWalker<'a> {
    document: &'a Document,
    stack: Vec<Pending>,
    visited: Vec<bool>,
    failed: bool,
}

impl<'a> SceneWalker<'a> {
    pub fn new(document: &'a Document, scene_index: usize) -> Result<Self> {
        let scene = document.scenes.get(scene_index).ok_or_else(|| {
            GltfError::invalid(format!("Invalid scene index: {}", scene_index))
        })?;

        let stack = scene
            .node_indices
            .iter()
            .rev()
            .map(|&node_index| Pending {
                node_index,
                parent_index: None,
                parent_matrix: IDENTITY_MATRIX,
            })
            .collect();

        Ok(Self {
            document,
            stack,
            visited: vec![false; document.nodes.len()],
            failed: false,
        })
    }
}

impl Iterator for SceneWalker<'_> {
    type Item = Result<VisitedNode>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let pending = self.stack.pop()?;

        let Some(node) = self.document.nodes.get(pending.node_index) else {
            self.failed = true;
            return Some(Err(GltfError::invalid(format!(
                "Invalid node index: {}",
                pending.node_index
            ))));
        };

        if self.visited[pending.node_index] {
            self.failed = true;
            return Some(Err(GltfError::invalid(format!(
                "Node {} is reachable more than once",
                pending.node_index
            ))));
        }
        self.visited[pending.node_index] = true;

        let world_matrix = multiply(&pending.parent_matrix, &node.transform.to_matrix());
        for &child in node.children.iter().rev() {
            self.stack.push(Pending {
                node_index: child,
                parent_index: Some(pending.node_index),
                parent_matrix: world_matrix,
            });
        }

        Some(Ok(VisitedNode {
            node_index: pending.node_index,
            parent_index: pending.parent_index,
            world_matrix,
        }))
    }
}
