//! The rendering collaborator seam
//!
//! The engine pushes all visual side effects through this trait and never
//! touches a window, a DOM or a GPU itself. Exactly one particle writes any
//! given node.

use ember_core::NodeHandle;
use std::collections::HashMap;

/// What the engine requires from its host's renderer.
pub trait RenderSurface {
    /// Create a renderable node and return a handle to it.
    fn create_node(&mut self) -> NodeHandle;

    /// Set a named visual property on a node to a style-string value.
    fn set_node_property(&mut self, node: NodeHandle, name: &str, value: &str);

    /// Remove a node. The handle must not be used afterwards.
    fn release_node(&mut self, node: NodeHandle);
}

/// An in-memory surface that records every call — the test double for the
/// engine's own tests, also usable by headless hosts.
#[derive(Default)]
pub struct RecordingSurface {
    nodes: HashMap<NodeHandle, HashMap<String, String>>,
    released: Vec<NodeHandle>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes created and not yet released
    pub fn live_count(&self) -> usize {
        self.nodes.len()
    }

    /// Last value pushed for a property on a live node
    pub fn property(&self, node: NodeHandle, name: &str) -> Option<&str> {
        self.nodes.get(&node)?.get(name).map(String::as_str)
    }

    /// Handles of all live nodes, unordered
    pub fn live_nodes(&self) -> Vec<NodeHandle> {
        self.nodes.keys().copied().collect()
    }

    /// Nodes released so far, in release order
    pub fn released(&self) -> &[NodeHandle] {
        &self.released
    }
}

impl RenderSurface for RecordingSurface {
    fn create_node(&mut self) -> NodeHandle {
        let handle = NodeHandle::new();
        self.nodes.insert(handle, HashMap::new());
        handle
    }

    fn set_node_property(&mut self, node: NodeHandle, name: &str, value: &str) {
        if let Some(props) = self.nodes.get_mut(&node) {
            props.insert(name.to_string(), value.to_string());
        }
    }

    fn release_node(&mut self, node: NodeHandle) {
        if self.nodes.remove(&node).is_some() {
            self.released.push(node);
        }
    }
}
