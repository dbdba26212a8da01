//! Scene graph
//!
//! A tree of named nodes, each with a transform relative to its parent.
//! The root node is named `render` and always exists.

use slotmap::{new_key_type, SlotMap};

use crate::Transform;
use roam_math::{Hpr, Vec3};

/// Name of the root node
pub const ROOT_NODE_NAME: &str = "render";

new_key_type! {
    /// Key to a node in the scene graph
    ///
    /// Uses generational indexing so a key to a removed node never resolves
    /// to a node that later reused its slot.
    pub struct NodeKey;
}

/// A single scene graph node
#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    /// Transform relative to the parent
    pub transform: Transform,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

impl Node {
    fn new(name: impl Into<String>, parent: Option<NodeKey>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::identity(),
            parent,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }
}

/// Hierarchy of named nodes
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, Node>,
    root: NodeKey,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a graph containing only the root node
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(ROOT_NODE_NAME, None));
        Self { nodes, root }
    }

    /// The root node
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Create a new node under `parent`
    ///
    /// Returns `None` if the parent does not exist.
    pub fn attach_new_node(&mut self, name: impl Into<String>, parent: NodeKey) -> Option<NodeKey> {
        if !self.nodes.contains_key(parent) {
            log::error!("attach_new_node: parent node does not exist");
            return None;
        }
        let key = self.nodes.insert(Node::new(name, Some(parent)));
        self.nodes[parent].children.push(key);
        Some(key)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn name(&self, key: NodeKey) -> Option<&str> {
        self.nodes.get(key).map(|n| n.name.as_str())
    }

    pub fn transform(&self, key: NodeKey) -> Option<&Transform> {
        self.nodes.get(key).map(|n| &n.transform)
    }

    pub fn transform_mut(&mut self, key: NodeKey) -> Option<&mut Transform> {
        self.nodes.get_mut(key).map(|n| &mut n.transform)
    }

    /// Replace a node's local transform. Returns false for a missing node.
    pub fn set_transform(&mut self, key: NodeKey, transform: Transform) -> bool {
        match self.transform_mut(key) {
            Some(t) => {
                *t = transform;
                true
            }
            None => false,
        }
    }

    /// Local position of a node
    pub fn pos(&self, key: NodeKey) -> Option<Vec3> {
        self.transform(key).map(|t| t.position)
    }

    pub fn set_pos(&mut self, key: NodeKey, position: Vec3) -> bool {
        match self.transform_mut(key) {
            Some(t) => {
                t.position = position;
                true
            }
            None => false,
        }
    }

    pub fn set_hpr(&mut self, key: NodeKey, hpr: Hpr) -> bool {
        match self.transform_mut(key) {
            Some(t) => {
                t.hpr = hpr;
                true
            }
            None => false,
        }
    }

    pub fn set_h(&mut self, key: NodeKey, heading: f32) -> bool {
        match self.transform_mut(key) {
            Some(t) => {
                t.hpr.h = heading;
                true
            }
            None => false,
        }
    }

    pub fn set_scale(&mut self, key: NodeKey, scale: f32) -> bool {
        match self.transform_mut(key) {
            Some(t) => {
                t.scale = scale;
                true
            }
            None => false,
        }
    }

    /// Transform of a node relative to the root
    pub fn world_transform(&self, key: NodeKey) -> Option<Transform> {
        let node = self.nodes.get(key)?;
        match node.parent {
            Some(parent) => Some(self.world_transform(parent)?.compose(&node.transform)),
            None => Some(node.transform),
        }
    }

    pub fn world_position(&self, key: NodeKey) -> Option<Vec3> {
        self.world_transform(key).map(|t| t.position)
    }

    /// First node with the given name, searching depth-first from the root
    pub fn find(&self, name: &str) -> Option<NodeKey> {
        let mut stack = vec![self.root];
        while let Some(key) = stack.pop() {
            let node = &self.nodes[key];
            if node.name == name {
                return Some(key);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Move a node (with its subtree) under a new parent, keeping its local
    /// transform.
    ///
    /// Fails for the root, for missing nodes, and when `new_parent` lies
    /// inside the node's own subtree.
    pub fn reparent(&mut self, key: NodeKey, new_parent: NodeKey) -> bool {
        if key == self.root || !self.contains(key) || !self.contains(new_parent) {
            return false;
        }
        if self.is_ancestor(key, new_parent) {
            log::error!("reparent: cannot move '{}' under its own descendant", self.nodes[key].name);
            return false;
        }
        if let Some(old_parent) = self.nodes[key].parent {
            self.nodes[old_parent].children.retain(|&c| c != key);
        }
        self.nodes[key].parent = Some(new_parent);
        self.nodes[new_parent].children.push(key);
        true
    }

    /// Whether `ancestor` is `key` or one of its ancestors
    fn is_ancestor(&self, ancestor: NodeKey, key: NodeKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            if k == ancestor {
                return true;
            }
            current = self.nodes.get(k).and_then(|n| n.parent);
        }
        false
    }

    /// Remove a node and its whole subtree. The root cannot be removed.
    ///
    /// Returns the number of nodes removed.
    pub fn remove(&mut self, key: NodeKey) -> usize {
        if key == self.root || !self.contains(key) {
            return 0;
        }
        if let Some(parent) = self.nodes[key].parent {
            self.nodes[parent].children.retain(|&c| c != key);
        }
        let mut removed = 0;
        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            if let Some(node) = self.nodes.remove(k) {
                removed += 1;
                stack.extend(node.children);
            }
        }
        removed
    }

    /// Number of nodes including the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is never removed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
