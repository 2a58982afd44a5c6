//! Scene graph container
//!
//! The [`SceneGraph`] owns every node, material, and material set of one
//! scene. Nodes form a tree under a single root. Materials live in their own
//! storage and are shared by key, so one edit reaches every node using them.

use carousel_math::Vec3;
use slotmap::{new_key_type, SlotMap};

use crate::material::Material;
use crate::node::{Constraint, SceneNode};

new_key_type! {
    /// Key to a node in a [`SceneGraph`]
    pub struct NodeKey;
    /// Key to a material in a [`SceneGraph`]
    pub struct MaterialKey;
    /// Key to an ordered list of materials in a [`SceneGraph`]
    pub struct MaterialSetKey;
}

/// Error raised by structural graph operations
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// The node key does not belong to this graph
    MissingNode(NodeKey),
    /// The material key does not belong to this graph
    MissingMaterial(MaterialKey),
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::MissingNode(key) => write!(f, "Node {:?} is not in the scene", key),
            GraphError::MissingMaterial(key) => {
                write!(f, "Material {:?} is not in the scene", key)
            }
        }
    }
}

impl std::error::Error for GraphError {}

// Payload plus the tree links, which only the graph may change
#[derive(Debug)]
struct NodeSlot {
    node: SceneNode,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

impl NodeSlot {
    fn new(node: SceneNode, parent: Option<NodeKey>) -> Self {
        Self { node, parent, children: Vec::new() }
    }
}

/// A tree of scene nodes plus the materials they share
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, NodeSlot>,
    materials: SlotMap<MaterialKey, Material>,
    material_sets: SlotMap<MaterialSetKey, Vec<MaterialKey>>,
    root: NodeKey,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a graph holding only an empty root node
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeSlot::new(SceneNode::new().with_name("root"), None));
        Self {
            nodes,
            materials: SlotMap::with_key(),
            material_sets: SlotMap::with_key(),
            root,
        }
    }

    /// Create a graph with pre-allocated node capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = SlotMap::with_capacity_and_key(capacity.max(1));
        let root = nodes.insert(NodeSlot::new(SceneNode::new().with_name("root"), None));
        Self {
            nodes,
            materials: SlotMap::with_key(),
            material_sets: SlotMap::with_key(),
            root,
        }
    }

    /// The root node
    #[inline]
    pub fn root(&self) -> NodeKey {
        self.root
    }

    // --- Nodes ---

    /// Attach `node` as the last child of `parent`
    pub fn add_child(&mut self, parent: NodeKey, node: SceneNode) -> Result<NodeKey, GraphError> {
        if !self.nodes.contains_key(parent) {
            return Err(GraphError::MissingNode(parent));
        }
        Ok(self.attach(parent, node))
    }

    /// Attach `node` under the root
    pub fn add_to_root(&mut self, node: SceneNode) -> NodeKey {
        self.attach(self.root, node)
    }

    // `parent` must be present
    fn attach(&mut self, parent: NodeKey, node: SceneNode) -> NodeKey {
        let key = self.nodes.insert(NodeSlot::new(node, Some(parent)));
        if let Some(parent_slot) = self.nodes.get_mut(parent) {
            parent_slot.children.push(key);
        }
        key
    }

    /// Get a node by key
    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key).map(|slot| &slot.node)
    }

    /// Get a mutable node by key
    ///
    /// The node may be edited or replaced outright; its place in the tree
    /// stays the same.
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key).map(|slot| &mut slot.node)
    }

    /// Check whether a key belongs to this graph
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Children of a node in insertion order (empty for unknown keys)
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes
            .get(key)
            .map(|slot| slot.children.as_slice())
            .unwrap_or(&[])
    }

    /// Parent of a node
    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key).and_then(|slot| slot.parent)
    }

    /// Find the first node with the given name, in depth-first order
    pub fn get_by_name(&self, name: &str) -> Option<(NodeKey, &SceneNode)> {
        self.descendants(self.root)
            .into_iter()
            .filter_map(|key| self.node(key).map(|node| (key, node)))
            .find(|(_, node)| node.name.as_deref() == Some(name))
    }

    /// Number of nodes, including the root
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over all nodes (storage order, not tree order)
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &SceneNode)> {
        self.nodes.iter().map(|(key, slot)| (key, &slot.node))
    }

    /// `start` followed by all of its descendants, depth-first, children in
    /// insertion order
    pub fn descendants(&self, start: NodeKey) -> Vec<NodeKey> {
        let mut order = Vec::new();
        if !self.nodes.contains_key(start) {
            return order;
        }
        let mut stack = vec![start];
        while let Some(key) = stack.pop() {
            order.push(key);
            if let Some(slot) = self.nodes.get(key) {
                stack.extend(slot.children.iter().rev().copied());
            }
        }
        order
    }

    /// Depth of a node below the root (root = 0)
    pub fn depth(&self, key: NodeKey) -> Option<usize> {
        let mut slot = self.nodes.get(key)?;
        let mut depth = 0;
        while let Some(parent) = slot.parent {
            slot = self.nodes.get(parent)?;
            depth += 1;
        }
        Some(depth)
    }

    /// Position of a node in scene space, ignoring animation
    ///
    /// Sums positions along the parent chain.
    pub fn world_position(&self, key: NodeKey) -> Option<Vec3> {
        let mut slot = self.nodes.get(key)?;
        let mut position = slot.node.position;
        while let Some(parent) = slot.parent {
            slot = self.nodes.get(parent)?;
            position += slot.node.position;
        }
        Some(position)
    }

    /// Replace the constraints of a node
    pub fn set_constraints(&mut self, key: NodeKey, constraints: Vec<Constraint>) -> Result<(), GraphError> {
        let node = self.node_mut(key).ok_or(GraphError::MissingNode(key))?;
        node.constraints = constraints;
        Ok(())
    }

    // --- Materials ---

    /// Store a material, returning its key
    pub fn add_material(&mut self, material: Material) -> MaterialKey {
        self.materials.insert(material)
    }

    /// Get a material by key
    pub fn material(&self, key: MaterialKey) -> Option<&Material> {
        self.materials.get(key)
    }

    /// Get a mutable material by key
    ///
    /// Changes are seen by every node whose material set includes `key`.
    pub fn material_mut(&mut self, key: MaterialKey) -> Option<&mut Material> {
        self.materials.get_mut(key)
    }

    /// Iterate over all stored materials
    pub fn materials(&self) -> impl Iterator<Item = (MaterialKey, &Material)> {
        self.materials.iter()
    }

    /// Number of stored materials
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Store an ordered material list, returning its key
    pub fn add_material_set(&mut self, materials: Vec<MaterialKey>) -> Result<MaterialSetKey, GraphError> {
        if let Some(missing) = materials.iter().find(|key| !self.materials.contains_key(**key)) {
            return Err(GraphError::MissingMaterial(*missing));
        }
        Ok(self.material_sets.insert(materials))
    }

    /// Get an ordered material list by key
    pub fn material_set(&self, key: MaterialSetKey) -> Option<&[MaterialKey]> {
        self.material_sets.get(key).map(Vec::as_slice)
    }

    /// Iterate over all material sets
    pub fn material_sets(&self) -> impl Iterator<Item = (MaterialSetKey, &[MaterialKey])> {
        self.material_sets.iter().map(|(key, set)| (key, set.as_slice()))
    }

    /// Resolve the materials applied to a node, in order
    ///
    /// Empty when the node has no material set.
    pub fn materials_of(&self, key: NodeKey) -> Vec<&Material> {
        self.node(key)
            .and_then(|node| node.materials)
            .and_then(|set| self.material_sets.get(set))
            .map(|set| set.iter().filter_map(|m| self.materials.get(*m)).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Color;
    use crate::geometry::Geometry;

    #[test]
    fn test_graph_new() {
        let graph = SceneGraph::new();
        assert_eq!(graph.node_count(), 1);
        assert!(graph.parent(graph.root()).is_none());
        assert!(graph.children(graph.root()).is_empty());
    }

    #[test]
    fn test_add_child_links_parent() {
        let mut graph = SceneGraph::new();
        let a = graph.add_to_root(SceneNode::new().with_name("a"));
        let b = graph.add_child(a, SceneNode::new().with_name("b")).unwrap();

        assert_eq!(graph.parent(b), Some(a));
        assert_eq!(graph.children(a), &[b]);
        assert_eq!(graph.children(graph.root()), &[a]);
        assert_eq!(graph.depth(b), Some(2));
    }

    #[test]
    fn test_add_child_to_missing_parent() {
        let mut graph = SceneGraph::new();
        let mut other = SceneGraph::new();
        other.add_to_root(SceneNode::new());
        other.add_to_root(SceneNode::new());
        let foreign = other.add_to_root(SceneNode::new());

        // A key minted by another graph with a higher slot index is unknown here
        match graph.add_child(foreign, SceneNode::new()) {
            Err(GraphError::MissingNode(key)) => assert_eq!(key, foreign),
            other => panic!("Expected MissingNode, got {:?}", other),
        }
    }

    #[test]
    fn test_replacing_node_keeps_tree_links() {
        let mut graph = SceneGraph::new();
        let carousel = graph.add_to_root(SceneNode::new().at(Vec3::new(0.0, 0.5, 0.0)));
        let child = graph
            .add_child(carousel, SceneNode::new().at(Vec3::new(2.5, 0.0, 0.0)))
            .unwrap();
        let grandchild = graph.add_child(child, SceneNode::new()).unwrap();

        *graph.node_mut(child).unwrap() = SceneNode::new()
            .with_name("swapped")
            .at(Vec3::new(2.5, 0.0, 0.0));

        assert_eq!(graph.parent(child), Some(carousel));
        assert_eq!(graph.children(carousel), &[child]);
        assert_eq!(graph.children(child), &[grandchild]);
        assert_eq!(graph.world_position(child), Some(Vec3::new(2.5, 0.5, 0.0)));
        assert_eq!(graph.get_by_name("swapped").map(|(key, _)| key), Some(child));
    }

    #[test]
    fn test_replacing_root_keeps_children() {
        let mut graph = SceneGraph::new();
        let a = graph.add_to_root(SceneNode::new());
        let root = graph.root();
        *graph.node_mut(root).unwrap() = SceneNode::new().with_name("stage");

        assert_eq!(graph.children(root), &[a]);
        assert!(graph.parent(root).is_none());
        assert_eq!(graph.depth(a), Some(1));
    }

    #[test]
    fn test_descendants_depth_first() {
        let mut graph = SceneGraph::new();
        let a = graph.add_to_root(SceneNode::new());
        let a1 = graph.add_child(a, SceneNode::new()).unwrap();
        let a2 = graph.add_child(a, SceneNode::new()).unwrap();
        let b = graph.add_to_root(SceneNode::new());

        assert_eq!(graph.descendants(graph.root()), vec![graph.root(), a, a1, a2, b]);
        assert_eq!(graph.descendants(a), vec![a, a1, a2]);
    }

    #[test]
    fn test_get_by_name() {
        let mut graph = SceneGraph::new();
        let key = graph.add_to_root(SceneNode::with_geometry(Geometry::Floor).with_name("floor"));
        let (found, node) = graph.get_by_name("floor").unwrap();
        assert_eq!(found, key);
        assert_eq!(node.geometry, Some(Geometry::Floor));
        assert!(graph.get_by_name("missing").is_none());
    }

    #[test]
    fn test_world_position_sums_parents() {
        let mut graph = SceneGraph::new();
        let carousel = graph.add_to_root(SceneNode::new().at(Vec3::new(0.0, 0.5, 0.0)));
        let child = graph
            .add_child(carousel, SceneNode::new().at(Vec3::new(2.5, 0.0, 0.0)))
            .unwrap();
        assert_eq!(graph.world_position(child), Some(Vec3::new(2.5, 0.5, 0.0)));
    }

    #[test]
    fn test_set_constraints() {
        let mut graph = SceneGraph::new();
        let target = graph.add_to_root(SceneNode::new());
        let camera = graph.add_to_root(SceneNode::new());
        graph
            .set_constraints(camera, vec![Constraint::LookAt { target }])
            .unwrap();
        assert_eq!(graph.node(camera).unwrap().look_at_target(), Some(target));
    }

    #[test]
    fn test_shared_material_edit_is_visible_everywhere() {
        let mut graph = SceneGraph::new();
        let red = graph.add_material(Material::glossy(Color::RED));
        let set = graph.add_material_set(vec![red]).unwrap();
        let a = graph.add_to_root(SceneNode::new().with_materials(set));
        let b = graph.add_to_root(SceneNode::new().with_materials(set));

        graph.material_mut(red).unwrap().diffuse = Color::GREEN;

        assert_eq!(graph.materials_of(a)[0].diffuse, Color::GREEN);
        assert_eq!(graph.materials_of(b)[0].diffuse, Color::GREEN);
    }

    #[test]
    fn test_material_set_rejects_unknown_material() {
        let mut graph = SceneGraph::new();
        let mut other = SceneGraph::new();
        other.add_material(Material::default());
        let foreign = other.add_material(Material::default());
        assert_eq!(
            graph.add_material_set(vec![foreign]),
            Err(GraphError::MissingMaterial(foreign))
        );
    }

    #[test]
    fn test_materials_of_node_without_set() {
        let mut graph = SceneGraph::new();
        let key = graph.add_to_root(SceneNode::new());
        assert!(graph.materials_of(key).is_empty());
    }
}
