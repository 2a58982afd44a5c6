//! Scene serialization
//!
//! A [`SceneDocument`] is the flat, serializable form of a [`SceneGraph`].
//! Nodes are listed depth-first from the root, so a parent always comes
//! before its children. Parents, constraint targets, and material sets are
//! stored as indices into the document's own lists.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use carousel_math::Vec3;
use serde::{Serialize, Deserialize};

use crate::geometry::Geometry;
use crate::graph::{MaterialKey, MaterialSetKey, NodeKey, SceneGraph};
use crate::material::Material;
use crate::node::{Action, Camera, Constraint, Light, SceneNode};

/// Serializable constraint, with the target stored as a node index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ConstraintRecord {
    LookAt { target: usize },
    Billboard,
}

/// Serializable node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(default)]
    pub name: Option<String>,
    /// Index of the parent node (None only for the root at index 0)
    #[serde(default)]
    pub parent: Option<usize>,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    /// Index into [`SceneDocument::material_sets`]
    #[serde(default)]
    pub materials: Option<usize>,
    #[serde(default)]
    pub camera: Option<Camera>,
    #[serde(default)]
    pub light: Option<Light>,
    #[serde(default)]
    pub constraints: Vec<ConstraintRecord>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// A serializable snapshot of a whole scene graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Scene name (for display/debugging)
    pub name: String,
    pub materials: Vec<Material>,
    /// Ordered material lists, as indices into `materials`
    pub material_sets: Vec<Vec<usize>>,
    /// Nodes in depth-first order; index 0 is the root
    pub nodes: Vec<NodeRecord>,
}

impl SceneDocument {
    /// Snapshot every node reachable from the root of `graph`
    ///
    /// Fails with [`SceneSaveError::InvalidReference`] when a constraint
    /// target, material set, or material is not part of the snapshot.
    pub fn from_graph(name: impl Into<String>, graph: &SceneGraph) -> Result<Self, SceneSaveError> {
        let mut material_index: HashMap<MaterialKey, usize> = HashMap::new();
        let mut materials = Vec::new();
        for (key, material) in graph.materials() {
            material_index.insert(key, materials.len());
            materials.push(material.clone());
        }

        let mut set_index: HashMap<MaterialSetKey, usize> = HashMap::new();
        let mut material_sets = Vec::new();
        for (key, set) in graph.material_sets() {
            let indices = set
                .iter()
                .map(|m| {
                    material_index.get(m).copied().ok_or_else(|| {
                        SceneSaveError::InvalidReference(format!(
                            "material set {} names material {:?} that is not in the scene",
                            material_sets.len(),
                            m
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            set_index.insert(key, material_sets.len());
            material_sets.push(indices);
        }

        let order = graph.descendants(graph.root());
        let node_index: HashMap<NodeKey, usize> =
            order.iter().enumerate().map(|(i, key)| (*key, i)).collect();

        let mut nodes = Vec::with_capacity(order.len());
        for (i, key) in order.iter().enumerate() {
            let Some(node) = graph.node(*key) else {
                continue;
            };
            let label = node.name.clone().unwrap_or_else(|| format!("#{}", i));

            let materials = match node.materials {
                Some(set) => Some(set_index.get(&set).copied().ok_or_else(|| {
                    SceneSaveError::InvalidReference(format!(
                        "node '{}' uses a material set that is not in the scene",
                        label
                    ))
                })?),
                None => None,
            };

            let constraints = node
                .constraints
                .iter()
                .map(|c| match c {
                    Constraint::LookAt { target } => node_index
                        .get(target)
                        .map(|t| ConstraintRecord::LookAt { target: *t })
                        .ok_or_else(|| {
                            SceneSaveError::InvalidReference(format!(
                                "node '{}' looks at a node that is not in the scene",
                                label
                            ))
                        }),
                    Constraint::Billboard => Ok(ConstraintRecord::Billboard),
                })
                .collect::<Result<Vec<_>, _>>()?;

            nodes.push(NodeRecord {
                name: node.name.clone(),
                parent: graph.parent(*key).and_then(|p| node_index.get(&p).copied()),
                position: node.position,
                geometry: node.geometry.clone(),
                materials,
                camera: node.camera,
                light: node.light,
                constraints,
                actions: node.actions.clone(),
            });
        }

        Ok(Self {
            name: name.into(),
            materials,
            material_sets,
            nodes,
        })
    }

    /// Rebuild a scene graph from this document
    pub fn to_graph(&self) -> Result<SceneGraph, SceneLoadError> {
        let mut graph = SceneGraph::with_capacity(self.nodes.len());

        let material_keys: Vec<MaterialKey> = self
            .materials
            .iter()
            .map(|m| graph.add_material(m.clone()))
            .collect();

        let mut set_keys = Vec::with_capacity(self.material_sets.len());
        for (i, set) in self.material_sets.iter().enumerate() {
            let keys = set
                .iter()
                .map(|m| {
                    material_keys.get(*m).copied().ok_or_else(|| {
                        SceneLoadError::InvalidReference(format!(
                            "material set {} names material {} of {}",
                            i, m, material_keys.len()
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let key = graph
                .add_material_set(keys)
                .map_err(|e| SceneLoadError::InvalidReference(e.to_string()))?;
            set_keys.push(key);
        }

        let mut node_keys: Vec<NodeKey> = Vec::with_capacity(self.nodes.len());
        for (i, record) in self.nodes.iter().enumerate() {
            let materials = match record.materials {
                Some(s) => Some(set_keys.get(s).copied().ok_or_else(|| {
                    SceneLoadError::InvalidReference(format!(
                        "node {} uses material set {} of {}",
                        i, s, set_keys.len()
                    ))
                })?),
                None => None,
            };

            let node = SceneNode {
                name: record.name.clone(),
                position: record.position,
                geometry: record.geometry.clone(),
                materials,
                camera: record.camera,
                light: record.light,
                constraints: Vec::new(),
                actions: record.actions.clone(),
            };

            let key = match (i, record.parent) {
                (0, None) => {
                    let root = graph.root();
                    if let Some(slot) = graph.node_mut(root) {
                        *slot = node;
                    }
                    root
                }
                (0, Some(_)) => {
                    return Err(SceneLoadError::InvalidReference(
                        "root node must not have a parent".to_string(),
                    ));
                }
                (_, Some(p)) if p < i => graph
                    .add_child(node_keys[p], node)
                    .map_err(|e| SceneLoadError::InvalidReference(e.to_string()))?,
                (_, parent) => {
                    return Err(SceneLoadError::InvalidReference(format!(
                        "node {} has parent {:?}; parents must precede children",
                        i, parent
                    )));
                }
            };
            node_keys.push(key);
        }

        for (i, record) in self.nodes.iter().enumerate() {
            let constraints = record
                .constraints
                .iter()
                .map(|c| match c {
                    ConstraintRecord::LookAt { target } => node_keys
                        .get(*target)
                        .map(|t| Constraint::LookAt { target: *t })
                        .ok_or_else(|| {
                            SceneLoadError::InvalidReference(format!(
                                "node {} looks at node {} of {}",
                                i, target, node_keys.len()
                            ))
                        }),
                    ConstraintRecord::Billboard => Ok(Constraint::Billboard),
                })
                .collect::<Result<Vec<_>, _>>()?;
            graph
                .set_constraints(node_keys[i], constraints)
                .map_err(|e| SceneLoadError::InvalidReference(e.to_string()))?;
        }

        log::debug!(
            "Rebuilt scene '{}' with {} nodes and {} materials",
            self.name,
            graph.node_count(),
            graph.material_count()
        );
        Ok(graph)
    }

    /// Serialize to a pretty RON string
    pub fn to_ron_string(&self) -> Result<String, SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new().enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Parse from a RON string
    pub fn from_ron_str(contents: &str) -> Result<Self, SceneLoadError> {
        Ok(ron::from_str(contents)?)
    }

    /// Load a scene document from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Save this scene document to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let contents = self.to_ron_string()?;
        fs::write(path, contents)?;
        Ok(())
    }
}

/// Error loading a scene
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// An index in the document points outside its list
    InvalidReference(String),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
            SceneLoadError::InvalidReference(msg) => write!(f, "Invalid reference: {}", msg),
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Error saving a scene
#[derive(Debug)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
    /// The graph refers to something outside the snapshot
    InvalidReference(String),
}

impl From<io::Error> for SceneSaveError {
    fn from(e: io::Error) -> Self {
        SceneSaveError::Io(e)
    }
}

impl From<ron::Error> for SceneSaveError {
    fn from(e: ron::Error) -> Self {
        SceneSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SceneSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSaveError::Io(e) => write!(f, "IO error: {}", e),
            SceneSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
            SceneSaveError::InvalidReference(msg) => write!(f, "Invalid reference: {}", msg),
        }
    }
}

impl std::error::Error for SceneSaveError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Color;

    fn make_graph() -> (SceneGraph, NodeKey, NodeKey) {
        let mut graph = SceneGraph::new();
        let red = graph.add_material(Material::glossy(Color::RED));
        let blue = graph.add_material(Material::glossy(Color::BLUE));
        let set = graph.add_material_set(vec![red, blue]).unwrap();

        let spinner = graph.add_to_root(
            SceneNode::new()
                .with_name("spinner")
                .at(Vec3::new(0.0, 0.5, 0.0))
                .with_action(Action::spin_forever(Vec3::Y, 20.0)),
        );
        let ball = graph
            .add_child(
                spinner,
                SceneNode::with_geometry(Geometry::sphere(0.25))
                    .with_name("ball")
                    .at(Vec3::new(2.5, 0.0, 0.0))
                    .with_materials(set),
            )
            .unwrap();
        let camera = graph.add_to_root(
            SceneNode::new()
                .with_name("camera")
                .with_camera(Camera::with_fov(30.0))
                .with_constraint(Constraint::LookAt { target: ball }),
        );
        (graph, ball, camera)
    }

    #[test]
    fn test_document_node_order() {
        let (graph, _, _) = make_graph();
        let doc = SceneDocument::from_graph("test", &graph).unwrap();

        let names: Vec<_> = doc.nodes.iter().map(|n| n.name.as_deref()).collect();
        assert_eq!(names, vec![Some("root"), Some("spinner"), Some("ball"), Some("camera")]);
        assert_eq!(doc.nodes[0].parent, None);
        assert_eq!(doc.nodes[2].parent, Some(1));
        assert_eq!(doc.nodes[3].constraints, vec![ConstraintRecord::LookAt { target: 2 }]);
        assert_eq!(doc.material_sets, vec![vec![0, 1]]);
    }

    #[test]
    fn test_to_graph_restores_links() {
        let (graph, _, _) = make_graph();
        let doc = SceneDocument::from_graph("test", &graph).unwrap();
        let rebuilt = doc.to_graph().unwrap();

        assert_eq!(rebuilt.node_count(), graph.node_count());
        let (ball, _) = rebuilt.get_by_name("ball").unwrap();
        let (_, camera) = rebuilt.get_by_name("camera").unwrap();
        assert_eq!(camera.look_at_target(), Some(ball));
        assert_eq!(rebuilt.world_position(ball), Some(Vec3::new(2.5, 0.5, 0.0)));
        assert_eq!(rebuilt.materials_of(ball).len(), 2);
        assert_eq!(rebuilt.materials_of(ball)[1].diffuse, Color::BLUE);
    }

    #[test]
    fn test_ron_text_round_trip() {
        let (graph, _, _) = make_graph();
        let doc = SceneDocument::from_graph("test", &graph).unwrap();
        let text = doc.to_ron_string().unwrap();
        assert!(text.contains("spinner"));
        let parsed = SceneDocument::from_ron_str(&text).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_rejects_forward_parent() {
        let (graph, _, _) = make_graph();
        let mut doc = SceneDocument::from_graph("test", &graph).unwrap();
        doc.nodes[1].parent = Some(3);
        assert!(matches!(doc.to_graph(), Err(SceneLoadError::InvalidReference(_))));
    }

    #[test]
    fn test_rejects_out_of_range_target() {
        let (graph, _, _) = make_graph();
        let mut doc = SceneDocument::from_graph("test", &graph).unwrap();
        doc.nodes[3].constraints = vec![ConstraintRecord::LookAt { target: 99 }];
        assert!(matches!(doc.to_graph(), Err(SceneLoadError::InvalidReference(_))));
    }

    #[test]
    fn test_rejects_out_of_range_material() {
        let (graph, _, _) = make_graph();
        let mut doc = SceneDocument::from_graph("test", &graph).unwrap();
        doc.material_sets[0].push(7);
        assert!(matches!(doc.to_graph(), Err(SceneLoadError::InvalidReference(_))));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            SceneDocument::from_ron_str("not ron at all {"),
            Err(SceneLoadError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            SceneDocument::load("/no/such/scene.ron"),
            Err(SceneLoadError::Io(_))
        ));
    }

    #[test]
    fn test_export_rejects_dangling_target() {
        let mut other = SceneGraph::new();
        for _ in 0..5 {
            other.add_to_root(SceneNode::new());
        }
        let foreign = other.add_to_root(SceneNode::new());

        let (mut graph, _, _) = make_graph();
        graph.add_to_root(
            SceneNode::new()
                .with_name("cam")
                .with_constraint(Constraint::LookAt { target: foreign }),
        );

        match SceneDocument::from_graph("test", &graph) {
            Err(SceneSaveError::InvalidReference(msg)) => assert!(msg.contains("cam")),
            Err(other) => panic!("Expected InvalidReference, got {}", other),
            Ok(doc) => panic!("Expected InvalidReference, got {:?}", doc.nodes),
        }
    }

    #[test]
    fn test_export_rejects_unknown_material_set() {
        let mut other = SceneGraph::new();
        let m = other.add_material(Material::default());
        other.add_material_set(vec![m]).unwrap();
        let foreign = other.add_material_set(vec![m]).unwrap();

        let (mut graph, _, _) = make_graph();
        graph.add_to_root(SceneNode::new().with_name("orphan").with_materials(foreign));

        assert!(matches!(
            SceneDocument::from_graph("test", &graph),
            Err(SceneSaveError::InvalidReference(_))
        ));
    }

    #[test]
    fn test_to_graph_keeps_root_children() {
        let (graph, _, _) = make_graph();
        let rebuilt = SceneDocument::from_graph("test", &graph).unwrap().to_graph().unwrap();
        let root = rebuilt.root();
        assert_eq!(rebuilt.children(root).len(), 2);
        let (spinner, _) = rebuilt.get_by_name("spinner").unwrap();
        assert_eq!(rebuilt.parent(spinner), Some(root));
    }
}
