//! SceneBuilder - Declarative scene construction
//!
//! Builds the carousel demo scene from the layout tables in
//! [`layout`](super::layout).

use carousel_core::{
    Action, AssetError, Color, Constraint, FontLibrary, Geometry, GraphError, Light,
    Material, MaterialKey, MaterialSetKey, NodeKey, SceneGraph, SceneNode, SceneValidator,
    ValidationError, Vec3,
};
use carousel_math::ring_positions;

use super::layout::{CameraRole, CameraTarget, PrimitiveKind, SceneParams, CENTER_TEXT};

/// Colors of the shared material set, in order
pub const PALETTE: [(&str, Color); 6] = [
    ("cyan", Color::CYAN),
    ("magenta", Color::MAGENTA),
    ("yellow", Color::YELLOW),
    ("red", Color::RED),
    ("blue", Color::BLUE),
    ("green", Color::GREEN),
];

/// Error building the demo scene
#[derive(Debug)]
pub enum BuildError {
    /// A font the scene needs is unavailable
    Font(AssetError),
    /// A structural graph operation failed
    Graph(GraphError),
    /// No primitives were configured, so the follow camera has no target
    EmptyCarousel,
    /// The finished graph failed validation
    Validation(Vec<ValidationError>),
}

impl From<AssetError> for BuildError {
    fn from(e: AssetError) -> Self {
        BuildError::Font(e)
    }
}

impl From<GraphError> for BuildError {
    fn from(e: GraphError) -> Self {
        BuildError::Graph(e)
    }
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::Font(e) => write!(f, "Font error: {}", e),
            BuildError::Graph(e) => write!(f, "Graph error: {}", e),
            BuildError::EmptyCarousel => write!(f, "Carousel has no primitives"),
            BuildError::Validation(errors) => {
                write!(f, "Scene failed validation with {} error(s)", errors.len())?;
                for error in errors {
                    write!(f, "; {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Font(e) => Some(e),
            BuildError::Graph(e) => Some(e),
            BuildError::EmptyCarousel | BuildError::Validation(_) => None,
        }
    }
}

/// The built demo scene with handles to its notable nodes
pub struct DemoScene {
    /// The scene graph itself
    pub graph: SceneGraph,
    pub ambient_light: NodeKey,
    pub overhead_camera: NodeKey,
    pub fixed_camera: NodeKey,
    pub follow_camera: NodeKey,
    pub center_label: NodeKey,
    /// Rotating parent of the primitives
    pub carousel: NodeKey,
    /// Carousel children in placement order
    pub primitives: Vec<(PrimitiveKind, NodeKey)>,
    pub floor: NodeKey,
    /// The six palette materials, in palette order
    pub materials: Vec<MaterialKey>,
    /// The one material set shared by the label and every primitive
    pub material_set: MaterialSetKey,
}

impl DemoScene {
    /// Node of a camera by role
    pub fn camera(&self, role: CameraRole) -> NodeKey {
        match role {
            CameraRole::Overhead => self.overhead_camera,
            CameraRole::Fixed => self.fixed_camera,
            CameraRole::Follow => self.follow_camera,
        }
    }

    /// Node of the first primitive of the given kind
    pub fn primitive(&self, kind: PrimitiveKind) -> Option<NodeKey> {
        self.primitives
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, key)| *key)
    }

    /// The primitive the follow camera tracks
    pub fn follow_target(&self) -> Option<NodeKey> {
        self.graph
            .node(self.follow_camera)
            .and_then(|node| node.look_at_target())
    }
}

/// Builder for the carousel demo scene
///
/// # Example
/// ```ignore
/// let scene = SceneBuilder::new()
///     .with_params(config.scene_params())
///     .with_fonts(config.fonts.font_library()?)
///     .build()?;
/// ```
pub struct SceneBuilder {
    params: SceneParams,
    fonts: FontLibrary,
}

impl SceneBuilder {
    /// Create a builder with default layout and the default font families
    pub fn new() -> Self {
        let params = SceneParams::default();
        let fonts = FontLibrary::new()
            .with_family(&params.label_font)
            .with_family(&params.primitive_font);
        Self { params, fonts }
    }

    /// Replace the layout parameters
    pub fn with_params(mut self, params: SceneParams) -> Self {
        self.params = params;
        self
    }

    /// Replace the font library
    pub fn with_fonts(mut self, fonts: FontLibrary) -> Self {
        self.fonts = fonts;
        self
    }

    /// Layout parameters in use
    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    /// Build a new, independent scene
    ///
    /// Every call produces a fresh graph; nothing is shared between results.
    pub fn build(&self) -> Result<DemoScene, BuildError> {
        let params = &self.params;
        let size = params.object_size;
        let radius = params.carousel_radius();

        if params.primitives.is_empty() {
            return Err(BuildError::EmptyCarousel);
        }

        // Resolve fonts before touching the graph
        let label_font = self.fonts.resolve(&params.label_font, params.label_font_size)?;
        let primitive_font = if params.needs_primitive_font() {
            self.fonts.resolve(&params.primitive_font, params.primitive_font_size)?
        } else {
            label_font.clone()
        };

        // root + ambient + 3 cameras + carousel + label + primitives + floor
        let mut graph = SceneGraph::with_capacity(8 + params.primitives.len());

        let materials: Vec<MaterialKey> = PALETTE
            .iter()
            .map(|(name, color)| graph.add_material(Material::glossy(*color).with_name(*name)))
            .collect();
        let material_set = graph.add_material_set(materials.clone())?;

        let ambient_light = graph.add_to_root(
            SceneNode::new()
                .with_name("ambient_light")
                .with_light(Light::ambient()),
        );

        let follow_camera = add_camera(&mut graph, CameraRole::Follow, params);
        let overhead_camera = add_camera(&mut graph, CameraRole::Overhead, params);
        let fixed_camera = add_camera(&mut graph, CameraRole::Fixed, params);

        let carousel = graph.add_to_root(
            SceneNode::new()
                .with_name("carousel")
                .at(Vec3::new(0.0, size, 0.0))
                .with_action(Action::spin_forever(Vec3::Y, params.rotation_period)),
        );

        let center_label = graph.add_to_root(
            SceneNode::with_geometry(Geometry::text(CENTER_TEXT, label_font, size / 10.0))
                .with_name("center_label")
                .with_materials(material_set)
                .with_constraint(Constraint::Billboard),
        );

        let slots = ring_positions(radius, params.primitives.len());
        let mut primitives = Vec::with_capacity(slots.len());
        for (kind, position) in params.primitives.iter().copied().zip(slots) {
            let key = graph.add_child(
                carousel,
                SceneNode::with_geometry(kind.geometry(size, &primitive_font))
                    .with_name(kind.name())
                    .at(position)
                    .with_materials(material_set),
            )?;
            log::debug!("Placed {} at {:?}", kind.name(), position);
            primitives.push((kind, key));
        }

        let last_primitive = primitives
            .last()
            .map(|(_, key)| *key)
            .ok_or(BuildError::EmptyCarousel)?;

        let cameras = [
            (CameraRole::Follow, follow_camera),
            (CameraRole::Overhead, overhead_camera),
            (CameraRole::Fixed, fixed_camera),
        ];
        for (role, key) in cameras {
            let target = match role.target() {
                CameraTarget::Carousel => carousel,
                CameraTarget::LastPrimitive => last_primitive,
            };
            graph.set_constraints(key, vec![Constraint::LookAt { target }])?;
        }

        let floor = graph.add_to_root(SceneNode::with_geometry(Geometry::Floor).with_name("floor"));

        SceneValidator::validate_or_error(&graph).map_err(BuildError::Validation)?;

        log::info!(
            "Built carousel scene: {} nodes, {} primitives, radius {}",
            graph.node_count(),
            primitives.len(),
            radius
        );

        Ok(DemoScene {
            graph,
            ambient_light,
            overhead_camera,
            fixed_camera,
            follow_camera,
            center_label,
            carousel,
            primitives,
            floor,
            materials,
            material_set,
        })
    }
}

fn add_camera(graph: &mut SceneGraph, role: CameraRole, params: &SceneParams) -> NodeKey {
    let mut node = SceneNode::with_geometry(params.camera_marker())
        .with_name(role.name())
        .at(role.position(params))
        .with_camera(role.camera(params));
    if let Some(light) = role.light() {
        node = node.with_light(light);
    }
    log::debug!("Added {} at {:?}", role.name(), node.position);
    graph.add_to_root(node)
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}
