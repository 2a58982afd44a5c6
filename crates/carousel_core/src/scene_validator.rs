//! Scene validation
//!
//! Checks that a [`SceneGraph`] is structurally sound before it is handed to
//! a host renderer. Constraint targets and material sets must exist in the
//! graph, geometry parameters must be usable, and cameras need a field of
//! view between 0 and 180 degrees.

use std::collections::HashSet;

use crate::graph::SceneGraph;
use crate::node::Constraint;

/// Validation error found in a scene
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A look-at constraint points at a node that is not in the scene
    DanglingConstraintTarget(String),
    /// A look-at constraint points at its own node
    SelfTarget(String),
    /// A node references a material set that is not in the scene
    MissingMaterialSet(String),
    /// Geometry parameters are unusable
    InvalidGeometry { node: String, reason: String },
    /// Camera field of view outside `(0, 180)` degrees
    InvalidFieldOfView { node: String, x_fov: f32, y_fov: f32 },
    /// Action with a non-positive or non-finite duration
    InvalidAction(String),
    /// Duplicate node name found
    DuplicateName(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::DanglingConstraintTarget(node) => {
                write!(f, "Node '{}' looks at a node that is not in the scene", node)
            }
            ValidationError::SelfTarget(node) => {
                write!(f, "Node '{}' looks at itself", node)
            }
            ValidationError::MissingMaterialSet(node) => {
                write!(f, "Node '{}' uses a material set that is not in the scene", node)
            }
            ValidationError::InvalidGeometry { node, reason } => {
                write!(f, "Node '{}' has invalid geometry: {}", node, reason)
            }
            ValidationError::InvalidFieldOfView { node, x_fov, y_fov } => {
                write!(
                    f,
                    "Camera on '{}' has invalid field of view: {}x{} degrees",
                    node, x_fov, y_fov
                )
            }
            ValidationError::InvalidAction(node) => {
                write!(f, "Node '{}' has an action without a positive duration", node)
            }
            ValidationError::DuplicateName(name) => {
                write!(f, "Duplicate node name: '{}'", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Scene validator that checks for structural errors
///
/// # Example
/// ```ignore
/// let errors = SceneValidator::validate(&graph);
/// for error in &errors {
///     log::error!("Validation error: {}", error);
/// }
/// ```
pub struct SceneValidator;

impl SceneValidator {
    /// Validate a scene graph, returning all errors found
    ///
    /// Only nodes reachable from the root are inspected.
    pub fn validate(graph: &SceneGraph) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut seen_names = HashSet::new();

        for key in graph.descendants(graph.root()) {
            let Some(node) = graph.node(key) else {
                continue;
            };
            let label = node
                .name
                .clone()
                .unwrap_or_else(|| format!("{:?}", key));

            if let Some(ref name) = node.name {
                if !seen_names.insert(name.clone()) {
                    errors.push(ValidationError::DuplicateName(name.clone()));
                }
            }

            for constraint in &node.constraints {
                if let Constraint::LookAt { target } = constraint {
                    if *target == key {
                        errors.push(ValidationError::SelfTarget(label.clone()));
                    } else if !graph.contains(*target) {
                        errors.push(ValidationError::DanglingConstraintTarget(label.clone()));
                    }
                }
            }

            if let Some(set) = node.materials {
                if graph.material_set(set).is_none() {
                    errors.push(ValidationError::MissingMaterialSet(label.clone()));
                }
            }

            if let Some(ref geometry) = node.geometry {
                if let Err(reason) = geometry.check() {
                    errors.push(ValidationError::InvalidGeometry {
                        node: label.clone(),
                        reason,
                    });
                }
            }

            for action in &node.actions {
                let duration = action.duration();
                if !duration.is_finite() || duration <= 0.0 {
                    errors.push(ValidationError::InvalidAction(label.clone()));
                }
            }

            if let Some(camera) = node.camera {
                let valid = |fov: f32| fov > 0.0 && fov < 180.0;
                if !valid(camera.x_fov) || !valid(camera.y_fov) {
                    errors.push(ValidationError::InvalidFieldOfView {
                        node: label,
                        x_fov: camera.x_fov,
                        y_fov: camera.y_fov,
                    });
                }
            }
        }

        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(graph: &SceneGraph) -> Result<(), Vec<ValidationError>> {
        let errors = Self::validate(graph);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
