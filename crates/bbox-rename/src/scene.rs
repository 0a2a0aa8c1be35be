//! # Scene Document
//!
//! TOML scene description used as the host for batch renames. Objects carry
//! a type, a selection flag, an optional parent, a local transform and
//! local bounds; collections list object ids in order.
//!
//! ## Table of Contents
//! 1. SceneObject - Object record
//! 2. Collection - Ordered object membership
//! 3. Scene - Document, loading and validation
//! 4. World transforms
//! 5. Unique naming
//! 6. RenameHost implementation

use glam::{DAffine3, DQuat, DVec3};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

use crate::bounds::LocalBounds;
use crate::error::SceneError;
use crate::host::RenameHost;
use crate::matcher::SpatialItem;

// ============================================================================
// 1. SceneObject - Object record
// ============================================================================

/// Object type. Only meshes take part in a batch rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    #[default]
    Mesh,
    Empty,
    Curve,
    Light,
    Camera,
    Other,
}

/// Local transform relative to the parent (or world for root objects)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectTransform {
    /// Translation [x, y, z]
    #[serde(default)]
    pub translation: [f64; 3],
    /// Rotation quaternion [x, y, z, w]
    #[serde(default = "identity_rotation")]
    pub rotation: [f64; 4],
    /// Scale [x, y, z]
    #[serde(default = "unit_scale")]
    pub scale: [f64; 3],
}

fn identity_rotation() -> [f64; 4] { [0.0, 0.0, 0.0, 1.0] }
fn unit_scale() -> [f64; 3] { [1.0, 1.0, 1.0] }

impl Default for ObjectTransform {
    fn default() -> Self {
        Self {
            translation: [0.0; 3],
            rotation: identity_rotation(),
            scale: unit_scale(),
        }
    }
}

impl ObjectTransform {
    pub fn from_translation(translation: DVec3) -> Self {
        Self {
            translation: translation.to_array(),
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, rotation: DQuat) -> Self {
        self.rotation = rotation.to_array();
        self
    }

    pub fn with_scale(mut self, scale: DVec3) -> Self {
        self.scale = scale.to_array();
        self
    }

    /// Affine matrix for this transform. A zero-length quaternion is
    /// treated as no rotation.
    pub fn to_affine(&self) -> DAffine3 {
        let raw = DQuat::from_array(self.rotation);
        let rotation = if raw.length_squared() > 0.0 {
            raw.normalize()
        } else {
            DQuat::IDENTITY
        };
        DAffine3::from_scale_rotation_translation(
            DVec3::from_array(self.scale),
            rotation,
            DVec3::from_array(self.translation),
        )
    }
}

/// A single object in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Stable identity
    pub id: Uuid,
    /// Display name, unique within the scene
    pub name: String,
    #[serde(default)]
    pub kind: ObjectKind,
    #[serde(default)]
    pub selected: bool,
    /// Parent object, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Uuid>,
    #[serde(default)]
    pub transform: ObjectTransform,
    #[serde(default)]
    pub bounds: LocalBounds,
}

impl SceneObject {
    /// New unselected root object with a fresh id
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            selected: false,
            parent: None,
            transform: ObjectTransform::default(),
            bounds: LocalBounds::default(),
        }
    }

    pub fn mesh(name: impl Into<String>) -> Self {
        Self::new(name, ObjectKind::Mesh)
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn at(mut self, x: f64, y: f64, z: f64) -> Self {
        self.transform.translation = [x, y, z];
        self
    }

    pub fn with_transform(mut self, transform: ObjectTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_bounds(mut self, bounds: LocalBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_parent(mut self, parent: Uuid) -> Self {
        self.parent = Some(parent);
        self
    }
}

// ============================================================================
// 2. Collection - Ordered object membership
// ============================================================================

/// Named, ordered group of objects. An object may belong to several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<Uuid>,
}

// ============================================================================
// 3. Scene - Document, loading and validation
// ============================================================================

/// Scene document, parsed from `*.scene.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    #[serde(default)]
    pub collections: Vec<Collection>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a scene from a TOML file
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scene = Self::from_toml_str(&content)?;
        debug!(
            "Loaded scene {} ({} objects, {} collections)",
            path.display(),
            scene.objects.len(),
            scene.collections.len()
        );
        Ok(scene)
    }

    /// Parse and validate a scene from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, SceneError> {
        let scene: Scene = toml::from_str(content)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn to_toml_string(&self) -> Result<String, SceneError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the scene to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), SceneError> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|source| SceneError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check id uniqueness, collection names, membership and parent chains
    pub fn validate(&self) -> Result<(), SceneError> {
        let mut ids = HashSet::new();
        for object in &self.objects {
            if !ids.insert(object.id) {
                return Err(SceneError::DuplicateObject(object.id));
            }
        }

        let mut names = HashSet::new();
        for collection in &self.collections {
            if !names.insert(collection.name.as_str()) {
                return Err(SceneError::DuplicateCollection(collection.name.clone()));
            }
            if let Some(id) = collection.objects.iter().find(|id| !ids.contains(*id)) {
                return Err(SceneError::UnknownMember {
                    collection: collection.name.clone(),
                    id: *id,
                });
            }
            let mut members = HashSet::new();
            if let Some(id) = collection.objects.iter().find(|id| !members.insert(**id)) {
                return Err(SceneError::DuplicateMember {
                    collection: collection.name.clone(),
                    id: *id,
                });
            }
        }

        for object in &self.objects {
            self.world_matrix(object.id)?;
        }
        Ok(())
    }

    /// Add an object and return its id
    pub fn add_object(&mut self, object: SceneObject) -> Uuid {
        let id = object.id;
        self.objects.push(object);
        id
    }

    /// Add a collection (replacing one with the same name)
    pub fn add_collection(&mut self, name: impl Into<String>, objects: Vec<Uuid>) {
        let name = name.into();
        self.collections.retain(|c| c.name != name);
        self.collections.push(Collection { name, objects });
    }

    /// Exact-name collection lookup
    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    pub fn object(&self, id: Uuid) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn object_mut(&mut self, id: Uuid) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    // ========================================================================
    // 4. World transforms
    // ========================================================================

    /// World matrix of an object, composed root → leaf through parents
    pub fn world_matrix(&self, id: Uuid) -> Result<DAffine3, SceneError> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut current = self.object(id).ok_or(SceneError::ObjectNotFound(id))?;

        loop {
            if !visited.insert(current.id) {
                return Err(SceneError::ParentCycle(current.id));
            }
            chain.push(current);
            match current.parent {
                Some(parent) => {
                    current = self.object(parent).ok_or(SceneError::UnknownParent {
                        child: current.id,
                        parent,
                    })?;
                }
                None => break,
            }
        }

        Ok(chain
            .iter()
            .rev()
            .fold(DAffine3::IDENTITY, |world, object| world * object.transform.to_affine()))
    }

    /// Mean of the object's 8 bounds corners in world space
    pub fn world_bounds_center(&self, id: Uuid) -> Result<DVec3, SceneError> {
        let world = self.world_matrix(id)?;
        let object = self.object(id).ok_or(SceneError::ObjectNotFound(id))?;
        Ok(object.bounds.world_center(&world))
    }

    // ========================================================================
    // 5. Unique naming
    // ========================================================================

    fn name_taken(&self, name: &str, except: Uuid) -> bool {
        self.objects.iter().any(|o| o.id != except && o.name == name)
    }

    /// First free name for `desired` when it is held by another object:
    /// `Name`, then `Name.001`, `Name.002`, … An existing numeric suffix on
    /// `desired` is replaced rather than extended.
    pub fn unique_name(&self, desired: &str, for_object: Uuid) -> String {
        if !self.name_taken(desired, for_object) {
            return desired.to_string();
        }
        let base = strip_numeric_suffix(desired);
        (1u32..)
            .map(|n| format!("{base}.{n:03}"))
            .find(|candidate| !self.name_taken(candidate, for_object))
            .unwrap_or_else(|| desired.to_string())
    }

    /// Rename an object, keeping names unique. Returns the applied name.
    pub fn set_name(&mut self, id: Uuid, desired: &str) -> Result<String, SceneError> {
        let name = self.unique_name(desired, id);
        let object = self.object_mut(id).ok_or(SceneError::ObjectNotFound(id))?;
        object.name = name.clone();
        Ok(name)
    }
}

/// `Rock_low.004` → `Rock_low`; names without a `.NNN` tail are unchanged
fn strip_numeric_suffix(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((base, digits))
            if !base.is_empty() && digits.len() >= 3 && digits.bytes().all(|b| b.is_ascii_digit()) =>
        {
            base
        }
        _ => name,
    }
}

// ============================================================================
// 6. RenameHost implementation
// ============================================================================

impl RenameHost for Scene {
    type Id = Uuid;

    fn has_collection(&self, name: &str) -> bool {
        self.collection(name).is_some()
    }

    fn selected_meshes(&self, collection: &str) -> Result<Vec<SpatialItem<Uuid>>, SceneError> {
        let Some(collection) = self.collection(collection) else {
            return Ok(Vec::new());
        };

        let mut items = Vec::new();
        let mut seen = HashSet::new();
        for id in &collection.objects {
            if !seen.insert(*id) {
                continue;
            }
            let object = self.object(*id).ok_or(SceneError::ObjectNotFound(*id))?;
            if object.kind != ObjectKind::Mesh || !object.selected {
                continue;
            }
            let center = self.world_bounds_center(*id)?;
            items.push(SpatialItem::new(object.id, object.name.clone(), center));
        }
        Ok(items)
    }

    fn rename(&mut self, id: &Uuid, new_name: &str) -> Result<String, SceneError> {
        self.set_name(*id, new_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[objects]]
id = "00000000-0000-0000-0000-000000000001"
name = "Rock_high"
kind = "mesh"
selected = true
[objects.transform]
translation = [0.0, 0.0, 0.0]
[objects.bounds]
min = [-1.0, -1.0, -1.0]
max = [1.0, 1.0, 1.0]

[[objects]]
id = "00000000-0000-0000-0000-000000000002"
name = "Lamp"
kind = "light"
selected = true

[[objects]]
id = "00000000-0000-0000-0000-000000000003"
name = "Cube"
selected = true
[objects.transform]
translation = [0.5, 0.0, 0.0]

[[collections]]
name = "high_poly"
objects = [
    "00000000-0000-0000-0000-000000000001",
    "00000000-0000-0000-0000-000000000002",
]

[[collections]]
name = "low_poly"
objects = ["00000000-0000-0000-0000-000000000003"]
"#;

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn test_parse_sample_with_defaults() {
        let scene = Scene::from_toml_str(SAMPLE).unwrap();
        assert_eq!(scene.objects.len(), 3);
        assert_eq!(scene.collections.len(), 2);

        let cube = scene.object(id(3)).unwrap();
        assert_eq!(cube.kind, ObjectKind::Mesh);
        assert_eq!(cube.transform.scale, [1.0, 1.0, 1.0]);
        assert_eq!(cube.bounds, LocalBounds::default());

        let lamp = scene.object(id(2)).unwrap();
        assert_eq!(lamp.name, "Lamp");
        assert_eq!(lamp.kind, ObjectKind::Light);
    }

    #[test]
    fn test_selected_meshes_filters_kind_and_selection() {
        let scene = Scene::from_toml_str(SAMPLE).unwrap();
        let sources = scene.selected_meshes("high_poly").unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name, "Rock_high");
        assert_eq!(sources[0].center, DVec3::ZERO);

        let targets = scene.selected_meshes("low_poly").unwrap();
        assert_eq!(targets[0].center, DVec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_unselected_objects_are_skipped() {
        let mut scene = Scene::new();
        let a = scene.add_object(SceneObject::mesh("A").selected(true));
        let b = scene.add_object(SceneObject::mesh("B"));
        scene.add_collection("group", vec![b, a]);

        let items = scene.selected_meshes("group").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, a);
    }

    #[test]
    fn test_repeated_member_is_gathered_once() {
        let mut scene = Scene::new();
        let a = scene.add_object(SceneObject::mesh("A").selected(true));
        let b = scene.add_object(SceneObject::mesh("B").selected(true));
        scene.add_collection("group", vec![a, b, a]);

        let order: Vec<Uuid> = scene
            .selected_meshes("group")
            .unwrap()
            .into_iter()
            .map(|item| item.id)
            .collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn test_collection_order_is_preserved() {
        let mut scene = Scene::new();
        let a = scene.add_object(SceneObject::mesh("A").selected(true));
        let b = scene.add_object(SceneObject::mesh("B").selected(true));
        let c = scene.add_object(SceneObject::mesh("C").selected(true));
        scene.add_collection("group", vec![c, a, b]);

        let order: Vec<Uuid> = scene
            .selected_meshes("group")
            .unwrap()
            .into_iter()
            .map(|item| item.id)
            .collect();
        assert_eq!(order, vec![c, a, b]);
    }

    #[test]
    fn test_world_matrix_composes_parents() {
        let mut scene = Scene::new();
        let parent = scene.add_object(
            SceneObject::new("Root", ObjectKind::Empty).with_transform(
                ObjectTransform::from_translation(DVec3::new(10.0, 0.0, 0.0)).with_scale(DVec3::splat(2.0)),
            ),
        );
        let child = scene.add_object(
            SceneObject::mesh("Child")
                .at(1.0, 1.0, 0.0)
                .with_bounds(LocalBounds::cube(0.5))
                .with_parent(parent),
        );

        // Child local (1, 1, 0) scaled by parent → (2, 2, 0), then + (10, 0, 0)
        assert_eq!(scene.world_bounds_center(child).unwrap(), DVec3::new(12.0, 2.0, 0.0));
    }

    #[test]
    fn test_rotated_parent_moves_child_center() {
        let mut scene = Scene::new();
        let parent = scene.add_object(
            SceneObject::new("Pivot", ObjectKind::Empty).with_transform(
                ObjectTransform::default().with_rotation(DQuat::from_rotation_y(std::f64::consts::PI)),
            ),
        );
        let child = scene.add_object(SceneObject::mesh("Arm").at(3.0, 0.0, 0.0).with_parent(parent));

        let center = scene.world_bounds_center(child).unwrap();
        assert!((center - DVec3::new(-3.0, 0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_parent_cycle_is_rejected() {
        let mut scene = Scene::new();
        let mut a = SceneObject::mesh("A");
        let mut b = SceneObject::mesh("B");
        a.parent = Some(b.id);
        b.parent = Some(a.id);
        let a_id = scene.add_object(a);
        scene.add_object(b);

        assert!(matches!(scene.world_matrix(a_id), Err(SceneError::ParentCycle(_))));
        assert!(scene.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_documents() {
        let duplicate_id = r#"
[[objects]]
id = "00000000-0000-0000-0000-000000000001"
name = "A"
[[objects]]
id = "00000000-0000-0000-0000-000000000001"
name = "B"
"#;
        assert!(matches!(
            Scene::from_toml_str(duplicate_id),
            Err(SceneError::DuplicateObject(_))
        ));

        let unknown_member = r#"
[[collections]]
name = "high_poly"
objects = ["00000000-0000-0000-0000-000000000009"]
"#;
        assert!(matches!(
            Scene::from_toml_str(unknown_member),
            Err(SceneError::UnknownMember { .. })
        ));

        let duplicate_collection = r#"
[[collections]]
name = "high_poly"
[[collections]]
name = "high_poly"
"#;
        assert!(matches!(
            Scene::from_toml_str(duplicate_collection),
            Err(SceneError::DuplicateCollection(_))
        ));

        let duplicate_member = r#"
[[objects]]
id = "00000000-0000-0000-0000-000000000011"
name = "Cube"
[[collections]]
name = "low_poly"
objects = [
    "00000000-0000-0000-0000-000000000011",
    "00000000-0000-0000-0000-000000000011",
]
"#;
        match Scene::from_toml_str(duplicate_member) {
            Err(SceneError::DuplicateMember { collection, id }) => {
                assert_eq!(collection, "low_poly");
                assert_eq!(id, Uuid::from_u128(0x11));
            }
            other => panic!("expected DuplicateMember, got {other:?}"),
        }

        let unknown_parent = r#"
[[objects]]
id = "00000000-0000-0000-0000-000000000001"
name = "A"
parent = "00000000-0000-0000-0000-000000000002"
"#;
        assert!(matches!(
            Scene::from_toml_str(unknown_parent),
            Err(SceneError::UnknownParent { .. })
        ));
    }

    #[test]
    fn test_set_name_keeps_names_unique() {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::mesh("Rock_low"));
        let t = scene.add_object(SceneObject::mesh("Cube"));
        let u = scene.add_object(SceneObject::mesh("Cube.001"));

        assert_eq!(scene.set_name(t, "Rock_low").unwrap(), "Rock_low.001");
        assert_eq!(scene.set_name(u, "Rock_low").unwrap(), "Rock_low.002");
        assert_eq!(scene.set_name(u, "Rock_low.001").unwrap(), "Rock_low.002");
    }

    #[test]
    fn test_set_name_to_own_name_is_unchanged() {
        let mut scene = Scene::new();
        let a = scene.add_object(SceneObject::mesh("Rock_low"));
        assert_eq!(scene.set_name(a, "Rock_low").unwrap(), "Rock_low");
    }

    #[test]
    fn test_strip_numeric_suffix() {
        assert_eq!(strip_numeric_suffix("Rock.004"), "Rock");
        assert_eq!(strip_numeric_suffix("Rock.1"), "Rock.1");
        assert_eq!(strip_numeric_suffix("v1.2.0100"), "v1.2");
        assert_eq!(strip_numeric_suffix(".001"), ".001");
        assert_eq!(strip_numeric_suffix("Rock"), "Rock");
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("props.scene.toml");

        let mut scene = Scene::new();
        let rock = scene.add_object(
            SceneObject::mesh("Rock_high")
                .selected(true)
                .at(1.0, 2.0, 3.0)
                .with_bounds(LocalBounds::cube(1.0)),
        );
        let child = scene.add_object(SceneObject::mesh("Pebble").with_parent(rock));
        scene.add_collection("high_poly", vec![rock, child]);

        scene.save(&path).unwrap();
        let loaded = Scene::load(&path).unwrap();
        assert_eq!(loaded, scene);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Scene::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, SceneError::Io { .. }));
    }
}
