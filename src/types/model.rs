use glam::{Affine3A, Vec3};
use tracing::debug;

use crate::error::{Result, SceneryError};
use crate::transform::Transform;
use crate::types::{Color, Material, Mesh};

/// Index of a material inside its [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

/// A mesh bound to exactly one material.
#[derive(Debug, Clone)]
pub struct Part {
    pub mesh: Mesh,
    pub material: MaterialId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Directional light shining along the object's local -Z.
    Sun,
    /// Soft rectangular light of the given edge length.
    Area { size: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub energy: f32,
    pub color: [f32; 3],
    /// Name of an object the light keeps pointing at.
    pub track_target: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Focal length for a 36 mm sensor.
    pub lens_mm: f32,
    /// Name of an object the camera keeps pointing at.
    pub track_target: Option<String>,
}

/// What a scene object is. Everything except [`ObjectKind::Part`] is
/// preview scaffolding and never reaches the exported asset.
#[derive(Debug, Clone)]
pub enum ObjectKind {
    Part(Part),
    Ground(Part),
    Light(Light),
    Camera(Camera),
    Empty,
}

impl ObjectKind {
    pub fn is_scaffolding(&self) -> bool {
        !matches!(self, ObjectKind::Part(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            ObjectKind::Part(_) => "part",
            ObjectKind::Ground(_) => "ground",
            ObjectKind::Light(_) => "light",
            ObjectKind::Camera(_) => "camera",
            ObjectKind::Empty => "empty",
        }
    }
}

/// A named object placed in the model.
///
/// `transform` is relative to `parent` when one is set, otherwise to the world.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    pub transform: Transform,
    pub parent: Option<String>,
}

/// Working set of one generator run: materials, asset parts and preview
/// scaffolding. Object names are unique within a model.
#[derive(Debug, Clone)]
pub struct Model {
    pub name: String,
    pub materials: Vec<Material>,
    pub objects: Vec<SceneObject>,
    /// Sky color seen behind the scene in previews.
    pub background: Color,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            materials: Vec::new(),
            objects: Vec::new(),
            background: Color::rgba(0.55, 0.70, 0.90, 1.0),
        }
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    /// Insert an object, rejecting names already used in this model.
    pub fn add_object(&mut self, object: SceneObject) -> Result<()> {
        if self.get(&object.name).is_some() {
            return Err(SceneryError::Layout(format!(
                "object name '{}' already used in model '{}'",
                object.name, self.name
            )));
        }
        if let ObjectKind::Part(part) | ObjectKind::Ground(part) = &object.kind {
            if self.material(part.material).is_none() {
                return Err(SceneryError::Layout(format!(
                    "object '{}' references unknown material {}",
                    object.name, part.material.0
                )));
            }
            debug!(
                name = %object.name,
                kind = object.kind.label(),
                vertices = part.mesh.vertex_count(),
                faces = part.mesh.face_count(),
                "Added mesh object"
            );
        }
        self.objects.push(object);
        Ok(())
    }

    /// Add an asset part at `transform`.
    pub fn add_part(
        &mut self,
        name: impl Into<String>,
        mesh: Mesh,
        material: MaterialId,
        transform: Transform,
    ) -> Result<()> {
        self.add_object(SceneObject {
            name: name.into(),
            kind: ObjectKind::Part(Part { mesh, material }),
            transform,
            parent: None,
        })
    }

    /// Add a transform-only node at `location`.
    pub fn add_empty(&mut self, name: impl Into<String>, location: Vec3) -> Result<()> {
        self.add_object(SceneObject {
            name: name.into(),
            kind: ObjectKind::Empty,
            transform: Transform::from_translation(location),
            parent: None,
        })
    }

    pub fn get(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.name == name)
    }

    /// Iterate over asset parts (scaffolding excluded).
    pub fn parts(&self) -> impl Iterator<Item = (&SceneObject, &Part)> {
        self.objects.iter().filter_map(|o| match &o.kind {
            ObjectKind::Part(part) => Some((o, part)),
            _ => None,
        })
    }

    pub fn part_count(&self) -> usize {
        self.parts().count()
    }

    /// Object-to-world transform, following the parent chain.
    pub fn world_transform(&self, name: &str) -> Result<Affine3A> {
        let mut affine = Affine3A::IDENTITY;
        let mut current = Some(name);
        let mut depth = 0;
        while let Some(n) = current {
            let object = self
                .get(n)
                .ok_or_else(|| SceneryError::Layout(format!("unknown object '{n}'")))?;
            affine = object.transform.to_affine() * affine;
            current = object.parent.as_deref();
            depth += 1;
            if depth > self.objects.len() {
                return Err(SceneryError::Layout(format!(
                    "parent cycle through '{name}'"
                )));
            }
        }
        Ok(affine)
    }

    /// World-space origin of an object.
    pub fn world_position(&self, name: &str) -> Result<Vec3> {
        Ok(self.world_transform(name)?.translation.into())
    }

    /// Parent `child` to `parent`, keeping the child's world placement.
    pub fn set_parent(&mut self, child: &str, parent: &str) -> Result<()> {
        if child == parent {
            return Err(SceneryError::Layout(format!(
                "object '{child}' cannot be its own parent"
            )));
        }
        let parent_world = self.world_transform(parent)?;
        // Reject cycles: the new parent must not descend from the child.
        let mut cursor = self.get(parent).and_then(|o| o.parent.clone());
        while let Some(ancestor) = cursor {
            if ancestor == child {
                return Err(SceneryError::Layout(format!(
                    "parenting '{child}' to '{parent}' would create a cycle"
                )));
            }
            cursor = self.get(&ancestor).and_then(|o| o.parent.clone());
        }
        let child_world = self.world_transform(child)?;
        let local = parent_world.inverse() * child_world;

        let object = self
            .get_mut(child)
            .ok_or_else(|| SceneryError::Layout(format!("unknown object '{child}'")))?;
        object.transform = Transform::from_affine(&local);
        object.parent = Some(parent.to_string());
        Ok(())
    }

    /// Detach `child` from its parent, keeping its world placement.
    pub fn clear_parent(&mut self, child: &str) -> Result<()> {
        let world = self.world_transform(child)?;
        let object = self
            .get_mut(child)
            .ok_or_else(|| SceneryError::Layout(format!("unknown object '{child}'")))?;
        object.transform = Transform::from_affine(&world);
        object.parent = None;
        Ok(())
    }
}
