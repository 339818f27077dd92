pub mod bounds;
pub mod color;
pub mod indexed;
pub mod material;
pub mod mesh;
pub mod model;

pub use bounds::BoundingBox;
pub use color::Color;
pub use indexed::IndexedMesh;
pub use material::{DEFAULT_ROUGHNESS, Material};
pub use mesh::{Face, Mesh};
pub use model::{Camera, Light, LightKind, MaterialId, Model, ObjectKind, Part, SceneObject};
