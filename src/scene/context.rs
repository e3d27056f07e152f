use crate::scene::light::DirectionalLight;
use crate::scene::material::Material;
use crate::scene::mesh::Mesh;

/// A mesh together with the maps it is shaded with.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub mesh: Mesh,
    pub material: Material,
}

impl SceneObject {
    pub fn new(mesh: Mesh, material: Material) -> Self {
        Self { mesh, material }
    }
}

/// Owns every renderable object and the light list.
///
/// Shading reads a single light, the one at `active_light`.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub lights: Vec<DirectionalLight>,
    pub active_light: usize,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&mut self, object: SceneObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn add_light(&mut self, light: DirectionalLight) -> usize {
        self.lights.push(light);
        self.lights.len() - 1
    }

    /// The light used for shading, if any was added.
    pub fn active_light(&self) -> Option<&DirectionalLight> {
        self.lights.get(self.active_light)
    }

    pub fn triangle_count(&self) -> usize {
        self.objects.iter().map(|o| o.mesh.triangle_count()).sum()
    }

    /// Rotates every mesh around its local Y axis.
    pub fn rotate_all_y(&mut self, degrees: f32) {
        for object in &mut self.objects {
            object.mesh.rotate_y(degrees);
        }
    }
}
