use crate::io::config::{CameraConfig, Config, MeshConfig};
use crate::io::error::LoadError;
use crate::io::obj_loader::{ObjOptions, load_obj};
use crate::pipeline::settings::parse_topology;
use crate::scene::camera::Camera;
use crate::scene::context::{Scene, SceneObject};
use crate::scene::light::DirectionalLight;
use crate::scene::material::{MapKind, Material};
use crate::scene::mesh::Mesh;
use crate::scene::texture::Texture;
use log::{debug, info, warn};
use nalgebra::{Point3, Vector3};
use std::sync::Arc;

/// Half extent of the quad rendered when no mesh file is configured.
const FALLBACK_QUAD_HALF_SIZE: f32 = 10.0;

/// Builds the perspective camera described by `[camera]`.
pub fn build_camera(config: &CameraConfig, width: usize, height: usize) -> Camera {
    let aspect_ratio = width as f32 / height.max(1) as f32;
    let mut camera = Camera::new(Point3::from(config.origin), config.fov.to_radians(), aspect_ratio);
    camera.near = config.near;
    camera.far = config.far;
    camera.yaw = config.yaw.to_radians();
    camera.pitch = config.pitch.to_radians();
    camera.update_matrices();
    camera
}

/// Initial resource loading (heavy I/O): mesh, texture maps and the light.
pub fn build_scene(config: &Config) -> Result<Scene, LoadError> {
    let mut scene = Scene::new();

    let mesh = build_mesh(&config.mesh)?;
    let material = build_material(&config.mesh);
    info!(
        "Mesh ready: {} vertices, {} triangles ({:?})",
        mesh.vertices().len(),
        mesh.triangle_count(),
        mesh.topology()
    );
    scene.add_object(SceneObject::new(mesh, material));

    scene.add_light(DirectionalLight::new(
        Vector3::from(config.light.direction),
        config.light.intensity,
    ));

    Ok(scene)
}

fn build_mesh(config: &MeshConfig) -> Result<Mesh, LoadError> {
    let mut mesh = match &config.path {
        Some(path) => load_obj(
            path,
            ObjOptions {
                topology: parse_topology(&config.topology),
                flip_handedness: config.flip_handedness,
            },
        )?,
        None => {
            info!("No mesh configured, rendering a quad");
            Mesh::create_quad(FALLBACK_QUAD_HALF_SIZE)
        }
    };

    mesh.translate(&Vector3::from(config.position));
    let [rx, ry, rz] = config.rotation;
    mesh.rotate_x(rx);
    mesh.rotate_y(ry);
    mesh.rotate_z(rz);
    Ok(mesh)
}

fn build_material(config: &MeshConfig) -> Material {
    Material::new(
        load_map(config.diffuse.as_deref(), MapKind::Diffuse),
        load_map(config.normal.as_deref(), MapKind::Normal),
        load_map(config.gloss.as_deref(), MapKind::Gloss),
        load_map(config.specular.as_deref(), MapKind::Specular),
    )
}

/// Loads one texture map, falling back to a neutral solid map on failure.
fn load_map(path: Option<&str>, kind: MapKind) -> Arc<Texture> {
    let texture = match path {
        Some(path) => Texture::load(path).unwrap_or_else(|e| {
            warn!("{}, using a solid {:?} map", e, kind);
            Material::fallback_texture(kind)
        }),
        None => {
            debug!("No {:?} map configured, using a solid one", kind);
            Material::fallback_texture(kind)
        }
    };
    Arc::new(texture)
}
