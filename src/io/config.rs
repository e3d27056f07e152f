use crate::io::error::LoadError;
use log::info;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default)]
    pub mesh: MeshConfig,
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    // --- Output ---
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_frames")]
    pub frames: usize,
    /// Degrees of Y rotation applied to every mesh between frames.
    #[serde(default)]
    pub rotation_speed: f32,

    // --- Pipeline & Debug ---
    #[serde(default = "default_cull_mode")]
    pub cull_mode: String, // "back", "front", "none"
    #[serde(default = "default_shading_mode")]
    pub shading_mode: String, // "combined", "observed_area", "diffuse", "specular"
    #[serde(default = "default_true")]
    pub normal_map: bool,
    #[serde(default)]
    pub visualize_depth: bool,
    #[serde(default)]
    pub visualize_bounding_box: bool,
    #[serde(default)]
    pub uniform_background: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: default_output(),
            frames: default_frames(),
            rotation_speed: 0.0,
            cull_mode: default_cull_mode(),
            shading_mode: default_shading_mode(),
            normal_map: true,
            visualize_depth: false,
            visualize_bounding_box: false,
            uniform_background: false,
        }
    }
}

fn default_width() -> usize {
    640
}
fn default_height() -> usize {
    480
}
fn default_output() -> String {
    "output.png".to_string()
}
fn default_frames() -> usize {
    1
}
fn default_cull_mode() -> String {
    "back".to_string()
}
fn default_shading_mode() -> String {
    "combined".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_origin")]
    pub origin: [f32; 3],
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub pitch: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

fn default_origin() -> [f32; 3] {
    [0.0, 0.0, -50.0]
}
fn default_fov() -> f32 {
    45.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}

#[derive(Debug, Deserialize)]
pub struct LightConfig {
    #[serde(default = "default_light_direction")]
    pub direction: [f32; 3],
    #[serde(default = "default_light_intensity")]
    pub intensity: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: default_light_direction(),
            intensity: default_light_intensity(),
        }
    }
}

fn default_light_direction() -> [f32; 3] {
    [0.577, -0.577, 0.577]
}
fn default_light_intensity() -> f32 {
    7.0
}

#[derive(Debug, Deserialize)]
pub struct MeshConfig {
    /// OBJ file; a flat quad is rendered when absent.
    pub path: Option<String>,
    #[serde(default = "default_topology")]
    pub topology: String, // "triangle_list", "triangle_strip"
    /// Convert a right-handed asset into the left-handed scene space.
    #[serde(default)]
    pub flip_handedness: bool,

    // --- Transform ---
    #[serde(default)]
    pub position: [f32; 3],
    /// Euler angles in degrees, applied X then Y then Z.
    #[serde(default)]
    pub rotation: [f32; 3],

    // --- Material Textures ---
    pub diffuse: Option<String>,
    pub normal: Option<String>,
    pub gloss: Option<String>,
    pub specular: Option<String>,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            path: None,
            topology: default_topology(),
            flip_handedness: false,
            position: [0.0; 3],
            rotation: [0.0; 3],
            diffuse: None,
            normal: None,
            gloss: None,
            specular: None,
        }
    }
}

fn default_topology() -> String {
    "triangle_list".to_string()
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| LoadError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded config: {:?}", path);
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!((config.render.width, config.render.height), (640, 480));
        assert_eq!(config.render.frames, 1);
        assert_eq!(config.render.cull_mode, "back");
        assert!(config.render.normal_map);
        assert_eq!(config.camera.origin, [0.0, 0.0, -50.0]);
        assert_eq!(config.light.intensity, 7.0);
        assert!(config.mesh.path.is_none());
        assert_eq!(config.mesh.topology, "triangle_list");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::parse(
            r#"
            [render]
            width = 320
            shading_mode = "specular"

            [mesh]
            path = "assets/vehicle.obj"
            rotation = [0.0, 90.0, 0.0]
            "#,
        )
        .unwrap();

        assert_eq!(config.render.width, 320);
        assert_eq!(config.render.height, 480);
        assert_eq!(config.render.shading_mode, "specular");
        assert_eq!(config.mesh.path.as_deref(), Some("assets/vehicle.obj"));
        assert_eq!(config.mesh.rotation, [0.0, 90.0, 0.0]);
        assert_eq!(config.camera.fov, 45.0);
    }

    #[test]
    fn absent_mesh_section_defaults_to_triangle_list() {
        let config = Config::parse("[render]\nwidth = 100\n").unwrap();
        assert_eq!(config.mesh.topology, "triangle_list");
        assert_eq!(Config::default().mesh.topology, "triangle_list");
        assert_eq!(MeshConfig::default().position, [0.0; 3]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Config::load("definitely/not/here.toml");
        assert!(matches!(err, Err(LoadError::Io { .. })));
    }
}
