use crate::core::framebuffer::FrameBuffer;
use crate::core::rasterizer::Rasterizer;
use crate::pipeline::settings::RenderSettings;
use crate::pipeline::shading::SurfaceShader;
use crate::pipeline::vertex::process_mesh;
use crate::scene::camera::Camera;
use crate::scene::context::Scene;
use crate::scene::light::DirectionalLight;
use log::debug;
use std::time::{Duration, Instant};

/// Counters collected while rendering one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Triangles assembled from the index buffers.
    pub triangles_submitted: usize,
    /// Triangles that survived the clip test and were scanned.
    pub triangles_rasterized: usize,
    pub elapsed: Duration,
}

/// The high-level renderer that orchestrates the pipeline stages.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::new(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.framebuffer.width
    }

    pub fn height(&self) -> usize {
        self.framebuffer.height
    }

    /// Renders one complete frame of `scene` as seen from `camera`.
    ///
    /// The color buffer is cleared to the background and the depth buffer to
    /// +infinity first. Every mesh runs through the vertex stage, then its
    /// triangles are rasterized in parallel, one mesh after another. Without
    /// a light the default directional light is used.
    pub fn render_frame(
        &mut self,
        scene: &mut Scene,
        camera: &Camera,
        settings: &RenderSettings,
    ) -> FrameStats {
        let start = Instant::now();

        self.rasterizer.cull_mode = settings.cull_mode;
        self.rasterizer.visualize_depth = settings.visualize_depth;
        self.rasterizer.visualize_bounding_box = settings.visualize_bounding_box;
        self.framebuffer.clear(settings.background());

        // 1. Vertex stage (sequential)
        for object in &mut scene.objects {
            process_mesh(&mut object.mesh, camera);
        }
        let vertex_time = start.elapsed();

        // 2. Raster + pixel stage
        let fallback_light = DirectionalLight::default();
        let light = scene.active_light().unwrap_or(&fallback_light);

        let mut stats = FrameStats::default();
        for object in &scene.objects {
            let mesh = &object.mesh;
            let shader = SurfaceShader::new(
                &object.material,
                light,
                settings.shading_mode,
                settings.normal_map,
            );

            stats.triangles_submitted += mesh.triangle_count();
            stats.triangles_rasterized += self.rasterizer.rasterize_mesh(
                &self.framebuffer,
                mesh.transformed(),
                mesh.indices(),
                mesh.topology(),
                &shader,
            );
        }

        stats.elapsed = start.elapsed();
        debug!(
            "Frame: vertex {:.2?}, total {:.2?}, {}/{} triangles rasterized",
            vertex_time, stats.elapsed, stats.triangles_rasterized, stats.triangles_submitted
        );
        stats
    }

    /// Snapshot of the packed `0xFFRRGGBB` color buffer, row-major.
    pub fn pixels(&self) -> Vec<u32> {
        self.framebuffer.pixels()
    }
}
