use crate::core::color::ColorRgb;
use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::{PrimitiveTopology, VertexOut};
use crate::core::math::interpolation::{
    barycentric_weights, edge_functions, interpolate_depth, interpolate_w,
    perspective_interpolate, remap, signed_area,
};
use crate::core::math::transform::{is_inside_ndc, ndc_to_screen};
use crate::core::pipeline::{Fragment, PixelShader};
use nalgebra::{Point2, Vector3};
use rayon::prelude::*;
use std::fmt;

/// Depth range stretched over black..white by the depth visualization.
const DEPTH_VIEW_RANGE: (f32, f32) = (0.985, 1.0);

/// The Rasterizer is responsible for drawing triangles onto the FrameBuffer.
#[derive(Debug, Clone, Copy)]
pub struct Rasterizer {
    pub cull_mode: CullMode,
    /// Paint every triangle's bounding box white instead of shading.
    pub visualize_bounding_box: bool,
    /// Output remapped depth as grayscale instead of shading.
    pub visualize_depth: bool,
}

/// Which triangle winding survives the per-pixel inside test.
///
/// `Back` keeps triangles with positive signed raster area (clockwise on
/// screen, the front faces of a left-handed scene), `Front` keeps the
/// negative ones and `None` keeps both.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub enum CullMode {
    None,
    #[default]
    Back,
    Front,
}

impl CullMode {
    /// Next mode in the `None -> Back -> Front -> None` cycle.
    pub fn next(self) -> Self {
        match self {
            CullMode::None => CullMode::Back,
            CullMode::Back => CullMode::Front,
            CullMode::Front => CullMode::None,
        }
    }

    #[inline(always)]
    fn accepts(self, edges: Vector3<f32>) -> bool {
        let positive = edges.x > 0.0 && edges.y > 0.0 && edges.z > 0.0;
        let negative = edges.x < 0.0 && edges.y < 0.0 && edges.z < 0.0;
        match self {
            CullMode::Back => positive,
            CullMode::Front => negative,
            CullMode::None => positive || negative,
        }
    }
}

impl fmt::Display for CullMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CullMode::None => "none",
            CullMode::Back => "back",
            CullMode::Front => "front",
        };
        f.write_str(name)
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            cull_mode: CullMode::Back,
            visualize_bounding_box: false,
            visualize_depth: false,
        }
    }

    /// Rasterizes every triangle of one mesh in parallel.
    ///
    /// Triangles are assembled from `indices` according to `topology`. For
    /// triangle lists, a triangle with any vertex outside the [-1, 1] NDC
    /// square is dropped whole. Returns the number of triangles that reached
    /// the pixel loop.
    pub fn rasterize_mesh<S: PixelShader>(
        &self,
        framebuffer: &FrameBuffer,
        vertices: &[VertexOut],
        indices: &[u32],
        topology: PrimitiveTopology,
        shader: &S,
    ) -> usize {
        let triangle_count = topology.triangle_count(indices.len());

        (0..triangle_count)
            .into_par_iter()
            .map(|n| {
                let [i0, i1, i2] = topology.triangle_indices(indices, n);
                let (Some(v0), Some(v1), Some(v2)) = (
                    vertices.get(i0 as usize),
                    vertices.get(i1 as usize),
                    vertices.get(i2 as usize),
                ) else {
                    return false;
                };

                if topology == PrimitiveTopology::TriangleList
                    && !(is_inside_ndc(&v0.position)
                        && is_inside_ndc(&v1.position)
                        && is_inside_ndc(&v2.position))
                {
                    return false;
                }

                self.rasterize_triangle(framebuffer, &[*v0, *v1, *v2], shader);
                true
            })
            .filter(|&drawn| drawn)
            .count()
    }

    /// Scans the bounding box of one triangle, depth-tests covered pixels and
    /// shades the survivors.
    pub fn rasterize_triangle<S: PixelShader>(
        &self,
        framebuffer: &FrameBuffer,
        triangle: &[VertexOut; 3],
        shader: &S,
    ) {
        if framebuffer.width == 0 || framebuffer.height == 0 {
            return;
        }
        let width = framebuffer.width as f32;
        let height = framebuffer.height as f32;

        // 1. Viewport Transform
        let screen = triangle.map(|v| ndc_to_screen(v.position.x, v.position.y, width, height));
        if screen.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return;
        }

        // 2. Bounding Box
        let (min_x, min_y, max_x, max_y) = compute_bounding_box(&screen, width, height);

        let positions = triangle.map(|v| v.position);
        let w = positions.map(|p| p.w);
        let total_area = signed_area(screen[0], screen[1], screen[2]);

        // 3. Pixel Loop
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if self.visualize_bounding_box {
                    framebuffer.set_pixel(x, y, ColorRgb::WHITE);
                    continue;
                }

                let pixel_center = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
                let edges = edge_functions(pixel_center, screen[0], screen[1], screen[2]);
                if !self.cull_mode.accepts(edges) {
                    continue;
                }

                let weights = barycentric_weights(edges, total_area);
                let depth = interpolate_depth(weights, &positions);

                // Early Depth Test
                if !framebuffer.depth_test_and_update(x, y, depth) {
                    continue;
                }

                let color = if self.visualize_depth {
                    let (lo, hi) = DEPTH_VIEW_RANGE;
                    ColorRgb::WHITE * remap(depth, lo, hi, 0.0, 1.0)
                } else {
                    let fragment = interpolate_fragment(triangle, weights, w, x, y, depth);
                    shader.shade(&fragment)
                };

                framebuffer.resolve_fragment(x, y, depth, color.max_to_one());
            }
        }
    }
}

/// Screen-space bounds of the triangle grown by one pixel and clamped to the
/// framebuffer, as inclusive pixel ranges.
fn compute_bounding_box(points: &[Point2<f32>; 3], width: f32, height: f32) -> (usize, usize, usize, usize) {
    let max_px_x = width - 1.0;
    let max_px_y = height - 1.0;

    let min_x = (points[0].x.min(points[1].x).min(points[2].x) - 1.0).clamp(0.0, max_px_x);
    let min_y = (points[0].y.min(points[1].y).min(points[2].y) - 1.0).clamp(0.0, max_px_y);
    let max_x = (points[0].x.max(points[1].x).max(points[2].x) + 1.0).clamp(0.0, max_px_x);
    let max_y = (points[0].y.max(points[1].y).max(points[2].y) + 1.0).clamp(0.0, max_px_y);

    (min_x as usize, min_y as usize, max_x as usize, max_y as usize)
}

fn interpolate_fragment(
    triangle: &[VertexOut; 3],
    weights: Vector3<f32>,
    w: [f32; 3],
    x: usize,
    y: usize,
    depth: f32,
) -> Fragment {
    let w_interp = interpolate_w(weights, &triangle.map(|v| v.position));
    let lerp = |attr: fn(&VertexOut) -> Vector3<f32>| {
        perspective_interpolate(triangle.each_ref().map(attr), weights, w, w_interp)
    };

    Fragment {
        x,
        y,
        depth,
        w: w_interp,
        color: perspective_interpolate(triangle.map(|v| v.color), weights, w, w_interp),
        uv: perspective_interpolate(triangle.map(|v| v.uv), weights, w, w_interp),
        normal: lerp(|v| v.normal).normalize(),
        tangent: lerp(|v| v.tangent).normalize(),
        view_direction: lerp(|v| v.view_direction).normalize(),
    }
}
