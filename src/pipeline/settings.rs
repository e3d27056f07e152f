use crate::core::color::ColorRgb;
use crate::core::geometry::PrimitiveTopology;
use crate::core::rasterizer::CullMode;
use crate::io::config::RenderConfig;
use crate::pipeline::shading::ShadingMode;
use log::{info, warn};

/// Runtime toggles read at the start of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub cull_mode: CullMode,
    pub shading_mode: ShadingMode,
    pub normal_map: bool,
    pub visualize_depth: bool,
    pub visualize_bounding_box: bool,
    pub uniform_background: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            cull_mode: CullMode::Back,
            shading_mode: ShadingMode::Combined,
            normal_map: true,
            visualize_depth: false,
            visualize_bounding_box: false,
            uniform_background: false,
        }
    }
}

impl RenderSettings {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            cull_mode: parse_cull_mode(&config.cull_mode),
            shading_mode: parse_shading_mode(&config.shading_mode),
            normal_map: config.normal_map,
            visualize_depth: config.visualize_depth,
            visualize_bounding_box: config.visualize_bounding_box,
            uniform_background: config.uniform_background,
        }
    }

    /// Clear color of the color buffer.
    pub fn background(&self) -> ColorRgb {
        if self.uniform_background {
            ColorRgb::gray(25.0 / 255.0)
        } else {
            ColorRgb::gray(100.0 / 255.0)
        }
    }

    pub fn cycle_cull_mode(&mut self) {
        self.cull_mode = self.cull_mode.next();
        info!("Cull mode: {}", self.cull_mode);
    }

    pub fn cycle_shading_mode(&mut self) {
        self.shading_mode = self.shading_mode.next();
        info!("Shading mode: {}", self.shading_mode);
    }

    pub fn toggle_normal_map(&mut self) {
        self.normal_map = !self.normal_map;
        info!("Normal map: {}", on_off(self.normal_map));
    }

    pub fn toggle_depth_visualization(&mut self) {
        self.visualize_depth = !self.visualize_depth;
        info!("Depth buffer visualization: {}", on_off(self.visualize_depth));
    }

    pub fn toggle_bounding_box(&mut self) {
        self.visualize_bounding_box = !self.visualize_bounding_box;
        info!("Bounding box visualization: {}", on_off(self.visualize_bounding_box));
    }

    pub fn toggle_uniform_background(&mut self) {
        self.uniform_background = !self.uniform_background;
        info!("Uniform background: {}", on_off(self.uniform_background));
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

/// Unknown names fall back to back-face culling.
pub fn parse_cull_mode(name: &str) -> CullMode {
    match name.to_ascii_lowercase().as_str() {
        "none" => CullMode::None,
        "back" => CullMode::Back,
        "front" => CullMode::Front,
        other => {
            warn!("Unknown cull mode '{}', using 'back'", other);
            CullMode::Back
        }
    }
}

/// Unknown names fall back to combined shading.
pub fn parse_shading_mode(name: &str) -> ShadingMode {
    match name.to_ascii_lowercase().as_str() {
        "combined" => ShadingMode::Combined,
        "observed_area" | "observedarea" => ShadingMode::ObservedArea,
        "diffuse" => ShadingMode::Diffuse,
        "specular" => ShadingMode::Specular,
        other => {
            warn!("Unknown shading mode '{}', using 'combined'", other);
            ShadingMode::Combined
        }
    }
}

/// Unknown names fall back to a triangle list.
pub fn parse_topology(name: &str) -> PrimitiveTopology {
    match name.to_ascii_lowercase().as_str() {
        "triangle_list" | "list" => PrimitiveTopology::TriangleList,
        "triangle_strip" | "strip" => PrimitiveTopology::TriangleStrip,
        other => {
            warn!("Unknown topology '{}', using 'triangle_list'", other);
            PrimitiveTopology::TriangleList
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cull_cycle_returns_to_start() {
        let mut settings = RenderSettings::default();
        settings.cycle_cull_mode();
        assert_eq!(settings.cull_mode, CullMode::Front);
        settings.cycle_cull_mode();
        assert_eq!(settings.cull_mode, CullMode::None);
        settings.cycle_cull_mode();
        assert_eq!(settings.cull_mode, CullMode::Back);
    }

    #[test]
    fn toggles_flip_flags() {
        let mut settings = RenderSettings::default();
        settings.toggle_normal_map();
        settings.toggle_depth_visualization();
        settings.toggle_bounding_box();
        settings.toggle_uniform_background();
        assert!(!settings.normal_map);
        assert!(settings.visualize_depth);
        assert!(settings.visualize_bounding_box);
        assert!(settings.uniform_background);
    }

    #[test]
    fn background_darkens_when_uniform() {
        let mut settings = RenderSettings::default();
        assert_eq!(settings.background().to_packed(), 0xFF64_6464);
        settings.toggle_uniform_background();
        assert_eq!(settings.background().to_packed(), 0xFF19_1919);
    }

    #[test]
    fn unknown_names_fall_back_to_defaults() {
        assert_eq!(parse_cull_mode("FRONT"), CullMode::Front);
        assert_eq!(parse_cull_mode("sideways"), CullMode::Back);
        assert_eq!(parse_shading_mode("observed_area"), ShadingMode::ObservedArea);
        assert_eq!(parse_shading_mode("toon"), ShadingMode::Combined);
        assert_eq!(parse_topology("triangle_strip"), PrimitiveTopology::TriangleStrip);
        assert_eq!(parse_topology("fan"), PrimitiveTopology::TriangleList);
    }

    #[test]
    fn from_config_reads_every_toggle() {
        let config = RenderConfig {
            cull_mode: "none".to_string(),
            shading_mode: "diffuse".to_string(),
            normal_map: false,
            visualize_depth: true,
            ..RenderConfig::default()
        };
        let settings = RenderSettings::from_config(&config);
        assert_eq!(settings.cull_mode, CullMode::None);
        assert_eq!(settings.shading_mode, ShadingMode::Diffuse);
        assert!(!settings.normal_map);
        assert!(settings.visualize_depth);
        assert!(!settings.visualize_bounding_box);
    }
}
