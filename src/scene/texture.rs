use crate::core::color::ColorRgb;
use crate::io::error::LoadError;
use image::RgbImage;
use log::info;
use nalgebra::Vector2;
use std::path::Path;

/// Represents a 2D texture map sampled with nearest-neighbour lookup and
/// repeat addressing. Materials share textures through `Arc<Texture>`.
#[derive(Debug, Clone)]
pub struct Texture {
    pub image: RgbImage,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path_ref = path.as_ref();
        let img = image::open(path_ref)
            .map_err(|source| LoadError::Image {
                path: path_ref.to_path_buf(),
                source,
            })?
            .to_rgb8();

        info!("Loaded texture: {:?} ({}x{})", path_ref, img.width(), img.height());

        Ok(Self::from_image(img))
    }

    pub fn from_image(image: RgbImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            image,
        }
    }

    /// A 1x1 texture holding a single color.
    pub fn solid(color: ColorRgb) -> Self {
        let packed = color.to_packed();
        let rgb = [(packed >> 16) as u8, (packed >> 8) as u8, packed as u8];
        Self::from_image(RgbImage::from_pixel(1, 1, image::Rgb(rgb)))
    }

    /// Samples the texel under `uv`.
    ///
    /// Coordinates outside [0, 1) wrap around by dropping their integer part,
    /// so `(1.5, -0.25)` reads the same texel as `(0.5, 0.75)`. The v axis
    /// runs top to bottom in image rows; loaders flip v where needed.
    pub fn sample(&self, uv: Vector2<f32>) -> ColorRgb {
        if self.width == 0 || self.height == 0 {
            return ColorRgb::BLACK;
        }

        let u = wrap(uv.x);
        let v = wrap(uv.y);

        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);

        let pixel = self.image.get_pixel(x, y);
        ColorRgb::from_u8(pixel[0], pixel[1], pixel[2])
    }
}

/// Repeat addressing: maps any finite coordinate into [0, 1).
#[inline]
fn wrap(t: f32) -> f32 {
    let t = t.fract();
    if t < 0.0 { t + 1.0 } else { t }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Texture {
        let mut img = RgbImage::new(4, 4);
        for (x, y, px) in img.enumerate_pixels_mut() {
            *px = image::Rgb([(x * 60) as u8, (y * 60) as u8, 7]);
        }
        Texture::from_image(img)
    }

    #[test]
    fn sampling_wraps_around() {
        let tex = checker();
        assert_eq!(
            tex.sample(Vector2::new(1.5, -0.25)),
            tex.sample(Vector2::new(0.5, 0.75))
        );
        assert_eq!(
            tex.sample(Vector2::new(-2.1, 3.3)),
            tex.sample(Vector2::new(0.9, 0.3))
        );
    }

    #[test]
    fn nearest_texel_is_returned() {
        let tex = checker();
        assert_eq!(tex.sample(Vector2::new(0.3, 0.6)), ColorRgb::from_u8(60, 120, 7));
    }

    #[test]
    fn upper_edge_stays_in_bounds() {
        let tex = checker();
        let c = tex.sample(Vector2::new(0.99999, 0.99999));
        assert_eq!(c, ColorRgb::from_u8(180, 180, 7));
    }

    #[test]
    fn solid_texture_returns_its_color_everywhere() {
        let tex = Texture::solid(ColorRgb::WHITE);
        assert_eq!(tex.sample(Vector2::new(0.2, 0.8)), ColorRgb::WHITE);
        assert_eq!(tex.sample(Vector2::new(-7.4, 12.0)), ColorRgb::WHITE);
    }
}
