use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// Linear RGB color with `f32` channels.
///
/// Channels are nominally in [0, 1] but intermediate shading results may
/// exceed that range; [`ColorRgb::max_to_one`] brings them back before the
/// color is packed into the 8-bit color buffer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ColorRgb {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// Builds a color from 8-bit channel values.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        const REMAP: f32 = 1.0 / 255.0;
        Self::new(r as f32 * REMAP, g as f32 * REMAP, b as f32 * REMAP)
    }

    /// Component-wise product.
    pub fn modulate(self, other: Self) -> Self {
        Self::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }

    pub fn max_channel(self) -> f32 {
        self.r.max(self.g).max(self.b)
    }

    /// Rescales the color so that no channel exceeds 1.0, preserving hue.
    pub fn max_to_one(self) -> Self {
        let max = self.max_channel();
        if max > 1.0 { self / max } else { self }
    }

    /// Clamps every channel into [0, 1] independently.
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    /// Saturating addition: the sum is clamped into [0, 1].
    pub fn saturating_add(self, other: Self) -> Self {
        (self + other).clamped()
    }

    /// Packs into `0xFFRRGGBB`, clamping then rounding each channel to 8 bits.
    pub fn to_packed(self) -> u32 {
        let c = self.clamped();
        let r = (c.r * 255.0).round() as u32;
        let g = (c.g * 255.0).round() as u32;
        let b = (c.b * 255.0).round() as u32;
        (255 << 24) | (r << 16) | (g << 8) | b
    }

    /// Inverse of [`ColorRgb::to_packed`] (up to 8-bit quantisation).
    pub fn from_packed(pixel: u32) -> Self {
        Self::from_u8(
            ((pixel >> 16) & 0xFF) as u8,
            ((pixel >> 8) & 0xFF) as u8,
            (pixel & 0xFF) as u8,
        )
    }
}

impl Add for ColorRgb {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.r + other.r, self.g + other.g, self.b + other.b)
    }
}

impl AddAssign for ColorRgb {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for ColorRgb {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.r - other.r, self.g - other.g, self.b - other.b)
    }
}

impl Mul<f32> for ColorRgb {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.r * scalar, self.g * scalar, self.b * scalar)
    }
}

impl Mul<ColorRgb> for f32 {
    type Output = ColorRgb;
    fn mul(self, color: ColorRgb) -> ColorRgb {
        color * self
    }
}

impl Mul for ColorRgb {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        self.modulate(other)
    }
}

impl Div<f32> for ColorRgb {
    type Output = Self;
    fn div(self, scalar: f32) -> Self {
        Self::new(self.r / scalar, self.g / scalar, self.b / scalar)
    }
}
