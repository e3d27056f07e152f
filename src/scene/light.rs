use nalgebra::Vector3;

/// A light source that is infinitely far away (e.g., Sun). Rays are parallel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels, normalized.
    direction: Vector3<f32>,
    intensity: f32,
}

impl DirectionalLight {
    pub fn new(direction: Vector3<f32>, intensity: f32) -> Self {
        Self {
            direction: direction.normalize(),
            intensity,
        }
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vector3::new(0.577, -0.577, 0.577), 7.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_normalized() {
        let light = DirectionalLight::new(Vector3::new(0.0, 0.0, 4.0), 2.0);
        assert_eq!(light.direction(), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(light.intensity(), 2.0);
    }
}
