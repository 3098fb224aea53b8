use crate::api::error::SceneError;

/// Real-world units per rendered pixel. Fixed for the lifetime of a scene.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    pub fn new(units_per_pixel: f64) -> Result<Self, SceneError> {
        if units_per_pixel.is_finite() && units_per_pixel > 0.0 {
            Ok(Self(units_per_pixel))
        } else {
            Err(SceneError::InvalidScale(units_per_pixel))
        }
    }

    pub fn units_per_pixel(self) -> f64 {
        self.0
    }

    /// Real-world length → pixels.
    #[inline]
    pub fn to_pixels(self, units: f64) -> f64 {
        units / self.0
    }

    /// Pixels → real-world length.
    #[inline]
    pub fn to_units(self, pixels: f64) -> f64 {
        pixels * self.0
    }
}
