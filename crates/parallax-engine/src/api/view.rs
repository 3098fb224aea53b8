use serde::{Deserialize, Serialize};

use crate::api::error::SceneError;
use crate::api::types::SceneEvent;
use crate::assets::catalog::{Catalog, ImageRef};
use crate::core::scale::ScaleFactor;
use crate::extensions::easing::Easing;
use crate::extensions::tween::Transition;

/// Configuration for a scene, provided by the view.
///
/// Deserializable with every field optional so hosts can override a subset
/// at runtime (`{"parallax_coefficient": 0.02}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Real-world units per pixel (default: 865.37, so the Sun is 1000 px wide).
    pub scale_factor: f64,
    /// Background translation per pixel of scroll (default: 0.01).
    pub parallax_coefficient: f64,
    /// Tile image repeated across the background layer.
    pub background_image: ImageRef,
    /// Rendered size of one background tile in pixels (default: 250).
    pub background_tile_size: f64,
    /// Vertical travel of the idle float animation in pixels (default: 20).
    pub float_amplitude: f64,
    /// Seconds for one half of the float cycle (default: 3).
    pub float_half_period: f64,
    pub float_easing: Easing,
    /// Cross-fade used when an info panel appears or disappears.
    pub panel_fade: Transition,
    /// Unit label appended to the distance readout (default: "miles").
    pub distance_unit: String,
    /// Show moon count and orbital period under each fun fact.
    pub show_details: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            scale_factor: 865.37,
            parallax_coefficient: 0.01,
            background_image: ImageRef::new("/Stars.svg"),
            background_tile_size: 250.0,
            float_amplitude: 20.0,
            float_half_period: 3.0,
            float_easing: Easing::SineInOut,
            panel_fade: Transition::fade(),
            distance_unit: "miles".to_string(),
            show_details: false,
        }
    }
}

impl ViewConfig {
    /// Parse a (possibly partial) config from JSON. Missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn scale(&self) -> Result<ScaleFactor, SceneError> {
        ScaleFactor::new(self.scale_factor)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        self.scale()?;
        if !self.parallax_coefficient.is_finite() || self.parallax_coefficient < 0.0 {
            return Err(SceneError::InvalidCoefficient(self.parallax_coefficient));
        }
        Ok(())
    }

    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_parallax_coefficient(mut self, coefficient: f64) -> Self {
        self.parallax_coefficient = coefficient;
        self
    }

    pub fn with_background(mut self, image: impl Into<String>, tile_size: f64) -> Self {
        self.background_image = ImageRef::new(image);
        self.background_tile_size = tile_size;
        self
    }

    pub fn with_distance_unit(mut self, unit: impl Into<String>) -> Self {
        self.distance_unit = unit.into();
        self
    }

    pub fn with_details(mut self, show: bool) -> Self {
        self.show_details = show;
        self
    }
}

/// The contract every scroll scene fulfills: what to show and how to scale it.
pub trait View {
    /// Return scene configuration. Called once before mount.
    fn config(&self) -> ViewConfig {
        ViewConfig::default()
    }

    /// The bodies laid out along the track.
    fn catalog(&self) -> Result<Catalog, SceneError>;

    /// Called after a recomputation changed derived state.
    fn on_event(&mut self, _event: &SceneEvent, _catalog: &Catalog) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_solar_tour() {
        let config = ViewConfig::default();
        assert_eq!(config.scale_factor, 865.37);
        assert_eq!(config.parallax_coefficient, 0.01);
        assert_eq!(config.background_tile_size, 250.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ViewConfig::from_json(r#"{ "distance_unit": "km", "show_details": true }"#).unwrap();
        assert_eq!(config.distance_unit, "km");
        assert!(config.show_details);
        assert_eq!(config.scale_factor, 865.37);
        assert_eq!(config.panel_fade, Transition::fade());
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(matches!(
            ViewConfig::from_json(r#"{ "scale_factor": 0 }"#),
            Err(SceneError::InvalidScale(_))
        ));
        assert!(matches!(
            ViewConfig::default().with_parallax_coefficient(-0.5).validate(),
            Err(SceneError::InvalidCoefficient(_))
        ));
    }

    #[test]
    fn panel_fade_parses_from_json() {
        let config = ViewConfig::from_json(
            r#"{ "panel_fade": { "duration": 0.3, "easing": "cubic_out" } }"#,
        )
        .unwrap();
        assert_eq!(config.panel_fade, Transition::new(0.3, Easing::CubicOut));
    }
}
