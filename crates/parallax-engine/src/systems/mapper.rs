//! Scene mapping: scroll state + catalog → everything the stage shows.
//!
//! Pure and stateless. Every frame is computed from scratch, so the result
//! depends only on the current [`ScrollState`], never on earlier frames.

use crate::api::error::SceneError;
use crate::api::types::BodyIndex;
use crate::api::view::ViewConfig;
use crate::assets::catalog::{Catalog, CelestialBody};
use crate::core::scale::ScaleFactor;
use crate::systems::readout;
use crate::systems::scroll::ScrollState;

/// Rendered size of a body in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySize {
    pub width: f64,
    pub height: f64,
}

/// Layout of one catalog entry on the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyLayout {
    pub index: BodyIndex,
    /// Horizontal anchor in track pixels. The image is centered on it.
    pub left: f64,
    pub size: BodySize,
    /// Idle bobbing animation. Everything but the origin floats.
    pub floating: bool,
    pub in_view: bool,
}

/// All derived values for one scroll state.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    pub scroll: ScrollState,
    /// How far the background has moved left, in pixels.
    pub parallax_offset: f64,
    pub background_width: f64,
    pub scene_width: f64,
    pub bodies: Vec<BodyLayout>,
    /// Indices of the bodies whose panels are visible.
    pub active: Vec<BodyIndex>,
    pub distance_readout: String,
}

impl SceneFrame {
    pub fn is_active(&self, index: BodyIndex) -> bool {
        self.active.contains(&index)
    }
}

/// Background translation for a scroll offset.
#[inline]
pub fn parallax_offset(offset_x: f64, coefficient: f64) -> f64 {
    offset_x * coefficient
}

/// Left edge of a body on the track.
#[inline]
pub fn body_pixel_position(body: &CelestialBody, scale: ScaleFactor) -> f64 {
    scale.to_pixels(body.distance)
}

/// True-scale diameter in pixels, ignoring any render override.
#[inline]
pub fn body_true_size(body: &CelestialBody, scale: ScaleFactor) -> f64 {
    scale.to_pixels(body.diameter)
}

/// Rendered size, with the catalog's per-body multipliers applied.
pub fn body_pixel_size(body: &CelestialBody, scale: ScaleFactor) -> BodySize {
    let base = body_true_size(body, scale);
    let overrides = body.render_scale();
    BodySize {
        width: base * overrides.width_multiplier(),
        height: base * overrides.height_multiplier(),
    }
}

/// Total track width: the farthest body's position.
pub fn scene_width(catalog: &Catalog, scale: ScaleFactor) -> f64 {
    body_pixel_position(catalog.last(), scale)
}

/// Whether the body's full span sits strictly inside the viewport.
///
/// The span is `[left, left + true size)`; render overrides do not widen it.
/// The origin is never eligible, and a zero-width viewport shows nothing.
pub fn is_in_view(body: &CelestialBody, scale: ScaleFactor, scroll: &ScrollState) -> bool {
    if body.is_origin() {
        return false;
    }
    let left = body_pixel_position(body, scale);
    let right = left + body_true_size(body, scale);
    left > scroll.offset_x && right < scroll.offset_x + scroll.viewport_width
}

/// Every body currently in view, in catalog order. No tie-break: if two spans
/// fit in the viewport at once, both are reported.
pub fn active_bodies(catalog: &Catalog, scale: ScaleFactor, scroll: &ScrollState) -> Vec<BodyIndex> {
    catalog
        .iter()
        .enumerate()
        .filter(|(_, body)| is_in_view(body, scale, scroll))
        .map(|(i, _)| i)
        .collect()
}

/// Bundles the fixed inputs of the mapping so callers only pass the state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneMapper {
    scale: ScaleFactor,
    coefficient: f64,
}

impl SceneMapper {
    pub fn new(scale: ScaleFactor, coefficient: f64) -> Self {
        Self { scale, coefficient }
    }

    pub fn from_config(config: &ViewConfig) -> Result<Self, SceneError> {
        config.validate()?;
        Ok(Self::new(config.scale()?, config.parallax_coefficient))
    }

    pub fn scale(&self) -> ScaleFactor {
        self.scale
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn scene_width(&self, catalog: &Catalog) -> f64 {
        scene_width(catalog, self.scale)
    }

    /// Width of the background layer, enough to cover its full travel.
    pub fn background_width(&self, catalog: &Catalog) -> f64 {
        self.scene_width(catalog) * self.coefficient
    }

    pub fn layout(&self, catalog: &Catalog, scroll: &ScrollState) -> Vec<BodyLayout> {
        catalog
            .iter()
            .enumerate()
            .map(|(index, body)| BodyLayout {
                index,
                left: body_pixel_position(body, self.scale),
                size: body_pixel_size(body, self.scale),
                floating: !body.is_origin(),
                in_view: is_in_view(body, self.scale, scroll),
            })
            .collect()
    }

    pub fn frame(&self, catalog: &Catalog, scroll: &ScrollState) -> SceneFrame {
        let bodies = self.layout(catalog, scroll);
        let active = bodies.iter().filter(|b| b.in_view).map(|b| b.index).collect();
        SceneFrame {
            scroll: *scroll,
            parallax_offset: parallax_offset(scroll.offset_x, self.coefficient),
            background_width: self.background_width(catalog),
            scene_width: self.scene_width(catalog),
            bodies,
            active,
            distance_readout: readout::distance_readout(scroll.offset_x, self.scale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::catalog::RenderScaleOverride;

    fn scale() -> ScaleFactor {
        ScaleFactor::new(865.37).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CelestialBody::new("Sun", 0.0, 865_370.0, "/Sun.svg"),
            CelestialBody::new("Mercury", 36_000_000.0, 3_032.0, "/Mercury.svg"),
            CelestialBody::new("Venus", 67_200_000.0, 7_521.0, "/Venus.svg"),
            CelestialBody::new("Saturn", 886_000_000.0, 72_367.0, "/Saturn.svg")
                .with_render_scale(RenderScaleOverride::width(1.75)),
        ])
        .unwrap()
    }

    fn mapper() -> SceneMapper {
        SceneMapper::new(scale(), 0.01)
    }

    #[test]
    fn parallax_is_exact_fraction_of_scroll() {
        for s in [0.0, 1.0, 123.456, 41_601.0, 3_227_492.5] {
            assert_eq!(parallax_offset(s, 0.01), s * 0.01);
            let frame = mapper().frame(&catalog(), &ScrollState::new(s, 1000.0));
            assert_eq!(frame.parallax_offset, s * 0.01);
        }
    }

    #[test]
    fn mercury_lands_near_41600() {
        let catalog = catalog();
        let mercury = catalog.find("Mercury").unwrap();
        let left = body_pixel_position(mercury, scale());
        assert!((left - 41_600.70).abs() < 0.01, "left = {left}");
        assert!((left - 36_000_000.0 / 865.37).abs() < 1e-9);
    }

    #[test]
    fn sizes_are_square_except_overridden_width() {
        let catalog = catalog();
        for body in catalog.iter() {
            let size = body_pixel_size(body, scale());
            let base = body.diameter / 865.37;
            if body.name == "Saturn" {
                assert!((size.width - base * 1.75).abs() < 1e-9);
                assert!((size.height - base).abs() < 1e-9);
            } else {
                assert!((size.width - base).abs() < 1e-9);
                assert_eq!(size.width, size.height);
            }
        }
    }

    #[test]
    fn scene_width_ignores_scroll() {
        let catalog = catalog();
        let expected = 886_000_000.0 / 865.37;
        for s in [0.0, 500.0, 1_000_000.0] {
            let frame = mapper().frame(&catalog, &ScrollState::new(s, 1200.0));
            assert!((frame.scene_width - expected).abs() < 1e-6);
            assert!((frame.background_width - expected * 0.01).abs() < 1e-6);
        }
    }

    #[test]
    fn origin_is_never_active() {
        let catalog = catalog();
        // A huge viewport starting left of everything contains every span.
        let everything = ScrollState::new(0.0, 10_000_000.0);
        let active = active_bodies(&catalog, scale(), &everything);
        assert!(!active.contains(&0));
        assert_eq!(active, vec![1, 2, 3]);

        let mut s = 0.0;
        while s < 1_100_000.0 {
            let frame = mapper().frame(&catalog, &ScrollState::new(s, 1920.0));
            assert!(!frame.is_active(0), "origin active at {s}");
            s += 997.0;
        }
    }

    #[test]
    fn body_is_active_only_when_fully_inside() {
        let catalog = catalog();
        let mercury = catalog.find("Mercury").unwrap();
        let left = body_pixel_position(mercury, scale());
        let width = body_true_size(mercury, scale());

        // Centered in a 1000 px viewport.
        assert!(is_in_view(mercury, scale(), &ScrollState::new(left - 400.0, 1000.0)));
        // Left edge exactly at the viewport edge is not strictly inside.
        assert!(!is_in_view(mercury, scale(), &ScrollState::new(left, 1000.0)));
        // Right edge just past the viewport edge.
        assert!(!is_in_view(
            mercury,
            scale(),
            &ScrollState::new(left + width - 1000.5, 1000.0)
        ));
        // Partially visible.
        assert!(!is_in_view(mercury, scale(), &ScrollState::new(left + 1.0, 1000.0)));
    }

    #[test]
    fn overridden_width_does_not_widen_visibility_span() {
        let catalog = catalog();
        let saturn = catalog.find("Saturn").unwrap();
        let left = body_pixel_position(saturn, scale());
        let true_width = body_true_size(saturn, scale());
        let viewport = true_width + 2.0;
        assert!(is_in_view(saturn, scale(), &ScrollState::new(left - 1.0, viewport)));
    }

    #[test]
    fn zero_viewport_shows_nothing() {
        let catalog = catalog();
        let mercury_left = body_pixel_position(catalog.find("Mercury").unwrap(), scale());
        let frame = mapper().frame(&catalog, &ScrollState::new(mercury_left - 1.0, 0.0));
        assert!(frame.active.is_empty());
    }

    #[test]
    fn overlapping_spans_are_all_active() {
        let catalog = Catalog::new(vec![
            CelestialBody::new("Sun", 0.0, 865_370.0, "/Sun.svg"),
            CelestialBody::new("A", 1_000_000.0, 865.37, "/A.svg"),
            CelestialBody::new("B", 1_100_000.0, 865.37, "/B.svg"),
        ])
        .unwrap();
        let frame = mapper().frame(&catalog, &ScrollState::new(1_000.0, 500.0));
        assert_eq!(frame.active, vec![1, 2]);
    }

    #[test]
    fn frame_carries_readout_and_float_flags() {
        let frame = mapper().frame(&catalog(), &ScrollState::new(0.0, 1000.0));
        assert_eq!(frame.distance_readout, "0");
        assert!(!frame.bodies[0].floating);
        assert!(frame.bodies[1..].iter().all(|b| b.floating));
    }

    #[test]
    fn same_state_same_frame() {
        let catalog = catalog();
        let state = ScrollState::new(41_000.0, 1280.0);
        assert_eq!(mapper().frame(&catalog, &state), mapper().frame(&catalog, &state));
    }
}
