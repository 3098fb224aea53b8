//! Solar Parallax: scroll from the Sun to Neptune at true scale.
//!
//! The page scrolls horizontally across roughly 3.2 million pixels. A star
//! tile drifts behind at 1% of the scroll speed and each planet's fact card
//! fades in while the whole planet is on screen.

use parallax_engine::{Catalog, SceneError, SceneEvent, View, ViewConfig};

use crate::bodies;

pub struct SolarParallax {
    /// Names of the planets whose cards are showing.
    showing: Vec<String>,
}

impl SolarParallax {
    pub fn new() -> Self {
        Self { showing: Vec::new() }
    }

    pub fn showing(&self) -> &[String] {
        &self.showing
    }
}

impl Default for SolarParallax {
    fn default() -> Self {
        Self::new()
    }
}

impl View for SolarParallax {
    fn config(&self) -> ViewConfig {
        ViewConfig::default()
            .with_scale_factor(bodies::MILES_PER_PIXEL)
            .with_parallax_coefficient(0.01)
            .with_background("/Stars.svg", 250.0)
            .with_distance_unit("miles")
    }

    fn catalog(&self) -> Result<Catalog, SceneError> {
        bodies::solar_catalog()
    }

    fn on_event(&mut self, event: &SceneEvent, catalog: &Catalog) {
        match event {
            SceneEvent::ActiveChanged { active } => {
                self.showing = active
                    .iter()
                    .filter_map(|&i| catalog.get(i))
                    .map(|b| b.name.clone())
                    .collect();
                if !self.showing.is_empty() {
                    log::info!("now passing {}", self.showing.join(", "));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parallax_engine::{InputEvent, InputQueue, SceneController};

    fn controller() -> (SolarParallax, SceneController) {
        let view = SolarParallax::new();
        let controller = SceneController::new(view.config(), view.catalog().unwrap()).unwrap();
        (view, controller)
    }

    fn scroll_to(c: &mut SceneController, view: &mut SolarParallax, offset_x: f64, width: f64) {
        let mut input = InputQueue::new();
        input.push(InputEvent::Scroll { offset_x, viewport_width: width });
        for event in c.tick(0.0, &mut input) {
            view.on_event(&event, c.catalog());
        }
    }

    #[test]
    fn mercury_sits_near_41601_px() {
        let (_, c) = controller();
        let frame_left = c.mapper().layout(c.catalog(), &Default::default())[1].left;
        assert!((frame_left - 41_601.0).abs() < 1.0);
    }

    #[test]
    fn tour_spans_neptune_distance() {
        let (_, c) = controller();
        let width = c.mapper().scene_width(c.catalog());
        assert!((width - 2_793_000_000.0 / 865.37).abs() < 1e-6);
    }

    #[test]
    fn passing_earth_shows_its_card() {
        let (mut view, mut c) = controller();
        c.mount(1280.0).unwrap();
        let earth_left = 93_000_000.0 / 865.37;
        scroll_to(&mut c, &mut view, earth_left - 600.0, 1280.0);
        assert_eq!(view.showing(), ["Earth".to_string()]);

        scroll_to(&mut c, &mut view, earth_left + 100.0, 1280.0);
        assert!(view.showing().is_empty());
    }

    #[test]
    fn sun_card_never_shows() {
        let (mut view, mut c) = controller();
        c.mount(1920.0).unwrap();
        for offset in [0.0, 1.0, 250.0, 999.0] {
            scroll_to(&mut c, &mut view, offset, 1920.0);
            assert!(!c.frame().unwrap().is_active(0));
        }
        assert!(c.stage().panel(0).is_none());
    }

    #[test]
    fn readout_reports_miles_from_the_sun() {
        let (mut view, mut c) = controller();
        c.mount(1280.0).unwrap();
        scroll_to(&mut c, &mut view, 41_601.0, 1280.0);
        let text = c.stage().find_by_tag("readout").and_then(|e| e.text()).unwrap();
        assert_eq!(text, "Distance from Sun: 36,000,257 miles");
    }
}
