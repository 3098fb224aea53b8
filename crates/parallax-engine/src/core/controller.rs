use glam::DVec2;

use crate::api::error::SceneError;
use crate::api::types::{ElementId, SceneEvent};
use crate::api::view::ViewConfig;
use crate::assets::catalog::{Catalog, CelestialBody};
use crate::components::element::{Element, ElementKind};
use crate::components::layer::RenderLayer;
use crate::core::stage::Stage;
use crate::extensions::tween::{read_channel, Channel, Transition, Tween, TweenLoop, TweenState};
use crate::input::queue::{InputEvent, InputQueue};
use crate::systems::mapper::{SceneFrame, SceneMapper};
use crate::systems::readout::readout_line;
use crate::systems::scroll::{ScrollState, ScrollTracker};

/// Element handles created on mount.
#[derive(Debug, Default)]
struct Handles {
    background: Option<ElementId>,
    readout: Option<ElementId>,
    /// Indexed by catalog position. `None` for the origin.
    panels: Vec<Option<ElementId>>,
}

/// Owns one mounted scene: the scroll state, the stage and its animations.
///
/// Every recomputation starts from the current [`ScrollState`] alone, so the
/// controller never accumulates drift between frames.
pub struct SceneController {
    config: ViewConfig,
    catalog: Catalog,
    mapper: SceneMapper,
    tracker: ScrollTracker,
    stage: Stage,
    tweens: TweenState,
    handles: Handles,
    frame: Option<SceneFrame>,
    events: Vec<SceneEvent>,
    recompute_count: u64,
}

impl SceneController {
    pub fn new(config: ViewConfig, catalog: Catalog) -> Result<Self, SceneError> {
        let mapper = SceneMapper::from_config(&config)?;
        Ok(Self {
            config,
            catalog,
            mapper,
            tracker: ScrollTracker::new(),
            stage: Stage::new(),
            tweens: TweenState::new(),
            handles: Handles::default(),
            frame: None,
            events: Vec::new(),
            recompute_count: 0,
        })
    }

    /// Build the stage and compute the first frame.
    pub fn mount(&mut self, viewport_width: f64) -> Result<(), SceneError> {
        if self.tracker.is_mounted() {
            return Err(SceneError::AlreadyMounted);
        }
        self.build_stage();
        self.tracker.mount(viewport_width);
        if let Some(state) = self.tracker.take_change() {
            self.recompute(state);
        }
        log::info!(
            "scene mounted: {} bodies, {} elements, track {:.0}px",
            self.catalog.len(),
            self.stage.len(),
            self.mapper.scene_width(&self.catalog),
        );
        Ok(())
    }

    /// Tear the stage down. Later input is discarded until the next mount.
    pub fn unmount(&mut self) -> Result<(), SceneError> {
        if !self.tracker.is_mounted() {
            return Err(SceneError::NotMounted);
        }
        self.tracker.unmount();
        self.stage.clear();
        self.tweens.clear();
        self.handles = Handles::default();
        self.frame = None;
        self.events.clear();
        log::info!("scene unmounted after {} recomputations", self.recompute_count);
        Ok(())
    }

    /// Advance one frame: apply pending input, recompute at most once, then
    /// step the animations. Returns the events raised since the last tick.
    pub fn tick(&mut self, dt: f64, input: &mut InputQueue) -> Vec<SceneEvent> {
        let pending = input.drain();
        if !self.tracker.is_mounted() {
            return Vec::new();
        }
        for event in pending {
            self.tracker.publish(event);
        }
        if let Some(state) = self.tracker.take_change() {
            self.recompute(state);
        }
        self.tweens.tick(dt.max(0.0), &mut self.stage);
        std::mem::take(&mut self.events)
    }

    /// Swap the catalog. A mounted scene is rebuilt in place at the same scroll
    /// position.
    pub fn replace_catalog(&mut self, catalog: Catalog) -> Result<(), SceneError> {
        self.catalog = catalog;
        log::info!("catalog loaded: {} bodies", self.catalog.len());
        self.remount()
    }

    /// Swap the configuration, rebuilding a mounted scene.
    pub fn reconfigure(&mut self, config: ViewConfig) -> Result<(), SceneError> {
        self.mapper = SceneMapper::from_config(&config)?;
        self.config = config;
        log::info!(
            "scene configured: scale {} per px, parallax {}",
            self.config.scale_factor,
            self.config.parallax_coefficient,
        );
        self.remount()
    }

    fn remount(&mut self) -> Result<(), SceneError> {
        if !self.tracker.is_mounted() {
            return Ok(());
        }
        let state = self.tracker.state();
        let previous = self.frame.as_ref().map(|f| f.active.clone()).unwrap_or_default();
        let mut pending = std::mem::take(&mut self.events);
        self.unmount()?;
        self.mount(state.viewport_width)?;
        if self.tracker.publish(InputEvent::Scroll {
            offset_x: state.offset_x,
            viewport_width: state.viewport_width,
        }) {
            if let Some(state) = self.tracker.take_change() {
                self.recompute(state);
            }
        }
        // The rebuilt frame was diffed against an empty stage. Report against
        // what was showing before the swap instead.
        self.events.clear();
        if let Some(frame) = &self.frame {
            if frame.active != previous {
                log::debug!("active bodies after rebuild: {:?}", self.active_names(frame));
                pending.push(SceneEvent::ActiveChanged { active: frame.active.clone() });
            }
        }
        self.events = pending;
        Ok(())
    }

    // -- Stage construction --

    fn build_stage(&mut self) {
        self.stage.clear();
        self.tweens.clear();
        self.handles = Handles::default();

        let background = self.stage.next_id();
        self.stage.spawn(
            Element::new(
                background,
                ElementKind::Background {
                    tile: self.config.background_image.clone(),
                    tile_size: self.config.background_tile_size,
                },
            )
            .with_tag("background")
            .with_layer(RenderLayer::Background)
            .with_size(DVec2::new(self.mapper.background_width(&self.catalog), 0.0)),
        );
        self.handles.background = Some(background);

        let track = self.stage.next_id();
        self.stage.spawn(
            Element::new(track, ElementKind::Track)
                .with_tag("track")
                .with_layer(RenderLayer::Track)
                .with_size(DVec2::new(self.mapper.scene_width(&self.catalog), 0.0)),
        );

        let layout = self.mapper.layout(&self.catalog, &ScrollState::default());
        let mut floating = Vec::new();
        for (body, placed) in self.catalog.iter().zip(&layout) {
            let id = self.stage.next_id();
            self.stage.spawn(
                Element::new(
                    id,
                    ElementKind::Body {
                        index: placed.index,
                        image: body.image.clone(),
                        alt: body.name.clone(),
                        floating: placed.floating,
                    },
                )
                .with_tag(body.name.as_str())
                .with_layer(RenderLayer::Track)
                .with_parent(track)
                .with_pos(DVec2::new(placed.left, 0.0))
                .with_size(DVec2::new(placed.size.width, placed.size.height)),
            );
            if placed.floating {
                floating.push(id);
            }
        }
        for id in floating {
            self.start_float(id);
        }

        let overlay = self.stage.next_id();
        self.stage.spawn(
            Element::new(overlay, ElementKind::Overlay)
                .with_tag("panels")
                .with_layer(RenderLayer::Overlay),
        );

        let show_details = self.config.show_details;
        for (index, body) in self.catalog.iter().enumerate() {
            if body.is_origin() {
                self.handles.panels.push(None);
                continue;
            }
            let id = self.stage.next_id();
            self.stage.spawn(
                Element::new(
                    id,
                    ElementKind::Panel {
                        index,
                        title: body.name.clone(),
                        text: body.fun_fact.clone(),
                        details: show_details.then(|| panel_details(body)),
                    },
                )
                .with_tag(body.name.as_str())
                .with_layer(RenderLayer::Overlay)
                .with_parent(overlay)
                .with_opacity(0.0),
            );
            self.handles.panels.push(Some(id));
        }

        let readout = self.stage.next_id();
        self.stage.spawn(
            Element::new(readout, ElementKind::Readout { text: String::new() })
                .with_tag("readout")
                .with_layer(RenderLayer::Hud),
        );
        self.handles.readout = Some(readout);
    }

    fn start_float(&mut self, id: ElementId) {
        let amplitude = self.config.float_amplitude;
        let half_period = self.config.float_half_period;
        if amplitude == 0.0 || !amplitude.is_finite() || !half_period.is_finite() || half_period <= 0.0 {
            return;
        }
        let bob = Tween::offset_y(0.0, -amplitude, Transition::new(half_period, self.config.float_easing))
            .with_loop(TweenLoop::PingPong);
        self.tweens.start(id, bob, &mut self.stage);
    }

    // -- Frame application --

    fn recompute(&mut self, state: ScrollState) {
        let frame = self.mapper.frame(&self.catalog, &state);
        self.recompute_count += 1;
        log::debug!(
            "recompute #{}: offset {:.1}px, viewport {:.0}px, active {:?}",
            self.recompute_count,
            state.offset_x,
            state.viewport_width,
            frame.active,
        );

        if let Some(background) = self.handles.background {
            let from = read_channel(&self.stage, background, Channel::OffsetX).unwrap_or(0.0);
            self.tweens.start(
                background,
                Tween::offset_x(from, -frame.parallax_offset, Transition::INSTANT),
                &mut self.stage,
            );
        }

        let fade = self.config.panel_fade;
        for (index, panel) in self.handles.panels.iter().enumerate() {
            let Some(panel) = *panel else { continue };
            let target = if frame.is_active(index) { 1.0 } else { 0.0 };
            self.tweens.animate_to(panel, Channel::Opacity, target, fade, &mut self.stage);
        }

        if let Some(readout) = self.handles.readout {
            let line = readout_line(
                &self.catalog.origin().name,
                &frame.distance_readout,
                &self.config.distance_unit,
            );
            if let Some(element) = self.stage.get_mut(readout) {
                element.set_text(line);
            }
        }

        let previous = self.frame.as_ref().map(|f| f.active.as_slice()).unwrap_or(&[]);
        if previous != frame.active.as_slice() {
            log::debug!("active bodies: {:?}", self.active_names(&frame));
            self.events.push(SceneEvent::ActiveChanged { active: frame.active.clone() });
        }
        self.frame = Some(frame);
    }

    fn active_names<'a>(&'a self, frame: &SceneFrame) -> Vec<&'a str> {
        frame
            .active
            .iter()
            .filter_map(|&i| self.catalog.get(i))
            .map(|b| b.name.as_str())
            .collect()
    }

    // -- Accessors --

    pub fn frame(&self) -> Option<&SceneFrame> {
        self.frame.as_ref()
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn mapper(&self) -> &SceneMapper {
        &self.mapper
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.tracker.state()
    }

    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    pub fn is_mounted(&self) -> bool {
        self.tracker.is_mounted()
    }

    /// Number of running animations.
    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }
}

fn panel_details(body: &CelestialBody) -> String {
    let mut line = format!("Moons: {}", body.moons);
    if !body.orbital_period.is_empty() {
        line.push_str(" · Orbital period: ");
        line.push_str(&body.orbital_period);
    }
    line
}
