use std::cell::RefCell;
use std::rc::Rc;

use parallax_engine::{
    Catalog, InputEvent, InputQueue, SceneController, SceneError, View, ViewConfig,
};
use wasm_bindgen::prelude::*;

use crate::listener::{read_scroll, ScrollListener};
use crate::surface::DomSurface;

/// Log an engine error and turn it into a value JS can throw.
pub fn js_error(err: SceneError) -> JsValue {
    log::error!("{err}");
    JsValue::from_str(&err.to_string())
}

/// Generic scene runner that wires a [`View`] to the page.
///
/// Each concrete scene creates a `thread_local!` SceneRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export generic
/// structs directly.
pub struct SceneRunner<V: View> {
    view: V,
    controller: SceneController,
    /// Shared with the scroll listener closure. Listener writes, tick reads.
    input: Rc<RefCell<InputQueue>>,
    surface: Option<DomSurface>,
    listener: Option<ScrollListener>,
}

impl<V: View> SceneRunner<V> {
    pub fn new(view: V) -> Result<Self, SceneError> {
        let controller = SceneController::new(view.config(), view.catalog()?)?;
        Ok(Self {
            view,
            controller,
            input: Rc::new(RefCell::new(InputQueue::new())),
            surface: None,
            listener: None,
        })
    }

    /// Build the scene under `root_id` and start listening for scroll.
    pub fn mount(&mut self, root_id: &str) -> Result<(), JsValue> {
        if self.controller.is_mounted() {
            return Err(js_error(SceneError::AlreadyMounted));
        }
        let surface = DomSurface::new(root_id)?;
        let window = web_sys::window();
        let viewport_width = window
            .as_ref()
            .and_then(|w| w.inner_width().ok())
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0);

        self.controller.mount(viewport_width).map_err(js_error)?;
        self.surface = Some(surface);
        self.listener = ScrollListener::attach(Rc::clone(&self.input));
        // The page may already be scrolled (restored position after reload).
        if let Some(window) = window.as_ref() {
            self.input.borrow_mut().push(read_scroll(window));
        }
        self.paint()
    }

    /// Stop listening and remove the scene's nodes.
    pub fn unmount(&mut self) -> Result<(), JsValue> {
        self.listener = None;
        self.surface = None;
        self.input.borrow_mut().clear();
        self.controller.unmount().map_err(js_error)
    }

    /// Run one frame: feed input to the controller, notify the view, paint.
    pub fn tick(&mut self, dt: f64) -> Result<(), JsValue> {
        let events = {
            let mut input = self.input.borrow_mut();
            self.controller.tick(dt, &mut input)
        };
        for event in &events {
            self.view.on_event(event, self.controller.catalog());
        }
        self.paint()
    }

    /// Push a scroll reading from the host (for hosts that own the listener).
    pub fn push_scroll(&mut self, offset_x: f64, viewport_width: f64) {
        self.input
            .borrow_mut()
            .push(InputEvent::Scroll { offset_x, viewport_width });
    }

    pub fn load_catalog(&mut self, json: &str) -> Result<(), JsValue> {
        let catalog = Catalog::from_json(json).map_err(js_error)?;
        self.controller.replace_catalog(catalog).map_err(js_error)?;
        self.paint()
    }

    pub fn configure(&mut self, json: &str) -> Result<(), JsValue> {
        let config = ViewConfig::from_json(json).map_err(js_error)?;
        self.controller.reconfigure(config).map_err(js_error)?;
        self.paint()
    }

    fn paint(&mut self) -> Result<(), JsValue> {
        match self.surface.as_mut() {
            Some(surface) => surface.paint(self.controller.stage()),
            None => Ok(()),
        }
    }

    // ---- Data accessors ----

    pub fn scene_width(&self) -> f64 {
        self.controller.mapper().scene_width(self.controller.catalog())
    }

    pub fn parallax_offset(&self) -> f64 {
        self.controller.frame().map_or(0.0, |f| f.parallax_offset)
    }

    pub fn distance_readout(&self) -> String {
        self.controller
            .frame()
            .map_or_else(|| "0".to_string(), |f| f.distance_readout.clone())
    }

    pub fn active_bodies(&self) -> Vec<u32> {
        self.controller
            .frame()
            .map(|f| f.active.iter().map(|&i| i as u32).collect())
            .unwrap_or_default()
    }
}
