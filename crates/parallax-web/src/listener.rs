use std::cell::RefCell;
use std::rc::Rc;

use parallax_engine::{InputEvent, InputQueue};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Current horizontal scroll and viewport width, or zeros when the window
/// cannot report them.
pub fn read_scroll(window: &Window) -> InputEvent {
    let offset_x = window.scroll_x().unwrap_or(0.0);
    let viewport_width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0);
    InputEvent::Scroll { offset_x, viewport_width }
}

/// Registered `scroll` listener on `window`. Dropping it deregisters the
/// callback, so the queue stops receiving events on every exit path.
pub struct ScrollListener {
    window: Window,
    closure: Closure<dyn FnMut()>,
}

impl ScrollListener {
    /// Attach to the global window. Returns `None` when there is no window or
    /// the listener cannot be registered; the scene then stays at offset 0.
    pub fn attach(queue: Rc<RefCell<InputQueue>>) -> Option<Self> {
        let Some(window) = web_sys::window() else {
            log::warn!("scroll listener: no window, scroll offset stays at 0");
            return None;
        };

        let source = window.clone();
        let closure = Closure::wrap(Box::new(move || {
            // The runner may be mid-tick when a scroll fires re-entrantly.
            if let Ok(mut queue) = queue.try_borrow_mut() {
                queue.push(read_scroll(&source));
            }
        }) as Box<dyn FnMut()>);

        if window
            .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("scroll listener: failed to register, scroll offset stays at 0");
            return None;
        }
        log::debug!("scroll listener attached");
        Some(Self { window, closure })
    }
}

impl Drop for ScrollListener {
    fn drop(&mut self) {
        if self
            .window
            .remove_event_listener_with_callback("scroll", self.closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("scroll listener: failed to deregister");
        } else {
            log::debug!("scroll listener detached");
        }
    }
}
