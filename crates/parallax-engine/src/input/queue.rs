/// Environment signals the scene understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The page scrolled horizontally. Carries the viewport width measured at
    /// the same moment so the visibility check always uses a matching pair.
    Scroll { offset_x: f64, viewport_width: f64 },
}

/// A queue of input events.
/// The host pushes events as they arrive; the controller drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take all pending events, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
