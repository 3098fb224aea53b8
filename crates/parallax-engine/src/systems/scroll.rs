//! Scroll tracking.
//!
//! The tracker is the single writer of [`ScrollState`]. It is owned by the
//! controller instance, fed from the input queue, and read by the mapper once
//! per frame through [`ScrollTracker::take_change`].

use crate::input::queue::InputEvent;

/// Horizontal scroll position and the viewport width it was measured against.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    pub offset_x: f64,
    pub viewport_width: f64,
}

impl ScrollState {
    pub fn new(offset_x: f64, viewport_width: f64) -> Self {
        Self {
            offset_x: sanitize(offset_x),
            viewport_width: sanitize(viewport_width),
        }
    }
}

/// Non-finite or negative environment readings degrade to zero.
fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

#[derive(Debug, Default)]
pub struct ScrollTracker {
    state: ScrollState,
    mounted: bool,
    revision: u64,
    consumed: u64,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing. The offset starts at zero until the first scroll event.
    pub fn mount(&mut self, viewport_width: f64) {
        self.mounted = true;
        self.state = ScrollState::new(0.0, viewport_width);
        self.revision += 1;
    }

    /// Stop observing. Later events are ignored and produce no changes.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.consumed = self.revision;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Apply one environment event. Returns whether the state changed.
    pub fn publish(&mut self, event: InputEvent) -> bool {
        if !self.mounted {
            return false;
        }
        let InputEvent::Scroll { offset_x, viewport_width } = event;
        let next = ScrollState::new(offset_x, viewport_width);
        if next == self.state {
            return false;
        }
        self.state = next;
        self.revision += 1;
        true
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Whether a change is waiting to be consumed.
    pub fn is_dirty(&self) -> bool {
        self.mounted && self.revision != self.consumed
    }

    /// The latest state, once per change. Any number of events between two
    /// calls collapse into a single change.
    pub fn take_change(&mut self) -> Option<ScrollState> {
        if !self.is_dirty() {
            return None;
        }
        self.consumed = self.revision;
        Some(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroll(offset_x: f64) -> InputEvent {
        InputEvent::Scroll { offset_x, viewport_width: 1000.0 }
    }

    #[test]
    fn starts_at_zero_on_mount() {
        let mut tracker = ScrollTracker::new();
        tracker.mount(1000.0);
        assert_eq!(tracker.take_change(), Some(ScrollState::new(0.0, 1000.0)));
        assert_eq!(tracker.take_change(), None);
    }

    #[test]
    fn burst_of_events_collapses_to_one_change() {
        let mut tracker = ScrollTracker::new();
        tracker.mount(1000.0);
        tracker.take_change();
        assert!(tracker.publish(scroll(10.0)));
        assert!(tracker.publish(scroll(20.0)));
        assert!(tracker.publish(scroll(30.0)));
        assert_eq!(tracker.take_change().map(|s| s.offset_x), Some(30.0));
        assert_eq!(tracker.take_change(), None);
    }

    #[test]
    fn repeated_offset_is_not_a_change() {
        let mut tracker = ScrollTracker::new();
        tracker.mount(1000.0);
        assert!(tracker.publish(scroll(5.0)));
        assert!(!tracker.publish(scroll(5.0)));
    }

    #[test]
    fn unmounted_tracker_ignores_events() {
        let mut tracker = ScrollTracker::new();
        assert!(!tracker.publish(scroll(10.0)));

        tracker.mount(1000.0);
        tracker.publish(scroll(10.0));
        tracker.unmount();
        assert!(!tracker.publish(scroll(99.0)));
        assert_eq!(tracker.state().offset_x, 10.0);
        assert_eq!(tracker.take_change(), None);
    }

    #[test]
    fn bad_readings_degrade_to_zero() {
        let mut tracker = ScrollTracker::new();
        tracker.mount(f64::NAN);
        assert_eq!(tracker.state().viewport_width, 0.0);
        tracker.publish(InputEvent::Scroll { offset_x: -12.0, viewport_width: 800.0 });
        assert_eq!(tracker.state().offset_x, 0.0);
        tracker.publish(InputEvent::Scroll { offset_x: f64::INFINITY, viewport_width: 800.0 });
        assert_eq!(tracker.state().offset_x, 0.0);
    }
}
