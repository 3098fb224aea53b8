// extensions/tween.rs
//
// Tween system: animates element channels on the stage by ElementId.
// Decoupled from layout: the controller decides targets, tweens only move values.
//
// Usage:
//   let mut tweens = TweenState::new();
//   tweens.start(id, Tween::opacity(0.0, 1.0, Transition::fade()), &mut stage);
//   tweens.tick(dt, &mut stage);

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::api::types::ElementId;
use crate::core::stage::Stage;
use super::easing::{Easing, ease};

/// How a value moves to its new target: a duration in seconds plus a curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub duration: f64,
    pub easing: Easing,
}

impl Transition {
    /// Zero-duration linear transition. The value is written on `start`, with
    /// no interpolation, so scroll-locked layers track the scroll position 1:1.
    pub const INSTANT: Transition = Transition {
        duration: 0.0,
        easing: Easing::Linear,
    };

    pub fn new(duration: f64, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Default cross-fade used by info panels.
    pub fn fade() -> Self {
        Self::new(0.15, Easing::QuadInOut)
    }

    pub fn is_instant(&self) -> bool {
        self.duration <= 0.0
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::fade()
    }
}

/// Which animated channel of an element a tween writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    OffsetX,
    OffsetY,
    Opacity,
}

/// What happens when a tween reaches its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenLoop {
    /// Stop and remove the tween.
    #[default]
    Once,
    /// Reverse direction (ping-pong).
    PingPong,
}

/// A single animated value.
#[derive(Debug, Clone)]
pub struct Tween {
    pub channel: Channel,
    pub from: f64,
    pub to: f64,
    pub transition: Transition,
    pub elapsed: f64,
    pub loop_mode: TweenLoop,
    forward: bool,
}

impl Tween {
    pub fn new(channel: Channel, from: f64, to: f64, transition: Transition) -> Self {
        Self {
            channel,
            from,
            to,
            transition,
            elapsed: 0.0,
            loop_mode: TweenLoop::Once,
            forward: true,
        }
    }

    pub fn offset_x(from: f64, to: f64, transition: Transition) -> Self {
        Self::new(Channel::OffsetX, from, to, transition)
    }

    pub fn offset_y(from: f64, to: f64, transition: Transition) -> Self {
        Self::new(Channel::OffsetY, from, to, transition)
    }

    pub fn opacity(from: f64, to: f64, transition: Transition) -> Self {
        Self::new(Channel::Opacity, from, to, transition)
    }

    pub fn with_loop(mut self, mode: TweenLoop) -> Self {
        self.loop_mode = mode;
        self
    }

    /// Normalized progress [0, 1] in the current direction.
    pub fn progress(&self) -> f64 {
        if self.transition.is_instant() {
            1.0
        } else {
            (self.elapsed / self.transition.duration).clamp(0.0, 1.0)
        }
    }

    /// Current value of the animated channel.
    pub fn value(&self) -> f64 {
        let t = if self.forward {
            self.progress()
        } else {
            1.0 - self.progress()
        };
        ease(self.from, self.to, t, self.transition.easing)
    }

    /// The value the tween is heading towards in its current direction.
    pub fn target(&self) -> f64 {
        if self.forward { self.to } else { self.from }
    }
}

fn write_channel(stage: &mut Stage, id: ElementId, channel: Channel, value: f64) {
    if let Some(element) = stage.get_mut(id) {
        match channel {
            Channel::OffsetX => element.offset.x = value,
            Channel::OffsetY => element.offset.y = value,
            Channel::Opacity => element.opacity = value,
        }
    }
}

/// Read the current value of an element channel.
pub fn read_channel(stage: &Stage, id: ElementId, channel: Channel) -> Option<f64> {
    stage.get(id).map(|element| match channel {
        Channel::OffsetX => element.offset.x,
        Channel::OffsetY => element.offset.y,
        Channel::Opacity => element.opacity,
    })
}

/// All running tweens, at most one per (element, channel).
#[derive(Debug, Default)]
pub struct TweenState {
    tweens: HashMap<(ElementId, Channel), Tween>,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween, replacing whatever was animating the same channel.
    ///
    /// Instant transitions are written straight to the stage and never stored,
    /// so the new value is visible in the same frame.
    pub fn start(&mut self, id: ElementId, tween: Tween, stage: &mut Stage) {
        let key = (id, tween.channel);
        if tween.transition.is_instant() && tween.loop_mode == TweenLoop::Once {
            self.tweens.remove(&key);
            write_channel(stage, id, tween.channel, tween.to);
            return;
        }
        write_channel(stage, id, tween.channel, tween.value());
        self.tweens.insert(key, tween);
    }

    /// Animate a channel from its current value to `to`, unless it is already
    /// heading there. Keeps cross-fades smooth when the target is re-requested
    /// every frame.
    pub fn animate_to(
        &mut self,
        id: ElementId,
        channel: Channel,
        to: f64,
        transition: Transition,
        stage: &mut Stage,
    ) {
        if let Some(running) = self.tweens.get(&(id, channel)) {
            if running.target() == to {
                return;
            }
        }
        let Some(from) = read_channel(stage, id, channel) else { return };
        if from == to && !self.tweens.contains_key(&(id, channel)) {
            return;
        }
        self.start(id, Tween::new(channel, from, to, transition), stage);
    }

    pub fn get(&self, id: ElementId, channel: Channel) -> Option<&Tween> {
        self.tweens.get(&(id, channel))
    }

    /// Advance all tweens and write their values to the stage.
    /// Returns the number of tweens that finished this tick.
    pub fn tick(&mut self, dt: f64, stage: &mut Stage) -> usize {
        let mut finished = Vec::new();

        for (&(id, channel), tween) in self.tweens.iter_mut() {
            tween.elapsed += dt;
            let period = tween.transition.duration.max(f64::EPSILON);

            if tween.elapsed >= period {
                match tween.loop_mode {
                    TweenLoop::Once => finished.push((id, channel)),
                    TweenLoop::PingPong => {
                        // One long frame can span several legs; only the parity
                        // of the count decides the direction.
                        let legs = (tween.elapsed / period).floor();
                        tween.elapsed -= legs * period;
                        if legs % 2.0 == 1.0 {
                            tween.forward = !tween.forward;
                        }
                    }
                }
            }
            write_channel(stage, id, channel, tween.value());
        }

        for key in &finished {
            self.tweens.remove(key);
        }
        finished.len()
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}
