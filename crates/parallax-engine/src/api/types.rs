/// Unique identifier for an element on the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// Index of a body within its catalog.
pub type BodyIndex = usize;

/// Notification raised by the controller when derived scene state changes.
/// Forwarded to the `View` hook so the host can react (logging, analytics, UI).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneEvent {
    /// The set of fully visible bodies changed. Indices are in catalog order.
    ActiveChanged { active: Vec<BodyIndex> },
}
