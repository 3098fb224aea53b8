pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::view::{View, ViewConfig};
pub use api::error::SceneError;
pub use api::types::{BodyIndex, ElementId, SceneEvent};
pub use assets::catalog::{Catalog, CelestialBody, ImageRef, RenderScaleOverride};
pub use components::element::{Element, ElementKind};
pub use components::layer::RenderLayer;
pub use core::controller::SceneController;
pub use core::scale::ScaleFactor;
pub use core::stage::Stage;
pub use input::queue::{InputEvent, InputQueue};
pub use systems::mapper::{BodyLayout, BodySize, SceneFrame, SceneMapper};
pub use systems::readout::{distance_readout, group_thousands};
pub use systems::scroll::{ScrollState, ScrollTracker};
pub use systems::style::{Declaration, StyleCache, StyleChange};

// Extensions: animation on top of the stage
pub use extensions::{
    Easing, lerp, ease,
    Channel, Transition, Tween, TweenLoop, TweenState,
};
