use glam::DVec2;

use crate::api::types::{BodyIndex, ElementId};
use crate::assets::catalog::ImageRef;
use crate::components::layer::RenderLayer;

/// What an element is, and the content it carries.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Repeating tile pattern behind everything else.
    Background { tile: ImageRef, tile_size: f64 },
    /// The scrollable strip holding the bodies. Its width sets the page width.
    Track,
    /// A catalog body drawn as an image centered on its position.
    Body {
        index: BodyIndex,
        image: ImageRef,
        alt: String,
        floating: bool,
    },
    /// Fixed container for info panels.
    Overlay,
    /// Info card for one body.
    Panel {
        index: BodyIndex,
        title: String,
        text: String,
        details: Option<String>,
    },
    /// Running distance text.
    Readout { text: String },
}

/// A node on the stage.
///
/// `pos` and `size` come from layout; `offset` and `opacity` are the animated
/// channels driven by tweens.
#[derive(Debug, Clone)]
pub struct Element {
    pub id: ElementId,
    /// Lookup tag (body name for bodies and panels, role name otherwise).
    pub tag: String,
    pub layer: RenderLayer,
    /// Containing element, or `None` for children of the mount root.
    pub parent: Option<ElementId>,
    pub kind: ElementKind,
    /// Left/top in pixels relative to the parent.
    pub pos: DVec2,
    /// Width/height in pixels. Zero means "size from content".
    pub size: DVec2,
    /// Animated translation in pixels.
    pub offset: DVec2,
    /// 0.0 = invisible but still laid out, 1.0 = opaque.
    pub opacity: f64,
}

impl Element {
    pub fn new(id: ElementId, kind: ElementKind) -> Self {
        Self {
            id,
            tag: String::new(),
            layer: RenderLayer::default(),
            parent: None,
            kind,
            pos: DVec2::ZERO,
            size: DVec2::ZERO,
            offset: DVec2::ZERO,
            opacity: 1.0,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_parent(mut self, parent: ElementId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_pos(mut self, pos: DVec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_size(mut self, size: DVec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Text content, for elements that carry any.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Readout { text } => Some(text),
            _ => None,
        }
    }

    /// Replace readout text. Returns false for elements without text.
    pub fn set_text(&mut self, new_text: impl Into<String>) -> bool {
        match &mut self.kind {
            ElementKind::Readout { text } => {
                *text = new_text.into();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let e = Element::new(ElementId(3), ElementKind::Track)
            .with_tag("track")
            .with_layer(RenderLayer::Track)
            .with_parent(ElementId(1))
            .with_size(DVec2::new(100.0, 0.0));
        assert_eq!(e.tag, "track");
        assert_eq!(e.parent, Some(ElementId(1)));
        assert_eq!(e.size.x, 100.0);
        assert_eq!(e.opacity, 1.0);
    }

    #[test]
    fn only_readouts_take_text() {
        let mut readout = Element::new(ElementId(1), ElementKind::Readout { text: "0".into() });
        assert!(readout.set_text("1,000"));
        assert_eq!(readout.text(), Some("1,000"));

        let mut track = Element::new(ElementId(2), ElementKind::Track);
        assert!(!track.set_text("x"));
        assert_eq!(track.text(), None);
    }
}
