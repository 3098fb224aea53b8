use std::collections::HashMap;

use crate::api::types::ElementId;
use crate::components::element::{Element, ElementKind};
use crate::core::stage::Stage;

/// One CSS declaration.
pub type Declaration = (&'static str, String);

/// Pixel length for CSS. Non-finite values collapse to `0px`.
pub fn px(value: f64) -> String {
    if value.is_finite() {
        format!("{value}px")
    } else {
        "0px".to_string()
    }
}

fn decl(property: &'static str, value: impl Into<String>) -> Declaration {
    (property, value.into())
}

/// Declarations written once when the element's node is created.
pub fn static_style(element: &Element) -> Vec<Declaration> {
    let mut out = vec![decl("z-index", element.layer.z_index().to_string())];
    match &element.kind {
        ElementKind::Background { tile, tile_size } => {
            out.extend([
                decl("position", "fixed"),
                decl("top", "0"),
                decl("left", "0"),
                decl("height", "100%"),
                decl("background-image", format!("url({})", tile.as_str())),
                decl("background-size", px(*tile_size)),
                decl("background-repeat", "repeat"),
                decl("will-change", "transform"),
            ]);
        }
        ElementKind::Track => {
            out.extend([
                decl("position", "relative"),
                decl("height", "100%"),
                decl("display", "flex"),
                decl("align-items", "center"),
            ]);
        }
        ElementKind::Body { .. } => {
            out.push(decl("position", "absolute"));
        }
        ElementKind::Overlay => {
            out.extend([
                decl("position", "fixed"),
                decl("left", "0"),
                decl("bottom", "100px"),
                decl("width", "100%"),
                decl("height", "200px"),
                decl("display", "flex"),
                decl("align-items", "center"),
                decl("justify-content", "center"),
                decl("pointer-events", "none"),
            ]);
        }
        ElementKind::Panel { .. } => {
            out.extend([
                decl("position", "absolute"),
                decl("top", "50%"),
                decl("left", "50%"),
                decl("transform", "translate(-50%, -50%)"),
                decl("display", "flex"),
                decl("flex-direction", "column"),
                decl("align-items", "center"),
                decl("text-align", "center"),
                decl("box-sizing", "border-box"),
                decl("width", "100%"),
                decl("max-width", "600px"),
                decl("padding", "16px"),
                decl("background", "#1e1d31"),
                decl("border", "1px solid white"),
                decl("border-radius", "12px"),
                decl("color", "white"),
            ]);
        }
        ElementKind::Readout { .. } => {
            out.extend([
                decl("position", "fixed"),
                decl("bottom", "32px"),
                decl("left", "50%"),
                decl("transform", "translateX(-50%)"),
                decl("white-space", "nowrap"),
            ]);
        }
    }
    out
}

/// Declarations that follow layout and tweens; re-evaluated every paint.
pub fn dynamic_style(element: &Element) -> Vec<Declaration> {
    match &element.kind {
        ElementKind::Background { .. } => vec![
            decl("width", px(element.size.x)),
            decl("transform", format!("translateX({})", px(element.offset.x))),
        ],
        ElementKind::Track => vec![decl("width", px(element.size.x))],
        ElementKind::Body { .. } => vec![
            decl("left", px(element.pos.x)),
            decl("width", px(element.size.x)),
            decl("height", px(element.size.y)),
            decl("transform", format!("translate(-50%, {})", px(element.offset.y))),
        ],
        ElementKind::Panel { .. } => vec![decl("opacity", format_opacity(element.opacity))],
        ElementKind::Overlay | ElementKind::Readout { .. } => Vec::new(),
    }
}

fn format_opacity(opacity: f64) -> String {
    let clamped = if opacity.is_finite() { opacity.clamp(0.0, 1.0) } else { 0.0 };
    // Three decimals is below what a compositor can show.
    format!("{:.3}", clamped)
}

/// Pending style writes for one element.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleChange {
    pub id: ElementId,
    pub declarations: Vec<Declaration>,
}

/// Remembers the last painted dynamic values so a paint only carries changes.
#[derive(Debug, Default)]
pub struct StyleCache {
    painted: HashMap<ElementId, Vec<Declaration>>,
}

impl StyleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff the stage against the last paint. Elements seen for the first
    /// time report every dynamic declaration.
    pub fn changes(&mut self, stage: &Stage) -> Vec<StyleChange> {
        let mut out = Vec::new();
        for element in stage.iter() {
            let current = dynamic_style(element);
            let previous = self.painted.get(&element.id);
            let declarations: Vec<Declaration> = current
                .iter()
                .filter(|(prop, value)| {
                    previous
                        .and_then(|p| p.iter().find(|(q, _)| q == prop))
                        .map_or(true, |(_, old)| old != value)
                })
                .cloned()
                .collect();
            if !declarations.is_empty() {
                out.push(StyleChange { id: element.id, declarations });
            }
            self.painted.insert(element.id, current);
        }
        self.painted.retain(|id, _| stage.get(*id).is_some());
        out
    }

    pub fn forget(&mut self, id: ElementId) {
        self.painted.remove(&id);
    }

    pub fn clear(&mut self) {
        self.painted.clear();
    }

    pub fn len(&self) -> usize {
        self.painted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.painted.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::catalog::ImageRef;
    use crate::components::layer::RenderLayer;
    use glam::DVec2;

    fn find<'a>(decls: &'a [Declaration], prop: &str) -> Option<&'a str> {
        decls.iter().find(|(p, _)| *p == prop).map(|(_, v)| v.as_str())
    }

    fn body(id: u32) -> Element {
        Element::new(
            ElementId(id),
            ElementKind::Body {
                index: 1,
                image: ImageRef::new("/Mercury.svg"),
                alt: "Mercury".into(),
                floating: true,
            },
        )
        .with_pos(DVec2::new(41_601.5, 0.0))
        .with_size(DVec2::new(3.5, 3.5))
    }

    #[test]
    fn background_tiles_and_translates() {
        let mut bg = Element::new(
            ElementId(1),
            ElementKind::Background { tile: ImageRef::new("/Stars.svg"), tile_size: 250.0 },
        )
        .with_layer(RenderLayer::Background)
        .with_size(DVec2::new(32_000.0, 0.0));
        bg.offset.x = -12.5;

        let fixed = static_style(&bg);
        assert_eq!(find(&fixed, "background-image"), Some("url(/Stars.svg)"));
        assert_eq!(find(&fixed, "background-size"), Some("250px"));
        assert_eq!(find(&fixed, "position"), Some("fixed"));
        assert_eq!(find(&fixed, "z-index"), Some("0"));

        let dynamic = dynamic_style(&bg);
        assert_eq!(find(&dynamic, "transform"), Some("translateX(-12.5px)"));
        assert_eq!(find(&dynamic, "width"), Some("32000px"));
    }

    #[test]
    fn body_is_centered_on_its_left_edge() {
        let mut b = body(2);
        b.offset.y = -7.0;
        let dynamic = dynamic_style(&b);
        assert_eq!(find(&dynamic, "left"), Some("41601.5px"));
        assert_eq!(find(&dynamic, "transform"), Some("translate(-50%, -7px)"));
    }

    #[test]
    fn panel_opacity_is_clamped() {
        let panel = Element::new(
            ElementId(3),
            ElementKind::Panel {
                index: 1,
                title: "Mercury".into(),
                text: "Small.".into(),
                details: None,
            },
        )
        .with_opacity(1.2);
        assert_eq!(find(&dynamic_style(&panel), "opacity"), Some("1.000"));
    }

    #[test]
    fn non_finite_lengths_collapse() {
        assert_eq!(px(f64::NAN), "0px");
        assert_eq!(px(3.0), "3px");
    }

    #[test]
    fn cache_reports_only_changes() {
        let mut stage = Stage::new();
        let id = stage.next_id();
        stage.spawn(body(id.0));
        let mut cache = StyleCache::new();

        let first = cache.changes(&stage);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].declarations.len(), 4);

        assert!(cache.changes(&stage).is_empty());

        if let Some(e) = stage.get_mut(id) {
            e.offset.y = -3.0;
        }
        let moved = cache.changes(&stage);
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].declarations, vec![("transform", "translate(-50%, -3px)".to_string())]);
    }

    #[test]
    fn cache_drops_cleared_elements() {
        let mut stage = Stage::new();
        let id = stage.next_id();
        stage.spawn(body(id.0));
        let mut cache = StyleCache::new();
        cache.changes(&stage);
        assert_eq!(cache.len(), 1);
        stage.clear();
        cache.changes(&stage);
        assert!(cache.is_empty());
    }
}
