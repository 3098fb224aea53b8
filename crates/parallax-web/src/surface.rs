use std::collections::HashMap;

use parallax_engine::systems::style::{static_style, Declaration};
use parallax_engine::{Element, ElementId, ElementKind, Stage, StyleCache};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

const ROOT_STYLE: &[(&str, &str)] = &[
    ("position", "relative"),
    ("height", "100vh"),
    ("overflow-y", "clip"),
    ("width", "max-content"),
];

/// Mirrors a [`Stage`] into DOM nodes under a root element.
///
/// Nodes are created the first time their element is seen and removed when it
/// disappears. Each paint only writes styles and text that changed.
pub struct DomSurface {
    document: Document,
    root: HtmlElement,
    nodes: HashMap<ElementId, HtmlElement>,
    texts: HashMap<ElementId, String>,
    styles: StyleCache,
}

impl DomSurface {
    pub fn new(root_id: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let root = document
            .get_element_by_id(root_id)
            .ok_or_else(|| JsValue::from_str(&format!("missing root element #{root_id}")))?
            .dyn_into::<HtmlElement>()?;
        let style = root.style();
        for (property, value) in ROOT_STYLE {
            style.set_property(property, value)?;
        }
        Ok(Self {
            document,
            root,
            nodes: HashMap::new(),
            texts: HashMap::new(),
            styles: StyleCache::new(),
        })
    }

    /// Bring the DOM in line with the stage.
    pub fn paint(&mut self, stage: &Stage) -> Result<(), JsValue> {
        let stale: Vec<ElementId> = self
            .nodes
            .keys()
            .filter(|id| stage.get(**id).is_none())
            .copied()
            .collect();
        for id in stale {
            self.remove(id);
        }

        for element in stage.iter() {
            if !self.nodes.contains_key(&element.id) {
                self.create(element)?;
            }
            if let Some(text) = element.text() {
                self.write_text(element.id, text);
            }
        }

        for change in self.styles.changes(stage) {
            if let Some(node) = self.nodes.get(&change.id) {
                apply(node, &change.declarations)?;
            }
        }
        Ok(())
    }

    /// Remove every node this surface created.
    pub fn clear(&mut self) {
        for (_, node) in self.nodes.drain() {
            node.remove();
        }
        self.texts.clear();
        self.styles.clear();
    }

    fn create(&mut self, element: &Element) -> Result<(), JsValue> {
        let node = match &element.kind {
            ElementKind::Body { image, alt, .. } => {
                let img = self.html("img")?;
                img.set_attribute("src", image.as_str())?;
                img.set_attribute("alt", alt)?;
                img.set_attribute("draggable", "false")?;
                img
            }
            ElementKind::Panel { title, text, details, .. } => {
                let panel = self.html("div")?;
                let heading = self.html("div")?;
                heading.style().set_property("font-size", "1.875rem")?;
                heading.set_text_content(Some(title.as_str()));
                panel.append_child(&heading)?;
                let fact = self.html("div")?;
                fact.set_text_content(Some(text.as_str()));
                panel.append_child(&fact)?;
                if let Some(details) = details {
                    let line = self.html("div")?;
                    line.style().set_property("opacity", "0.7")?;
                    line.set_text_content(Some(details.as_str()));
                    panel.append_child(&line)?;
                }
                panel
            }
            _ => self.html("div")?,
        };
        node.set_attribute("data-tag", &element.tag)?;
        apply(&node, &static_style(element))?;

        let parent = element.parent.and_then(|p| self.nodes.get(&p));
        match parent {
            Some(parent) => parent.append_child(&node)?,
            None => self.root.append_child(&node)?,
        };
        self.nodes.insert(element.id, node);
        Ok(())
    }

    fn write_text(&mut self, id: ElementId, text: &str) {
        if self.texts.get(&id).map(String::as_str) == Some(text) {
            return;
        }
        if let Some(node) = self.nodes.get(&id) {
            node.set_text_content(Some(text));
            self.texts.insert(id, text.to_string());
        }
    }

    fn remove(&mut self, id: ElementId) {
        if let Some(node) = self.nodes.remove(&id) {
            node.remove();
        }
        self.texts.remove(&id);
        self.styles.forget(id);
    }

    fn html(&self, tag: &str) -> Result<HtmlElement, JsValue> {
        Ok(self.document.create_element(tag)?.dyn_into::<HtmlElement>()?)
    }
}

impl Drop for DomSurface {
    fn drop(&mut self) {
        self.clear();
    }
}

fn apply(node: &HtmlElement, declarations: &[Declaration]) -> Result<(), JsValue> {
    let style = node.style();
    for (property, value) in declarations {
        style.set_property(property, value)?;
    }
    Ok(())
}
