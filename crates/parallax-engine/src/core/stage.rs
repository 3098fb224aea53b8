use crate::api::types::{BodyIndex, ElementId};
use crate::components::element::{Element, ElementKind};

/// Retained element storage using a flat Vec in insertion order.
/// Parents are always inserted before their children, so iterating in order
/// is a valid build order for the painter.
pub struct Stage {
    elements: Vec<Element>,
    next_id: u32,
}

impl Stage {
    pub fn new() -> Self {
        Self {
            elements: Vec::with_capacity(32),
            next_id: 1,
        }
    }

    /// Generate the next unique element ID.
    pub fn next_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an element. Returns its id for chaining parent links.
    pub fn spawn(&mut self, element: Element) -> ElementId {
        let id = element.id;
        self.elements.push(element);
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Find the first element with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.tag == tag)
    }

    /// The image element for a catalog body.
    pub fn body(&self, index: BodyIndex) -> Option<&Element> {
        self.elements
            .iter()
            .find(|e| matches!(e.kind, ElementKind::Body { index: i, .. } if i == index))
    }

    /// The info panel for a catalog body.
    pub fn panel(&self, index: BodyIndex) -> Option<&Element> {
        self.elements
            .iter()
            .find(|e| matches!(e.kind, ElementKind::Panel { index: i, .. } if i == index))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Remove all elements. Ids keep counting up so stale handles never alias.
    pub fn clear(&mut self) {
        self.elements.clear();
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}
