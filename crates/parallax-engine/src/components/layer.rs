/// Render layer: controls paint order of stage elements.
///
/// Layers are painted back-to-front: the starfield first, the distance readout last.
/// `Track` is the only layer that scrolls with the page; the others are fixed
/// to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum RenderLayer {
    Background = 0,
    #[default]
    Track = 1,
    Overlay = 2,
    Hud = 3,
}

impl RenderLayer {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// CSS stacking order for the layer.
    pub fn z_index(self) -> i32 {
        self.as_u8() as i32 * 10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_back_to_front() {
        assert!(RenderLayer::Background < RenderLayer::Track);
        assert!(RenderLayer::Track < RenderLayer::Overlay);
        assert!(RenderLayer::Overlay < RenderLayer::Hud);
        assert!(RenderLayer::Background.z_index() < RenderLayer::Hud.z_index());
    }

    #[test]
    fn z_index_steps_by_ten() {
        assert_eq!(RenderLayer::Background.z_index(), 0);
        assert_eq!(RenderLayer::Hud.z_index(), 30);
    }
}
