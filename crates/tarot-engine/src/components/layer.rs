/// Render layer: controls draw order for entities.
///
/// Layers are drawn back-to-front. Popups (card reveal, connection
/// warnings, menus) sit above everything on the stage, and their text
/// above them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum RenderLayer {
    Background = 0,
    #[default]
    Objects = 1,
    Text = 2,
    Popup = 3,
    PopupText = 4,
}

impl RenderLayer {
    pub const COUNT: usize = 5;

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Background),
            1 => Some(Self::Objects),
            2 => Some(Self::Text),
            3 => Some(Self::Popup),
            4 => Some(Self::PopupText),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_objects() {
        assert_eq!(RenderLayer::default(), RenderLayer::Objects);
    }

    #[test]
    fn popups_draw_over_stage() {
        assert!(RenderLayer::Background < RenderLayer::Objects);
        assert!(RenderLayer::Text < RenderLayer::Popup);
        assert!(RenderLayer::Popup < RenderLayer::PopupText);
    }

    #[test]
    fn from_u8_rejects_out_of_range() {
        assert_eq!(RenderLayer::from_u8(3), Some(RenderLayer::Popup));
        assert!(RenderLayer::from_u8(RenderLayer::COUNT as u8).is_none());
    }
}
