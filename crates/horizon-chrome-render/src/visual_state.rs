//! Visual states of chrome regions.

/// The rendering state of a region, driven by the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisualState {
    /// Pointer elsewhere.
    #[default]
    Normal,
    /// Pointer over the region, no button held on it.
    Hovered,
    /// Pointer over the region while the button pressed on it is held.
    Pressed,
}

/// Colors for each visual state of a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateColors {
    /// Color in [`VisualState::Normal`].
    pub normal: crate::Color,
    /// Color in [`VisualState::Hovered`].
    pub hovered: crate::Color,
    /// Color in [`VisualState::Pressed`].
    pub pressed: crate::Color,
}

impl StateColors {
    /// Create colors for the three states.
    pub const fn new(normal: crate::Color, hovered: crate::Color, pressed: crate::Color) -> Self {
        Self {
            normal,
            hovered,
            pressed,
        }
    }

    /// Use the same color for every state.
    pub const fn uniform(color: crate::Color) -> Self {
        Self::new(color, color, color)
    }

    /// The color for a state.
    pub fn color_for(&self, state: VisualState) -> crate::Color {
        match state {
            VisualState::Normal => self.normal,
            VisualState::Hovered => self.hovered,
            VisualState::Pressed => self.pressed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_color_for_state() {
        let colors = StateColors::new(Color::TRANSPARENT, Color::RED, Color::DARK_RED);
        assert_eq!(colors.color_for(VisualState::Normal), Color::TRANSPARENT);
        assert_eq!(colors.color_for(VisualState::Hovered), Color::RED);
        assert_eq!(colors.color_for(VisualState::Pressed), Color::DARK_RED);

        let flat = StateColors::uniform(Color::AQUA);
        assert_eq!(flat.color_for(VisualState::Pressed), Color::AQUA);
    }
}
