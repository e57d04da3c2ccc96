//! Semantic region identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hit_test_code::HitTestCode;

/// Stable semantic tag of an interactive chrome region.
///
/// The id decides both the hit-test code reported to the window manager and
/// which click bindings apply to the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionId {
    /// Window icon; opens the system menu.
    SystemMenu,
    /// Draggable title bar area.
    Caption,
    /// Minimize button.
    Minimize,
    /// Maximize / restore button.
    Maximize,
    /// Close button.
    Close,
    /// Application content canvas.
    Client,
    /// Region that is hit-testable but has no role.
    None,
}

impl RegionId {
    /// The hit-test code reported for a point inside a region with this id.
    pub const fn hit_test_code(self) -> HitTestCode {
        match self {
            Self::SystemMenu => HitTestCode::SystemMenu,
            Self::Caption => HitTestCode::Caption,
            Self::Minimize => HitTestCode::MinimizeButton,
            Self::Maximize => HitTestCode::MaximizeButton,
            Self::Close => HitTestCode::CloseButton,
            Self::Client => HitTestCode::Client,
            Self::None => HitTestCode::Nowhere,
        }
    }

    /// Check if this id is one of the three caption buttons.
    pub const fn is_button(self) -> bool {
        matches!(self, Self::Minimize | Self::Maximize | Self::Close)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SystemMenu => "system_menu",
            Self::Caption => "caption",
            Self::Minimize => "minimize",
            Self::Maximize => "maximize",
            Self::Close => "close",
            Self::Client => "client",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_codes() {
        assert_eq!(RegionId::SystemMenu.hit_test_code(), HitTestCode::SystemMenu);
        assert_eq!(RegionId::Caption.hit_test_code(), HitTestCode::Caption);
        assert_eq!(RegionId::Minimize.hit_test_code(), HitTestCode::MinimizeButton);
        assert_eq!(RegionId::Maximize.hit_test_code(), HitTestCode::MaximizeButton);
        assert_eq!(RegionId::Close.hit_test_code(), HitTestCode::CloseButton);
        assert_eq!(RegionId::Client.hit_test_code(), HitTestCode::Client);
        assert_eq!(RegionId::None.hit_test_code(), HitTestCode::Nowhere);
    }

    #[test]
    fn test_buttons() {
        assert!(RegionId::Close.is_button());
        assert!(!RegionId::Caption.is_button());
        assert!(!RegionId::SystemMenu.is_button());
    }
}
