//! Hit-test classification codes.
//!
//! A hit-test code tells the window manager what role a point plays in the
//! window: part of the caption, a resize handle, a caption button, or plain
//! client area. The raw values match the Win32 `HT*` constants so platform
//! glue can pass them through without a lookup table.

use std::fmt;

/// Symbolic classification of a window point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitTestCode {
    /// On the border between windows, the window manager beeps.
    Error,
    /// Not over any part of the window.
    Nowhere,
    /// Client area.
    Client,
    /// Title bar; dragging moves the window.
    Caption,
    /// Window icon / system menu.
    SystemMenu,
    /// Size box (same as bottom-right corner on modern systems).
    GrowBox,
    /// Menu bar.
    Menu,
    /// Horizontal scroll bar.
    HorizontalScroll,
    /// Vertical scroll bar.
    VerticalScroll,
    /// Minimize button.
    MinimizeButton,
    /// Maximize / restore button.
    MaximizeButton,
    /// Left resize border.
    LeftBorder,
    /// Right resize border.
    RightBorder,
    /// Top resize border.
    TopBorder,
    /// Top-left resize corner.
    TopLeftCorner,
    /// Top-right resize corner.
    TopRightCorner,
    /// Bottom resize border.
    BottomBorder,
    /// Bottom-left resize corner.
    BottomLeftCorner,
    /// Bottom-right resize corner.
    BottomRightCorner,
    /// Border of a window without a sizing border.
    Border,
    /// Object (unused by the window manager).
    Object,
    /// Close button.
    CloseButton,
    /// Help button.
    HelpButton,
}

impl HitTestCode {
    /// All codes, in raw-value order.
    pub const ALL: [HitTestCode; 23] = [
        Self::Error,
        Self::Nowhere,
        Self::Client,
        Self::Caption,
        Self::SystemMenu,
        Self::GrowBox,
        Self::Menu,
        Self::HorizontalScroll,
        Self::VerticalScroll,
        Self::MinimizeButton,
        Self::MaximizeButton,
        Self::LeftBorder,
        Self::RightBorder,
        Self::TopBorder,
        Self::TopLeftCorner,
        Self::TopRightCorner,
        Self::BottomBorder,
        Self::BottomLeftCorner,
        Self::BottomRightCorner,
        Self::Border,
        Self::Object,
        Self::CloseButton,
        Self::HelpButton,
    ];

    /// The raw value of this code (Win32 `HT*` numbering).
    pub const fn to_raw(self) -> i32 {
        match self {
            Self::Error => -2,
            Self::Nowhere => 0,
            Self::Client => 1,
            Self::Caption => 2,
            Self::SystemMenu => 3,
            Self::GrowBox => 4,
            Self::Menu => 5,
            Self::HorizontalScroll => 6,
            Self::VerticalScroll => 7,
            Self::MinimizeButton => 8,
            Self::MaximizeButton => 9,
            Self::LeftBorder => 10,
            Self::RightBorder => 11,
            Self::TopBorder => 12,
            Self::TopLeftCorner => 13,
            Self::TopRightCorner => 14,
            Self::BottomBorder => 15,
            Self::BottomLeftCorner => 16,
            Self::BottomRightCorner => 17,
            Self::Border => 18,
            Self::Object => 19,
            Self::CloseButton => 20,
            Self::HelpButton => 21,
        }
    }

    /// Parse a raw value. Returns `None` for values the window manager
    /// does not define (including `HTTRANSPARENT`).
    pub fn from_raw(raw: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.to_raw() == raw)
    }

    /// Check if this code is a resize handle (edges and corners).
    ///
    /// Resize codes span `LeftBorder..=BottomRightCorner`, the window
    /// manager's sizing range.
    pub fn is_resize(self) -> bool {
        let raw = self.to_raw();
        (Self::LeftBorder.to_raw()..=Self::BottomRightCorner.to_raw()).contains(&raw)
    }

    /// Check if this code is one of the caption buttons.
    pub fn is_caption_button(self) -> bool {
        matches!(
            self,
            Self::MinimizeButton | Self::MaximizeButton | Self::CloseButton | Self::HelpButton
        )
    }
}

impl fmt::Display for HitTestCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "Error",
            Self::Nowhere => "Nowhere",
            Self::Client => "Client",
            Self::Caption => "Caption",
            Self::SystemMenu => "SystemMenu",
            Self::GrowBox => "GrowBox",
            Self::Menu => "Menu",
            Self::HorizontalScroll => "HorizontalScroll",
            Self::VerticalScroll => "VerticalScroll",
            Self::MinimizeButton => "MinimizeButton",
            Self::MaximizeButton => "MaximizeButton",
            Self::LeftBorder => "LeftBorder",
            Self::RightBorder => "RightBorder",
            Self::TopBorder => "TopBorder",
            Self::TopLeftCorner => "TopLeftCorner",
            Self::TopRightCorner => "TopRightCorner",
            Self::BottomBorder => "BottomBorder",
            Self::BottomLeftCorner => "BottomLeftCorner",
            Self::BottomRightCorner => "BottomRightCorner",
            Self::Border => "Border",
            Self::Object => "Object",
            Self::CloseButton => "CloseButton",
            Self::HelpButton => "HelpButton",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_values_round_trip() {
        for code in HitTestCode::ALL {
            assert_eq!(HitTestCode::from_raw(code.to_raw()), Some(code));
        }
        assert_eq!(HitTestCode::from_raw(-1), None);
        assert_eq!(HitTestCode::from_raw(22), None);
    }

    #[test]
    fn test_resize_range() {
        let resize: Vec<_> = HitTestCode::ALL
            .into_iter()
            .filter(|code| code.is_resize())
            .collect();

        assert_eq!(
            resize,
            vec![
                HitTestCode::LeftBorder,
                HitTestCode::RightBorder,
                HitTestCode::TopBorder,
                HitTestCode::TopLeftCorner,
                HitTestCode::TopRightCorner,
                HitTestCode::BottomBorder,
                HitTestCode::BottomLeftCorner,
                HitTestCode::BottomRightCorner,
            ]
        );
        assert!(!HitTestCode::Caption.is_resize());
        assert!(!HitTestCode::Border.is_resize());
    }

    #[test]
    fn test_caption_buttons() {
        assert!(HitTestCode::CloseButton.is_caption_button());
        assert!(HitTestCode::MaximizeButton.is_caption_button());
        assert!(!HitTestCode::SystemMenu.is_caption_button());
        assert!(!HitTestCode::Caption.is_caption_button());
    }

    #[test]
    fn test_display() {
        assert_eq!(HitTestCode::TopLeftCorner.to_string(), "TopLeftCorner");
        assert_eq!(HitTestCode::Client.to_string(), "Client");
    }
}
