//! Pointer input vocabulary.

use crate::hit_test_code::HitTestCode;

/// Mouse buttons the chrome reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Middle button (wheel click).
    Middle,
}

/// Which message channel a pointer event arrived on.
///
/// Over custom chrome the window manager reports most pointer activity as
/// non-client messages, tagged with the hit-test code it resolved for the
/// point. Consumers that only observe client messages never see them unless
/// they are mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerOrigin {
    /// A client-area message.
    #[default]
    Client,
    /// A non-client message with the code the window manager attached.
    NonClient(HitTestCode),
}

impl PointerOrigin {
    /// Check if the event came from the non-client channel.
    #[inline]
    pub fn is_non_client(self) -> bool {
        matches!(self, Self::NonClient(_))
    }

    /// The hit-test code attached to the message.
    ///
    /// Client messages are always [`HitTestCode::Client`].
    #[inline]
    pub fn hit_test_code(self) -> HitTestCode {
        match self {
            Self::Client => HitTestCode::Client,
            Self::NonClient(code) => code,
        }
    }
}
