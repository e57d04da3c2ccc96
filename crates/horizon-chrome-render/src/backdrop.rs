//! Backdrop material selection.
//!
//! The window background behind the chrome is a system material when the
//! compositor supports one. Selection is a one-shot probe: Mica first, then
//! Acrylic, then a solid color. Nothing is cached.

use horizon_chrome_core::logging::targets;

use crate::error::{RenderError, RenderResult};
use crate::types::Color;

/// A backdrop material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackdropKind {
    /// Wallpaper-tinted opaque material.
    Mica,
    /// Blurred translucent material.
    Acrylic,
    /// Plain fill.
    Solid(Color),
}

impl BackdropKind {
    /// Fill used when no system material is available.
    pub const FALLBACK: Self = Self::Solid(Color::WHITE);

    /// Materials tried in order of preference.
    pub const PREFERENCE: [Self; 2] = [Self::Mica, Self::Acrylic];
}

/// Something that can tell whether a backdrop material can be created.
pub trait BackdropProbe {
    /// Try to create the material. `Err(RenderError::BackdropUnavailable)`
    /// means "try the next one"; any other error is reported.
    fn probe(&mut self, kind: BackdropKind) -> RenderResult<()>;
}

impl<F> BackdropProbe for F
where
    F: FnMut(BackdropKind) -> RenderResult<()>,
{
    fn probe(&mut self, kind: BackdropKind) -> RenderResult<()> {
        self(kind)
    }
}

/// Pick the first material the probe accepts, or [`BackdropKind::FALLBACK`].
pub fn select_backdrop(probe: impl BackdropProbe) -> BackdropKind {
    select_backdrop_or(probe, BackdropKind::FALLBACK)
}

/// Pick the first material the probe accepts, or `fallback`.
pub fn select_backdrop_or(mut probe: impl BackdropProbe, fallback: BackdropKind) -> BackdropKind {
    for kind in BackdropKind::PREFERENCE {
        match probe.probe(kind) {
            Ok(()) => {
                tracing::debug!(target: targets::RENDER, ?kind, "backdrop selected");
                return kind;
            }
            Err(RenderError::BackdropUnavailable(_)) => {
                tracing::trace!(target: targets::RENDER, ?kind, "backdrop unavailable");
            }
            Err(error) => {
                tracing::warn!(target: targets::RENDER, ?kind, %error, "backdrop probe failed");
            }
        }
    }
    tracing::debug!(target: targets::RENDER, ?fallback, "using fallback backdrop");
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_mica() {
        let kind = select_backdrop(|_: BackdropKind| -> RenderResult<()> { Ok(()) });
        assert_eq!(kind, BackdropKind::Mica);
    }

    #[test]
    fn test_falls_back_to_acrylic() {
        let kind = select_backdrop(|kind: BackdropKind| match kind {
            BackdropKind::Mica => Err(RenderError::BackdropUnavailable(kind)),
            _ => Ok(()),
        });
        assert_eq!(kind, BackdropKind::Acrylic);
    }

    #[test]
    fn test_falls_back_to_solid() {
        let mut probed = Vec::new();
        let kind = select_backdrop(|kind: BackdropKind| {
            probed.push(kind);
            Err(RenderError::BackdropUnavailable(kind))
        });
        assert_eq!(kind, BackdropKind::FALLBACK);
        assert_eq!(probed, vec![BackdropKind::Mica, BackdropKind::Acrylic]);
    }

    #[test]
    fn test_compositor_error_moves_on() {
        let kind = select_backdrop_or(
            |_: BackdropKind| Err(RenderError::Compositor("device lost".into())),
            BackdropKind::Solid(Color::LIGHT_GRAY),
        );
        assert_eq!(kind, BackdropKind::Solid(Color::LIGHT_GRAY));
    }
}
