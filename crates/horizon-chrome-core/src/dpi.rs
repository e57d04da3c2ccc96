//! DPI scaling.
//!
//! Chrome metrics are authored in device-independent pixels at 96 DPI and
//! converted to device pixels with the window's current DPI. Conversion
//! rounds to the nearest pixel, half away from zero, the same rounding the
//! window manager applies to its own metrics.

use crate::error::{ChromeError, Result};

/// The DPI at which one logical pixel equals one device pixel.
pub const BASE_DPI: u32 = 96;

/// Scale from logical (96 DPI) pixels to device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DpiScale {
    dpi: u32,
}

impl Default for DpiScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl DpiScale {
    /// Scale at 96 DPI (factor 1.0).
    pub const IDENTITY: Self = Self { dpi: BASE_DPI };

    /// Create a scale for the given DPI.
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::InvalidDpi`] for a DPI of zero.
    pub fn new(dpi: u32) -> Result<Self> {
        if dpi == 0 {
            return Err(ChromeError::InvalidDpi(dpi));
        }
        Ok(Self { dpi })
    }

    /// Create a scale from a floating point scale factor (1.0 = 96 DPI).
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::InvalidDpi`] if the factor rounds to zero DPI
    /// or is not finite.
    pub fn from_factor(factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ChromeError::InvalidDpi(0));
        }
        Self::new((factor * f64::from(BASE_DPI)).round() as u32)
    }

    /// The DPI value.
    #[inline]
    pub fn dpi(self) -> u32 {
        self.dpi
    }

    /// The scale factor (DPI / 96).
    #[inline]
    pub fn factor(self) -> f32 {
        self.dpi as f32 / BASE_DPI as f32
    }

    /// Convert a logical length to device pixels.
    pub fn scale(self, logical: i32) -> i32 {
        let product = i64::from(logical) * i64::from(self.dpi);
        let half = i64::from(BASE_DPI / 2);
        let rounded = if product >= 0 {
            (product + half) / i64::from(BASE_DPI)
        } else {
            (product - half) / i64::from(BASE_DPI)
        };
        rounded as i32
    }

    /// Convert a logical length to device pixels as `f32`.
    #[inline]
    pub fn scale_f32(self, logical: i32) -> f32 {
        self.scale(logical) as f32
    }
}
