//! Chrome configuration.
//!
//! [`ChromeConfig`] collects every tunable of the chrome: metrics, the top
//! resize band, client-side resize borders, layout direction, which regions
//! mirror non-client moves, and optional bindings. It can be built in code
//! with the `with_*` methods or loaded from TOML:
//!
//! ```toml
//! caption_height = 47
//! button_width = 44
//! top_resize_band = 8
//! layout_direction = "rtl"
//! top_resize_precedence = "region"
//! synthesize_client_moves = ["maximize"]
//! system_menu_double_click_closes = true
//! ```
//!
//! Missing keys take their default values.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use horizon_chrome_core::RegionId;
use horizon_chrome_core::logging::targets;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bindings::{BindingTable, Gesture};
use super::hit_test::{
    DEFAULT_RESIZE_BORDER, DEFAULT_RESIZE_CORNER, DEFAULT_TOP_RESIZE_BAND, HitTestClassifier,
    ResizeBorders, TopBandPrecedence,
};
use super::layout::{
    ChromeMetrics, DEFAULT_BUTTON_WIDTH, DEFAULT_CAPTION_HEIGHT, LayoutDirection, LayoutEngine,
};

/// File name of the configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "chrome.toml";

/// Errors that can occur while loading or saving a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML could not be parsed.
    #[error("invalid chrome configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize chrome configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is out of range.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration for the window chrome.
///
/// # Defaults
///
/// - Caption height: 47 logical pixels
/// - Button width: 44 logical pixels
/// - Top resize band: 8 logical pixels, regions take precedence
/// - Resize border: 8 logical pixels, corners 16
/// - Left-to-right, no content canvas
/// - Maximize mirrors non-client moves
/// - Double-clicking the icon closes the window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// Caption band height in logical pixels.
    pub caption_height: i32,
    /// Caption button width in logical pixels.
    pub button_width: i32,
    /// Height of the top resize band in logical pixels.
    pub top_resize_band: i32,
    /// Client-side resize border thickness in logical pixels.
    pub resize_border: i32,
    /// Client-side resize corner size in logical pixels.
    pub resize_corner: i32,
    /// Lay out a content canvas below the caption band.
    pub content_canvas: bool,
    /// Horizontal layout direction.
    pub layout_direction: LayoutDirection,
    /// What wins where a region covers the top resize band.
    pub top_resize_precedence: TopBandPrecedence,
    /// Regions whose non-client moves are mirrored as client moves.
    pub synthesize_client_moves: Vec<RegionId>,
    /// Double-clicking the system menu icon closes the window.
    pub system_menu_double_click_closes: bool,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            caption_height: DEFAULT_CAPTION_HEIGHT,
            button_width: DEFAULT_BUTTON_WIDTH,
            top_resize_band: DEFAULT_TOP_RESIZE_BAND,
            resize_border: DEFAULT_RESIZE_BORDER,
            resize_corner: DEFAULT_RESIZE_CORNER,
            content_canvas: false,
            layout_direction: LayoutDirection::LeftToRight,
            top_resize_precedence: TopBandPrecedence::Region,
            synthesize_client_moves: vec![RegionId::Maximize],
            system_menu_double_click_closes: true,
        }
    }
}

impl ChromeConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the caption band height.
    pub fn with_caption_height(mut self, logical: i32) -> Self {
        self.caption_height = logical;
        self
    }

    /// Set the caption button width.
    pub fn with_button_width(mut self, logical: i32) -> Self {
        self.button_width = logical;
        self
    }

    /// Set the top resize band height. Zero disables it.
    pub fn with_top_resize_band(mut self, logical: i32) -> Self {
        self.top_resize_band = logical;
        self
    }

    /// Set the client-side resize border thickness.
    pub fn with_resize_border(mut self, logical: i32) -> Self {
        self.resize_border = logical;
        self
    }

    /// Set the client-side resize corner size.
    pub fn with_resize_corner(mut self, logical: i32) -> Self {
        self.resize_corner = logical;
        self
    }

    /// Enable or disable the content canvas region.
    pub fn with_content_canvas(mut self, enabled: bool) -> Self {
        self.content_canvas = enabled;
        self
    }

    /// Set the layout direction.
    pub fn with_layout_direction(mut self, direction: LayoutDirection) -> Self {
        self.layout_direction = direction;
        self
    }

    /// Set the top band precedence.
    pub fn with_top_resize_precedence(mut self, precedence: TopBandPrecedence) -> Self {
        self.top_resize_precedence = precedence;
        self
    }

    /// Set the regions that mirror non-client moves.
    pub fn with_synthesize_client_moves(mut self, regions: impl IntoIterator<Item = RegionId>) -> Self {
        self.synthesize_client_moves = regions.into_iter().collect();
        self
    }

    /// Enable or disable close-on-double-click for the system menu icon.
    pub fn with_system_menu_double_click_closes(mut self, enabled: bool) -> Self {
        self.system_menu_double_click_closes = enabled;
        self
    }

    // =========================================================================
    // Derived Components
    // =========================================================================

    /// The layout engine for this configuration.
    pub fn layout_engine(&self) -> LayoutEngine {
        LayoutEngine::new()
            .with_metrics(ChromeMetrics {
                caption_height: self.caption_height,
                button_width: self.button_width,
            })
            .with_direction(self.layout_direction)
            .with_content_canvas(self.content_canvas)
    }

    /// The hit-test classifier for this configuration.
    pub fn classifier(&self) -> HitTestClassifier {
        HitTestClassifier::new()
            .with_top_band(self.top_resize_band)
            .with_precedence(self.top_resize_precedence)
    }

    /// Client-side resize borders for this configuration.
    pub fn resize_borders(&self) -> ResizeBorders {
        ResizeBorders::new()
            .with_border(self.resize_border)
            .with_corner(self.resize_corner)
    }

    /// The binding table for this configuration.
    pub fn binding_table(&self) -> BindingTable {
        let mut table = BindingTable::standard();
        if !self.system_menu_double_click_closes {
            table.unbind(
                RegionId::SystemMenu,
                Gesture::DoubleClick,
                horizon_chrome_core::MouseButton::Left,
            );
        }
        table
    }

    // =========================================================================
    // Validation and Persistence
    // =========================================================================

    /// Check that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        fn positive(field: &'static str, value: i32) -> ConfigResult<()> {
            if value <= 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive, got {value}"),
                });
            }
            Ok(())
        }
        fn non_negative(field: &'static str, value: i32) -> ConfigResult<()> {
            if value < 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must not be negative, got {value}"),
                });
            }
            Ok(())
        }

        positive("caption_height", self.caption_height)?;
        positive("button_width", self.button_width)?;
        non_negative("top_resize_band", self.top_resize_band)?;
        non_negative("resize_border", self.resize_border)?;
        non_negative("resize_corner", self.resize_corner)?;

        if self.top_resize_band > self.caption_height {
            return Err(ConfigError::Invalid {
                field: "top_resize_band",
                reason: format!(
                    "must not exceed caption_height ({} > {})",
                    self.top_resize_band, self.caption_height
                ),
            });
        }
        Ok(())
    }

    /// Parse and validate a configuration from TOML.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded chrome configuration");
        Ok(config)
    }

    /// Write the configuration to a file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        std::fs::write(path, self.to_toml_string()?).map_err(io_error)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "saved chrome configuration");
        Ok(())
    }

    /// The default configuration file location for this platform.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "Horizon Analytic Studios", "Horizon Chrome")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load the configuration from [`default_path`](Self::default_path),
    /// falling back to defaults if it is missing or invalid.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(
                    target: targets::CONFIG,
                    path = %path.display(),
                    %error,
                    "ignoring chrome configuration"
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChromeConfig::default();
        assert_eq!(config.caption_height, 47);
        assert_eq!(config.button_width, 44);
        assert_eq!(config.top_resize_band, 8);
        assert_eq!(config.synthesize_client_moves, vec![RegionId::Maximize]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = ChromeConfig::from_toml_str(
            r#"
            caption_height = 32
            layout_direction = "rtl"
            top_resize_precedence = "band"
            synthesize_client_moves = ["maximize", "close"]
            "#,
        )
        .unwrap();

        assert_eq!(config.caption_height, 32);
        assert_eq!(config.button_width, 44);
        assert_eq!(config.layout_direction, LayoutDirection::RightToLeft);
        assert_eq!(config.top_resize_precedence, TopBandPrecedence::Band);
        assert_eq!(
            config.synthesize_client_moves,
            vec![RegionId::Maximize, RegionId::Close]
        );
    }

    #[test]
    fn test_round_trip() {
        let config = ChromeConfig::new()
            .with_content_canvas(true)
            .with_layout_direction(LayoutDirection::RightToLeft)
            .with_system_menu_double_click_closes(false);
        let toml = config.to_toml_string().unwrap();
        assert_eq!(ChromeConfig::from_toml_str(&toml).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        let error = ChromeConfig::new().with_caption_height(0).validate().unwrap_err();
        assert!(matches!(error, ConfigError::Invalid { field: "caption_height", .. }));

        let error = ChromeConfig::new().with_resize_border(-1).validate().unwrap_err();
        assert!(matches!(error, ConfigError::Invalid { field: "resize_border", .. }));

        let error = ChromeConfig::new()
            .with_caption_height(20)
            .with_top_resize_band(30)
            .validate()
            .unwrap_err();
        assert!(matches!(error, ConfigError::Invalid { field: "top_resize_band", .. }));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            ChromeConfig::from_toml_str("caption_height = \"tall\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ChromeConfig::from_toml_str("layout_direction = \"diagonal\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_binding_table_follows_double_click_flag() {
        let with = ChromeConfig::new().binding_table();
        let without = ChromeConfig::new()
            .with_system_menu_double_click_closes(false)
            .binding_table();
        assert_eq!(with.len(), without.len() + 1);
    }

    #[test]
    fn test_derived_components() {
        let config = ChromeConfig::new()
            .with_caption_height(32)
            .with_top_resize_band(6)
            .with_resize_border(4);
        assert_eq!(config.layout_engine().metrics().caption_height, 32);
        assert_eq!(config.classifier().top_band(), 6);
        assert_eq!(config.resize_borders().border(), 4);
    }
}
