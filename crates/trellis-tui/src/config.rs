//! TOML-backed toolkit settings.
//!
//! ```toml
//! tick_interval_ms = 100
//!
//! [input]
//! max_length = 500
//! paste_placeholder = true
//! mask_char = "*"
//! newline_glyph = "↵"
//!
//! [text_view]
//! line_numbers = true
//! scroll_step = 3
//! multi_click_ms = 400
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input::InputOptions;
use crate::text::display_width;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Interval for the background frame ticker.
    pub tick_interval_ms: u64,
    pub input: InputConfig,
    pub text_view: TextViewConfig,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            input: InputConfig::default(),
            text_view: TextViewConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Maximum logical length in code points. Absent means unlimited.
    pub max_length: Option<usize>,
    pub paste_placeholder: bool,
    pub mask_char: char,
    /// Shown in place of a newline in single-line inputs.
    pub newline_glyph: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        let options = InputOptions::default();
        Self {
            max_length: options.max_length,
            paste_placeholder: options.paste_placeholder,
            mask_char: '*',
            newline_glyph: options.newline_glyph,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextViewConfig {
    pub line_numbers: bool,
    /// Lines scrolled per wheel notch.
    pub scroll_step: u16,
    /// Window for double and triple clicks.
    pub multi_click_ms: u64,
}

impl Default for TextViewConfig {
    fn default() -> Self {
        Self {
            line_numbers: false,
            scroll_step: 3,
            multi_click_ms: 400,
        }
    }
}

impl TextViewConfig {
    pub fn multi_click_window(&self) -> Duration {
        Duration::from_millis(self.multi_click_ms)
    }
}

impl TuiConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "loaded tui config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval_ms must be greater than zero".into(),
            ));
        }
        if self.input.newline_glyph.is_empty() || self.input.newline_glyph.contains('\n') {
            return Err(ConfigError::Invalid(
                "input.newline_glyph must be visible text without newlines".into(),
            ));
        }
        if display_width(&self.input.mask_char.to_string()) == 0 {
            return Err(ConfigError::Invalid(format!(
                "input.mask_char {:?} has no display width",
                self.input.mask_char
            )));
        }
        if self.text_view.scroll_step == 0 {
            return Err(ConfigError::Invalid(
                "text_view.scroll_step must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Editing options for a text input built from this config.
    pub fn input_options(&self, multiline: bool) -> InputOptions {
        InputOptions {
            max_length: self.input.max_length,
            paste_placeholder: self.input.paste_placeholder,
            multiline,
            newline_glyph: self.input.newline_glyph.clone(),
        }
    }
}
