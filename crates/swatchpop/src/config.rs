//! Picker configuration.
//!
//! [`PickerOptions`] is an immutable-after-construction value object built
//! with builder methods. Size fields are opaque linear dimensions (`"24px"`,
//! `"1.5em"` — whatever the host surface understands); color entries are
//! opaque tokens written verbatim into swatch styles and field values.

use crate::placement::Position;

/// The palette used when no colors are configured.
pub const DEFAULT_PALETTE: [&str; 20] = [
    "#3F51B5", "#2196F3", "#03A9F4", "#00ACC1", "#009688", "#4CAF50", "#8BC34A",
    "#CDDC39", "#FFEB3B", "#FFC107", "#FF9800", "#FF5722", "#F44336", "#E91E63",
    "#673AB7", "#9C27B0", "#9E9E9E", "#607D8B", "#795548", "#474747",
];

/// Configuration shared by every binding a picker creates.
///
/// # Example
///
/// ```
/// use swatchpop::{PickerOptions, placement::Position};
///
/// let options = PickerOptions::default()
///     .with_icon_size("28px")
///     .with_grid_cols(5)
///     .with_position(Position::Bottom)
///     .with_label("Pick a color");
/// assert_eq!(options.colors().len(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct PickerOptions {
    icon_size: Option<String>,
    swatch_size: Option<String>,
    grid_cols: Option<u32>,
    position: Position,
    label: Option<String>,
    colors: Vec<String>,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            icon_size: None,
            swatch_size: None,
            grid_cols: None,
            position: Position::default(),
            label: None,
            colors: DEFAULT_PALETTE.iter().map(|&c| c.to_string()).collect(),
        }
    }
}

impl PickerOptions {
    /// Create options with the default palette and preferred position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the icon dimension using builder pattern.
    ///
    /// Unset means the host's default icon styling is left untouched.
    pub fn with_icon_size(mut self, size: impl Into<String>) -> Self {
        self.icon_size = Some(size.into());
        self
    }

    /// Set the swatch dimension using builder pattern.
    pub fn with_swatch_size(mut self, size: impl Into<String>) -> Self {
        self.swatch_size = Some(size.into());
        self
    }

    /// Set the swatch grid column count using builder pattern.
    ///
    /// Zero is normalized to unset.
    pub fn with_grid_cols(mut self, cols: u32) -> Self {
        self.grid_cols = (cols > 0).then_some(cols);
        self
    }

    /// Set the preferred popup position using builder pattern.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Set the popup label text using builder pattern.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the color tokens using builder pattern.
    ///
    /// An empty list falls back to [`DEFAULT_PALETTE`]; a popup with no
    /// swatches is never built.
    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        if !colors.is_empty() {
            self.colors = colors;
        } else {
            self.colors = DEFAULT_PALETTE.iter().map(|&c| c.to_string()).collect();
        }
        self
    }

    /// The icon dimension, if one is configured.
    pub fn icon_size(&self) -> Option<&str> {
        self.icon_size.as_deref()
    }

    /// The swatch dimension, if one is configured.
    pub fn swatch_size(&self) -> Option<&str> {
        self.swatch_size.as_deref()
    }

    /// The swatch grid column count, if one is configured.
    pub fn grid_cols(&self) -> Option<u32> {
        self.grid_cols
    }

    /// The preferred popup position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The popup label text, if one is configured.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The configured color tokens. Never empty.
    pub fn colors(&self) -> &[String] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let options = PickerOptions::default();
        assert_eq!(options.colors().len(), 20);
        assert_eq!(options.colors()[0], "#3F51B5");
        assert_eq!(options.colors()[19], "#474747");
        assert_eq!(options.position(), Position::Top);
        assert_eq!(options.icon_size(), None);
    }

    #[test]
    fn test_builder() {
        let options = PickerOptions::new()
            .with_icon_size("28px")
            .with_swatch_size("20px")
            .with_grid_cols(5)
            .with_position(Position::BottomRight)
            .with_label("Accent")
            .with_colors(["#FFF", "#000"]);

        assert_eq!(options.icon_size(), Some("28px"));
        assert_eq!(options.swatch_size(), Some("20px"));
        assert_eq!(options.grid_cols(), Some(5));
        assert_eq!(options.position(), Position::BottomRight);
        assert_eq!(options.label(), Some("Accent"));
        assert_eq!(options.colors(), &["#FFF", "#000"]);
    }

    #[test]
    fn test_empty_colors_fall_back_to_palette() {
        let options = PickerOptions::new().with_colors(Vec::<String>::new());
        assert_eq!(options.colors().len(), 20);
    }

    #[test]
    fn test_zero_grid_cols_is_unset() {
        let options = PickerOptions::new().with_grid_cols(0);
        assert_eq!(options.grid_cols(), None);
    }
}
