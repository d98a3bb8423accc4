//! Plot configuration shared across visualization modules

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// Used by both the streamline map and the velocity profile plots.
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Plot title
/// - `xlabel`, `ylabel`: Axis labels
/// - `line_color`: Color of single-series plots
/// - `line_colors`: Optional palette cycled over streamlines
/// - `obstacle_color`: Fill color of solid cells
/// - `background`: Background color
/// - `line_width`: Line thickness in pixels
/// - `show_grid`: Whether to show grid lines
///
/// # Example
///
/// ```rust
/// use lattice_flow::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::streamlines("Cylinder wake");
/// config.width = 1920;
/// config.line_colors = Some(vec![BLUE, RGBColor(0, 128, 255)]);
/// assert_eq!(config.xlabel, "x (cells)");
/// ```
#[derive(Clone, Debug)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: auto-set by plot type)
    pub xlabel: String,

    /// Y-axis label (default: auto-set by plot type)
    pub ylabel: String,

    /// Line color for single-series plots (default: BLUE)
    pub line_color: RGBColor,

    /// Optional palette cycled over streamlines
    ///
    /// If None, every streamline uses `line_color`.
    pub line_colors: Option<Vec<RGBColor>>,

    /// Fill color of obstacle cells (default: dark grey)
    pub obstacle_color: RGBColor,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 1)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(),
            ylabel: String::new(),
            line_color: BLUE,
            line_colors: None,
            obstacle_color: RGBColor(64, 64, 64),
            background: WHITE,
            line_width: 1,
            show_grid: true,
        }
    }
}

/// Helper trait to accept `&str`, `String` or `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Config for streamline maps
    ///
    /// Axes in cells, title defaults to "Streamlines".
    pub fn streamlines(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "x (cells)".to_string(),
            ylabel: "y (cells)".to_string(),
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Streamlines".to_string()),
            ..Self::default()
        }
    }

    /// Config for velocity profiles across one column
    ///
    /// ux on the x axis, height on the y axis, title defaults to
    /// "Velocity Profile".
    pub fn velocity_profile(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "ux (lattice units)".to_string(),
            ylabel: "y (cells)".to_string(),
            line_width: 2,
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Velocity Profile".to_string()),
            ..Self::default()
        }
    }

    /// Color for streamline `index`
    pub(crate) fn line_color_for(&self, index: usize) -> RGBColor {
        match &self.line_colors {
            Some(colors) if !colors.is_empty() => colors[index % colors.len()],
            _ => self.line_color,
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
