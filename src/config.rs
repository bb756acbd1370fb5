//! Rendering preferences and per-call display options.
//!
//! [`Prefs`] holds the session-wide style and truncation settings. It is an
//! explicit, immutable value threaded through every render call; callers
//! build one (or load one from TOML via [`AppConfig`]) and hand it to the
//! visualizer instead of mutating ambient state.
//!
//! [`Options`] carries the per-call display switches: index labels,
//! association-pair rendering, orientation, minimal tree display, child
//! field names and tensor shape metadata.

use crate::error::VizError;
use serde::Deserialize;
use std::{
    fmt::{self, Display},
    fs,
    path::{Path, PathBuf},
};

/// Style and truncation preferences for one render session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Prefs {
    /// Default pen width for node outlines.
    pub penwidth: f64,

    /// Primary outline and text color.
    pub color_black: String,
    /// Fill color for record and list nodes.
    pub color_yellow: String,
    /// Fill color for horizontal table cells.
    pub color_blue: String,
    /// Fill color for vertical container nodes and cluster pens.
    pub color_green: String,

    /// How many characters before a rendered text is abbreviated with `...`.
    pub max_str_len: usize,
    /// Total rendered width above which a sequence goes vertical.
    pub max_horiz_array_len: usize,
    /// How many elements max to display in a list before truncation.
    pub max_list_elems: usize,

    /// Marker prefix for public class members in `classviz`.
    pub class_public_prefix: String,
    /// Marker prefix for static class members in `classviz`.
    pub class_static_prefix: String,
    /// Suffix appended to class names in `classviz` (e.g. `"Class"`).
    pub class_name_suffix: String,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            penwidth: 0.5,
            color_black: "#444443".to_string(),
            color_yellow: "#fefecd".to_string(),
            color_blue: "#d9e6f5".to_string(),
            color_green: "#cfe2d4".to_string(),
            max_str_len: 20,
            max_horiz_array_len: 40,
            max_list_elems: 10,
            class_public_prefix: "+".to_string(),
            class_static_prefix: "#".to_string(),
            class_name_suffix: String::new(),
        }
    }
}

/// Diagram orientation, passed through as the Graphviz `rankdir` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
pub enum Orientation {
    /// Left to right.
    #[default]
    Lr,
    /// Top to bottom.
    Tb,
}

impl Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Lr => write!(f, "LR"),
            Orientation::Tb => write!(f, "TB"),
        }
    }
}

/// Per-call display options.
#[derive(Debug, Clone)]
pub struct Options {
    /// Show index labels on sequence cells. `None` resolves per mode:
    /// indexes are shown unless tensor shape metadata is present.
    pub show_indexes: Option<bool>,
    /// Render 2-element sets inline as `a→b` association pairs.
    pub show_assoc: bool,
    /// Diagram orientation. `None` resolves to the mode's default
    /// (left-to-right for object graphs, top-to-bottom for trees).
    pub orientation: Option<Orientation>,
    /// Lean tree display: hide titles and field labels, and suppress the
    /// child-pointer row on leaves.
    pub minimal: bool,
    /// Field name of the left subtree in tree mode.
    pub left_field: String,
    /// Field name of the right subtree in tree mode.
    pub right_field: String,
    /// Tensor shape: ordered dimension sizes for a flat sequence.
    pub shape: Vec<usize>,
    /// Overrides the node title (tree mode); defaults to the record's type.
    pub title: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            show_indexes: None,
            show_assoc: true,
            orientation: None,
            minimal: false,
            left_field: "left".to_string(),
            right_field: "right".to_string(),
            shape: Vec::new(),
            title: None,
        }
    }
}

impl Options {
    /// Resolves the index-label switch: explicit setting wins, otherwise
    /// indexes are hidden exactly when shape metadata is present.
    pub fn resolved_show_indexes(&self) -> bool {
        self.show_indexes.unwrap_or(self.shape.is_empty())
    }
}

/// Application configuration loaded from a TOML file (CLI use).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Preference overrides section.
    #[serde(default)]
    pub prefs: Prefs,

    #[serde(skip)]
    config_file_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VizError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(VizError::ConfigMissing(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.config_file_path = Some(path.to_path_buf());

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prefs_match_documented_thresholds() {
        let prefs = Prefs::default();
        assert_eq!(prefs.max_str_len, 20);
        assert_eq!(prefs.max_horiz_array_len, 40);
        assert_eq!(prefs.max_list_elems, 10);
        assert_eq!(prefs.color_black, "#444443");
    }

    #[test]
    fn prefs_deserialize_with_partial_overrides() {
        let prefs: Prefs = toml::from_str("max_str_len = 8\ncolor_blue = \"#abcdef\"")
            .expect("partial prefs should deserialize");
        assert_eq!(prefs.max_str_len, 8, "overridden field should apply");
        assert_eq!(prefs.color_blue, "#abcdef");
        assert_eq!(prefs.max_list_elems, 10, "unset fields keep defaults");
    }

    #[test]
    fn show_indexes_defaults_off_with_shape() {
        let mut opts = Options::default();
        assert!(opts.resolved_show_indexes());

        opts.shape = vec![2, 2];
        assert!(!opts.resolved_show_indexes());

        opts.show_indexes = Some(true);
        assert!(opts.resolved_show_indexes(), "explicit setting wins");
    }

    #[test]
    fn orientation_renders_as_rankdir_value() {
        assert_eq!(Orientation::Lr.to_string(), "LR");
        assert_eq!(Orientation::Tb.to_string(), "TB");
    }
}
