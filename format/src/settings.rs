use serde::{Deserialize, Serialize};

/// Zoom steps offered for the card view.
pub const ZOOM_LEVELS: [f32; 5] = [0.5, 0.75, 1.0, 1.25, 1.5];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    Cyber,
    Classic,
    Clean,
    Dark,
    /// Gradient built from [`ViewSettings::custom_colors`].
    Custom,
}

impl ThemeName {
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Cyber => "Cyber Punk",
            Self::Classic => "Classic Paper",
            Self::Clean => "Clean Light",
            Self::Dark => "Dark Minimal",
            Self::Custom => "Custom Gradient",
        }
    }
}

impl Default for ThemeName {
    fn default() -> Self {
        Self::Cyber
    }
}

/// Start and end color of a custom gradient, as CSS hex strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientColors {
    pub start: String,
    pub end: String,
}

impl GradientColors {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    pub fn presets() -> [(&'static str, Self); 4] {
        [
            ("Sunset", Self::new("#f59e0b", "#ef4444")),
            ("Ocean", Self::new("#06b6d4", "#3b82f6")),
            ("Forest", Self::new("#10b981", "#047857")),
            ("Royal", Self::new("#8b5cf6", "#d946ef")),
        ]
    }
}

impl Default for GradientColors {
    fn default() -> Self {
        Self::new("#8b5cf6", "#d946ef")
    }
}

/// Per-user display preferences, shared by all cards of a deck.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewSettings {
    pub zoom_level: f32,
    pub theme: ThemeName,
    pub custom_colors: GradientColors,
}

impl ViewSettings {
    /// Snaps the zoom to the closest offered step.
    pub fn normalized(mut self) -> Self {
        self.zoom_level = snap_zoom(self.zoom_level);
        self
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            zoom_level: 1.0,
            theme: ThemeName::default(),
            custom_colors: GradientColors::default(),
        }
    }
}

pub fn snap_zoom(zoom: f32) -> f32 {
    if !zoom.is_finite() {
        return 1.0;
    }
    ZOOM_LEVELS
        .into_iter()
        .min_by(|a, b| (a - zoom).abs().total_cmp(&(b - zoom).abs()))
        .unwrap_or(1.0)
}
