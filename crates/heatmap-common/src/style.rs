//! Visual style for the heatmap layer.

use serde::{Deserialize, Serialize};

use crate::error::{HeatmapError, HeatmapResult};

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse "#RRGGBB" or "#RRGGBBAA" (hash optional, case-insensitive).
    pub fn from_hex(s: &str) -> HeatmapResult<Self> {
        let hex = s.trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(HeatmapError::InvalidColor(s.to_string()));
        }
        let channel = |range: &str| {
            u8::from_str_radix(range, 16)
                .map_err(|_| HeatmapError::InvalidColor(s.to_string()))
        };

        match hex.len() {
            6 => Ok(Self {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
                a: 255,
            }),
            8 => Ok(Self {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
                a: channel(&hex[6..8])?,
            }),
            _ => Err(HeatmapError::InvalidColor(s.to_string())),
        }
    }

    /// Lowercase "#rrggbb" form, as map widgets expect gradient stops.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fixed rendering parameters for the heatmap layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapStyle {
    /// Blur radius in pixels
    pub blur: u32,

    /// Point radius in pixels
    pub radius: u32,

    /// Layer opacity in [0, 1]
    pub opacity: f64,

    /// Gradient stops, low to high intensity
    pub gradient: Vec<Color>,
}

impl HeatmapStyle {
    pub fn validate(&self) -> HeatmapResult<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(HeatmapError::InvalidStyle(format!(
                "opacity {} outside [0, 1]",
                self.opacity
            )));
        }
        if self.gradient.len() < 2 {
            return Err(HeatmapError::InvalidStyle(
                "gradient needs at least 2 stops".to_string(),
            ));
        }
        Ok(())
    }

    /// Gradient stops as hex strings for the map widget.
    pub fn gradient_hex(&self) -> Vec<String> {
        self.gradient.iter().map(Color::to_hex).collect()
    }
}

impl Default for HeatmapStyle {
    /// The pollution palette: warm coral through lavender, six stops.
    fn default() -> Self {
        let stops = ["#FF9580", "#ff949b", "#fc97b6", "#ef9ecd", "#dca7df", "#c6b0eb"];
        Self {
            blur: 60,
            radius: 15,
            opacity: 0.7,
            gradient: stops
                .iter()
                .map(|s| Color::from_hex(s).expect("built-in gradient stop"))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        let c = Color::from_hex("#FF9580").unwrap();
        assert_eq!((c.r, c.g, c.b, c.a), (255, 149, 128, 255));

        let with_alpha = Color::from_hex("c6b0eb80").unwrap();
        assert_eq!(with_alpha.a, 128);

        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_hex_roundtrip() {
        let c = Color::from_hex("#dca7df").unwrap();
        assert_eq!(c.to_hex(), "#dca7df");
    }

    #[test]
    fn test_default_style() {
        let style = HeatmapStyle::default();
        style.validate().unwrap();
        assert_eq!(style.blur, 60);
        assert_eq!(style.radius, 15);
        assert_eq!(style.opacity, 0.7);
        assert_eq!(
            style.gradient_hex(),
            vec!["#ff9580", "#ff949b", "#fc97b6", "#ef9ecd", "#dca7df", "#c6b0eb"]
        );
    }

    #[test]
    fn test_validate_rejects_bad_opacity() {
        let style = HeatmapStyle {
            opacity: 1.5,
            ..HeatmapStyle::default()
        };
        assert!(style.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_short_gradient() {
        let style = HeatmapStyle {
            gradient: vec![Color::rgb(0, 0, 0)],
            ..HeatmapStyle::default()
        };
        assert!(style.validate().is_err());
    }
}
