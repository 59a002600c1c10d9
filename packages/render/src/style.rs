//! Map styling: title, viewport, opacity, and the continuous colour scale.
//!
//! The default style is embedded at compile time from
//! `styles/default.toml`; a custom TOML file with the same shape may be
//! loaded instead.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::RenderError;

const DEFAULT_STYLE_TOML: &str = include_str!("../styles/default.toml");

/// Initial map viewport centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapCenter {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

/// Appearance of the breed markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Marker colour as `#rrggbb`.
    pub color: String,
    /// Marker size in pixels.
    pub size: u32,
}

/// Choropleth appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapStyle {
    /// Map title.
    pub title: String,
    /// Initial viewport centre.
    pub center: MapCenter,
    /// Initial zoom level.
    pub zoom: f64,
    /// Fill opacity of districts with data.
    pub opacity: f64,
    /// District outline colour.
    pub stroke: String,
    /// Fill of districts without matching dogs.
    pub no_data_fill: String,
    /// Fill opacity of districts without matching dogs.
    pub no_data_opacity: f64,
    /// Colour stops (`#rrggbb`) from lowest to highest count.
    pub color_scale: Vec<String>,
    /// Breed marker appearance.
    pub marker: MarkerStyle,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self::default_style()
    }
}

impl MapStyle {
    /// Returns the embedded default style.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML fails to parse. It is a compile-time
    /// constant, so a failure is a development error caught by tests.
    #[must_use]
    pub fn default_style() -> Self {
        Self::from_toml_str(DEFAULT_STYLE_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse embedded default map style: {e}"))
    }

    /// Parses and validates a style from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Style`] if the TOML is malformed, the colour
    /// scale is empty, or a colour is not `#rrggbb`.
    pub fn from_toml_str(text: &str) -> Result<Self, RenderError> {
        let style: Self = toml::de::from_str(text).map_err(|e| RenderError::Style {
            message: e.to_string(),
        })?;

        if style.color_scale.is_empty() {
            return Err(RenderError::Style {
                message: "color_scale must have at least one colour".to_string(),
            });
        }
        let others = [&style.no_data_fill, &style.stroke, &style.marker.color];
        for color in style.color_scale.iter().chain(others) {
            if parse_hex(color).is_none() {
                return Err(RenderError::Style {
                    message: format!("'{color}' is not a #rrggbb colour"),
                });
            }
        }
        let unit = 0.0..=1.0;
        if !unit.contains(&style.opacity) || !unit.contains(&style.no_data_opacity) {
            return Err(RenderError::Style {
                message: "opacities must be between 0 and 1".to_string(),
            });
        }

        Ok(style)
    }

    /// Reads a style file.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Io`] if the file cannot be read, or
    /// [`RenderError::Style`] if it is invalid.
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let text = std::fs::read_to_string(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let style = Self::from_toml_str(&text)?;
        log::debug!("Loaded map style '{}' from {}", style.title, path.display());
        Ok(style)
    }

    /// Fill colour for `count` on a scale spanning `min..=max`.
    ///
    /// When every district has the same count the top of the scale is used.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fill_for(&self, count: u64, min: u64, max: u64) -> String {
        let t = if max > min {
            (count.saturating_sub(min)) as f64 / (max - min) as f64
        } else {
            1.0
        };
        self.interpolate(t.clamp(0.0, 1.0))
    }

    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn interpolate(&self, t: f64) -> String {
        let stops: Vec<(u8, u8, u8)> = self
            .color_scale
            .iter()
            .filter_map(|c| parse_hex(c))
            .collect();

        match stops.as_slice() {
            [] => self.no_data_fill.clone(),
            [only] => to_hex(*only),
            _ => {
                let pos = t * (stops.len() - 1) as f64;
                let i = (pos.floor() as usize).min(stops.len() - 2);
                let frac = pos - i as f64;
                let (a, b) = (stops[i], stops[i + 1]);
                let lerp = |x: u8, y: u8| {
                    f64::from(y)
                        .mul_add(frac, f64::from(x) * (1.0 - frac))
                        .round() as u8
                };
                to_hex((lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2)))
            }
        }
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn to_hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}
