//! Sharpe dashboard configuration and plot style.

use std::collections::BTreeMap;

use playbook_core::sharpe::{reference_assets, REFERENCE_RISK_FREE_RATE};
use playbook_core::types::{AssetClass, HexColor};
use serde::{Deserialize, Serialize};

use crate::error::{Validate, ValidationError};

/// Top-level keys a Sharpe configuration must carry.
pub const SHARPE_REQUIRED_KEYS: [&str; 3] = ["risk_free_rate", "plot_style", "asset_classes"];

/// Colors assigned, in order, to assets that do not name one.
pub const DEFAULT_PALETTE: [HexColor; 8] = [
    HexColor::new(0x1F, 0x77, 0xB4),
    HexColor::new(0xFF, 0x7F, 0x0E),
    HexColor::new(0x2C, 0xA0, 0x2C),
    HexColor::new(0xD6, 0x27, 0x28),
    HexColor::new(0x94, 0x67, 0xBD),
    HexColor::new(0x8C, 0x56, 0x4B),
    HexColor::new(0xE3, 0x77, 0xC2),
    HexColor::new(0x7F, 0x7F, 0x7F),
];

/// Figure and typography settings shared by the chart renderers.
///
/// Every field falls back to the reference style when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    /// Named style; `whitegrid` draws a light mesh on white.
    pub style: String,
    /// Figure width and height in inches.
    pub figure_size: [f64; 2],
    /// Base font size in points.
    pub font_size: f64,
    /// Chart title font size.
    pub title_font_size: f64,
    /// Axis label font size.
    pub label_font_size: f64,
    /// Annotation font size.
    pub annotation_font_size: f64,
    /// Grid line opacity.
    pub grid_alpha: f64,
    /// Scatter marker area.
    pub scatter_size: f64,
    /// Scatter marker opacity.
    pub scatter_alpha: f64,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            style: "whitegrid".to_string(),
            figure_size: [12.0, 12.0],
            font_size: 12.0,
            title_font_size: 16.0,
            label_font_size: 14.0,
            annotation_font_size: 12.0,
            grid_alpha: 0.3,
            scatter_size: 100.0,
            scatter_alpha: 0.7,
        }
    }
}

impl PlotStyle {
    /// Pixel size of the figure at 100 dpi.
    pub fn pixel_size(&self) -> (u32, u32) {
        let px = |inches: f64| (inches * 100.0).round().max(1.0) as u32;
        (px(self.figure_size[0]), px(self.figure_size[1]))
    }

    /// Scatter marker radius in pixels, derived from the marker area.
    pub fn marker_radius(&self) -> u32 {
        (self.scatter_size.max(0.0).sqrt() / 2.0).round().max(1.0) as u32
    }
}

impl Validate for PlotStyle {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (i, dim) in self.figure_size.iter().enumerate() {
            if !dim.is_finite() || *dim <= 0.0 {
                errors.push(ValidationError::with_rule(
                    format!("plot_style.figure_size[{i}]"),
                    "must be positive",
                    "positive",
                ));
            }
        }

        let sizes = [
            ("font_size", self.font_size),
            ("title_font_size", self.title_font_size),
            ("label_font_size", self.label_font_size),
            ("annotation_font_size", self.annotation_font_size),
            ("scatter_size", self.scatter_size),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                errors.push(ValidationError::with_rule(
                    format!("plot_style.{name}"),
                    "must be positive",
                    "positive",
                ));
            }
        }

        for (name, value) in [("grid_alpha", self.grid_alpha), ("scatter_alpha", self.scatter_alpha)] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(ValidationError::with_rule(
                    format!("plot_style.{name}"),
                    "must be between 0 and 1",
                    "unit_interval",
                ));
            }
        }

        errors
    }
}

/// One asset class entry of the Sharpe configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Display color; a palette color is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<HexColor>,
    /// Annual return.
    #[serde(rename = "return")]
    pub expected_return: f64,
    /// Annual volatility.
    pub volatility: f64,
}

/// Risk-free rate, plot style and asset classes for the Sharpe dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharpeConfig {
    /// Annual risk-free rate.
    pub risk_free_rate: f64,
    /// Plot style.
    pub plot_style: PlotStyle,
    /// Asset classes keyed by display name.
    pub asset_classes: BTreeMap<String, AssetEntry>,
}

impl SharpeConfig {
    /// The built-in five-asset comparison at a 2.5% risk-free rate.
    pub fn reference() -> Self {
        let asset_classes = reference_assets()
            .into_iter()
            .map(|asset| {
                (
                    asset.name,
                    AssetEntry {
                        color: asset.color,
                        expected_return: asset.expected_return,
                        volatility: asset.volatility,
                    },
                )
            })
            .collect();

        Self {
            risk_free_rate: REFERENCE_RISK_FREE_RATE,
            plot_style: PlotStyle::default(),
            asset_classes,
        }
    }

    /// Asset classes in name order, with palette colors filled in.
    pub fn assets(&self) -> Vec<AssetClass> {
        let mut palette = DEFAULT_PALETTE.iter().cycle();
        self.asset_classes
            .iter()
            .map(|(name, entry)| {
                let color = entry
                    .color
                    .or_else(|| palette.next().copied())
                    .unwrap_or(DEFAULT_PALETTE[0]);
                AssetClass::new(name.clone(), entry.expected_return, entry.volatility)
                    .with_color(color)
            })
            .collect()
    }
}

impl Validate for SharpeConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !self.risk_free_rate.is_finite() {
            errors.push(ValidationError::new("risk_free_rate", "must be finite"));
        }
        if self.asset_classes.is_empty() {
            errors.push(ValidationError::new("asset_classes", "must not be empty"));
        }

        for (name, entry) in &self.asset_classes {
            if !entry.volatility.is_finite() || entry.volatility <= 0.0 {
                errors.push(ValidationError::with_rule(
                    format!("asset_classes.{name}.volatility"),
                    format!("Volatility for {name} must be positive"),
                    "positive",
                ));
            }
            if !entry.expected_return.is_finite() {
                errors.push(ValidationError::new(
                    format!("asset_classes.{name}.return"),
                    "must be finite",
                ));
            }
        }

        errors.extend(self.plot_style.validate());
        errors
    }
}
