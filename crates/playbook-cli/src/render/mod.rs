//! Chart rendering with plotters.
//!
//! Every chart implements [`Chart`] against a generic drawing backend, so the
//! same code writes PNG through `BitMapBackend` and SVG through `SVGBackend`.

pub mod category;
pub mod fan;
pub mod heatmap;
pub mod line;
pub mod palette;
pub mod sharpe;

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use crate::error::{CliError, CliResult};

pub use category::Categories;
pub use fan::FanChart;
pub use heatmap::CustodyHeatmap;
pub use line::BacktestChart;
pub use sharpe::SharpeDashboard;

/// Result of drawing onto a backend.
pub type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Font family used for all text.
pub const FONT: &str = "sans-serif";

/// A chart that can be drawn on any plotters backend.
pub trait Chart {
    /// Canvas size in pixels.
    fn size(&self) -> (u32, u32);

    /// Draws the chart onto `root`, which has already been cleared to white.
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB>;
}

/// Output image format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// PNG raster via `BitMapBackend`.
    Png,
    /// SVG vector via `SVGBackend`.
    Svg,
}

impl ImageFormat {
    /// `.svg` (any case) selects SVG; everything else is PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => ImageFormat::Svg,
            _ => ImageFormat::Png,
        }
    }
}

/// Renders `chart` to `path`.
pub fn render_to_file<C: Chart>(chart: &C, path: &Path) -> CliResult<()> {
    let size = chart.size();
    let format = ImageFormat::from_path(path);

    match format {
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_root(chart, &root)?;
        }
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_root(chart, &root)?;
        }
    }

    info!(path = %path.display(), width = size.0, height = size.1, ?format, "chart written");
    Ok(())
}

fn draw_root<C: Chart, DB: DrawingBackend>(chart: &C, root: &DrawingArea<DB, Shift>) -> CliResult<()> {
    root.fill(&WHITE).map_err(CliError::render)?;
    chart.draw(root).map_err(CliError::render)?;
    root.present().map_err(CliError::render)?;
    Ok(())
}

/// Pixel size of a figure given in inches at 100 dpi.
pub fn inches(width: f64, height: f64) -> (u32, u32) {
    let px = |v: f64| (v * 100.0).round().max(1.0) as u32;
    (px(width), px(height))
}

/// Converts a point size to pixels at 100 dpi.
pub fn points(size: f64) -> u32 {
    (size * 100.0 / 72.0).round().max(1.0) as u32
}
