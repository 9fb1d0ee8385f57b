//! Sharpe ratio dashboard: bar chart over a risk/return scatter, plus a
//! footer insight box.

use playbook_config::PlotStyle;
use playbook_core::sharpe::SharpeRow;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{palette, points, Categories, Chart, DrawResult, FONT};

/// Footer paragraph, one entry per line.
pub const CFO_INSIGHT: [&str; 3] = [
    "CFO Insight: Bitcoin has demonstrated the highest Sharpe ratio among major asset classes over the 5-year period,",
    "indicating superior risk-adjusted returns despite its higher volatility. This suggests potential value as a",
    "strategic allocation in corporate treasury portfolios seeking to optimize risk-adjusted performance.",
];

/// Sharpe bars (2/3 of the height) above the risk/return scatter (1/3).
pub struct SharpeDashboard<'a> {
    rows: &'a [SharpeRow],
    risk_free_rate: f64,
    style: &'a PlotStyle,
}

impl<'a> SharpeDashboard<'a> {
    /// Wraps ranked rows, best first.
    pub fn new(rows: &'a [SharpeRow], risk_free_rate: f64, style: &'a PlotStyle) -> Self {
        Self {
            rows,
            risk_free_rate,
            style,
        }
    }

    fn color(&self, index: usize) -> RGBColor {
        self.rows[index]
            .color
            .map_or_else(|| palette::series(index), palette::rgb)
    }

    fn title_font(&self) -> FontDesc<'static> {
        (FONT, points(self.style.title_font_size))
            .into_font()
            .style(FontStyle::Bold)
    }

    fn sharpe_range(&self) -> (f64, f64) {
        let lo = self.rows.iter().map(|r| r.sharpe).fold(0.0_f64, f64::min);
        let hi = self.rows.iter().map(|r| r.sharpe).fold(0.0_f64, f64::max);
        let pad = (hi - lo).max(0.1) * 0.15;
        (if lo < 0.0 { lo - pad } else { 0.0 }, hi + pad)
    }

    fn scatter_range(&self) -> ((f64, f64), (f64, f64)) {
        let vol_hi = self
            .rows
            .iter()
            .map(|r| r.annual_volatility)
            .fold(0.0_f64, f64::max);
        let (ret_lo, ret_hi) = self
            .rows
            .iter()
            .map(|r| r.annual_return)
            .fold((self.risk_free_rate.min(0.0), self.risk_free_rate), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let ret_pad = (ret_hi - ret_lo).max(0.05) * 0.15;
        (
            (0.0, vol_hi.max(0.05) * 1.2),
            (ret_lo - ret_pad, ret_hi + ret_pad),
        )
    }

    fn draw_bars<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        let n = self.rows.len();
        let (y_min, y_max) = self.sharpe_range();
        let annotation = points(self.style.annotation_font_size);

        let x_axis = Categories::new(n);
        let mut chart = ChartBuilder::on(area)
            .caption("5-Year Sharpe Ratio Comparison (2020-2025)", self.title_font())
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x_axis, y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .y_desc("Sharpe Ratio")
            .axis_desc_style((FONT, points(self.style.label_font_size)))
            .label_style((FONT, points(self.style.font_size)))
            .x_label_formatter(&|v| {
                x_axis
                    .index_at(*v)
                    .and_then(|i| self.rows.get(i))
                    .map(|r| r.name.clone())
                    .unwrap_or_default()
            })
            .y_label_formatter(&|v| format!("{:.1}", v))
            .bold_line_style(palette::GRID.mix(self.style.grid_alpha))
            .light_line_style(palette::GRID.mix(self.style.grid_alpha / 3.0))
            .draw()?;

        for (i, row) in self.rows.iter().enumerate() {
            let mut bar = Rectangle::new(
                [
                    (Categories::start(i), 0.0),
                    (Categories::start(i + 1), row.sharpe),
                ],
                self.color(i).filled(),
            );
            bar.set_margin(0, 0, 15, 15);
            chart.draw_series(std::iter::once(bar))?;

            let label = TextStyle::from((FONT, annotation).into_font())
                .pos(Pos::new(HPos::Center, VPos::Bottom));
            chart.draw_series(std::iter::once(Text::new(
                format!("{:.2}", row.sharpe),
                (Categories::center(i), row.sharpe.max(0.0) + 0.02),
                label,
            )))?;
        }

        Ok(())
    }

    fn draw_scatter<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        let ((x_min, x_max), (y_min, y_max)) = self.scatter_range();
        let annotation = points(self.style.annotation_font_size);
        let radius = self.style.marker_radius() as i32;

        let mut chart = ChartBuilder::on(area)
            .caption("Risk-Return Profile", self.title_font())
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Annual Volatility (Risk)")
            .y_desc("Annual Return")
            .axis_desc_style((FONT, points(self.style.label_font_size)))
            .label_style((FONT, points(self.style.font_size)))
            .x_label_formatter(&|v| format!("{:.0}%", v * 100.0))
            .y_label_formatter(&|v| format!("{:.0}%", v * 100.0))
            .bold_line_style(palette::GRID.mix(self.style.grid_alpha))
            .light_line_style(palette::GRID.mix(self.style.grid_alpha / 3.0))
            .draw()?;

        // Dashed risk-free reference line.
        let rf = self.risk_free_rate;
        let dash = (x_max - x_min) / 80.0;
        chart.draw_series((0..40).map(|k| {
            let x0 = x_min + 2.0 * k as f64 * dash;
            PathElement::new(vec![(x0, rf), (x0 + dash, rf)], BLACK.mix(0.4).stroke_width(2))
        }))?;
        chart.draw_series(std::iter::once(Text::new(
            format!("Risk-Free Rate: {:.1}%", rf * 100.0),
            (x_min + (x_max - x_min) * 0.01, rf + (y_max - y_min) * 0.03),
            (FONT, annotation).into_font(),
        )))?;

        for (i, row) in self.rows.iter().enumerate() {
            let color = self.color(i).mix(self.style.scatter_alpha);
            chart.draw_series(std::iter::once(
                EmptyElement::at((row.annual_volatility, row.annual_return))
                    + Circle::new((0, 0), radius, color.filled())
                    + Text::new(
                        row.name.clone(),
                        (radius + 7, 0),
                        TextStyle::from((FONT, annotation).into_font())
                            .pos(Pos::new(HPos::Left, VPos::Center)),
                    ),
            ))?;
        }

        Ok(())
    }

    fn draw_insight<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        let (w, h) = area.dim_in_pixel();
        let (w, h) = (w as i32, h as i32);
        let inset = 20;

        area.draw(&Rectangle::new(
            [(inset, 5), (w - inset, h - 5)],
            palette::LIGHT_YELLOW.mix(0.8).filled(),
        ))?;
        area.draw(&Rectangle::new(
            [(inset, 5), (w - inset, h - 5)],
            palette::ORANGE.stroke_width(2),
        ))?;

        let line_height = (h - 10) / (CFO_INSIGHT.len() as i32 + 1);
        let style = TextStyle::from((FONT, points(self.style.annotation_font_size)).into_font())
            .pos(Pos::new(HPos::Center, VPos::Center));
        for (i, line) in CFO_INSIGHT.iter().enumerate() {
            let y = 5 + line_height * (i as i32 + 1);
            area.draw(&Text::new(*line, (w / 2, y), style.clone()))?;
        }

        Ok(())
    }
}

impl Chart for SharpeDashboard<'_> {
    fn size(&self) -> (u32, u32) {
        self.style.pixel_size()
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        if self.rows.is_empty() {
            return Ok(());
        }

        let (_, height) = root.dim_in_pixel();
        let footer = (height / 9).max(60);
        let (charts, insight) = root.split_vertically(height.saturating_sub(footer));
        let (_, charts_height) = charts.dim_in_pixel();
        let (bars, scatter) = charts.split_vertically(charts_height * 2 / 3);

        self.draw_bars(&bars)?;
        self.draw_scatter(&scatter)?;
        self.draw_insight(&insight)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::{filled_rects, rect_sizes, render_svg};
    use playbook_core::sharpe::{rank_by_sharpe, reference_assets, REFERENCE_RISK_FREE_RATE};
    use playbook_core::types::AssetClass;

    #[test]
    fn test_ranges_cover_data() {
        let rows = rank_by_sharpe(&reference_assets(), REFERENCE_RISK_FREE_RATE).unwrap();
        let style = PlotStyle::default();
        let dashboard = SharpeDashboard::new(&rows, REFERENCE_RISK_FREE_RATE, &style);

        let (lo, hi) = dashboard.sharpe_range();
        assert_eq!(lo, 0.0);
        assert!(hi > rows[0].sharpe);

        let ((x_lo, x_hi), (y_lo, y_hi)) = dashboard.scatter_range();
        assert_eq!(x_lo, 0.0);
        assert!(x_hi > 0.65);
        assert!(y_lo < 0.025 && y_hi > 0.42);
        assert_eq!(dashboard.size(), (1200, 1200));
    }

    #[test]
    fn test_palette_fallback() {
        let rows = vec![SharpeRow {
            name: "Cash".into(),
            sharpe: 0.2,
            annual_return: 0.04,
            annual_volatility: 0.01,
            color: None,
        }];
        let style = PlotStyle::default();
        let dashboard = SharpeDashboard::new(&rows, 0.02, &style);
        assert_eq!(dashboard.color(0), palette::SERIES[0]);
    }

    #[test]
    fn test_single_asset_bar_has_positive_width() {
        let rows = rank_by_sharpe(&[AssetClass::new("Bitcoin", 0.42, 0.65)], 0.025).unwrap();
        let style = PlotStyle::default();
        let svg = render_svg(&SharpeDashboard::new(&rows, 0.025, &style));

        // Background, one bar, insight fill and border.
        let rects = rect_sizes(&svg);
        assert_eq!(rects.len(), 4);
        for (width, height) in &rects {
            assert!(*width > 0.0 && *height > 0.0, "{width}x{height}");
        }
        assert_eq!(filled_rects(&svg, palette::SERIES[0]), 1);
        assert!(svg.contains("\nBitcoin\n"));
    }

    #[test]
    fn test_reference_dashboard_renders_every_bar() {
        let rows = rank_by_sharpe(&reference_assets(), REFERENCE_RISK_FREE_RATE).unwrap();
        let style = PlotStyle::default();
        let svg = render_svg(&SharpeDashboard::new(&rows, REFERENCE_RISK_FREE_RATE, &style));

        let rects = rect_sizes(&svg);
        assert_eq!(rects.len(), rows.len() + 3);
        assert!(rects.iter().all(|(w, h)| *w > 0.0 && *h > 0.0));
        assert!(svg.contains("5-Year Sharpe Ratio Comparison (2020-2025)"));
        assert!(svg.contains("Risk-Return Profile"));
        assert_eq!(svg.matches("<circle").count(), rows.len());
    }
}
