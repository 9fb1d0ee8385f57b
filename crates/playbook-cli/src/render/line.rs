//! Backtest dashboard line chart.

use chrono::Duration;
use playbook_core::backtest::BacktestReport;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::{inches, palette, points, Chart, DrawResult, FONT};

/// One cumulative-value line per portfolio over month-end dates.
pub struct BacktestChart<'a> {
    report: &'a BacktestReport,
}

impl<'a> BacktestChart<'a> {
    /// Wraps a backtest report.
    pub fn new(report: &'a BacktestReport) -> Self {
        Self { report }
    }

    /// Chart title, spanning the first year to the year after the last month-end.
    pub fn title(&self) -> String {
        match self.report.date_range() {
            Some((first, last)) => format!(
                "Backtest Dashboard: Bitcoin Treasury Allocations ({}-{})",
                first.format("%Y"),
                (last + Duration::days(1)).format("%Y")
            ),
            None => "Backtest Dashboard: Bitcoin Treasury Allocations".to_string(),
        }
    }

    fn value_range(&self) -> (f64, f64) {
        let (lo, hi) = self
            .report
            .curves
            .iter()
            .flat_map(|c| c.values.values().iter().copied())
            .fold((1.0_f64, 1.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let pad = (hi - lo).max(0.1) * 0.05;
        (lo - pad, hi + pad)
    }
}

impl Chart for BacktestChart<'_> {
    fn size(&self) -> (u32, u32) {
        inches(14.0, 8.0)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        let Some((first, last)) = self.report.date_range() else {
            return Ok(());
        };
        let (y_min, y_max) = self.value_range();

        let mut chart = ChartBuilder::on(root)
            .caption(
                self.title(),
                (FONT, points(16.0)).into_font().style(FontStyle::Bold),
            )
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(first..(last + Duration::days(1)), y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Portfolio Value (Normalized)")
            .axis_desc_style((FONT, points(14.0)))
            .label_style((FONT, points(12.0)))
            .x_label_formatter(&|d| d.format("%Y-%m").to_string())
            .y_label_formatter(&|v| format!("{:.2}", v))
            .bold_line_style(palette::GRID.mix(0.3))
            .light_line_style(palette::GRID.mix(0.1))
            .draw()?;

        for (i, curve) in self.report.curves.iter().enumerate() {
            let color = palette::series(i);
            let line = self
                .report
                .dates
                .iter()
                .copied()
                .zip(curve.values.values().iter().copied());

            chart
                .draw_series(LineSeries::new(line, color.stroke_width(2)))?
                .label(curve.portfolio.name.clone())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font((FONT, points(12.0)))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::{count_tags, hex, render_svg};
    use playbook_core::backtest::BacktestSpec;
    use playbook_core::synthesis::ReturnGenerator;

    #[test]
    fn test_title_and_range() {
        let report = BacktestSpec::default()
            .run(&mut ReturnGenerator::seeded(42))
            .unwrap();
        let chart = BacktestChart::new(&report);
        assert_eq!(
            chart.title(),
            "Backtest Dashboard: Bitcoin Treasury Allocations (2020-2025)"
        );
        assert_eq!(chart.size(), (1400, 800));

        let (lo, hi) = chart.value_range();
        assert!(lo < 1.0 && hi > 1.0);
    }

    #[test]
    fn test_renders_one_line_per_portfolio() {
        let report = BacktestSpec::default()
            .run(&mut ReturnGenerator::seeded(42))
            .unwrap();
        let svg = render_svg(&BacktestChart::new(&report));

        assert!(svg.contains("Backtest Dashboard: Bitcoin Treasury Allocations (2020-2025)"));
        for (i, curve) in report.curves.iter().enumerate() {
            // The curve itself and its legend swatch.
            let stroke = format!("stroke=\"{}\"", hex(palette::series(i)));
            assert_eq!(count_tags(&svg, "<polyline", &stroke), 2, "{}", curve.portfolio.name);
            assert!(svg.contains(&curve.portfolio.name));
        }
    }
}
