//! Allocation scenario fan chart.

use playbook_core::monte_carlo::{FanBand, ScenarioOutcome};
use playbook_core::types::{AllocationScenario, HexColor};
use plotters::coord::Shift;
use plotters::prelude::*;

use super::{inches, palette, points, Chart, DrawResult, FONT};

struct Panel {
    scenario: String,
    color: HexColor,
    bands: Vec<(AllocationScenario, FanBand)>,
}

impl Panel {
    fn extent(&self) -> (f64, f64) {
        let (lo, hi) = self
            .bands
            .iter()
            .map(|(_, band)| band.extent())
            .fold((1.0_f64, 1.0_f64), |(lo, hi), (l, h)| (lo.min(l), hi.max(h)));
        let pad = (hi - lo).max(0.1) * 0.05;
        (lo - pad, hi + pad)
    }

    fn horizon(&self) -> usize {
        self.bands
            .iter()
            .map(|(_, band)| band.len().saturating_sub(1))
            .max()
            .unwrap_or(0)
    }
}

/// One panel per market regime with 5-95% and 25-75% bands and a median line
/// per allocation.
pub struct FanChart {
    panels: Vec<Panel>,
}

impl FanChart {
    /// Reduces simulated outcomes to percentile bands, grouped by scenario in
    /// first-seen order.
    pub fn new(outcomes: &[ScenarioOutcome]) -> Self {
        let mut panels: Vec<Panel> = Vec::new();
        for outcome in outcomes {
            let band = (outcome.allocation, outcome.fan());
            match panels.iter_mut().find(|p| p.scenario == outcome.scenario) {
                Some(panel) => panel.bands.push(band),
                None => panels.push(Panel {
                    scenario: outcome.scenario.clone(),
                    color: outcome.color,
                    bands: vec![band],
                }),
            }
        }
        Self { panels }
    }

    /// Number of scenario panels.
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }
}

impl Chart for FanChart {
    fn size(&self) -> (u32, u32) {
        inches(12.0, 10.0)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        if self.panels.is_empty() {
            return Ok(());
        }

        let root = root.titled(
            "Bitcoin Allocation Scenarios: Monte Carlo Outcomes",
            (FONT, points(16.0)).into_font().style(FontStyle::Bold),
        )?;
        let areas = root.split_evenly((self.panels.len(), 1));

        for (panel, area) in self.panels.iter().zip(areas.iter()) {
            area.fill(&palette::rgb(panel.color).mix(0.08))?;

            let (y_min, y_max) = panel.extent();
            let horizon = panel.horizon().max(1) as f64;

            let mut chart = ChartBuilder::on(area)
                .caption(&panel.scenario, (FONT, points(13.0)))
                .margin(10)
                .x_label_area_size(35)
                .y_label_area_size(70)
                .build_cartesian_2d(0.0..horizon, y_min..y_max)?;

            chart
                .configure_mesh()
                .x_desc("Year")
                .y_desc("Portfolio Value (Normalized)")
                .x_labels(panel.horizon() + 1)
                .x_label_formatter(&|v| format!("{:.0}", v))
                .y_label_formatter(&|v| format!("{:.2}", v))
                .bold_line_style(palette::GRID.mix(0.3))
                .light_line_style(palette::GRID.mix(0.1))
                .draw()?;

            for (i, (allocation, band)) in panel.bands.iter().enumerate() {
                let color = palette::series(i);

                chart.draw_series(std::iter::once(Polygon::new(
                    band_polygon(&band.p95, &band.p5),
                    color.mix(0.15).filled(),
                )))?;
                chart.draw_series(std::iter::once(Polygon::new(
                    band_polygon(&band.p75, &band.p25),
                    color.mix(0.30).filled(),
                )))?;

                let median = band.p50.iter().enumerate().map(|(t, v)| (t as f64, *v));
                chart
                    .draw_series(LineSeries::new(median, color.stroke_width(2)))?
                    .label(allocation.to_string())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
            }

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .label_font((FONT, points(10.0)))
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        Ok(())
    }
}

/// Closed outline between an upper and a lower band, indexed by year.
fn band_polygon(upper: &[f64], lower: &[f64]) -> Vec<(f64, f64)> {
    let forward = upper.iter().enumerate().map(|(t, v)| (t as f64, *v));
    let backward = lower.iter().enumerate().rev().map(|(t, v)| (t as f64, *v));
    forward.chain(backward).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::{rect_sizes, render_svg};
    use playbook_core::monte_carlo::ScenarioSpec;
    use playbook_core::synthesis::ReturnGenerator;

    #[test]
    fn test_band_polygon() {
        let poly = band_polygon(&[1.0, 1.2, 1.4], &[1.0, 0.9, 0.8]);
        assert_eq!(
            poly,
            vec![(0.0, 1.0), (1.0, 1.2), (2.0, 1.4), (2.0, 0.8), (1.0, 0.9), (0.0, 1.0)]
        );
    }

    #[test]
    fn test_panels_grouped_by_scenario() {
        let spec = ScenarioSpec {
            simulations: 50,
            ..ScenarioSpec::default()
        };
        let outcomes = spec.run(&mut ReturnGenerator::seeded(9)).unwrap();
        let chart = FanChart::new(&outcomes);

        assert_eq!(chart.panel_count(), 3);
        assert_eq!(chart.panels[1].scenario, "Base Case");
        assert_eq!(chart.panels[1].bands.len(), 4);
        assert_eq!(chart.panels[1].horizon(), 5);

        let (lo, hi) = chart.panels[2].extent();
        assert!(lo < 1.0 && hi > 1.0);
    }

    #[test]
    fn test_renders_two_bands_per_allocation() {
        let spec = ScenarioSpec {
            simulations: 30,
            ..ScenarioSpec::default()
        };
        let outcomes = spec.run(&mut ReturnGenerator::seeded(5)).unwrap();
        let svg = render_svg(&FanChart::new(&outcomes));

        assert_eq!(svg.matches("<polygon").count(), 2 * outcomes.len());
        for name in ["Bear Market", "Base Case", "Bull Market"] {
            assert!(svg.contains(name), "missing panel {name}");
        }
        assert!(rect_sizes(&svg).iter().all(|(w, h)| *w > 0.0 && *h > 0.0));
    }
}
