//! Custody model heatmap.

use playbook_core::types::CustodyScoreMatrix;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{inches, palette, points, Categories, Chart, DrawResult, FONT};

/// Attributes as rows, custody models as columns, each cell colored on the
/// YlGnBu scale and annotated with its score.
pub struct CustodyHeatmap<'a> {
    matrix: &'a CustodyScoreMatrix,
    title: String,
}

impl<'a> CustodyHeatmap<'a> {
    /// Wraps a score matrix.
    pub fn new(matrix: &'a CustodyScoreMatrix) -> Self {
        Self {
            matrix,
            title: "Bitcoin Custody Model Comparison".to_string(),
        }
    }

    /// Position of `score` between the lowest and highest score, in `[0, 1]`.
    pub fn color_position(&self, score: f64) -> f64 {
        let (lo, hi) = self.score_range();
        if hi > lo {
            (score - lo) / (hi - lo)
        } else {
            0.5
        }
    }

    fn score_range(&self) -> (f64, f64) {
        self.matrix
            .models()
            .iter()
            .flat_map(|m| m.scores.iter().copied())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
                (lo.min(s), hi.max(s))
            })
    }
}

impl Chart for CustodyHeatmap<'_> {
    fn size(&self) -> (u32, u32) {
        inches(10.0, 6.0)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        let models = self.matrix.models();
        let attributes = self.matrix.attributes();
        let (cols, rows) = (models.len(), attributes.len());
        if cols == 0 || rows == 0 {
            return Ok(());
        }

        let x_axis = Categories::new(cols);
        let y_axis = Categories::new(rows);
        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, (FONT, points(14.0)))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(190)
            .build_cartesian_2d(x_axis, y_axis)?;

        // Row 0 is drawn at the bottom, so attributes are flipped to read top-down.
        let attribute_at = |value: f64| {
            y_axis
                .index_at(value)
                .and_then(|row| attributes.get(rows - 1 - row))
                .cloned()
                .unwrap_or_default()
        };

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(cols)
            .y_labels(rows)
            .label_style((FONT, points(10.0)))
            .x_label_formatter(&|v| {
                x_axis
                    .index_at(*v)
                    .and_then(|i| models.get(i))
                    .map(|m| m.name.clone())
                    .unwrap_or_default()
            })
            .y_label_formatter(&|v| attribute_at(*v))
            .draw()?;

        for (col, model) in models.iter().enumerate() {
            for (attr, score) in model.scores.iter().enumerate() {
                let row = rows - 1 - attr;
                let fill = palette::yl_gn_bu(self.color_position(*score));

                chart.draw_series(std::iter::once(Rectangle::new(
                    [
                        (Categories::start(col), Categories::start(row)),
                        (Categories::start(col + 1), Categories::start(row + 1)),
                    ],
                    fill.filled(),
                )))?;

                let label = (FONT, points(12.0))
                    .into_font()
                    .color(&palette::text_on(fill))
                    .pos(Pos::new(HPos::Center, VPos::Center));
                chart.draw_series(std::iter::once(Text::new(
                    format!("{:.1}", score),
                    (Categories::center(col), Categories::center(row)),
                    label,
                )))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::{rect_sizes, render_svg};
    use approx::assert_relative_eq;
    use playbook_core::types::CustodyModel;

    fn spread(values: impl Iterator<Item = f64>) -> f64 {
        let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        hi - lo
    }

    #[test]
    fn test_color_position() {
        let matrix = CustodyScoreMatrix::reference();
        let heatmap = CustodyHeatmap::new(&matrix);
        assert_eq!(heatmap.score_range(), (1.0, 5.0));
        assert_relative_eq!(heatmap.color_position(1.0), 0.0);
        assert_relative_eq!(heatmap.color_position(3.0), 0.5);
        assert_relative_eq!(heatmap.color_position(5.0), 1.0);
        assert_eq!(heatmap.size(), (1000, 600));
    }

    #[test]
    fn test_single_model_fills_plot_width() {
        let matrix = CustodyScoreMatrix::new(
            vec!["Security".into(), "Cost".into()],
            vec![CustodyModel {
                name: "Vault".into(),
                scores: vec![5.0, 2.0],
            }],
        )
        .unwrap();
        let svg = render_svg(&CustodyHeatmap::new(&matrix));

        // Background, then one cell per score.
        let rects = rect_sizes(&svg);
        assert_eq!(rects.len(), 3);
        for (width, height) in &rects {
            assert!(*width > 0.0 && *height > 0.0, "{width}x{height}");
        }
        for (width, _) in &rects[1..] {
            assert!(*width > 700.0, "cell is {width} px wide");
        }
        assert!(svg.contains("\nVault\n"));
    }

    #[test]
    fn test_reference_cells_are_uniform() {
        let matrix = CustodyScoreMatrix::reference();
        let svg = render_svg(&CustodyHeatmap::new(&matrix));

        let cells = &rect_sizes(&svg)[1..];
        assert_eq!(cells.len(), 24);
        assert!(cells.iter().all(|(w, h)| *w > 100.0 && *h > 50.0));
        assert!(spread(cells.iter().map(|(w, _)| *w)) <= 1.0);
        assert!(spread(cells.iter().map(|(_, h)| *h)) <= 1.0);
    }
}
