//! Categorical axis for bar and heatmap charts.

use std::ops::Range;

use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};

/// `count` unit-wide slots over `[0, count)`.
///
/// Slot `i` spans `i..i + 1` and is labelled at its center, so a single
/// category still fills the whole axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Categories {
    count: usize,
}

impl Categories {
    /// An axis with `count` slots (at least one).
    pub fn new(count: usize) -> Self {
        Self {
            count: count.max(1),
        }
    }

    /// Left (or lower) edge of slot `index`.
    pub fn start(index: usize) -> f64 {
        index as f64
    }

    /// Center of slot `index`.
    pub fn center(index: usize) -> f64 {
        index as f64 + 0.5
    }

    /// Slot containing `value`, if it lies on the axis.
    pub fn index_at(&self, value: f64) -> Option<usize> {
        if value.is_finite() && value >= 0.0 && value < self.count as f64 {
            Some(value.floor() as usize)
        } else {
            None
        }
    }
}

impl Ranged for Categories {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let span = f64::from(limit.1 - limit.0);
        limit.0 + (span * value / self.count as f64).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        (0..self.count).map(Self::center).collect()
    }

    fn range(&self) -> Range<f64> {
        0.0..self.count as f64
    }
}
