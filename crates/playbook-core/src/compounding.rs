//! Cumulative compounding of period returns.

/// Compounds period returns left to right: `v[i] = (1 + r[0]) * ... * (1 + r[i])`.
///
/// The input must be in time order. An empty slice gives an empty path.
///
/// # Example
///
/// ```rust
/// use playbook_core::compounding::cumulative_values;
///
/// let path = cumulative_values(&[0.1, -0.05, 0.02]);
/// assert!((path[2] - 1.1 * 0.95 * 1.02).abs() < 1e-12);
/// ```
pub fn cumulative_values(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0_f64, |value, r| {
            *value *= 1.0 + r;
            Some(*value)
        })
        .collect()
}

/// Annualized growth rate implied by `final_value` after `periods` periods.
///
/// Returns `0.0` when there are no periods.
pub fn annualized_growth(final_value: f64, periods: usize, periods_per_year: f64) -> f64 {
    if periods == 0 {
        return 0.0;
    }
    final_value.powf(periods_per_year / periods as f64) - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty() {
        assert!(cumulative_values(&[]).is_empty());
    }

    #[test]
    fn test_constant_rate() {
        let path = cumulative_values(&[0.05; 10]);
        assert_eq!(path.len(), 10);
        assert_relative_eq!(path[9], 1.05_f64.powi(10), epsilon = 1e-12);
    }

    #[test]
    fn test_total_loss_sticks() {
        let path = cumulative_values(&[-1.0, 0.5, 0.2]);
        assert_eq!(path, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_annualized_growth() {
        // 60 months doubling -> (2)^(12/60) - 1
        assert_relative_eq!(
            annualized_growth(2.0, 60, 12.0),
            2.0_f64.powf(0.2) - 1.0,
            epsilon = 1e-12
        );
        assert_eq!(annualized_growth(1.5, 0, 12.0), 0.0);
    }
}
