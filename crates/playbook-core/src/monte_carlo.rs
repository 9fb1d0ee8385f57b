//! Monte Carlo allocation scenarios.
//!
//! For each market regime and BTC allocation, many independent annual return
//! paths are simulated and compounded. The resulting cloud of paths is reduced
//! to percentile bands for fan charts and to terminal-value statistics.

use serde::Serialize;
use statrs::statistics::{Data, OrderStatistics, Statistics};
use tracing::{debug, info};

use crate::error::{PlaybookError, PlaybookResult};
use crate::synthesis::{blend_allocation, ReturnGenerator};
use crate::types::{AllocationScenario, AssetClass, HexColor, PortfolioResult};

/// Percentiles reported by [`FanBand`].
pub const FAN_PERCENTILES: [usize; 5] = [5, 25, 50, 75, 95];

/// A market regime with annual BTC and traditional return distributions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketScenario {
    /// Regime name, e.g. `Base Case`.
    pub name: String,
    /// Annual BTC return distribution.
    pub btc: AssetClass,
    /// Annual traditional-portfolio return distribution.
    pub traditional: AssetClass,
    /// Display color for the regime.
    pub color: HexColor,
}

impl MarketScenario {
    /// Creates a regime from `(mean, volatility)` pairs.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        btc: (f64, f64),
        traditional: (f64, f64),
        color: HexColor,
    ) -> Self {
        Self {
            name: name.into(),
            btc: AssetClass::new("BTC", btc.0, btc.1),
            traditional: AssetClass::new("Traditional", traditional.0, traditional.1),
            color,
        }
    }

    /// Bear, base and bull regimes of the reference scenario chart.
    pub fn reference_set() -> Vec<Self> {
        vec![
            Self::new(
                "Bear Market",
                (-0.20, 0.80),
                (0.02, 0.15),
                HexColor::new(0xFF, 0x99, 0x99),
            ),
            Self::new(
                "Base Case",
                (0.30, 0.65),
                (0.06, 0.12),
                HexColor::new(0x66, 0xB2, 0xFF),
            ),
            Self::new(
                "Bull Market",
                (0.80, 0.70),
                (0.10, 0.14),
                HexColor::new(0x99, 0xCC, 0x99),
            ),
        ]
    }
}

/// Parameters of a scenario simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSpec {
    /// Market regimes to simulate.
    pub scenarios: Vec<MarketScenario>,
    /// Allocations simulated within every regime.
    pub allocations: Vec<AllocationScenario>,
    /// Paths per regime and allocation.
    pub simulations: usize,
    /// Number of annual periods per path.
    pub horizon_years: usize,
}

impl Default for ScenarioSpec {
    /// Three reference regimes, 0/1/5/10% BTC, 1000 paths over 5 years.
    fn default() -> Self {
        let allocations = [0.0, 0.01, 0.05, 0.10]
            .into_iter()
            .filter_map(|w| AllocationScenario::new(w).ok())
            .collect();
        Self {
            scenarios: MarketScenario::reference_set(),
            allocations,
            simulations: 1000,
            horizon_years: 5,
        }
    }
}

impl ScenarioSpec {
    fn validate(&self) -> PlaybookResult<()> {
        if self.simulations == 0 {
            return Err(PlaybookError::invalid_parameter("simulations", "must be at least 1"));
        }
        if self.horizon_years == 0 {
            return Err(PlaybookError::invalid_parameter("horizon_years", "must be at least 1"));
        }
        if self.scenarios.is_empty() {
            return Err(PlaybookError::empty("market scenarios"));
        }
        if self.allocations.is_empty() {
            return Err(PlaybookError::empty("allocations"));
        }
        for scenario in &self.scenarios {
            scenario.btc.validate()?;
            scenario.traditional.validate()?;
        }
        Ok(())
    }

    /// Simulates every regime and allocation.
    ///
    /// Outcomes are ordered by scenario, then by allocation. A 0% BTC
    /// allocation compounds the traditional draw directly; any other
    /// allocation blends a fresh BTC and traditional draw per path.
    ///
    /// # Errors
    ///
    /// Fails on zero simulations or horizon, empty inputs, or a non-positive
    /// volatility in any regime.
    pub fn run(&self, generator: &mut ReturnGenerator) -> PlaybookResult<Vec<ScenarioOutcome>> {
        self.validate()?;

        let mut outcomes = Vec::with_capacity(self.scenarios.len() * self.allocations.len());
        for scenario in &self.scenarios {
            for allocation in &self.allocations {
                let paths = (0..self.simulations)
                    .map(|_| self.simulate_path(scenario, allocation, generator))
                    .collect::<PlaybookResult<Vec<_>>>()?;

                debug!(
                    scenario = %scenario.name,
                    allocation = %allocation,
                    paths = paths.len(),
                    "simulated allocation"
                );

                outcomes.push(ScenarioOutcome {
                    scenario: scenario.name.clone(),
                    color: scenario.color,
                    allocation: *allocation,
                    paths,
                });
            }
        }

        info!(
            scenarios = self.scenarios.len(),
            allocations = self.allocations.len(),
            simulations = self.simulations,
            horizon = self.horizon_years,
            "scenario simulation complete"
        );
        Ok(outcomes)
    }

    fn simulate_path(
        &self,
        scenario: &MarketScenario,
        allocation: &AllocationScenario,
        generator: &mut ReturnGenerator,
    ) -> PlaybookResult<PortfolioResult> {
        let horizon = self.horizon_years;
        if allocation.btc_weight() == 0.0 {
            return Ok(generator.sample_asset(&scenario.traditional, horizon)?.compound());
        }
        let btc = generator.sample_asset(&scenario.btc, horizon)?;
        let traditional = generator.sample_asset(&scenario.traditional, horizon)?;
        Ok(blend_allocation(&btc, &traditional, allocation)?.compound())
    }
}

/// All simulated paths of one allocation within one regime.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    /// Regime name.
    pub scenario: String,
    /// Regime display color.
    pub color: HexColor,
    /// Simulated allocation.
    pub allocation: AllocationScenario,
    /// Compounded paths, one per simulation.
    pub paths: Vec<PortfolioResult>,
}

impl ScenarioOutcome {
    /// Number of periods per path.
    pub fn horizon(&self) -> usize {
        self.paths.first().map_or(0, PortfolioResult::len)
    }

    /// Values of every path at `period` (0-based, after compounding that period).
    pub fn cross_section(&self, period: usize) -> Vec<f64> {
        self.paths
            .iter()
            .filter_map(|p| p.values().get(period).copied())
            .collect()
    }

    /// Terminal value of every path.
    pub fn terminal_values(&self) -> Vec<f64> {
        self.paths.iter().map(PortfolioResult::final_value).collect()
    }

    /// Percentile bands per period, anchored at `1.0` for period zero.
    pub fn fan(&self) -> FanBand {
        let mut band = FanBand::anchored(self.horizon() + 1);
        for period in 0..self.horizon() {
            let mut data = Data::new(self.cross_section(period));
            let [p5, p25, p50, p75, p95] = FAN_PERCENTILES.map(|p| data.percentile(p));
            band.p5.push(p5);
            band.p25.push(p25);
            band.p50.push(p50);
            band.p75.push(p75);
            band.p95.push(p95);
        }
        band
    }

    /// Terminal-value statistics.
    pub fn summary(&self) -> ScenarioSummary {
        let terminal = self.terminal_values();
        let losses = terminal.iter().filter(|v| **v < 1.0).count();
        let mean = terminal.iter().mean();
        let count = terminal.len();
        let mut data = Data::new(terminal);

        ScenarioSummary {
            scenario: self.scenario.clone(),
            btc_weight: self.allocation.btc_weight(),
            simulations: count,
            mean_terminal: mean,
            median_terminal: data.percentile(50),
            p5_terminal: data.percentile(5),
            p95_terminal: data.percentile(95),
            probability_of_loss: if count == 0 {
                0.0
            } else {
                losses as f64 / count as f64
            },
        }
    }
}

/// Percentile bands of simulated values, index 0 being the starting unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FanBand {
    /// 5th percentile.
    pub p5: Vec<f64>,
    /// 25th percentile.
    pub p25: Vec<f64>,
    /// Median.
    pub p50: Vec<f64>,
    /// 75th percentile.
    pub p75: Vec<f64>,
    /// 95th percentile.
    pub p95: Vec<f64>,
}

impl FanBand {
    fn anchored(capacity: usize) -> Self {
        let start = || {
            let mut v = Vec::with_capacity(capacity);
            v.push(1.0);
            v
        };
        Self {
            p5: start(),
            p25: start(),
            p50: start(),
            p75: start(),
            p95: start(),
        }
    }

    /// Number of points per band (horizon + 1).
    pub fn len(&self) -> usize {
        self.p50.len()
    }

    /// Returns true if the band has no points.
    pub fn is_empty(&self) -> bool {
        self.p50.is_empty()
    }

    /// Lowest and highest value across all bands.
    pub fn extent(&self) -> (f64, f64) {
        let lo = self.p5.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = self.p95.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (lo, hi)
    }
}

/// Terminal-value statistics of one outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSummary {
    /// Regime name.
    pub scenario: String,
    /// BTC weight.
    pub btc_weight: f64,
    /// Number of paths.
    pub simulations: usize,
    /// Mean terminal value.
    pub mean_terminal: f64,
    /// Median terminal value.
    pub median_terminal: f64,
    /// 5th percentile terminal value.
    pub p5_terminal: f64,
    /// 95th percentile terminal value.
    pub p95_terminal: f64,
    /// Share of paths ending below the starting unit.
    pub probability_of_loss: f64,
}
