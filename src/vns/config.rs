//! Variable Neighborhood Search configuration.

use crate::route::ScoreWeights;

/// Configuration parameters for Variable Neighborhood Search.
///
/// # Examples
///
/// ```
/// use u_arcroute::vns::VnsConfig;
///
/// let config = VnsConfig::new(13.0)
///     .with_max_radius(4)
///     .with_max_iterations(1000);
/// assert_eq!(config.max_radius, 4);
/// assert_eq!(config.max_iterations, 1000);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VnsConfig {
    /// Maximum length of a single excursion from the depot.
    pub range: f64,
    /// Objective weights.
    pub weights: ScoreWeights,
    /// Widest neighborhood tried before the search is declared stuck.
    /// Neighborhood size grows exponentially with the radius.
    pub max_radius: usize,
    /// Maximum number of neighborhood evaluations.
    pub max_iterations: usize,
    /// Wall-clock budget in milliseconds (None for no limit).
    pub time_limit_ms: Option<u64>,
    /// Whether to expand neighborhoods on the rayon pool
    /// (requires the `parallel` feature).
    pub parallel: bool,
}

impl VnsConfig {
    /// Creates a configuration for the given range bound.
    pub fn new(range: f64) -> Self {
        Self {
            range,
            weights: ScoreWeights::default(),
            max_radius: 6,
            max_iterations: 100_000,
            time_limit_ms: None,
            parallel: false,
        }
    }

    /// Sets the range bound.
    pub fn with_range(mut self, range: f64) -> Self {
        self.range = range;
        self
    }

    /// Sets the objective weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the widest radius.
    pub fn with_max_radius(mut self, radius: usize) -> Self {
        self.max_radius = radius;
        self
    }

    /// Sets the maximum number of neighborhood evaluations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Enables or disables parallel neighborhood expansion.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.range.is_nan() || self.range <= 0.0 {
            return Err("range must be positive".into());
        }
        self.weights.validate()?;
        if self.max_radius == 0 {
            return Err("max_radius must be at least 1".into());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        Ok(())
    }
}
