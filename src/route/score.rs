//! Objective weights.

/// Weights of the route objective.
///
/// ```text
/// score = cost + unvisited * unvisited_weight + distance(last) * distance_weight
/// ```
///
/// `unvisited_weight` must dominate any cost difference reachable in one
/// move so that covering a new edge always wins; `distance_weight` nudges
/// the search towards positions near the depot when everything else ties.
///
/// # Examples
///
/// ```
/// use u_arcroute::route::ScoreWeights;
///
/// let weights = ScoreWeights::default().with_distance_weight(2.0);
/// assert_eq!(weights.unvisited_weight, 1000.0);
/// assert_eq!(weights.distance_weight, 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreWeights {
    /// Penalty per edge not yet covered.
    pub unvisited_weight: f64,
    /// Factor on the depot distance of the current position.
    pub distance_weight: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            unvisited_weight: 1000.0,
            distance_weight: 1.1,
        }
    }
}

impl ScoreWeights {
    /// Sets the penalty per uncovered edge.
    pub fn with_unvisited_weight(mut self, w: f64) -> Self {
        self.unvisited_weight = w;
        self
    }

    /// Sets the depot-distance factor.
    pub fn with_distance_weight(mut self, w: f64) -> Self {
        self.distance_weight = w;
        self
    }

    /// Validates the weights.
    pub fn validate(&self) -> Result<(), String> {
        if !self.unvisited_weight.is_finite() || self.unvisited_weight <= 0.0 {
            return Err("unvisited_weight must be finite and positive".into());
        }
        if !self.distance_weight.is_finite() || self.distance_weight < 0.0 {
            return Err("distance_weight must be finite and non-negative".into());
        }
        Ok(())
    }
}
