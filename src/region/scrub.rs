use std::time::Duration;

/// Lagged follower of a scroll-derived value.
///
/// Each advance closes `1 - exp(-dt / lag)` of the gap to the target, so the result
/// depends only on elapsed time, not on how many samples arrived. A lag of zero follows
/// the target exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Scrub {
    lag_secs: f64,
    target: f64,
    rendered: f64,
    last: Option<Duration>,
}

impl Scrub {
    /// Follower with the given lag in seconds. Negative or NaN lags mean "no lag".
    pub fn new(lag_secs: f64) -> Self {
        Self {
            lag_secs: if lag_secs.is_nan() { 0.0 } else { lag_secs.max(0.0) },
            ..Self::default()
        }
    }

    /// Target value.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Smoothed value.
    pub fn rendered(&self) -> f64 {
        self.rendered
    }

    /// Set a new target and advance to `now`.
    pub fn set_target(&mut self, target: f64, now: Duration) {
        self.target = target;
        self.advance(now);
    }

    /// Advance the smoothed value to `now`.
    pub fn advance(&mut self, now: Duration) {
        let dt = self
            .last
            .map(|last| now.saturating_sub(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last = Some(now);
        if self.lag_secs <= 0.0 {
            self.rendered = self.target;
            return;
        }
        let alpha = 1.0 - (-dt / self.lag_secs).exp();
        self.rendered += (self.target - self.rendered) * alpha;
        if (self.target - self.rendered).abs() < 1e-6 {
            self.rendered = self.target;
        }
    }

    /// Jump the smoothed value onto the target.
    pub fn settle(&mut self) {
        self.rendered = self.target;
    }

    /// Force both target and smoothed value.
    pub fn snap(&mut self, value: f64) {
        self.target = value;
        self.rendered = value;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/region/scrub.rs"]
mod tests;
