use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::math::phase_progress;

/// Per-index shift of a window's bounds, so element `i` runs over
/// `[start + i * start_step, end + i * end_step]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stagger {
    /// Shift of the start bound per index.
    #[serde(default)]
    pub start_step: f64,
    /// Shift of the end bound per index.
    #[serde(default)]
    pub end_step: f64,
}

/// A `[start, end]` sub-range of top-level progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhaseWindow {
    /// Progress at which the phase begins.
    pub start: f64,
    /// Progress at which the phase completes.
    pub end: f64,
    /// Optional per-index stagger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stagger: Option<Stagger>,
}

impl PhaseWindow {
    /// Window without stagger.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            stagger: None,
        }
    }

    /// Window covering the whole progress range.
    pub fn full() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Same window with a per-index stagger.
    pub fn staggered(self, start_step: f64, end_step: f64) -> Self {
        Self {
            stagger: Some(Stagger {
                start_step,
                end_step,
            }),
            ..self
        }
    }

    /// Bounds for the element at `index`.
    pub fn bounds(&self, index: usize) -> (f64, f64) {
        match self.stagger {
            Some(s) => {
                let i = index as f64;
                (self.start + i * s.start_step, self.end + i * s.end_step)
            }
            None => (self.start, self.end),
        }
    }

    /// Local progress of element `index` at top-level progress `p`.
    pub fn local(&self, p: f64, index: usize) -> f64 {
        let (s, e) = self.bounds(index);
        phase_progress(p, s, e)
    }

    /// Bounds must be finite. Degenerate windows are accepted as instantaneous steps.
    pub fn validate(&self) -> SceneResult<()> {
        let stagger_ok = self
            .stagger
            .is_none_or(|s| s.start_step.is_finite() && s.end_step.is_finite());
        if !(self.start.is_finite() && self.end.is_finite() && stagger_ok) {
            return Err(SceneError::validation("phase window bounds must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/phase.rs"]
mod tests;
