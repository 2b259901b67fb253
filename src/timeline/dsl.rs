use crate::{
    animation::ease::Ease,
    foundation::error::SceneResult,
    responsive::classify::ViewportClass,
    scene::target::Property,
    timeline::phase::PhaseWindow,
    timeline::track::{TrackDef, ValueDef},
};

/// Builder for a single [`TrackDef`] row.
pub struct TrackBuilder {
    def: TrackDef,
}

impl TrackBuilder {
    /// Start a row for `property` of every element matching `selector`.
    ///
    /// Defaults: full window, `0 -> 1`, linear, no spread, every class.
    pub fn new(selector: impl Into<String>, property: Property) -> Self {
        Self {
            def: TrackDef {
                selector: selector.into(),
                property,
                window: PhaseWindow::full(),
                from: ValueDef::Const(0.0),
                to: ValueDef::Const(1.0),
                ease: Ease::Linear,
                spread: 0.0,
                classes: None,
            },
        }
    }

    /// Progress window.
    pub fn window(mut self, start: f64, end: f64) -> Self {
        self.def.window = PhaseWindow {
            start,
            end,
            ..self.def.window
        };
        self
    }

    /// Per-index stagger of the window bounds.
    pub fn stagger(mut self, start_step: f64, end_step: f64) -> Self {
        self.def.window = self.def.window.staggered(start_step, end_step);
        self
    }

    /// Start and end values.
    pub fn values(mut self, from: impl Into<ValueDef>, to: impl Into<ValueDef>) -> Self {
        self.def.from = from.into();
        self.def.to = to.into();
        self
    }

    /// Easing of local progress.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.def.ease = ease;
        self
    }

    /// Per-index delta multiplier.
    pub fn spread(mut self, spread: f64) -> Self {
        self.def.spread = spread;
        self
    }

    /// Restrict to the given classes.
    pub fn only(mut self, classes: &[ViewportClass]) -> Self {
        self.def.classes = Some(classes.to_vec());
        self
    }

    /// Finish the row.
    pub fn build(self) -> TrackDef {
        self.def
    }
}

/// Builder for an ordered phase table.
#[derive(Default)]
pub struct PhaseTableBuilder {
    rows: Vec<TrackDef>,
}

impl PhaseTableBuilder {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row; rows are evaluated in append order.
    pub fn row(mut self, row: TrackBuilder) -> Self {
        self.rows.push(row.build());
        self
    }

    /// Return the rows without validating them.
    pub fn into_rows(self) -> Vec<TrackDef> {
        self.rows
    }

    /// Validate and return the rows.
    pub fn build(self) -> SceneResult<Vec<TrackDef>> {
        for row in &self.rows {
            row.validate()?;
        }
        Ok(self.rows)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/dsl.rs"]
mod tests;
