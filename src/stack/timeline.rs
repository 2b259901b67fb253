use std::time::Duration;

use crate::animation::ease::Ease;
use crate::foundation::core::TargetId;
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::math::{clamp01, lerp};
use crate::region::scrub::Scrub;
use crate::region::state::{RegionState, step};
use crate::scene::lookup::BuildCtx;
use crate::scene::state::SceneState;
use crate::scene::target::Property;
use crate::timeline::track::ValueDef;

/// Resting offset and scale of a card at a given depth.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PeekSlot {
    /// Vertical offset in pixels.
    pub offset_px: f64,
    /// Scale factor.
    pub scale: f64,
}

impl PeekSlot {
    /// Slot at `offset_px` with `scale`.
    pub fn new(offset_px: f64, scale: f64) -> Self {
        Self { offset_px, scale }
    }
}

/// Which cards shift one slot shallower during a segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftMode {
    /// Every card below the dismissed one moves up one slot.
    #[default]
    Cascade,
    /// Only the next card moves, straight into the front slot; deeper cards hold.
    NextOnly,
}

/// Declared card stack.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StackDef {
    /// Selector of the pinned container.
    pub anchor: String,
    /// Card selector; cards are dismissed in reverse declaration order.
    pub cards: String,
    /// Peek slots by depth. Deeper cards reuse the last slot.
    pub peek_slots: Vec<PeekSlot>,
    /// Vertical offset a dismissed card travels to.
    pub exit_offset: ValueDef,
    /// Pin start as a fraction of viewport height below the top edge.
    #[serde(default)]
    pub start_ratio: f64,
    /// Axis distance between segment starts. May be shorter than `duration`; an
    /// overlapping segment picks the card up where the previous one has it.
    #[serde(default = "one")]
    pub spacing: f64,
    /// Axis length of one segment.
    #[serde(default = "one")]
    pub duration: f64,
    /// Easing of the exiting card.
    #[serde(default)]
    pub exit_ease: Ease,
    /// Easing of shifting cards.
    #[serde(default)]
    pub shift_ease: Ease,
    /// Scrub lag in seconds.
    #[serde(default)]
    pub scrub_lag_secs: f64,
    /// Also dismiss the last card, giving one segment per card.
    #[serde(default)]
    pub dismiss_last: bool,
    /// Shift behaviour of the remaining cards.
    #[serde(default)]
    pub shift_mode: ShiftMode,
}

fn one() -> f64 {
    1.0
}

impl StackDef {
    /// Validate selectors and axis geometry.
    pub fn validate(&self) -> SceneResult<()> {
        if self.anchor.trim().is_empty() || self.cards.trim().is_empty() {
            return Err(SceneError::validation("stack selectors must be non-empty"));
        }
        if self.peek_slots.is_empty() {
            return Err(SceneError::validation("stack needs at least one peek slot"));
        }
        let slots_ok = self
            .peek_slots
            .iter()
            .all(|s| s.offset_px.is_finite() && s.scale.is_finite());
        if !slots_ok {
            return Err(SceneError::validation("peek slots must be finite"));
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0)
            || !(self.duration.is_finite() && self.duration > 0.0)
        {
            return Err(SceneError::validation(
                "stack spacing and duration must be > 0",
            ));
        }
        if !(self.scrub_lag_secs.is_finite() && self.scrub_lag_secs >= 0.0)
            || !self.start_ratio.is_finite()
        {
            return Err(SceneError::validation("stack timing values must be finite"));
        }
        Ok(())
    }
}

/// A card moving between two peek slots during a segment.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PeekMove {
    /// Moving card.
    pub card: TargetId,
    /// Depth the card leaves.
    pub from_slot: usize,
    /// Depth the card arrives at.
    pub to_slot: usize,
}

/// One dismissal segment on the stack axis.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StackStep {
    /// Depth index of the dismissed card.
    pub card_index: usize,
    /// Dismissed card.
    pub card: TargetId,
    /// Offset the dismissed card travels to.
    pub exit_offset: f64,
    /// Axis position where the segment starts.
    pub start: f64,
    /// Axis position where the segment completes.
    pub end: f64,
    /// Cards shifting shallower during the segment, by nominal slot.
    pub peek_moves: Vec<PeekMove>,
}

/// Sequential card dismissal, pinned on its own scroll range.
///
/// Card values are a pure function of the axis position, so scrubbing backward replays
/// every segment in reverse.
#[derive(Clone, Debug)]
pub struct StackedRevealTimeline {
    cards: Vec<TargetId>,
    slots: Vec<PeekSlot>,
    steps: Vec<StackStep>,
    axis_len: f64,
    exit_offset: f64,
    spacing: f64,
    duration: f64,
    exit_ease: Ease,
    shift_ease: Ease,
    shift_mode: ShiftMode,
    start_px: f64,
    distance: f64,
    scrub: Scrub,
    state: RegionState,
}

impl StackedRevealTimeline {
    /// Bind `def` for the current viewport.
    ///
    /// Returns `None` when the stack is skipped: missing elements, a class that disables
    /// it, or a viewport shorter than the class minimum. Skipped cards are cleared back to
    /// plain default values.
    pub fn build(def: &StackDef, ctx: &BuildCtx<'_>, scene: &mut SceneState) -> Option<Self> {
        let mut cards = ctx.lookup.resolve(&def.cards);
        for id in &cards {
            scene.register(*id, ctx.lookup);
        }
        let anchor = ctx.lookup.resolve(&def.anchor).first().copied();
        let skip_reason = if anchor.is_none() || cards.is_empty() {
            Some("missing elements")
        } else if !ctx.params.stacked_reveal {
            Some("disabled for class")
        } else if ctx.viewport.height < ctx.params.min_height_for_stacked_reveal {
            Some("viewport too short")
        } else {
            None
        };
        if let Some(reason) = skip_reason {
            scene.reset(&cards);
            tracing::debug!(class = ?ctx.class, reason, "stacked reveal skipped");
            return None;
        }
        let anchor = anchor?;

        cards.reverse();
        let n = cards.len();
        let segments = if def.dismiss_last { n } else { n - 1 };
        let exit_offset = def.exit_offset.resolve(ctx);
        let axis_len = if segments == 0 {
            0.0
        } else {
            (segments - 1) as f64 * def.spacing + def.duration
        };

        let steps = (0..segments)
            .map(|s| {
                let peek_moves = match def.shift_mode {
                    ShiftMode::Cascade => (s + 1..n)
                        .map(|k| PeekMove {
                            card: cards[k],
                            from_slot: k - s,
                            to_slot: k - s - 1,
                        })
                        .collect(),
                    ShiftMode::NextOnly => (s + 1..n)
                        .take(1)
                        .map(|k| PeekMove {
                            card: cards[k],
                            from_slot: k,
                            to_slot: 0,
                        })
                        .collect(),
                };
                StackStep {
                    card_index: s,
                    card: cards[s],
                    exit_offset,
                    start: s as f64 * def.spacing,
                    end: s as f64 * def.spacing + def.duration,
                    peek_moves,
                }
            })
            .collect();

        let anchor_top = ctx.lookup.offset_top(anchor).unwrap_or(0.0);
        let timeline = Self {
            cards,
            slots: def.peek_slots.clone(),
            steps,
            axis_len,
            exit_offset,
            spacing: def.spacing,
            duration: def.duration,
            exit_ease: def.exit_ease,
            shift_ease: def.shift_ease,
            shift_mode: def.shift_mode,
            start_px: anchor_top - ctx.viewport.height * def.start_ratio,
            distance: n as f64 * ctx.params.per_card_scroll_unit,
            scrub: Scrub::new(def.scrub_lag_secs),
            state: RegionState::BeforeEnter,
        };
        timeline.evaluate_at(0.0, scene);
        tracing::debug!(
            cards = n,
            segments,
            start_px = timeline.start_px,
            distance = timeline.distance,
            "stacked reveal built"
        );
        Some(timeline)
    }

    /// Cards in dismissal order.
    pub fn cards(&self) -> &[TargetId] {
        &self.cards
    }

    /// Segments in axis order.
    pub fn steps(&self) -> &[StackStep] {
        &self.steps
    }

    /// Total axis length.
    pub fn axis_len(&self) -> f64 {
        self.axis_len
    }

    /// Smoothed axis position.
    pub fn position(&self) -> f64 {
        self.scrub.rendered()
    }

    /// Pin state of the stack's own scroll range.
    pub fn state(&self) -> RegionState {
        self.state
    }

    /// Pixel range `[start, end]` of the pinned stack.
    pub fn range_px(&self) -> (f64, f64) {
        (self.start_px, self.start_px + self.distance)
    }

    /// Feed one scroll offset.
    pub fn sample(&mut self, offset: f64, now: Duration, scene: &mut SceneState) {
        let raw = (offset - self.start_px) / self.distance;
        if raw.is_nan() {
            return;
        }
        let (next, transitions) = step(self.state, raw);
        if !transitions.is_empty() {
            tracing::debug!(?transitions, "stacked reveal transition");
        }
        self.state = next;
        self.scrub.set_target(clamp01(raw) * self.axis_len, now);
        self.evaluate_at(self.scrub.rendered(), scene);
    }

    /// Advance scrub smoothing to `now`.
    pub fn advance(&mut self, now: Duration, scene: &mut SceneState) {
        self.scrub.advance(now);
        self.evaluate_at(self.scrub.rendered(), scene);
    }

    /// Snap the smoothed position onto the last sample.
    pub fn settle(&mut self, scene: &mut SceneState) {
        self.scrub.settle();
        self.evaluate_at(self.scrub.rendered(), scene);
    }

    /// Write every card's values at axis position `pos`.
    pub fn evaluate_at(&self, pos: f64, scene: &mut SceneState) {
        for (k, id) in self.cards.iter().enumerate() {
            let (offset, scale, opacity) = self.card_at(k, pos);
            scene.write(*id, Property::TranslateY, offset);
            scene.write(*id, Property::Scale, scale);
            scene.write(*id, Property::Opacity, opacity);
        }
    }

    fn slot(&self, depth: usize) -> PeekSlot {
        self.slots
            .get(depth)
            .or(self.slots.last())
            .copied()
            .unwrap_or(PeekSlot::new(0.0, 1.0))
    }

    fn started(&self, segment: usize, pos: f64) -> bool {
        segment < self.steps.len() && pos > segment as f64 * self.spacing
    }

    fn local(&self, segment: usize, pos: f64) -> f64 {
        clamp01((pos - segment as f64 * self.spacing) / self.duration)
    }

    /// Segments that move card `k`, in axis order: its shifts, then its own exit.
    fn segments_of(&self, k: usize) -> impl Iterator<Item = usize> + use<> {
        let first = match self.shift_mode {
            ShiftMode::Cascade => 0,
            ShiftMode::NextOnly => k.saturating_sub(1),
        };
        let segments = self.steps.len();
        (first..=k).filter(move |&s| s < segments)
    }

    /// Where segment `s` takes card `k`, and with which easing.
    fn segment_target(&self, k: usize, s: usize) -> ((f64, f64, f64), Ease) {
        if s == k {
            return ((self.exit_offset, 1.0, 0.0), self.exit_ease);
        }
        let to = match self.shift_mode {
            ShiftMode::Cascade => k - s - 1,
            ShiftMode::NextOnly => 0,
        };
        let slot = self.slot(to);
        ((slot.offset_px, slot.scale, 1.0), self.shift_ease)
    }

    fn blend(&self, k: usize, s: usize, from: (f64, f64, f64), pos: f64) -> (f64, f64, f64) {
        let (to, ease) = self.segment_target(k, s);
        let t = ease.apply(self.local(s, pos));
        (
            lerp(from.0, to.0, t),
            lerp(from.1, to.1, t),
            lerp(from.2, to.2, t),
        )
    }

    // A segment starts from the card's values at its own start position, so overlapping
    // segments hand over without a jump.
    fn card_at(&self, k: usize, pos: f64) -> (f64, f64, f64) {
        let rest = self.slot(k);
        let mut from = (rest.offset_px, rest.scale, 1.0);
        let mut running = None;
        for s in self.segments_of(k) {
            if !self.started(s, pos) {
                break;
            }
            if let Some(prev) = running {
                from = self.blend(k, prev, from, s as f64 * self.spacing);
            }
            running = Some(s);
        }
        match running {
            Some(s) => self.blend(k, s, from, pos),
            None => from,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stack/timeline.rs"]
mod tests;
