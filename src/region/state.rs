use smallvec::SmallVec;

/// Directional state of a pinned scroll region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionState {
    /// Scroll position is at or above the region start.
    BeforeEnter,
    /// Region is pinned and consuming its virtual distance.
    Pinned,
    /// Scroll position is past the region end.
    AfterLeave,
}

/// Edge taken between two [`RegionState`]s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// `BeforeEnter -> Pinned`.
    Enter,
    /// `Pinned -> AfterLeave`.
    Leave,
    /// `AfterLeave -> Pinned`.
    EnterBack,
    /// `Pinned -> BeforeEnter`.
    LeaveBack,
}

/// Transitions taken by one sample, in order. A jump across the whole region takes two.
pub type Transitions = SmallVec<[Transition; 2]>;

/// Advance `state` for an unclamped progress sample.
///
/// The region is pinned for `0 < raw <= 1`. NaN samples leave the state unchanged.
pub fn step(state: RegionState, raw: f64) -> (RegionState, Transitions) {
    let mut out = Transitions::new();
    if raw.is_nan() {
        return (state, out);
    }
    let mut state = state;
    loop {
        let next = match state {
            RegionState::BeforeEnter if raw > 0.0 => Some((RegionState::Pinned, Transition::Enter)),
            RegionState::Pinned if raw > 1.0 => Some((RegionState::AfterLeave, Transition::Leave)),
            RegionState::Pinned if raw <= 0.0 => {
                Some((RegionState::BeforeEnter, Transition::LeaveBack))
            }
            RegionState::AfterLeave if raw <= 1.0 => {
                Some((RegionState::Pinned, Transition::EnterBack))
            }
            _ => None,
        };
        match next {
            Some((s, t)) => {
                state = s;
                out.push(t);
            }
            None => return (state, out),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/region/state.rs"]
mod tests;
