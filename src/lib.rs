//! scrollscene is a headless, deterministic engine for scroll-synchronized scenes.
//!
//! One normalized progress value, derived from the scroll offset, fans out through a
//! declarative phase table into the visual properties of many elements. Around that core:
//!
//! - [`ScrollRegion`] is the explicit pin/enter/leave state machine that owns the progress
//! - [`IdleLoopManager`] runs ambient yoyo loops while the region is not engaged
//! - [`StackedRevealTimeline`] dismisses a stack of cards on its own pinned range
//! - [`ResponsiveRebuildController`] rebuilds everything when the viewport settles on a
//!   size that crosses a breakpoint
//!
//! Rendering is out of scope: every frame produces a [`SceneSnapshot`] that a renderer
//! consumes.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod idle;
pub(crate) mod region;
pub(crate) mod responsive;
pub(crate) mod scene;
pub(crate) mod stack;
pub(crate) mod timeline;

pub use crate::foundation::core::{Affine, Rgba, TargetId, Vec2, Viewport};
pub use crate::foundation::error::{SceneError, SceneResult};
pub use crate::foundation::math::{WINDOW_EPSILON, clamp01, lerp, phase_progress};

pub use crate::animation::ease::Ease;
pub use crate::idle::loops::{IdleAmplitude, IdleLoopHandle, IdleLoopManager, IdleLoopSpec};
pub use crate::region::scroll_region::{BaselineEntry, RegionDef, ScrollRegion};
pub use crate::region::scrub::Scrub;
pub use crate::region::state::{RegionState, Transition, Transitions, step};
pub use crate::responsive::classify::{
    BreakpointClassifier, ClassParam, ClassParams, ClassTable, ViewportClass, WidthClassifier,
    crossed_breakpoint, crossed_min_height, needs_rebuild,
};
pub use crate::responsive::controller::{RebuildOutcome, ResponsiveRebuildController};
pub use crate::scene::lookup::{BuildCtx, ElementDecl, ElementLookup, StaticLookup};
pub use crate::scene::model::{SceneConfig, SceneDocument};
pub use crate::scene::state::{Baseline, SceneSnapshot, SceneState};
pub use crate::scene::target::{AnimatedTarget, Property, PropertyPatch, PropertySet};
pub use crate::stack::timeline::{
    PeekMove, PeekSlot, ShiftMode, StackDef, StackStep, StackedRevealTimeline,
};
pub use crate::timeline::dsl::{PhaseTableBuilder, TrackBuilder};
pub use crate::timeline::phase::{PhaseWindow, Stagger};
pub use crate::timeline::track::{PhaseTable, ResolvedTrack, TrackDef, ValueDef};
