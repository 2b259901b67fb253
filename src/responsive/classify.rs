use crate::foundation::core::Viewport;
use crate::foundation::error::{SceneError, SceneResult};

/// Discrete viewport bucket selecting a parameter set.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ViewportClass {
    /// Width `<= phone_max` (480 by default).
    Phone,
    /// Width `<= mobile_max` (768 by default).
    Mobile,
    /// Width `<= tablet_max` (1024 by default).
    Tablet,
    /// Anything wider.
    Desktop,
}

/// Tuning values for one [`ViewportClass`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClassParams {
    /// Scroll distance consumed by the pinned intro region, in pixels.
    pub virtual_scroll_distance: f64,
    /// Depth the logo travels toward the camera, in pixels.
    pub zoom_depth: f64,
    /// Scale added to the logo at full progress.
    pub zoom_scale: f64,
    /// Vertical drift of the logo at full progress, in pixels.
    pub vertical_shift: f64,
    /// Scroll distance consumed per stacked card, in pixels.
    pub per_card_scroll_unit: f64,
    /// Minimum viewport height for the stacked reveal to pin.
    pub min_height_for_stacked_reveal: f64,
    /// Whether ambient idle loops run in this class.
    #[serde(default = "default_true")]
    pub idle_loops: bool,
    /// Whether the stacked reveal is built in this class.
    #[serde(default = "default_true")]
    pub stacked_reveal: bool,
}

fn default_true() -> bool {
    true
}

/// Numeric class parameter that scene values may reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassParam {
    /// [`ClassParams::virtual_scroll_distance`].
    VirtualScrollDistance,
    /// [`ClassParams::zoom_depth`].
    ZoomDepth,
    /// [`ClassParams::zoom_scale`].
    ZoomScale,
    /// [`ClassParams::vertical_shift`].
    VerticalShift,
    /// [`ClassParams::per_card_scroll_unit`].
    PerCardScrollUnit,
}

impl ClassParams {
    /// Read a numeric parameter.
    pub fn get(&self, key: ClassParam) -> f64 {
        match key {
            ClassParam::VirtualScrollDistance => self.virtual_scroll_distance,
            ClassParam::ZoomDepth => self.zoom_depth,
            ClassParam::ZoomScale => self.zoom_scale,
            ClassParam::VerticalShift => self.vertical_shift,
            ClassParam::PerCardScrollUnit => self.per_card_scroll_unit,
        }
    }

    fn validate(&self, class: ViewportClass) -> SceneResult<()> {
        let finite = [
            self.virtual_scroll_distance,
            self.zoom_depth,
            self.zoom_scale,
            self.vertical_shift,
            self.per_card_scroll_unit,
            self.min_height_for_stacked_reveal,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(SceneError::config(format!(
                "{class:?} params must be finite"
            )));
        }
        if self.virtual_scroll_distance <= 0.0 || self.per_card_scroll_unit <= 0.0 {
            return Err(SceneError::config(format!(
                "{class:?} scroll distances must be > 0"
            )));
        }
        Ok(())
    }
}

/// One parameter set per class.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClassTable {
    /// Phone parameters.
    pub phone: ClassParams,
    /// Mobile parameters.
    pub mobile: ClassParams,
    /// Tablet parameters.
    pub tablet: ClassParams,
    /// Desktop parameters.
    pub desktop: ClassParams,
}

impl ClassTable {
    /// Parameter set for `class`.
    pub fn get(&self, class: ViewportClass) -> &ClassParams {
        match class {
            ViewportClass::Phone => &self.phone,
            ViewportClass::Mobile => &self.mobile,
            ViewportClass::Tablet => &self.tablet,
            ViewportClass::Desktop => &self.desktop,
        }
    }

    /// Validate every parameter set.
    pub fn validate(&self) -> SceneResult<()> {
        for class in [
            ViewportClass::Phone,
            ViewportClass::Mobile,
            ViewportClass::Tablet,
            ViewportClass::Desktop,
        ] {
            self.get(class).validate(class)?;
        }
        Ok(())
    }
}

/// Breakpoint classifier collaborator mapping a width to a class.
pub trait BreakpointClassifier {
    /// Classify a viewport width in pixels.
    fn classify(&self, width: f64) -> ViewportClass;
}

/// Inclusive upper width bounds of the three narrow classes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WidthClassifier {
    /// Largest phone width.
    pub phone_max: f64,
    /// Largest mobile width.
    pub mobile_max: f64,
    /// Largest tablet width.
    pub tablet_max: f64,
}

impl Default for WidthClassifier {
    fn default() -> Self {
        Self {
            phone_max: 480.0,
            mobile_max: 768.0,
            tablet_max: 1024.0,
        }
    }
}

impl WidthClassifier {
    /// Bounds must be strictly increasing.
    pub fn validate(&self) -> SceneResult<()> {
        if !(self.phone_max < self.mobile_max && self.mobile_max < self.tablet_max) {
            return Err(SceneError::config(
                "classifier bounds must be strictly increasing",
            ));
        }
        Ok(())
    }
}

impl BreakpointClassifier for WidthClassifier {
    fn classify(&self, width: f64) -> ViewportClass {
        if width <= self.phone_max {
            ViewportClass::Phone
        } else if width <= self.mobile_max {
            ViewportClass::Mobile
        } else if width <= self.tablet_max {
            ViewportClass::Tablet
        } else {
            ViewportClass::Desktop
        }
    }
}

/// Whether moving from width `old` to `new` crosses any breakpoint.
///
/// A breakpoint `bp` belongs to the narrower side: `old <= bp < new` or `new <= bp < old`.
pub fn crossed_breakpoint(old: f64, new: f64, breakpoints: &[f64]) -> bool {
    breakpoints
        .iter()
        .any(|&bp| (old <= bp && new > bp) || (old > bp && new <= bp))
}

/// Rebuild decision for a settled resize.
///
/// True when a breakpoint is crossed, or when width or height moved by more than
/// `threshold_px`.
pub fn needs_rebuild(old: Viewport, new: Viewport, breakpoints: &[f64], threshold_px: f64) -> bool {
    crossed_breakpoint(old.width, new.width, breakpoints)
        || (new.width - old.width).abs() > threshold_px
        || (new.height - old.height).abs() > threshold_px
}

/// Whether a height change moves the viewport across the stacked reveal minimum.
///
/// The stack is built at `height >= min_height`, so landing exactly on the minimum counts
/// as the tall side.
pub fn crossed_min_height(old: f64, new: f64, min_height: f64) -> bool {
    (old >= min_height) != (new >= min_height)
}

#[cfg(test)]
#[path = "../../tests/unit/responsive/classify.rs"]
mod tests;
