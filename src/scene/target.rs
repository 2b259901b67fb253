use crate::foundation::core::{Affine, Rgba, TargetId, Vec2};
use crate::foundation::math::clamp01;

/// Scalar visual property that phase tables and idle loops can write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Horizontal translation in pixels.
    TranslateX,
    /// Vertical translation in pixels.
    TranslateY,
    /// Depth translation in pixels (perspective zoom).
    TranslateZ,
    /// Uniform scale multiplier.
    Scale,
    /// Rotation in degrees.
    RotationDeg,
    /// Blur radius in pixels (never negative).
    BlurPx,
    /// Alpha of the background color in `[0, 1]`.
    BackgroundAlpha,
}

/// The full writable property set of one animated element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PropertySet {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// 2D translation in pixels.
    pub translate: Vec2,
    /// Depth translation in pixels.
    pub translate_z: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Rotation in degrees.
    pub rotation_deg: f64,
    /// Blur radius in pixels.
    pub blur_px: f64,
    /// Background color alpha in `[0, 1]`.
    pub background_alpha: f64,
    /// Stacking order.
    pub z_index: i32,
    /// Whether the element is visible. Hidden elements keep their layout slot.
    pub visible: bool,
}

impl Default for PropertySet {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate: Vec2::ZERO,
            translate_z: 0.0,
            scale: 1.0,
            rotation_deg: 0.0,
            blur_px: 0.0,
            background_alpha: 1.0,
            z_index: 0,
            visible: true,
        }
    }
}

impl PropertySet {
    /// Read a scalar property.
    pub fn get(&self, prop: Property) -> f64 {
        match prop {
            Property::Opacity => self.opacity,
            Property::TranslateX => self.translate.x,
            Property::TranslateY => self.translate.y,
            Property::TranslateZ => self.translate_z,
            Property::Scale => self.scale,
            Property::RotationDeg => self.rotation_deg,
            Property::BlurPx => self.blur_px,
            Property::BackgroundAlpha => self.background_alpha,
        }
    }

    /// Write a scalar property. Opacity-like values are clamped to `[0, 1]`, blur to `>= 0`.
    pub fn set(&mut self, prop: Property, value: f64) {
        match prop {
            Property::Opacity => self.opacity = clamp01(value),
            Property::TranslateX => self.translate.x = value,
            Property::TranslateY => self.translate.y = value,
            Property::TranslateZ => self.translate_z = value,
            Property::Scale => self.scale = value,
            Property::RotationDeg => self.rotation_deg = value,
            Property::BlurPx => self.blur_px = value.max(0.0),
            Property::BackgroundAlpha => self.background_alpha = clamp01(value),
        }
    }

    /// 2D affine for renderers: translate, then rotate, then scale about the element origin.
    ///
    /// Depth translation is left to the renderer's perspective model.
    pub fn affine(&self) -> Affine {
        Affine::translate(self.translate)
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale(self.scale)
    }

    /// Compare every property within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        use crate::foundation::math::approx_eq;
        approx_eq(self.opacity, other.opacity, tol)
            && approx_eq(self.translate.x, other.translate.x, tol)
            && approx_eq(self.translate.y, other.translate.y, tol)
            && approx_eq(self.translate_z, other.translate_z, tol)
            && approx_eq(self.scale, other.scale, tol)
            && approx_eq(self.rotation_deg, other.rotation_deg, tol)
            && approx_eq(self.blur_px, other.blur_px, tol)
            && approx_eq(self.background_alpha, other.background_alpha, tol)
            && self.z_index == other.z_index
            && self.visible == other.visible
    }
}

/// Sparse set of property overrides, used for declared baselines.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PropertyPatch {
    /// Opacity override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Horizontal translation override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Vertical translation override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Depth translation override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// Scale override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Rotation override in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_deg: Option<f64>,
    /// Blur override in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur_px: Option<f64>,
    /// Background alpha override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_alpha: Option<f64>,
    /// Stacking order override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    /// Visibility override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl PropertyPatch {
    /// Write every present field into `props`.
    pub fn apply(&self, props: &mut PropertySet) {
        let scalars = [
            (Property::Opacity, self.opacity),
            (Property::TranslateX, self.x),
            (Property::TranslateY, self.y),
            (Property::TranslateZ, self.z),
            (Property::Scale, self.scale),
            (Property::RotationDeg, self.rotation_deg),
            (Property::BlurPx, self.blur_px),
            (Property::BackgroundAlpha, self.background_alpha),
        ];
        for (prop, v) in scalars {
            if let Some(v) = v {
                props.set(prop, v);
            }
        }
        if let Some(z) = self.z_index {
            props.z_index = z;
        }
        if let Some(v) = self.visible {
            props.visible = v;
        }
    }

    pub(crate) fn scalars(&self) -> impl Iterator<Item = f64> + '_ {
        [
            self.opacity,
            self.x,
            self.y,
            self.z,
            self.scale,
            self.rotation_deg,
            self.blur_px,
            self.background_alpha,
        ]
        .into_iter()
        .flatten()
    }
}

/// An element handle plus its current writable property set.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AnimatedTarget {
    /// Stable element handle.
    pub id: TargetId,
    /// Human-readable label supplied by the lookup layer.
    pub label: String,
    /// Current property values.
    pub props: PropertySet,
    /// Base background color; its alpha is driven by `props.background_alpha`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgba>,
}

impl AnimatedTarget {
    /// Background color with the animated alpha applied.
    pub fn background_color(&self) -> Option<Rgba> {
        self.background
            .map(|c| c.with_alpha(c.a * self.props.background_alpha))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/target.rs"]
mod tests;
