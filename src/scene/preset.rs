//! Built-in "portal intro" scene: a logo zooms toward the camera like a portal while
//! decorative floats fly off, the hero content assembles behind it, and a stack of
//! service cards is dismissed one by one further down the page.

use crate::animation::ease::Ease;
use crate::foundation::core::Rgba;
use crate::idle::loops::IdleLoopSpec;
use crate::region::scroll_region::{BaselineEntry, RegionDef};
use crate::responsive::classify::{
    ClassParam, ClassParams, ClassTable, ViewportClass, WidthClassifier,
};
use crate::scene::lookup::StaticLookup;
use crate::scene::model::{SceneConfig, SceneDocument};
use crate::scene::target::{Property, PropertyPatch};
use crate::stack::timeline::{PeekSlot, ShiftMode, StackDef};
use crate::timeline::dsl::{PhaseTableBuilder, TrackBuilder};
use crate::timeline::track::ValueDef;

const INTRO: &str = ".intro";
const LOGO: &str = ".logo-wrapper";
const FLOAT: &str = ".intro-float";
const FLOAT_UP: &str = ".intro-float-up";
const FLOAT_DOWN: &str = ".intro-float-down";
const HERO: &str = ".hero-section";
const NAV: &str = ".navbar";
const PILL: &str = ".tag-pill";
const TITLE: &str = ".hero-title";
const COPY: &str = ".hero-copy";
const HERO_FLOAT: &str = ".hero-float";
const STACK: &str = ".service-stack-scene";
const CARD: &str = ".service-card";

const DESKTOP: &[ViewportClass] = &[ViewportClass::Desktop];

fn patch() -> PropertyPatch {
    PropertyPatch::default()
}

fn entry(selector: &str, patch: PropertyPatch) -> BaselineEntry {
    BaselineEntry::new(selector, patch)
}

/// Hidden hero content, offset by `y`.
fn hidden(y: f64) -> PropertyPatch {
    PropertyPatch {
        opacity: Some(0.0),
        y: Some(y),
        ..patch()
    }
}

fn shown() -> PropertyPatch {
    PropertyPatch {
        opacity: Some(1.0),
        y: Some(0.0),
        ..patch()
    }
}

impl ClassTable {
    /// Tuning of the portal intro for each viewport class.
    pub fn portal_intro() -> Self {
        let base = ClassParams {
            virtual_scroll_distance: 2400.0,
            zoom_depth: 3400.0,
            zoom_scale: 2.6,
            vertical_shift: 160.0,
            per_card_scroll_unit: 340.0,
            min_height_for_stacked_reveal: 560.0,
            idle_loops: true,
            stacked_reveal: true,
        };
        Self {
            phone: ClassParams {
                virtual_scroll_distance: 1400.0,
                zoom_depth: 1800.0,
                zoom_scale: 1.8,
                vertical_shift: 80.0,
                per_card_scroll_unit: 280.0,
                idle_loops: false,
                stacked_reveal: false,
                ..base.clone()
            },
            mobile: ClassParams {
                virtual_scroll_distance: 1600.0,
                zoom_depth: 2200.0,
                zoom_scale: 2.0,
                vertical_shift: 100.0,
                per_card_scroll_unit: 280.0,
                idle_loops: false,
                stacked_reveal: false,
                ..base.clone()
            },
            tablet: ClassParams {
                virtual_scroll_distance: 2000.0,
                zoom_depth: 2800.0,
                zoom_scale: 2.3,
                vertical_shift: 120.0,
                per_card_scroll_unit: 280.0,
                idle_loops: false,
                ..base.clone()
            },
            desktop: base,
        }
    }
}

fn intro_tracks() -> Vec<crate::timeline::track::TrackDef> {
    PhaseTableBuilder::new()
        // Background colour drains before the overlay itself fades.
        .row(
            TrackBuilder::new(INTRO, Property::BackgroundAlpha)
                .window(0.40, 0.55)
                .values(1.0, 0.0),
        )
        .row(
            TrackBuilder::new(FLOAT_UP, Property::TranslateY)
                .window(0.0, 0.18)
                .stagger(0.01, 0.0)
                .values(0.0, ValueDef::Vh(-120.0))
                .spread(0.12)
                .only(DESKTOP),
        )
        .row(
            TrackBuilder::new(FLOAT_UP, Property::Opacity)
                .window(0.0, 0.18)
                .stagger(0.01, 0.0)
                .values(1.0, -0.3)
                .only(DESKTOP),
        )
        .row(
            TrackBuilder::new(FLOAT_UP, Property::Scale)
                .window(0.0, 0.18)
                .stagger(0.01, 0.0)
                .values(1.0, 0.88)
                .only(DESKTOP),
        )
        .row(
            TrackBuilder::new(FLOAT_UP, Property::RotationDeg)
                .window(0.0, 0.18)
                .stagger(0.01, 0.0)
                .values(0.0, -6.0)
                .spread(0.5)
                .only(DESKTOP),
        )
        .row(
            TrackBuilder::new(FLOAT_DOWN, Property::TranslateY)
                .window(0.02, 0.22)
                .stagger(0.02, 0.0)
                .values(0.0, ValueDef::Vh(-130.0))
                .spread(0.10)
                .only(DESKTOP),
        )
        .row(
            TrackBuilder::new(FLOAT_DOWN, Property::Opacity)
                .window(0.02, 0.22)
                .stagger(0.02, 0.0)
                .values(1.0, -0.2)
                .only(DESKTOP),
        )
        .row(
            TrackBuilder::new(FLOAT_DOWN, Property::Scale)
                .window(0.02, 0.22)
                .stagger(0.02, 0.0)
                .values(1.0, 0.90)
                .only(DESKTOP),
        )
        .row(
            TrackBuilder::new(FLOAT_DOWN, Property::RotationDeg)
                .window(0.02, 0.22)
                .stagger(0.02, 0.0)
                .values(0.0, 5.0)
                .spread(0.6)
                .only(DESKTOP),
        )
        .row(
            TrackBuilder::new(LOGO, Property::TranslateZ)
                .values(0.0, ValueDef::param(ClassParam::ZoomDepth)),
        )
        .row(TrackBuilder::new(LOGO, Property::Scale).values(
            1.0,
            ValueDef::Param {
                key: ClassParam::ZoomScale,
                factor: 1.0,
                offset: 1.0,
            },
        ))
        .row(
            TrackBuilder::new(LOGO, Property::TranslateY)
                .values(0.0, ValueDef::param(ClassParam::VerticalShift)),
        )
        .row(
            TrackBuilder::new(LOGO, Property::Opacity)
                .window(0.48, 0.70)
                .values(1.0, 0.0),
        )
        .row(
            TrackBuilder::new(INTRO, Property::Opacity)
                .window(0.68, 0.80)
                .values(1.0, 0.0),
        )
        .row(TrackBuilder::new(NAV, Property::Opacity).window(0.10, 0.25))
        .row(
            TrackBuilder::new(NAV, Property::TranslateY)
                .window(0.10, 0.25)
                .values(-30.0, 0.0),
        )
        .row(TrackBuilder::new(PILL, Property::Opacity).window(0.16, 0.30))
        .row(
            TrackBuilder::new(PILL, Property::TranslateY)
                .window(0.16, 0.30)
                .values(40.0, 0.0),
        )
        .row(TrackBuilder::new(TITLE, Property::Opacity).window(0.22, 0.36))
        .row(
            TrackBuilder::new(TITLE, Property::TranslateY)
                .window(0.22, 0.36)
                .values(50.0, 0.0),
        )
        .row(TrackBuilder::new(COPY, Property::Opacity).window(0.28, 0.42))
        .row(
            TrackBuilder::new(COPY, Property::TranslateY)
                .window(0.28, 0.42)
                .values(40.0, 0.0),
        )
        .row(
            TrackBuilder::new(HERO_FLOAT, Property::Opacity)
                .window(0.34, 0.48)
                .stagger(0.02, 0.01)
                .only(DESKTOP),
        )
        .row(
            TrackBuilder::new(HERO_FLOAT, Property::TranslateY)
                .window(0.34, 0.48)
                .stagger(0.02, 0.01)
                .values(30.0, 0.0)
                .only(DESKTOP),
        )
        .row(
            TrackBuilder::new(HERO_FLOAT, Property::Scale)
                .window(0.34, 0.48)
                .stagger(0.02, 0.01)
                .values(0.85, 1.0)
                .only(DESKTOP),
        )
        .into_rows()
}

fn intro_region() -> RegionDef {
    RegionDef {
        anchor: INTRO.to_owned(),
        layer: Some(HERO.to_owned()),
        start_ratio: 0.0,
        distance: ValueDef::param(ClassParam::VirtualScrollDistance),
        scrub_lag_secs: 0.6,
        pinned_z_index: 10,
        demoted_z_index: 0,
        rest: vec![
            entry(
                INTRO,
                PropertyPatch {
                    opacity: Some(1.0),
                    background_alpha: Some(1.0),
                    ..patch()
                },
            ),
            entry(
                FLOAT,
                PropertyPatch {
                    opacity: Some(1.0),
                    y: Some(0.0),
                    scale: Some(1.0),
                    rotation_deg: Some(0.0),
                    ..patch()
                },
            ),
            entry(
                LOGO,
                PropertyPatch {
                    opacity: Some(1.0),
                    ..patch()
                },
            ),
            entry(
                HERO,
                PropertyPatch {
                    opacity: Some(1.0),
                    blur_px: Some(0.0),
                    scale: Some(1.0),
                    visible: Some(true),
                    ..patch()
                },
            ),
            entry(NAV, hidden(-30.0)),
            entry(PILL, hidden(40.0)),
            entry(TITLE, hidden(50.0)),
            entry(COPY, hidden(40.0)),
            entry(
                HERO_FLOAT,
                PropertyPatch {
                    scale: Some(0.85),
                    ..hidden(30.0)
                },
            ),
        ],
        enter: vec![entry(
            HERO,
            PropertyPatch {
                visible: Some(true),
                ..patch()
            },
        )],
        terminal: vec![
            entry(
                HERO,
                PropertyPatch {
                    visible: Some(false),
                    ..patch()
                },
            ),
            entry(NAV, shown()),
            entry(PILL, shown()),
            entry(TITLE, shown()),
            entry(COPY, shown()),
            entry(
                HERO_FLOAT,
                PropertyPatch {
                    scale: Some(1.0),
                    ..shown()
                },
            ),
        ],
        tracks: intro_tracks(),
    }
}

fn service_stack() -> StackDef {
    StackDef {
        anchor: STACK.to_owned(),
        cards: CARD.to_owned(),
        peek_slots: vec![
            PeekSlot::new(0.0, 1.0),
            PeekSlot::new(18.0, 0.97),
            PeekSlot::new(36.0, 0.94),
            PeekSlot::new(54.0, 0.91),
        ],
        exit_offset: ValueDef::Vh(-110.0),
        start_ratio: 0.15,
        spacing: 1.2,
        duration: 1.0,
        exit_ease: Ease::InQuad,
        shift_ease: Ease::OutQuad,
        scrub_lag_secs: 1.0,
        dismiss_last: true,
        shift_mode: ShiftMode::Cascade,
    }
}

impl SceneConfig {
    /// The built-in portal intro scene.
    pub fn portal_intro() -> Self {
        Self {
            region: intro_region(),
            stack: Some(service_stack()),
            idle: Some(IdleLoopSpec {
                selector: FLOAT.to_owned(),
                amplitude_y: -14.0,
                amplitude_rotation_deg: 2.0,
                base_period_secs: 2.4,
                period_step_secs: 0.2,
                delay_step_secs: 0.22,
                ease: Ease::InOutSine,
            }),
            breakpoints: vec![480.0, 768.0, 1024.0, 1200.0, 1400.0],
            classifier: WidthClassifier::default(),
            classes: ClassTable::portal_intro(),
            debounce_ms: 250,
            size_threshold_px: 150.0,
        }
    }
}

impl StaticLookup {
    /// Element table matching [`SceneConfig::portal_intro`].
    pub fn portal_intro() -> Self {
        let mut lookup = Self::new();
        let intro = lookup.element("intro", &[INTRO], 0.0);
        lookup.with_background(intro, Rgba::opaque(135, 51, 232));
        lookup.element("logo", &[LOGO], 0.0);
        for i in 0..4 {
            lookup.element(format!("float-up-{i}"), &[FLOAT, FLOAT_UP], 0.0);
        }
        for i in 0..3 {
            lookup.element(format!("float-down-{i}"), &[FLOAT, FLOAT_DOWN], 0.0);
        }
        lookup.element("hero", &[HERO], 0.0);
        lookup.element("navbar", &[NAV], 0.0);
        lookup.element("tag-pill", &[PILL], 0.0);
        lookup.element("hero-title", &[TITLE], 0.0);
        lookup.element("hero-copy", &[COPY], 0.0);
        for i in 0..3 {
            lookup.element(format!("hero-float-{i}"), &[HERO_FLOAT], 0.0);
        }
        lookup.element("service-stack", &[STACK], 3600.0);
        for i in 0..4 {
            lookup.element(format!("service-card-{i}"), &[CARD], 3600.0);
        }
        lookup
    }
}

impl SceneDocument {
    /// The built-in scene with its element table.
    pub fn portal_intro() -> Self {
        Self {
            scene: SceneConfig::portal_intro(),
            elements: StaticLookup::portal_intro(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/preset.rs"]
mod tests;
