use super::*;
use crate::animation::ease::Ease;
use crate::foundation::core::Viewport;
use crate::idle::loops::IdleLoopSpec;
use crate::responsive::classify::{ClassParams, ViewportClass};
use crate::scene::lookup::StaticLookup;
use crate::scene::target::Property;
use crate::timeline::phase::PhaseWindow;

fn params() -> ClassParams {
    ClassParams {
        virtual_scroll_distance: 1000.0,
        zoom_depth: 3400.0,
        zoom_scale: 2.6,
        vertical_shift: 160.0,
        per_card_scroll_unit: 340.0,
        min_height_for_stacked_reveal: 600.0,
        idle_loops: true,
        stacked_reveal: true,
    }
}

fn row(selector: &str, property: Property, window: PhaseWindow, from: f64, to: f64) -> TrackDef {
    TrackDef {
        selector: selector.to_owned(),
        property,
        window,
        from: from.into(),
        to: to.into(),
        ease: Ease::Linear,
        spread: 0.0,
        classes: None,
    }
}

fn def() -> RegionDef {
    RegionDef {
        anchor: ".intro".to_owned(),
        layer: Some(".hero".to_owned()),
        start_ratio: 0.0,
        distance: ValueDef::param(ClassParam::VirtualScrollDistance),
        scrub_lag_secs: 0.0,
        pinned_z_index: 10,
        demoted_z_index: 0,
        rest: vec![BaselineEntry::new(
            ".navbar",
            PropertyPatch {
                opacity: Some(0.0),
                y: Some(-30.0),
                ..PropertyPatch::default()
            },
        )],
        enter: vec![BaselineEntry::new(
            ".hero",
            PropertyPatch {
                visible: Some(true),
                ..PropertyPatch::default()
            },
        )],
        terminal: vec![
            BaselineEntry::new(
                ".hero",
                PropertyPatch {
                    visible: Some(false),
                    ..PropertyPatch::default()
                },
            ),
            BaselineEntry::new(
                ".navbar",
                PropertyPatch {
                    opacity: Some(1.0),
                    y: Some(0.0),
                    ..PropertyPatch::default()
                },
            ),
        ],
        tracks: vec![
            row(".logo", Property::Opacity, PhaseWindow::new(0.48, 0.70), 1.0, 0.0),
            row(".logo", Property::Scale, PhaseWindow::full(), 1.0, 3.6),
            row(".navbar", Property::Opacity, PhaseWindow::new(0.10, 0.25), 0.0, 1.0),
            row(".navbar", Property::TranslateY, PhaseWindow::new(0.10, 0.25), -30.0, 0.0),
            row(".intro-float", Property::TranslateY, PhaseWindow::new(0.0, 0.18), 0.0, -900.0),
        ],
    }
}

fn idle_spec() -> IdleLoopSpec {
    IdleLoopSpec {
        selector: ".intro-float".to_owned(),
        amplitude_y: -14.0,
        amplitude_rotation_deg: 2.0,
        base_period_secs: 2.4,
        period_step_secs: 0.2,
        delay_step_secs: 0.22,
        ease: Ease::InOutSine,
    }
}

struct Fixture {
    lookup: StaticLookup,
    params: ClassParams,
    logo: TargetId,
    nav: TargetId,
    hero: TargetId,
    floats: [TargetId; 2],
}

impl Fixture {
    fn new() -> Self {
        let mut lookup = StaticLookup::new();
        lookup.element("intro", &[".intro"], 1000.0);
        let logo = lookup.element("logo", &[".logo"], 1000.0);
        let hero = lookup.element("hero", &[".hero"], 1000.0);
        let nav = lookup.element("navbar", &[".navbar"], 1000.0);
        let f0 = lookup.element("float-0", &[".intro-float"], 1000.0);
        let f1 = lookup.element("float-1", &[".intro-float"], 1000.0);
        Self {
            lookup,
            params: params(),
            logo,
            nav,
            hero,
            floats: [f0, f1],
        }
    }

    fn ctx(&self) -> BuildCtx<'_> {
        BuildCtx {
            lookup: &self.lookup,
            viewport: Viewport::new(1300.0, 800.0).unwrap(),
            class: ViewportClass::Desktop,
            params: &self.params,
        }
    }

    fn mount(&self) -> (ScrollRegion, SceneState, IdleLoopManager) {
        let mut scene = SceneState::new();
        let region = ScrollRegion::bind(&def(), &self.ctx(), &mut scene);
        let mut idle = IdleLoopManager::bind(Some(&idle_spec()), &self.ctx());
        idle.create(&scene, Duration::ZERO);
        (region, scene, idle)
    }
}

fn at(progress: f64) -> f64 {
    1000.0 + progress * 1000.0
}

#[test]
fn bind_applies_rest_baseline() {
    let fx = Fixture::new();
    let (region, scene, _) = fx.mount();
    assert!(region.is_bound());
    assert_eq!(region.range_px(), Some((1000.0, 2000.0)));
    assert_eq!(region.state(), RegionState::BeforeEnter);

    let nav = scene.get(fx.nav).unwrap();
    assert_eq!(nav.opacity, 0.0);
    assert_eq!(nav.translate.y, -30.0);
    let logo = scene.get(fx.logo).unwrap();
    assert_eq!((logo.opacity, logo.scale), (1.0, 1.0));
}

#[test]
fn missing_anchor_is_a_silent_no_op() {
    let mut fx = Fixture::new();
    fx.lookup.remove_selector(".intro");
    let mut scene = SceneState::new();
    let mut idle = IdleLoopManager::default();
    let mut region = ScrollRegion::bind(&def(), &fx.ctx(), &mut scene);
    assert!(!region.is_bound());
    assert!(scene.is_empty());
    assert!(region.sample(5000.0, Duration::ZERO, &mut scene, &mut idle).is_empty());
    assert_eq!(region.state(), RegionState::BeforeEnter);
}

#[test]
fn enter_pins_layer_and_cancels_idle() {
    let fx = Fixture::new();
    let (mut region, mut scene, mut idle) = fx.mount();
    assert!(idle.is_active());

    let t = region.sample(at(0.01), Duration::ZERO, &mut scene, &mut idle);
    assert_eq!(t.as_slice(), &[Transition::Enter]);
    assert_eq!(region.state(), RegionState::Pinned);
    assert!(!idle.is_active());
    assert_eq!(scene.get(fx.hero).unwrap().z_index, 10);
    assert!(scene.get(fx.hero).unwrap().visible);
}

#[test]
fn window_complete_means_fully_revealed() {
    let fx = Fixture::new();
    let (mut region, mut scene, mut idle) = fx.mount();
    region.sample(at(0.5), Duration::ZERO, &mut scene, &mut idle);
    let nav = scene.get(fx.nav).unwrap();
    assert_eq!(nav.opacity, 1.0);
    assert_eq!(nav.translate.y, 0.0);
}

#[test]
fn leave_locks_terminal_values_and_demotes() {
    let fx = Fixture::new();
    let (mut region, mut scene, mut idle) = fx.mount();
    region.sample(at(0.3), Duration::ZERO, &mut scene, &mut idle);
    let t = region.sample(at(1.2), Duration::ZERO, &mut scene, &mut idle);
    assert_eq!(t.as_slice(), &[Transition::Leave]);
    assert_eq!(region.progress(), 1.0);

    let logo = scene.get(fx.logo).unwrap();
    assert_eq!(logo.opacity, 0.0);
    assert!((logo.scale - 3.6).abs() < 1e-12);
    let hero = scene.get(fx.hero).unwrap();
    assert_eq!(hero.z_index, 0);
    assert!(!hero.visible);
}

#[test]
fn enter_back_restores_enter_baseline_before_interpolating() {
    let fx = Fixture::new();
    let (mut region, mut scene, mut idle) = fx.mount();
    region.sample(at(1.5), Duration::ZERO, &mut scene, &mut idle);
    assert_eq!(region.state(), RegionState::AfterLeave);

    let t = region.sample(at(1.0), Duration::ZERO, &mut scene, &mut idle);
    assert_eq!(t.as_slice(), &[Transition::EnterBack]);
    let hero = scene.get(fx.hero).unwrap();
    assert!(hero.visible);
    assert_eq!(hero.z_index, 10);

    region.sample(at(0.5), Duration::ZERO, &mut scene, &mut idle);
    let logo = scene.get(fx.logo).unwrap();
    assert!((logo.opacity - (1.0 - 0.02 / 0.22)).abs() < 1e-9);
    assert!((logo.scale - 2.3).abs() < 1e-9);
    assert!(!idle.is_active());
}

#[test]
fn leave_back_restores_rest_and_revives_idle() {
    let fx = Fixture::new();
    let (mut region, mut scene, mut idle) = fx.mount();
    let rest = scene.snapshot();

    for p in [0.2, 0.6, 1.0, 0.6, 0.2] {
        region.sample(at(p), Duration::ZERO, &mut scene, &mut idle);
    }
    assert!(!idle.is_active());
    let t = region.sample(at(0.0), Duration::from_secs(3), &mut scene, &mut idle);
    assert_eq!(t.as_slice(), &[Transition::LeaveBack]);
    assert!(idle.is_active());
    assert!(fx.floats.iter().all(|id| idle.has_handle(*id)));
    assert!(scene.snapshot().approx_eq(&rest, 1e-9));
}

#[test]
fn scrub_lag_smooths_and_settles() {
    let fx = Fixture::new();
    let mut scene = SceneState::new();
    let mut idle = IdleLoopManager::default();
    let lagged = RegionDef {
        scrub_lag_secs: 0.6,
        ..def()
    };
    let mut region = ScrollRegion::bind(&lagged, &fx.ctx(), &mut scene);

    region.sample(at(0.0001), Duration::ZERO, &mut scene, &mut idle);
    region.sample(at(0.8), Duration::from_millis(100), &mut scene, &mut idle);
    assert!(region.progress() > 0.0 && region.progress() < 0.8);
    assert_eq!(region.target_progress(), 0.8);

    let before = region.progress();
    region.advance(Duration::from_millis(400), &mut scene);
    assert!(region.progress() > before);

    region.settle(&mut scene);
    assert_eq!(region.progress(), 0.8);
    assert!((scene.get(fx.logo).unwrap().scale - (1.0 + 2.6 * 0.8)).abs() < 1e-9);
}

#[test]
fn jump_past_region_chains_enter_and_leave() {
    let fx = Fixture::new();
    let (mut region, mut scene, mut idle) = fx.mount();
    let t = region.sample(at(3.0), Duration::ZERO, &mut scene, &mut idle);
    assert_eq!(t.as_slice(), &[Transition::Enter, Transition::Leave]);
    assert!(!idle.is_active());
    assert_eq!(scene.get(fx.nav).unwrap().opacity, 1.0);
}

#[test]
fn definition_validation() {
    assert!(def().validate().is_ok());
    let bad = RegionDef {
        distance: ValueDef::Const(0.0),
        ..def()
    };
    assert!(bad.validate().is_err());
    let bad = RegionDef {
        scrub_lag_secs: -1.0,
        ..def()
    };
    assert!(bad.validate().is_err());
    let mut bad = def();
    bad.rest[0].patch.opacity = Some(f64::NAN);
    assert!(bad.validate().is_err());
}
