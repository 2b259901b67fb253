use super::*;
use crate::region::state::RegionState;
use crate::scene::lookup::StaticLookup;

fn vp(width: f64, height: f64) -> Viewport {
    Viewport::new(width, height).unwrap()
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn mounted(width: f64) -> ResponsiveRebuildController {
    let mut c =
        ResponsiveRebuildController::new(SceneConfig::portal_intro(), StaticLookup::portal_intro())
            .unwrap();
    c.mount(vp(width, 800.0), Duration::ZERO);
    c
}

#[test]
fn crossing_1024_rebuilds_exactly_once() {
    let mut c = mounted(1300.0);
    assert_eq!(c.class(), Some(ViewportClass::Desktop));

    c.on_resize(vp(1000.0, 800.0), ms(1000));
    assert_eq!(c.poll(ms(1100)), RebuildOutcome::Pending);
    assert_eq!(c.poll(ms(1250)), RebuildOutcome::Rebuilt);
    assert_eq!(c.poll(ms(2000)), RebuildOutcome::Idle);

    assert_eq!(c.rebuild_count(), 1);
    assert_eq!(c.class(), Some(ViewportClass::Tablet));
    assert_eq!(c.viewport(), Some(vp(1000.0, 800.0)));
}

#[test]
fn small_resize_does_not_rebuild() {
    let mut c = mounted(1300.0);
    c.on_resize(vp(1290.0, 800.0), ms(1000));
    assert_eq!(c.poll(ms(1300)), RebuildOutcome::Skipped);
    assert_eq!(c.rebuild_count(), 0);
    assert_eq!(c.viewport(), Some(vp(1300.0, 800.0)));
}

#[test]
fn resize_storm_settles_once() {
    let mut c = mounted(1300.0);
    for (i, width) in [1250.0, 1180.0, 1100.0, 1040.0, 990.0, 1000.0].iter().enumerate() {
        c.on_resize(vp(*width, 800.0), ms(1000 + i as u64 * 40));
        assert_eq!(c.poll(ms(1000 + i as u64 * 40 + 20)), RebuildOutcome::Pending);
    }
    assert_eq!(c.poll(ms(1200 + 250)), RebuildOutcome::Rebuilt);
    assert_eq!(c.rebuild_count(), 1);
    assert_eq!(c.viewport(), Some(vp(1000.0, 800.0)));
}

#[test]
fn height_change_beyond_threshold_rebuilds() {
    let mut c = mounted(1300.0);
    c.on_resize(vp(1300.0, 600.0), ms(0));
    assert_eq!(c.tick(ms(300)), RebuildOutcome::Rebuilt);
    assert_eq!(c.rebuild_count(), 1);
}

#[test]
fn rebuild_replays_last_offset_with_new_tuning() {
    let mut c = mounted(1300.0);
    c.on_scroll(1200.0, ms(0));
    c.settle();
    assert_eq!(c.region().state(), RegionState::Pinned);
    assert!((c.region().progress() - 0.5).abs() < 1e-12);

    c.on_resize(vp(1000.0, 800.0), ms(100));
    c.poll(ms(400));
    assert_eq!(c.region().state(), RegionState::Pinned);
    assert!((c.region().progress() - 0.6).abs() < 1e-12);
    assert!(!c.idle().is_active());
}

#[test]
fn idle_loops_follow_class_and_region_state() {
    let mut c = mounted(1300.0);
    assert!(c.idle().is_active());
    assert_eq!(c.idle().active_targets().count(), 7);

    c.tick(ms(1000));
    let drifting = c.snapshot();
    let float = drifting.by_label("float-up-0").unwrap();
    assert!(float.props.translate.y < 0.0);

    c.on_scroll(10.0, ms(1100));
    assert!(!c.idle().is_active());
    c.on_scroll(0.0, ms(1200));
    assert!(c.idle().is_active());

    c.on_resize(vp(700.0, 800.0), ms(1300));
    c.poll(ms(1600));
    assert_eq!(c.class(), Some(ViewportClass::Mobile));
    assert!(!c.idle().is_active());
    assert!(c.stack().is_none());
}

#[test]
fn scroll_before_mount_is_replayed() {
    let mut c =
        ResponsiveRebuildController::new(SceneConfig::portal_intro(), StaticLookup::portal_intro())
            .unwrap();
    assert!(c.on_scroll(3000.0, ms(0)).is_empty());
    c.on_resize(vp(1300.0, 800.0), ms(0));
    assert_eq!(c.poll(ms(250)), RebuildOutcome::Mounted);
    assert_eq!(c.rebuild_count(), 0);
    assert_eq!(c.region().state(), RegionState::AfterLeave);
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = SceneConfig::portal_intro();
    config.breakpoints = vec![1024.0, 1024.0];
    assert!(ResponsiveRebuildController::new(config, StaticLookup::portal_intro()).is_err());
}

#[test]
fn small_height_change_across_stack_minimum_rebuilds() {
    let mut c =
        ResponsiveRebuildController::new(SceneConfig::portal_intro(), StaticLookup::portal_intro())
            .unwrap();
    c.mount(vp(1300.0, 600.0), Duration::ZERO);
    assert!(c.stack().is_some());

    c.on_resize(vp(1300.0, 545.0), ms(0));
    assert_eq!(c.poll(ms(300)), RebuildOutcome::Rebuilt);
    assert!(c.stack().is_none());

    c.on_resize(vp(1300.0, 590.0), ms(1000));
    assert_eq!(c.poll(ms(1300)), RebuildOutcome::Rebuilt);
    assert!(c.stack().is_some());
    assert_eq!(c.rebuild_count(), 2);
}
