use super::*;

#[test]
fn stagger_shifts_bounds_per_index() {
    let w = PhaseWindow::new(0.34, 0.48).staggered(0.02, 0.01);
    assert_eq!(w.bounds(0), (0.34, 0.48));
    let (s, e) = w.bounds(2);
    assert!((s - 0.38).abs() < 1e-12);
    assert!((e - 0.50).abs() < 1e-12);
}

#[test]
fn revealed_after_window() {
    let w = PhaseWindow::new(0.10, 0.25);
    assert_eq!(w.local(0.5, 0), 1.0);
    assert_eq!(w.local(0.0, 0), 0.0);
    assert!((w.local(0.175, 0) - 0.5).abs() < 1e-9);
}

#[test]
fn staggered_start_past_end_degenerates_to_step() {
    // Index 20 pushes start to 0.2 while end stays at 0.18.
    let w = PhaseWindow::new(0.0, 0.18).staggered(0.01, 0.0);
    assert_eq!(w.local(0.0, 20), 1.0);
}

#[test]
fn validate_rejects_nan() {
    assert!(PhaseWindow::new(f64::NAN, 1.0).validate().is_err());
    assert!(
        PhaseWindow::new(0.0, 1.0)
            .staggered(f64::INFINITY, 0.0)
            .validate()
            .is_err()
    );
    assert!(PhaseWindow::new(0.5, 0.5).validate().is_ok());
}

#[test]
fn json_omits_missing_stagger() {
    let s = serde_json::to_string(&PhaseWindow::full()).unwrap();
    assert_eq!(s, r#"{"start":0.0,"end":1.0}"#);
}
