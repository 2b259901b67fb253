use super::*;

#[test]
fn viewport_rejects_degenerate_sizes() {
    assert!(Viewport::new(1280.0, 800.0).is_ok());
    assert!(Viewport::new(0.0, 800.0).is_err());
    assert!(Viewport::new(1280.0, -1.0).is_err());
    assert!(Viewport::new(f64::NAN, 800.0).is_err());
}

#[test]
fn rgba_alpha_is_clamped() {
    let c = Rgba::opaque(135, 51, 232);
    assert_eq!(c.with_alpha(1.7).a, 1.0);
    assert_eq!(c.with_alpha(-0.2).a, 0.0);
    assert_eq!(c.with_alpha(0.4).r, 135);
}

#[test]
fn target_ids_order_numerically() {
    let mut ids = vec![TargetId(3), TargetId(1), TargetId(2)];
    ids.sort();
    assert_eq!(ids, vec![TargetId(1), TargetId(2), TargetId(3)]);
}
