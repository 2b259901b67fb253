use super::*;

#[test]
fn element_ids_are_sequential() {
    let mut l = StaticLookup::new();
    let a = l.element("logo", &[".logo-wrapper"], 0.0);
    let b = l.element("intro", &[".intro"], 0.0);
    assert_eq!(a, TargetId(0));
    assert_eq!(b, TargetId(1));
}

#[test]
fn resolve_keeps_document_order() {
    let mut l = StaticLookup::new();
    let a = l.element("float-0", &[".intro-float", ".float-up"], 0.0);
    let _ = l.element("logo", &[".logo-wrapper"], 0.0);
    let c = l.element("float-1", &[".intro-float", ".float-down"], 0.0);
    assert_eq!(l.resolve(".intro-float"), vec![a, c]);
    assert_eq!(l.resolve(".float-down"), vec![c]);
    assert!(l.resolve(".missing").is_empty());
}

#[test]
fn removing_a_selector_drops_elements() {
    let mut l = StaticLookup::new();
    let a = l.element("scene", &[".service-stack-scene"], 2400.0);
    assert_eq!(l.offset_top(a), Some(2400.0));
    l.remove_selector(".service-stack-scene");
    assert!(l.resolve(".service-stack-scene").is_empty());
    assert_eq!(l.offset_top(a), None);
}

#[test]
fn background_and_label_are_exposed() {
    let mut l = StaticLookup::new();
    let a = l.element("intro", &[".intro"], 0.0);
    l.with_background(a, Rgba::opaque(135, 51, 232));
    assert_eq!(l.label(a).as_deref(), Some("intro"));
    assert_eq!(l.background(a).map(|c| c.b), Some(232));
}

#[test]
fn json_roundtrip() {
    let mut l = StaticLookup::new();
    l.element("logo", &[".logo-wrapper"], 0.0);
    let s = serde_json::to_string(&l).unwrap();
    let de: StaticLookup = serde_json::from_str(&s).unwrap();
    assert_eq!(de, l);
}
