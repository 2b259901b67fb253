use super::*;

fn config() -> SceneConfig {
    SceneConfig::portal_intro()
}

#[test]
fn defaults_fill_optional_fields() {
    let mut value = serde_json::to_value(config()).unwrap();
    let obj = value.as_object_mut().unwrap();
    obj.remove("breakpoints");
    obj.remove("debounce_ms");
    obj.remove("size_threshold_px");
    obj.remove("classifier");
    obj.remove("stack");

    let parsed = SceneConfig::from_json(&value.to_string()).unwrap();
    assert_eq!(parsed.breakpoints, vec![480.0, 768.0, 1024.0, 1200.0, 1400.0]);
    assert_eq!(parsed.debounce_ms, 250);
    assert_eq!(parsed.size_threshold_px, 150.0);
    assert_eq!(parsed.classifier, WidthClassifier::default());
    assert!(parsed.stack.is_none());
}

#[test]
fn validate_rejects_duplicate_breakpoints() {
    let mut c = config();
    c.breakpoints = vec![768.0, 1024.0, 768.0];
    assert!(matches!(c.validate(), Err(SceneError::Config(_))));
}

#[test]
fn validate_rejects_nan_and_negative_distances() {
    let mut c = config();
    c.classes.tablet.virtual_scroll_distance = f64::NAN;
    assert!(c.validate().is_err());

    let mut c = config();
    c.classes.desktop.per_card_scroll_unit = -5.0;
    assert!(c.validate().is_err());

    let mut c = config();
    c.size_threshold_px = -1.0;
    assert!(c.validate().is_err());
}

#[test]
fn validate_rejects_bad_rows() {
    let mut c = config();
    c.region.tracks[0].window.start = f64::NAN;
    assert!(matches!(c.validate(), Err(SceneError::Validation(_))));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = SceneConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, SceneError::Serde(_)));
}

#[test]
fn load_reports_missing_file() {
    let err = SceneConfig::load("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, SceneError::Other(_)));
    assert!(err.to_string().contains("read scene"));
}
