use super::*;
use crate::responsive::classify::ClassParam;

#[test]
fn builder_produces_ordered_rows() {
    let rows = PhaseTableBuilder::new()
        .row(
            TrackBuilder::new(".logo-wrapper", Property::Scale)
                .values(1.0, ValueDef::param(ClassParam::ZoomScale)),
        )
        .row(
            TrackBuilder::new(".intro-float", Property::TranslateY)
                .window(0.0, 0.18)
                .stagger(0.01, 0.0)
                .values(0.0, ValueDef::Vh(-120.0))
                .spread(0.12)
                .ease(Ease::OutQuad)
                .only(&[ViewportClass::Desktop]),
        )
        .build()
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].selector, ".logo-wrapper");
    assert_eq!(rows[0].window, PhaseWindow::full());
    assert_eq!(rows[1].window.bounds(1), (0.01, 0.18));
    assert_eq!(rows[1].spread, 0.12);
    assert_eq!(rows[1].classes, Some(vec![ViewportClass::Desktop]));
}

#[test]
fn builder_validates_rows() {
    let res = PhaseTableBuilder::new()
        .row(TrackBuilder::new("", Property::Opacity))
        .build();
    assert!(res.is_err());
}
