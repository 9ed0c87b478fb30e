use super::*;
use crate::{
    animation::kind::Animation,
    config::{Quality, SceneConfig},
    engine::BatchStep,
    foundation::core::{Point, palette},
    scene::{
        object::{ObjectId, ObjectKind, Style},
        script::SceneBuilder,
    },
};
use smallvec::smallvec;

fn header() -> SceneHeader {
    let cfg = SceneConfig::default().with_quality(Quality::Low);
    SceneBuilder::new("board", &cfg).build().unwrap().header().clone()
}

fn arrow() -> VisualObject {
    VisualObject::new(
        ObjectId(0),
        ObjectKind::arrow(Point::ORIGIN, Point::new(2.0, 1.0)),
        Style::colored(palette::YELLOW),
    )
}

fn grow(cue: usize, start_secs: f64) -> Batch {
    Batch {
        cue,
        start_secs,
        duration: 1.5,
        steps: vec![BatchStep {
            targets: smallvec![EngineHandle(0)],
            morph_into: None,
            animation: Animation::GrowArrow,
            offset: 0.0,
            duration: 1.5,
        }],
    }
}

#[test]
fn dissolve_interpolates_bytes() {
    let mut out = vec![0u8; 4];
    dissolve(&mut out, &[0, 100, 200, 255], &[100, 100, 0, 255], 0.5);
    assert_eq!(out, vec![50, 100, 100, 255]);
    dissolve(&mut out, &[0, 0, 0, 0], &[10, 20, 30, 40], 2.0);
    assert_eq!(out, vec![10, 20, 30, 40]);
}

#[test]
fn holds_stretch_the_last_panel() {
    let mut eng = StoryboardEngine::new(StoryboardOpts::new("target/unused"));
    eng.begin(&header()).unwrap();
    let h = eng.create(&arrow(), &[]).unwrap();
    assert_eq!(h, EngineHandle(0));

    eng.animate(&grow(0, 0.0)).unwrap();
    eng.hold(1, 1.5, 8.0).unwrap();
    assert_eq!(eng.panel_count(), 1);
    assert_eq!(eng.panels[0].end_secs, 9.5);
    assert_eq!(eng.panels[0].rate, RateFunc::Smooth);
}

#[test]
fn a_leading_hold_gets_its_own_blank_panel() {
    let mut eng = StoryboardEngine::new(StoryboardOpts::new("target/unused"));
    eng.begin(&header()).unwrap();
    eng.hold(0, 0.0, 1.0).unwrap();
    assert_eq!(eng.panel_count(), 1);
    let svg = eng.panel_svg(0).unwrap();
    assert!(svg.contains("#1e1e1e"));
    assert!(!svg.contains("<line"));
}

#[test]
fn panels_draw_revealed_objects() {
    let mut eng = StoryboardEngine::new(StoryboardOpts::new("target/unused"));
    eng.begin(&header()).unwrap();
    eng.create(&arrow(), &[]).unwrap();
    eng.animate(&grow(0, 0.0)).unwrap();
    let svg = eng.panel_svg(0).unwrap();
    assert!(svg.contains("<line"));
    assert!(svg.contains("#ffff00"));
}

#[test]
fn compose_requires_begin() {
    let mut eng = StoryboardEngine::new(StoryboardOpts::new("target/unused"));
    assert!(eng.compose().is_err());
}
