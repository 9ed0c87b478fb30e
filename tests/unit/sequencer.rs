use super::*;
use crate::{
    config::SceneConfig,
    engine::recording::{EngineCall, RecordingEngine},
    scene::{
        object::{ObjectKind, Style},
        script::SceneBuilder,
    },
    timeline::Step,
};

fn morph_scene() -> Scene {
    let mut b = SceneBuilder::new("morph", &SceneConfig::default());
    let king = b.add_named("King", ObjectKind::text("King", 32.0), Style::default()).unwrap();
    let queen = b.add_named("Queen", ObjectKind::text("Queen", 32.0), Style::default()).unwrap();
    let pair = b.group([king, queen]).unwrap();
    let q = b.add(ObjectKind::text("?", 144.0), Style::default()).unwrap();
    b.add(ObjectKind::text("never shown", 32.0), Style::default()).unwrap();

    b.mark("Two words.");
    b.play_step(Step::new(Animation::Write, [pair])).unwrap();
    b.wait(2.0).unwrap();
    b.play_step(Step::new(Animation::transform(q), [pair])).unwrap();
    b.build().unwrap()
}

#[test]
fn objects_are_created_once_dependencies_first() {
    let scene = morph_scene();
    let mut eng = RecordingEngine::new();
    let report = Sequencer::new(&scene).run(&mut eng).unwrap();

    let created: Vec<_> = eng
        .created()
        .map(|(h, o)| (h, o.id, o.key.clone()))
        .collect();
    assert_eq!(created.len(), 4);
    assert_eq!(created[0].2.as_deref(), Some("King"));
    assert_eq!(created[1].2.as_deref(), Some("Queen"));
    assert_eq!(created[2].1, ObjectId(2));
    assert_eq!(created[3].1, ObjectId(3));
    assert_eq!(report.created, 4);

    let group_deps = eng.calls().iter().find_map(|c| match c {
        EngineCall::Create { object, deps, .. } if object.id == ObjectId(2) => Some(deps.clone()),
        _ => None,
    });
    assert_eq!(group_deps, Some(vec![EngineHandle(0), EngineHandle(1)]));
}

#[test]
fn cues_reach_the_engine_on_the_scene_clock() {
    let scene = morph_scene();
    let mut eng = RecordingEngine::new();
    let report = Sequencer::new(&scene).run(&mut eng).unwrap();

    assert!(matches!(eng.calls()[0], EngineCall::Begin { .. }));
    assert!(matches!(eng.calls().last(), Some(EngineCall::Compose)));
    assert!(eng.calls().iter().any(|c| matches!(
        c,
        EngineCall::Mark { cue: 0, at_secs, text } if *at_secs == 0.0 && text == "Two words."
    )));
    assert!(eng.calls().iter().any(|c| matches!(
        c,
        EngineCall::Hold { cue: 2, start_secs, secs } if *start_secs == 1.0 && *secs == 2.0
    )));

    let batches: Vec<_> = eng.batches().collect();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].start_secs, 0.0);
    assert_eq!(batches[0].duration, 1.0);
    assert_eq!(batches[1].cue, 3);
    assert_eq!(batches[1].start_secs, 3.0);
    assert_eq!(batches[1].steps[0].targets.as_slice(), &[EngineHandle(2)]);
    assert_eq!(batches[1].steps[0].morph_into, Some(EngineHandle(3)));

    assert_eq!(report.cues, 4);
    assert_eq!(report.batches, 2);
    assert_eq!(report.total_secs, 4.0);
    assert_eq!(report.total_secs, scene.total_secs());
    assert_eq!(report.output.frame_count, scene.header().fps.frame_at(4.0).0);
}

#[test]
fn engine_failures_abort_before_compose() {
    let scene = morph_scene();
    let mut eng = RecordingEngine::failing_at(3);
    let err = Sequencer::new(&scene).run(&mut eng).unwrap_err();
    assert!(matches!(err, ReelError::Engine(_)));
    assert!(!eng.calls().iter().any(|c| matches!(c, EngineCall::Compose)));
    assert_eq!(eng.batches().count(), 1);
}
