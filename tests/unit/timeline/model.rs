use super::*;

fn fade(id: u32) -> Step {
    Step::new(Animation::fade_in(), [ObjectId(id)])
}

#[test]
fn stagger_duration_is_not_n_times_item() {
    let s = Stagger::new((0..12).map(fade).collect(), 1.0, 0.1).unwrap();
    assert!((s.duration() - 2.1).abs() < 1e-12);
    assert!((s.offset_of(11) - 1.1).abs() < 1e-12);
}

#[test]
fn stagger_within_fits_the_total() {
    let s = Stagger::within(3.0, (0..12).map(fade).collect(), 0.1).unwrap();
    assert!((s.duration() - 3.0).abs() < 1e-12);

    let single = Stagger::within(1.0, vec![fade(0)], 0.5).unwrap();
    assert_eq!(single.item_duration, 1.0);
}

#[test]
fn stagger_rejects_bad_parameters() {
    assert!(Stagger::new(vec![], 1.0, 0.1).is_err());
    assert!(Stagger::new(vec![fade(0)], 0.0, 0.1).is_err());
    assert!(Stagger::new(vec![fade(0)], 1.0, 1.5).is_err());
}

#[test]
fn group_duration_is_longest_member() {
    let g = Group::timed(2.0)
        .with(fade(0))
        .with(fade(1).with_run_time(1.0))
        .with_stagger(Stagger::new(vec![fade(2), fade(3)], 1.0, 0.5).unwrap());
    assert_eq!(g.duration(), 2.0);

    let sched = g.schedule();
    assert_eq!(sched.len(), 4);
    assert_eq!(sched[3].offset, 0.5);
}

#[test]
fn group_run_time_overrides_step_run_time() {
    let g = Group::timed(2.0).with(fade(0).with_run_time(1.0));
    assert_eq!(g.schedule()[0].duration, 2.0);

    let untimed = Group::new().with(fade(0).with_run_time(3.0));
    assert_eq!(untimed.schedule()[0].duration, 3.0);
}

#[test]
fn untimed_group_falls_back_to_default() {
    let g = Group::new().with(fade(0));
    assert_eq!(g.duration(), DEFAULT_RUN_TIME);
    assert_eq!(Group::new().duration(), 0.0);
}

#[test]
fn spans_accumulate_on_the_scene_clock() {
    let t = Timeline::from_cues(vec![
        Cue::Play(Group::timed(2.5).with(fade(0))),
        Cue::Hold { secs: 1.0 },
        Cue::Mark {
            text: "(4s) narration".into(),
        },
        Cue::Play(Group::timed(3.0).with(fade(1))),
    ]);
    assert_eq!(t.total_secs(), 6.5);
    assert_eq!(t.group_count(), 2);

    let spans = t.spans();
    assert_eq!(spans[1].start, 2.5);
    assert_eq!(spans[2].start, spans[2].end);
    assert_eq!(spans[3].start, 3.5);
    assert_eq!(spans[3].end, 6.5);
}

#[test]
fn referenced_includes_morph_destination() {
    let step = Step::new(Animation::transform(ObjectId(9)), [ObjectId(1), ObjectId(2)]);
    let ids: Vec<_> = step.referenced().collect();
    assert_eq!(ids, vec![ObjectId(1), ObjectId(2), ObjectId(9)]);
}
