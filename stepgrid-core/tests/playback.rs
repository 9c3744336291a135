mod common;

use std::time::Duration;

use common::{ManualTransport, RecordingEngine};
use stepgrid_core::sequencer::{OfflineTransport, PlaybackState, StepClock, Tick};
use stepgrid_core::session::Session;
use stepgrid_types::{PatternEntity, SampleId};

fn kick_and_snare() -> Vec<PatternEntity> {
    let mut kick = PatternEntity::new(SampleId::new(0));
    kick.set_step(0, true);
    kick.set_step(8, true);
    let mut snare = PatternEntity::new(SampleId::new(2));
    snare.set_step(4, true);
    snare.set_step(12, true);
    vec![kick, snare]
}

#[test]
fn test_toggle_twice_returns_to_idle() {
    let entities = kick_and_snare();
    let mut clock = StepClock::new(ManualTransport::default(), 120.0);
    let mut engine = RecordingEngine::default();

    assert_eq!(clock.toggle_playback(&entities, &mut engine), PlaybackState::Playing);
    for tick in clock.transport().ticks_for_step(5, 0.725) {
        clock.on_tick(tick, &entities, &mut engine);
    }
    assert_eq!(clock.active_step_index(), 5);

    assert_eq!(clock.toggle_playback(&entities, &mut engine), PlaybackState::Idle);
    assert_eq!(clock.state(), PlaybackState::Idle);
    assert_eq!(clock.active_step_index(), 0);
    assert_eq!(clock.live_schedules(), 0);
    assert!(clock.transport().live.is_empty());
    assert!(!clock.transport().running);
}

#[test]
fn test_late_tick_after_stop_is_ignored() {
    let entities = kick_and_snare();
    let mut clock = StepClock::new(ManualTransport::default(), 120.0);
    let mut engine = RecordingEngine::default();
    clock.toggle_playback(&entities, &mut engine);
    let pending = clock.transport().ticks_for_step(0, 0.1);

    clock.stop();
    for tick in pending {
        assert!(!clock.on_tick(tick, &entities, &mut engine));
    }
    assert!(engine.hits.is_empty());
    assert_eq!(clock.active_step_index(), 0);
}

#[test]
fn test_rebuild_while_playing_does_not_double_schedule() {
    let entities = kick_and_snare();
    let mut clock = StepClock::new(ManualTransport::default(), 120.0);
    let mut engine = RecordingEngine::default();
    clock.toggle_playback(&entities, &mut engine);
    let old = clock.transport().live.clone();

    clock.rebuild_schedules(&entities);
    clock.rebuild_schedules(&entities);
    assert_eq!(clock.live_schedules(), 2);
    assert_eq!(clock.transport().live.len(), 2);
    for id in &old {
        assert!(clock.transport().cancelled.contains(id));
    }

    // ticks from the cancelled schedules no longer trigger anything
    for &schedule in &old {
        let tick = Tick { schedule, step: 0, time: 0.1 };
        assert!(!clock.on_tick(tick, &entities, &mut engine));
    }
    let mut fired = 0;
    for tick in clock.transport().ticks_for_step(0, 0.1) {
        if clock.on_tick(tick, &entities, &mut engine) {
            fired += 1;
        }
    }
    assert_eq!(fired, 1);
    assert_eq!(engine.hit_ids(), vec![0]);
}

#[test]
fn test_edits_between_ticks_are_heard() {
    let mut entities = kick_and_snare();
    let mut clock = StepClock::new(ManualTransport::default(), 120.0);
    let mut engine = RecordingEngine::default();
    clock.toggle_playback(&entities, &mut engine);

    entities[1].pitch = "E2".into();
    entities[1].set_step(1, true);
    for tick in clock.transport().ticks_for_step(1, 0.225) {
        clock.on_tick(tick, &entities, &mut engine);
    }
    assert_eq!(engine.hits.len(), 1);
    assert_eq!(engine.hits[0].sample, SampleId::new(2));
    assert_eq!(engine.hits[0].pitch, "E2");
    assert_eq!(engine.hits[0].time, 0.225);
}

#[test]
fn test_tempo_change_while_playing_keeps_schedules() {
    let entities = kick_and_snare();
    let mut clock = StepClock::new(ManualTransport::default(), 120.0);
    let mut engine = RecordingEngine::default();
    clock.toggle_playback(&entities, &mut engine);
    let live = clock.transport().live.clone();

    clock.set_bpm(174.0);
    assert_eq!(clock.transport().tempo, 174.0);
    assert_eq!(clock.bpm(), 174.0);
    assert!(clock.is_playing());
    assert_eq!(clock.transport().starts, 1);
    assert_eq!(clock.transport().stops, 0);
    assert!(clock.transport().cancelled.is_empty());
    assert_eq!(clock.live_schedules(), 2);
    assert_eq!(clock.transport().live, live);

    // the existing schedules keep firing
    for tick in clock.transport().ticks_for_step(0, 0.1) {
        clock.on_tick(tick, &entities, &mut engine);
    }
    assert_eq!(engine.hit_ids(), vec![0]);
}

#[test]
fn test_failed_resume_stays_idle() {
    let entities = kick_and_snare();
    let mut clock = StepClock::new(ManualTransport::default(), 120.0);
    let mut engine = RecordingEngine { fail_resume: true, ..RecordingEngine::suspended() };

    assert_eq!(clock.toggle_playback(&entities, &mut engine), PlaybackState::Idle);
    assert_eq!(clock.live_schedules(), 0);
    assert_eq!(clock.transport().starts, 0);

    engine.fail_resume = false;
    assert_eq!(clock.toggle_playback(&entities, &mut engine), PlaybackState::Playing);
    assert_eq!(clock.transport().starts, 1);
}

#[test]
fn test_pack_switch_while_playing_reschedules() {
    let mut session = Session::new(ManualTransport::default(), 120.0, 0);
    let mut engine = RecordingEngine::default();
    session.toggle_playback(&mut engine);
    assert_eq!(session.clock().live_schedules(), 8);

    assert!(session.select_pack(3));
    assert_eq!(session.clock().live_schedules(), 8);
    assert_eq!(session.clock().transport().live.len(), 8);
    assert!(session.clock().is_playing());

    session.pattern_mut().set_step(SampleId::new(24), 0, true);
    for tick in session.clock().transport().ticks_for_step(0, 0.1) {
        session.on_tick(tick, &mut engine);
    }
    assert_eq!(engine.hit_ids(), vec![24]);
}

#[test]
fn test_offline_transport_plays_one_cycle() {
    let mut session = Session::new(OfflineTransport::new(120.0), 120.0, 0);
    session.pattern_mut().set_step(SampleId::new(0), 0, true);
    session.pattern_mut().set_step(SampleId::new(0), 8, true);
    session.pattern_mut().set_step(SampleId::new(2), 4, true);
    session.pattern_mut().set_step(SampleId::new(2), 12, true);

    let mut engine = RecordingEngine::default();
    session.toggle_playback(&mut engine);

    // start offset plus 16 steps of 0.125 s, stopping short of the next downbeat
    let ticks = session
        .clock_mut()
        .transport_mut()
        .advance(Duration::from_secs_f64(0.1 + 15.5 * 0.125));
    for tick in ticks {
        session.on_tick(tick, &mut engine);
    }

    assert_eq!(engine.hit_ids(), vec![0, 2, 0, 2]);
    assert_eq!(session.clock().active_step_index(), 15);
    let times: Vec<f64> = engine.hits.iter().map(|h| h.time).collect();
    for (t, expected) in times.iter().zip([0.1, 0.6, 1.1, 1.6]) {
        assert!((t - expected).abs() < 1e-9, "{} != {}", t, expected);
    }
}
