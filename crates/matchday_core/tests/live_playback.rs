//! End-to-end playback: determinism, observer ordering and cancellation.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use matchday_core::engine::momentum::Momentum;
use matchday_core::engine::observer::RecordedEvent;
use matchday_core::models::EventKind;
use matchday_core::{
    EventUpdate, FinalSummary, MatchObserver, MatchSettings, RecordingObserver, RunOutcome,
    SimConfig, SimPhase, Simulation, StopHandle, TickFrame, VirtualClock,
};
use sha2::{Digest, Sha256};

fn play(seed: u64, settings: &MatchSettings) -> RecordingObserver {
    let mut sim = Simulation::with_clock(seed, SimConfig::instant(), VirtualClock::new()).unwrap();
    let mut recorder = RecordingObserver::new();
    let outcome = sim.run(settings, &mut recorder).unwrap();
    assert_eq!(outcome, RunOutcome::Completed);
    recorder
}

fn digest(events: &[RecordedEvent], summary: &FinalSummary) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(events).unwrap());
    hasher.update(serde_json::to_vec(summary).unwrap());
    hasher.finalize().into()
}

#[test]
fn same_seed_replays_identical_match() {
    let settings = MatchSettings::new(7.0, 4.0, "4-3-3");
    let a = play(2024, &settings);
    let b = play(2024, &settings);
    assert_eq!(
        digest(&a.events, a.summary.as_ref().unwrap()),
        digest(&b.events, b.summary.as_ref().unwrap())
    );
}

#[test]
fn different_seeds_diverge() {
    let settings = MatchSettings::default();
    let a = play(1, &settings);
    let b = play(2, &settings);
    assert_ne!(
        digest(&a.events, a.summary.as_ref().unwrap()),
        digest(&b.events, b.summary.as_ref().unwrap())
    );
}

#[test]
fn seeded_match_matches_recorded_baseline() {
    let rec = play(7, &MatchSettings::new(7.0, 4.0, "4-3-3"));
    let summary = rec.summary.as_ref().unwrap();
    assert_eq!((summary.score_home, summary.score_away), (2, 1));
    assert_eq!((summary.totals.home.shots, summary.totals.away.shots), (3, 3));
    assert!(
        (summary.momentum - 0.607413).abs() < 1e-5,
        "final momentum {}",
        summary.momentum
    );
    assert_eq!(rec.events.len(), 27);
}

#[test]
fn final_state_is_consistent_with_event_stream() {
    for seed in 0..25 {
        let rec = play(seed, &MatchSettings::new(5.0, 5.0, "4-2-3-1"));
        let summary = rec.summary.as_ref().unwrap();

        let home_goals = rec.events.iter().filter(|e| e.event.kind == EventKind::GoalFor).count();
        let away_goals = rec.events.iter().filter(|e| e.event.kind == EventKind::GoalAgainst).count();
        assert_eq!(summary.score_home as usize, home_goals);
        assert_eq!(summary.score_away as usize, away_goals);

        let mut momentum = Momentum::default();
        for e in &rec.events {
            momentum.apply(e.event.kind, e.event.success);
        }
        assert!((summary.momentum - momentum.value()).abs() < 1e-6);

        let last = rec.events.last().unwrap();
        assert_eq!(last.event.minute, 89);
        assert_eq!(summary.totals, last.event.totals);
        assert!(rec.events.windows(2).all(|w| w[0].event.minute <= w[1].event.minute));
        assert!(rec.events.windows(2).all(|w| w[0].snapshot.heat_samples < w[1].snapshot.heat_samples));
    }
}

/// Logs every callback as a tag so ordering can be checked.
#[derive(Default)]
struct OrderLog(Vec<char>);

impl MatchObserver for OrderLog {
    fn on_start(&mut self) {
        self.0.push('S');
    }
    fn on_tick(&mut self, frame: &TickFrame) {
        assert_eq!(frame.positions.len(), 22);
        self.0.push('t');
    }
    fn on_event(&mut self, _update: &EventUpdate<'_>) {
        self.0.push('E');
    }
    fn on_end(&mut self, _summary: &FinalSummary) {
        self.0.push('X');
    }
}

#[test]
fn callbacks_arrive_in_contract_order() {
    let mut config = SimConfig::instant();
    config.scheduler.ms_per_match_minute = 50.0;
    config.scheduler.tick_ms = 20.0;
    let mut sim = Simulation::with_clock(9, config, VirtualClock::new()).unwrap();
    let mut log = OrderLog::default();
    assert_eq!(sim.run(&MatchSettings::default(), &mut log).unwrap(), RunOutcome::Completed);

    let tags = log.0;
    assert_eq!(tags.first(), Some(&'S'));
    assert_eq!(tags.last(), Some(&'X'));
    assert_eq!(tags.iter().filter(|&&c| c == 'S').count(), 1);
    assert_eq!(tags.iter().filter(|&&c| c == 'X').count(), 1);
    // no tick after the last event
    assert_eq!(tags[tags.len() - 2], 'E');
    assert!(tags.iter().filter(|&&c| c == 't').count() > 0);
}

#[test]
fn virtual_time_matches_compression() {
    let mut config = SimConfig::instant();
    config.scheduler.ms_per_match_minute = 1000.0;
    config.scheduler.tick_ms = 250.0;
    let mut sim = Simulation::with_clock(4, config, VirtualClock::new()).unwrap();
    sim.run(&MatchSettings::default(), &mut ()).unwrap();
    // 89 match minutes at one virtual second each
    assert_eq!(sim.clock().elapsed(), Duration::from_secs(89));
}

struct CancelAtMinute {
    handle: StopHandle,
    minute: u8,
    events_after_stop: usize,
    stopped: bool,
    ended: bool,
}

impl MatchObserver for CancelAtMinute {
    fn on_event(&mut self, update: &EventUpdate<'_>) {
        if self.stopped {
            self.events_after_stop += 1;
        }
        if update.event.minute >= self.minute && !self.stopped {
            self.handle.stop();
            self.stopped = true;
        }
    }
    fn on_end(&mut self, _summary: &FinalSummary) {
        self.ended = true;
    }
}

#[test]
fn stop_mid_match_delivers_no_further_events() {
    let mut sim = Simulation::with_clock(33, SimConfig::fast(), VirtualClock::new()).unwrap();
    let mut obs = CancelAtMinute {
        handle: sim.stop_handle(),
        minute: 45,
        events_after_stop: 0,
        stopped: false,
        ended: false,
    };
    let outcome = sim.run(&MatchSettings::default(), &mut obs).unwrap();
    assert_eq!(outcome, RunOutcome::Cancelled);
    assert!(obs.stopped);
    assert_eq!(obs.events_after_stop, 0);
    assert!(!obs.ended);
    assert!(sim.state().minute < 89);
    assert_eq!(sim.phase(), SimPhase::Idle);

    // a reset makes the simulation playable again
    sim.reset_state();
    let mut rec = RecordingObserver::new();
    assert_eq!(sim.run(&MatchSettings::default(), &mut rec).unwrap(), RunOutcome::Completed);
}

/// Signals once playback has started, then keeps counting events.
struct Announce(Option<mpsc::Sender<()>>, usize);

impl MatchObserver for Announce {
    fn on_event(&mut self, _update: &EventUpdate<'_>) {
        self.1 += 1;
        if let Some(tx) = self.0.take() {
            let _ = tx.send(());
        }
    }
}

#[test]
fn stop_from_another_thread_ends_realtime_run() {
    let mut config = SimConfig::instant();
    // 20ms per match minute, 5ms ticks: a full match would take ~1.8s
    config.scheduler.ms_per_match_minute = 20.0;
    config.scheduler.tick_ms = 5.0;
    let mut sim = Simulation::new(77, config).unwrap();
    let handle = sim.stop_handle();
    let (tx, rx) = mpsc::channel();

    let worker = thread::spawn(move || {
        let mut obs = Announce(Some(tx), 0);
        let outcome = sim.run(&MatchSettings::default(), &mut obs).unwrap();
        (outcome, obs.1)
    });

    rx.recv_timeout(Duration::from_secs(10)).unwrap();
    handle.stop();
    let (outcome, events) = worker.join().unwrap();
    assert_eq!(outcome, RunOutcome::Cancelled);
    assert!(events < 30, "played {events} events after the stop request");
}
