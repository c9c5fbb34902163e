use std::time::Duration;

use tracing::{debug, info};

use crate::error::{LandingError, Result};
use crate::schedule::Policy;
use crate::state::SequencerState;

/// Something observable that happened during an `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEvent {
    /// Play the cue sound from the top.
    Cue,
    /// The cursor moved.
    Advanced { from: usize, to: usize },
    /// A terminating run held its last item for the trailing pause.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Advance,
    Complete,
}

#[derive(Debug, Clone, Copy)]
struct Timer<K> {
    due: Duration,
    kind: K,
}

/// Drives a cursor through a fixed list of lines on a virtual clock.
///
/// The clock only moves through `update`, so the owner decides what real
/// time means (one frame of the render loop) and tests can jump ahead at will.
/// At most one step timer and one cue timer are armed at any moment.
#[derive(Debug)]
pub struct Sequencer {
    items: Vec<String>,
    policy: Policy,
    cursor: usize,
    state: SequencerState,
    clock: Duration,
    pending_step: Option<Timer<Step>>,
    pending_cue: Option<Timer<()>>,
}

impl Sequencer {
    pub fn new(items: Vec<String>, policy: Policy) -> Result<Self> {
        if items.is_empty() {
            return Err(LandingError::EmptyList);
        }
        Ok(Self {
            items,
            policy,
            cursor: 0,
            state: SequencerState::Idle,
            clock: Duration::ZERO,
            pending_step: None,
            pending_cue: None,
        })
    }

    /// Arms the first timers. Returns false when the sequencer was not idle.
    pub fn start(&mut self) -> bool {
        if self.state != SequencerState::Idle {
            return false;
        }
        self.state = SequencerState::Running;
        info!(items = self.items.len(), terminating = self.policy.is_terminating(), "sequencer started");
        if let Policy::Terminating(ramp) = &self.policy {
            debug!(step = ?ramp.step(self.items.len()), "ramp step");
        }
        self.arm_segment();
        true
    }

    /// Moves the clock forward by `dt`, firing every timer that falls due in
    /// deadline order. Cues win ties with their paired step.
    pub fn update(&mut self, dt: Duration) -> Vec<SequencerEvent> {
        let mut events = Vec::new();
        if self.state != SequencerState::Running {
            return events;
        }

        let target = self.clock + dt;
        while self.state == SequencerState::Running {
            let cue_due = self.pending_cue.map(|t| t.due).filter(|due| *due <= target);
            let step = self.pending_step.filter(|t| t.due <= target);

            match (cue_due, step) {
                (Some(cue), Some(step)) if cue <= step.due => self.fire_cue(cue, &mut events),
                (Some(cue), None) => self.fire_cue(cue, &mut events),
                (_, Some(step)) => self.fire_step(step, &mut events),
                (None, None) => break,
            }
        }

        if self.state == SequencerState::Running {
            self.clock = target;
        }
        events
    }

    /// Teardown: drops every armed timer. Later updates are inert.
    pub fn cancel(&mut self) {
        let pending = self.pending_timers();
        self.pending_step = None;
        self.pending_cue = None;
        if matches!(self.state, SequencerState::Idle | SequencerState::Running) {
            debug!(cursor = self.cursor, pending, "sequencer cancelled");
            self.state = SequencerState::Cancelled;
        }
    }

    /// Drops armed timers and rewinds to the first item, idle.
    pub fn restart(&mut self) {
        self.pending_step = None;
        self.pending_cue = None;
        self.cursor = 0;
        self.clock = Duration::ZERO;
        self.state = SequencerState::Idle;
    }

    pub fn current_item(&self) -> &str {
        &self.items[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn pending_timers(&self) -> usize {
        self.pending_step.is_some() as usize + self.pending_cue.is_some() as usize
    }

    fn fire_cue(&mut self, due: Duration, events: &mut Vec<SequencerEvent>) {
        self.clock = due;
        self.pending_cue = None;
        events.push(SequencerEvent::Cue);
    }

    fn fire_step(&mut self, timer: Timer<Step>, events: &mut Vec<SequencerEvent>) {
        self.clock = timer.due;
        self.pending_step = None;

        match timer.kind {
            Step::Advance => {
                let from = self.cursor;
                let to = if from + 1 == self.items.len() { 0 } else { from + 1 };
                self.cursor = to;
                debug!(from, to, item = %self.items[to], "sequencer advanced");
                events.push(SequencerEvent::Advanced { from, to });
                self.arm_segment();
            }
            Step::Complete => {
                self.pending_cue = None;
                self.state = SequencerState::Completed;
                info!(cursor = self.cursor, "sequencer completed");
                events.push(SequencerEvent::Completed);
            }
        }
    }

    /// Arms the timers for the segment starting now at the current cursor.
    fn arm_segment(&mut self) {
        let len = self.items.len();
        let delay = self.policy.delay(self.cursor, len);
        match self.policy {
            Policy::Terminating(ramp) if self.cursor + 1 == len => {
                self.pending_cue = None;
                self.pending_step = Some(Timer {
                    due: self.clock + ramp.trailing_pause(),
                    kind: Step::Complete,
                });
            }
            Policy::Terminating(ramp) => {
                self.pending_cue = Some(Timer {
                    due: self.clock + ramp.cue_offset(delay),
                    kind: (),
                });
                self.pending_step = Some(Timer {
                    due: self.clock + delay,
                    kind: Step::Advance,
                });
            }
            Policy::Cyclic { .. } => {
                self.pending_step = Some(Timer {
                    due: self.clock + delay,
                    kind: Step::Advance,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Ramp;
    use proptest::prelude::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn intro_policy() -> Policy {
        Policy::Terminating(Ramp::new(ms(700), ms(95), ms(300), ms(400)).unwrap())
    }

    fn advances(events: &[SequencerEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, SequencerEvent::Advanced { .. }))
            .count()
    }

    #[test]
    fn empty_list_is_rejected() {
        let err = Sequencer::new(Vec::new(), intro_policy()).unwrap_err();
        assert!(matches!(err, LandingError::EmptyList));
    }

    #[test]
    fn idle_sequencer_does_not_move() {
        let mut seq = Sequencer::new(lines(&["A", "B"]), Policy::cyclic(ms(10)).unwrap()).unwrap();
        assert!(seq.update(ms(1000)).is_empty());
        assert_eq!(seq.current_item(), "A");
        assert_eq!(seq.state(), SequencerState::Idle);
    }

    #[test]
    fn start_is_a_no_op_when_running() {
        let mut seq = Sequencer::new(lines(&["A", "B"]), Policy::cyclic(ms(10)).unwrap()).unwrap();
        assert!(seq.start());
        assert!(!seq.start());
        assert_eq!(seq.pending_timers(), 1);
    }

    #[test]
    fn cyclic_samples_wrap_every_three_seconds() {
        let mut seq =
            Sequencer::new(lines(&["A", "B", "C"]), Policy::cyclic(ms(3000)).unwrap()).unwrap();
        seq.start();

        let mut seen = vec![seq.current_item().to_string()];
        for _ in 0..4 {
            seq.update(ms(3000));
            seen.push(seq.current_item().to_string());
        }
        assert_eq!(seen, ["A", "B", "C", "A", "B"]);
    }

    #[test]
    fn one_large_update_fires_every_due_timer() {
        let mut seq =
            Sequencer::new(lines(&["A", "B", "C"]), Policy::cyclic(ms(3000)).unwrap()).unwrap();
        seq.start();
        let events = seq.update(ms(12_000));
        assert_eq!(advances(&events), 4);
        assert_eq!(seq.current_item(), "B");
        assert_eq!(
            events.last(),
            Some(&SequencerEvent::Advanced { from: 0, to: 1 })
        );
    }

    #[test]
    fn terminating_two_items_completes_after_trailing_pause() {
        let mut seq = Sequencer::new(lines(&["X", "Y"]), intro_policy()).unwrap();
        seq.start();

        // cue at 700 - 300
        assert!(seq.update(ms(399)).is_empty());
        assert_eq!(seq.update(ms(1)), [SequencerEvent::Cue]);

        assert!(seq.update(ms(299)).is_empty());
        assert_eq!(
            seq.update(ms(1)),
            [SequencerEvent::Advanced { from: 0, to: 1 }]
        );
        assert_eq!(seq.current_item(), "Y");

        assert!(seq.update(ms(399)).is_empty());
        assert_eq!(seq.state(), SequencerState::Running);
        assert_eq!(seq.update(ms(1)), [SequencerEvent::Completed]);
        assert_eq!(seq.state(), SequencerState::Completed);

        assert!(seq.update(ms(10_000)).is_empty());
        assert_eq!(seq.current_item(), "Y");
    }

    #[test]
    fn each_segment_lasts_the_policy_delay() {
        let policy = intro_policy();
        let mut seq = Sequencer::new(lines(&["A", "B", "C", "D"]), policy).unwrap();
        seq.start();

        for index in 0..3 {
            let delay = policy.delay(index, 4);
            let before = seq.update(delay - Duration::from_nanos(1));
            assert_eq!(advances(&before), 0, "segment {index} ended early");
            let at = seq.update(Duration::from_nanos(1));
            assert_eq!(at, [SequencerEvent::Advanced { from: index, to: index + 1 }]);
        }
    }

    #[test]
    fn single_item_terminating_run_only_pauses() {
        let mut seq = Sequencer::new(lines(&["only"]), intro_policy()).unwrap();
        seq.start();
        assert_eq!(seq.update(ms(400)), [SequencerEvent::Completed]);
        assert_eq!(seq.cursor(), 0);
    }

    #[test]
    fn every_cue_precedes_its_advance() {
        let items: Vec<String> = (0..83).map(|i| format!("line {i}")).collect();
        let mut seq = Sequencer::new(items, intro_policy()).unwrap();
        seq.start();

        let mut events = Vec::new();
        for _ in 0..4000 {
            events.extend(seq.update(ms(16)));
        }

        let mut expecting_cue = true;
        for event in events.iter().filter(|e| **e != SequencerEvent::Completed) {
            match event {
                SequencerEvent::Cue => {
                    assert!(expecting_cue);
                    expecting_cue = false;
                }
                SequencerEvent::Advanced { .. } => {
                    assert!(!expecting_cue);
                    expecting_cue = true;
                }
                SequencerEvent::Completed => unreachable!(),
            }
        }
        assert_eq!(advances(&events), 82);
        assert_eq!(
            events.iter().filter(|e| **e == SequencerEvent::Cue).count(),
            82
        );
    }

    #[test]
    fn cancel_silences_pending_timers() {
        let mut seq = Sequencer::new(lines(&["X", "Y", "Z"]), intro_policy()).unwrap();
        seq.start();
        seq.update(ms(100));
        seq.cancel();

        assert_eq!(seq.pending_timers(), 0);
        assert!(seq.update(ms(60_000)).is_empty());
        assert_eq!(seq.current_item(), "X");
        assert_eq!(seq.state(), SequencerState::Cancelled);
        assert!(!seq.start());
    }

    #[test]
    fn restart_rewinds_and_waits_for_start() {
        let mut seq =
            Sequencer::new(lines(&["A", "B", "C"]), Policy::cyclic(ms(50)).unwrap()).unwrap();
        seq.start();
        seq.update(ms(120));
        assert_eq!(seq.cursor(), 2);

        seq.restart();
        assert_eq!(seq.cursor(), 0);
        assert_eq!(seq.pending_timers(), 0);
        assert!(seq.update(ms(500)).is_empty());

        assert!(seq.start());
        seq.update(ms(50));
        assert_eq!(seq.current_item(), "B");
    }

    proptest! {
        #[test]
        fn cyclic_cursor_is_n_mod_len(len in 1usize..12, n in 0usize..60) {
            let items: Vec<String> = (0..len).map(|i| i.to_string()).collect();
            let mut seq = Sequencer::new(items.clone(), Policy::cyclic(ms(25)).unwrap()).unwrap();
            seq.start();
            for _ in 0..n {
                seq.update(ms(25));
                prop_assert!(seq.cursor() < len);
            }
            prop_assert_eq!(seq.current_item(), items[n % len].as_str());
        }

        #[test]
        fn cyclic_returns_to_start_after_len_advances(len in 1usize..12, offset in 0usize..12) {
            let items: Vec<String> = (0..len).map(|i| i.to_string()).collect();
            let mut seq = Sequencer::new(items, Policy::cyclic(ms(40)).unwrap()).unwrap();
            seq.start();
            seq.update(ms(40) * offset as u32);
            let before = seq.cursor();
            seq.update(ms(40) * len as u32);
            prop_assert_eq!(seq.cursor(), before);
        }

        #[test]
        fn terminating_cursor_saturates_at_last(len in 1usize..30, n in 0usize..40) {
            let items: Vec<String> = (0..len).map(|i| i.to_string()).collect();
            let mut seq = Sequencer::new(items.clone(), intro_policy()).unwrap();
            seq.start();

            let mut visited = vec![0];
            let mut completions = 0;
            let mut steps = 0;
            while steps < n && seq.state() == SequencerState::Running {
                for event in seq.update(ms(5)) {
                    match event {
                        SequencerEvent::Advanced { from, to } => {
                            prop_assert_eq!(to, from + 1);
                            visited.push(to);
                            steps += 1;
                        }
                        SequencerEvent::Completed => completions += 1,
                        SequencerEvent::Cue => {}
                    }
                }
            }
            prop_assert_eq!(seq.current_item(), items[n.min(len - 1)].as_str());
            prop_assert_eq!(visited, (0..=n.min(len - 1)).collect::<Vec<_>>());
            prop_assert!(completions <= 1);
            if completions == 1 {
                prop_assert_eq!(seq.cursor(), len - 1);
            }
        }
    }
}
