use std::time::Duration;

use raylib::prelude::*;
use tracing::info;

use crate::audio::{CuePlayer, SoundCue};
use crate::background::draw_background;
use crate::constants::*;
use crate::error::Result;
use crate::layout::{draw_centered_lines, wrap_words};
use crate::schedule::Policy;
use crate::screen::{Route, Screen};
use crate::sequencer::{Sequencer, SequencerEvent};
use crate::state::SequencerState;
use crate::typeface::Typeface;

const SIDE_PADDING: i32 = 96;

/// Click-to-start slogan run that ends by sending the visitor to the forge.
pub struct IntroScreen<'aud> {
    sequencer: Sequencer,
    cue: SoundCue<'aud>,
    backdrop: Option<Texture2D>,
    typeface: Typeface,
    lines: Vec<String>,
}

impl<'aud> IntroScreen<'aud> {
    pub fn new(
        items: Vec<String>,
        policy: Policy,
        cue: SoundCue<'aud>,
        backdrop: Option<Texture2D>,
        typeface: Typeface,
    ) -> Result<Self> {
        let sequencer = Sequencer::new(items, policy)?;
        Ok(Self {
            sequencer,
            cue,
            backdrop,
            typeface,
            lines: Vec::new(),
        })
    }

    fn start_requested(rl: &RaylibHandle) -> bool {
        rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT)
            || rl.is_key_pressed(KeyboardKey::KEY_SPACE)
            || rl.is_key_pressed(KeyboardKey::KEY_ENTER)
    }
}

impl Screen for IntroScreen<'_> {
    fn update(&mut self, dt: f32, rl: &mut RaylibHandle, _thread: &RaylibThread) -> Option<Route> {
        let was_idle = self.sequencer.state() == SequencerState::Idle;
        let events = tick(
            &mut self.sequencer,
            &mut self.cue,
            was_idle && Self::start_requested(rl),
            Duration::from_secs_f32(dt),
        );
        let route = dispatch(&events, &mut self.cue);
        let started = was_idle && self.sequencer.state() != SequencerState::Idle;
        if started || events.iter().any(|e| matches!(e, SequencerEvent::Advanced { .. })) {
            self.lines = wrap_current(&self.sequencer, &self.typeface);
        }
        route
    }

    fn draw(&self, d: &mut RaylibDrawHandle) {
        draw_background(d, self.backdrop.as_ref());

        if self.sequencer.state() == SequencerState::Idle {
            let title = "FORGE";
            draw_centered_lines(d, &self.typeface, &[title.to_string()], INTRO_TITLE_SIZE, RENDER_HEIGHT / 2, RENDER_WIDTH, Color::WHITE);
        } else {
            draw_centered_lines(d, &self.typeface, &self.lines, INTRO_SLOGAN_SIZE, RENDER_HEIGHT / 2, RENDER_WIDTH, Color::WHITE);
        }
    }
}

impl Drop for IntroScreen<'_> {
    fn drop(&mut self) {
        self.sequencer.cancel();
    }
}

/// Starts the run; the click itself rings the cue once.
fn start(sequencer: &mut Sequencer, cue: &mut impl CuePlayer) {
    if sequencer.start() {
        info!(lines = sequencer.len(), "intro started");
        cue.restart();
    }
}

/// One frame of the run. The frame that starts it does not move the clock:
/// that frame's time went by before the click.
fn tick(sequencer: &mut Sequencer, cue: &mut impl CuePlayer, start_requested: bool, dt: Duration) -> Vec<SequencerEvent> {
    if sequencer.state() == SequencerState::Idle {
        if start_requested {
            start(sequencer, cue);
        }
        return Vec::new();
    }
    sequencer.update(dt)
}

/// Applies sequencer events to the screen's side effects and reports the
/// navigation they ask for.
fn dispatch(events: &[SequencerEvent], cue: &mut impl CuePlayer) -> Option<Route> {
    let mut route = None;
    for event in events {
        match event {
            SequencerEvent::Cue => cue.restart(),
            SequencerEvent::Advanced { .. } => {}
            SequencerEvent::Completed => route = Some(Route::Forge),
        }
    }
    route
}

fn wrap_current(sequencer: &Sequencer, typeface: &Typeface) -> Vec<String> {
    wrap_words(sequencer.current_item(), RENDER_WIDTH - 2 * SIDE_PADDING, |line| {
        typeface.measure(line, INTRO_SLOGAN_SIZE)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Ramp;

    #[derive(Default)]
    struct CountingCue {
        plays: usize,
    }

    impl CuePlayer for CountingCue {
        fn restart(&mut self) {
            self.plays += 1;
        }
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn intro(items: &[&str]) -> Sequencer {
        let policy = Policy::Terminating(Ramp::new(ms(700), ms(95), ms(300), ms(400)).unwrap());
        Sequencer::new(items.iter().map(|s| s.to_string()).collect(), policy).unwrap()
    }

    #[test]
    fn click_rings_once_and_is_not_repeatable() {
        let mut seq = intro(&["X", "Y"]);
        let mut cue = CountingCue::default();
        start(&mut seq, &mut cue);
        start(&mut seq, &mut cue);
        assert_eq!(cue.plays, 1);
    }

    #[test]
    fn full_run_rings_before_every_change_then_routes_to_forge() {
        let mut seq = intro(&["X", "Y", "Z"]);
        let mut cue = CountingCue::default();
        start(&mut seq, &mut cue);

        let mut routes = Vec::new();
        for _ in 0..200 {
            let events = seq.update(ms(16));
            if let Some(route) = dispatch(&events, &mut cue) {
                routes.push(route);
            }
        }
        assert_eq!(cue.plays, 3);
        assert_eq!(routes, [Route::Forge]);
        assert_eq!(seq.current_item(), "Z");
    }

    #[test]
    fn start_frame_does_not_eat_into_the_first_delay() {
        let mut seq = intro(&["X", "Y", "Z"]);
        let mut cue = CountingCue::default();

        // a long frame ends with the click
        assert!(tick(&mut seq, &mut cue, true, ms(500)).is_empty());
        assert_eq!(seq.state(), SequencerState::Running);

        let events = tick(&mut seq, &mut cue, false, ms(699));
        assert_eq!(events, [SequencerEvent::Cue]);
        assert_eq!(seq.current_item(), "X");

        let events = tick(&mut seq, &mut cue, false, ms(1));
        assert_eq!(events, [SequencerEvent::Advanced { from: 0, to: 1 }]);
    }

    #[test]
    fn idle_frames_without_a_click_stay_idle() {
        let mut seq = intro(&["X", "Y"]);
        let mut cue = CountingCue::default();
        assert!(tick(&mut seq, &mut cue, false, ms(5000)).is_empty());
        assert_eq!(seq.state(), SequencerState::Idle);
        assert_eq!(cue.plays, 0);
    }

    #[test]
    fn silent_cue_still_reaches_the_forge() {
        let mut seq = intro(&["X", "Y", "Z"]);
        let mut cue = SoundCue::load(None, std::path::Path::new("assets/hammer.mp3"));
        assert!(!cue.is_loaded());

        tick(&mut seq, &mut cue, true, ms(16));
        let mut routes = Vec::new();
        for _ in 0..200 {
            let events = tick(&mut seq, &mut cue, false, ms(16));
            routes.extend(dispatch(&events, &mut cue));
        }
        assert_eq!(routes, [Route::Forge]);
        assert_eq!(seq.state(), SequencerState::Completed);
    }

    #[test]
    fn cancelled_intro_never_routes() {
        let mut seq = intro(&["X", "Y"]);
        let mut cue = CountingCue::default();
        start(&mut seq, &mut cue);
        seq.cancel();
        let events = seq.update(ms(5000));
        assert_eq!(dispatch(&events, &mut cue), None);
        assert_eq!(cue.plays, 1);
    }
}
