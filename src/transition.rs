use std::time::Duration;

use raylib::prelude::*;

/// Where a line sits relative to the band it is shown in: `offset` is in band
/// heights (negative is above), `opacity` is 0..1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub offset: f32,
    pub opacity: f32,
}

impl Pose {
    const SHOWN: Pose = Pose { offset: 0.0, opacity: 1.0 };
    const ABOVE: Pose = Pose { offset: -1.0, opacity: 0.0 };
    const BELOW: Pose = Pose { offset: 1.0, opacity: 0.0 };
}

/// Resting pose of line `index` while `cursor` is the active line. Lines
/// before the cursor wait above the band, lines after it wait below.
pub fn resting_pose(index: usize, cursor: usize) -> Pose {
    if index == cursor {
        Pose::SHOWN
    } else if cursor > index {
        Pose::ABOVE
    } else {
        Pose::BELOW
    }
}

/// Pose of line `index` at `progress` (0..1) of the move from `previous` to
/// `current`.
pub fn pose(index: usize, previous: usize, current: usize, progress: f32) -> Pose {
    let from = resting_pose(index, previous);
    let to = resting_pose(index, current);
    let t = progress.clamp(0.0, 1.0);
    Pose {
        offset: ease::cubic_out(t, from.offset, to.offset - from.offset, 1.0),
        opacity: ease::cubic_out(t, from.opacity, to.opacity - from.opacity, 1.0),
    }
}

/// Tracks the last cursor move of a rotator so the band can slide the old
/// line out while the new one slides in.
#[derive(Debug, Clone)]
pub struct SlideTransition {
    previous: usize,
    current: usize,
    elapsed: Duration,
    duration: Duration,
}

impl SlideTransition {
    pub fn new(cursor: usize, duration: Duration) -> Self {
        Self {
            previous: cursor,
            current: cursor,
            elapsed: duration,
            duration,
        }
    }

    pub fn begin(&mut self, from: usize, to: usize) {
        self.previous = from;
        self.current = to;
        self.elapsed = Duration::ZERO;
    }

    /// Jumps to `cursor` without animating.
    pub fn reset(&mut self, cursor: usize) {
        self.previous = cursor;
        self.current = cursor;
        self.elapsed = self.duration;
    }

    pub fn update(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        self.elapsed.as_secs_f32() / self.duration.as_secs_f32()
    }

    pub fn is_animating(&self) -> bool {
        self.elapsed < self.duration && self.previous != self.current
    }

    /// Lines worth drawing right now with their poses: the active line, plus
    /// the one leaving while the slide is still running.
    pub fn visible(&self) -> Vec<(usize, Pose)> {
        let progress = self.progress();
        let mut lines = vec![(
            self.current,
            pose(self.current, self.previous, self.current, progress),
        )];
        if self.is_animating() {
            lines.push((
                self.previous,
                pose(self.previous, self.previous, self.current, progress),
            ));
        }
        lines
    }
}
