use std::time::Duration;

use crate::error::{LandingError, Result};

/// Pace of a terminating run: a linear ramp from `start` down towards `min`,
/// a cue fired `cue_lead` before every advance and a hold of `trailing_pause`
/// on the last item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    start: Duration,
    min: Duration,
    cue_lead: Duration,
    trailing_pause: Duration,
}

impl Ramp {
    pub fn new(
        start: Duration,
        min: Duration,
        cue_lead: Duration,
        trailing_pause: Duration,
    ) -> Result<Self> {
        if min.is_zero() || min >= start {
            return Err(LandingError::InvalidTiming(format!(
                "ramp minimum {min:?} must be positive and below the start delay {start:?}"
            )));
        }
        if cue_lead >= start {
            return Err(LandingError::InvalidTiming(format!(
                "cue lead {cue_lead:?} must be shorter than the start delay {start:?}"
            )));
        }
        Ok(Self { start, min, cue_lead, trailing_pause })
    }

    /// `start - step * index` with `step = (start - min) / len`.
    pub fn delay(&self, index: usize, len: usize) -> Duration {
        let span = (self.start - self.min).as_nanos();
        let ramped = span * index as u128 / len.max(1) as u128;
        self.start.saturating_sub(nanos(ramped))
    }

    pub fn step(&self, len: usize) -> Duration {
        nanos((self.start - self.min).as_nanos() / len.max(1) as u128)
    }

    /// Offset of the cue inside a segment of length `delay`. Segments shorter
    /// than the lead are cued as soon as they begin.
    pub fn cue_offset(&self, delay: Duration) -> Duration {
        delay.saturating_sub(self.cue_lead)
    }

    pub fn trailing_pause(&self) -> Duration {
        self.trailing_pause
    }
}

fn nanos(value: u128) -> Duration {
    Duration::from_nanos(u64::try_from(value).unwrap_or(u64::MAX))
}

/// How a sequencer moves past its last item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Policy {
    /// Ramp through the list once, cueing each change, then complete.
    Terminating(Ramp),
    /// Constant interval, wrapping to the first item forever.
    Cyclic { interval: Duration },
}

impl Policy {
    pub fn cyclic(interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(LandingError::InvalidTiming(
                "cyclic interval must be positive".to_string(),
            ));
        }
        Ok(Policy::Cyclic { interval })
    }

    pub fn delay(&self, index: usize, len: usize) -> Duration {
        match self {
            Policy::Terminating(ramp) => ramp.delay(index, len),
            Policy::Cyclic { interval } => *interval,
        }
    }

    pub fn is_terminating(&self) -> bool {
        matches!(self, Policy::Terminating(_))
    }
}
