#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SequencerState {
    Idle,      // Waiting for start
    Running,   // Timers armed, cursor moving
    Completed, // Terminating run reached the end and signalled it
    Cancelled, // Torn down, no timer will fire again
}
