use std::fmt;

/// Lifecycle of a single poller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Listing,
    Dispatching,
    Pacing,
    Draining,
    Stopped,
}

impl fmt::Display for PollerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PollerState::Idle => "idle",
            PollerState::Listing => "listing",
            PollerState::Dispatching => "dispatching",
            PollerState::Pacing => "pacing",
            PollerState::Draining => "draining",
            PollerState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}
