//! Click debounce state machine
//!
//! A press starts (or restarts) a short timer instead of dispatching right
//! away. The click count is read when the timer fires, so a second press
//! inside the window turns one pending single click into a double click.
//!
//! ```text
//! IDLE --press--> TIMING(1) --press--> TIMING(2) --timer--> DISPATCH --> IDLE
//! ```
//!
//! Timers are identified by a generation number. Every press issues a new
//! generation, so a timer started by an earlier press fires stale and is
//! ignored.

/// Default debounce window in milliseconds
pub const CLICK_DEBOUNCE_MS: u64 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickState {
    #[default]
    Idle,
    Timing {
        count: u32,
        offset: usize,
        generation: u64,
    },
}

/// A click ready for dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Click {
    pub count: u32,
    pub offset: usize,
}

/// Tracks pending presses for one widget
#[derive(Debug, Clone, Default)]
pub struct ClickTracker {
    state: ClickState,
    generation: u64,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ClickState {
        self.state
    }

    /// Record a press at `offset` and return the generation of the timer the
    /// host must schedule.
    ///
    /// A press at a different offset than the pending one starts a fresh
    /// count. `host_count` overrides the tracked count when the host already
    /// knows it (e.g. from the OS click count).
    pub fn press(&mut self, offset: usize, host_count: Option<u32>) -> u64 {
        self.generation += 1;

        let tracked = match self.state {
            ClickState::Timing {
                count,
                offset: pending,
                ..
            } if pending == offset => count + 1,
            _ => 1,
        };
        let count = host_count.unwrap_or(tracked);

        self.state = ClickState::Timing {
            count,
            offset,
            generation: self.generation,
        };
        tracing::trace!("press at {} → TIMING({}) gen {}", offset, count, self.generation);
        self.generation
    }

    /// Handle a timer firing. Returns the click to dispatch if `generation`
    /// is the current timer; stale timers return None and leave state alone.
    pub fn timer_fired(&mut self, generation: u64) -> Option<Click> {
        match self.state {
            ClickState::Timing {
                count,
                offset,
                generation: current,
            } if current == generation => {
                self.state = ClickState::Idle;
                Some(Click { count, offset })
            }
            _ => {
                tracing::trace!("ignoring stale click timer gen {}", generation);
                None
            }
        }
    }

    /// Drop any pending click (e.g. when the buffer changes under it)
    pub fn reset(&mut self) {
        self.state = ClickState::Idle;
    }
}
