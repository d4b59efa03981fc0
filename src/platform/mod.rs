//! Platform abstraction layer
//!
//! What the host window/input layer hands to the simulation:
//! - Key press/release events, already mapped to game keys
//! - A millisecond clock for wall-clock cooldowns

/// Game keys the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
    Attack,
    Escape,
    Save,
}

/// One key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    /// true on key-down, false on key-up
    pub pressed: bool,
}

impl KeyEvent {
    pub fn down(key: Key) -> Self {
        Self { key, pressed: true }
    }

    pub fn up(key: Key) -> Self {
        Self {
            key,
            pressed: false,
        }
    }
}

/// Monotonic millisecond time source
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Hand-driven clock for headless runs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now_ms: u64,
}

impl ManualClock {
    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

/// Tracks frame-to-frame elapsed time from any [`Clock`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameTimer {
    last_ms: Option<u64>,
}

impl FrameTimer {
    /// Milliseconds since the previous call (0 on the first call)
    pub fn elapsed_ms(&mut self, clock: &impl Clock) -> u64 {
        let now = clock.now_ms();
        let dt = self.last_ms.map_or(0, |last| now.saturating_sub(last));
        self.last_ms = Some(now);
        dt
    }
}
