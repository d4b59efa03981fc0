//! Timers
//!
//! Two kinds, kept apart on purpose:
//! - [`AnimationTicks`] count frames and run at whatever rate `tick` is called
//! - [`Cooldown`] measures simulation milliseconds and stays fair under a
//!   variable frame rate

use serde::{Deserialize, Serialize};

/// Frame counter for animations (swing arc, easing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct AnimationTicks(pub u32);

impl AnimationTicks {
    pub fn advance(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// Fraction of `duration` elapsed, clamped to 1
    pub fn progress(self, duration: u32) -> f32 {
        if duration == 0 {
            return 1.0;
        }
        (self.0 as f32 / duration as f32).min(1.0)
    }
}

/// Wall-clock cooldown in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    pub period_ms: u64,
    /// When the guarded action last happened (`None` = never)
    pub last_fired_ms: Option<u64>,
}

impl Cooldown {
    /// A cooldown that is ready immediately
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            last_fired_ms: None,
        }
    }

    /// A cooldown that starts counting at `now_ms`
    pub fn started_at(period_ms: u64, now_ms: u64) -> Self {
        Self {
            period_ms,
            last_fired_ms: Some(now_ms),
        }
    }

    pub fn is_ready(&self, now_ms: u64) -> bool {
        match self.last_fired_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > self.period_ms,
        }
    }

    pub fn fire(&mut self, now_ms: u64) {
        self.last_fired_ms = Some(now_ms);
    }

    /// Fire if ready; returns whether it fired
    pub fn try_fire(&mut self, now_ms: u64) -> bool {
        if self.is_ready(now_ms) {
            self.fire(now_ms);
            true
        } else {
            false
        }
    }
}
