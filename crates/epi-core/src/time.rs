//! Simulation time model.
//!
//! Time is a monotonically increasing `Step` counter.  The number of steps
//! per simulated day is fixed for a run, so the current day is always
//! derived:
//!
//!   day = step / steps_per_day
//!
//! Countdown timers in the population are kept in days and decrease by
//! [`SimClock::step_days`] every step.

use std::fmt;

// ── Step ──────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);

    /// Return the step `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Step {
        Step(self.0 + n)
    }
}

impl std::ops::Add<u64> for Step {
    type Output = Step;
    #[inline]
    fn add(self, rhs: u64) -> Step {
        Step(self.0 + rhs)
    }
}

impl std::ops::Sub for Step {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Step) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current step and converts it to simulated days.
///
/// `SimClock` is cheap to copy and holds no heap data.  `day` is never
/// stored; it is recomputed from the step counter.
#[derive(Copy, Clone, Debug)]
pub struct SimClock {
    /// Steps per simulated day.  Fixed for the run.  Default: 5.
    pub steps_per_day: u32,
    /// The current step, advanced by `SimClock::advance()` each iteration.
    pub current_step: Step,
}

impl SimClock {
    pub fn new(steps_per_day: u32) -> Self {
        Self {
            steps_per_day,
            current_step: Step::ZERO,
        }
    }

    /// Advance the clock by one step.
    #[inline]
    pub fn advance(&mut self) {
        self.current_step = Step(self.current_step.0 + 1);
    }

    /// Simulated days elapsed at the current step.
    #[inline]
    pub fn day(&self) -> f64 {
        self.day_of(self.current_step)
    }

    /// Simulated days elapsed at an arbitrary step.
    #[inline]
    pub fn day_of(&self, step: Step) -> f64 {
        step.0 as f64 / self.steps_per_day as f64
    }

    /// Length of one step in days (`1 / steps_per_day`).  Every countdown
    /// timer decreases by this amount per step.
    #[inline]
    pub fn step_days(&self) -> f64 {
        1.0 / self.steps_per_day as f64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (day {:.2})", self.current_step, self.day())
    }
}
