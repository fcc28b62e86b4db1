//! Throttle for exit navigation items.
//!
//! Защёлка с фиксированным периодом: повторный клик по пункту «выхода» в
//! течение `cooldown` не порождает второй редирект. Время берётся из
//! внедряемого `Clock`, поэтому поведение детерминировано в тестах.

use std::cell::Cell;

use chrono::{DateTime, TimeDelta, Utc};

use super::location::RedirectTarget;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-driven clock for tests and scripted harness runs.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, delta: TimeDelta) {
        self.now.set(self.now.get() + delta);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

pub const DEFAULT_EXIT_COOLDOWN_MS: i64 = 1500;

#[derive(Debug)]
pub struct ExitGuard<C: Clock> {
    cooldown: TimeDelta,
    fired_at: Option<DateTime<Utc>>,
    clock: C,
}

impl ExitGuard<SystemClock> {
    pub fn system() -> Self {
        Self::new(TimeDelta::milliseconds(DEFAULT_EXIT_COOLDOWN_MS), SystemClock)
    }
}

impl<C: Clock> ExitGuard<C> {
    pub fn new(cooldown: TimeDelta, clock: C) -> Self {
        Self {
            cooldown,
            fired_at: None,
            clock,
        }
    }

    /// Latched until `cooldown` has passed since the last accepted exit.
    pub fn is_latched(&self) -> bool {
        match self.fired_at {
            Some(at) => self.clock.now() - at < self.cooldown,
            None => false,
        }
    }

    /// Accepts the exit and returns the target, or drops it while latched.
    pub fn try_exit(&mut self, target: &RedirectTarget) -> Option<RedirectTarget> {
        if self.is_latched() {
            log::debug!("exit to {} throttled", target);
            return None;
        }
        self.fired_at = Some(self.clock.now());
        Some(target.clone())
    }
}
