//! Virtual clock
//!
//! Interval timers keyed to an externally supplied millisecond clock. The
//! frame loop advances the clock to the current timestamp and handles the
//! timers that came due; tests advance it by hand.

/// What a timer is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Enemy spawner
    Spawn,
    /// Match countdown (one second)
    Countdown,
}

/// Handle returned by [`Scheduler::set_interval`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerId(u32);

#[derive(Debug, Clone)]
struct Interval {
    id: TimerId,
    kind: TimerKind,
    period_ms: f64,
    next_due_ms: f64,
}

/// Repeating interval timers
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: f64,
    timers: Vec<Interval>,
    next_id: u32,
}

impl Scheduler {
    pub fn new(now_ms: f64) -> Self {
        Self {
            now_ms,
            ..Default::default()
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Register a timer that first fires one period from now
    pub fn set_interval(&mut self, kind: TimerKind, period_ms: f64) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        // A zero period would fire forever within one advance
        let period_ms = period_ms.max(1.0);
        self.timers.push(Interval {
            id,
            kind,
            period_ms,
            next_due_ms: self.now_ms + period_ms,
        });
        id
    }

    /// Cancel a timer; unknown ids are ignored
    pub fn clear(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Pop the earliest timer due at or before `until_ms`, rescheduling it
    pub fn next_due(&mut self, until_ms: f64) -> Option<TimerKind> {
        let timer = self
            .timers
            .iter_mut()
            .filter(|t| t.next_due_ms <= until_ms)
            .min_by(|a, b| a.next_due_ms.total_cmp(&b.next_due_ms))?;
        let kind = timer.kind;
        self.now_ms = self.now_ms.max(timer.next_due_ms);
        timer.next_due_ms += timer.period_ms;
        Some(kind)
    }

    /// Move the clock forward (never backward) once due timers are handled
    pub fn finish_advance(&mut self, to_ms: f64) {
        self.now_ms = self.now_ms.max(to_ms);
    }

    /// Advance to `to_ms`, returning every firing in chronological order
    pub fn advance(&mut self, to_ms: f64) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        while let Some(kind) = self.next_due(to_ms) {
            fired.push(kind);
        }
        self.finish_advance(to_ms);
        fired
    }
}
