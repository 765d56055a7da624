//! Deferred one-shot events, checked once per frame.
//!
//! A plain queue instead of callbacks: the owner ticks it with the frame
//! delta and gets back whatever came due.

/// Single-shot timers keyed by an event value. At most one timer per event.
#[derive(Debug, Clone)]
pub struct Schedule<E> {
    pending: Vec<(E, f32)>,
}

impl<E: Copy + PartialEq> Schedule<E> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Arm a timer for `event` firing after `delay` seconds.
    /// Returns `false` (and leaves the existing timer alone) if one is already pending.
    pub fn schedule(&mut self, event: E, delay: f32) -> bool {
        if self.is_pending(event) {
            return false;
        }
        self.pending.push((event, delay.max(0.0)));
        true
    }

    pub fn is_pending(&self, event: E) -> bool {
        self.pending.iter().any(|(e, _)| *e == event)
    }

    /// Time left on the timer for `event`.
    pub fn remaining(&self, event: E) -> Option<f32> {
        self.pending
            .iter()
            .find(|(e, _)| *e == event)
            .map(|(_, left)| *left)
    }

    /// Advance all timers by `dt` and return the events that came due, in arming order.
    pub fn tick(&mut self, dt: f32) -> Vec<E> {
        let mut due = Vec::new();
        self.pending.retain_mut(|(event, left)| {
            *left -= dt;
            if *left <= 0.0 {
                due.push(*event);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn cancel(&mut self, event: E) {
        self.pending.retain(|(e, _)| *e != event);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<E: Copy + PartialEq> Default for Schedule<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Ev {
        Reset,
        Other,
    }

    #[test]
    fn fires_once_after_delay() {
        let mut schedule = Schedule::new();
        assert!(schedule.schedule(Ev::Reset, 0.05));
        assert!(schedule.tick(0.02).is_empty());
        assert!(schedule.tick(0.02).is_empty());
        assert_eq!(schedule.tick(0.02), vec![Ev::Reset]);
        assert!(schedule.tick(0.02).is_empty());
        assert!(schedule.is_empty());
    }

    #[test]
    fn second_arm_is_refused() {
        let mut schedule = Schedule::new();
        assert!(schedule.schedule(Ev::Reset, 1.0));
        assert!(!schedule.schedule(Ev::Reset, 0.1));
        assert_eq!(schedule.remaining(Ev::Reset), Some(1.0));
        assert!(schedule.schedule(Ev::Other, 0.1));
    }

    #[test]
    fn zero_delay_fires_on_next_tick() {
        let mut schedule = Schedule::new();
        schedule.schedule(Ev::Reset, 0.0);
        assert_eq!(schedule.tick(0.0), vec![Ev::Reset]);
    }

    #[test]
    fn cancel_removes_timer() {
        let mut schedule = Schedule::new();
        schedule.schedule(Ev::Reset, 0.5);
        schedule.cancel(Ev::Reset);
        assert!(!schedule.is_pending(Ev::Reset));
        assert!(schedule.tick(1.0).is_empty());
    }
}
