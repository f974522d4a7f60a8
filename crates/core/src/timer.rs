//! Interval timers driven by the host's elapsed-time ticks.
//!
//! The simulation never reads a clock. The host calls `GameState::tick` with
//! the milliseconds elapsed since its previous call and each timer decides
//! whether its period has been reached.

/// A stoppable periodic timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTimer {
    period_ms: u32,
    elapsed_ms: u32,
    running: bool,
}

impl IntervalTimer {
    /// A stopped timer with the given period
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            elapsed_ms: 0,
            running: false,
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start counting from zero
    pub fn start(&mut self) {
        self.elapsed_ms = 0;
        self.running = true;
    }

    /// Start counting from zero with a new period
    pub fn restart(&mut self, period_ms: u32) {
        self.period_ms = period_ms.max(1);
        self.start();
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed_ms = 0;
    }

    /// Add elapsed time. Returns true when the period is reached.
    ///
    /// Fires at most once per call; the count restarts from zero on firing.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        if self.elapsed_ms >= self.period_ms {
            self.elapsed_ms = 0;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut t = IntervalTimer::new(10);
        assert!(!t.advance(100));
    }

    #[test]
    fn test_fires_on_period() {
        let mut t = IntervalTimer::new(800);
        t.start();
        assert!(!t.advance(500));
        assert!(t.advance(300));
        assert_eq!(t.elapsed_ms(), 0);
        assert!(!t.advance(799));
    }

    #[test]
    fn test_restart_changes_period() {
        let mut t = IntervalTimer::new(800);
        t.start();
        t.advance(500);
        t.restart(400);
        assert_eq!(t.elapsed_ms(), 0);
        assert!(t.advance(400));
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let t = IntervalTimer::new(0);
        assert_eq!(t.period_ms(), 1);
    }
}
