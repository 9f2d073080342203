use std::time::Duration;

/// Leading-and-trailing throttle driven by caller-supplied timestamps.
///
/// `call` returns the payload when it may run immediately; otherwise the
/// payload replaces any pending one and is released by `poll` once the
/// interval has elapsed. `cancel` drops the pending payload.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval: Duration,
    last_fired: Option<Duration>,
    pending: Option<(Duration, T)>,
}

impl<T> Throttle<T> {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
            pending: None,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn call(&mut self, now: Duration, payload: T) -> Option<T> {
        match self.last_fired {
            Some(last) if now.saturating_sub(last) < self.interval => {
                self.pending = Some((last + self.interval, payload));
                None
            }
            _ => {
                self.last_fired = Some(now);
                self.pending = None;
                Some(payload)
            }
        }
    }

    /// Releases the trailing payload when it is due at `now`.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match &self.pending {
            Some((due, _)) if *due <= now => {
                self.last_fired = Some(now);
                self.pending.take().map(|(_, payload)| payload)
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
