use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Shared frame clock.
///
/// The clock only moves when its owner sets or advances it, which keeps every animation that
/// reads it in lockstep for the duration of a frame. Clones share the same time.
#[derive(Debug, Default, Clone)]
pub struct Clock {
    inner: Rc<RefCell<ClockInner>>,
}

#[derive(Debug, Default)]
struct ClockInner {
    time: Duration,
    complete_instantly: bool,
}

impl Clock {
    /// Creates a new clock with the given time.
    pub fn with_time(time: Duration) -> Self {
        let clock = Self::default();
        clock.set_time(time);
        clock
    }

    /// Returns the current time.
    pub fn now(&self) -> Duration {
        self.inner.borrow().time
    }

    /// Sets the current time.
    ///
    /// The clock never goes backwards; an earlier time is ignored.
    pub fn set_time(&self, time: Duration) {
        let mut inner = self.inner.borrow_mut();
        inner.time = inner.time.max(time);
    }

    pub fn advance(&self, by: Duration) {
        let mut inner = self.inner.borrow_mut();
        inner.time += by;
    }

    /// Returns whether animations should complete instantly.
    pub fn should_complete_instantly(&self) -> bool {
        self.inner.borrow().complete_instantly
    }

    /// Sets whether animations should complete instantly.
    pub fn set_complete_instantly(&self, value: bool) {
        self.inner.borrow_mut().complete_instantly = value;
    }
}

impl PartialEq for Clock {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Clock {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_time() {
        let clock = Clock::default();
        let other = clock.clone();
        clock.advance(Duration::from_millis(16));
        assert_eq!(other.now(), Duration::from_millis(16));
        assert_eq!(clock, other);
        assert_ne!(clock, Clock::default());
    }

    #[test]
    fn never_goes_backwards() {
        let clock = Clock::with_time(Duration::from_secs(2));
        clock.set_time(Duration::from_secs(1));
        assert_eq!(clock.now(), Duration::from_secs(2));
    }
}
