use std::fmt;

use super::offset::ScreenOffset;
use crate::cards::Rect;

/// Identifies one drag session over the controller's lifetime.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub(super) fn next(&mut self) -> SessionId {
        let id = *self;
        self.0 += 1;
        id
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

/// How a release resolves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The card flies off toward `target_x` and is removed.
    Commit { target_x: f64 },
    /// The card returns to rest.
    Cancel,
}

impl Outcome {
    /// Resting offset the card eases toward.
    pub fn target_x(self) -> f64 {
        match self {
            Outcome::Commit { target_x } => target_x,
            Outcome::Cancel => 0.,
        }
    }

    /// Decides the outcome of a drag of `distance` on a card `width` wide.
    ///
    /// The drag must strictly exceed `threshold * width` to commit.
    pub fn decide(distance: f64, width: f64, threshold: f64) -> Self {
        if distance.abs() > width * threshold {
            let target_x = if distance > 0. { width } else { -width };
            Outcome::Commit { target_x }
        } else {
            Outcome::Cancel
        }
    }
}

/// State of the one card currently being dragged or settling.
#[derive(Debug, Clone)]
pub struct DragSession<C> {
    pub(super) id: SessionId,
    pub(super) target: C,
    /// Geometry captured at press time.
    pub(super) target_rect: Rect,
    pub(super) start_x: f64,
    pub(super) current_x: f64,
    pub(super) offset: ScreenOffset,
    pub(super) is_dragging: bool,
}

impl<C> DragSession<C> {
    pub(super) fn new(id: SessionId, target: C, target_rect: Rect, x: f64) -> Self {
        Self {
            id,
            target,
            target_rect,
            start_x: x,
            current_x: x,
            offset: ScreenOffset::new(),
            is_dragging: true,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn target(&self) -> &C {
        &self.target
    }

    pub fn target_rect(&self) -> Rect {
        self.target_rect
    }

    pub fn start_x(&self) -> f64 {
        self.start_x
    }

    pub fn current_x(&self) -> f64 {
        self.current_x
    }

    /// Raw pointer travel since the press.
    pub fn drag_distance(&self) -> f64 {
        self.current_x - self.start_x
    }

    /// Offset most recently applied to the card.
    pub fn screen_x(&self) -> f64 {
        self.offset.current()
    }

    pub fn target_x(&self) -> f64 {
        self.offset.target()
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Resolves the pointer travel into an outcome and starts easing toward it.
    pub(super) fn release(&mut self, threshold: f64) -> Outcome {
        let outcome = Outcome::decide(self.drag_distance(), self.target_rect.width, threshold);
        self.offset.release_toward(outcome.target_x());
        self.is_dragging = false;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_threshold_cancels() {
        let width = 300.;
        let threshold = 0.35;
        let boundary = width * threshold;

        assert_eq!(Outcome::decide(boundary, width, threshold), Outcome::Cancel);
        assert_eq!(Outcome::decide(-boundary, width, threshold), Outcome::Cancel);
        assert_eq!(
            Outcome::decide(boundary + 0.001, width, threshold),
            Outcome::Commit { target_x: 300. }
        );
        assert_eq!(
            Outcome::decide(-boundary - 0.001, width, threshold),
            Outcome::Commit { target_x: -300. }
        );
    }

    #[test]
    fn zero_distance_cancels() {
        assert_eq!(Outcome::decide(0., 300., 0.), Outcome::Cancel);
    }

    #[test]
    fn release_keeps_last_screen_x() {
        let mut id = SessionId(0);
        let mut session = DragSession::new(id.next(), (), Rect::new(0., 0., 300., 400.), 100.);
        session.current_x = 160.;
        session.offset.track(40.);

        assert_eq!(session.release(0.35), Outcome::Cancel);
        assert!(!session.is_dragging());
        assert_eq!(session.screen_x(), 40.);
        assert_eq!(session.target_x(), 0.);
        assert_eq!(id, SessionId(1));
    }
}
