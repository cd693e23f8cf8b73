//! Slide-up of the cards behind a dismissed card.
//!
//! Each trailing card first jumps down by the dismissed card's height plus a gap with
//! transitions off, so it visually stays in place once the card ahead is gone. On the next
//! frame it enables an eased transition and moves back to its resting position.

use super::session::SessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflowPhase {
    /// Offset applied with no transition; waiting for the next frame.
    JumpDown,
    /// Transition enabled and the offset cleared; waiting for the transition to end.
    EaseUp,
}

#[derive(Debug, Clone)]
pub struct Reflow<C> {
    pub(super) card: C,
    /// The committed session that scheduled this reflow.
    pub(super) session: SessionId,
    pub(super) phase: ReflowPhase,
    /// Distance the card jumped down by.
    pub(super) distance: f64,
}

impl<C> Reflow<C> {
    pub fn card(&self) -> &C {
        &self.card
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn phase(&self) -> ReflowPhase {
        self.phase
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }
}
