//! The swipe gesture state machine.
//!
//! [`GestureController`] owns at most one [`DragSession`]. Input only records pointer
//! positions; everything visible happens in [`GestureController::update`], which the host
//! calls once per display frame for as long as the stack is on screen. A session ends
//! when the animated offset crosses a threshold, not on any particular event:
//!
//! - settled back to rest: the card's transform is cleared and the session ends in the same
//!   frame;
//! - faded out: the card is detached, the cards behind it slide up, and the session ends
//!   when the first of them reports its transition finished.

use swipe_cards_config::Config;
use tracing::{debug, trace};

use crate::cards::{CardPresentation, Transition, TransitionEnd, Translation};

mod input;
mod offset;
mod reflow;
mod session;


pub use offset::ScreenOffset;
pub use reflow::{Reflow, ReflowPhase};
pub use session::{DragSession, Outcome, SessionId};

/// Opacity below which a released card counts as gone.
const NEARLY_INVISIBLE: f64 = 0.01;

/// Offset below which a released card counts as back at rest.
const NEARLY_AT_START: f64 = 0.01;

/// Tunables of the swipe interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    /// Fraction of the card width the drag must strictly exceed to dismiss the card.
    pub commit_threshold: f64,
    pub settle_divisor: f64,
    pub reflow_gap: f64,
    pub reflow_transition: Transition,
}

impl Default for Options {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Options {
    pub fn from_config(config: &Config) -> Self {
        Self {
            commit_threshold: config.swipe.commit_threshold.0,
            settle_divisor: config.swipe.settle_divisor.0,
            reflow_gap: config.swipe.reflow_gap.0,
            reflow_transition: Transition::from(config.reflow_animation),
        }
    }
}

/// Coarse state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    /// No session.
    Idle,
    /// A card is held and follows the pointer.
    Armed,
    /// The card was let go and eases toward its resting offset.
    Releasing,
    /// The card was detached; waiting for the trailing cards to finish sliding up.
    Committed,
}

/// Opacity of a card displaced by `screen_x` on a card `width` wide.
///
/// Falls off with the cube of the displacement, so small drags barely fade the card.
pub fn opacity_for_offset(screen_x: f64, width: f64) -> f64 {
    let normalized = screen_x.abs() / width;
    1. - normalized.powi(3)
}

#[derive(Debug)]
pub struct GestureController<P: CardPresentation> {
    port: P,
    /// Cards in stacking order, front-most first, as they were at construction.
    cards: Vec<P::Card>,
    session: Option<DragSession<P::Card>>,
    /// Pending slide-ups, in stacking order.
    reflows: Vec<Reflow<P::Card>>,
    next_session_id: SessionId,
    options: Options,
}

impl<P: CardPresentation> GestureController<P> {
    pub fn new(port: P, cards: Vec<P::Card>, options: Options) -> Self {
        debug!("gesture controller bound to {} cards", cards.len());

        Self {
            port,
            cards,
            session: None,
            reflows: Vec::new(),
            next_session_id: SessionId::default(),
            options,
        }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn cards(&self) -> &[P::Card] {
        &self.cards
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn session(&self) -> Option<&DragSession<P::Card>> {
        self.session.as_ref()
    }

    pub fn reflows(&self) -> &[Reflow<P::Card>] {
        &self.reflows
    }

    pub fn state(&self) -> GestureState {
        match &self.session {
            None => GestureState::Idle,
            Some(session) if session.is_dragging => GestureState::Armed,
            Some(session) if !self.port.is_attached(&session.target) => GestureState::Committed,
            Some(_) => GestureState::Releasing,
        }
    }

    /// Returns whether the next frames will still change something.
    pub fn are_animations_ongoing(&self) -> bool {
        self.session.is_some() || !self.reflows.is_empty()
    }

    /// Runs one display frame.
    pub fn update(&mut self) {
        let _span = tracy_client::span!("GestureController::update");

        self.advance_reflows();

        let Some(session) = &mut self.session else {
            return;
        };

        if session.is_dragging {
            session.offset.track(session.drag_distance());
        } else {
            session.offset.step(self.options.settle_divisor);
        }

        let screen_x = session.offset.current();
        let opacity = opacity_for_offset(screen_x, session.target_rect.width);
        trace!(
            "{}: screen_x={screen_x:.3} target_x={} opacity={opacity:.4}",
            session.id,
            session.offset.target(),
        );

        self.port
            .set_translation(&session.target, Translation::X(screen_x));
        self.port.set_opacity(&session.target, opacity);

        if session.is_dragging {
            return;
        }

        if opacity < NEARLY_INVISIBLE {
            // Also reached on every frame between the detach and the first trailing card
            // finishing its slide-up.
            if !self.port.is_attached(&session.target) {
                return;
            }

            self.commit();
            return;
        }

        if screen_x.abs() < NEARLY_AT_START {
            self.settle();
        }
    }

    /// Handles a finished transition on one of the cards.
    pub fn on_transition_end(&mut self, event: TransitionEnd<P::Card>) {
        let Some(idx) = self.reflows.iter().position(|r| r.card == event.card) else {
            trace!("ignoring transition end on {:?}", event.card);
            return;
        };

        let reflow = self.reflows.remove(idx);
        self.port.set_transition(&reflow.card, None);
        self.port.unsubscribe_transition_end(&reflow.card);

        if self
            .session
            .as_ref()
            .is_some_and(|session| session.id == reflow.session)
        {
            debug!(
                "{}: {:?} finished sliding up, ending session",
                reflow.session, reflow.card
            );
            self.session = None;
        } else {
            trace!("{:?} finished sliding up", reflow.card);
        }
    }

    /// Moves reflows that jumped down on a previous frame into their eased phase.
    fn advance_reflows(&mut self) {
        for reflow in &mut self.reflows {
            if reflow.phase != ReflowPhase::JumpDown {
                continue;
            }

            self.port
                .set_transition(&reflow.card, Some(self.options.reflow_transition));
            self.port.set_translation(&reflow.card, Translation::None);
            reflow.phase = ReflowPhase::EaseUp;
        }
    }

    /// Detaches the released card and starts sliding up the cards behind it.
    fn commit(&mut self) {
        let Some(session) = &self.session else {
            return;
        };

        let distance = session.target_rect.height + self.options.reflow_gap;
        let trailing: Vec<_> = self
            .cards
            .iter()
            .skip_while(|card| **card != session.target)
            .skip(1)
            .filter(|card| self.port.is_attached(card))
            .cloned()
            .collect();

        debug!(
            "{}: dismissing {:?}, {} trailing cards slide up by {distance}",
            session.id,
            session.target,
            trailing.len(),
        );

        for card in trailing {
            // A card still sliding from an earlier dismissal restarts from the new jump.
            self.reflows.retain(|r| r.card != card);

            self.port.set_transition(&card, None);
            self.port.set_translation(&card, Translation::Y(distance));
            self.port.subscribe_transition_end(&card);

            self.reflows.push(Reflow {
                card,
                session: session.id,
                phase: ReflowPhase::JumpDown,
                distance,
            });
        }

        // The dismissed card itself no longer slides anywhere.
        self.reflows.retain(|r| r.card != session.target);
        self.port.detach(&session.target);

        if !self.reflows.iter().any(|r| r.session == session.id) {
            // Nothing will ever report back, so the session is never cleared.
            debug!(
                "{}: dismissed the last card, session stays open",
                session.id
            );
        }
    }

    /// Ends a session whose card came back to rest.
    fn settle(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };

        debug!("{}: {:?} settled back", session.id, session.target);
        self.port.set_will_change(&session.target, false);
        self.port.set_translation(&session.target, Translation::None);
    }
}
