//! The presentation side of a card stack.
//!
//! Cards live in whatever renders them. The controller only reaches them through
//! [`CardPresentation`], so any backend able to move, fade and detach an element can host a
//! stack.

use std::fmt;
use std::time::Duration;

use swipe_cards_config::ReflowAnimation;

use crate::animation::Curve;

pub mod headless;

pub use headless::{CardId, HeadlessCard, HeadlessCards, PresentationCall};

/// Bounding rectangle of a card, in logical units.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Transform applied on top of a card's resting position.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Translation {
    #[default]
    None,
    X(f64),
    Y(f64),
}

impl Translation {
    /// Returns the offset as an `(x, y)` pair.
    pub fn offset(self) -> (f64, f64) {
        match self {
            Translation::None => (0., 0.),
            Translation::X(x) => (x, 0.),
            Translation::Y(y) => (0., y),
        }
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Translation::None => f.write_str("none"),
            Translation::X(x) => write!(f, "translateX({x})"),
            Translation::Y(y) => write!(f, "translateY({y})"),
        }
    }
}

/// Eased transition applied to subsequent transform changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub duration: Duration,
    pub curve: Curve,
}

impl From<ReflowAnimation> for Transition {
    fn from(config: ReflowAnimation) -> Self {
        Self {
            duration: Duration::from_millis(u64::from(config.duration_ms)),
            curve: Curve::from(config.curve),
        }
    }
}

/// Notification that a subscribed card finished its transform transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionEnd<C> {
    pub card: C,
}

/// Capabilities the controller needs from rendered cards.
pub trait CardPresentation {
    /// Handle to one rendered card.
    type Card: Clone + PartialEq + fmt::Debug;

    /// Queries the card's current geometry.
    fn bounding_rect(&self, card: &Self::Card) -> Rect;

    fn set_translation(&mut self, card: &Self::Card, translation: Translation);

    fn set_opacity(&mut self, card: &Self::Card, opacity: f64);

    /// Sets the transition used for later transform changes, `None` makes them immediate.
    fn set_transition(&mut self, card: &Self::Card, transition: Option<Transition>);

    /// Requests a [`TransitionEnd`] once the card's running transition finishes.
    fn subscribe_transition_end(&mut self, card: &Self::Card);

    fn unsubscribe_transition_end(&mut self, card: &Self::Card);

    /// Returns whether the card is still part of the rendered stack.
    fn is_attached(&self, card: &Self::Card) -> bool;

    /// Removes the card from the rendered stack.
    fn detach(&mut self, card: &Self::Card);

    /// Advisory hint that the card's transform is about to change every frame.
    fn set_will_change(&mut self, card: &Self::Card, will_change: bool);
}
