//! Swipeable card stack.
//!
//! Drag a card sideways: a short drag springs back, a long one flings the card off and the
//! cards behind it slide up into the gap. [`GestureController`] holds the whole state machine
//! and talks to the rendered cards through [`cards::CardPresentation`].

pub mod animation;
pub mod cards;
pub mod controller;
pub mod demo;
pub mod input;

pub use controller::{GestureController, GestureState, Options};
