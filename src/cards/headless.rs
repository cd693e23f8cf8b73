//! In-memory card backend.
//!
//! Keeps the presentation state a renderer would hold and runs transform transitions against
//! a [`Clock`]. The demo binary and the tests drive the controller through it.

use std::fmt;

use tracing::trace;

use super::{CardPresentation, Rect, Transition, TransitionEnd, Translation};
use crate::animation::{Animation, Clock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub usize);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card{}", self.0)
    }
}

#[derive(Debug)]
pub struct HeadlessCard {
    rect: Rect,
    translation: Translation,
    opacity: f64,
    transition: Option<Transition>,
    running: Option<RunningTransition>,
    will_change: bool,
    attached: bool,
    subscribed: bool,
    detach_count: usize,
    finished_transitions: usize,
}

#[derive(Debug)]
struct RunningTransition {
    from: (f64, f64),
    progress: Animation,
}

/// A presentation change, as recorded when recording is enabled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PresentationCall {
    Translation(CardId, Translation),
    Opacity(CardId, f64),
    Transition(CardId, Option<Transition>),
    Subscribe(CardId),
    Unsubscribe(CardId),
    Detach(CardId),
    WillChange(CardId, bool),
}

#[derive(Debug)]
pub struct HeadlessCards {
    clock: Clock,
    cards: Vec<HeadlessCard>,
    recording: Option<Vec<PresentationCall>>,
}

impl HeadlessCard {
    fn new(rect: Rect) -> Self {
        Self {
            rect,
            translation: Translation::None,
            opacity: 1.,
            transition: None,
            running: None,
            will_change: false,
            attached: true,
            subscribed: false,
            detach_count: 0,
            finished_transitions: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The translation most recently set, ignoring any transition in progress.
    pub fn translation(&self) -> Translation {
        self.translation
    }

    /// The offset as currently rendered, including transition progress.
    pub fn rendered_offset(&self) -> (f64, f64) {
        let target = self.translation.offset();
        let Some(running) = &self.running else {
            return target;
        };

        let t = running.progress.value();
        (
            running.from.0 + (target.0 - running.from.0) * t,
            running.from.1 + (target.1 - running.from.1) * t,
        )
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }

    pub fn is_transitioning(&self) -> bool {
        self.running.is_some()
    }

    pub fn will_change(&self) -> bool {
        self.will_change
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn detach_count(&self) -> usize {
        self.detach_count
    }

    pub fn finished_transitions(&self) -> usize {
        self.finished_transitions
    }
}

impl HeadlessCards {
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            cards: Vec::new(),
            recording: None,
        }
    }

    /// Creates a vertical stack of `count` equally sized cards separated by `gap`.
    pub fn stacked(clock: Clock, count: usize, width: f64, height: f64, gap: f64) -> Self {
        let mut cards = Self::new(clock);
        for idx in 0..count {
            let y = idx as f64 * (height + gap);
            cards.push(Rect::new(0., y, width, height));
        }
        cards
    }

    pub fn push(&mut self, rect: Rect) -> CardId {
        let id = CardId(self.cards.len());
        self.cards.push(HeadlessCard::new(rect));
        id
    }

    /// Returns all cards in stacking order, detached ones included.
    pub fn ids(&self) -> Vec<CardId> {
        (0..self.cards.len()).map(CardId).collect()
    }

    /// Returns the attached cards in stacking order.
    pub fn attached_ids(&self) -> Vec<CardId> {
        self.ids()
            .into_iter()
            .filter(|id| self.cards[id.0].attached)
            .collect()
    }

    pub fn card(&self, id: CardId) -> &HeadlessCard {
        &self.cards[id.0]
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Starts recording every presentation change.
    pub fn start_recording(&mut self) {
        self.recording = Some(Vec::new());
    }

    pub fn take_recording(&mut self) -> Vec<PresentationCall> {
        self.recording.as_mut().map(std::mem::take).unwrap_or_default()
    }

    pub fn is_transition_ongoing(&self) -> bool {
        self.cards.iter().any(|card| card.running.is_some())
    }

    /// Retires finished transitions and reports the ones that subscribed cards asked for.
    pub fn advance(&mut self) -> Vec<TransitionEnd<CardId>> {
        let _span = tracy_client::span!("HeadlessCards::advance");

        let mut ended = Vec::new();
        for (idx, card) in self.cards.iter_mut().enumerate() {
            let Some(running) = &card.running else {
                continue;
            };
            if !running.progress.is_done() {
                continue;
            }

            card.running = None;
            card.finished_transitions += 1;
            trace!("card{idx} finished its transition");

            if card.subscribed {
                ended.push(TransitionEnd { card: CardId(idx) });
            }
        }
        ended
    }

    fn record(&mut self, call: PresentationCall) {
        if let Some(recording) = &mut self.recording {
            recording.push(call);
        }
    }
}

impl CardPresentation for HeadlessCards {
    type Card = CardId;

    fn bounding_rect(&self, card: &CardId) -> Rect {
        let card = &self.cards[card.0];
        let (x, y) = card.rendered_offset();
        Rect {
            x: card.rect.x + x,
            y: card.rect.y + y,
            ..card.rect
        }
    }

    fn set_translation(&mut self, id: &CardId, translation: Translation) {
        self.record(PresentationCall::Translation(*id, translation));

        let clock = self.clock.clone();
        let card = &mut self.cards[id.0];
        let from = card.rendered_offset();
        card.translation = translation;

        match card.transition {
            Some(transition) if from != translation.offset() => {
                card.running = Some(RunningTransition {
                    from,
                    progress: Animation::new(clock, 0., 1., transition.duration, transition.curve),
                });
            }
            // Nothing to animate, or transitions are off: jump.
            _ => card.running = None,
        }
    }

    fn set_opacity(&mut self, id: &CardId, opacity: f64) {
        self.record(PresentationCall::Opacity(*id, opacity));
        self.cards[id.0].opacity = opacity;
    }

    fn set_transition(&mut self, id: &CardId, transition: Option<Transition>) {
        self.record(PresentationCall::Transition(*id, transition));
        self.cards[id.0].transition = transition;
    }

    fn subscribe_transition_end(&mut self, id: &CardId) {
        self.record(PresentationCall::Subscribe(*id));
        self.cards[id.0].subscribed = true;
    }

    fn unsubscribe_transition_end(&mut self, id: &CardId) {
        self.record(PresentationCall::Unsubscribe(*id));
        self.cards[id.0].subscribed = false;
    }

    fn is_attached(&self, id: &CardId) -> bool {
        self.cards[id.0].attached
    }

    fn detach(&mut self, id: &CardId) {
        self.record(PresentationCall::Detach(*id));
        let card = &mut self.cards[id.0];
        card.attached = false;
        card.detach_count += 1;
    }

    fn set_will_change(&mut self, id: &CardId, will_change: bool) {
        self.record(PresentationCall::WillChange(*id, will_change));
        self.cards[id.0].will_change = will_change;
    }
}

impl fmt::Display for PresentationCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresentationCall::Translation(id, t) => write!(f, "{id}: transform {t}"),
            PresentationCall::Opacity(id, o) => write!(f, "{id}: opacity {o}"),
            PresentationCall::Transition(id, None) => write!(f, "{id}: transition none"),
            PresentationCall::Transition(id, Some(t)) => {
                write!(f, "{id}: transition {}ms", t.duration.as_millis())
            }
            PresentationCall::Subscribe(id) => write!(f, "{id}: subscribe transitionend"),
            PresentationCall::Unsubscribe(id) => write!(f, "{id}: unsubscribe transitionend"),
            PresentationCall::Detach(id) => write!(f, "{id}: detach"),
            PresentationCall::WillChange(id, w) => write!(f, "{id}: will-change {w}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::animation::Curve;

    fn transition() -> Transition {
        Transition {
            duration: Duration::from_millis(100),
            curve: Curve::Linear,
        }
    }

    #[test]
    fn stacked_layout() {
        let cards = HeadlessCards::stacked(Clock::default(), 3, 300., 400., 20.);
        assert_eq!(cards.ids(), vec![CardId(0), CardId(1), CardId(2)]);
        assert_eq!(cards.card(CardId(2)).rect(), Rect::new(0., 840., 300., 400.));
    }

    #[test]
    fn translation_without_transition_jumps() {
        let mut cards = HeadlessCards::stacked(Clock::default(), 1, 300., 400., 0.);
        cards.set_translation(&CardId(0), Translation::Y(50.));
        assert_eq!(cards.card(CardId(0)).rendered_offset(), (0., 50.));
        assert!(!cards.is_transition_ongoing());
    }

    #[test]
    fn transition_runs_and_reports_when_subscribed() {
        let clock = Clock::default();
        let mut cards = HeadlessCards::stacked(clock.clone(), 2, 300., 400., 0.);

        for id in cards.ids() {
            cards.set_translation(&id, Translation::Y(100.));
            cards.set_transition(&id, Some(transition()));
            cards.set_translation(&id, Translation::None);
        }
        cards.subscribe_transition_end(&CardId(1));

        clock.advance(Duration::from_millis(50));
        assert!(cards.advance().is_empty());
        let (_, y) = cards.card(CardId(0)).rendered_offset();
        assert_abs_diff_eq!(y, 50., epsilon = 1e-9);

        clock.advance(Duration::from_millis(50));
        assert_eq!(cards.advance(), vec![TransitionEnd { card: CardId(1) }]);
        assert_eq!(cards.card(CardId(0)).finished_transitions(), 1);
        assert_eq!(cards.card(CardId(0)).rendered_offset(), (0., 0.));

        // Finished transitions are reported once.
        assert!(cards.advance().is_empty());
    }

    #[test]
    fn unchanged_value_does_not_transition() {
        let mut cards = HeadlessCards::stacked(Clock::default(), 1, 300., 400., 0.);
        cards.set_transition(&CardId(0), Some(transition()));
        cards.set_translation(&CardId(0), Translation::None);
        assert!(!cards.card(CardId(0)).is_transitioning());
    }

    #[test]
    fn detach_is_counted() {
        let mut cards = HeadlessCards::stacked(Clock::default(), 2, 300., 400., 0.);
        cards.detach(&CardId(0));
        assert!(!cards.is_attached(&CardId(0)));
        assert_eq!(cards.card(CardId(0)).detach_count(), 1);
        assert_eq!(cards.attached_ids(), vec![CardId(1)]);
    }

    #[test]
    fn recording() {
        let mut cards = HeadlessCards::stacked(Clock::default(), 1, 300., 400., 0.);
        cards.set_opacity(&CardId(0), 0.5);
        cards.start_recording();
        cards.set_will_change(&CardId(0), true);
        cards.detach(&CardId(0));

        let calls: Vec<_> = cards.take_recording().iter().map(|c| c.to_string()).collect();
        assert_eq!(calls, ["card0: will-change true", "card0: detach"]);
        assert!(cards.take_recording().is_empty());
    }
}
