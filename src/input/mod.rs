//! Pointer and touch input.
//!
//! Hosts deliver every pointer and touch event here, not just the ones landing on a card.
//! Both kinds collapse into a single press stream carrying one horizontal page coordinate.

use tracing::trace;

/// One touch point of a touch event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub page_x: f64,
    pub page_y: f64,
}

impl TouchPoint {
    pub fn new(page_x: f64, page_y: f64) -> Self {
        Self { page_x, page_y }
    }
}

/// A raw input event, generic over the card handle type.
///
/// `target` is the card the event originated on, if it originated on a card at all.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent<C> {
    PointerDown { target: Option<C>, page_x: f64 },
    PointerMove { page_x: f64 },
    PointerUp,
    TouchStart { target: Option<C>, touches: Vec<TouchPoint> },
    TouchMove { touches: Vec<TouchPoint> },
    TouchEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressPhase {
    Start,
    Move,
    End,
}

impl<C> InputEvent<C> {
    pub fn phase(&self) -> PressPhase {
        match self {
            InputEvent::PointerDown { .. } | InputEvent::TouchStart { .. } => PressPhase::Start,
            InputEvent::PointerMove { .. } | InputEvent::TouchMove { .. } => PressPhase::Move,
            InputEvent::PointerUp | InputEvent::TouchEnd => PressPhase::End,
        }
    }

    /// The event's horizontal page coordinate: the pointer's, or the first touch point's.
    pub fn page_x(&self) -> Option<f64> {
        match self {
            InputEvent::PointerDown { page_x, .. } | InputEvent::PointerMove { page_x } => {
                Some(*page_x)
            }
            InputEvent::TouchStart { touches, .. } | InputEvent::TouchMove { touches } => {
                touches.first().map(|touch| touch.page_x)
            }
            InputEvent::PointerUp | InputEvent::TouchEnd => None,
        }
    }

    pub fn target(&self) -> Option<&C> {
        match self {
            InputEvent::PointerDown { target, .. } | InputEvent::TouchStart { target, .. } => {
                target.as_ref()
            }
            _ => None,
        }
    }
}

/// Handler of the normalized press stream.
pub trait PressInput<C> {
    /// Handles a press at `x` on `target`.
    ///
    /// Returns `true` when the press was taken, in which case the host should suppress the
    /// event's default action (text selection, touch scrolling).
    fn on_press_start(&mut self, target: Option<&C>, x: f64) -> bool;

    fn on_press_move(&mut self, x: f64);

    fn on_press_end(&mut self);

    /// Routes a raw event to the matching handler.
    ///
    /// Returns whether the host should suppress the event's default action.
    fn process_input_event(&mut self, event: InputEvent<C>) -> bool {
        let phase = event.phase();
        let x = event.page_x();

        match (phase, x) {
            (PressPhase::Start, Some(x)) => self.on_press_start(event.target(), x),
            (PressPhase::Move, Some(x)) => {
                self.on_press_move(x);
                false
            }
            (PressPhase::End, _) => {
                self.on_press_end();
                false
            }
            (_, None) => {
                trace!("ignoring {phase:?} event without touch points");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl PressInput<u32> for Recorder {
        fn on_press_start(&mut self, target: Option<&u32>, x: f64) -> bool {
            self.calls.push(format!("start {target:?} {x}"));
            target.is_some()
        }

        fn on_press_move(&mut self, x: f64) {
            self.calls.push(format!("move {x}"));
        }

        fn on_press_end(&mut self) {
            self.calls.push(String::from("end"));
        }
    }

    #[test]
    fn pointer_and_touch_normalize_to_page_x() {
        let pointer = InputEvent::<u32>::PointerMove { page_x: 12. };
        assert_eq!(pointer.page_x(), Some(12.));

        let touch = InputEvent::<u32>::TouchMove {
            touches: vec![TouchPoint::new(40., 1.), TouchPoint::new(90., 2.)],
        };
        assert_eq!(touch.page_x(), Some(40.));

        let empty = InputEvent::<u32>::TouchMove { touches: vec![] };
        assert_eq!(empty.page_x(), None);
        assert_eq!(InputEvent::<u32>::TouchEnd.page_x(), None);
    }

    #[test]
    fn dispatch() {
        let mut recorder = Recorder::default();

        assert!(recorder.process_input_event(InputEvent::TouchStart {
            target: Some(3),
            touches: vec![TouchPoint::new(10., 0.)],
        }));
        assert!(!recorder.process_input_event(InputEvent::PointerDown {
            target: None,
            page_x: 5.,
        }));
        recorder.process_input_event(InputEvent::PointerMove { page_x: 20. });
        recorder.process_input_event(InputEvent::TouchMove { touches: vec![] });
        recorder.process_input_event(InputEvent::TouchEnd);

        assert_eq!(
            recorder.calls,
            ["start Some(3) 10", "start None 5", "move 20", "end"]
        );
    }

    #[test]
    fn touch_start_without_points_is_ignored() {
        let mut recorder = Recorder::default();
        let handled = recorder.process_input_event(InputEvent::TouchStart {
            target: Some(1),
            touches: vec![],
        });
        assert!(!handled);
        assert!(recorder.calls.is_empty());
    }
}
