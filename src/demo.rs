//! Scripted swipe over a headless stack, driven by a frame timer.

use std::time::Duration;

use anyhow::Context as _;
use calloop::timer::{TimeoutAction, Timer};
use calloop::{EventLoop, LoopSignal};
use tracing::{debug, info};

use crate::animation::Clock;
use crate::cards::{CardId, HeadlessCards};
use crate::controller::{GestureController, GestureState, Options};
use crate::input::{InputEvent, PressInput, TouchPoint};

/// One swipe to replay.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub cards: usize,
    /// Index of the card to drag.
    pub card: usize,
    pub width: f64,
    pub height: f64,
    /// Horizontal travel of the drag, negative to the left.
    pub drag: f64,
    /// Number of move events the drag is split into.
    pub steps: usize,
    pub touch: bool,
    /// Frames to run before giving up on the stack coming to rest.
    pub max_frames: usize,
    /// Simulated time between frames.
    pub frame_duration: Duration,
    /// Wall time between frames; zero runs as fast as possible.
    pub frame_interval: Duration,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            cards: 3,
            card: 0,
            width: 300.,
            height: 400.,
            drag: 150.,
            steps: 8,
            touch: false,
            max_frames: 600,
            frame_duration: Duration::from_micros(16_667),
            frame_interval: Duration::ZERO,
        }
    }
}

const PRESS_X: f64 = 500.;
const CARD_GAP: f64 = 20.;

impl Script {
    /// Input to deliver before rendering frame `frame`.
    fn event_for(&self, frame: usize) -> Option<InputEvent<CardId>> {
        let steps = self.steps.max(1);
        let target = Some(CardId(self.card));

        if frame == 0 {
            return Some(if self.touch {
                InputEvent::TouchStart {
                    target,
                    touches: vec![TouchPoint::new(PRESS_X, 0.)],
                }
            } else {
                InputEvent::PointerDown {
                    target,
                    page_x: PRESS_X,
                }
            });
        }

        if frame <= steps {
            let x = PRESS_X + self.drag * frame as f64 / steps as f64;
            return Some(if self.touch {
                InputEvent::TouchMove {
                    touches: vec![TouchPoint::new(x, 0.)],
                }
            } else {
                InputEvent::PointerMove { page_x: x }
            });
        }

        if frame == steps + 1 {
            return Some(if self.touch {
                InputEvent::TouchEnd
            } else {
                InputEvent::PointerUp
            });
        }

        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub frames: usize,
    pub state: GestureState,
    /// Offset the dragged card was released toward.
    pub target_x: Option<f64>,
    pub detached: Vec<CardId>,
    /// Whether the stack came to rest within the frame budget.
    pub settled: bool,
}

struct DemoState {
    ctl: GestureController<HeadlessCards>,
    clock: Clock,
    script: Script,
    frame: usize,
    target_x: Option<f64>,
    settled: bool,
    signal: LoopSignal,
}

impl DemoState {
    fn on_frame(&mut self) {
        let _span = tracy_client::span!("DemoState::on_frame");

        self.clock.advance(self.script.frame_duration);

        for end in self.ctl.port_mut().advance() {
            self.ctl.on_transition_end(end);
        }

        if let Some(event) = self.script.event_for(self.frame) {
            let is_end = matches!(event, InputEvent::PointerUp | InputEvent::TouchEnd);
            let handled = self.ctl.process_input_event(event);
            if handled {
                debug!("frame {}: press taken, suppressing default action", self.frame);
            }
            if is_end {
                self.target_x = self.ctl.session().map(|s| s.target_x());
            }
        }

        self.ctl.update();
        self.frame += 1;

        let script_done = self.script.event_for(self.frame).is_none();
        let at_rest =
            !self.ctl.are_animations_ongoing() && !self.ctl.port().is_transition_ongoing();
        if script_done && at_rest {
            self.settled = true;
            self.signal.stop();
        } else if self.frame >= self.script.max_frames {
            self.signal.stop();
        }
    }
}

pub fn run(script: Script, options: Options) -> anyhow::Result<Report> {
    anyhow::ensure!(script.card < script.cards, "card index out of range");

    let mut event_loop: EventLoop<DemoState> =
        EventLoop::try_new().context("error creating event loop")?;

    let clock = Clock::default();
    let cards = HeadlessCards::stacked(
        clock.clone(),
        script.cards,
        script.width,
        script.height,
        CARD_GAP,
    );
    let ids = cards.ids();
    let ctl = GestureController::new(cards, ids, options);

    let interval = script.frame_interval;
    let mut state = DemoState {
        ctl,
        clock,
        script,
        frame: 0,
        target_x: None,
        settled: false,
        signal: event_loop.get_signal(),
    };

    // Reschedules itself every frame until the loop is stopped.
    event_loop
        .handle()
        .insert_source(Timer::immediate(), move |_, _, state| {
            state.on_frame();
            TimeoutAction::ToDuration(interval)
        })
        .map_err(|err| err.error)
        .context("error inserting frame timer")?;

    event_loop
        .run(None, &mut state, |_| ())
        .context("error running event loop")?;

    let report = Report {
        frames: state.frame,
        state: state.ctl.state(),
        target_x: state.target_x,
        detached: state
            .ctl
            .port()
            .ids()
            .into_iter()
            .filter(|id| !state.ctl.port().card(*id).is_attached())
            .collect(),
        settled: state.settled,
    };

    info!(
        "replayed swipe of {} over {} frames: {:?}",
        state.script.drag, report.frames, report.state
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_swipe_dismisses() {
        let report = run(Script::default(), Options::default()).unwrap();

        assert!(report.settled);
        assert_eq!(report.state, GestureState::Idle);
        assert_eq!(report.target_x, Some(300.));
        assert_eq!(report.detached, vec![CardId(0)]);
    }

    #[test]
    fn short_touch_swipe_springs_back() {
        let script = Script {
            drag: -60.,
            touch: true,
            ..Script::default()
        };
        let report = run(script, Options::default()).unwrap();

        assert!(report.settled);
        assert_eq!(report.state, GestureState::Idle);
        assert_eq!(report.target_x, Some(0.));
        assert!(report.detached.is_empty());
    }

    #[test]
    fn last_card_never_settles() {
        let script = Script {
            card: 2,
            max_frames: 200,
            ..Script::default()
        };
        let report = run(script, Options::default()).unwrap();

        assert!(!report.settled);
        assert_eq!(report.frames, 200);
        assert_eq!(report.state, GestureState::Committed);
        assert_eq!(report.detached, vec![CardId(2)]);
    }

    #[test]
    fn card_out_of_range() {
        let script = Script {
            card: 3,
            ..Script::default()
        };
        assert!(run(script, Options::default()).is_err());
    }

    #[test]
    fn script_events() {
        let script = Script {
            steps: 2,
            drag: 100.,
            ..Script::default()
        };

        assert!(matches!(
            script.event_for(0),
            Some(InputEvent::PointerDown { page_x, .. }) if page_x == PRESS_X
        ));
        assert_eq!(
            script.event_for(1),
            Some(InputEvent::PointerMove { page_x: 550. })
        );
        assert_eq!(
            script.event_for(2),
            Some(InputEvent::PointerMove { page_x: 600. })
        );
        assert_eq!(script.event_for(3), Some(InputEvent::PointerUp));
        assert_eq!(script.event_for(4), None);
    }
}
