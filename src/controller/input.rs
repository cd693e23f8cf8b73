//! Press handling for the gesture controller.

use tracing::{debug, trace};

use super::{DragSession, GestureController};
use crate::cards::CardPresentation;
use crate::input::PressInput;

impl<P: CardPresentation> PressInput<P::Card> for GestureController<P> {
    fn on_press_start(&mut self, target: Option<&P::Card>, x: f64) -> bool {
        if let Some(session) = &self.session {
            trace!("{} still active, ignoring press", session.id);
            return false;
        }

        let Some(target) = target else {
            return false;
        };

        if !self.cards.contains(target) {
            return false;
        }

        // A press cannot start on a card that is already gone, even if the host still
        // reports one.
        if !self.port.is_attached(target) {
            trace!("ignoring press on detached {target:?}");
            return false;
        }

        let target_rect = self.port.bounding_rect(target);
        if target_rect.width <= 0. {
            // Distances are normalized by the width.
            debug!("ignoring press on {target:?} with width {}", target_rect.width);
            return false;
        }

        let id = self.next_session_id.next();
        debug!("{id}: pressed {target:?} at x={x}");

        self.port.set_will_change(target, true);
        self.session = Some(DragSession::new(id, target.clone(), target_rect, x));

        true
    }

    fn on_press_move(&mut self, x: f64) {
        let Some(session) = &mut self.session else {
            return;
        };

        session.current_x = x;
    }

    fn on_press_end(&mut self) {
        let Some(session) = &mut self.session else {
            return;
        };

        let outcome = session.release(self.options.commit_threshold);
        debug!(
            "{}: released after {:.1} of {}, {outcome:?}",
            session.id,
            session.drag_distance(),
            session.target_rect.width,
        );
    }
}
