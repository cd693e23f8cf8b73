//! Horizontal offset of the dragged card.

/// Offset of the dragged card from its resting position.
///
/// Follows the pointer while the card is held, then eases toward a resting target once it is
/// released. The easing is a per-frame exponential approach, so it never lands exactly on the
/// target; callers compare against a tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScreenOffset {
    /// The offset follows the pointer.
    Tracking(f64),
    /// The offset approaches `target` a fraction at a time.
    Settling { current: f64, target: f64 },
}

impl ScreenOffset {
    pub fn new() -> Self {
        Self::Tracking(0.)
    }

    /// Returns the current offset.
    pub fn current(&self) -> f64 {
        match self {
            ScreenOffset::Tracking(offset) => *offset,
            ScreenOffset::Settling { current, .. } => *current,
        }
    }

    /// Returns where the offset is heading.
    pub fn target(&self) -> f64 {
        match self {
            ScreenOffset::Tracking(offset) => *offset,
            ScreenOffset::Settling { target, .. } => *target,
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self, Self::Tracking(_))
    }

    /// Sets the offset directly while the card is held.
    pub fn track(&mut self, offset: f64) {
        *self = ScreenOffset::Tracking(offset);
    }

    /// Lets go of the card, keeping the current offset as the easing start.
    ///
    /// Releasing an already settling offset only retargets it.
    pub fn release_toward(&mut self, target: f64) {
        *self = ScreenOffset::Settling {
            current: self.current(),
            target,
        };
    }

    /// Advances a settling offset by one frame, closing `1 / divisor` of the remaining gap.
    pub fn step(&mut self, divisor: f64) {
        if let ScreenOffset::Settling { current, target } = self {
            *current += (*target - *current) / divisor;
        }
    }
}
