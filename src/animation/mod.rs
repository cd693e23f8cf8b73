//! Time-based animations driven by a shared [`Clock`].

use std::time::Duration;

use keyframe::functions::{EaseOutCubic, Linear};
use keyframe::EasingFunction;

mod bezier;
mod clock;

pub use bezier::CubicBezier;
pub use clock::Clock;

#[derive(Debug, Clone)]
pub struct Animation {
    from: f64,
    to: f64,
    duration: Duration,
    start_time: Duration,
    curve: Curve,
    clock: Clock,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Linear,
    EaseOutCubic,
    CubicBezier(CubicBezier),
}

impl Animation {
    pub fn new(clock: Clock, from: f64, to: f64, duration: Duration, curve: Curve) -> Self {
        let start_time = clock.now();
        Self {
            from,
            to,
            duration,
            start_time,
            curve,
            clock,
        }
    }

    pub fn is_done(&self) -> bool {
        if self.clock.should_complete_instantly() {
            return true;
        }

        self.clock.now() >= self.start_time + self.duration
    }

    pub fn value(&self) -> f64 {
        if self.is_done() {
            return self.to;
        }

        let passed = self.clock.now().saturating_sub(self.start_time);
        let x = passed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.curve.y(x)
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Curve {
    pub fn y(self, x: f64) -> f64 {
        match self {
            Curve::Linear => Linear.y(x),
            Curve::EaseOutCubic => EaseOutCubic.y(x),
            Curve::CubicBezier(b) => b.y(x),
        }
    }
}

impl From<swipe_cards_config::Curve> for Curve {
    fn from(value: swipe_cards_config::Curve) -> Self {
        match value {
            swipe_cards_config::Curve::Linear => Curve::Linear,
            swipe_cards_config::Curve::EaseOutCubic => Curve::EaseOutCubic,
            swipe_cards_config::Curve::CubicBezier { x1, y1, x2, y2 } => {
                Curve::CubicBezier(CubicBezier::new(x1, y1, x2, y2))
            }
        }
    }
}
