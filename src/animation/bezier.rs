/// A CSS-style cubic Bézier timing curve through `(0, 0)` and `(1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

const EPSILON: f64 = 1e-7;

impl CubicBezier {
    /// Creates the curve from its two inner control points.
    ///
    /// `x1` and `x2` must lie in `[0, 1]` for the curve to be a function of time.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let cx = 3. * x1;
        let bx = 3. * (x2 - x1) - cx;
        let ax = 1. - cx - bx;

        let cy = 3. * y1;
        let by = 3. * (y2 - y1) - cy;
        let ay = 1. - cy - by;

        Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
        }
    }

    fn sample_x(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn sample_y(&self, t: f64) -> f64 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn sample_dx(&self, t: f64) -> f64 {
        (3. * self.ax * t + 2. * self.bx) * t + self.cx
    }

    fn solve_t(&self, x: f64) -> f64 {
        // Newton's method converges quickly for most curves.
        let mut t = x;
        for _ in 0..8 {
            let err = self.sample_x(t) - x;
            if err.abs() < EPSILON {
                return t;
            }
            let dx = self.sample_dx(t);
            if dx.abs() < 1e-6 {
                break;
            }
            t -= err / dx;
        }

        // Fall back to bisection.
        let (mut lo, mut hi) = (0., 1.);
        t = x;
        while lo < hi {
            let value = self.sample_x(t);
            if (value - x).abs() < EPSILON {
                break;
            }
            if x > value {
                lo = t;
            } else {
                hi = t;
            }
            let next = (lo + hi) / 2.;
            if next == t {
                break;
            }
            t = next;
        }
        t
    }

    /// Returns the eased progress for linear progress `x` in `[0, 1]`.
    pub fn y(&self, x: f64) -> f64 {
        if x <= 0. {
            return 0.;
        }
        if x >= 1. {
            return 1.;
        }
        self.sample_y(self.solve_t(x))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn linear_control_points_are_identity() {
        let curve = CubicBezier::new(0., 0., 1., 1.);
        for i in 0..=10 {
            let x = f64::from(i) / 10.;
            assert_abs_diff_eq!(curve.y(x), x, epsilon = 1e-5);
        }
    }

    #[test]
    fn endpoints_are_exact() {
        let curve = CubicBezier::new(0., 0., 0.31, 1.);
        assert_eq!(curve.y(0.), 0.);
        assert_eq!(curve.y(1.), 1.);
    }

    #[test]
    fn ease_out_runs_ahead_of_linear() {
        let curve = CubicBezier::new(0., 0., 0.31, 1.);
        let mut prev = 0.;
        for i in 1..10 {
            let x = f64::from(i) / 10.;
            let y = curve.y(x);
            assert!(y > x, "ease-out must lead linear progress at {x}: {y}");
            assert!(y >= prev);
            prev = y;
        }
    }
}
