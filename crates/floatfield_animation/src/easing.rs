//! Easing curves for layer transitions
//!
//! Label fades use [`Easing::EaseOut`], the platform ease-out timing curve
//! `cubic-bezier(0, 0, 0.58, 1)`.

/// Timing curve applied to transition progress
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// `cubic-bezier(0.42, 0, 1, 1)`
    EaseIn,
    /// `cubic-bezier(0, 0, 0.58, 1)`
    EaseOut,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`
    EaseInOut,
    /// Custom curve through control points `(x1, y1)` and `(x2, y2)`
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Map linear progress in `[0, 1]` onto the curve
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => UnitBezier::new(0.42, 0.0, 1.0, 1.0).solve(t),
            Easing::EaseOut => UnitBezier::new(0.0, 0.0, 0.58, 1.0).solve(t),
            Easing::EaseInOut => UnitBezier::new(0.42, 0.0, 0.58, 1.0).solve(t),
            Easing::CubicBezier(x1, y1, x2, y2) => UnitBezier::new(x1, y1, x2, y2).solve(t),
        }
    }
}

/// Cubic bezier from (0, 0) to (1, 1), stored as polynomial coefficients
struct UnitBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

const EPSILON: f64 = 1e-7;

impl UnitBezier {
    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let (cx, cy) = (3.0 * x1 as f64, 3.0 * y1 as f64);
        let (bx, by) = (3.0 * (x2 as f64 - x1 as f64) - cx, 3.0 * (y2 as f64 - y1 as f64) - cy);
        Self {
            ax: 1.0 - cx - bx,
            bx,
            cx,
            ay: 1.0 - cy - by,
            by,
            cy,
        }
    }

    fn x_at(&self, s: f64) -> f64 {
        ((self.ax * s + self.bx) * s + self.cx) * s
    }

    fn y_at(&self, s: f64) -> f64 {
        ((self.ay * s + self.by) * s + self.cy) * s
    }

    fn dx_at(&self, s: f64) -> f64 {
        (3.0 * self.ax * s + 2.0 * self.bx) * s + self.cx
    }

    /// Curve parameter whose x equals `x`
    fn parameter_for(&self, x: f64) -> f64 {
        let mut s = x;
        for _ in 0..8 {
            let error = self.x_at(s) - x;
            if error.abs() < EPSILON {
                return s;
            }
            let slope = self.dx_at(s);
            if slope.abs() < EPSILON {
                break;
            }
            s -= error / slope;
        }

        // Newton stalled; bisect instead
        let (mut low, mut high) = (0.0, 1.0);
        s = x;
        while high - low > EPSILON {
            let value = self.x_at(s);
            if (value - x).abs() < EPSILON {
                break;
            }
            if value < x {
                low = s;
            } else {
                high = s;
            }
            s = (low + high) / 2.0;
        }
        s
    }

    fn solve(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        self.y_at(self.parameter_for(t as f64)) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_exact() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
        ] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
        }
    }

    #[test]
    fn test_ease_out_front_loads_progress() {
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::EaseOut.apply(2.0), 1.0);
    }

    #[test]
    fn test_linear_bezier_is_identity() {
        let linear = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
        for t in [0.1, 0.3, 0.7, 0.9] {
            assert!((linear.apply(t) - t).abs() < 1e-4);
        }
    }

    #[test]
    fn test_ease_out_is_monotonic() {
        let mut previous = 0.0;
        for step in 1..=20 {
            let value = Easing::EaseOut.apply(step as f32 / 20.0);
            assert!(value >= previous);
            previous = value;
        }
    }
}
