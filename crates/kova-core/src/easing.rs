use crate::error::MotionError;

/// Polynomial strength of a power curve (GSAP naming: power1 is quadratic).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Power {
    P1,
    P2,
    P3,
    P4,
}

impl Power {
    #[inline]
    fn exponent(self) -> i32 {
        match self {
            Self::P1 => 2,
            Self::P2 => 3,
            Self::P3 => 4,
            Self::P4 => 5,
        }
    }
}

/// Easing curves used by the scroll engine, section timelines and widgets.
#[derive(Clone, Copy, Debug)]
pub enum Ease {
    Linear,
    In(Power),
    Out(Power),
    InOut(Power),
    /// `min(1, 1.001 - 2^(-10t))`, the smooth-scroll default.
    ExpoOut,
    /// CSS-style cubic bezier with fixed endpoints (0,0) and (1,1).
    CubicBezier(f32, f32, f32, f32),
    Custom(fn(f32) -> f32),
}

impl Default for Ease {
    fn default() -> Self {
        Self::Out(Power::P2)
    }
}

impl Ease {
    /// Material "standard" curve used by the content panel.
    pub const STANDARD: Ease = Ease::CubicBezier(0.4, 0.0, 0.2, 1.0);

    /// Map linear time `t` in \[0, 1\] to eased progress.
    pub fn sample(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::In(p) => t.powi(p.exponent()),
            Self::Out(p) => 1.0 - (1.0 - t).powi(p.exponent()),
            Self::InOut(p) => {
                let e = p.exponent();
                if t < 0.5 {
                    2f32.powi(e - 1) * t.powi(e)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(e) / 2.0
                }
            }
            Self::ExpoOut => (1.001 - 2f32.powf(-10.0 * t)).clamp(0.0, 1.0),
            Self::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
            Self::Custom(f) => f(t),
        }
    }

    /// Parse a GSAP-style name such as `power3.out`, `expo.out` or `none`.
    pub fn from_name(name: &str) -> Result<Self, MotionError> {
        let name = name.trim();
        if matches!(name, "none" | "linear") {
            return Ok(Self::Linear);
        }
        if name == "expo.out" {
            return Ok(Self::ExpoOut);
        }
        let (family, kind) = name.split_once('.').unwrap_or((name, "out"));
        let power = match family {
            "power1" | "quad" => Power::P1,
            "power2" | "cubic" => Power::P2,
            "power3" | "quart" => Power::P3,
            "power4" | "quint" => Power::P4,
            _ => return Err(MotionError::UnknownEase(name.to_string())),
        };
        match kind {
            "in" => Ok(Self::In(power)),
            "out" => Ok(Self::Out(power)),
            "inOut" => Ok(Self::InOut(power)),
            _ => Err(MotionError::UnknownEase(name.to_string())),
        }
    }
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 || x >= 1.0 {
        return x;
    }
    let bez = |a: f32, b: f32, t: f32| {
        let u = 1.0 - t;
        3.0 * u * u * t * a + 3.0 * u * t * t * b + t * t * t
    };
    let slope = |a: f32, b: f32, t: f32| {
        let u = 1.0 - t;
        3.0 * u * u * a + 6.0 * u * t * (b - a) + 3.0 * t * t * (1.0 - b)
    };

    // Newton first, bisection if the slope flattens out.
    let mut t = x;
    for _ in 0..8 {
        let err = bez(x1, x2, t) - x;
        if err.abs() < 1e-5 {
            return bez(y1, y2, t);
        }
        let d = slope(x1, x2, t);
        if d.abs() < 1e-6 {
            break;
        }
        t = (t - err / d).clamp(0.0, 1.0);
    }
    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    t = x;
    for _ in 0..32 {
        let v = bez(x1, x2, t);
        if (v - x).abs() < 1e-5 {
            break;
        }
        if v < x {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }
    bez(y1, y2, t)
}
