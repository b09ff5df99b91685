#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

/// The half of a bracket kept after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub enum Side {
    /// `[a, c]`, kept when `f(a)·f(c) < 0`.
    Left,

    /// `[c, b]`, kept otherwise.
    Right,
}

/// The values computed by one step, by method family.
///
/// Positional values (`a`, `b`, `x_prev`, `x_curr`, `x`) are the state
/// before the step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub enum Step {
    /// Bisection and regula falsi.
    Bracket {
        a: f64,
        b: f64,
        fa: f64,
        fb: f64,
        c: f64,
        fc: f64,
        kept: Side,
        /// Width of the bracket after the step.
        width: f64,
    },

    Secant {
        x_prev: f64,
        x_curr: f64,
        f_prev: f64,
        f_curr: f64,
        slope: f64,
        x_next: f64,
        f_next: f64,
        /// `|x_next - x_curr| / |x_next|` in percent.
        relative_error: f64,
    },

    Newton {
        x: f64,
        fx: f64,
        dfx: f64,
        x_next: f64,
    },

    FixedPoint {
        x: f64,
        gx: f64,
    },
}

/// One step of a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub struct IterationRecord {
    /// 1-based iteration index.
    pub iter: usize,

    pub step: Step,

    /// The method's absolute error for this step.
    pub error: f64,

    /// True if this step met the convergence test.
    pub converged: bool,
}

impl IterationRecord {
    /// Returns the new root estimate produced by this step.
    #[must_use]
    pub fn candidate(&self) -> f64 {
        match self.step {
            Step::Bracket { c, .. } => c,
            Step::Secant { x_next, .. } | Step::Newton { x_next, .. } => x_next,
            Step::FixedPoint { gx, .. } => gx,
        }
    }

    /// Returns the bracket width after this step, for bracketing methods.
    #[must_use]
    pub fn width(&self) -> Option<f64> {
        match self.step {
            Step::Bracket { width, .. } => Some(width),
            _ => None,
        }
    }
}
