use thiserror::Error;

#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

/// A root-finding method and the starting values it needs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub enum Method {
    /// Halve a bracket `[a, b]` whose endpoints have opposite signs.
    Bisection { bounds: [f64; 2] },

    /// Shrink a sign-changing bracket using the false position.
    RegulaFalsi { bounds: [f64; 2] },

    /// Follow the line through the two most recent points.
    Secant { seeds: [f64; 2] },

    /// Follow the tangent from an initial guess.
    ///
    /// When `derivative` is `None` it is derived from the expression
    /// once, when the run is prepared.
    NewtonRaphson {
        initial_guess: f64,
        derivative: Option<String>,
    },

    /// Iterate `x = g(x)` from an initial guess.
    FixedPoint { initial_guess: f64 },
}

/// Identifies a [`Method`] without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub enum MethodKind {
    Bisection,
    RegulaFalsi,
    Secant,
    NewtonRaphson,
    FixedPoint,
}

impl MethodKind {
    pub const ALL: [Self; 5] = [
        Self::Bisection,
        Self::RegulaFalsi,
        Self::Secant,
        Self::NewtonRaphson,
        Self::FixedPoint,
    ];
}

impl Method {
    #[must_use]
    pub fn kind(&self) -> MethodKind {
        match self {
            Self::Bisection { .. } => MethodKind::Bisection,
            Self::RegulaFalsi { .. } => MethodKind::RegulaFalsi,
            Self::Secant { .. } => MethodKind::Secant,
            Self::NewtonRaphson { .. } => MethodKind::NewtonRaphson,
            Self::FixedPoint { .. } => MethodKind::FixedPoint,
        }
    }
}

/// Errors that can occur when validating a method config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("expression must not be empty")]
    EmptyExpression,

    #[error("tolerance must be finite and positive")]
    Tolerance,

    #[error("max_iters must be at least 1")]
    MaxIters,

    #[error("{0} must be finite and positive")]
    Limit(&'static str),
}

/// Numerical guards shared by every method.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub struct Limits {
    ceiling: f64,
    derivative_eps: f64,
    slope_eps: f64,
    seed_eps: f64,
    iteration_cap: usize,
}

impl Default for Limits {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(1e10, 1e-12, 1e-12, 1e-12, 1000).unwrap()
    }
}

impl Limits {
    /// Creates validated limits.
    ///
    /// - `ceiling`: fixed-point values beyond this magnitude count as divergence.
    /// - `derivative_eps`: Newton derivatives smaller than this fail the run.
    /// - `slope_eps`: secant slopes smaller than this fail the run.
    /// - `seed_eps`: secant seeds closer than this are rejected.
    /// - `iteration_cap`: an upper bound applied to every config's `max_iters`.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is non-finite, non-positive, or zero.
    pub fn new(
        ceiling: f64,
        derivative_eps: f64,
        slope_eps: f64,
        seed_eps: f64,
        iteration_cap: usize,
    ) -> Result<Self, ConfigError> {
        let checks = [
            ("ceiling", ceiling),
            ("derivative_eps", derivative_eps),
            ("slope_eps", slope_eps),
            ("seed_eps", seed_eps),
        ];
        if let Some((name, _)) = checks
            .iter()
            .find(|(_, value)| !value.is_finite() || *value <= 0.0)
        {
            return Err(ConfigError::Limit(name));
        }
        if iteration_cap == 0 {
            return Err(ConfigError::Limit("iteration_cap"));
        }

        Ok(Self {
            ceiling,
            derivative_eps,
            slope_eps,
            seed_eps,
            iteration_cap,
        })
    }

    #[must_use]
    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    #[must_use]
    pub fn derivative_eps(&self) -> f64 {
        self.derivative_eps
    }

    #[must_use]
    pub fn slope_eps(&self) -> f64 {
        self.slope_eps
    }

    #[must_use]
    pub fn seed_eps(&self) -> f64 {
        self.seed_eps
    }

    #[must_use]
    pub fn iteration_cap(&self) -> usize {
        self.iteration_cap
    }
}

/// The immutable input to a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize))]
pub struct MethodConfig {
    expression: String,
    method: Method,
    tolerance: f64,
    max_iters: usize,
    limits: Limits,
}

impl MethodConfig {
    /// Creates a config with default [`Limits`].
    ///
    /// # Errors
    ///
    /// Returns an error if the expression is blank, the tolerance is not
    /// finite and positive, or `max_iters` is zero.
    pub fn new(
        expression: impl Into<String>,
        method: Method,
        tolerance: f64,
        max_iters: usize,
    ) -> Result<Self, ConfigError> {
        let expression = expression.into();
        if expression.trim().is_empty() {
            return Err(ConfigError::EmptyExpression);
        }
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::Tolerance);
        }
        if max_iters == 0 {
            return Err(ConfigError::MaxIters);
        }

        Ok(Self {
            expression,
            method,
            tolerance,
            max_iters,
            limits: Limits::default(),
        })
    }

    /// Returns a copy using the given limits.
    #[must_use]
    pub fn with_limits(self, limits: Limits) -> Self {
        Self { limits, ..self }
    }

    /// Returns the default inputs for a method.
    #[must_use]
    pub fn preset(kind: MethodKind) -> Self {
        let (expression, method, tolerance, max_iters) = match kind {
            MethodKind::Bisection => (
                "-0.9x^2 + 1.7x + 2.5",
                Method::Bisection { bounds: [2.8, 3.0] },
                1e-6,
                10,
            ),
            MethodKind::RegulaFalsi => (
                "-0.9x^2 + 1.7x + 2.5",
                Method::RegulaFalsi { bounds: [2.8, 3.0] },
                1e-6,
                10,
            ),
            MethodKind::Secant => (
                "x^3 - 2*x - 5",
                Method::Secant { seeds: [2.0, 3.0] },
                1e-6,
                20,
            ),
            MethodKind::NewtonRaphson => (
                "x^3 - 2*x - 5",
                Method::NewtonRaphson {
                    initial_guess: 2.0,
                    derivative: None,
                },
                1e-4,
                20,
            ),
            MethodKind::FixedPoint => (
                "(x+2)^(1/3)",
                Method::FixedPoint { initial_guess: 1.5 },
                1e-4,
                50,
            ),
        };
        Self {
            expression: expression.to_string(),
            method,
            tolerance,
            max_iters,
            limits: Limits::default(),
        }
    }

    /// Returns the expression: `f(x)` for most methods, `g(x)` for fixed point.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn kind(&self) -> MethodKind {
        self.method.kind()
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the requested iteration budget.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the iteration budget after applying the safety cap.
    #[must_use]
    pub fn effective_max_iters(&self) -> usize {
        self.max_iters.min(self.limits.iteration_cap)
    }

    #[must_use]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }
}
