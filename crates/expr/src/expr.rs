use std::fmt;

use crate::{Context, Error, parser::parse};

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl BinOp {
    /// Returns the operator for a token symbol.
    pub(crate) fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            '%' => Some(Self::Rem),
            '^' => Some(Self::Pow),
            _ => None,
        }
    }

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Rem => '%',
            Self::Pow => '^',
        }
    }

    /// Binding strength, shared by the parser and the printer.
    pub(crate) fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 2,
            Self::Mul | Self::Div | Self::Rem => 3,
            Self::Pow => PREFIX_PRECEDENCE,
        }
    }

    pub(crate) fn is_right_assoc(self) -> bool {
        matches!(self, Self::Pow)
    }

    pub(crate) fn apply(self, l: f64, r: f64) -> f64 {
        match self {
            Self::Add => l + r,
            Self::Sub => l - r,
            Self::Mul => l * r,
            Self::Div => l / r,
            Self::Rem => l % r,
            Self::Pow => l.powf(r),
        }
    }
}

/// Prefix minus binds as tightly as `^`, so `-x^2` is `-(x^2)`.
pub(crate) const PREFIX_PRECEDENCE: u8 = 5;
const ATOM_PRECEDENCE: u8 = 9;

/// A parsed math expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Neg(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Call(String, Vec<Expr>),
}

impl Expr {
    /// Parses an expression from text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a well-formed expression.
    pub fn parse(src: &str) -> Result<Self, Error> {
        parse(src)
    }

    /// Evaluates the expression in a context.
    ///
    /// Domain errors are not reported here: `sqrt(-1)` evaluates to `NaN`
    /// and `1/0` to infinity, leaving the caller to judge the result.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown variables or functions, or a function
    /// called with an unsupported number of arguments.
    pub fn eval(&self, cx: &Context) -> Result<f64, Error> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Variable(name) => cx.var(name),
            Self::Neg(inner) => Ok(-inner.eval(cx)?),
            Self::Binary(op, l, r) => Ok(op.apply(l.eval(cx)?, r.eval(cx)?)),
            Self::Call(name, args) => {
                let args = args
                    .iter()
                    .map(|arg| arg.eval(cx))
                    .collect::<Result<Vec<_>, _>>()?;
                Context::call(name, &args)
            }
        }
    }

    /// Returns true if the variable appears anywhere in the expression.
    #[must_use]
    pub fn depends_on(&self, var: &str) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Variable(name) => name == var,
            Self::Neg(inner) => inner.depends_on(var),
            Self::Binary(_, l, r) => l.depends_on(var) || r.depends_on(var),
            Self::Call(_, args) => args.iter().any(|arg| arg.depends_on(var)),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::Number(n) if n.is_sign_negative() => PREFIX_PRECEDENCE,
            Self::Number(_) | Self::Variable(_) | Self::Call(..) => ATOM_PRECEDENCE,
            Self::Neg(_) => PREFIX_PRECEDENCE,
            Self::Binary(op, ..) => op.precedence(),
        }
    }

    // Simplifying constructors used when building derivatives.

    pub(crate) fn num(n: f64) -> Self {
        Self::Number(n)
    }

    pub(crate) fn call(name: &str, arg: Self) -> Self {
        Self::Call(name.to_string(), vec![arg])
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Neg(inner) => inner.as_number().map(|n| -n),
            _ => None,
        }
    }

    #[allow(clippy::float_cmp)]
    fn is(&self, value: f64) -> bool {
        self.as_number() == Some(value)
    }

    pub(crate) fn neg(inner: Self) -> Self {
        match inner {
            Self::Number(n) => Self::Number(-n),
            Self::Neg(inner) => *inner,
            other => Self::Neg(Box::new(other)),
        }
    }

    pub(crate) fn add(l: Self, r: Self) -> Self {
        match (l.as_number(), r.as_number()) {
            (Some(a), Some(b)) => Self::Number(a + b),
            _ if l.is(0.0) => r,
            _ if r.is(0.0) => l,
            _ => Self::Binary(BinOp::Add, Box::new(l), Box::new(r)),
        }
    }

    pub(crate) fn sub(l: Self, r: Self) -> Self {
        match (l.as_number(), r.as_number()) {
            (Some(a), Some(b)) => Self::Number(a - b),
            _ if r.is(0.0) => l,
            _ if l.is(0.0) => Self::neg(r),
            _ => Self::Binary(BinOp::Sub, Box::new(l), Box::new(r)),
        }
    }

    pub(crate) fn mul(l: Self, r: Self) -> Self {
        match (l.as_number(), r.as_number()) {
            (Some(a), Some(b)) => Self::Number(a * b),
            _ if l.is(0.0) || r.is(0.0) => Self::Number(0.0),
            _ if l.is(1.0) => r,
            _ if r.is(1.0) => l,
            _ if l.is(-1.0) => Self::neg(r),
            _ if r.is(-1.0) => Self::neg(l),
            // Gather constant factors on the left: a * (b * u) becomes (a*b) * u.
            (Some(a), None) => match r {
                Self::Binary(BinOp::Mul, inner_l, inner_r) => match inner_l.as_number() {
                    Some(b) => Self::mul(Self::Number(a * b), *inner_r),
                    None => Self::Binary(
                        BinOp::Mul,
                        Box::new(l),
                        Box::new(Self::Binary(BinOp::Mul, inner_l, inner_r)),
                    ),
                },
                r => Self::Binary(BinOp::Mul, Box::new(l), Box::new(r)),
            },
            (None, Some(_)) => Self::mul(r, l),
            _ => Self::Binary(BinOp::Mul, Box::new(l), Box::new(r)),
        }
    }

    pub(crate) fn div(l: Self, r: Self) -> Self {
        match (l.as_number(), r.as_number()) {
            (Some(a), Some(b)) if b != 0.0 => Self::Number(a / b),
            _ if l.is(0.0) => Self::Number(0.0),
            _ if r.is(1.0) => l,
            _ => Self::Binary(BinOp::Div, Box::new(l), Box::new(r)),
        }
    }

    pub(crate) fn pow(base: Self, exponent: Self) -> Self {
        match (base.as_number(), exponent.as_number()) {
            (Some(a), Some(b)) => Self::Number(a.powf(b)),
            _ if exponent.is(0.0) => Self::Number(1.0),
            _ if exponent.is(1.0) => base,
            _ => Self::Binary(BinOp::Pow, Box::new(base), Box::new(exponent)),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Variable(name) => write!(f, "{name}"),
            Self::Neg(inner) => {
                if inner.precedence() < PREFIX_PRECEDENCE {
                    write!(f, "-({inner})")
                } else {
                    write!(f, "-{inner}")
                }
            }
            Self::Binary(op, l, r) => {
                let prec = op.precedence();
                let wrap_l = l.precedence() < prec || (l.precedence() == prec && op.is_right_assoc());
                let wrap_r = r.precedence() < prec || (r.precedence() == prec && !op.is_right_assoc());
                write_operand(f, l, wrap_l)?;
                match op {
                    BinOp::Pow => write!(f, "^")?,
                    other => write!(f, " {} ", other.symbol())?,
                }
                write_operand(f, r, wrap_r)
            }
            Self::Call(name, args) => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, wrap: bool) -> fmt::Result {
    if wrap {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn eval_at(src: &str, x: f64) -> f64 {
        let mut cx = Context::new();
        cx.set_var("x", x);
        Expr::parse(src)
            .expect("should parse")
            .eval(&cx)
            .expect("should evaluate")
    }

    #[test]
    fn prints_with_minimal_parens() {
        let cases = [
            ("x^3 - 2*x - 5", "x^3 - 2 * x - 5"),
            ("(x+2)^(1/3)", "(x + 2)^(1 / 3)"),
            ("-x^2", "-x^2"),
            ("(-x)^2", "(-x)^2"),
            ("a - (b - c)", "a - (b - c)"),
            ("2^3^2", "2^3^2"),
            ("(2^3)^2", "(2^3)^2"),
            ("-(x+1)", "-(x + 1)"),
            ("log(x, 2)", "log(x, 2)"),
        ];
        for (src, printed) in cases {
            assert_eq!(Expr::parse(src).unwrap().to_string(), printed, "{src}");
        }
    }

    #[test]
    fn printed_form_reparses_to_same_value() {
        for src in ["-0.9x^2 + 1.7x + 2.5", "e^(-x) / (1 + x^2)", "2^-x * -3"] {
            let printed = Expr::parse(src).unwrap().to_string();
            assert_relative_eq!(eval_at(src, 0.7), eval_at(&printed, 0.7), epsilon = 1e-12);
        }
    }

    #[test]
    fn simplifying_constructors_fold_constants() {
        let x = || Expr::Variable("x".to_string());
        assert_eq!(Expr::add(Expr::num(0.0), x()), x());
        assert_eq!(Expr::mul(Expr::num(1.0), x()), x());
        assert_eq!(Expr::mul(x(), Expr::num(0.0)), Expr::num(0.0));
        assert_eq!(Expr::sub(Expr::num(3.0), Expr::num(1.0)), Expr::num(2.0));
        assert_eq!(Expr::pow(x(), Expr::num(1.0)), x());
        assert_eq!(Expr::neg(Expr::neg(x())), x());
        assert_eq!(
            Expr::mul(Expr::num(-0.9), Expr::mul(Expr::num(2.0), x())).to_string(),
            "-1.8 * x"
        );
    }

    #[test]
    fn depends_on_finds_variables() {
        let expr = Expr::parse("sin(2x) + e").unwrap();
        assert!(expr.depends_on("x"));
        assert!(expr.depends_on("e"));
        assert!(!expr.depends_on("y"));
    }
}
