use std::f64::consts;

use crate::{BinOp, Error, Expr};

impl Expr {
    /// Returns the derivative with respect to `var`, simplified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotDifferentiable`] for `%`, `min` and `max`, and
    /// [`Error::WrongNumberOfArgs`] for a malformed call.
    pub fn derivative(&self, var: &str) -> Result<Expr, Error> {
        if !self.depends_on(var) {
            return Ok(Expr::num(0.0));
        }
        match self {
            Self::Number(_) => Ok(Expr::num(0.0)),
            Self::Variable(name) => Ok(Expr::num(if name == var { 1.0 } else { 0.0 })),
            Self::Neg(u) => Ok(Expr::neg(u.derivative(var)?)),
            Self::Binary(op, u, v) => binary(*op, u, v, var),
            Self::Call(name, args) => call(name, args, var),
        }
    }
}

fn binary(op: BinOp, u: &Expr, v: &Expr, var: &str) -> Result<Expr, Error> {
    let du = u.derivative(var)?;
    let dv = v.derivative(var)?;
    Ok(match op {
        BinOp::Add => Expr::add(du, dv),
        BinOp::Sub => Expr::sub(du, dv),
        BinOp::Mul => Expr::add(
            Expr::mul(du, v.clone()),
            Expr::mul(u.clone(), dv),
        ),
        BinOp::Div => Expr::div(
            Expr::sub(Expr::mul(du, v.clone()), Expr::mul(u.clone(), dv)),
            Expr::pow(v.clone(), Expr::num(2.0)),
        ),
        BinOp::Pow => power(u, v, du, dv, var),
        BinOp::Rem => return Err(Error::NotDifferentiable("%".to_string())),
    })
}

fn power(u: &Expr, v: &Expr, du: Expr, dv: Expr, var: &str) -> Expr {
    if !v.depends_on(var) {
        // n * u^(n-1) * u'
        let reduced = Expr::sub(v.clone(), Expr::num(1.0));
        return Expr::mul(
            Expr::mul(v.clone(), Expr::pow(u.clone(), reduced)),
            du,
        );
    }
    let ln_u = Expr::call("ln", u.clone());
    if !u.depends_on(var) {
        // a^v * ln(a) * v'
        return Expr::mul(
            Expr::mul(Expr::pow(u.clone(), v.clone()), ln_u),
            dv,
        );
    }
    // u^v * (v' ln(u) + v u' / u)
    Expr::mul(
        Expr::pow(u.clone(), v.clone()),
        Expr::add(
            Expr::mul(dv, ln_u),
            Expr::div(Expr::mul(v.clone(), du), u.clone()),
        ),
    )
}

fn call(name: &str, args: &[Expr], var: &str) -> Result<Expr, Error> {
    let (u, base) = match (name, args) {
        ("pow", [u, v]) => {
            let du = u.derivative(var)?;
            let dv = v.derivative(var)?;
            return Ok(power(u, v, du, dv, var));
        }
        ("log", [u, b]) if !b.depends_on(var) => (u, Some(Expr::call("ln", b.clone()))),
        ("log10", [u]) => (u, Some(Expr::num(consts::LN_10))),
        ("log2", [u]) => (u, Some(Expr::num(consts::LN_2))),
        ("min" | "max", _) | ("log", [_, _]) => {
            return Err(Error::NotDifferentiable(format!("{name}(..)")));
        }
        (_, [u]) => (u, None),
        _ => {
            return Err(Error::WrongNumberOfArgs {
                name: name.to_string(),
                got: args.len(),
            });
        }
    };

    let du = u.derivative(var)?;
    let u = u.clone();
    let two = || Expr::num(2.0);
    let one_minus_sq = || Expr::sub(Expr::num(1.0), Expr::pow(u.clone(), two()));

    // Derivative of the outer function, evaluated at u.
    let outer = match (name, base) {
        (_, Some(ln_base)) => Expr::div(Expr::num(1.0), Expr::mul(u.clone(), ln_base)),
        ("ln" | "log", None) => Expr::div(Expr::num(1.0), u.clone()),
        ("sin", None) => Expr::call("cos", u.clone()),
        ("cos", None) => Expr::neg(Expr::call("sin", u.clone())),
        ("tan", None) => Expr::div(
            Expr::num(1.0),
            Expr::pow(Expr::call("cos", u.clone()), two()),
        ),
        ("asin", None) => Expr::div(Expr::num(1.0), Expr::call("sqrt", one_minus_sq())),
        ("acos", None) => Expr::neg(Expr::div(
            Expr::num(1.0),
            Expr::call("sqrt", one_minus_sq()),
        )),
        ("atan", None) => Expr::div(
            Expr::num(1.0),
            Expr::add(Expr::num(1.0), Expr::pow(u.clone(), two())),
        ),
        ("sinh", None) => Expr::call("cosh", u.clone()),
        ("cosh", None) => Expr::call("sinh", u.clone()),
        ("tanh", None) => Expr::div(
            Expr::num(1.0),
            Expr::pow(Expr::call("cosh", u.clone()), two()),
        ),
        ("exp", None) => Expr::call("exp", u.clone()),
        ("sqrt", None) => Expr::div(
            Expr::num(1.0),
            Expr::mul(two(), Expr::call("sqrt", u.clone())),
        ),
        ("cbrt", None) => Expr::div(
            Expr::num(1.0),
            Expr::mul(
                Expr::num(3.0),
                Expr::pow(Expr::call("cbrt", u.clone()), two()),
            ),
        ),
        ("abs", None) => Expr::div(u.clone(), Expr::call("abs", u.clone())),
        _ => return Err(Error::UnknownFunction(name.to_string())),
    };

    Ok(chain(outer, du))
}

/// Multiplies by the inner derivative, folding `1 / w * u'` into `u' / w`.
fn chain(outer: Expr, du: Expr) -> Expr {
    match outer {
        Expr::Binary(BinOp::Div, num, den) if num.as_ref() == &Expr::num(1.0) => Expr::div(du, *den),
        outer => Expr::mul(outer, du),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Context;

    use approx::assert_relative_eq;

    fn derive(src: &str) -> Expr {
        Expr::parse(src)
            .expect("should parse")
            .derivative("x")
            .expect("should differentiate")
    }

    /// Compares the symbolic derivative against a central difference.
    fn check_numerically(src: &str, at: &[f64]) {
        let f = Expr::parse(src).expect("should parse");
        let df = derive(src);
        let h = 1e-6;
        for &x in at {
            let eval = |expr: &Expr, x: f64| {
                let mut cx = Context::new();
                cx.set_var("x", x);
                expr.eval(&cx).expect("should evaluate")
            };
            let numeric = (eval(&f, x + h) - eval(&f, x - h)) / (2.0 * h);
            assert_relative_eq!(eval(&df, x), numeric, epsilon = 1e-5, max_relative = 1e-5);
        }
    }

    #[test]
    fn polynomial_derivatives_are_simplified() {
        assert_eq!(derive("x^3 - 2*x - 5").to_string(), "3 * x^2 - 2");
        assert_eq!(derive("-0.9x^2 + 1.7x + 2.5").to_string(), "-1.8 * x + 1.7");
        assert_eq!(derive("7").to_string(), "0");
        assert_eq!(derive("x").to_string(), "1");
    }

    #[test]
    fn chain_rule_for_functions() {
        assert_eq!(derive("sin(2x)").to_string(), "2 * cos(2 * x)");
        assert_eq!(derive("ln(x)").to_string(), "1 / x");
        check_numerically("sin(x)^2 + cos(3x)", &[0.3, 1.2, -2.0]);
        check_numerically("exp(-x^2) / (1 + x)", &[0.1, 0.8, 2.5]);
        check_numerically("sqrt(x) + cbrt(x) + log10(x) + log2(x) + log(x, 3)", &[0.5, 2.0, 9.0]);
        check_numerically("atan(x) + asin(x / 2) + acos(x / 3) + tanh(x)", &[0.1, 0.7]);
        check_numerically("(x + 2)^(1/3)", &[1.5, 3.0]);
        check_numerically("abs(x - 1) + tan(x) + sinh(x) * cosh(x)", &[0.2, 1.4]);
    }

    #[test]
    fn exponentials_and_general_powers() {
        check_numerically("2^x + e^x", &[0.0, 1.5]);
        check_numerically("x^x", &[0.5, 2.0]);
        check_numerically("pow(x, 3) - x", &[1.1, -0.4]);
    }

    #[test]
    fn derivative_of_derivative() {
        let second = derive("x^3 - 2*x - 5")
            .derivative("x")
            .expect("should differentiate twice");
        assert_eq!(second.to_string(), "6 * x");
    }

    #[test]
    fn rejects_non_differentiable_constructs() {
        let rem = Expr::parse("x % 2").unwrap().derivative("x");
        assert_eq!(rem, Err(Error::NotDifferentiable("%".to_string())));
        let max = Expr::parse("max(x, 1)").unwrap().derivative("x");
        assert!(matches!(max, Err(Error::NotDifferentiable(_))));
        let log = Expr::parse("log(2, x)").unwrap().derivative("x");
        assert!(matches!(log, Err(Error::NotDifferentiable(_))));
        // Constant subexpressions never need differentiating.
        assert_eq!(derive("x + (3 % 2)").to_string(), "1");
    }
}
