use std::collections::HashMap;
use std::f64::consts;

use crate::Error;

// Checks the argument count before evaluating a function body.
macro_rules! nargs {
    ($name:expr, $args:expr, $check:expr, $ifok:expr) => {
        if $check {
            Ok($ifok)
        } else {
            Err(Error::WrongNumberOfArgs {
                name: $name.to_string(),
                got: $args.len(),
            })
        }
    };
}

/// Variable bindings for evaluating an [`Expr`](crate::Expr).
///
/// A new context knows `pi` and `e`.
#[derive(Debug, Clone, PartialEq)]
pub struct Context(HashMap<String, f64>);

impl Context {
    #[must_use]
    pub fn new() -> Self {
        let mut vars = HashMap::new();
        vars.insert("pi".to_string(), consts::PI);
        vars.insert("e".to_string(), consts::E);
        Self(vars)
    }

    pub fn set_var(&mut self, name: &str, value: f64) {
        self.0.insert(name.to_string(), value);
    }

    /// Looks up a variable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownVariable`] if the name is not bound.
    pub fn var(&self, name: &str) -> Result<f64, Error> {
        self.0
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownVariable(name.to_string()))
    }

    /// Applies a built-in function.
    ///
    /// `log(x)` is the natural logarithm and `log(x, b)` the base-`b` one.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown function or a wrong argument count.
    pub fn call(name: &str, args: &[f64]) -> Result<f64, Error> {
        let unary = |f: fn(f64) -> f64| nargs!(name, args, args.len() == 1, f(args[0]));
        match name {
            "sin" => unary(f64::sin),
            "cos" => unary(f64::cos),
            "tan" => unary(f64::tan),
            "asin" => unary(f64::asin),
            "acos" => unary(f64::acos),
            "atan" => unary(f64::atan),
            "sinh" => unary(f64::sinh),
            "cosh" => unary(f64::cosh),
            "tanh" => unary(f64::tanh),
            "exp" => unary(f64::exp),
            "ln" => unary(f64::ln),
            "log10" => unary(f64::log10),
            "log2" => unary(f64::log2),
            "sqrt" => unary(f64::sqrt),
            "cbrt" => unary(f64::cbrt),
            "abs" => unary(f64::abs),
            "log" => match args {
                [x] => Ok(x.ln()),
                [x, base] => Ok(x.log(*base)),
                _ => nargs!(name, args, false, 0.0),
            },
            "pow" => nargs!(name, args, args.len() == 2, args[0].powf(args[1])),
            "min" => nargs!(
                name,
                args,
                !args.is_empty(),
                args[1..].iter().fold(args[0], |a, &item| a.min(item))
            ),
            "max" => nargs!(
                name,
                args,
                !args.is_empty(),
                args[1..].iter().fold(args[0], |a, &item| a.max(item))
            ),
            _ => Err(Error::UnknownFunction(name.to_string())),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn knows_constants_and_bound_variables() {
        let mut cx = Context::new();
        assert_relative_eq!(cx.var("pi").unwrap(), consts::PI);
        assert_eq!(cx.var("x"), Err(Error::UnknownVariable("x".to_string())));
        cx.set_var("x", 2.5);
        assert_relative_eq!(cx.var("x").unwrap(), 2.5);
    }

    #[test]
    fn calls_builtins() {
        assert_relative_eq!(Context::call("sqrt", &[9.0]).unwrap(), 3.0);
        assert_relative_eq!(Context::call("log", &[8.0, 2.0]).unwrap(), 3.0);
        assert_relative_eq!(Context::call("log", &[consts::E]).unwrap(), 1.0);
        assert_relative_eq!(Context::call("max", &[1.0, 4.0, 2.0]).unwrap(), 4.0);
        assert_relative_eq!(Context::call("pow", &[2.0, 10.0]).unwrap(), 1024.0);
    }

    #[test]
    fn checks_arity_and_names() {
        assert_eq!(
            Context::call("sin", &[1.0, 2.0]),
            Err(Error::WrongNumberOfArgs {
                name: "sin".to_string(),
                got: 2
            })
        );
        assert_eq!(
            Context::call("log", &[]),
            Err(Error::WrongNumberOfArgs {
                name: "log".to_string(),
                got: 0
            })
        );
        assert_eq!(
            Context::call("gamma", &[1.0]),
            Err(Error::UnknownFunction("gamma".to_string()))
        );
    }
}
