use crate::{
    BinOp, Error, Expr, Token, Tokenizer,
    expr::PREFIX_PRECEDENCE,
};

/// Operators waiting on the shunting-yard stack.
#[derive(Debug)]
enum Pending {
    Binary(BinOp),
    Neg,
    OParen,
    /// A function call: its name, the arguments seen so far, and the operand
    /// stack height when the call opened.
    Function {
        name: String,
        arity: usize,
        base: usize,
    },
}

impl Pending {
    fn precedence(&self) -> u8 {
        match self {
            Self::Binary(op) => op.precedence(),
            Self::Neg => PREFIX_PRECEDENCE,
            // Never popped by an operator.
            Self::OParen | Self::Function { .. } => 0,
        }
    }
}

/// Parses an expression with the shunting-yard algorithm, reducing operators
/// onto an operand stack of trees instead of emitting RPN.
pub(crate) fn parse(src: &str) -> Result<Expr, Error> {
    let mut operands: Vec<Expr> = Vec::new();
    let mut stack: Vec<Pending> = Vec::new();

    for token in Tokenizer::new(src) {
        match token? {
            Token::Number(n) => operands.push(Expr::Number(n)),
            Token::Variable(name) => operands.push(Expr::Variable(name)),
            Token::Function(name) => stack.push(Pending::Function {
                name,
                arity: 1,
                base: operands.len(),
            }),
            Token::OParen => stack.push(Pending::OParen),
            Token::Neg => stack.push(Pending::Neg),
            Token::BinOp(symbol) => {
                let op = BinOp::from_symbol(symbol)
                    .ok_or_else(|| Error::BadToken(symbol.to_string()))?;
                let prec = op.precedence();
                let pops = |top: &Pending| {
                    let top_prec = top.precedence();
                    top_prec > prec || (top_prec == prec && !op.is_right_assoc())
                };
                while stack.last().is_some_and(pops) {
                    if let Some(top) = stack.pop() {
                        reduce(top, &mut operands)?;
                    }
                }
                stack.push(Pending::Binary(op));
            }
            Token::Comma => {
                reduce_to_paren(&mut stack, &mut operands)?;
                match stack.iter_mut().rev().nth(1) {
                    Some(Pending::Function { arity, .. }) => *arity += 1,
                    _ => return Err(Error::MisplacedComma),
                }
            }
            Token::CParen => {
                reduce_to_paren(&mut stack, &mut operands)?;
                stack.pop(); // the matching OParen
                if let Some(Pending::Function { .. }) = stack.last() {
                    if let Some(function) = stack.pop() {
                        reduce(function, &mut operands)?;
                    }
                }
            }
        }
    }

    while let Some(top) = stack.pop() {
        match top {
            Pending::OParen | Pending::Function { .. } => return Err(Error::MissingCloseParen),
            other => reduce(other, &mut operands)?,
        }
    }

    let expr = operands.pop().ok_or(Error::Empty)?;
    if operands.is_empty() {
        Ok(expr)
    } else {
        Err(Error::MissingOperator)
    }
}

/// Reduces operators until an opening parenthesis is on top of the stack.
fn reduce_to_paren(stack: &mut Vec<Pending>, operands: &mut Vec<Expr>) -> Result<(), Error> {
    loop {
        match stack.last() {
            Some(Pending::OParen) => return Ok(()),
            Some(Pending::Function { .. }) | None => return Err(Error::MissingOpenParen),
            Some(_) => {
                if let Some(top) = stack.pop() {
                    reduce(top, operands)?;
                }
            }
        }
    }
}

/// Applies one pending operator to the operand stack.
fn reduce(pending: Pending, operands: &mut Vec<Expr>) -> Result<(), Error> {
    let expr = match pending {
        Pending::Binary(op) => {
            let missing = || Error::MissingOperand(op.symbol().to_string());
            let r = operands.pop().ok_or_else(missing)?;
            let l = operands.pop().ok_or_else(missing)?;
            Expr::Binary(op, Box::new(l), Box::new(r))
        }
        Pending::Neg => {
            let inner = operands
                .pop()
                .ok_or_else(|| Error::MissingOperand("-".to_string()))?;
            Expr::Neg(Box::new(inner))
        }
        Pending::Function { name, arity, base } => {
            let got = operands.len().saturating_sub(base);
            if got != arity {
                return Err(Error::WrongNumberOfArgs { name, got });
            }
            Expr::Call(name, operands.split_off(base))
        }
        Pending::OParen => return Err(Error::MissingCloseParen),
    };
    operands.push(expr);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Box<Expr> {
        Box::new(Expr::Variable("x".to_string()))
    }

    fn n(value: f64) -> Box<Expr> {
        Box::new(Expr::Number(value))
    }

    #[test]
    fn respects_precedence_and_associativity() {
        assert_eq!(
            parse("1 + 2 * x").unwrap(),
            Expr::Binary(
                BinOp::Add,
                n(1.0),
                Box::new(Expr::Binary(BinOp::Mul, n(2.0), x()))
            )
        );
        assert_eq!(
            parse("2^3^x").unwrap(),
            Expr::Binary(
                BinOp::Pow,
                n(2.0),
                Box::new(Expr::Binary(BinOp::Pow, n(3.0), x()))
            )
        );
        assert_eq!(
            parse("8 - 3 - x").unwrap(),
            Expr::Binary(
                BinOp::Sub,
                Box::new(Expr::Binary(BinOp::Sub, n(8.0), n(3.0))),
                x()
            )
        );
    }

    #[test]
    fn prefix_minus_binds_looser_than_power() {
        assert_eq!(
            parse("-x^2").unwrap(),
            Expr::Neg(Box::new(Expr::Binary(BinOp::Pow, x(), n(2.0))))
        );
        assert_eq!(
            parse("2^-x").unwrap(),
            Expr::Binary(BinOp::Pow, n(2.0), Box::new(Expr::Neg(x())))
        );
        assert_eq!(
            parse("-2*x").unwrap(),
            Expr::Binary(BinOp::Mul, Box::new(Expr::Neg(n(2.0))), x())
        );
    }

    #[test]
    fn parses_function_calls() {
        assert_eq!(
            parse("log(x, 2)").unwrap(),
            Expr::Call("log".to_string(), vec![*x(), *n(2.0)])
        );
        assert_eq!(
            parse("sin(cos(x))").unwrap(),
            Expr::Call(
                "sin".to_string(),
                vec![Expr::Call("cos".to_string(), vec![*x()])]
            )
        );
    }

    #[test]
    fn reports_malformed_input() {
        assert_eq!(parse(""), Err(Error::Empty));
        assert_eq!(parse("(x + 1"), Err(Error::MissingCloseParen));
        assert_eq!(parse("x + 1)"), Err(Error::MissingOpenParen));
        assert_eq!(parse("x +"), Err(Error::MissingOperand("+".to_string())));
        assert_eq!(parse("2 3"), Err(Error::MissingOperator));
        assert_eq!(parse("(1, 2)"), Err(Error::MisplacedComma));
        assert_eq!(
            parse("2 * sin()"),
            Err(Error::WrongNumberOfArgs {
                name: "sin".to_string(),
                got: 0
            })
        );
    }
}
