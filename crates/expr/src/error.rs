use thiserror::Error;

/// Errors raised while parsing, evaluating, or differentiating an expression.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("unexpected input '{0}'")]
    BadToken(String),

    #[error("expression is empty")]
    Empty,

    #[error("missing opening parenthesis")]
    MissingOpenParen,

    #[error("missing closing parenthesis")]
    MissingCloseParen,

    #[error("comma outside of a function call")]
    MisplacedComma,

    #[error("missing operand for '{0}'")]
    MissingOperand(String),

    #[error("missing operator between operands")]
    MissingOperator,

    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("function '{name}' does not accept {got} argument(s)")]
    WrongNumberOfArgs { name: String, got: usize },

    #[error("cannot differentiate '{0}'")]
    NotDifferentiable(String),
}
