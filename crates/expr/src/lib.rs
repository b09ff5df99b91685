//! Math expressions for the Radix root-finding engine.
//!
//! Expressions are written the way a student types them into a form:
//!
//! ```text
//! -0.9x^2 + 1.7x + 2.5
//! x^3 - 2*x - 5
//! (x+2)^(1/3)
//! exp(-x) - sin(2x)
//! ```
//!
//! Parsing follows the shunting-yard algorithm, but builds an [`Expr`] tree
//! instead of an RPN queue so the tree can be differentiated symbolically.
//! Multiplication may be implicit between a number, variable or closing
//! parenthesis and a following variable, function or opening parenthesis.
//!
//! [`MathEvaluator`] adapts this crate to the [`radix_core::Evaluator`] and
//! [`radix_core::Differentiator`] capabilities consumed by the solvers.

mod context;
mod derive;
mod error;
mod evaluator;
mod expr;
mod parser;
mod token;

pub use context::Context;
pub use error::Error;
pub use evaluator::MathEvaluator;
pub use expr::{BinOp, Expr};
pub use token::{Token, Tokenizer};
