//! Restricted condition grammar used for step conditions, execution
//! conditions and parameter dependency rules.
//!
//! Only `path op literal` comparisons joined with `&&`, `||`, `!` and
//! parentheses are accepted; nothing here can call functions or reach
//! outside the supplied context.

pub mod ast;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod value;

pub use ast::{CompareOp, Expr};
pub use evaluator::{evaluate_condition, evaluate_expr, ConditionContext, ConditionEvaluator, EvalError};
pub use lexer::{tokenize, LexError, Token, TokenKind};
pub use parser::{parse_condition, ParseError, Parser};
pub use value::ExprValue;
