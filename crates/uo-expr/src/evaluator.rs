use crate::ast::{CompareOp, Expr};
use crate::parser::{parse_condition, ParseError};
use crate::value::ExprValue;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

pub type ConditionContext = BTreeMap<String, ExprValue>;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EvalError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("undefined identifier: {0}")]
    UndefinedIdentifier(String),
    #[error("type mismatch: cannot compare {left} {op} {right}")]
    TypeMismatch {
        left: &'static str,
        op: &'static str,
        right: &'static str,
    },
    #[error("number comparison with NaN")]
    NotComparable,
}

pub fn evaluate_condition(expression: &str, context: &ConditionContext) -> Result<bool, EvalError> {
    let expr = parse_condition(expression)?;
    evaluate_expr(&expr, context)
}

pub fn evaluate_expr(expr: &Expr, context: &ConditionContext) -> Result<bool, EvalError> {
    match expr {
        Expr::Compare { path, op, literal } => {
            let actual = lookup(context, path)?;
            compare(actual, *op, literal)
        }
        Expr::Truthy(path) => Ok(lookup(context, path)?.strict_eq(&ExprValue::Bool(true))),
        Expr::Not(inner) => Ok(!evaluate_expr(inner, context)?),
        Expr::And(left, right) => Ok(evaluate_expr(left, context)? && evaluate_expr(right, context)?),
        Expr::Or(left, right) => Ok(evaluate_expr(left, context)? || evaluate_expr(right, context)?),
    }
}

fn lookup<'a>(context: &'a ConditionContext, path: &str) -> Result<&'a ExprValue, EvalError> {
    context
        .get(path)
        .ok_or_else(|| EvalError::UndefinedIdentifier(path.to_string()))
}

fn compare(actual: &ExprValue, op: CompareOp, literal: &ExprValue) -> Result<bool, EvalError> {
    Ok(match op {
        CompareOp::Eq => actual.strict_eq(literal),
        CompareOp::Ne => !actual.strict_eq(literal),
        CompareOp::Lt => order(actual, op, literal)? == Ordering::Less,
        CompareOp::Le => order(actual, op, literal)? != Ordering::Greater,
        CompareOp::Gt => order(actual, op, literal)? == Ordering::Greater,
        CompareOp::Ge => order(actual, op, literal)? != Ordering::Less,
    })
}

/// Numbers order numerically and strings lexically; anything else mismatches.
fn order(actual: &ExprValue, op: CompareOp, literal: &ExprValue) -> Result<Ordering, EvalError> {
    match (actual, literal) {
        (ExprValue::Number(left), ExprValue::Number(right)) => {
            left.partial_cmp(right).ok_or(EvalError::NotComparable)
        }
        (ExprValue::String(left), ExprValue::String(right)) => Ok(left.cmp(right)),
        _ => Err(EvalError::TypeMismatch {
            left: actual.type_name(),
            op: op.symbol(),
            right: literal.type_name(),
        }),
    }
}

/// Evaluator that keeps parsed expressions around between calls. Results are
/// never cached, only the parse.
#[derive(Debug, Default)]
pub struct ConditionEvaluator {
    cache: HashMap<String, Expr>,
}

impl ConditionEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(&mut self, expression: &str, context: &ConditionContext) -> Result<bool, EvalError> {
        if let Some(expr) = self.cache.get(expression) {
            return evaluate_expr(expr, context);
        }
        let parsed = parse_condition(expression)?;
        let result = evaluate_expr(&parsed, context);
        self.cache.insert(expression.to_string(), parsed);
        result
    }

    pub fn cached_expressions(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
#[path = "evaluator_test.rs"]
mod tests;
