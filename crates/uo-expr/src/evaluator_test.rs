use super::{evaluate_condition, ConditionContext, ConditionEvaluator, EvalError};
use crate::value::ExprValue;

fn context() -> ConditionContext {
    ConditionContext::from([
        ("CVA.ecsa".to_string(), ExprValue::Number(0.72)),
        ("CVA.enabled".to_string(), ExprValue::Bool(true)),
        ("OCV.voltage".to_string(), ExprValue::Null),
        ("mode".to_string(), ExprValue::String("pulsed".to_string())),
        ("cycles".to_string(), ExprValue::Number(3.0)),
    ])
}

#[test]
fn evaluates_numeric_comparisons() {
    let context = context();
    assert!(evaluate_condition("CVA.ecsa > 0.5", &context).expect("eval"));
    assert!(evaluate_condition("cycles >= 3", &context).expect("eval"));
    assert!(!evaluate_condition("cycles < 3", &context).expect("eval"));
    assert!(evaluate_condition("cycles <= 3 && cycles != 4", &context).expect("eval"));
}

#[test]
fn equality_is_strict_across_types() {
    let context = context();
    assert!(!evaluate_condition("cycles == '3'", &context).expect("eval"));
    assert!(evaluate_condition("cycles != '3'", &context).expect("eval"));
    assert!(evaluate_condition("mode == pulsed", &context).expect("eval"));
    assert!(evaluate_condition("OCV.voltage == null", &context).expect("eval"));
}

#[test]
fn bare_path_requires_boolean_true() {
    let context = context();
    assert!(evaluate_condition("CVA.enabled", &context).expect("eval"));
    assert!(!evaluate_condition("mode", &context).expect("eval"));
    assert!(evaluate_condition("!OCV.voltage || CVA.enabled", &context).expect("eval"));
}

#[test]
fn ordering_requires_matching_types() {
    let context = context();
    let error = evaluate_condition("mode > 1", &context).expect_err("must fail");
    assert_eq!(
        error,
        EvalError::TypeMismatch {
            left: "string",
            op: ">",
            right: "number",
        }
    );
    assert!(evaluate_condition("OCV.voltage > 0", &context).is_err());
}

#[test]
fn every_ordering_operator_reports_errors_instead_of_panicking() {
    let context = context();
    for (condition, expected) in [
        ("cycles < 4", true),
        ("cycles <= 2", false),
        ("cycles > 3", false),
        ("cycles >= 3", true),
        ("mode < 'zeta'", true),
        ("mode >= 'zeta'", false),
    ] {
        assert_eq!(evaluate_condition(condition, &context), Ok(expected), "{condition}");
    }
    for op in ["<", "<=", ">", ">="] {
        let condition = format!("CVA.enabled {op} 1");
        assert!(
            matches!(
                evaluate_condition(&condition, &context),
                Err(EvalError::TypeMismatch { left: "bool", .. })
            ),
            "{condition}"
        );
    }
}

#[test]
fn unknown_identifier_is_an_error() {
    let error = evaluate_condition("LSV.peak > 1", &context()).expect_err("must fail");
    assert_eq!(error, EvalError::UndefinedIdentifier("LSV.peak".to_string()));
}

#[test]
fn or_short_circuits_before_unknown_identifier() {
    assert!(evaluate_condition("cycles == 3 || LSV.peak > 1", &context()).expect("eval"));
    assert!(!evaluate_condition("cycles == 4 && LSV.peak > 1", &context()).expect("eval"));
}

#[test]
fn arbitrary_code_is_rejected() {
    let context = context();
    assert!(matches!(
        evaluate_condition("constructor.constructor('return 1')()", &context),
        Err(EvalError::Parse(_))
    ));
    assert!(matches!(
        evaluate_condition("cycles = 4", &context),
        Err(EvalError::Parse(_))
    ));
}

#[test]
fn caches_parsed_expressions_but_not_results() {
    let mut evaluator = ConditionEvaluator::new();
    let mut context = context();
    assert!(evaluator.evaluate("cycles == 3", &context).expect("eval"));
    context.insert("cycles".to_string(), ExprValue::Number(4.0));
    assert!(!evaluator.evaluate("cycles == 3", &context).expect("eval"));
    assert_eq!(evaluator.cached_expressions(), 1);
}
