use super::{
    active_parameters, effective_parameters, resolve_dependency, validate_parameter,
    validate_parameter_groups,
};
use uo_core::{
    DependencyGuard, ParameterDefinition, ParameterGroup, ParameterGroups, ParameterMap,
    ParameterValue, SelectOption, ValidationErrorKind,
};

fn message(error: Option<uo_core::ValidationError>) -> String {
    error.expect("expected an error").message
}

#[test]
fn required_field_treats_falsy_values_as_missing() {
    let definition = ParameterDefinition::number("Volume").required();
    for value in [
        None,
        Some(ParameterValue::from(0)),
        Some(ParameterValue::from("")),
        Some(ParameterValue::from(false)),
    ] {
        let error = validate_parameter("volume", &definition, value.as_ref()).expect("error");
        assert_eq!(error.message, "Volume is required");
        assert_eq!(error.parameter_id.as_deref(), Some("volume"));
        assert_eq!(error.kind, ValidationErrorKind::ParameterValidation);
    }
}

#[test]
fn numeric_bounds_are_inclusive() {
    let definition = ParameterDefinition::number("Volume").bounds(1.0, 10000.0);
    assert!(validate_parameter("volume", &definition, Some(&1.into())).is_none());
    assert!(validate_parameter("volume", &definition, Some(&10000.into())).is_none());
    assert_eq!(
        message(validate_parameter("volume", &definition, Some(&0.5.into()))),
        "Volume must be at least 1"
    );
    assert_eq!(
        message(validate_parameter("volume", &definition, Some(&10000.5.into()))),
        "Volume must be at most 10000"
    );
}

#[test]
fn numeric_text_is_accepted_and_garbage_is_not() {
    let definition = ParameterDefinition::number("Channel").bounds(0.0, 3.0);
    assert!(validate_parameter("channel", &definition, Some(&"2".into())).is_none());
    assert_eq!(
        message(validate_parameter("channel", &definition, Some(&"two".into()))),
        "Channel must be a number"
    );
}

#[test]
fn optional_blank_text_is_skipped() {
    let definition = ParameterDefinition::number("Wait Before").bounds(0.0, 3600.0);
    assert!(validate_parameter("wait_before", &definition, Some(&"".into())).is_none());
    assert!(validate_parameter("wait_before", &definition, None).is_none());
}

#[test]
fn select_value_must_be_an_option() {
    let definition = ParameterDefinition::select(
        "Error Handling",
        vec![SelectOption::plain("continue"), SelectOption::plain("stop")],
    );
    assert!(validate_parameter("error_handling", &definition, Some(&"stop".into())).is_none());
    assert_eq!(
        message(validate_parameter("error_handling", &definition, Some(&"panic".into()))),
        "Error Handling must be one of: continue, stop"
    );
}

#[test]
fn string_pattern_is_enforced() {
    let definition =
        ParameterDefinition::text("PLC IP Address").pattern(r"^(?:[0-9]{1,3}\.){3}[0-9]{1,3}$");
    assert!(validate_parameter("plc_ip_address", &definition, Some(&"10.0.0.12".into())).is_none());
    assert!(message(validate_parameter(
        "plc_ip_address",
        &definition,
        Some(&"localhost".into())
    ))
    .starts_with("PLC IP Address does not match pattern"));

    let broken = ParameterDefinition::text("Broken").pattern("(");
    assert!(message(validate_parameter("broken", &broken, Some(&"x".into())))
        .contains("invalid pattern"));
}

#[test]
fn ranges_need_ordered_ends_within_bounds() {
    let definition = ParameterDefinition::range("Scan Window").bounds(-2.0, 2.0);
    assert!(validate_parameter("window", &definition, Some(&[-0.5, 0.5].into())).is_none());
    assert_eq!(
        message(validate_parameter("window", &definition, Some(&[0.5, 0.5].into()))),
        "Scan Window start value must be less than end value"
    );
    assert_eq!(
        message(validate_parameter("window", &definition, Some(&[-3.0, 0.5].into()))),
        "Scan Window must be at least -2"
    );
    assert_eq!(
        message(validate_parameter("window", &definition, Some(&"wide".into()))),
        "Scan Window must be a [start, end] range"
    );
}

#[test]
fn dependency_requires_present_matching_value() {
    let definition = ParameterDefinition::number("Duration")
        .depends_on(DependencyGuard::equals("measurement_type", "OCV"));
    let mut parameters = ParameterMap::new();
    assert!(!resolve_dependency(&definition, &parameters));

    parameters.insert("measurement_type".to_string(), "CP".into());
    assert!(!resolve_dependency(&definition, &parameters));

    parameters.insert("measurement_type".to_string(), "OCV".into());
    assert!(resolve_dependency(&definition, &parameters));

    assert!(resolve_dependency(&ParameterDefinition::number("Free"), &ParameterMap::new()));
}

fn measurement_groups() -> ParameterGroups {
    let mut groups = ParameterGroups::new();
    groups.insert(
        "measurement".to_string(),
        ParameterGroup::new("Measurement").with(
            "measurement_type",
            ParameterDefinition::select(
                "Measurement Type",
                vec![SelectOption::plain("OCV"), SelectOption::plain("CP")],
            )
            .default_value("CP")
            .required(),
        ),
    );
    groups.insert(
        "ocv".to_string(),
        ParameterGroup::new("OCV").with(
            "ocv_duration",
            ParameterDefinition::number("Duration")
                .default_value(60)
                .bounds(1.0, 3600.0)
                .depends_on(DependencyGuard::equals("measurement_type", "OCV")),
        ),
    );
    groups.insert(
        "cp".to_string(),
        ParameterGroup::new("CP").with(
            "cp_duration",
            ParameterDefinition::number("Duration")
                .default_value(720)
                .bounds(1.0, 7200.0)
                .depends_on(DependencyGuard::equals("measurement_type", "CP")),
        ),
    );
    groups
}

#[test]
fn inactive_parameters_are_skipped_but_retained() {
    let groups = measurement_groups();
    let stored = ParameterMap::from([("ocv_duration".to_string(), ParameterValue::from(-5))]);

    assert!(validate_parameter_groups(&groups, &stored).is_empty());
    let effective = effective_parameters(&groups, &stored);
    assert_eq!(effective["ocv_duration"], ParameterValue::from(-5));

    let mut switched = stored.clone();
    switched.insert("measurement_type".to_string(), "OCV".into());
    let errors = validate_parameter_groups(&groups, &switched);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].parameter_id.as_deref(), Some("ocv_duration"));
    assert_eq!(errors[0].message, "Duration must be at least 1");
}

#[test]
fn active_parameters_follow_declaration_order() {
    let groups = measurement_groups();
    let parameters = effective_parameters(&groups, &ParameterMap::new());
    let ids = active_parameters(&groups, &parameters)
        .into_iter()
        .map(|(group, id, _)| format!("{group}.{id}"))
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["measurement.measurement_type", "cp.cp_duration"]);
}

#[test]
fn validation_is_deterministic() {
    let groups = measurement_groups();
    let stored = ParameterMap::from([
        ("measurement_type".to_string(), ParameterValue::from("")),
        ("cp_duration".to_string(), ParameterValue::from(0)),
    ]);
    let first = validate_parameter_groups(&groups, &stored);
    let second = validate_parameter_groups(&groups, &stored);
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].message, "Measurement Type is required");
}
