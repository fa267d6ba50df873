use dynaform_domain::{
    Call, CallRequest, CallResponse, Field, FieldKind, Form, GENERIC_ERROR_TEXT, SelectOption,
};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

use super::{FlowStep, FlowTransition, FormFlow, ResolveEvent};

fn call(path: &str) -> Call {
    Call::new(path).unwrap_or_else(|_| unreachable!())
}

fn options(range: std::ops::RangeInclusive<u32>) -> Vec<SelectOption> {
    range
        .map(|number| {
            SelectOption::new(number.to_string(), number.to_string())
                .unwrap_or_else(|_| unreachable!())
        })
        .collect()
}

fn first_question() -> Field {
    Field::new("choice_1", FieldKind::dynamic_select(call("/lookup")))
        .unwrap_or_else(|_| unreachable!())
        .required()
        .refreshing()
        .with_modal_label("What is 1 + 1?")
}

fn second_question() -> Field {
    Field::new("choice_2", FieldKind::static_select(options(10..=20)))
        .unwrap_or_else(|_| unreachable!())
        .required()
        .refreshing()
        .with_modal_label("What is 10 + 10?")
}

fn third_question() -> Field {
    Field::new("comment", FieldKind::text()).unwrap_or_else(|_| unreachable!())
}

fn step(name: &str) -> FlowStep {
    FlowStep::new(name).unwrap_or_else(|_| unreachable!())
}

fn template() -> Form {
    Form::new("I am a Dynamic form!", "icon.png", vec![first_question()])
        .unwrap_or_else(|_| unreachable!())
        .with_source(call("/dynamic_source"))
        .with_submit(call("/submit"))
}

fn two_step_flow() -> FormFlow {
    FormFlow::new(
        template(),
        vec![
            FlowTransition::new(
                FlowStep::initial(),
                "choice_1",
                vec![second_question()],
                step("choice_1_answered"),
            )
            .unwrap_or_else(|_| unreachable!()),
        ],
    )
    .unwrap_or_else(|_| unreachable!())
}

fn three_step_flow() -> FormFlow {
    FormFlow::new(
        template(),
        vec![
            FlowTransition::new(
                FlowStep::initial(),
                "choice_1",
                vec![second_question()],
                step("choice_1_answered"),
            )
            .unwrap_or_else(|_| unreachable!()),
            FlowTransition::new(
                step("choice_1_answered"),
                "choice_2",
                vec![third_question()],
                step("choice_2_answered"),
            )
            .unwrap_or_else(|_| unreachable!()),
        ],
    )
    .unwrap_or_else(|_| unreachable!())
}

fn values(entries: &[(&str, Value)]) -> Map<String, Value> {
    entries
        .iter()
        .map(|(name, value)| ((*name).to_owned(), value.clone()))
        .collect()
}

fn field_names(form: &Form) -> Vec<&str> {
    field_names_of(form.fields())
}

fn field_names_of(fields: &[Field]) -> Vec<&str> {
    fields.iter().map(Field::name).collect()
}

#[test]
fn open_returns_the_template() {
    let flow = two_step_flow();
    let response = flow.resolve(&ResolveEvent::open());

    assert_eq!(response, CallResponse::form(template()));
}

#[test]
fn blank_selected_field_is_treated_as_open() {
    let flow = two_step_flow();
    let response = flow.resolve(&ResolveEvent::selected("  ", Map::new()));

    assert_eq!(response, CallResponse::form(template()));
}

#[test]
fn answering_trigger_appends_dependents() {
    let flow = two_step_flow();
    let answer = json!({"label": "2", "value": "2"});
    let response = flow.resolve(&ResolveEvent::selected(
        "choice_1",
        values(&[("choice_1", answer.clone())]),
    ));

    let form = response.as_form().cloned().unwrap_or_else(template);
    assert_eq!(field_names(&form), vec!["choice_1", "choice_2"]);
    assert_eq!(form.field("choice_1").and_then(Field::value), Some(&answer));
    assert!(form.field("choice_2").and_then(Field::value).is_none());
}

#[test]
fn unrecognized_field_yields_generic_error() {
    let flow = two_step_flow();
    let response = flow.resolve(&ResolveEvent::selected(
        "choice_9",
        values(&[("choice_9", json!("x"))]),
    ));

    assert_eq!(response, CallResponse::error(GENERIC_ERROR_TEXT));
}

#[test]
fn terminal_field_yields_generic_error() {
    let flow = two_step_flow();
    let response = flow.resolve(&ResolveEvent::selected(
        "choice_2",
        values(&[("choice_1", json!("2")), ("choice_2", json!("20"))]),
    ));

    assert_eq!(response, CallResponse::generic_error());
}

#[test]
fn missing_trigger_value_yields_generic_error() {
    let flow = two_step_flow();
    let result = flow.resolve_form(&ResolveEvent::selected("choice_1", Map::new()));

    assert!(result.is_err());
    assert_eq!(
        flow.resolve(&ResolveEvent::selected("choice_1", Map::new())),
        CallResponse::generic_error()
    );
}

#[test]
fn repeated_trigger_does_not_duplicate_fields() {
    let flow = two_step_flow();
    let event = ResolveEvent::selected(
        "choice_1",
        values(&[("choice_1", json!("2")), ("choice_2", json!("20"))]),
    );

    let first = flow.resolve_form(&event).unwrap_or_else(|_| template());
    let second = flow.resolve_form(&event).unwrap_or_else(|_| template());

    assert_eq!(field_names(&first), vec!["choice_1", "choice_2"]);
    assert_eq!(first, second);
}

#[test]
fn chained_steps_apply_earlier_answers() {
    let flow = three_step_flow();
    let response = flow.resolve_form(&ResolveEvent::selected(
        "choice_2",
        values(&[("choice_1", json!("2")), ("choice_2", json!("20"))]),
    ));

    let form = response.unwrap_or_else(|_| template());
    assert_eq!(field_names(&form), vec!["choice_1", "choice_2", "comment"]);
    assert_eq!(form.field("choice_1").and_then(Field::value), Some(&json!("2")));
    assert_eq!(form.field("choice_2").and_then(Field::value), Some(&json!("20")));
}

#[test]
fn changing_earlier_answer_drops_later_steps() {
    let flow = three_step_flow();
    let form = flow
        .resolve_form(&ResolveEvent::selected(
            "choice_1",
            values(&[("choice_1", json!("3")), ("choice_2", json!("20"))]),
        ))
        .unwrap_or_else(|_| template());

    assert_eq!(field_names(&form), vec!["choice_1", "choice_2"]);
}

#[test]
fn later_trigger_without_earlier_answer_is_unreachable() {
    let flow = three_step_flow();
    let result = flow.resolve_form(&ResolveEvent::selected(
        "choice_2",
        values(&[("choice_2", json!("20"))]),
    ));

    assert!(result.is_err());
}

#[test]
fn event_from_call_request_keeps_selection_and_values() {
    let request: CallRequest = serde_json::from_value(json!({
        "selected_field": "choice_1",
        "values": {"choice_1": "2"},
    }))
    .unwrap_or_default();

    let event = ResolveEvent::from(request);
    assert_eq!(event.selected_field(), Some("choice_1"));
    assert_eq!(event.values().get("choice_1"), Some(&json!("2")));
}

#[test]
fn flow_rejects_unknown_trigger() {
    let flow = FormFlow::new(
        template(),
        vec![
            FlowTransition::new(FlowStep::initial(), "missing", Vec::new(), step("next"))
                .unwrap_or_else(|_| unreachable!()),
        ],
    );
    assert!(flow.is_err());
}

#[test]
fn flow_rejects_unreachable_step() {
    let flow = FormFlow::new(
        template(),
        vec![
            FlowTransition::new(step("orphan"), "choice_1", Vec::new(), step("next"))
                .unwrap_or_else(|_| unreachable!()),
        ],
    );
    assert!(flow.is_err());
}

#[test]
fn flow_rejects_duplicate_rows() {
    let row = FlowTransition::new(FlowStep::initial(), "choice_1", Vec::new(), step("next"))
        .unwrap_or_else(|_| unreachable!());
    let flow = FormFlow::new(template(), vec![row.clone(), row]);
    assert!(flow.is_err());
}

#[test]
fn flow_rejects_dependents_shadowing_template_fields() {
    let flow = FormFlow::new(
        template(),
        vec![
            FlowTransition::new(
                FlowStep::initial(),
                "choice_1",
                vec![first_question()],
                step("next"),
            )
            .unwrap_or_else(|_| unreachable!()),
        ],
    );
    assert!(flow.is_err());
}

#[test]
fn transition_rejects_duplicate_dependents() {
    let transition = FlowTransition::new(
        FlowStep::initial(),
        "choice_1",
        vec![second_question(), second_question()],
        step("next"),
    );
    assert!(transition.is_err());
}

#[test]
fn flow_keeps_transition_table_in_declaration_order() {
    let flow = three_step_flow();
    let rows: Vec<(&str, &str, &str)> = flow
        .transitions()
        .iter()
        .map(|row| (row.from().as_str(), row.trigger(), row.to().as_str()))
        .collect();

    assert_eq!(
        rows,
        vec![
            ("initial", "choice_1", "choice_1_answered"),
            ("choice_1_answered", "choice_2", "choice_2_answered"),
        ]
    );
    assert_eq!(field_names_of(flow.transitions()[1].append()), vec!["comment"]);
}

#[test]
fn lookup_field_is_found_by_call_path() {
    let flow = two_step_flow();
    assert_eq!(
        flow.lookup_field_for_path("/lookup").map(Field::name),
        Some("choice_1")
    );
    assert!(flow.lookup_field_for_path("/other").is_none());
}

#[test]
fn calls_cover_template_and_dependents() {
    let flow = two_step_flow();
    let paths: Vec<&str> = flow.calls().into_iter().map(Call::path).collect();
    assert_eq!(paths, vec!["/dynamic_source", "/submit", "/lookup"]);
}

proptest! {
    #[test]
    fn returned_forms_never_alias_the_template(answer in "[0-9]{1,3}", noise in "[a-z]{1,8}") {
        let flow = two_step_flow();
        let event = ResolveEvent::selected(
            "choice_1",
            values(&[
                ("choice_1", json!(answer.clone())),
                (noise.as_str(), json!(noise.clone())),
            ]),
        );

        let resolved = flow.resolve_form(&event);
        prop_assert!(resolved.is_ok());
        let resolved = resolved.unwrap_or_else(|_| template());
        let expected = json!(answer);
        prop_assert_eq!(resolved.fields().len(), template().fields().len() + 1);
        prop_assert_eq!(resolved.field("choice_1").and_then(Field::value), Some(&expected));

        let mutated = resolved.with_field_value("choice_2", json!("20"));
        prop_assert!(mutated.is_ok());
        prop_assert_eq!(flow.template(), &template());
        prop_assert_eq!(flow.resolve(&ResolveEvent::open()), CallResponse::form(template()));
    }

    #[test]
    fn any_non_trigger_field_yields_generic_error(name in "[a-z_]{1,12}") {
        prop_assume!(name != "choice_1");
        let flow = two_step_flow();
        let response = flow.resolve(&ResolveEvent::selected(
            name.clone(),
            values(&[(name.as_str(), json!("x"))]),
        ));
        prop_assert_eq!(response, CallResponse::generic_error());
    }
}
