//! Form resolution state machine.
//!
//! A flow is a canonical form template plus a transition table mapping
//! `(step, trigger field)` to the fields appended when that trigger is
//! answered and the step reached afterwards. Resolution never touches the
//! template; every call clones it and applies the submitted values through
//! the pure `Form` builders.

use std::collections::HashSet;

use dynaform_core::{AppError, AppResult, NonEmptyString};
use dynaform_domain::{Call, CallRequest, CallResponse, Field, Form};
use serde_json::{Map, Value};

#[cfg(test)]
mod tests;

const INITIAL_STEP: &str = "initial";

/// Named state of a form flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlowStep(String);

impl FlowStep {
    /// Creates a validated step name.
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        Ok(Self(NonEmptyString::new(name)?.into()))
    }

    /// Returns the step every resolution starts from.
    #[must_use]
    pub fn initial() -> Self {
        Self(INITIAL_STEP.to_owned())
    }

    /// Returns the step name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// One row of the transition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowTransition {
    from: FlowStep,
    trigger: NonEmptyString,
    append: Vec<Field>,
    to: FlowStep,
}

impl FlowTransition {
    /// Creates a transition fired when `trigger` is answered in step `from`.
    pub fn new(
        from: FlowStep,
        trigger: impl Into<String>,
        append: Vec<Field>,
        to: FlowStep,
    ) -> AppResult<Self> {
        let mut seen_field_names = HashSet::new();
        for field in &append {
            if !seen_field_names.insert(field.name()) {
                return Err(AppError::Validation(format!(
                    "transition appends field '{}' twice",
                    field.name()
                )));
            }
        }

        Ok(Self {
            from,
            trigger: NonEmptyString::new(trigger)?,
            append,
            to,
        })
    }

    /// Returns the step the transition leaves.
    #[must_use]
    pub fn from(&self) -> &FlowStep {
        &self.from
    }

    /// Returns the field whose answer fires the transition.
    #[must_use]
    pub fn trigger(&self) -> &str {
        self.trigger.as_str()
    }

    /// Returns the dependent fields in declaration order.
    #[must_use]
    pub fn append(&self) -> &[Field] {
        &self.append
    }

    /// Returns the step reached afterwards.
    #[must_use]
    pub fn to(&self) -> &FlowStep {
        &self.to
    }
}

/// Input of one resolution: which field changed and the values so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveEvent {
    selected_field: Option<String>,
    values: Map<String, Value>,
}

impl ResolveEvent {
    /// Event for opening (or refreshing) the form with nothing selected.
    #[must_use]
    pub fn open() -> Self {
        Self::default()
    }

    /// Event for a change of `field_name`.
    #[must_use]
    pub fn selected(field_name: impl Into<String>, values: Map<String, Value>) -> Self {
        Self {
            selected_field: Some(field_name.into()),
            values,
        }
    }

    /// Returns the changed field, ignoring blank names.
    #[must_use]
    pub fn selected_field(&self) -> Option<&str> {
        self.selected_field
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Returns the submitted values.
    #[must_use]
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }
}

impl From<CallRequest> for ResolveEvent {
    fn from(request: CallRequest) -> Self {
        Self {
            selected_field: request.selected_field,
            values: request.values,
        }
    }
}

/// Canonical form template plus its transition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFlow {
    template: Form,
    transitions: Vec<FlowTransition>,
}

impl FormFlow {
    /// Creates a validated flow.
    ///
    /// Every transition must leave a reachable step, fire on a field that is
    /// known by then, and append only fields the template does not have.
    pub fn new(template: Form, transitions: Vec<FlowTransition>) -> AppResult<Self> {
        let mut seen_rows = HashSet::new();
        for transition in &transitions {
            if !seen_rows.insert((transition.from(), transition.trigger())) {
                return Err(AppError::Validation(format!(
                    "duplicate transition for field '{}' in step '{}'",
                    transition.trigger(),
                    transition.from().as_str()
                )));
            }

            for field in transition.append() {
                if template.field(field.name()).is_some() {
                    return Err(AppError::Validation(format!(
                        "transition on '{}' appends '{}' which the template already has",
                        transition.trigger(),
                        field.name()
                    )));
                }
            }
        }

        let mut known_fields: HashSet<&str> = template.fields().iter().map(Field::name).collect();
        let mut reachable_steps = HashSet::from([FlowStep::initial()]);
        let mut pending: Vec<&FlowTransition> = transitions.iter().collect();

        loop {
            let (ready, waiting): (Vec<_>, Vec<_>) = pending
                .into_iter()
                .partition(|transition| reachable_steps.contains(transition.from()));
            if ready.is_empty() {
                pending = waiting;
                break;
            }

            for transition in ready {
                if !known_fields.contains(transition.trigger()) {
                    return Err(AppError::Validation(format!(
                        "transition trigger '{}' is not a field known in step '{}'",
                        transition.trigger(),
                        transition.from().as_str()
                    )));
                }

                known_fields.extend(transition.append().iter().map(Field::name));
                reachable_steps.insert(transition.to().clone());
            }

            pending = waiting;
        }

        if let Some(unreachable) = pending.first() {
            return Err(AppError::Validation(format!(
                "step '{}' is not reachable from the initial step",
                unreachable.from().as_str()
            )));
        }

        Ok(Self {
            template,
            transitions,
        })
    }

    /// Returns the canonical template.
    #[must_use]
    pub fn template(&self) -> &Form {
        &self.template
    }

    /// Returns the transition table.
    #[must_use]
    pub fn transitions(&self) -> &[FlowTransition] {
        &self.transitions
    }

    /// Resolves the next form, hiding failures behind the generic error.
    #[must_use]
    pub fn resolve(&self, event: &ResolveEvent) -> CallResponse {
        match self.resolve_form(event) {
            Ok(form) => CallResponse::form(form),
            Err(_) => CallResponse::generic_error(),
        }
    }

    /// Resolves the next form.
    ///
    /// Without a selected field the template itself is returned. Otherwise
    /// the table is walked from the initial step, applying each answered
    /// trigger and appending its dependents, up to the selected field.
    pub fn resolve_form(&self, event: &ResolveEvent) -> AppResult<Form> {
        let Some(selected_field) = event.selected_field() else {
            return Ok(self.template.clone());
        };

        if !self
            .transitions
            .iter()
            .any(|transition| transition.trigger() == selected_field)
        {
            return Err(AppError::NotFound(format!(
                "field '{selected_field}' does not trigger a form change"
            )));
        }

        let values = event.values();
        let mut form = self.template.clone();
        let mut step = FlowStep::initial();

        for _ in 0..self.transitions.len() {
            let Some(transition) = self.next_transition(&step, selected_field, values) else {
                break;
            };

            let value = values.get(transition.trigger()).cloned().ok_or_else(|| {
                AppError::Validation(format!(
                    "no value submitted for field '{}'",
                    transition.trigger()
                ))
            })?;

            form = form
                .with_field_value(transition.trigger(), value)?
                .with_appended_fields(transition.append());

            if transition.trigger() == selected_field {
                return Ok(form);
            }

            step = transition.to().clone();
        }

        Err(AppError::NotFound(format!(
            "field '{selected_field}' is not reachable from the submitted values"
        )))
    }

    fn next_transition(
        &self,
        step: &FlowStep,
        selected_field: &str,
        values: &Map<String, Value>,
    ) -> Option<&FlowTransition> {
        let leaving = || {
            self.transitions
                .iter()
                .filter(move |transition| transition.from() == step)
        };

        leaving()
            .find(|transition| transition.trigger() == selected_field)
            .or_else(|| leaving().find(|transition| values.contains_key(transition.trigger())))
    }

    /// Returns every field the flow can show: template first, then dependents.
    pub fn all_fields(&self) -> impl Iterator<Item = &Field> {
        self.template.fields().iter().chain(
            self.transitions
                .iter()
                .flat_map(|transition| transition.append().iter()),
        )
    }

    /// Returns the first field whose options come from `lookup_path`.
    #[must_use]
    pub fn lookup_field_for_path(&self, lookup_path: &str) -> Option<&Field> {
        self.all_fields()
            .find(|field| field.lookup().is_some_and(|call| call.path() == lookup_path))
    }

    /// Returns every call the flow can emit.
    #[must_use]
    pub fn calls(&self) -> Vec<&Call> {
        let mut calls = self.template.calls();
        calls.extend(
            self.transitions
                .iter()
                .flat_map(|transition| transition.append().iter())
                .filter_map(Field::lookup),
        );
        calls
    }
}
