//! The hello-world app served by this binary: its dynamic form, option
//! catalogue, binding tree and manifest.

use dynaform_application::{FlowStep, FlowTransition, FormFlow};
use dynaform_core::AppResult;
use dynaform_domain::{
    Binding, Call, Expand, ExpandLevel, Field, FieldKind, Form, HttpDeploy, Location, Manifest,
    ManifestCalls, Permission, SelectOption,
};
use dynaform_infrastructure::StaticOptionLookup;
use url::Url;

use crate::api_router::{
    BINDINGS_PATH, DISABLE_PATH, DYNAMIC_SOURCE_PATH, ENABLE_PATH, INSTALL_PATH, LOOKUP_PATH,
    SUBMIT_PATH, UNINSTALL_PATH,
};

pub const APP_ID: &str = "dynamic-hello-world";
pub const SUBMIT_SUMMARY: &str =
    "This was an example of a dynamic form. The form was refreshed with new options.";

const DISPLAY_NAME: &str = "Hello world app in a Dynamic Form";
const HOMEPAGE_URL: &str =
    "https://github.com/mattermost/mattermost-app-examples/tree/master/python/dynamic-hello-world";
const ICON: &str = "icon.png";
const FORM_TITLE: &str = "I am a Dynamic form!";
const FIRST_FIELD: &str = "choice_1";
const SECOND_FIELD: &str = "choice_2";

fn app_and_user_expand() -> Expand {
    Expand::none()
        .app(ExpandLevel::All)
        .acting_user(ExpandLevel::All)
}

fn numbered_options(numbers: impl IntoIterator<Item = u32>) -> AppResult<Vec<SelectOption>> {
    numbers
        .into_iter()
        .map(|number| SelectOption::new(number.to_string(), number.to_string()))
        .collect()
}

fn first_question() -> AppResult<Field> {
    Ok(
        Field::new(FIRST_FIELD, FieldKind::dynamic_select(Call::new(LOOKUP_PATH)?))?
            .required()
            .refreshing()
            .with_modal_label("What is 1 + 1?")
            .with_hint("The answer is 2."),
    )
}

fn second_question() -> AppResult<Field> {
    Ok(Field::new(
        SECOND_FIELD,
        FieldKind::static_select(numbered_options(10..=20)?),
    )?
    .required()
    .with_modal_label("What is 10 + 10?")
    .with_hint("The answer is 20."))
}

/// Builds the form shown when the channel header button is pressed.
pub fn dynamic_form() -> AppResult<Form> {
    Ok(Form::new(FORM_TITLE, ICON, vec![first_question()?])?
        .with_source(Call::new(DYNAMIC_SOURCE_PATH)?.with_expand(app_and_user_expand()))
        .with_submit(Call::new(SUBMIT_PATH)?.with_expand(app_and_user_expand())))
}

/// Builds the flow: answering the first question reveals the second one.
pub fn form_flow() -> AppResult<FormFlow> {
    FormFlow::new(
        dynamic_form()?,
        vec![FlowTransition::new(
            FlowStep::initial(),
            FIRST_FIELD,
            vec![second_question()?],
            FlowStep::new("first_answered")?,
        )?],
    )
}

/// Builds the in-process options served by the lookup endpoint.
pub fn option_catalogue() -> AppResult<StaticOptionLookup> {
    Ok(StaticOptionLookup::default().with_field(FIRST_FIELD, numbered_options(0..10)?))
}

/// Builds the binding tree.
pub fn bindings(form: Form) -> AppResult<Vec<Binding>> {
    let send_button = Binding::form("send-button", "send hello message", form)?.with_icon(ICON);

    Ok(vec![Binding::group(
        Location::ChannelHeader.as_str(),
        vec![send_button],
    )?])
}

/// Builds the manifest for a deployment reachable at `root_url`.
pub fn manifest(root_url: &Url) -> AppResult<Manifest> {
    Ok(Manifest::new(
        APP_ID,
        DISPLAY_NAME,
        HOMEPAGE_URL,
        ICON,
        HttpDeploy::new(root_url),
    )?
    .with_permissions(vec![Permission::ActAsBot])
    .with_locations(vec![Location::ChannelHeader, Location::Command])
    .with_calls(ManifestCalls {
        bindings: Some(Call::new(BINDINGS_PATH)?),
        on_install: Some(Call::new(INSTALL_PATH)?.with_expand(Expand::none().app(ExpandLevel::All))),
        on_uninstall: Some(Call::new(UNINSTALL_PATH)?),
        on_enable: Some(Call::new(ENABLE_PATH)?),
        on_disable: Some(Call::new(DISABLE_PATH)?),
    }))
}
