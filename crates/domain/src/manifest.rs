use std::str::FromStr;

use dynaform_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::call::Call;

/// Permission an app asks for at install time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Act through the app's bot account.
    ActAsBot,
    /// Act on behalf of the acting user.
    ActAsUser,
    /// Receive remote webhooks.
    RemoteWebhooks,
    /// Use remote OAuth2.
    RemoteOauth2,
}

/// Top-level host UI location an app may bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    /// Channel header buttons.
    #[serde(rename = "/channel_header")]
    ChannelHeader,
    /// Slash commands.
    #[serde(rename = "/command")]
    Command,
    /// Post dropdown menu.
    #[serde(rename = "/post_menu")]
    PostMenu,
    /// Embedded post actions.
    #[serde(rename = "/in_post")]
    InPost,
}

impl Location {
    /// Returns the wire value of the location.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChannelHeader => "/channel_header",
            Self::Command => "/command",
            Self::PostMenu => "/post_menu",
            Self::InPost => "/in_post",
        }
    }
}

impl FromStr for Location {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "/channel_header" => Ok(Self::ChannelHeader),
            "/command" => Ok(Self::Command),
            "/post_menu" => Ok(Self::PostMenu),
            "/in_post" => Ok(Self::InPost),
            _ => Err(AppError::Validation(format!("unknown location '{value}'"))),
        }
    }
}

/// HTTP deployment of the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpDeploy {
    root_url: String,
}

impl HttpDeploy {
    /// Creates a deployment rooted at an absolute URL.
    #[must_use]
    pub fn new(root_url: &Url) -> Self {
        Self {
            root_url: root_url.as_str().trim_end_matches('/').to_owned(),
        }
    }

    /// Returns the root URL calls are resolved against.
    #[must_use]
    pub fn root_url(&self) -> &str {
        self.root_url.as_str()
    }
}

/// Static descriptor the host fetches before installing the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    app_id: NonEmptyString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    display_name: NonEmptyString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    homepage_url: String,
    icon: String,
    #[serde(default)]
    requested_permissions: Vec<Permission>,
    #[serde(default)]
    requested_locations: Vec<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bindings: Option<Call>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    on_install: Option<Call>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    on_uninstall: Option<Call>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    on_enable: Option<Call>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    on_disable: Option<Call>,
    http: HttpDeploy,
}

/// Lifecycle calls declared by a manifest.
#[derive(Debug, Clone, Default)]
pub struct ManifestCalls {
    /// Call that returns the binding tree.
    pub bindings: Option<Call>,
    /// Call made once the app is installed.
    pub on_install: Option<Call>,
    /// Call made before the app is uninstalled.
    pub on_uninstall: Option<Call>,
    /// Call made when the app is enabled.
    pub on_enable: Option<Call>,
    /// Call made when the app is disabled.
    pub on_disable: Option<Call>,
}

impl Manifest {
    /// Creates a validated manifest.
    pub fn new(
        app_id: impl Into<String>,
        display_name: impl Into<String>,
        homepage_url: impl Into<String>,
        icon: impl Into<String>,
        http: HttpDeploy,
    ) -> AppResult<Self> {
        Ok(Self {
            app_id: NonEmptyString::new(app_id)?,
            version: None,
            display_name: NonEmptyString::new(display_name)?,
            description: None,
            homepage_url: homepage_url.into(),
            icon: icon.into(),
            requested_permissions: Vec::new(),
            requested_locations: Vec::new(),
            bindings: None,
            on_install: None,
            on_uninstall: None,
            on_enable: None,
            on_disable: None,
            http,
        })
    }

    /// Sets the version string.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets requested permissions.
    #[must_use]
    pub fn with_permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.requested_permissions = permissions;
        self
    }

    /// Sets requested UI locations.
    #[must_use]
    pub fn with_locations(mut self, locations: Vec<Location>) -> Self {
        self.requested_locations = locations;
        self
    }

    /// Sets the bindings and lifecycle calls.
    #[must_use]
    pub fn with_calls(mut self, calls: ManifestCalls) -> Self {
        self.bindings = calls.bindings;
        self.on_install = calls.on_install;
        self.on_uninstall = calls.on_uninstall;
        self.on_enable = calls.on_enable;
        self.on_disable = calls.on_disable;
        self
    }

    /// Returns the app identifier.
    #[must_use]
    pub fn app_id(&self) -> &str {
        self.app_id.as_str()
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns requested locations.
    #[must_use]
    pub fn requested_locations(&self) -> &[Location] {
        &self.requested_locations
    }

    /// Returns the HTTP deployment.
    #[must_use]
    pub fn http(&self) -> &HttpDeploy {
        &self.http
    }

    /// Returns every call the manifest references.
    #[must_use]
    pub fn calls(&self) -> Vec<&Call> {
        [
            &self.bindings,
            &self.on_install,
            &self.on_uninstall,
            &self.on_enable,
            &self.on_disable,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
