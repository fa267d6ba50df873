use std::collections::HashSet;
use std::sync::Arc;

use dynaform_core::{AppError, AppResult};
use dynaform_domain::{Binding, Call, Manifest};

/// Application service exposing the app manifest.
///
/// Construction checks that every call the manifest declares points at a
/// registered endpoint, so a broken manifest fails at startup rather than
/// at install time.
#[derive(Debug, Clone)]
pub struct ManifestService {
    manifest: Arc<Manifest>,
    registered_paths: Arc<HashSet<String>>,
}

impl ManifestService {
    /// Creates a manifest service validated against `registered_paths`.
    pub fn new(manifest: Manifest, registered_paths: &[&str]) -> AppResult<Self> {
        let service = Self {
            manifest: Arc::new(manifest),
            registered_paths: Arc::new(
                registered_paths
                    .iter()
                    .map(|path| (*path).to_owned())
                    .collect(),
            ),
        };

        service.validate_calls(service.manifest.calls())?;
        Ok(service)
    }

    /// Returns the manifest.
    #[must_use]
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Fails when any of `calls` targets an unregistered endpoint.
    pub fn validate_calls<'a>(&self, calls: impl IntoIterator<Item = &'a Call>) -> AppResult<()> {
        for call in calls {
            if !self.registered_paths.contains(call.path()) {
                return Err(AppError::Validation(format!(
                    "call path '{}' does not match a registered endpoint",
                    call.path()
                )));
            }
        }

        Ok(())
    }

    /// Fails when a top-level binding sits on a location the manifest does not request.
    pub fn validate_bindings(&self, bindings: &[Binding]) -> AppResult<()> {
        for binding in bindings {
            let requested = self
                .manifest
                .requested_locations()
                .iter()
                .any(|location| location.as_str() == binding.location());
            if !requested {
                return Err(AppError::Validation(format!(
                    "binding location '{}' is not requested by the manifest",
                    binding.location()
                )));
            }

            self.validate_calls(binding.calls())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use dynaform_domain::{Binding, Call, HttpDeploy, Location, Manifest, ManifestCalls};
    use url::Url;

    use super::ManifestService;

    const PATHS: &[&str] = &["/bindings", "/install", "/hello"];

    fn call(path: &str) -> Call {
        Call::new(path).unwrap_or_else(|_| unreachable!())
    }

    fn manifest(install_path: &str) -> Manifest {
        let root_url = Url::parse("http://localhost:8090").unwrap_or_else(|_| unreachable!());
        Manifest::new(
            "hello",
            "Hello",
            "https://example.com",
            "icon.png",
            HttpDeploy::new(&root_url),
        )
        .unwrap_or_else(|_| unreachable!())
        .with_locations(vec![Location::ChannelHeader])
        .with_calls(ManifestCalls {
            bindings: Some(call("/bindings")),
            on_install: Some(call(install_path)),
            ..ManifestCalls::default()
        })
    }

    #[test]
    fn manifest_with_registered_calls_is_accepted() {
        assert!(ManifestService::new(manifest("/install"), PATHS).is_ok());
    }

    #[test]
    fn manifest_with_unregistered_call_is_rejected() {
        assert!(ManifestService::new(manifest("/setup"), PATHS).is_err());
    }

    #[test]
    fn bindings_must_use_requested_locations_and_paths() {
        let service =
            ManifestService::new(manifest("/install"), PATHS).unwrap_or_else(|_| unreachable!());
        let leaf = |path: &str| {
            Binding::submit("send-button", "send", call(path)).unwrap_or_else(|_| unreachable!())
        };

        let header = Binding::group("/channel_header", vec![leaf("/hello")])
            .unwrap_or_else(|_| unreachable!());
        let command =
            Binding::group("/command", vec![leaf("/hello")]).unwrap_or_else(|_| unreachable!());
        let broken = Binding::group("/channel_header", vec![leaf("/missing")])
            .unwrap_or_else(|_| unreachable!());

        assert!(service.validate_bindings(&[header]).is_ok());
        assert!(service.validate_bindings(&[command]).is_err());
        assert!(service.validate_bindings(&[broken]).is_err());
    }
}
