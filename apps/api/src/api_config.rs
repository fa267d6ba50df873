use std::env;
use std::time::Duration;

use dynaform_core::AppError;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub app_host: String,
    pub app_port: u16,
    pub root_url: Url,
    pub lookup_timeout: Duration,
    pub lookup_remote_url: Option<Url>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let app_host = non_empty_env("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let app_port = non_empty_env("APP_PORT")
            .map(|value| {
                value
                    .parse::<u16>()
                    .map_err(|error| AppError::Validation(format!("invalid APP_PORT: {error}")))
            })
            .transpose()?
            .unwrap_or(8090);

        let root_url = non_empty_env("ROOT_URL")
            .unwrap_or_else(|| format!("http://{app_host}:{app_port}"));
        let root_url = parse_url("ROOT_URL", &root_url)?;

        let lookup_timeout_ms = non_empty_env("LOOKUP_TIMEOUT_MS")
            .map(|value| {
                value.parse::<u64>().map_err(|error| {
                    AppError::Validation(format!("invalid LOOKUP_TIMEOUT_MS: {error}"))
                })
            })
            .transpose()?
            .unwrap_or(2000);
        if lookup_timeout_ms == 0 {
            return Err(AppError::Validation(
                "LOOKUP_TIMEOUT_MS must be greater than zero".to_owned(),
            ));
        }

        let lookup_remote_url = non_empty_env("LOOKUP_REMOTE_URL")
            .map(|value| parse_url("LOOKUP_REMOTE_URL", &value))
            .transpose()?;

        Ok(Self {
            app_host,
            app_port,
            root_url,
            lookup_timeout: Duration::from_millis(lookup_timeout_ms),
            lookup_remote_url,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.app_host.clone(), self.app_port)
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            app_host: "127.0.0.1".to_owned(),
            app_port: 8090,
            root_url: Url::parse("http://localhost:8090").unwrap_or_else(|_| unreachable!()),
            lookup_timeout: Duration::from_secs(2),
            lookup_remote_url: None,
        }
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_url(name: &str, value: &str) -> Result<Url, AppError> {
    let url = Url::parse(value)
        .map_err(|error| AppError::Validation(format!("invalid {name} '{value}': {error}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::Validation(format!(
            "{name} must use http or https, got '{}'",
            url.scheme()
        )));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::parse_url;

    #[test]
    fn parse_url_accepts_http_urls() {
        let url = parse_url("ROOT_URL", "http://localhost:8090");
        assert!(url.is_ok_and(|url| url.port() == Some(8090)));
    }

    #[test]
    fn parse_url_rejects_relative_and_non_http_urls() {
        assert!(parse_url("ROOT_URL", "localhost:8090/").is_err());
        assert!(parse_url("ROOT_URL", "/apps/hello").is_err());
        assert!(parse_url("ROOT_URL", "ftp://example.com").is_err());
    }
}
