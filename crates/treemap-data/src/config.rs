use std::time::Duration;

use url::Url;

use crate::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_ENDPOINT_PATH: &str = "/api/treedata";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestMethod {
    /// `{"filter": "<key>"}` as a JSON body.
    #[default]
    Post,
    /// `?filter=<key>` as a query parameter.
    Get,
}

/// Where and how to ask for tree data. Resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: Url,
    pub path: String,
    pub method: RequestMethod,
    pub timeout: Option<Duration>,
}

impl BackendConfig {
    #[allow(clippy::missing_errors_doc)]
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            path: DEFAULT_ENDPOINT_PATH.to_string(),
            method: RequestMethod::default(),
            timeout: None,
        })
    }

    #[must_use]
    pub fn with_path(self, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_method(self, method: RequestMethod) -> Self {
        Self { method, ..self }
    }

    #[must_use]
    pub fn with_timeout(self, timeout: Option<Duration>) -> Self {
        Self { timeout, ..self }
    }

    /// `path` appended to the path of `base_url`, never replacing it.
    #[allow(clippy::missing_errors_doc)]
    pub fn endpoint(&self) -> Result<Url, Error> {
        let mut endpoint = self.base_url.clone();
        endpoint
            .path_segments_mut()
            .map_err(|()| Error::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(self.path.split('/').filter(|segment| !segment.is_empty()));
        Ok(endpoint)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            path: DEFAULT_ENDPOINT_PATH.to_string(),
            method: RequestMethod::default(),
            timeout: None,
        }
    }
}
