use std::sync::Arc;

use reqwest::{Client, Method};
use serde::Serialize;
use tracing::instrument;
use url::Url;

use crate::{BackendConfig, Error, GroupBy, RequestMethod, TreeNode};

/// Anything that can produce tree data for a grouping key.
#[async_trait::async_trait]
pub trait Source: Send + Sync + 'static {
    async fn fetch(&self, group_by: GroupBy) -> Result<Vec<TreeNode>, Error>;
}

#[derive(Serialize)]
struct FilterRequest<'a> {
    filter: &'a str,
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    inner: Arc<HttpSourceInner>,
}

impl HttpSource {
    #[allow(clippy::missing_errors_doc)]
    pub fn new(config: &BackendConfig) -> Result<Self, Error> {
        let inner = HttpSourceInner::new(config)?;
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }
}

#[async_trait::async_trait]
impl Source for HttpSource {
    async fn fetch(&self, group_by: GroupBy) -> Result<Vec<TreeNode>, Error> {
        self.inner.tree(group_by).await
    }
}

#[derive(Debug)]
struct HttpSourceInner {
    endpoint: Url,
    method: RequestMethod,
    client: Client,
}

impl HttpSourceInner {
    fn new(config: &BackendConfig) -> Result<Self, Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            endpoint: config.endpoint()?,
            method: config.method,
            client: builder.build()?,
        })
    }

    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn tree(&self, group_by: GroupBy) -> Result<Vec<TreeNode>, Error> {
        let filter = FilterRequest {
            filter: group_by.as_str(),
        };
        let request = match self.method {
            RequestMethod::Post => self
                .client
                .request(Method::POST, self.endpoint.clone())
                .json(&filter),
            RequestMethod::Get => self
                .client
                .request(Method::GET, self.endpoint.clone())
                .query(&filter),
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "backend answered with an error status");
            return Err(Error::Status(status));
        }

        let bytes = response.bytes().await?;
        let nodes: Vec<TreeNode> = serde_json::from_slice(&bytes)?;
        tracing::debug!(nodes = nodes.len(), "received tree data");
        Ok(nodes)
    }
}
