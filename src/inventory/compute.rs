//! Compute REST API inventory

use crate::core::validation::{ProjectId, ResourceName};
use crate::error::{InspectorError, Result};
use crate::inventory::{Inventory, Network, Subnetwork};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Inventory backed by the compute REST API
///
/// Networks are looked up under `{endpoint}/projects/{project}/global/networks/{network}`.
/// Subnetwork links are absolute URLs and are requested as-is.
#[derive(Debug, Clone)]
pub struct ComputeInventory {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl ComputeInventory {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(endpoint, client))
    }

    /// Use a preconfigured HTTP client (proxies, TLS roots, timeouts)
    pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
        ComputeInventory {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Send `token` as a bearer token on every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn network_url(&self, project: &ProjectId, network: &ResourceName) -> String {
        format!(
            "{}/projects/{}/global/networks/{}",
            self.endpoint, project, network
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "GET");

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if response.status() != StatusCode::OK {
            return Err(InspectorError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Inventory for ComputeInventory {
    async fn get_network(&self, project: &ProjectId, network: &ResourceName) -> Result<Network> {
        let url = self.network_url(project, network);
        self.get_json(&url).await
    }

    async fn get_subnetwork(&self, link: &str) -> Result<Subnetwork> {
        self.get_json(link).await
    }
}
