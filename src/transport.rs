//! HTTP plumbing shared by every query interface.
//!
//! Owns a single `reqwest` client carrying the storefront's fixed headers and
//! translates transport and status failures into [`CardHavenError`]
//! categories the user can be shown directly.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config;
use crate::error::{CardHavenError, Result};

/// Sends requests to the storefront REST API.
#[derive(Clone)]
pub struct Transport {
    /// API base URL, e.g. `http://localhost:8080/api`.
    pub base_url: String,
    client: Client,
}

impl Transport {
    /// Build a transport for the given base URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(config::default_headers())
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn url(&self, path: &str) -> String {
        config::join_url(&self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        log::debug!("{} {}", method, url);
        self.client.request(method, url)
    }

    /// Send a request and turn any failure into a categorized error.
    async fn send(&self, req: RequestBuilder, path: &str) -> Result<Response> {
        let resp = req.send().await.map_err(|e| {
            let err = CardHavenError::from_transport(e);
            log::error!("HTTP request to {} failed: {}", path, err);
            err
        })?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        let err = CardHavenError::from_status(status, path, &body);
        log::error!("HTTP {} from {}: {}", status.as_u16(), path, err);
        Err(err)
    }

    /// Read the response body, returning `None` when it is empty.
    async fn body<T: DeserializeOwned>(resp: Response) -> Result<Option<T>> {
        let bytes = resp.bytes().await.map_err(CardHavenError::from_transport)?;
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(None);
        }
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }

    /// GET a single resource. An empty body is an error.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.send(self.request(Method::GET, path), path).await?;
        Self::body(resp)
            .await?
            .ok_or_else(|| CardHavenError::EmptyResponse(path.to_string()))
    }

    /// GET a single resource, mapping 404 to `None`.
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        match self.send(self.request(Method::GET, path), path).await {
            Ok(resp) => Self::body(resp).await,
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// GET a collection. An empty body yields an empty list.
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let mut req = self.request(Method::GET, path);
        if !query.is_empty() {
            req = req.query(query);
        }
        let resp = self.send(req, path).await?;
        Ok(Self::body(resp).await?.unwrap_or_default())
    }

    /// POST a JSON body and decode the created resource.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self
            .send(self.request(Method::POST, path).json(body), path)
            .await?;
        Self::body(resp)
            .await?
            .ok_or_else(|| CardHavenError::EmptyResponse(path.to_string()))
    }

    /// PUT a JSON body and decode the updated resource.
    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self
            .send(self.request(Method::PUT, path).json(body), path)
            .await?;
        Self::body(resp)
            .await?
            .ok_or_else(|| CardHavenError::EmptyResponse(path.to_string()))
    }

    /// DELETE a resource; any response body is discarded.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, path), path).await?;
        Ok(())
    }
}
