//! HTTP client for a running leadsim server.
//!
//! Used by the `status` and `demo` subcommands. The base URL points at the
//! API root, e.g. `http://127.0.0.1:3000/api`.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use leadsim_core::models::*;

use crate::api::{ForcePhaseInput, StartSessionResponse};

/// Default URL for a local server.
pub const DEFAULT_URL: &str = "http://127.0.0.1:3000/api";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    Server(String),
}

#[derive(Debug, Clone)]
pub struct SimClient {
    base_url: String,
    client: Client,
}

impl SimClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, &url)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            match status {
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(body)),
                StatusCode::BAD_REQUEST => Err(ClientError::BadRequest(body)),
                _ => Err(ClientError::Server(format!("{}: {}", status, body))),
            }
        }
    }

    /// Returns the server's reported status string.
    pub async fn health(&self) -> Result<String, ClientError> {
        let response = self.request(reqwest::Method::GET, "/health").send().await?;
        let body: serde_json::Value = self.handle_response(response).await?;
        Ok(body["status"].as_str().unwrap_or("unknown").to_string())
    }

    pub async fn start_session(&self) -> Result<Uuid, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/session/start")
            .send()
            .await?;
        let started: StartSessionResponse = self.handle_response(response).await?;
        Ok(started.session_id)
    }

    pub async fn get_state(&self, id: Uuid) -> Result<Session, ClientError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/session/{}/state", id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn submit_action(
        &self,
        id: Uuid,
        action: &SimulationAction,
    ) -> Result<ActionResponse, ClientError> {
        let response = self
            .request(reqwest::Method::POST, &format!("/session/{}/action", id))
            .json(action)
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn force_phase(&self, id: Uuid, phase: Phase) -> Result<Session, ClientError> {
        let response = self
            .request(reqwest::Method::POST, &format!("/session/{}/debug/phase", id))
            .json(&ForcePhaseInput {
                phase: phase.as_str().to_string(),
            })
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn get_results(&self, id: Uuid) -> Result<SessionResults, ClientError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/session/{}/results", id))
            .send()
            .await?;
        self.handle_response(response).await
    }
}
