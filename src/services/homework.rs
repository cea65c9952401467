// src/services/homework.rs

//! Review API client.
//!
//! Issues one `GET` per poll and hands back the decoded body untouched;
//! shape checks live in the validator.

use reqwest::Client;
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::ApiConfig;
use crate::utils::http;

/// Client for the homework status endpoint.
pub struct HomeworkClient {
    client: Client,
    endpoint: String,
    auth_header: String,
}

impl HomeworkClient {
    /// Create a client for the configured endpoint.
    pub fn new(config: &ApiConfig, token: &str) -> Result<Self> {
        Ok(Self {
            client: http::create_client(config)?,
            endpoint: config.endpoint.clone(),
            auth_header: format!("OAuth {token}"),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch homework statuses changed since `from_date` (Unix seconds).
    pub async fn fetch(&self, from_date: i64) -> Result<Value> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                log::error!(
                    "Request to {} failed (from_date={}): {}",
                    self.endpoint,
                    from_date,
                    e
                );
                AppError::transport(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            log::error!(
                "Review API answered {} for {} with params from_date={}; headers: [{}]",
                status,
                self.endpoint,
                from_date,
                http::format_headers(response.headers())
            );
            return Err(AppError::ServerConnection {
                status: status.as_u16(),
                from_date,
            });
        }

        let body = response.bytes().await.map_err(|e| {
            log::error!("Reading response body from {} failed: {}", self.endpoint, e);
            AppError::transport(e)
        })?;

        let value = serde_json::from_slice(&body)
            .map_err(|e| AppError::malformed(format!("body is not JSON: {e}")))?;
        log::debug!("Review API response OK (from_date={})", from_date);
        Ok(value)
    }
}
