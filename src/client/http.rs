//! `reqwest`-backed client for the REST surface.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::error::ClientError;
use super::{AdminApi, ContactApi, ExportDownload};
use crate::api::dto::{
    ApiResponse, ContactInfo, MessageListResponse, Pagination, SubmissionData,
    SubmitMessageRequest,
};
use crate::domain::{
    ContactMessage, DashboardStats, MessageExport, MessageId, MessageStatus, StatusChange,
    StatusFilter,
};
use crate::error::ErrorResponse;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Typed client for the contact and admin endpoints.
#[derive(Debug, Clone)]
pub struct PortfolioClient {
    http: reqwest::Client,
    base_url: String,
    admin_token: Option<String>,
}

impl PortfolioClient {
    /// Creates a client for the server at `base_url` (e.g.
    /// `http://localhost:8001`) with [`DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Setup`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client with an explicit per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Setup`] if the HTTP client cannot be built.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Setup(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            admin_token: None,
        })
    }

    /// Sends `Authorization: Bearer <token>` on admin calls.
    #[must_use]
    pub fn with_admin_token(mut self, token: impl Into<String>) -> Self {
        self.admin_token = Some(token.into());
        self
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/contact/info`.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure or an error status.
    pub async fn contact_info(&self) -> Result<ContactInfo, ClientError> {
        let resp = self.http.get(self.url("/api/contact/info")).send().await?;
        decode(resp).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn admin(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.admin_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[async_trait]
impl ContactApi for PortfolioClient {
    async fn submit_message(
        &self,
        request: &SubmitMessageRequest,
    ) -> Result<SubmissionData, ClientError> {
        let resp = self
            .http
            .post(self.url("/api/contact/message"))
            .json(request)
            .send()
            .await?;
        let body: ApiResponse<SubmissionData> = decode(resp).await?;
        Ok(body.data)
    }
}

#[async_trait]
impl AdminApi for PortfolioClient {
    async fn list_messages(
        &self,
        filter: StatusFilter,
        page: Pagination,
    ) -> Result<MessageListResponse, ClientError> {
        let status = filter.status().map_or("all", MessageStatus::as_str);
        let mut url = format!(
            "{}?status={status}&skip={}",
            self.url("/api/admin/messages"),
            page.skip
        );
        if let Some(limit) = page.limit {
            url.push_str(&format!("&limit={limit}"));
        }
        let resp = self.admin(self.http.get(url)).send().await?;
        decode(resp).await
    }

    async fn stats(&self) -> Result<DashboardStats, ClientError> {
        let resp = self
            .admin(self.http.get(self.url("/api/admin/dashboard/stats")))
            .send()
            .await?;
        decode(resp).await
    }

    async fn set_status(
        &self,
        id: MessageId,
        change: StatusChange,
    ) -> Result<ContactMessage, ClientError> {
        let mut url = format!(
            "{}?new_status={}",
            self.url(&format!("/api/admin/messages/{id}/status")),
            change.status.as_str()
        );
        if let Some(version) = change.expected_version {
            url.push_str(&format!("&expected_version={version}"));
        }
        let resp = self.admin(self.http.put(url)).send().await?;
        decode(resp).await
    }

    async fn delete_message(&self, id: MessageId) -> Result<(), ClientError> {
        let resp = self
            .admin(self.http.delete(self.url(&format!("/api/admin/messages/{id}"))))
            .send()
            .await?;
        if resp.status().is_success() {
            return Ok(());
        }
        Err(error_from(resp).await)
    }

    async fn export_messages(&self) -> Result<ExportDownload, ClientError> {
        let resp = self
            .admin(self.http.get(self.url("/api/admin/messages/export")))
            .send()
            .await?;
        let file_name = resp
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_file_name);
        let export: MessageExport = decode(resp).await?;
        let file_name = file_name.unwrap_or_else(|| export.file_name());
        Ok(ExportDownload { file_name, export })
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    if !resp.status().is_success() {
        return Err(error_from(resp).await);
    }
    resp.json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

async fn error_from(resp: Response) -> ClientError {
    let status = resp.status();
    let body = resp.json::<ErrorResponse>().await.ok();
    ClientError::from_status(status, body)
}

/// Extracts `name` from `attachment; filename="name"`.
fn attachment_file_name(header: &str) -> Option<String> {
    let (_, rest) = header.split_once("filename=")?;
    let name = rest.split(';').next()?.trim().trim_matches('"');
    (!name.is_empty()).then(|| name.to_string())
}
