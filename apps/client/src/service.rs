//! Customization service client — the single point of entry for calls to the
//! remote ZenCV customization API.
//!
//! The service is an opaque function from (resume file, job description,
//! model id) to a document blob. The response body is never parsed or
//! validated here; the service is trusted to return the expected document
//! format.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::form::ResumeFile;

/// Multipart field names the customization endpoint expects.
pub const FIELD_RESUME_FILE: &str = "resume_file";
pub const FIELD_JOB_DESCRIPTION: &str = "job_description";
pub const FIELD_MODEL_NAME: &str = "model_name";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service answered with a non-2xx status. The body is not interpreted.
    #[error("service returned status {status}")]
    Status { status: u16 },

    /// The request never produced an HTTP response (connection failure,
    /// timeout, malformed endpoint).
    #[error("{message}")]
    Transport { message: String },
}

/// The seam between the form and the network. Swap implementations to test
/// the form without a live service.
#[async_trait]
pub trait CustomizeService: Send + Sync {
    async fn customize(
        &self,
        file: &ResumeFile,
        job_description: &str,
        model_id: &str,
    ) -> Result<Bytes, ServiceError>;
}

/// HTTP implementation: one multipart POST per call, no retries.
pub struct HttpCustomizeService {
    client: Client,
    endpoint: String,
}

impl HttpCustomizeService {
    /// `timeout: None` preserves the original client's open-ended wait — a
    /// request against a silent upstream never completes. Pass a timeout to
    /// opt out of that behavior.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            client: builder.build().expect("Failed to build HTTP client"),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl CustomizeService for HttpCustomizeService {
    async fn customize(
        &self,
        file: &ResumeFile,
        job_description: &str,
        model_id: &str,
    ) -> Result<Bytes, ServiceError> {
        let part = Part::bytes(file.content.to_vec()).file_name(file.name.clone());
        let form = Form::new()
            .part(FIELD_RESUME_FILE, part)
            .text(FIELD_JOB_DESCRIPTION, job_description.to_string())
            .text(FIELD_MODEL_NAME, model_id.to_string());

        debug!(
            "POST {} ({} resume bytes, model: {model_id})",
            self.endpoint, file.size
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ServiceError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("customization request failed with status {status}");
            return Err(ServiceError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| ServiceError::Transport {
            message: e.to_string(),
        })?;

        debug!("customization succeeded: {} document bytes", body.len());
        Ok(body)
    }
}
