use std::path::Path;
use std::time::Duration;

use critique_core::AnalysisResult;
use critique_logging::{critique_info, critique_warn};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::{AnalysisError, AnalysisRequest, DocumentUpload};

/// Message used when a failed response carries no usable `detail`.
pub const SERVER_ERROR: &str = "Server Error";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// Whole-request budget. Model-backed analysis is slow, so this is generous.
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000/analyze".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
            max_response_bytes: 4 * 1024 * 1024,
        }
    }
}

/// Submits one document for analysis. A single attempt; retrying is the
/// caller's decision.
#[async_trait::async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalysisClient {
    settings: ClientSettings,
}

impl ReqwestAnalysisClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, AnalysisError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| AnalysisError::Network(err.to_string()))
    }
}

#[async_trait::async_trait]
impl AnalysisClient for ReqwestAnalysisClient {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let document = request.document.ok_or(AnalysisError::NoDocument)?;
        let endpoint = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| AnalysisError::InvalidEndpoint(err.to_string()))?;
        let client = self.build_client()?;

        critique_info!(
            "Submitting {} ({} bytes) to {}",
            document.file_name,
            document.bytes.len(),
            endpoint
        );
        let mut form = Form::new().part(
            "file",
            Part::bytes(document.bytes).file_name(document.file_name),
        );
        if let Some(text) = request
            .job_description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
        {
            form = form.text("job_description", text.to_string());
        }

        let response = client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = read_limited(response, self.settings.max_response_bytes).await;

        if !status.is_success() {
            let message = match body {
                Ok(bytes) => error_detail(&bytes),
                Err(err) => {
                    critique_warn!("Could not read failure body: {}", err);
                    SERVER_ERROR.to_string()
                }
            };
            return Err(AnalysisError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let result: AnalysisResult = serde_json::from_slice(&body?)
            .map_err(|err| AnalysisError::MalformedResponse(err.to_string()))?;
        if let Some(message) = result.service_error() {
            return Err(AnalysisError::Service {
                status: status.as_u16(),
                message: message.to_string(),
            });
        }
        Ok(result)
    }
}

/// Reads a document from disk for upload, keeping only its file name.
pub async fn load_document(path: &Path) -> Result<DocumentUpload, AnalysisError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| AnalysisError::DocumentRead {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    Ok(DocumentUpload { file_name, bytes })
}

async fn read_limited(response: reqwest::Response, max_bytes: u64) -> Result<Vec<u8>, AnalysisError> {
    if let Some(content_len) = response.content_length() {
        if content_len > max_bytes {
            return Err(AnalysisError::TooLarge { max_bytes });
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_reqwest_error)?;
        if bytes.len() as u64 + chunk.len() as u64 > max_bytes {
            return Err(AnalysisError::TooLarge { max_bytes });
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// `detail` of a failure body: strings as-is, other JSON values as text.
fn error_detail(body: &[u8]) -> String {
    let detail = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| value.get("detail").cloned());
    match detail {
        Some(Value::String(message)) if !message.trim().is_empty() => message,
        Some(Value::Null) | Some(Value::String(_)) | None => SERVER_ERROR.to_string(),
        Some(other) => other.to_string(),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> AnalysisError {
    if err.is_timeout() {
        return AnalysisError::Timeout;
    }
    AnalysisError::Network(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_is_used_verbatim() {
        assert_eq!(error_detail(br#"{"detail": "CRASH: bad pdf"}"#), "CRASH: bad pdf");
    }

    #[test]
    fn missing_or_unparseable_detail_is_generic() {
        assert_eq!(error_detail(b"<html>502</html>"), SERVER_ERROR);
        assert_eq!(error_detail(br#"{"message": "nope"}"#), SERVER_ERROR);
        assert_eq!(error_detail(br#"{"detail": null}"#), SERVER_ERROR);
        assert_eq!(error_detail(b""), SERVER_ERROR);
    }

    #[test]
    fn structured_detail_is_rendered_as_json() {
        assert_eq!(
            error_detail(br#"{"detail": [{"msg": "field required"}]}"#),
            r#"[{"msg":"field required"}]"#
        );
    }
}
