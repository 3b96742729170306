use critique_core::AnalysisResult;

/// Document bytes as uploaded in the `file` multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisRequest {
    pub document: Option<DocumentUpload>,
    /// Sent as `job_description` when present and not blank.
    pub job_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    AnalysisCompleted(Result<AnalysisResult, AnalysisError>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// No document chosen; nothing was sent.
    #[error("Please select a file first!")]
    NoDocument,
    #[error("could not read document {path}: {message}")]
    DocumentRead { path: String, message: String },
    #[error("invalid analysis endpoint: {0}")]
    InvalidEndpoint(String),
    /// The service answered with a failure, or with an error-only body.
    #[error("{message}")]
    Service { status: u16, message: String },
    #[error("unreadable response from analysis service: {0}")]
    MalformedResponse(String),
    #[error("analysis service timed out")]
    Timeout,
    #[error("response too large (max {max_bytes} bytes)")]
    TooLarge { max_bytes: u64 },
    #[error("network error: {0}")]
    Network(String),
}

impl AnalysisError {
    /// True for mistakes the user fixes locally, as opposed to service or
    /// network failures.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            AnalysisError::NoDocument | AnalysisError::DocumentRead { .. }
        )
    }
}
