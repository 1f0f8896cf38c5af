//! Client for the report-summarization endpoint.
//!
//! Reports are uploaded as a multipart form, one `document` part per file.
//! A successful response looks like `{"summary": "<JSON text>"}`: the
//! summary itself arrives JSON-encoded inside a string and is decoded a
//! second time here, so callers only ever see the inner document.

use crate::value::{DecodeError, JsonValue, ValueKind};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_ENDPOINT: &str =
    "https://healthbot.pythonanywhere.com/api/upload-report/";

/// Shown when a rejected upload carries no `message` of its own.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Failed to upload PDFs.";

/// Errors from summarization requests.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("please select at least one PDF file")]
    NoDocuments,

    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upload rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("invalid summary: {0}")]
    Decode(#[from] DecodeError),
}

#[derive(Debug, Clone)]
pub struct SummaryClient {
    http: Client,
    endpoint: Url,
}

impl SummaryClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Upload the documents and return the decoded summary.
    pub async fn summarize(
        &self,
        documents: &[PathBuf],
    ) -> Result<JsonValue, SummaryError> {
        if documents.is_empty() {
            return Err(SummaryError::NoDocuments);
        }

        let mut form = Form::new();
        for path in documents {
            form = form.part("document", document_part(path).await?);
        }

        info!(
            documents = documents.len(),
            endpoint = %self.endpoint,
            "uploading reports"
        );
        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "summary response");

        if !status.is_success() {
            let message = rejection_message(&body);
            warn!(status = status.as_u16(), message = message.as_str(), "upload rejected");
            return Err(SummaryError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(decode_summary_response(&body)?)
    }
}

async fn document_part(path: &Path) -> Result<Part, SummaryError> {
    let bytes =
        tokio::fs::read(path)
            .await
            .map_err(|source| SummaryError::Read {
                path: path.to_path_buf(),
                source,
            })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report.pdf".to_string());

    Ok(Part::bytes(bytes)
        .file_name(file_name)
        .mime_str("application/pdf")?)
}

/// Decode the body of a successful upload.
///
/// `summary` is normally a string holding JSON text; an object or array
/// placed there directly is accepted as well.
pub fn decode_summary_response(body: &str) -> Result<JsonValue, DecodeError> {
    let entries = JsonValue::decode(body)?
        .into_object()
        .ok_or(DecodeError::MissingField("summary"))?;
    let summary = entries
        .into_iter()
        .find(|(key, _)| key == "summary")
        .map(|(_, value)| value)
        .ok_or(DecodeError::MissingField("summary"))?;

    if let Some(inner) = summary.as_str() {
        return JsonValue::decode(inner);
    }
    match summary.kind() {
        ValueKind::Object | ValueKind::Array => Ok(summary),
        ValueKind::Null | ValueKind::Bool | ValueKind::Number | ValueKind::String => {
            Err(DecodeError::UnexpectedShape {
                field: "summary",
                expected: "a JSON document",
            })
        }
    }
}

/// The `message` of an error body, if it has one.
pub fn rejection_message(body: &str) -> String {
    JsonValue::decode(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(JsonValue::as_str)
                .filter(|message| !message.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string())
}
