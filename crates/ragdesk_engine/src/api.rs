use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::Serialize;
use url::Url;

use ragdesk_logging::rag_debug;

use crate::{ApiError, AskAnswer, ClientSettings, FailureKind, FileUpload};

/// The backend's REST surface.
#[async_trait::async_trait]
pub trait RagApi: Send + Sync {
    /// `GET /health`. Succeeds when the backend answers with any JSON body.
    async fn health(&self) -> Result<(), ApiError>;

    /// `POST /ask`.
    async fn ask(&self, question: &str) -> Result<AskAnswer, ApiError>;

    /// `POST /ingest`. Any error status is reported as `HttpStatus`.
    async fn ingest_texts(&self, texts: &[String], source: &str) -> Result<(), ApiError>;

    /// `POST /ingest-file`. An error status is reported as `Rejected` with
    /// the server's `detail`.
    async fn ingest_file(&self, file: &FileUpload) -> Result<(), ApiError>;
}

#[derive(Serialize)]
struct AskPayload<'a> {
    question: &'a str,
}

#[derive(Serialize)]
struct IngestPayload<'a> {
    texts: &'a [String],
    source: &'a str,
}

#[derive(Debug, Clone)]
pub struct ReqwestRagApi {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestRagApi {
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url).map_err(|err| {
            ApiError::new(
                FailureKind::InvalidUrl,
                format!("{}: {err}", settings.base_url),
            )
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(map_reqwest_error)?;

        Ok(Self { client, base })
    }

    fn endpoint(&self, name: &str) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::new(FailureKind::InvalidUrl, self.base.to_string()))?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl RagApi for ReqwestRagApi {
    async fn health(&self) -> Result<(), ApiError> {
        let response = self
            .client
            .get(self.endpoint("health")?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        // The status code is not consulted: a JSON body means the backend is up.
        let body = read_body(response).await?;
        serde_json::from_str::<serde_json::Value>(&body).map_err(malformed)?;
        Ok(())
    }

    async fn ask(&self, question: &str) -> Result<AskAnswer, ApiError> {
        let response = self
            .client
            .post(self.endpoint("ask")?)
            .json(&AskPayload { question })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = ensure_success(&response)?;
        let body = read_body(response).await?;
        rag_debug!("ask answered with status {} ({} bytes)", status, body.len());
        serde_json::from_str(&body).map_err(malformed)
    }

    async fn ingest_texts(&self, texts: &[String], source: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint("ingest")?)
            .json(&IngestPayload { texts, source })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        ensure_success(&response)?;
        Ok(())
    }

    async fn ingest_file(&self, file: &FileUpload) -> Result<(), ApiError> {
        let part = Part::bytes(file.content.clone()).file_name(file.file_name.clone());
        let form = Form::new().part("file", part);
        let response = self
            .client
            .post(self.endpoint("ingest-file")?)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = read_body(response).await?;
        let detail = rejection_detail(status, &body)?;
        Err(ApiError::new(
            FailureKind::Rejected {
                status: status.as_u16(),
                detail: detail.clone(),
            },
            detail,
        ))
    }
}

fn ensure_success(response: &Response) -> Result<StatusCode, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(status)
    } else {
        Err(ApiError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ))
    }
}

async fn read_body(response: Response) -> Result<String, ApiError> {
    response.text().await.map_err(map_reqwest_error)
}

/// Extracts `detail` from an error body. String details are used verbatim,
/// structured ones (validation errors) are rendered as JSON. A body that is
/// not JSON at all is a malformed-body failure.
fn rejection_detail(status: StatusCode, body: &str) -> Result<String, ApiError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(malformed)?;
    let detail = match value.get("detail") {
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    Ok(detail)
}

fn malformed(err: serde_json::Error) -> ApiError {
    ApiError::new(FailureKind::MalformedBody, err.to_string())
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::MalformedBody, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
